use crate::models::{ModRecord, Selection};

/// Outcome of expanding a user selection to its dependency closure.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    /// The chosen mods followed by every dependency they pulled in,
    /// minus the entries removed by exclusion rules.
    pub selection: Selection<'a>,

    /// Number of mods appended because something depended on them.
    pub added_dependencies: usize,

    /// Mods removed by exclusion rules, in rule order.
    pub excluded: Vec<&'a ModRecord>,
}

/// Expand `selected` to a closed set and apply exclusion rules.
///
/// The selection is walked by index while it grows, so dependencies of
/// freshly appended mods are visited in their turn and the walk ends at a
/// fixed point. Ids are inserted at most once, which also bounds cycles.
///
/// Each name in `excluded_names` removes the first mod with exactly that
/// name after expansion. Mods that depend on it are left in place.
pub fn resolve<'a, I, S>(selected: I, excluded_names: &[S]) -> Resolution<'a>
where
    I: IntoIterator<Item = &'a ModRecord>,
    S: AsRef<str>,
{
    let mut selection: Selection<'a> = selected.into_iter().collect();
    let mut added_dependencies = 0;

    let mut index = 0;
    while let Some(record) = selection.get_index(index) {
        for dependency in &record.dependencies {
            if selection.insert(dependency) {
                tracing::debug!(
                    "Adding dependency {} required by {}",
                    dependency.name,
                    record.name
                );
                added_dependencies += 1;
            }
        }
        index += 1;
    }

    let mut excluded = Vec::new();
    for name in excluded_names {
        if let Some(removed) = selection.remove_first_named(name.as_ref()) {
            tracing::info!("Excluded {} from installation", removed.name);
            excluded.push(removed);
        }
    }

    Resolution {
        selection,
        added_dependencies,
        excluded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EXCLUSIONS: &[&str] = &[];

    fn names(resolution: &Resolution<'_>) -> Vec<String> {
        resolution.selection.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_shared_dependency_added_once() {
        let b = ModRecord::new("b", "B");
        let c = ModRecord::new("c", "C").with_dependencies(vec![b.clone()]);
        let a = ModRecord::new("a", "A").with_dependencies(vec![b.clone(), c.clone()]);

        let resolution = resolve([&a, &c], NO_EXCLUSIONS);

        assert_eq!(names(&resolution), vec!["A", "C", "B"]);
        assert_eq!(resolution.added_dependencies, 1);
    }

    #[test]
    fn test_transitive_dependencies() {
        let d = ModRecord::new("d", "D");
        let c = ModRecord::new("c", "C").with_dependencies(vec![d]);
        let b = ModRecord::new("b", "B").with_dependencies(vec![c]);
        let a = ModRecord::new("a", "A").with_dependencies(vec![b]);

        let resolution = resolve([&a], NO_EXCLUSIONS);

        assert_eq!(names(&resolution), vec!["A", "B", "C", "D"]);
        assert_eq!(resolution.added_dependencies, 3);
    }

    #[test]
    fn test_cycle_terminates() {
        let a_stub = ModRecord::new("a", "A");
        let b = ModRecord::new("b", "B").with_dependencies(vec![a_stub]);
        let a = ModRecord::new("a", "A").with_dependencies(vec![b]);

        let resolution = resolve([&a], NO_EXCLUSIONS);

        assert_eq!(resolution.selection.ids(), vec!["a", "b"]);
        assert_eq!(resolution.added_dependencies, 1);
    }

    #[test]
    fn test_exclusion_by_name() {
        let b = ModRecord::new("b", "B");
        let a = ModRecord::new("a", "A").with_dependencies(vec![b.clone()]);

        let resolution = resolve([&a, &b], &["A"]);

        assert_eq!(names(&resolution), vec!["B"]);
        assert_eq!(resolution.added_dependencies, 0);
        assert_eq!(resolution.excluded.len(), 1);
        assert_eq!(resolution.excluded[0].id, "a");
    }

    #[test]
    fn test_excluded_dependency_is_dropped_despite_dependents() {
        let bsipa = ModRecord::new("bsipa", "BSIPA");
        let song_core = ModRecord::new("sc", "SongCore").with_dependencies(vec![bsipa]);

        let resolution = resolve([&song_core], &["BSIPA".to_string()]);

        assert_eq!(names(&resolution), vec!["SongCore"]);
        assert_eq!(resolution.added_dependencies, 1);
    }

    #[test]
    fn test_unknown_exclusion_is_ignored() {
        let a = ModRecord::new("a", "A");
        let resolution = resolve([&a], &["BSIPA"]);
        assert_eq!(names(&resolution), vec!["A"]);
        assert!(resolution.excluded.is_empty());
    }

    #[test]
    fn test_empty_selection() {
        let resolution = resolve(std::iter::empty::<&ModRecord>(), NO_EXCLUSIONS);
        assert!(resolution.selection.is_empty());
        assert_eq!(resolution.added_dependencies, 0);
    }
}
