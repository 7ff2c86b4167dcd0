use indexmap::IndexMap;

use super::ModRecord;

/// Insertion-ordered set of mods keyed by id.
///
/// Holds references into the fetched catalog. The order is the order in
/// which mods were chosen or appended as dependencies, and it is the order
/// the acquisition pipeline installs them in.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    mods: IndexMap<&'a str, &'a ModRecord>,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mod unless one with the same id is present.
    ///
    /// Returns `true` if the mod was appended.
    pub fn insert(&mut self, record: &'a ModRecord) -> bool {
        if self.mods.contains_key(record.id.as_str()) {
            return false;
        }
        self.mods.insert(record.id.as_str(), record);
        true
    }

    pub fn get_index(&self, index: usize) -> Option<&'a ModRecord> {
        self.mods.get_index(index).map(|(_, record)| *record)
    }

    /// Remove the first mod whose name equals `name` exactly.
    pub fn remove_first_named(&mut self, name: &str) -> Option<&'a ModRecord> {
        let index = self.mods.values().position(|record| record.name == name)?;
        self.mods
            .shift_remove_index(index)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ModRecord> + '_ {
        self.mods.values().copied()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.mods.keys().copied().collect()
    }

    pub fn to_vec(&self) -> Vec<&'a ModRecord> {
        self.iter().collect()
    }
}

impl<'a> FromIterator<&'a ModRecord> for Selection<'a> {
    fn from_iter<I: IntoIterator<Item = &'a ModRecord>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for record in iter {
            selection.insert(record);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedupes_by_id() {
        let a = ModRecord::new("1", "A");
        let a_again = ModRecord::new("1", "A (renamed)");
        let b = ModRecord::new("2", "B");

        let mut selection = Selection::new();
        assert!(selection.insert(&a));
        assert!(!selection.insert(&a_again));
        assert!(selection.insert(&b));

        assert_eq!(selection.ids(), vec!["1", "2"]);
        assert_eq!(selection.get_index(0).unwrap().name, "A");
    }

    #[test]
    fn test_remove_first_named_keeps_order() {
        let a = ModRecord::new("1", "A");
        let b = ModRecord::new("2", "B");
        let c = ModRecord::new("3", "C");
        let mut selection: Selection = [&a, &b, &c].into_iter().collect();

        let removed = selection.remove_first_named("B").unwrap();
        assert_eq!(removed.id, "2");
        assert_eq!(selection.ids(), vec!["1", "3"]);
        assert!(selection.remove_first_named("B").is_none());
    }

    #[test]
    fn test_remove_first_named_only_once() {
        let first = ModRecord::new("1", "BSIPA");
        let second = ModRecord::new("2", "BSIPA");
        let mut selection: Selection = [&first, &second].into_iter().collect();

        selection.remove_first_named("BSIPA");
        assert_eq!(selection.ids(), vec!["2"]);
    }
}
