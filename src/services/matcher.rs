//! Fuzzy matching between mods of an old install and catalog names.
//!
//! Both sides are lower-cased and stripped of spaces. A legacy name matches a
//! candidate when they are equal or either one contains the other, which
//! copes with versioned or renamed plugin files. Short, generic names will
//! match more than they should; the result only decides which mods start
//! pre-selected, and the user can change every one of them.

fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Check whether any legacy mod name matches `candidate`.
pub fn is_legacy_match<S: AsRef<str>>(legacy_names: &[S], candidate: &str) -> bool {
    let candidate = normalize(candidate);

    legacy_names.iter().any(|legacy| {
        let legacy = normalize(legacy.as_ref());
        legacy == candidate || candidate.contains(&legacy) || legacy.contains(&candidate)
    })
}
