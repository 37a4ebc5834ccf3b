//! Identity handles and the merge key used to join collected data back
//! onto the caller's list.

use std::collections::HashSet;

/// A caller-supplied handle together with its merge key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The handle as first spelled in the input.
    pub name: String,
    pub key: String,
}

impl Identity {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = merge_key(&name);
        Self { name, key }
    }
}

/// Canonical join key: surrounding whitespace stripped, lowercased.
#[must_use]
pub fn merge_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Builds the working set from raw input cells.
///
/// Blank cells are skipped, duplicates (by merge key) keep their first
/// spelling and position, and `limit` truncates the result to the first
/// `limit` identities.
#[must_use]
pub fn prepare_identities<I, S>(raw: I, limit: Option<usize>) -> Vec<Identity>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut identities: Vec<Identity> = raw
        .into_iter()
        .filter_map(|cell| {
            let cell = cell.as_ref();
            if cell.trim().is_empty() {
                return None;
            }
            let identity = Identity::new(cell);
            seen.insert(identity.key.clone()).then_some(identity)
        })
        .collect();

    if let Some(limit) = limit {
        identities.truncate(limit);
    }
    identities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(identities: &[Identity]) -> Vec<&str> {
        identities.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn merge_key_lowercases_and_trims() {
        assert_eq!(merge_key("  DanceQueen_01 \t"), "dancequeen_01");
    }

    #[test]
    fn merge_key_is_stable_across_calls() {
        let once = merge_key(" Foo ");
        assert_eq!(merge_key(&once), once);
    }

    #[test]
    fn prepare_keeps_first_spelling_and_order() {
        let ids = prepare_identities(["Bob", "alice", "BOB ", "Carol", "Alice"], None);
        assert_eq!(names(&ids), vec!["Bob", "alice", "Carol"]);
        assert_eq!(ids[0].key, "bob");
    }

    #[test]
    fn prepare_drops_blank_cells() {
        let ids = prepare_identities(["", "  ", "dan"], None);
        assert_eq!(names(&ids), vec!["dan"]);
    }

    #[test]
    fn prepare_is_idempotent() {
        let first = prepare_identities(["a", "A", "b", " b", "c"], None);
        let second = prepare_identities(first.iter().map(|i| i.name.as_str()), None);
        assert_eq!(first, second);
    }

    #[test]
    fn prepare_applies_limit_after_dedup() {
        let ids = prepare_identities(["a", "A", "b", "c", "d"], Some(2));
        assert_eq!(names(&ids), vec!["a", "b"]);
    }

    #[test]
    fn prepare_limit_zero_yields_nothing() {
        assert!(prepare_identities(["a"], Some(0)).is_empty());
    }

    #[test]
    fn prepare_empty_input() {
        assert!(prepare_identities(Vec::<String>::new(), None).is_empty());
    }
}
