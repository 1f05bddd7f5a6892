use crate::core::models::entity::Snapshot;
use crate::core::models::log_entry::{ABSENT_REPR, FieldChange};

/// Compares two entity snapshots and produces a minimal per-field diff.
pub struct DiffService;

impl DiffService {
    /// Compare two snapshots and return the fields whose representations
    /// differ.
    ///
    /// - Fields of `new` come first, in `new`'s insertion order
    /// - A field missing from `old` diffs from [`ABSENT_REPR`]
    /// - Fields only in `old` follow, diffed to [`ABSENT_REPR`]
    /// - Fields with identical representations are omitted (no diff)
    ///
    /// The service never inspects live entity state; it only sees the
    /// string renderings the host put into the snapshots.
    pub fn diff(&self, old: &Snapshot, new: &Snapshot) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        for (field, new_repr) in new.iter() {
            let old_repr = old.get(field).unwrap_or(ABSENT_REPR);
            if old_repr != new_repr {
                changes.push(FieldChange::new(field, old_repr, new_repr));
            }
        }

        // Fields that existed before but are gone from the new snapshot
        for (field, old_repr) in old.iter() {
            if new.get(field).is_none() {
                changes.push(FieldChange::new(field, old_repr, ABSENT_REPR));
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a Snapshot from field-repr pairs.
    fn snap(pairs: &[(&str, &str)]) -> Snapshot {
        pairs.iter().copied().collect()
    }

    #[test]
    fn identical_snapshots_produce_empty_diff() {
        let svc = DiffService;
        let a = snap(&[("text", "hello"), ("boolean", "False")]);
        let b = snap(&[("text", "hello"), ("boolean", "False")]);

        assert!(svc.diff(&a, &b).is_empty());
    }

    #[test]
    fn detects_modified_field() {
        let svc = DiffService;
        let old = snap(&[("text", "hello"), ("boolean", "False")]);
        let new = snap(&[("text", "hello"), ("boolean", "True")]);

        let changes = svc.diff(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0], FieldChange::new("boolean", "False", "True"));
    }

    #[test]
    fn field_missing_from_old_diffs_from_absent() {
        let svc = DiffService;
        let old = snap(&[]);
        let new = snap(&[("text", "fresh")]);

        let changes = svc.diff(&old, &new);
        assert_eq!(changes, vec![FieldChange::new("text", ABSENT_REPR, "fresh")]);
    }

    #[test]
    fn field_only_in_old_diffs_to_absent() {
        let svc = DiffService;
        let old = snap(&[("text", "kept"), ("legacy", "42")]);
        let new = snap(&[("text", "kept")]);

        let changes = svc.diff(&old, &new);
        assert_eq!(changes, vec![FieldChange::new("legacy", "42", ABSENT_REPR)]);
    }

    #[test]
    fn ordering_follows_new_snapshot_then_old_leftovers() {
        let svc = DiffService;
        let old = snap(&[("a", "1"), ("gone", "x"), ("b", "2")]);
        let new = snap(&[("b", "20"), ("a", "10"), ("c", "30")]);

        let changes = svc.diff(&old, &new);
        let fields: Vec<&str> = changes
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        assert_eq!(fields, vec!["b", "a", "c", "gone"]);
    }

    #[test]
    fn empty_snapshots_produce_empty_diff() {
        let svc = DiffService;
        assert!(svc.diff(&Snapshot::new(), &Snapshot::new()).is_empty());
    }
}
