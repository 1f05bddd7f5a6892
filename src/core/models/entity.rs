use serde::{Deserialize, Serialize};

/// How the host identifies one entity instance to the core.
///
/// `repr` is the human-readable representation at the time the reference is
/// taken; log entries snapshot it rather than recomputing it later, so a
/// deleted entity still reads sensibly in its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_id: String,
    pub repr: String,
}

impl EntityRef {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        repr: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            repr: repr.into(),
        }
    }
}

/// An insertion-ordered mapping of field name to string representation.
///
/// Snapshots are the only view of entity state the core ever sees: the host
/// renders each field to a string and the diff engine compares those
/// renderings. Ordering is preserved so diffs come out deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    fields: Vec<(String, String)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's representation, replacing any existing value while
    /// keeping the field's original position.
    pub fn set(&mut self, field: impl Into<String>, repr: impl Into<String>) -> &mut Self {
        let field = field.into();
        let repr = repr.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = repr,
            None => self.fields.push((field, repr)),
        }
        self
    }

    /// Returns the representation for the given field, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, r)| r.as_str())
    }

    /// Iterates over `(field, repr)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(f, r)| (f.as_str(), r.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<F: Into<String>, R: Into<String>> FromIterator<(F, R)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (F, R)>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for (field, repr) in iter {
            snapshot.set(field, repr);
        }
        snapshot
    }
}
