//! Field presence for request bodies.
//!
//! JSON distinguishes a key that was never sent from one sent as `null`.
//! Partial updates need that distinction ("set if present"), so every
//! request body field is a `Field<T>` rather than a plain `Option<T>`.
//! All nine resources share the `apply_*` helpers below instead of
//! hand-writing `value ?? existing` per field.

use serde::{Deserialize, Deserializer};

/// One request body field: absent, explicitly `null`, or carrying a value.
///
/// Use with `#[serde(default)]` so missing keys become `Absent`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Field::Present(v),
            None => Field::Null,
        })
    }
}

impl<T> Field<T> {
    /// The supplied value, treating `null` like a missing key.
    pub fn value(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }

    /// Overwrite a non-nullable slot when a value was supplied.
    /// `null` leaves the slot alone: the column cannot hold it.
    pub fn apply(self, slot: &mut T) {
        if let Field::Present(v) = self {
            *slot = v;
        }
    }

    /// Overwrite a nullable slot. `null` clears it, absence keeps it.
    pub fn apply_nullable(self, slot: &mut Option<T>) {
        match self {
            Field::Present(v) => *slot = Some(v),
            Field::Null => *slot = None,
            Field::Absent => {}
        }
    }
}

impl Field<String> {
    /// Trimmed text, with `null` and blank input collapsed to `None`.
    pub fn trimmed(self) -> Option<String> {
        self.value()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Overwrite a required text slot with the trimmed value.
    /// `null` empties it so validation rejects the record.
    pub fn apply_text(self, slot: &mut String) {
        match self {
            Field::Present(v) => *slot = v.trim().to_string(),
            Field::Null => slot.clear(),
            Field::Absent => {}
        }
    }

    /// Overwrite an optional text slot; blank input clears it.
    pub fn apply_optional_text(self, slot: &mut Option<String>) {
        match self {
            Field::Present(v) => {
                let trimmed = v.trim();
                *slot = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            Field::Null => *slot = None,
            Field::Absent => {}
        }
    }
}

/// True when a required text value is missing or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
