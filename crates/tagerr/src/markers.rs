use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The boolean capability markers carried by a tagged error value.
///
/// A fresh value starts with nothing asserted. Tagging asserts the
/// `isException` marker plus one `is<Name>Exception` marker per distinct
/// type name; markers only ever grow and are never downgraded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    exception: bool,
    names: BTreeSet<String>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `isException` marker is asserted.
    pub fn is_exception(&self) -> bool {
        self.exception
    }

    /// Whether the `is<Name>Exception` marker for `type_name` is asserted.
    pub fn has(&self, type_name: &str) -> bool {
        self.names.contains(type_name)
    }

    pub fn set_exception(&mut self) {
        self.exception = true;
    }

    /// Assert the marker for `type_name`. Idempotent.
    pub fn assert(&mut self, type_name: impl Into<String>) {
        self.names.insert(type_name.into());
    }

    /// Type names whose markers are asserted, in sorted order.
    pub fn asserted(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Derives the wire-form marker key for a type name: `is<Name>Exception`.
///
/// Deterministic: two values with the same type name share the same key.
pub fn marker_name(type_name: &str) -> String {
    format!("is{type_name}Exception")
}
