//! Document domain model.

use serde::{Deserialize, Serialize};

/// An immutable snapshot of a document known to the backend.
///
/// Identity is the `id`; the `title` is display-only and may be duplicated
/// across documents. Records are created server-side on upload and never
/// mutated by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque server-assigned identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// The currently selected document, carried by value.
///
/// Selection deliberately copies the id and title instead of looking the
/// document up in the registry sequence: a freshly uploaded document may be
/// selected before the registry's own listing has caught up with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    pub id: String,
    pub title: String,
}
