//! Backend kind selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three storage facilities a caller can address by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BackendKind {
    /// Durable key/value store (`localStorage`).
    Durable,
    /// Session-scoped key/value store (`sessionStorage`).
    Session,
    /// Cookie store.
    Cookie,
}

impl BackendKind {
    /// All backend kinds, in dispatch order.
    pub const ALL: [BackendKind; 3] = [Self::Durable, Self::Session, Self::Cookie];

    /// Returns the name callers use to request this backend.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Durable => "localStorage",
            Self::Session => "sessionStorage",
            Self::Cookie => "cookie",
        }
    }

    /// Parses a backend name. Matching is exact and case-sensitive.
    ///
    /// Returns `None` for anything that is not one of the three
    /// recognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
