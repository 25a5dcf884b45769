//! Stable identifiers for surfaces, sessions, outputs and zones.
//!
//! Every handle the engine hands back to a host is a UUID-backed newtype,
//! following the `WindowId`/`WorkspaceId` pattern used throughout this
//! codebase: opaque, `Copy`, and ordered only by creation, never by value.

use std::fmt;

use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new, randomly generated identifier.
            pub fn new_v4() -> Self {
                $name(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new_v4()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(SurfaceId, "Identifies a single surface known to the engine.");
uuid_id!(SessionId, "Identifies a client session grouping surfaces.");
uuid_id!(OutputId, "Identifies a single physical output.");
uuid_id!(ZoneId, "Identifies a logical group of one or more outputs.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(SurfaceId::new_v4(), SurfaceId::new_v4());
        assert_ne!(SessionId::new_v4(), SessionId::new_v4());
        assert_ne!(OutputId::new_v4(), OutputId::new_v4());
        assert_ne!(ZoneId::new_v4(), ZoneId::new_v4());
    }

    #[test]
    fn default_is_fresh() {
        assert_ne!(SurfaceId::default(), SurfaceId::default());
    }

    #[test]
    fn display_matches_uuid() {
        let id = SurfaceId::new_v4();
        assert_eq!(id.to_string().len(), 36);
    }
}
