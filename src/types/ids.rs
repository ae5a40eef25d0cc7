//! Strongly-typed identifiers.
//!
//! Process and resource identities are small integers in practice; the
//! newtypes keep them from being mixed up with indices or unit counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed numeric ID newtype wrapper.
///
/// Generates: struct, `new()`, `get()`, `From<u32>`, and a Display that
/// renders the value behind the given prefix (`P3`, `R0`).
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(ProcessId, "P");
define_id!(ResourceId, "R");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        assert_eq!(ProcessId::new(4).to_string(), "P4");
        assert_eq!(ResourceId::from(0).to_string(), "R0");
    }

    #[test]
    fn test_serde_transparent() {
        let id: ProcessId = serde_json::from_str("7").unwrap();
        assert_eq!(id.get(), 7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
