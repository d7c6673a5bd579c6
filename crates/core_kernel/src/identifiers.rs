//! Strongly-typed identifiers for domain entities
//!
//! Claims and their children are numbered by the store rather than by random
//! UUIDs, so every identifier is a newtype over an unsigned integer. The
//! newtypes keep claim ids, document ids and lecturer references from being
//! mixed up at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $inner:ty, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Creates an identifier from its raw value
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Returns the raw value
            pub const fn value(&self) -> $inner {
                self.0
            }

            /// Returns the identifier that follows this one
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(raw.parse()?))
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

// Claim graph
define_id!(ClaimId, u64, "CLM");
define_id!(ClaimLineId, u32, "CLML");
define_id!(DocumentId, u32, "DOC");

// Foreign reference supplied by the identity provider
define_id!(LecturerId, u64, "LEC");
