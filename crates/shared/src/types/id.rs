//! Typed IDs for persisted entities.
//!
//! Using typed IDs prevents accidentally passing a `CategoryId` where a `CompanyId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers over database serial keys.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(CompanyId, "Identifier of a reporting company.");
typed_id!(ReportPeriodId, "Identifier of a stored report period.");
typed_id!(CategoryId, "Identifier of a stored category.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
