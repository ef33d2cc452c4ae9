//! Typed identifiers
//!
//! Each entity gets its own UUID newtype so a pit record can never be looked
//! up with a claim id. Ids are v7 UUIDs and therefore sort by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {kind} id: {input:?}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub input: String,
}

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Display prefix, e.g. `CLM-<uuid>`
            pub const PREFIX: &'static str = $prefix;

            /// Creates a fresh time-ordered id
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        /// Accepts both `PREFIX-<uuid>` and a bare UUID
        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(s);
                Uuid::parse_str(raw).map(Self).map_err(|_| IdParseError {
                    kind: stringify!($name),
                    input: s.to_string(),
                })
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

typed_id! {
    /// An IFR or CR claim; both kinds share one id space
    ClaimId => "CLM"
}

typed_id! {
    /// A pit and plantation record
    PitRecordId => "PIT"
}

typed_id! {
    /// An activity ledger entry
    ActivityId => "ACT"
}
