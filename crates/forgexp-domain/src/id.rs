//! Newtype wrappers for domain identifiers.
//!
//! All identifiers are store-assigned serial integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: i32 = s.parse().map_err(|_| IdParseError::NotANumber)?;
                if raw <= 0 {
                    return Err(IdParseError::NotPositive);
                }
                Ok(Self(raw))
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Errors produced when parsing an identifier from a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("id is not a number")]
    NotANumber,
    #[error("id must be positive")]
    NotPositive,
}

serial_id!(
    /// Identifies a user account.
    UserId
);

serial_id!(
    /// Identifies a post inside a game community.
    PostId
);

serial_id!(
    /// Identifies a game community.
    CommunityId
);
