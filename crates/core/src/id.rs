//! Strongly-typed record keys.
//!
//! Keys are opaque strings: the only rule enforced here is that a key supplied
//! by a caller is not blank. Keys read back from stored documents are taken
//! verbatim (see the `Deserialize` impls), since the backend is the authority
//! on what it stores.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Key of an account record (the account number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

/// Key of a customer record (the "CIF"), also stored on accounts as the owner reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerKey(String);

macro_rules! impl_key_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Parse a caller-supplied key.
            ///
            /// Surrounding whitespace is trimmed; a blank result is rejected.
            pub fn parse(raw: &str) -> DomainResult<Self> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{} must not be blank", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Wrap a key taken from a stored document without validation.
            pub fn from_stored(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

impl_key_newtype!(AccountNumber, "AccountNumber");
impl_key_newtype!(OwnerKey, "OwnerKey");
