//! Channel credential handling.
//!
//! Channel secrets and access tokens are held in [`SecretString`], which
//! zeroes its buffer on drop and never prints the value through `Debug` or
//! `Display`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of trailing characters shown by [`SecretString::masked`].
const MASK_VISIBLE_TAIL: usize = 4;

/// A credential string that is zeroed on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Wrap a credential.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Expose the raw credential, e.g. for an `Authorization` header.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// True when no credential was provided.
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }

    /// Credential length in bytes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Masked form for display in `config show`: only the last few
    /// characters survive.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.inner.chars().collect();
        if chars.len() <= MASK_VISIBLE_TAIL * 2 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - MASK_VISIBLE_TAIL..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - MASK_VISIBLE_TAIL), tail)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
    }
}

impl Eq for SecretString {}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Config files store the real value.
        self.inner.serialize(serializer)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
