//! Log-safe rendering of secrets
//!
//! The Supabase anon key and the staff password must never reach the logs or
//! `config show` output in full.

use std::fmt;

/// Shows the first 8 characters of a key followed by `***`
#[derive(Clone, Debug)]
pub struct SensitiveKey<'a> {
    inner: &'a str,
}

impl<'a> SensitiveKey<'a> {
    /// # Example
    /// ```
    /// use starterkart::logging::SensitiveKey;
    ///
    /// let key = "eyJhbGciOiJIUzI1NiJ9.payload";
    /// assert_eq!(SensitiveKey::new(key).to_string(), "eyJhbGci***");
    /// ```
    pub fn new(key: &'a str) -> Self {
        Self { inner: key }
    }
}

impl<'a> fmt::Display for SensitiveKey<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible_len = 8;
        match self.inner.get(..visible_len) {
            Some(prefix) if self.inner.len() > visible_len => write!(f, "{}***", prefix),
            _ => write!(f, "***"),
        }
    }
}

/// Masked value for display: the [`SensitiveKey`] prefix, or `None` when unset
pub fn mask_secret(value: Option<&str>) -> Option<String> {
    value.map(|v| SensitiveKey::new(v).to_string())
}
