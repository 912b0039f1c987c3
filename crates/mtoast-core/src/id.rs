#![forbid(unsafe_code)]

//! Toast identifiers.
//!
//! Ids look like `toast-<epoch-ms>-<7 base36 chars>`. The timestamp makes
//! them sortable by creation time; the suffix comes from a xorshift64
//! generator seeded from the clock and a process-wide counter, so two ids
//! minted in the same millisecond still differ.
//!
//! The id doubles as the root element's `id` attribute, so it must stay a
//! valid HTML id: ASCII alphanumerics and `-` only.

use core::fmt;
use core::time::Duration;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

const PREFIX: &str = "toast-";
const SUFFIX_LEN: usize = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of one toast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    /// Mint a fresh id from the wall clock.
    #[must_use]
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, saturating_millis);
        Self::generate_at(millis)
    }

    /// Mint a fresh id stamped with `millis` since the Unix epoch.
    #[must_use]
    pub fn generate_at(millis: u64) -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let seed = millis.rotate_left(17) ^ seq.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::from_parts(millis, seed)
    }

    /// Deterministic id from a timestamp and a generator seed.
    #[must_use]
    pub fn from_parts(millis: u64, seed: u64) -> Self {
        // Avoid the all-zero xorshift state.
        let mut state = seed | 1;
        let mut id = String::with_capacity(PREFIX.len() + 21 + SUFFIX_LEN);
        id.push_str(PREFIX);
        id.push_str(&millis.to_string());
        id.push('-');
        for _ in 0..SUFFIX_LEN {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            id.push(char::from(BASE36[(state % 36) as usize]));
        }
        Self(id)
    }

    /// Wrap an existing id string.
    ///
    /// Returns `None` unless the string has the `toast-<digits>-<base36>` shape.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix(PREFIX)?;
        let (stamp, suffix) = rest.split_once('-')?;
        let stamp_ok = !stamp.is_empty() && stamp.bytes().all(|b| b.is_ascii_digit());
        let suffix_ok = suffix.len() == SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase());
        (stamp_ok && suffix_ok).then(|| Self(raw.to_string()))
    }

    /// The id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation timestamp encoded in the id (ms since the Unix epoch).
    #[must_use]
    pub fn timestamp(&self) -> Option<u64> {
        self.0
            .strip_prefix(PREFIX)?
            .split_once('-')
            .and_then(|(stamp, _)| stamp.parse().ok())
    }
}

/// Whole milliseconds in `elapsed`, clamped to `u64`.
fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ToastId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ToastId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ToastId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn generated_id_has_expected_shape() {
        let id = ToastId::generate();
        assert!(id.as_str().starts_with("toast-"));
        assert_eq!(ToastId::parse(id.as_str()), Some(id.clone()));
        assert!(id.timestamp().is_some());
    }

    #[test]
    fn ids_minted_in_one_millisecond_differ() {
        let ids: HashSet<_> = (0..1000).map(|_| ToastId::generate_at(1_700_000_000_000)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn clock_millis_saturate_instead_of_wrapping() {
        assert_eq!(saturating_millis(Duration::from_millis(1_700_000_000_123)), 1_700_000_000_123);
        assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn parse_rejects_foreign_strings() {
        assert_eq!(ToastId::parse("toast-12-abc"), None);
        assert_eq!(ToastId::parse("toast-x1-abcdefg"), None);
        assert_eq!(ToastId::parse("note-1-abcdefg"), None);
        assert_eq!(ToastId::parse("toast-1-ABCDEFG"), None);
    }

    proptest! {
        #[test]
        fn from_parts_is_well_formed(millis in 0u64..=u64::MAX / 2, seed in any::<u64>()) {
            let id = ToastId::from_parts(millis, seed);
            prop_assert_eq!(id.timestamp(), Some(millis));
            prop_assert!(ToastId::parse(id.as_str()).is_some());
            prop_assert!(id.as_str().bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'));
        }
    }
}
