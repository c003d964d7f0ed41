//! Explicit byte order of encoded sample words.
//!
//! The host byte order is never read from ambient process state inside the
//! pipeline; it is carried as a `ByteOrder` value (normally from
//! `AssemblyConfig::host_byte_order`) into every decode call.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// The byte order of the machine this crate was compiled for.
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Maps the Fissures `byte_order` boolean onto a `ByteOrder`.
    /// `false` is big endian, `true` is little endian.
    pub const fn from_fissures_flag(little_endian: bool) -> Self {
        if little_endian {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Returns `true` if words stored in `self` order must be swapped to be
    /// read on a host with `host` order.
    pub fn needs_swap(self, host: ByteOrder) -> bool {
        self != host
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        ByteOrder::native()
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Big => write!(f, "big-endian"),
            ByteOrder::Little => write!(f, "little-endian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fissures_flag_mapping() {
        assert_eq!(ByteOrder::from_fissures_flag(false), ByteOrder::Big);
        assert_eq!(ByteOrder::from_fissures_flag(true), ByteOrder::Little);
    }

    #[test]
    fn test_needs_swap() {
        assert!(ByteOrder::Big.needs_swap(ByteOrder::Little));
        assert!(ByteOrder::Little.needs_swap(ByteOrder::Big));
        assert!(!ByteOrder::native().needs_swap(ByteOrder::native()));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ByteOrder::Little).unwrap();
        assert_eq!(json, "\"little\"");
        let parsed: ByteOrder = serde_json::from_str("\"big\"").unwrap();
        assert_eq!(parsed, ByteOrder::Big);
    }
}
