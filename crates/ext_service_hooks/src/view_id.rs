//! External view identifiers.
//!
//! Views are addressed by debugging clients as `_flutterView/0x<hex>`, where
//! the hex digits are the runtime's numeric view handle in lowercase.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::HooksError;

/// Prefix shared by every encoded view identifier
pub const VIEW_ID_PREFIX: &str = "_flutterView/";

/// Numeric handle of a view; zero marks an uninitialised slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl ViewId {
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Encoded form, e.g. `_flutterView/0x2a`
    pub fn encode(self) -> String {
        self.to_string()
    }

    /// Parse an encoded identifier back into a handle.
    ///
    /// The `0x` marker after the prefix is optional; the zero handle is
    /// rejected since it can never name a live view.
    pub fn decode(encoded: &str) -> Result<Self, HooksError> {
        let rest = encoded.strip_prefix(VIEW_ID_PREFIX).ok_or_else(|| {
            HooksError::invalid_params(format!(
                "view id '{encoded}' does not start with '{VIEW_ID_PREFIX}'"
            ))
        })?;
        let hex = rest
            .strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .unwrap_or(rest);

        // from_str_radix alone would accept a leading sign
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HooksError::invalid_params(format!(
                "view id '{encoded}' is not a hexadecimal handle"
            )));
        }
        let handle = u64::from_str_radix(hex, 16).map_err(|e| {
            HooksError::invalid_params(format!("view id '{encoded}' is out of range: {e}"))
        })?;

        let id = ViewId(handle);
        if !id.is_valid() {
            return Err(HooksError::invalid_params(format!(
                "view id '{encoded}' names the null view"
            )));
        }
        Ok(id)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{VIEW_ID_PREFIX}0x{:x}", self.0)
    }
}

impl FromStr for ViewId {
    type Err = HooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<u64> for ViewId {
    fn from(handle: u64) -> Self {
        ViewId(handle)
    }
}

impl Serialize for ViewId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lowercase_hex() {
        assert_eq!(ViewId(0x2a).encode(), "_flutterView/0x2a");
        assert_eq!(ViewId(0xDEADBEEF).encode(), "_flutterView/0xdeadbeef");
        assert_eq!(ViewId(1).encode(), "_flutterView/0x1");
    }

    #[test]
    fn test_round_trip() {
        for handle in [1u64, 2, 0xff, 0x7f00_1234_abcd, u64::MAX] {
            let id = ViewId(handle);
            assert_eq!(ViewId::decode(&id.encode()).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_accepts_marker_variants() {
        assert_eq!(ViewId::decode("_flutterView/0X1F").unwrap(), ViewId(0x1f));
        assert_eq!(ViewId::decode("_flutterView/1f").unwrap(), ViewId(0x1f));
        assert_eq!("_flutterView/0x10".parse::<ViewId>().unwrap(), ViewId(16));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for bad in [
            "",
            "0x1",
            "_flutterview/0x1",
            "_flutterView/",
            "_flutterView/0x",
            "_flutterView/0xzz",
            "_flutterView/0x+1",
            "_flutterView/0x1 ",
            "_flutterView/0x10000000000000000",
        ] {
            let err = ViewId::decode(bad).unwrap_err();
            assert!(
                matches!(err, HooksError::InvalidParams(_)),
                "expected InvalidParams for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_null_view() {
        assert!(matches!(
            ViewId::decode("_flutterView/0x0"),
            Err(HooksError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_serializes_as_encoded_string() {
        let json = serde_json::to_string(&ViewId(0xab)).unwrap();
        assert_eq!(json, r#""_flutterView/0xab""#);
    }
}
