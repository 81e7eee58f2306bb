//! Addressable title references.
//!
//! FWIP cards are addressed as `/fwip/{ref}` where `ref` is the title id in
//! lowercase base 36. Watch-state toggles recover the title id from that
//! reference.

use crate::error::CoreError;
use crate::types::DbId;

const REF_RADIX: u32 = 36;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Path prefix of a FWIP card locator.
pub const LOCATOR_PREFIX: &str = "/fwip/";

/// Encode a title id as a base-36 reference.
pub fn encode_ref(id: DbId) -> String {
    if id == 0 {
        return "0".into();
    }
    let negative = id < 0;
    let mut value = id.unsigned_abs();
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % u64::from(REF_RADIX)) as usize]);
        value /= u64::from(REF_RADIX);
    }
    if negative {
        digits.push(b'-');
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Decode a base-36 reference into a title id. Only positive ids are valid.
pub fn decode_ref(reference: &str) -> Result<DbId, CoreError> {
    let invalid = || CoreError::Validation(format!("invalid title reference `{reference}`"));
    if reference.is_empty() || reference.starts_with(['+', '-']) {
        return Err(invalid());
    }
    let id = DbId::from_str_radix(&reference.to_ascii_lowercase(), REF_RADIX)
        .map_err(|_| invalid())?;
    if id <= 0 {
        return Err(invalid());
    }
    Ok(id)
}

/// The card locator for a title, e.g. `/fwip/2s`.
pub fn locator_for(id: DbId) -> String {
    format!("{LOCATOR_PREFIX}{}", encode_ref(id))
}

/// Recover the title id from a card locator or a bare reference.
///
/// Accepts `/fwip/2s`, `/fwip/2s/`, or `2s`.
pub fn title_id_from_locator(locator: &str) -> Result<DbId, CoreError> {
    let reference = locator
        .strip_prefix(LOCATOR_PREFIX)
        .unwrap_or(locator)
        .trim_end_matches('/');
    decode_ref(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode_ref(0), "0");
        assert_eq!(encode_ref(35), "z");
        assert_eq!(encode_ref(36), "10");
        assert_eq!(encode_ref(100), "2s");
        assert_eq!(encode_ref(DbId::MAX), "1y2p0ij32e8e7");
    }

    #[test]
    fn test_decode_inverts_encode() {
        for id in [1, 35, 36, 100, 123_456_789, DbId::MAX] {
            assert_eq!(decode_ref(&encode_ref(id)).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode_ref("2S").unwrap(), 100);
    }

    #[test]
    fn test_decode_rejects_garbage_and_non_positive() {
        for bad in ["", "-1", "+1", "0", "not/valid", "!!"] {
            assert!(decode_ref(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_locator_roundtrip() {
        let locator = locator_for(100);
        assert_eq!(locator, "/fwip/2s");
        assert_eq!(title_id_from_locator(&locator).unwrap(), 100);
        assert_eq!(title_id_from_locator("/fwip/2s/").unwrap(), 100);
        assert_eq!(title_id_from_locator("2s").unwrap(), 100);
    }
}
