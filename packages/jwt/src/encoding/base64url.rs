//! Base64url (RFC 4648 §5, no padding) and JSON segment codec.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::Value;

use crate::claims::ClaimMap;
use crate::error::{JwtError, JwtResult};

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding (RFC 7515)
#[inline]
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Serialize a claim map to compact JSON and base64url it.
///
/// Keys are written in insertion order.
pub fn encode_claims(claims: &ClaimMap) -> JwtResult<String> {
    let json = serde_json::to_vec(claims).map_err(|e| JwtError::serialization(&e.to_string()))?;
    Ok(encode(&json))
}

/// Decode a base64url segment into a claim map.
///
/// # Errors
/// `JwtError::Decode` when the segment is not base64url, not JSON, or the
/// JSON is not an object.
pub fn decode_claims(segment: &str) -> JwtResult<ClaimMap> {
    let bytes = decode(segment).map_err(|e| JwtError::decode(&format!("invalid base64url: {e}")))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| JwtError::decode(&format!("invalid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(JwtError::decode(&format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_strips_padding_and_uses_url_alphabet() {
        // 0xfb 0xff encodes to "+/8=" in standard base64
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(decode("-_8").expect("valid base64url"), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_encode_claims_keeps_insertion_order() {
        let mut claims = ClaimMap::new();
        claims.insert("z".to_string(), json!(1));
        claims.insert("a".to_string(), json!(2));
        let segment = encode_claims(&claims).expect("encodable");
        let raw = decode(&segment).expect("decodable");
        assert_eq!(raw, br#"{"z":1,"a":2}"#.to_vec());
    }

    #[test]
    fn test_decode_claims_rejects_bad_input() {
        assert!(matches!(decode_claims("***"), Err(JwtError::Decode(_))));
        assert!(matches!(decode_claims(&encode(b"{not json")), Err(JwtError::Decode(_))));
        assert!(matches!(decode_claims(&encode(b"[1,2]")), Err(JwtError::Decode(_))));
    }
}
