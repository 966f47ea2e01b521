//! Entry Codec Module
//!
//! Encodes envelopes into backend-storable text and back. The pipeline is
//! serialize -> DEFLATE (zlib container) -> base64, and must stay in exactly
//! that order for interop with entries written by other implementations.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Result, StoreError};
use crate::store::Envelope;

// == Encode ==
/// Serializes, compresses, and base64-encodes an envelope.
///
/// `level` is the DEFLATE compression level (0-9). Fails with
/// [`StoreError::Serialization`] if the envelope cannot be written out.
pub fn encode_envelope(envelope: &Envelope, level: u32) -> Result<String> {
    let json =
        serde_json::to_string(envelope).map_err(|err| StoreError::Serialization(err.to_string()))?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder
        .write_all(json.as_bytes())
        .map_err(|err| StoreError::Serialization(err.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|err| StoreError::Serialization(err.to_string()))?;

    Ok(STANDARD.encode(compressed))
}

// == Decode ==
/// Reverses [`encode_envelope`].
///
/// Every failure mode, invalid base64, malformed zlib stream, unparseable
/// JSON, maps to [`StoreError::CorruptEntry`]; the caller decides whether to
/// surface or swallow it.
pub fn decode_envelope(text: &str) -> Result<Envelope> {
    let compressed = STANDARD
        .decode(text)
        .map_err(|err| StoreError::CorruptEntry(format!("invalid base64: {err}")))?;

    let mut json = String::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_string(&mut json)
        .map_err(|err| StoreError::CorruptEntry(format!("invalid zlib stream: {err}")))?;

    serde_json::from_str(&json)
        .map_err(|err| StoreError::CorruptEntry(format!("invalid envelope: {err}")))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codec_roundtrip() {
        let envelope = Envelope::new(json!({"name": "test", "count": 3}), Some(5_000));

        let encoded = encode_envelope(&envelope, 6).unwrap();
        let decoded = decode_envelope(&encoded).unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_pipeline_order() {
        // The stored text must be base64 of a zlib stream whose inflation
        // is the envelope JSON, nothing else layered in between.
        let envelope = Envelope {
            value: json!("hello"),
            expiry: None,
        };
        let encoded = encode_envelope(&envelope, 6).unwrap();

        let compressed = STANDARD.decode(&encoded).unwrap();
        let mut json = String::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_string(&mut json)
            .unwrap();

        assert_eq!(json, r#"{"value":"hello","expiry":null}"#);
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let result = decode_envelope("!!! not base64 !!!");
        assert!(matches!(result, Err(StoreError::CorruptEntry(_))));
    }

    #[test]
    fn test_decode_rejects_invalid_zlib() {
        // Valid base64, but the payload is not a zlib stream
        let garbage = STANDARD.encode(b"plain bytes");
        let result = decode_envelope(&garbage);
        assert!(matches!(result, Err(StoreError::CorruptEntry(_))));
    }

    #[test]
    fn test_decode_rejects_non_envelope_json() {
        // Valid base64 and zlib, but the JSON has no value field
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));
        encoder.write_all(br#"{"other": true}"#).unwrap();
        let compressed = encoder.finish().unwrap();

        let result = decode_envelope(&STANDARD.encode(compressed));
        assert!(matches!(result, Err(StoreError::CorruptEntry(_))));
    }

    #[test]
    fn test_encode_levels_decode_identically() {
        let envelope = Envelope::new(json!(["a", "b", "c"]), None);

        for level in [0, 1, 6, 9] {
            let encoded = encode_envelope(&envelope, level).unwrap();
            assert_eq!(decode_envelope(&encoded).unwrap(), envelope);
        }
    }
}
