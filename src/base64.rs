//! `!!binary` payload text.

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};

use crate::error::Error;

/// Decode a YAML !!binary scalar string (may contain newlines or spaces).
pub(crate) fn decode_base64_yaml(s: &str) -> Result<Vec<u8>, Error> {
    // YAML allows ASCII whitespace inside the base64 text.
    let cleaned: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    B64.decode(&cleaned)
        .map_err(|err| Error::msg(format!("invalid !!binary base64: {err}")))
}

/// Base64 text of `bytes`, broken into lines of at most `line_width`
/// characters (a width of 0 keeps a single line).
pub(crate) fn encode_base64_yaml(bytes: &[u8], line_width: usize) -> Vec<String> {
    let mut text = String::with_capacity(bytes.len().div_ceil(3) * 4);
    B64.encode_string(bytes, &mut text);
    if line_width == 0 || text.len() <= line_width {
        return vec![text];
    }
    // Base64 text is ASCII, so byte chunks are character chunks.
    text.as_bytes()
        .chunks(line_width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_and_wraps() {
        assert_eq!(encode_base64_yaml(b"Hello!", 80), vec!["SGVsbG8h".to_owned()]);
        assert_eq!(
            encode_base64_yaml(b"Hello!", 3),
            vec!["SGV".to_owned(), "sbG".to_owned(), "8h".to_owned()]
        );
        assert_eq!(encode_base64_yaml(b"", 10), vec![String::new()]);
    }

    #[test]
    fn decodes_valid_base64() {
        assert_eq!(decode_base64_yaml("AQID").unwrap(), vec![1, 2, 3]);

        let with_whitespace = "SG Vs\nbG8h";
        assert_eq!(
            decode_base64_yaml(with_whitespace).unwrap(),
            b"Hello!".to_vec()
        );
    }

    #[test]
    fn rejects_invalid_base64_inputs() {
        // Length not divisible by 4
        assert!(decode_base64_yaml("AQI").is_err());

        // Character outside the base64 alphabet
        assert!(decode_base64_yaml("AQ?=").is_err());

        // Invalid padding bits for a single-byte output
        assert!(decode_base64_yaml("AB==").is_err());

        // Invalid padding bits for a two-byte output
        assert!(decode_base64_yaml("AAB=").is_err());

        // Padding is only allowed in the final chunk
        assert!(decode_base64_yaml("TQ==TQ==").is_err());

        // Too much padding in a chunk
        assert!(decode_base64_yaml("A===").is_err());
    }
}
