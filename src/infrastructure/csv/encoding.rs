// ============================================================
// TEXT DECODING
// ============================================================
// Turn an uploaded byte blob into text before tokenization

use encoding_rs::{Encoding, SHIFT_JIS};

/// Decoded text plus the name of the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
    /// True when some bytes could not be mapped and were replaced
    pub lossy: bool,
}

/// Decode bytes as BOM-declared encoding, else UTF-8, else Shift_JIS.
/// Never fails; unmappable bytes become U+FFFD.
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, lossy) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return DecodedText {
            text: text.into_owned(),
            encoding: encoding.name(),
            lossy,
        };
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText {
            text: text.to_string(),
            encoding: "UTF-8",
            lossy: false,
        };
    }

    // Spreadsheet exports on Japanese Windows default to Shift_JIS
    let (text, lossy) = SHIFT_JIS.decode_without_bom_handling(bytes);
    if lossy {
        tracing::warn!("Input is neither UTF-8 nor clean Shift_JIS; some characters were replaced");
    }
    DecodedText {
        text: text.into_owned(),
        encoding: SHIFT_JIS.name(),
        lossy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let decoded = decode_text("タイトル,本文".as_bytes());
        assert_eq!(decoded.text, "タイトル,本文");
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(!decoded.lossy);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"No,Title");
        assert_eq!(decode_text(&bytes).text, "No,Title");
    }

    #[test]
    fn test_shift_jis_fallback() {
        let (encoded, _, _) = SHIFT_JIS.encode("スライド,タイトル");
        let decoded = decode_text(&encoded);
        assert_eq!(decoded.text, "スライド,タイトル");
        assert_eq!(decoded.encoding, "Shift_JIS");
    }
}
