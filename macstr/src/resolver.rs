/*

Legacy encoding resolver
========================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use crate::common::*;
use crate::encodings::{LegacyEncoding, TextEncoding};

/** The conversion service the codecs depend on.
    Implementations must be pure: the same input always gives the same output.
*/
pub trait LegacyEncodingResolver {
    /** Map a modern encoding to its closest classic counterpart */
    fn best_compatible_legacy_encoding(&self, modern: TextEncoding) -> LegacyEncoding;
    fn decode_bytes(&self, bytes: &[u8], encoding: LegacyEncoding) -> ConversionResult<String>;
    fn encode_string(&self, value: &str, encoding: LegacyEncoding) -> ConversionResult<Vec<u8>>;
}

/** The resolver backed by the static tables in `encodings` and the `encoding_rs` converters */
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardResolver;

impl LegacyEncodingResolver for StandardResolver {
    fn best_compatible_legacy_encoding(&self, modern: TextEncoding) -> LegacyEncoding {
        LegacyEncoding::most_compatible_with(modern)
    }

    fn decode_bytes(&self, bytes: &[u8], encoding: LegacyEncoding) -> ConversionResult<String> {
        let converter = encoding.text_encoding().ok_or(ConversionError::NoConverter(encoding))?;
        trace!(%encoding, len = bytes.len(), "decoding bytes");
        converter.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or(ConversionError::InvalidBytes(encoding))
    }

    fn encode_string(&self, value: &str, encoding: LegacyEncoding) -> ConversionResult<Vec<u8>> {
        let converter = encoding.text_encoding().ok_or(ConversionError::NoConverter(encoding))?;
        trace!(%encoding, len = value.len(), "encoding string");
        // Classic encodings only have precomposed characters
        let value: String = value.nfc().collect();
        let (bytes, _, had_unmappable) = converter.encoding().encode(&value);
        if had_unmappable {
            return Err(ConversionError::UnrepresentableCharacters(encoding));
        }
        Ok(bytes.into_owned())
    }
}

/** Find the classic encoding most compatible with a modern one, using the standard resolver */
pub fn resolve_compatible_legacy_encoding(modern: TextEncoding) -> LegacyEncoding {
    StandardResolver.best_compatible_legacy_encoding(modern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_roman_high_bytes() {
        let resolver = StandardResolver;
        assert_eq!(resolver.decode_bytes(&[0x8E, 0xA5], LegacyEncoding::MacRoman).unwrap(), "é•");
        assert_eq!(resolver.encode_string("é•", LegacyEncoding::MacRoman).unwrap(), vec![0x8E, 0xA5]);
    }

    #[test]
    fn decomposed_input_is_composed() {
        let bytes = StandardResolver.encode_string("e\u{301}", LegacyEncoding::MacRoman).unwrap();
        assert_eq!(bytes, vec![0x8E]);
    }

    #[test]
    fn unrepresentable_characters() {
        assert_eq!(
            StandardResolver.encode_string("日本", LegacyEncoding::MacRoman),
            Err(ConversionError::UnrepresentableCharacters(LegacyEncoding::MacRoman))
        );
    }

    #[test]
    fn invalid_bytes() {
        // A lone Shift_JIS lead byte
        assert_eq!(
            StandardResolver.decode_bytes(&[0x82], LegacyEncoding::MacJapanese),
            Err(ConversionError::InvalidBytes(LegacyEncoding::MacJapanese))
        );
    }

    #[test]
    fn japanese() {
        let bytes = StandardResolver.encode_string("日本", LegacyEncoding::MacJapanese).unwrap();
        assert_eq!(bytes, vec![0x93, 0xFA, 0x96, 0x7B]);
        assert_eq!(StandardResolver.decode_bytes(&bytes, LegacyEncoding::MacJapanese).unwrap(), "日本");
    }

    #[test]
    fn no_converter() {
        assert_eq!(
            StandardResolver.decode_bytes(b"abc", LegacyEncoding::MacArabic),
            Err(ConversionError::NoConverter(LegacyEncoding::MacArabic))
        );
        assert_eq!(
            StandardResolver.encode_string("abc", LegacyEncoding::MacSymbol),
            Err(ConversionError::NoConverter(LegacyEncoding::MacSymbol))
        );
    }

    #[test]
    fn resolves_through_table() {
        assert_eq!(resolve_compatible_legacy_encoding(encoding_rs::KOI8_U.into()), LegacyEncoding::MacUkrainian);
        assert_eq!(resolve_compatible_legacy_encoding(TextEncoding::UTF_8), LegacyEncoding::MacRoman);
    }
}
