/*

Four-character codes
====================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder};
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

use crate::common::FourCharCodeError;

/** Bytes below this are control characters, and make a code unprintable */
const FIRST_PRINTABLE: u8 = 0x20;
const PADDING: u8 = b' ';

/** A four-character code (`OSType`): four 8-bit characters packed into a u32, first character in the most significant byte */
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FourCharCode(pub u32);

impl FourCharCode {
    pub const fn new(code: u32) -> Self {
        FourCharCode(code)
    }

    /** Pack four Mac Roman bytes, as in `from_chars(b'T', b'E', b'X', b'T')` */
    pub const fn from_chars(c1: u8, c2: u8, c3: u8, c4: u8) -> Self {
        FourCharCode(((c1 as u32) << 24) | ((c2 as u32) << 16) | ((c3 as u32) << 8) | (c4 as u32))
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        FourCharCode(BigEndian::read_u32(&bytes))
    }

    /** The final byte of a NUL terminated code is ignored */
    pub fn from_nul_terminated(bytes: [u8; 5]) -> Self {
        FourCharCode(BigEndian::read_u32(&bytes[..4]))
    }

    pub fn to_bytes(self) -> [u8; 4] {
        let mut bytes = [0; 4];
        BigEndian::write_u32(&mut bytes, self.0);
        bytes
    }

    pub fn to_nul_terminated(self) -> [u8; 5] {
        let mut bytes = [0; 5];
        BigEndian::write_u32(&mut bytes[..4], self.0);
        bytes
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_printable(self) -> bool {
        self.to_bytes().iter().all(|&byte| byte >= FIRST_PRINTABLE)
    }

    /** The four characters of this code, decoded as Mac Roman.
        If any byte is a control character there is no printable form: then `0x%08X` is returned if `use_hex_if_invalid` is set, and otherwise `None`.
    */
    pub fn string_value(self, use_hex_if_invalid: bool) -> Option<String> {
        match self.text() {
            Some(text) => Some(text),
            None if use_hex_if_invalid => Some(self.hex()),
            None => None,
        }
    }

    fn text(self) -> Option<String> {
        if !self.is_printable() {
            return None;
        }
        encoding_rs::MACINTOSH
            .decode_without_bom_handling_and_without_replacement(&self.to_bytes())
            .map(|text| text.into_owned())
    }

    fn hex(self) -> String {
        format!("0x{:08X}", self.0)
    }

    /** Parse a code from a string.
        With `detect_hex`, strings longer than four characters are first tried as a hexadecimal number (`0x` prefix optional), truncated to 32 bits.
        Otherwise the string is encoded as Mac Roman and at most its first four bytes are packed.
        Fewer than four bytes leave the high-order bytes zero, so `"AB"` is `0x00004142`, not `'AB  '`.
    */
    pub fn parse(value: &str, detect_hex: bool) -> Result<Self, FourCharCodeError> {
        if detect_hex && value.chars().count() > 4 {
            if let Ok(code) = FourCharCode::from_hex(value) {
                return Ok(code);
            }
        }
        let bytes = mac_roman_bytes(value)?;
        Ok(FourCharCode(bytes.iter().take(4).fold(0, |code, &byte| (code << 8) | byte as u32)))
    }

    /** Like `parse`, but an unrepresentable string gives the zero code */
    pub fn from_string_lossy(value: &str, detect_hex: bool) -> Self {
        FourCharCode::parse(value, detect_hex).unwrap_or_default()
    }

    /** Parse a hexadecimal code such as `0x41424344`. Values wider than 32 bits are truncated. */
    pub fn from_hex(value: &str) -> Result<Self, FourCharCodeError> {
        let value = value.trim();
        let digits = value.strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        // from_str_radix would accept a sign
        if digits.starts_with(['+', '-']) {
            return Err(FourCharCodeError::InvalidHex);
        }
        match u64::from_str_radix(digits, 16) {
            // u64::MAX is what a saturating scanner reports on overflow
            Ok(code) if code != u64::MAX => Ok(FourCharCode(code as u32)),
            _ => Err(FourCharCodeError::InvalidHex),
        }
    }

    /** Build a code from a string truncated or padded with spaces to exactly four Mac Roman bytes, as in `'ab  '` */
    pub fn padded(value: &str) -> Result<Self, FourCharCodeError> {
        let mut bytes = [PADDING; 4];
        for (target, byte) in bytes.iter_mut().zip(mac_roman_bytes(value)?) {
            *target = byte;
        }
        Ok(FourCharCode::from_bytes(bytes))
    }

    /** Each printable ASCII byte as itself, and everything else (including backslashes) as `\xNN` */
    pub fn escaped(self) -> String {
        let mut result = String::with_capacity(16);
        for byte in self.to_bytes() {
            if (byte == b' ' || byte.is_ascii_graphic()) && byte != b'\\' {
                result.push(byte as char);
            }
            else {
                result.push_str(&format!("\\x{byte:02x}"));
            }
        }
        result
    }
}

fn mac_roman_bytes(value: &str) -> Result<Vec<u8>, FourCharCodeError> {
    let value: String = value.nfc().collect();
    let (bytes, _, had_unmappable) = encoding_rs::MACINTOSH.encode(&value);
    if had_unmappable {
        return Err(FourCharCodeError::UnrepresentableCharacters);
    }
    Ok(bytes.into_owned())
}

/** `'ABCD'`, or `0x00424344` if not printable */
impl fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "'{text}'"),
            None => f.write_str(&self.hex()),
        }
    }
}

impl fmt::Debug for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCharCode('{}')", self.escaped())
    }
}

impl FromStr for FourCharCode {
    type Err = FourCharCodeError;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FourCharCode::parse(value, true)
    }
}

impl From<u32> for FourCharCode {
    fn from(code: u32) -> Self {
        FourCharCode(code)
    }
}

impl From<FourCharCode> for u32 {
    fn from(code: FourCharCode) -> Self {
        code.0
    }
}

impl From<[u8; 4]> for FourCharCode {
    fn from(bytes: [u8; 4]) -> Self {
        FourCharCode::from_bytes(bytes)
    }
}

impl From<FourCharCode> for [u8; 4] {
    fn from(code: FourCharCode) -> Self {
        code.to_bytes()
    }
}

impl From<four_cc::FourCC> for FourCharCode {
    fn from(code: four_cc::FourCC) -> Self {
        FourCharCode::from_bytes(code.0)
    }
}

impl From<FourCharCode> for four_cc::FourCC {
    fn from(code: FourCharCode) -> Self {
        four_cc::FourCC(code.to_bytes())
    }
}

impl Serialize for FourCharCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.text().unwrap_or_else(|| self.hex());
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for FourCharCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FourCharCodeVisitor;

        impl Visitor<'_> for FourCharCodeVisitor {
            type Value = FourCharCode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a four-character code string or a 32 bit integer")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FourCharCode, E> {
                FourCharCode::parse(value, true).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<FourCharCode, E> {
                u32::try_from(value)
                    .map(FourCharCode)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }
        }

        deserializer.deserialize_any(FourCharCodeVisitor)
    }
}

/** Types whose raw value is a four-character code, such as file or format type enums */
pub trait FourCharCodeConvertible {
    fn four_char_code(&self) -> FourCharCode;

    /** The code as text, or four spaces if it isn't printable */
    fn type_string(&self) -> String {
        self.four_char_code().string_value(false).unwrap_or_else(|| "    ".to_string())
    }
}

impl FourCharCodeConvertible for FourCharCode {
    fn four_char_code(&self) -> FourCharCode {
        *self
    }
}
