/*

Pascal strings
==============

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use std::fmt;

use tracing::debug;

use crate::common::*;
use crate::encodings::LegacyEncoding;
use crate::resolver::{LegacyEncodingResolver, StandardResolver};

/** The largest payload a single length byte can describe */
const MAX_PAYLOAD: usize = u8::MAX as usize;

const fn payload_capacity(size: usize, reserved: usize) -> usize {
    let capacity = size - reserved;
    if capacity > MAX_PAYLOAD {MAX_PAYLOAD} else {capacity}
}

/** Decode a Pascal string held in `buf`.
    Byte 0 is the declared length, which must not exceed `maximum_length`. Only the payload bytes are inspected.
    An empty `buf` has no length byte and is an error. Otherwise panics if `maximum_length` would reach past the end of `buf`.
*/
pub fn decode_with<R>(resolver: &R, buf: &[u8], encoding: LegacyEncoding, maximum_length: u8) -> DecodeResult<String>
where R: LegacyEncodingResolver + ?Sized {
    if buf.is_empty() {
        return Err(DecodeError::MissingLengthByte);
    }
    assert!((maximum_length as usize) < buf.len(), "maximum length {maximum_length} does not fit in a {} byte buffer", buf.len());
    let length = buf[0];
    if length > maximum_length {
        debug!(length, maximum = maximum_length, "pascal string length byte exceeds capacity");
        return Err(DecodeError::LengthExceedsCapacity {
            length,
            maximum: maximum_length,
        });
    }
    resolver.decode_bytes(&buf[1..=length as usize], encoding)
        .map_err(|err| {
            debug!(%encoding, length, "pascal string payload could not be decoded");
            err.into()
        })
}

/** Encode `value` as a Pascal string into `buf`, which is zero filled first.
    Fails rather than truncating if the encoded string is longer than `capacity`. Returns the length written.
    Panics if `capacity` would reach past the end of `buf` or can't be described by a length byte.
*/
pub fn encode_with<R>(resolver: &R, value: &str, encoding: LegacyEncoding, buf: &mut [u8], capacity: usize) -> EncodeResult<u8>
where R: LegacyEncodingResolver + ?Sized {
    assert!(capacity < buf.len() && capacity <= MAX_PAYLOAD, "capacity {capacity} does not fit in a {} byte buffer", buf.len());
    let bytes = resolver.encode_string(value, encoding)?;
    if bytes.len() > capacity {
        debug!(%encoding, length = bytes.len(), capacity, "string too long for pascal string");
        return Err(EncodeError::TooLong {
            length: bytes.len(),
            capacity,
        });
    }
    buf.fill(0);
    buf[0] = bytes.len() as u8;
    buf[1..=bytes.len()].copy_from_slice(&bytes);
    Ok(bytes.len() as u8)
}

/** Decode a fixed size buffer with the standard resolver */
pub fn decode<const N: usize>(buffer: &[u8; N], encoding: LegacyEncoding, maximum_length: u8) -> DecodeResult<String> {
    decode_with(&StandardResolver, buffer, encoding, maximum_length)
}

/** Encode into a fixed size buffer with the standard resolver */
pub fn encode<const N: usize>(value: &str, encoding: LegacyEncoding, capacity: usize) -> EncodeResult<[u8; N]> {
    let mut buffer = [0; N];
    encode_with(&StandardResolver, value, encoding, &mut buffer, capacity)?;
    Ok(buffer)
}

/** Decode a Pascal string through a bare pointer (`ConstStringPtr`), whose capacity is only known from the slice.
    At most 256 bytes are considered.
*/
pub fn decode_slice(bytes: &[u8], encoding: LegacyEncoding) -> DecodeResult<String> {
    let maximum_length = bytes.len().saturating_sub(1).min(MAX_PAYLOAD) as u8;
    decode_with(&StandardResolver, bytes, encoding, maximum_length)
}

/** Shared behaviour of the fixed size Pascal string layouts */
pub trait PascalBuffer: Sized {
    /** How many payload bytes fit */
    const CAPACITY: usize;

    fn zeroed() -> Self;
    fn bytes(&self) -> &[u8];
    fn bytes_mut(&mut self) -> &mut [u8];

    fn declared_len(&self) -> u8 {
        self.bytes()[0]
    }

    /** The payload bytes, if the length byte is valid */
    fn payload(&self) -> Option<&[u8]> {
        let length = self.declared_len() as usize;
        if length > Self::CAPACITY {
            return None;
        }
        Some(&self.bytes()[1..=length])
    }

    fn decode(&self, encoding: LegacyEncoding) -> DecodeResult<String> {
        self.decode_using(&StandardResolver, encoding, Self::CAPACITY as u8)
    }

    /** Decode, with a tighter limit on the length than the buffer itself imposes */
    fn decode_with_maximum(&self, encoding: LegacyEncoding, maximum_length: u8) -> DecodeResult<String> {
        self.decode_using(&StandardResolver, encoding, maximum_length)
    }

    fn decode_using<R>(&self, resolver: &R, encoding: LegacyEncoding, maximum_length: u8) -> DecodeResult<String>
    where R: LegacyEncodingResolver + ?Sized {
        assert!(maximum_length as usize <= Self::CAPACITY, "maximum length {maximum_length} exceeds capacity {}", Self::CAPACITY);
        decode_with(resolver, self.bytes(), encoding, maximum_length)
    }

    fn encode(value: &str, encoding: LegacyEncoding) -> EncodeResult<Self> {
        Self::encode_using(&StandardResolver, value, encoding)
    }

    fn encode_using<R>(resolver: &R, value: &str, encoding: LegacyEncoding) -> EncodeResult<Self>
    where R: LegacyEncodingResolver + ?Sized {
        let mut result = Self::zeroed();
        encode_with(resolver, value, encoding, result.bytes_mut(), Self::CAPACITY)?;
        Ok(result)
    }
}

/** A Pascal string in a buffer of `N` bytes, holding up to `N - 1` payload bytes (never more than 255) */
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct PascalString<const N: usize>([u8; N]);

/** A Pascal string whose final byte is reserved, as used in network records. It holds up to `N - 2` payload bytes. */
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct PascalField<const N: usize>([u8; N]);

macro_rules! pascal_buffer_impl {
    ($name: ident, $reserved: expr) => {
        impl<const N: usize> $name<N> {
            pub fn from_bytes(bytes: [u8; N]) -> Self {
                $name(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; N] {
                &self.0
            }

            pub fn into_bytes(self) -> [u8; N] {
                self.0
            }
        }

        impl<const N: usize> PascalBuffer for $name<N> {
            const CAPACITY: usize = payload_capacity(N, $reserved);

            fn zeroed() -> Self {
                $name([0; N])
            }

            fn bytes(&self) -> &[u8] {
                &self.0
            }

            fn bytes_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }
        }

        impl<const N: usize> Default for $name<N> {
            fn default() -> Self {
                Self::zeroed()
            }
        }

        impl<const N: usize> From<[u8; N]> for $name<N> {
            fn from(bytes: [u8; N]) -> Self {
                $name(bytes)
            }
        }

        impl<const N: usize> fmt::Debug for $name<N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("len", &self.declared_len())
                    .field("payload", &self.payload())
                    .finish()
            }
        }
    };
}

pascal_buffer_impl!(PascalString, 1);
pascal_buffer_impl!(PascalField, 2);

pub type Str15 = PascalString<16>;
pub type Str27 = PascalString<28>;
pub type Str31 = PascalString<32>;
pub type Str32 = PascalString<33>;
pub type Str63 = PascalString<64>;
pub type Str255 = PascalString<256>;
pub type Str32Field = PascalField<34>;
pub type StrFileName = Str63;

#[cfg(test)]
mod tests {
    use super::*;
    use LegacyEncoding::*;

    fn str15(bytes: &[u8]) -> Str15 {
        let mut buf = [0; 16];
        buf[..bytes.len()].copy_from_slice(bytes);
        Str15::from_bytes(buf)
    }

    #[test]
    fn capacities() {
        assert_eq!(Str15::CAPACITY, 15);
        assert_eq!(Str27::CAPACITY, 27);
        assert_eq!(Str31::CAPACITY, 31);
        assert_eq!(Str32::CAPACITY, 32);
        assert_eq!(Str63::CAPACITY, 63);
        assert_eq!(Str255::CAPACITY, 255);
        assert_eq!(Str32Field::CAPACITY, 32);
        assert_eq!(PascalString::<300>::CAPACITY, 255);
    }

    #[test]
    fn decode_short_buffer() {
        assert_eq!(decode(&[3, 0x41, 0x42, 0x43, 0x00], MacRoman, 4).unwrap(), "ABC");
        assert_eq!(
            decode(&[5, 0x41, 0x42, 0x43, 0x44], MacRoman, 4),
            Err(DecodeError::LengthExceedsCapacity {length: 5, maximum: 4})
        );
    }

    #[test]
    fn length_byte_limit() {
        assert_eq!(str15(&[15]).decode(MacRoman).unwrap().len(), 15);
        assert_eq!(str15(&[16, b'a']).decode(MacRoman), Err(DecodeError::LengthExceedsCapacity {length: 16, maximum: 15}));
        assert_eq!(str15(&[255, b'a']).decode(MacRoman), Err(DecodeError::LengthExceedsCapacity {length: 255, maximum: 15}));
        assert_eq!(str15(&[16]).payload(), None);
    }

    #[test]
    fn tighter_maximum() {
        let pstr = str15(&[5, b'h', b'e', b'l', b'l', b'o']);
        assert_eq!(pstr.decode_with_maximum(MacRoman, 5).unwrap(), "hello");
        assert_eq!(pstr.decode_with_maximum(MacRoman, 4), Err(DecodeError::LengthExceedsCapacity {length: 5, maximum: 4}));
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn maximum_above_capacity_panics() {
        let _ = str15(&[0]).decode_with_maximum(MacRoman, 16);
    }

    #[test]
    fn bytes_after_payload_are_ignored() {
        let pstr = str15(&[2, b'H', b'i', 0xFF, 0x82, 0x82]);
        assert_eq!(pstr.decode(MacJapanese).unwrap(), "Hi");
    }

    #[test]
    fn empty() {
        assert_eq!(Str255::default().decode(MacRoman).unwrap(), "");
        assert_eq!(Str255::default().decode(MacJapanese).unwrap(), "");
        let encoded = Str31::encode("", MacRoman).unwrap();
        assert_eq!(encoded.as_bytes(), &[0; 32]);
    }

    #[test]
    fn invalid_payload() {
        assert_eq!(str15(&[1, 0x82]).decode(MacJapanese), Err(DecodeError::InvalidEncoding(MacJapanese)));
        assert_eq!(str15(&[1, b'a']).decode(MacArabic), Err(DecodeError::NoConverter(MacArabic)));
    }

    #[test]
    fn encode_layout() {
        let pstr = Str15::encode("Hi", MacRoman).unwrap();
        let mut expected = [0; 16];
        expected[..3].copy_from_slice(&[2, 72, 105]);
        assert_eq!(pstr.into_bytes(), expected);
        assert_eq!(pstr.declared_len(), 2);
        assert_eq!(pstr.payload(), Some(&b"Hi"[..]));
    }

    #[test]
    fn encode_overwrites_garbage() {
        let mut buf = [0xAA; 8];
        assert_eq!(encode_with(&StandardResolver, "ab", MacRoman, &mut buf, 7), Ok(2));
        assert_eq!(buf, [2, b'a', b'b', 0, 0, 0, 0, 0]);
    }

    #[test]
    fn encode_too_long() {
        assert_eq!(Str15::encode("0123456789abcdefg", MacRoman), Err(EncodeError::TooLong {length: 17, capacity: 15}));
        // Two bytes per character
        assert_eq!(Str15::encode("日本語日本語日本", MacJapanese), Err(EncodeError::TooLong {length: 16, capacity: 15}));
        assert!(Str15::encode("0123456789abcde", MacRoman).is_ok());
    }

    #[test]
    fn encode_unrepresentable() {
        assert_eq!(Str255::encode("☃", MacRoman), Err(EncodeError::UnrepresentableCharacters(MacRoman)));
        assert_eq!(Str255::encode("a", MacDingbats), Err(EncodeError::NoConverter(MacDingbats)));
    }

    #[test]
    fn round_trip_every_length() {
        for length in 0..=Str255::CAPACITY {
            let value: String = "é".repeat(length);
            let pstr = Str255::encode(&value, MacRoman).unwrap();
            assert_eq!(pstr.declared_len() as usize, length);
            assert_eq!(pstr.decode(MacRoman).unwrap(), value);
        }
        for length in 0..=Str32Field::CAPACITY {
            let value: String = "Ж".repeat(length);
            let field = Str32Field::encode(&value, MacCyrillic).unwrap();
            assert_eq!(field.decode(MacCyrillic).unwrap(), value);
        }
    }

    #[test]
    fn field_reserves_last_byte() {
        let value = "a".repeat(32);
        let field = Str32Field::encode(&value, MacRoman).unwrap();
        assert_eq!(field.as_bytes()[33], 0);
        assert_eq!(field.decode(MacRoman).unwrap(), value);
        assert_eq!(Str32Field::encode(&"a".repeat(33), MacRoman), Err(EncodeError::TooLong {length: 33, capacity: 32}));

        // Garbage in the reserved byte is ignored, and a length reaching it is rejected
        let mut bytes = [0; 34];
        bytes[0] = 1;
        bytes[1] = b'x';
        bytes[33] = 0xFF;
        assert_eq!(Str32Field::from_bytes(bytes).decode(MacRoman).unwrap(), "x");
        bytes[0] = 33;
        assert_eq!(Str32Field::from_bytes(bytes).decode(MacRoman), Err(DecodeError::LengthExceedsCapacity {length: 33, maximum: 32}));
    }

    #[test]
    fn fixed_buffer_functions() {
        let buf: [u8; 5] = encode("ABC", MacRoman, 4).unwrap();
        assert_eq!(buf, [3, 0x41, 0x42, 0x43, 0x00]);
        assert_eq!(decode(&buf, MacRoman, 4).unwrap(), "ABC");
        assert_eq!(encode::<5>("ABCDE", MacRoman, 4), Err(EncodeError::TooLong {length: 5, capacity: 4}));
        assert_eq!(decode::<0>(&[], MacRoman, 0), Err(DecodeError::MissingLengthByte));
        assert_eq!(decode_with(&StandardResolver, &[], MacRoman, 10), Err(DecodeError::MissingLengthByte));
    }

    #[test]
    fn slices() {
        assert_eq!(decode_slice(&[2, b'H', b'i'], MacRoman).unwrap(), "Hi");
        assert_eq!(decode_slice(&[3, b'H', b'i'], MacRoman), Err(DecodeError::LengthExceedsCapacity {length: 3, maximum: 2}));
        assert_eq!(decode_slice(&[], MacRoman), Err(DecodeError::MissingLengthByte));
        let mut long = vec![0; 400];
        long[0] = 255;
        assert_eq!(decode_slice(&long, MacRoman).unwrap().len(), 255);
    }

    #[test]
    fn debug_format() {
        let pstr = str15(&[2, b'H', b'i']);
        assert_eq!(format!("{pstr:?}"), "PascalString { len: 2, payload: Some([72, 105]) }");
    }
}
