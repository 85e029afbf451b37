/*

Common things
=============

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use thiserror::Error;

use crate::encodings::LegacyEncoding;

/** Failures of the byte <-> Unicode conversion service */
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum ConversionError {
    #[error("bytes are not valid {0}")]
    InvalidBytes(LegacyEncoding),
    #[error("no converter available for {0}")]
    NoConverter(LegacyEncoding),
    #[error("string contains characters that cannot be represented in {0}")]
    UnrepresentableCharacters(LegacyEncoding),
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    #[error("payload bytes are not valid {0}")]
    InvalidEncoding(LegacyEncoding),
    #[error("length byte {length} exceeds the maximum of {maximum}")]
    LengthExceedsCapacity {
        length: u8,
        maximum: u8,
    },
    #[error("buffer has no length byte")]
    MissingLengthByte,
    #[error("no converter available for {0}")]
    NoConverter(LegacyEncoding),
}

impl From<ConversionError> for DecodeError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidBytes(encoding) | ConversionError::UnrepresentableCharacters(encoding) => DecodeError::InvalidEncoding(encoding),
            ConversionError::NoConverter(encoding) => DecodeError::NoConverter(encoding),
        }
    }
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum EncodeError {
    #[error("no converter available for {0}")]
    NoConverter(LegacyEncoding),
    #[error("encoded string is {length} bytes, but only {capacity} fit")]
    TooLong {
        length: usize,
        capacity: usize,
    },
    #[error("string contains characters that cannot be represented in {0}")]
    UnrepresentableCharacters(LegacyEncoding),
}

impl From<ConversionError> for EncodeError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidBytes(encoding) | ConversionError::UnrepresentableCharacters(encoding) => EncodeError::UnrepresentableCharacters(encoding),
            ConversionError::NoConverter(encoding) => EncodeError::NoConverter(encoding),
        }
    }
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum FourCharCodeError {
    #[error("not a valid hexadecimal four-character code")]
    InvalidHex,
    #[error("string contains characters that cannot be represented in Mac Roman")]
    UnrepresentableCharacters,
}

pub type ConversionResult<T> = Result<T, ConversionError>;
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;
