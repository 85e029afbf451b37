/*

Helper functions
================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use std::ffi::{c_char, CStr};
use std::slice;

use macstr::{DecodeError, EncodeError, FourCharCodeError, LegacyEncoding};
use tracing::warn;

/** Negative return values of the C API */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub enum MacStrStatus {
    InvalidArgument = -1,
    UnknownEncoding = -2,
    BufferTooSmall = -3,
    LengthExceedsCapacity = -4,
    InvalidEncoding = -5,
    NoConverter = -6,
    TooLong = -7,
    UnrepresentableCharacters = -8,
    NotPrintable = -9,
}

pub type CResult<T> = Result<T, MacStrStatus>;

impl From<DecodeError> for MacStrStatus {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::InvalidEncoding(_) => MacStrStatus::InvalidEncoding,
            DecodeError::LengthExceedsCapacity {..} => MacStrStatus::LengthExceedsCapacity,
            DecodeError::MissingLengthByte => MacStrStatus::InvalidArgument,
            DecodeError::NoConverter(_) => MacStrStatus::NoConverter,
        }
    }
}

impl From<EncodeError> for MacStrStatus {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::NoConverter(_) => MacStrStatus::NoConverter,
            EncodeError::TooLong {..} => MacStrStatus::TooLong,
            EncodeError::UnrepresentableCharacters(_) => MacStrStatus::UnrepresentableCharacters,
        }
    }
}

impl From<FourCharCodeError> for MacStrStatus {
    fn from(err: FourCharCodeError) -> Self {
        match err {
            FourCharCodeError::InvalidHex => MacStrStatus::InvalidArgument,
            FourCharCodeError::UnrepresentableCharacters => MacStrStatus::UnrepresentableCharacters,
        }
    }
}

/** Turn a result into a C return value: a count, or a negative status */
pub fn to_c_return(result: CResult<usize>) -> i32 {
    match result {
        Ok(count) => count as i32,
        Err(status) => status as i32,
    }
}

pub fn c_buffer<'a, T>(buf: *const T, buflen: u32) -> CResult<&'a [T]> {
    if buf.is_null() {
        warn!("null buffer");
        return Err(MacStrStatus::InvalidArgument);
    }
    Ok(unsafe {slice::from_raw_parts(buf, buflen as usize)})
}

pub fn c_buffer_mut<'a, T>(buf: *mut T, buflen: u32) -> CResult<&'a mut [T]> {
    if buf.is_null() {
        warn!("null buffer");
        return Err(MacStrStatus::InvalidArgument);
    }
    Ok(unsafe {slice::from_raw_parts_mut(buf, buflen as usize)})
}

pub fn c_str<'a>(text: *const c_char) -> CResult<&'a str> {
    if text.is_null() {
        warn!("null string");
        return Err(MacStrStatus::InvalidArgument);
    }
    unsafe {CStr::from_ptr(text)}.to_str().map_err(|_| {
        warn!("string is not UTF-8");
        MacStrStatus::InvalidArgument
    })
}

pub fn legacy_encoding(raw: u32) -> CResult<LegacyEncoding> {
    LegacyEncoding::from_raw(raw).ok_or_else(|| {
        warn!(raw, "unknown text encoding");
        MacStrStatus::UnknownEncoding
    })
}

/** Copy `units` and a terminator into `out`, returning the number of units excluding the terminator */
pub fn write_terminated<T: Copy + Default>(units: &[T], out: *mut T, outlen: u32) -> CResult<usize> {
    let out = c_buffer_mut(out, outlen)?;
    let len = units.len();
    if len + 1 > out.len() {
        return Err(MacStrStatus::BufferTooSmall);
    }
    out[..len].copy_from_slice(units);
    out[len] = T::default();
    Ok(len)
}
