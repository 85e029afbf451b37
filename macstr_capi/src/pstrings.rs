/*

Pascal string functions
=======================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use std::ffi::c_char;

use macstr::pstrings::{decode_slice, decode_with, encode_with};
use macstr::{LegacyEncoding, StandardResolver};
use widestring::U16String;

use crate::common::*;

const MAX_PAYLOAD: u32 = u8::MAX as u32;

fn decode_buffer(buf: *const u8, buflen: u32, encoding: u32) -> CResult<String> {
    let encoding = legacy_encoding(encoding)?;
    Ok(decode_slice(c_buffer(buf, buflen)?, encoding)?)
}

fn decode_field(buf: *const u8, buflen: u32, encoding: u32) -> CResult<String> {
    let encoding = legacy_encoding(encoding)?;
    if buflen < 2 {
        return Err(MacStrStatus::InvalidArgument);
    }
    let maximum_length = (buflen - 2).min(MAX_PAYLOAD) as u8;
    Ok(decode_with(&StandardResolver, c_buffer(buf, buflen)?, encoding, maximum_length)?)
}

fn encode_buffer(text: *const c_char, encoding: u32, buf: *mut u8, buflen: u32, reserved: u32) -> CResult<usize> {
    let encoding = legacy_encoding(encoding)?;
    let text = c_str(text)?;
    if buflen <= reserved {
        return Err(MacStrStatus::InvalidArgument);
    }
    let capacity = (buflen - reserved).min(MAX_PAYLOAD) as usize;
    let len = encode_with(&StandardResolver, text, encoding, c_buffer_mut(buf, buflen)?, capacity)?;
    Ok(len as usize)
}

/// Decode the Pascal string in a buffer of `buflen` bytes, writing it into `out` as a NUL terminated UTF-8 string.
///
/// Returns the number of bytes written, or a negative `MacStrStatus`.
///
/// # Safety
/// `buf` must point to `buflen` readable bytes, and `out` to `outlen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn macstr_pstring_decode(buf: *const u8, buflen: u32, encoding: u32, out: *mut c_char, outlen: u32) -> i32 {
    to_c_return(decode_buffer(buf, buflen, encoding)
        .and_then(|text| write_terminated(text.as_bytes(), out as *mut u8, outlen)))
}

/// Like `macstr_pstring_decode`, but for buffers with a reserved final byte.
///
/// # Safety
/// `buf` must point to `buflen` readable bytes, and `out` to `outlen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn macstr_pstring_field_decode(buf: *const u8, buflen: u32, encoding: u32, out: *mut c_char, outlen: u32) -> i32 {
    to_c_return(decode_field(buf, buflen, encoding)
        .and_then(|text| write_terminated(text.as_bytes(), out as *mut u8, outlen)))
}

/// Decode the Pascal string in a buffer, writing it into `out` as NUL terminated UTF-16.
///
/// Returns the number of UTF-16 units written, or a negative `MacStrStatus`.
///
/// # Safety
/// `buf` must point to `buflen` readable bytes, and `out` to `outlen` writable units.
#[no_mangle]
pub unsafe extern "C" fn macstr_pstring_decode_utf16(buf: *const u8, buflen: u32, encoding: u32, out: *mut u16, outlen: u32) -> i32 {
    to_c_return(decode_buffer(buf, buflen, encoding)
        .and_then(|text| write_terminated(U16String::from_str(&text).as_slice(), out, outlen)))
}

/// Encode a NUL terminated UTF-8 string as a Pascal string filling a buffer of `buflen` bytes.
///
/// Returns the payload length, or a negative `MacStrStatus`. Strings which don't fit are rejected, not truncated.
///
/// # Safety
/// `text` must be a NUL terminated string, and `buf` must point to `buflen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn macstr_pstring_encode(text: *const c_char, encoding: u32, buf: *mut u8, buflen: u32) -> i32 {
    to_c_return(encode_buffer(text, encoding, buf, buflen, 1))
}

/// Like `macstr_pstring_encode`, but the final byte of the buffer is reserved and left zero.
///
/// # Safety
/// `text` must be a NUL terminated string, and `buf` must point to `buflen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn macstr_pstring_field_encode(text: *const c_char, encoding: u32, buf: *mut u8, buflen: u32) -> i32 {
    to_c_return(encode_buffer(text, encoding, buf, buflen, 2))
}

/** The raw value of the classic encoding most compatible with the current locale */
#[no_mangle]
pub extern "C" fn macstr_system_encoding() -> u32 {
    LegacyEncoding::system().raw()
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;
    use std::ptr;

    use super::*;

    const MAC_ROMAN: u32 = 0;
    const MAC_JAPANESE: u32 = 1;

    fn decode(buf: &[u8], encoding: u32) -> (i32, String) {
        let mut out = [0 as c_char; 64];
        let res = unsafe {macstr_pstring_decode(buf.as_ptr(), buf.len() as u32, encoding, out.as_mut_ptr(), out.len() as u32)};
        let len = res.max(0) as usize;
        let bytes: Vec<u8> = out[..len].iter().map(|&ch| ch as u8).collect();
        (res, String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn decode_str15() {
        let mut buf = [0u8; 16];
        buf[..3].copy_from_slice(&[2, b'H', b'i']);
        assert_eq!(decode(&buf, MAC_ROMAN), (2, "Hi".to_string()));
        buf[1] = 0x8E;
        assert_eq!(decode(&buf, MAC_ROMAN), (3, "éi".to_string()));
    }

    #[test]
    fn decode_errors() {
        let mut buf = [0u8; 16];
        buf[0] = 16;
        assert_eq!(decode(&buf, MAC_ROMAN).0, MacStrStatus::LengthExceedsCapacity as i32);
        buf[0] = 1;
        buf[1] = 0x82;
        assert_eq!(decode(&buf, MAC_JAPANESE).0, MacStrStatus::InvalidEncoding as i32);
        assert_eq!(decode(&buf, 8).0, MacStrStatus::UnknownEncoding as i32);
        assert_eq!(decode(&buf, 4).0, MacStrStatus::NoConverter as i32);
        assert_eq!(decode(&[], MAC_ROMAN).0, MacStrStatus::InvalidArgument as i32);
        let res = unsafe {macstr_pstring_decode(ptr::null(), 16, MAC_ROMAN, ptr::null_mut(), 0)};
        assert_eq!(res, MacStrStatus::InvalidArgument as i32);
    }

    #[test]
    fn decode_utf16() {
        let buf = [3u8, b'a', 0x8E, b'b'];
        let mut out = [0xFFFFu16; 8];
        let res = unsafe {macstr_pstring_decode_utf16(buf.as_ptr(), 4, MAC_ROMAN, out.as_mut_ptr(), 8)};
        assert_eq!(res, 3);
        assert_eq!(&out[..4], &[0x61, 0xE9, 0x62, 0]);
        let res = unsafe {macstr_pstring_decode_utf16(buf.as_ptr(), 4, MAC_ROMAN, out.as_mut_ptr(), 3)};
        assert_eq!(res, MacStrStatus::BufferTooSmall as i32);
    }

    #[test]
    fn encode() {
        let text = CString::new("Hello").unwrap();
        let mut buf = [0xAAu8; 8];
        let res = unsafe {macstr_pstring_encode(text.as_ptr(), MAC_ROMAN, buf.as_mut_ptr(), 8)};
        assert_eq!(res, 5);
        assert_eq!(buf, [5, b'H', b'e', b'l', b'l', b'o', 0, 0]);

        let mut small = [0u8; 5];
        let res = unsafe {macstr_pstring_encode(text.as_ptr(), MAC_ROMAN, small.as_mut_ptr(), 5)};
        assert_eq!(res, MacStrStatus::TooLong as i32);

        let snowman = CString::new("☃").unwrap();
        let res = unsafe {macstr_pstring_encode(snowman.as_ptr(), MAC_ROMAN, buf.as_mut_ptr(), 8)};
        assert_eq!(res, MacStrStatus::UnrepresentableCharacters as i32);
    }

    #[test]
    fn fields() {
        let text = CString::new("Hello").unwrap();
        let mut buf = [0xAAu8; 7];
        let res = unsafe {macstr_pstring_field_encode(text.as_ptr(), MAC_ROMAN, buf.as_mut_ptr(), 7)};
        assert_eq!(res, 5);
        assert_eq!(buf, [5, b'H', b'e', b'l', b'l', b'o', 0]);

        let mut out = [0 as c_char; 16];
        let res = unsafe {macstr_pstring_field_decode(buf.as_ptr(), 7, MAC_ROMAN, out.as_mut_ptr(), 16)};
        assert_eq!(res, 5);

        buf[0] = 6;
        let res = unsafe {macstr_pstring_field_decode(buf.as_ptr(), 7, MAC_ROMAN, out.as_mut_ptr(), 16)};
        assert_eq!(res, MacStrStatus::LengthExceedsCapacity as i32);

        let long = CString::new("Hello!").unwrap();
        let res = unsafe {macstr_pstring_field_encode(long.as_ptr(), MAC_ROMAN, buf.as_mut_ptr(), 7)};
        assert_eq!(res, MacStrStatus::TooLong as i32);
    }

    #[test]
    fn system_encoding_is_known() {
        assert!(LegacyEncoding::from_raw(macstr_system_encoding()).is_some());
    }
}
