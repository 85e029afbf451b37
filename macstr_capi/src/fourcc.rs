/*

Four-character code functions
=============================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

use std::ffi::c_char;

use macstr::FourCharCode;

use crate::common::*;

/// Write the text of a four-character code into `out` as a NUL terminated UTF-8 string.
///
/// Returns the number of bytes written, or `NotPrintable` if the code has control characters and `use_hex` is not set.
///
/// # Safety
/// `out` must point to at least `outlen` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn macstr_fourcc_to_string(code: u32, use_hex: bool, out: *mut c_char, outlen: u32) -> i32 {
    to_c_return(FourCharCode(code).string_value(use_hex)
        .ok_or(MacStrStatus::NotPrintable)
        .and_then(|text| write_terminated(text.as_bytes(), out as *mut u8, outlen)))
}

/// # Safety
/// `text` must be a NUL terminated string, and `result` must be writable.
#[no_mangle]
pub unsafe extern "C" fn macstr_fourcc_from_string(text: *const c_char, detect_hex: bool, result: *mut u32) -> i32 {
    let parse = || -> CResult<usize> {
        if result.is_null() {
            return Err(MacStrStatus::InvalidArgument);
        }
        let code = FourCharCode::parse(c_str(text)?, detect_hex)?;
        *result = code.value();
        Ok(0)
    };
    to_c_return(parse())
}
