/*

Classic Mac strings
===================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

pub mod common;
pub mod encodings;
pub mod fourcc;
pub mod pstrings;
pub mod resolver;

pub use common::*;
pub use encodings::{LegacyEncoding, TextEncoding};
pub use fourcc::{FourCharCode, FourCharCodeConvertible};
pub use pstrings::{PascalBuffer, PascalField, PascalString, Str15, Str255, Str27, Str31, Str32, Str32Field, Str63, StrFileName};
pub use resolver::{resolve_compatible_legacy_encoding, LegacyEncodingResolver, StandardResolver};
