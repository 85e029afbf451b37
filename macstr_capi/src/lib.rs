/*

Classic Mac strings - C API
===========================

Copyright (c) 2024 Dannii Willis
MIT licenced

*/

mod common;
mod fourcc;
mod pstrings;

pub use common::MacStrStatus;
pub use fourcc::*;
pub use pstrings::*;

use tracing_subscriber::EnvFilter;

/** Send the library's log output to stderr, filtered by the `MACSTR_LOG` environment variable (default `warn`).
    Calling this more than once has no further effect.
*/
#[no_mangle]
pub extern "C" fn macstr_init_logging() {
    let filter = EnvFilter::try_from_env("MACSTR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
