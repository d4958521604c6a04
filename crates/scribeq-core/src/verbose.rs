//! Request tracing to stderr.
//!
//! Off by default so normal output stays clean; the CLI's `--verbose` flag
//! flips it on for the whole process. Trace lines go through the
//! `verbose!()` macro.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable request tracing
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Check whether request tracing is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Trace a formatted line to stderr when tracing is enabled
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[scribeq] {}", format!($($arg)*));
        }
    };
}
