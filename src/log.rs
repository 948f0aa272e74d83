//! Logging macros used across the crate.
//!
//! With the `tracing` feature these are the `tracing` macros. Without it they
//! swallow their arguments, so a pass run from inside a host's render callback
//! does no formatting work.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_tracing_field_syntax() {
        let handle = 3_usize;
        crate::log::debug!(group = "thresholdlines", slot = handle, "primitive added");
        crate::log::warn!(?handle, "attribute update for unknown primitive");
        crate::log::debug!(value = %1.5, "formatted");
        assert_eq!(handle, 3);
    }
}
