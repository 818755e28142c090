/// Crate to abstract out tracing so disabled levels never show up in the build, using macros.
/// See similar: https://doc.rust-lang.org/src/std/macros.rs.html#138-145.
///
/// The feature checks happen here, in this crate, so callers only pick features on
/// `pizzeria_trace` and never need to declare `log_*` features of their own.
pub use tracing;

use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[cfg(feature = "log_info")]
#[macro_export]
macro_rules! info {
    ($($t:tt)*) => {
        $crate::tracing::info!($($t)*)
    };
}

#[cfg(not(feature = "log_info"))]
#[macro_export]
macro_rules! info {
    ($($t:tt)*) => {{
        // never runs, keeps the arguments type-checked and used
        if false {
            $crate::tracing::info!($($t)*);
        }
    }};
}

#[cfg(feature = "log_warnings")]
#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => {
        $crate::tracing::warn!($($t)*)
    };
}

#[cfg(not(feature = "log_warnings"))]
#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => {{
        // never runs, keeps the arguments type-checked and used
        if false {
            $crate::tracing::warn!($($t)*);
        }
    }};
}

#[cfg(feature = "log_debug")]
#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => {
        $crate::tracing::debug!($($t)*)
    };
}

#[cfg(not(feature = "log_debug"))]
#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => {{
        // never runs, keeps the arguments type-checked and used
        if false {
            $crate::tracing::debug!($($t)*);
        }
    }};
}

#[cfg(feature = "log_errors")]
#[macro_export]
macro_rules! error {
    ($($t:tt)*) => {
        $crate::tracing::error!($($t)*)
    };
}

#[cfg(not(feature = "log_errors"))]
#[macro_export]
macro_rules! error {
    ($($t:tt)*) => {{
        // never runs, keeps the arguments type-checked and used
        if false {
            $crate::tracing::error!($($t)*);
        }
    }};
}

/// Installs a global `FmtSubscriber` capped at `level`.
///
/// Meant to be called once from a binary's `main`; a second call returns
/// the error from `tracing` instead of replacing the first subscriber.
///
/// # Errors
///
/// Returns [`SetGlobalDefaultError`] when a global subscriber is already set.
pub fn init(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_thread_names(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
