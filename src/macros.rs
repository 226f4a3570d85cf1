//! Small crate-wide convenience macros.

/// Log a formatted line to the browser console.
///
/// Compiled out of release builds and a no-op off-wasm so the pure state
/// machine can log from native unit tests without touching `web_sys`.
///
/// ```rust,ignore
/// debug_log!("render: session present = {}", session.is_some());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(debug_assertions, target_arch = "wasm32")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Warning-level counterpart of [`debug_log!`]; kept in release builds.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
