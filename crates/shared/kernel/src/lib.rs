//! Kernel utilities shared across slices.
//! Keep this crate lightweight: IDs, config loading, text normalization and, behind the
//! `server` feature, the Axum state/error/system-router plumbing.
//!
//! ## ID generation
//! Use `safe_nanoid!` for URL-safe, unambiguous IDs:
//! ```rust
//! # use gems_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use gems_kernel::config::load_config;
//! let cfg: gems_kernel::domain::config::ApiConfig = load_config(None::<&str>)?;
//! ```
pub mod config;
pub mod ids;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
pub mod text;

pub use gems_domain as domain;
pub use ids::SAFE_ALPHABET;
pub use nanoid::nanoid;

/// Generates an unambiguous `NanoID` (no visually confusing characters).
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(($crate::ids::SAFE_ID_LEN), $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}
