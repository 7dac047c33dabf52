//! QVC Core - Backend logic for the Quantum vs Classical screening demo
//!
//! This crate contains the animation driver, run session, molecule
//! collaborators and configuration with zero UI dependencies.
//! It is used by the terminal front end and can be embedded elsewhere.

pub mod animation;
pub mod config;
pub mod logging;
pub mod models;
pub mod molecule;
pub mod notify;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
