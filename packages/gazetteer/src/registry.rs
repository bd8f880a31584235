//! Compile-time registry of built-in gazetteer tables.
//!
//! Each table is a TOML file in `places/` embedded via `include_str!`.

use crate::Gazetteer;

/// Number of places in the built-in table. Enforced by a test.
#[cfg(test)]
const EXPECTED_PLACE_COUNT: usize = 12;

/// The built-in table: landmarks of Gurugram.
const BUILTIN_TOML: &str = include_str!("../places/gurugram.toml");

/// Returns the built-in gazetteer.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse or validate. Since it is a
/// compile-time constant, a failure indicates a development error and is
/// caught during CI.
#[must_use]
pub fn builtin() -> Gazetteer {
    Gazetteer::from_toml_str(BUILTIN_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse built-in gazetteer: {e}"))
}
