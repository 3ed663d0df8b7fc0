/// Numeric conversion helpers.
///
/// This module provides safe functions for converting floating-point
/// values to integer counts without silent truncation or rounding. Use
/// these helpers whenever a `f64` from the language has to become an exact
/// host-side integer.
pub mod num;
