//! Typed parsers for individual `identify` tag values.
//!
//! Every parser takes the trimmed text after `=` and returns `None` for
//! anything it cannot make sense of. None of them fail or panic.

pub mod datetime;
pub mod number;
pub mod orientation;
pub mod rational;
pub mod string;
