#![deny(warnings)]
#![allow(missing_docs)]

pub mod context;
pub mod macros;
pub mod module;
pub mod transaction;

#[doc(hidden)]
pub use fp_types::error::InvariantViolation;
