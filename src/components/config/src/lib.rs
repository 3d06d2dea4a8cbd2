#![deny(warnings)]
#![allow(missing_docs)]

pub mod distribution;
