#![warn(missing_docs)]

pub mod error;
pub mod guard;
pub mod panic;
pub mod result;
pub mod tracking;
