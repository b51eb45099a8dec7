//! `dsmutils` is a library containing general utilities for the dsm project.

#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod error;
pub mod process;
pub mod signal;
pub mod term;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use error::*;
pub use process::*;
pub use signal::*;
