//! Configuration types and helpers.

mod defaults;
mod dsm_config;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use defaults::*;
pub use dsm_config::*;
