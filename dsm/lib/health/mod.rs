//! Health report aggregation.
//!
//! A report runs an ordered list of [`HealthCheck`]s and records every outcome. A failed
//! check is noted and the remaining checks still run; the report is healthy only if all of
//! them passed.

mod check;
mod report;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use check::*;
pub use report::*;
