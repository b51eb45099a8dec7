//! Resource managers for the Docker service, socket, containers, images and host.
//!
//! Each manager is built in a fixed [`ManagerMode`](crate::ManagerMode). Live managers call
//! into [`crate::runtime`] and turn every collaborator error into a failed
//! [`OperationResult`](crate::OperationResult). Simulated managers return the data in
//! [`fixtures`] and never call the collaborator they were given.

mod container;
pub mod fixtures;
pub mod format;
mod image;
mod managers;
mod system;
#[cfg(test)]
mod testing;
mod unit;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use container::*;
pub use image::*;
pub use managers::*;
pub use system::*;
pub use unit::*;
