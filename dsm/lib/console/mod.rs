//! The interactive console: menu tree, transition function, rendering and the driver loop.

mod driver;
mod menu;
pub mod render;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use driver::*;
pub use menu::*;
