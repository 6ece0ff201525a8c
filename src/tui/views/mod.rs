//! TUI view components
//!
//! Each component renders one part of the interface from borrowed state.

mod detail;
mod footer;
mod graph;
mod header;
mod help;
pub mod helpers;

pub use detail::*;
pub use footer::*;
pub use graph::*;
pub use header::*;
pub use help::*;
