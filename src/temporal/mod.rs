//! Time-in-state reconstruction from a ticket's event stream
//!
//! Status transitions are replayed as a fold over [`ReplayState`]; lead,
//! cycle, and review spans are read off the sorted timeline directly.

mod reconstruct;
mod state;

pub use reconstruct::{elapsed_span_ms, reconstruct, reconstruct_with};
pub use state::{ReopenMachine, ReplayState, StatusClass};
