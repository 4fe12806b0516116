//! Boundary editing sessions.
//!
//! A session is an explicit value owned by one editor: the host feeds it taps, drags, and
//! unit changes, and reads back the cached area and center. It has no knowledge of any UI
//! framework.

mod boundary_session;
mod history;
mod state;

#[cfg(test)]
mod tests;

pub use boundary_session::{BoundarySession, BoundarySnapshot};
pub use history::{EditCommand, EditHistory};
pub use state::SessionState;
