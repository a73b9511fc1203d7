// ============================================================================
// DOM MODULE - DOM helpers
// ============================================================================

pub mod element;
pub mod events;

pub use element::*;
pub use events::*;
