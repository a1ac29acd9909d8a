//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_guide;
pub mod render_reply;
