//! Application-level configuration.
//!
//! - [`GuideParams`] - language, suggestion and retry behaviour of the use cases

pub mod guide_params;

pub use guide_params::GuideParams;
