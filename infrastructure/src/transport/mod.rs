//! Reply source adapters.
//!
//! - [`EchoReplySource`] answers locally and needs no network
//! - [`HttpReplySource`] talks to the guide backend (feature `http`)
//! - [`sse`] decodes the backend's streaming responses

mod echo;
#[cfg(feature = "http")]
mod http;
pub mod sse;

pub use echo::EchoReplySource;
#[cfg(feature = "http")]
pub use http::HttpReplySource;
pub use sse::SseDecoder;
