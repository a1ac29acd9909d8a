//! Chat exchange domain.
//!
//! - [`entities::ChatRequest`] / [`entities::ChatReply`] - one request/reply turn
//! - [`stream::StreamEvent`] - a decoded event of a streamed reply
//! - [`buffer::ReplyBuffer`] - accumulates a streamed reply for re-parsing

pub mod buffer;
pub mod entities;
pub mod stream;
