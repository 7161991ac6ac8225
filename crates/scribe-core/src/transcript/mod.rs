//! Conversational transcript model
//!
//! A transcript is an ordered, append-only log of entries exchanged between
//! a user, a model, and invoked tools. Entry order is significant: it defines
//! recency and the position of the leading system instruction.

mod entry;
mod log;

pub use entry::{ContentSegment, ToolInvocation, TranscriptEntry};
pub use log::Transcript;
