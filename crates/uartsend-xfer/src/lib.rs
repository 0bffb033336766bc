//! Transfer orchestration for uartsend.
//!
//! Pushes a payload — a single decoded buffer or a stream read chunk by chunk
//! — into a [`uartsend_sink::ByteSink`] and enforces the completion contract:
//! exactly one `drain`, after the last write, so "success" means the bytes
//! are on the wire rather than parked in the kernel output queue.

pub mod error;
pub mod transfer;

pub use error::{Result, TransferError};
pub use transfer::{Outcome, ShortWritePolicy, Transfer, DEFAULT_CHUNK_SIZE};
