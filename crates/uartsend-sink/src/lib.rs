//! Serial-device byte sink for uartsend.
//!
//! The [`ByteSink`] trait is the narrow seam between the transfer logic and
//! the hardware: `write` accepts bytes (short writes allowed), `drain` blocks
//! until everything previously written has physically left the transmitter.
//! [`TtySink`] is the real implementation over a serial device; tests
//! substitute mocks.

pub mod error;
pub mod traits;
pub mod tty;

pub use error::{Result, SinkError};
pub use traits::ByteSink;
pub use tty::{LineSettings, TtySink};
