use std::io::{ErrorKind, Read};

use tracing::{debug, warn};
use uartsend_sink::{ByteSink, SinkError};

use crate::error::{Result, TransferError};

/// Chunk size for streaming reads from stdin: 1024 bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// What to do when the OS accepts fewer bytes than requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortWritePolicy {
    /// Loop until the chunk is fully written.
    #[default]
    Complete,
    /// Warn and move on without retrying the remainder. This reproduces the
    /// tool's historical behavior and can under-deliver the payload; the
    /// shortfall is reported through [`Outcome::SentPartial`].
    Lenient,
}

/// Terminal result of a successful transfer run.
///
/// Failures are `Err(TransferError)`; `SentPartial` only occurs under
/// [`ShortWritePolicy::Lenient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every byte was written and drained to the wire.
    Sent { bytes: u64 },
    /// The lenient policy skipped the remainder of at least one short write.
    SentPartial { written: u64, expected: u64 },
}

/// Orchestrates one transmission: writes, then exactly one drain.
#[derive(Debug, Clone)]
pub struct Transfer {
    chunk_size: usize,
    policy: ShortWritePolicy,
}

impl Default for Transfer {
    fn default() -> Self {
        Self::new(ShortWritePolicy::default())
    }
}

impl Transfer {
    pub fn new(policy: ShortWritePolicy) -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            policy,
        }
    }

    /// Override the streaming chunk size (must be non-zero).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        self.chunk_size = chunk_size;
        self
    }

    /// Send a single complete buffer, then drain.
    pub fn send_buffer(&self, sink: &mut dyn ByteSink, payload: &[u8]) -> Result<Outcome> {
        let written = self.write_chunk(sink, payload)?;
        sink.drain().map_err(TransferError::Drain)?;
        debug!(written, expected = payload.len(), "transfer drained");
        Ok(outcome(written as u64, payload.len() as u64))
    }

    /// Stream `reader` to the sink chunk by chunk until end-of-stream, then
    /// drain once.
    pub fn stream(&self, mut reader: impl Read, sink: &mut dyn ByteSink) -> Result<Outcome> {
        let mut chunk = vec![0u8; self.chunk_size];
        let mut written_total = 0u64;
        let mut expected_total = 0u64;

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransferError::Read(err)),
            };
            expected_total += n as u64;
            written_total += self.write_chunk(sink, &chunk[..n])? as u64;
        }

        sink.drain().map_err(TransferError::Drain)?;
        debug!(
            written = written_total,
            expected = expected_total,
            "transfer drained"
        );
        Ok(outcome(written_total, expected_total))
    }

    /// Write one chunk according to the short-write policy.
    ///
    /// Returns how many bytes actually reached the sink. Under `Complete`
    /// this equals `chunk.len()`; under `Lenient` a short write ends the
    /// chunk early with a warning.
    fn write_chunk(&self, sink: &mut dyn ByteSink, chunk: &[u8]) -> Result<usize> {
        let mut offset = 0usize;
        while offset < chunk.len() {
            match sink.write(&chunk[offset..]) {
                Ok(0) => return Err(TransferError::WriteZero),
                Ok(n) => {
                    offset += n;
                    if offset < chunk.len() && self.policy == ShortWritePolicy::Lenient {
                        warn!(
                            written = offset,
                            requested = chunk.len(),
                            "short write, remainder not retried"
                        );
                        return Ok(offset);
                    }
                }
                Err(SinkError::Io(err))
                    if err.kind() == ErrorKind::Interrupted
                        || err.kind() == ErrorKind::WouldBlock =>
                {
                    continue
                }
                Err(err) => return Err(TransferError::Write(err)),
            }
        }
        Ok(offset)
    }
}

fn outcome(written: u64, expected: u64) -> Outcome {
    if written == expected {
        Outcome::Sent { bytes: written }
    } else {
        Outcome::SentPartial { written, expected }
    }
}
