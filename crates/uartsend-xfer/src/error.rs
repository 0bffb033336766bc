use uartsend_sink::SinkError;

/// Errors that terminate a transfer.
///
/// Every variant is immediately fatal; nothing here is retried. Short writes
/// are not errors — they are handled by the orchestrator's write loop
/// according to its [`ShortWritePolicy`](crate::ShortWritePolicy).
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Reading the input stream failed.
    #[error("reading input failed: {0}")]
    Read(std::io::Error),

    /// Writing to the sink failed.
    #[error("write failed: {0}")]
    Write(SinkError),

    /// The sink accepted zero bytes, which would loop forever if retried.
    #[error("device accepted zero bytes")]
    WriteZero,

    /// Waiting for the transmission to physically complete failed.
    #[error("waiting for transmission to complete failed: {0}")]
    Drain(SinkError),
}

pub type Result<T> = std::result::Result<T, TransferError>;
