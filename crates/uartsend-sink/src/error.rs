use std::path::PathBuf;

/// Errors that can occur on the byte sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Failed to open (and configure) the serial device.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: serialport::Error,
    },

    /// An I/O error occurred while writing to the device.
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Waiting for the transmit queue to empty failed.
    #[error("drain failed: {0}")]
    Drain(std::io::Error),
}

pub type Result<T> = std::result::Result<T, SinkError>;
