use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info};

use crate::error::{Result, SinkError};
use crate::traits::ByteSink;

/// Line-discipline settings applied when opening the device.
///
/// Defaults to the classic 9600 8N1 with no flow control; the open path also
/// puts the port in raw mode (no canonical processing, no echo, no output
/// post-processing), so bytes pass through both directions unmodified.
#[derive(Debug, Clone)]
pub struct LineSettings {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    /// Poll timeout for individual write calls. A device stalled under flow
    /// control for longer than this surfaces as a write error; draining has
    /// no timeout and may block indefinitely.
    pub timeout: Duration,
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A serial device owned for the lifetime of one transmission.
///
/// Opening configures the line; dropping closes the device, so the handle is
/// released on every exit path. `drain` maps to the port's `flush`, which on
/// POSIX is `tcdrain(3)` — it returns only once the UART transmit queue is
/// physically empty.
pub struct TtySink {
    port: Box<dyn SerialPort>,
    path: PathBuf,
}

impl TtySink {
    /// Open `path` and apply `settings` before any write.
    pub fn open(path: impl AsRef<Path>, settings: &LineSettings) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let port = serialport::new(path.to_string_lossy(), settings.baud_rate)
            .data_bits(settings.data_bits)
            .parity(settings.parity)
            .stop_bits(settings.stop_bits)
            .flow_control(settings.flow_control)
            .timeout(settings.timeout)
            .open()
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        info!(?path, baud = settings.baud_rate, "opened serial device");

        Ok(Self { port, path })
    }

    /// The device path this sink was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSink for TtySink {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let n = self.port.write(buf)?;
        debug!(requested = buf.len(), written = n, "wrote to serial device");
        Ok(n)
    }

    fn drain(&mut self) -> Result<()> {
        debug!(path = ?self.path, "waiting for transmit queue to empty");
        self.port.flush().map_err(SinkError::Drain)
    }
}

impl std::fmt::Debug for TtySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtySink").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_9600_8n1() {
        let settings = LineSettings::default();
        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.data_bits, DataBits::Eight);
        assert_eq!(settings.parity, Parity::None);
        assert_eq!(settings.stop_bits, StopBits::One);
        assert_eq!(settings.flow_control, FlowControl::None);
    }

    #[test]
    fn open_missing_device_reports_path() {
        let err = TtySink::open("/nonexistent/ttyUSB99", &LineSettings::default()).unwrap_err();
        match err {
            SinkError::Open { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/ttyUSB99"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
