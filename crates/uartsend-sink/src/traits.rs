use crate::error::Result;

/// An open, writable byte sink bound to a serial device.
///
/// The contract splits "the kernel took the bytes" from "the bytes are on the
/// wire": `write` only guarantees the former, `drain` the latter. Callers
/// must invoke `drain` exactly once, after the last `write`, before the sink
/// is dropped — exiting without it can truncate the physical transmission
/// even though every `write` succeeded.
pub trait ByteSink {
    /// Attempt to write `buf`, returning how many bytes were accepted.
    ///
    /// The OS may perform a short write, so the only guarantee is
    /// `n <= buf.len()`.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Block until all previously written bytes have been physically
    /// transmitted by the hardware, not merely queued by the kernel.
    fn drain(&mut self) -> Result<()>;
}
