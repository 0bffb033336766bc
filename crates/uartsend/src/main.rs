mod exit;
mod logging;
mod send;

use std::path::PathBuf;

use clap::Parser;

use crate::logging::{init_logging, LogFormat, LogLevel};

/// Transmit a byte payload over a serial line and wait until every byte has
/// physically left the transmitter before exiting.
#[derive(Parser, Debug)]
#[command(name = "uartsend", version, about = "Send bytes over a serial line")]
struct Cli {
    /// Serial device to transmit on (e.g. /dev/ttyAMA1).
    device: PathBuf,

    /// Payload text; `\xHH` escapes are expanded. Omit to stream stdin
    /// verbatim instead.
    text: Option<String>,

    /// Treat the payload text as packed hex (two digits per byte, no
    /// separators).
    #[arg(long, requires = "text")]
    hex: bool,

    /// Baud rate applied when opening the device.
    #[arg(long, value_name = "RATE", default_value_t = 9600)]
    baud: u32,

    /// On a short write, log a warning and move on instead of retrying the
    /// remainder (the tool's historical behavior).
    #[arg(long)]
    allow_short_writes: bool,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    // The documented exit codes are 0 and 1, so clap's usage errors (which
    // would otherwise exit 2) are mapped here. Help and version remain
    // successful exits.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayVersion => std::process::exit(exit::SUCCESS),
                _ => std::process::exit(exit::FAILURE),
            }
        }
    };
    init_logging(cli.log_format, cli.log_level);

    match send::run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
