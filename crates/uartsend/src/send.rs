use std::io;

use tracing::warn;
use uartsend_payload::{decode, EncodingMode};
use uartsend_sink::{LineSettings, TtySink};
use uartsend_xfer::{Outcome, ShortWritePolicy, Transfer};

use crate::exit::{failure, CliResult, SUCCESS};
use crate::Cli;

pub fn run(cli: Cli) -> CliResult<i32> {
    // Decode before touching the hardware: a malformed argument should never
    // open, or block on, the device.
    let payload = match &cli.text {
        Some(text) => {
            let mode = if cli.hex {
                EncodingMode::PackedHex
            } else {
                EncodingMode::EscapedHex
            };
            Some(decode(mode, text).map_err(|err| failure("decode failed", err))?)
        }
        None => None,
    };

    let settings = LineSettings {
        baud_rate: cli.baud,
        ..LineSettings::default()
    };
    let mut sink = TtySink::open(&cli.device, &settings)
        .map_err(|err| failure("open failed", err))?;

    let policy = if cli.allow_short_writes {
        ShortWritePolicy::Lenient
    } else {
        ShortWritePolicy::Complete
    };
    let transfer = Transfer::new(policy);

    let outcome = match &payload {
        Some(payload) => transfer.send_buffer(&mut sink, payload),
        None => transfer.stream(io::stdin().lock(), &mut sink),
    }
    .map_err(|err| failure("send failed", err))?;

    if let Outcome::SentPartial { written, expected } = outcome {
        warn!(
            written,
            expected, "transmission under-delivered (short writes allowed)"
        );
    }

    Ok(SUCCESS)
}
