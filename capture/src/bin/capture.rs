use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::exit;

use capture_lib::{capture_bin, capture_raw, capture_rim, Format};
use serial::{open_device, Parity, SerialConfig};
use tape::bin::Checksum;

use clap::Parser;
use log::warn;

/// Capture PDP-8 paper tapes from a serial line
#[derive(Parser)]
struct Args {
    /// Capture format
    #[arg(value_enum)]
    format: Format,

    /// Output file
    #[arg(default_value = "out.bin")]
    output: String,

    /// Serial device
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    device: String,

    /// Serial com speed
    #[arg(short, long, default_value_t = 1200)]
    speed: u32,

    /// Number of data bits (5-8)
    #[arg(short, long, default_value_t = 8)]
    bits: u8,

    /// Parity (N/E/O)
    #[arg(short, long, default_value_t = 'N')]
    parity: char,

    /// Number of stop bits (1-2)
    #[arg(short = 'S', long, default_value_t = 1)]
    stop: u8,

    /// Use RTS/CTS handshake
    #[arg(long)]
    handshake: bool,

    /// Strip a leading run of this byte value from a raw capture
    #[arg(long)]
    strip: Option<u8>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let parity = Parity::from_char(args.parity).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1);
    });
    let config = SerialConfig {
        baud: args.speed,
        data_bits: args.bits,
        parity,
        stop_bits: args.stop,
        handshake: args.handshake,
    };

    let mut port = open_device(&args.device, &config).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1);
    });

    let file = File::create(&args.output).unwrap_or_else(|e| {
        eprintln!("could not write to file \"{}\": {e}", args.output);
        exit(1);
    });
    let mut sink = BufWriter::new(file);

    let result = match args.format {
        Format::Raw => capture_raw(&mut port, &mut sink, args.strip).map(|()| None),
        Format::Rim => capture_rim(&mut port, &mut sink).map(Some),
        Format::Bin => capture_bin(&mut port, &mut sink).map(Some),
    };

    let capture = result.unwrap_or_else(|e| {
        eprintln!("error from read: {e}");
        exit(1);
    });
    sink.flush().unwrap_or_else(|e| {
        eprintln!("could not write to file \"{}\": {e}", args.output);
        exit(1);
    });

    if let Some(capture) = capture {
        if !capture.complete {
            warn!("record did not run to completion");
        }
        if let Some(summary) = capture.summary {
            if summary.truncated_pair {
                warn!("record ended in the middle of a word pair");
            }
            match summary.checksum {
                Some(Checksum::Ok(checksum)) => println!("Checksum OK!: {checksum:4o}"),
                Some(Checksum::Fail { computed, transmitted }) => {
                    println!("Checksum FAIL!: calc {computed:4o} <-> recv {transmitted:4o}");
                }
                None => {}
            }
        }
    }
}
