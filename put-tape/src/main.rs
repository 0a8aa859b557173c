use std::io::Read;
use std::process::exit;

use serial::{open_device, Parity, SerialConfig, Transport};

use clap::Parser;

/// Send a paper tape, from stdin or file, out on a serial port
#[derive(Parser)]
struct Args {
    /// Input data file (stdin when omitted)
    #[arg(short, long)]
    filename: Option<String>,

    /// Serial device
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    device: String,

    /// Serial com speed
    #[arg(short, long, default_value_t = 9600)]
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

    let data = match &args.filename {
        Some(path) => std::fs::read(path).unwrap_or_else(|e| {
            eprintln!("could not open file \"{path}\": {e}");
            exit(1);
        }),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).unwrap_or_else(|e| {
                eprintln!("error reading stdin: {e}");
                exit(1);
            });
            buf
        }
    };

    // One byte at a time, like a tape reader would.
    for &b in &data {
        if let Err(e) = port.send(&[b]) {
            eprintln!("error from write: {e}");
            exit(1);
        }
    }
}
