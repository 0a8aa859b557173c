use std::fs::File;
use std::io::{self, Write};
use std::process::exit;

use serial::{open_device, Parity, SerialConfig, Transport};
use serial_dump::HexDump;

use clap::Parser;

/// Dump serial port input in a hexdump style
#[derive(Parser)]
struct Args {
    /// Serial device
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    device: String,

    /// Dump received data to file
    #[arg(short, long)]
    log: Option<String>,

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

    /// Don't print on stdout
    #[arg(short, long)]
    quiet: bool,
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
        handshake: false,
    };

    let mut port = open_device(&args.device, &config).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1);
    });

    let mut log_file = args.log.as_ref().map(|path| {
        File::create(path).unwrap_or_else(|e| {
            eprintln!("error opening log file {path}: {e}");
            exit(1);
        })
    });

    let mut hex = HexDump::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut seen_any = false;

    // Dump until the line goes silent after the first byte.
    loop {
        let mut buf = [0u8; 80];
        let n = match port.recv(&mut buf) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("error from read: {e}");
                exit(1);
            }
        };
        if n == 0 {
            if seen_any {
                break;
            }
            continue;
        }
        seen_any = true;

        if let Some(f) = &mut log_file {
            f.write_all(&buf[..n]).unwrap_or_else(|e| {
                eprintln!("error writing log file: {e}");
                exit(1);
            });
        }
        if !args.quiet {
            for &b in &buf[..n] {
                hex.push(b, &mut out).unwrap();
            }
        }
    }

    if !args.quiet {
        hex.finish(&mut out).unwrap();
    }
}
