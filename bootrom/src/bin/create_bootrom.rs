use std::process::exit;

use tape::bin::{BinBody, BinFramer, Checksum};

use clap::Parser;

/// Create the two boot ROMs on M8317 in a PDP-8A from a captured BIN tape
#[derive(Parser)]
struct Args {
    /// Captured BIN format loader tape
    #[arg(default_value = "bootloader.bin")]
    tape: String,

    /// Output file for ROM #1
    #[arg(long, default_value = "rom1.bin")]
    rom1: String,

    /// Output file for ROM #2
    #[arg(long, default_value = "rom2.bin")]
    rom2: String,
}

fn write_rom(path: &str, bytes: &[u8; bootrom::ROM_BYTES]) {
    std::fs::write(path, bytes).unwrap_or_else(|e| {
        eprintln!("could not write to file \"{path}\": {e}");
        exit(1);
    });
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let bytes = std::fs::read(&args.tape).unwrap_or_else(|e| {
        eprintln!("could not open file \"{}\": {e}", args.tape);
        exit(1);
    });

    let mut framer = BinFramer::new(BinBody::new());
    for &b in &bytes {
        framer.push(b);
    }
    let body = framer.into_body();

    for word in body.words() {
        println!("{word}");
    }
    match body.checksum() {
        Some(Checksum::Ok(checksum)) => println!("Checksum OK!: {checksum:4o}"),
        Some(Checksum::Fail { computed, transmitted }) => {
            println!("Checksum FAIL!: calc {computed:4o} <-> recv {transmitted:4o}");
        }
        None => {
            eprintln!("no BIN record found in \"{}\"", args.tape);
            exit(1);
        }
    }

    let image = bootrom::encode(body.words()).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1);
    });
    write_rom(&args.rom1, &image.rom1);
    write_rom(&args.rom2, &image.rom2);
}
