use std::process::exit;

use bootrom::RomImage;

use clap::Parser;

/// Parse the two boot ROMs on M8317 in a PDP-8A and dump their content
#[derive(Parser)]
struct Args {
    /// Boot ROM #1 file
    rom1: String,

    /// Boot ROM #2 file
    rom2: String,
}

fn read_rom(path: &str) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| {
        eprintln!("could not open file: {path}: {e}");
        exit(1);
    })
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let rom1 = read_rom(&args.rom1);
    let rom2 = read_rom(&args.rom2);
    let image = RomImage::from_bytes(&rom1, &rom2).unwrap_or_else(|e| {
        eprintln!("{e}");
        exit(1);
    });

    for slot in bootrom::decode(&image) {
        println!("{slot}");
    }
}
