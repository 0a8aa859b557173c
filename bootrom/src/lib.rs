//! Encoder/decoder for the two boot ROMs on the M8317 module in a PDP-8A.
//!
//! Each of the 128 ROM entries spans two byte offsets on both chips: the
//! even offset holds the command bits (ROM1) and the data word's top
//! nibble (ROM2); the odd offset holds the middle nibble (ROM1) and the
//! low nibble (ROM2).

use std::fmt;

use tape::words::Word;

use thiserror::Error;

/// Bytes per ROM chip.
pub const ROM_BYTES: usize = 256;

/// ROM entries; each takes two byte offsets.
pub const SLOTS: usize = ROM_BYTES / 2;

/// Entries left for the program once the autostart preamble is written.
pub const PROGRAM_SLOTS: usize = SLOTS - AUTOSTART.len();

/// Command bits of one ROM entry, as stored in ROM1 at even offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Commands(u8);

impl Commands {
    pub const LOAD_ADDR: Commands = Commands(0x8);
    pub const LOAD_EXT: Commands = Commands(0x4);
    pub const DEPOSIT: Commands = Commands(0x2);
    pub const START: Commands = Commands(0x1);
    pub const NONE: Commands = Commands(0);

    pub const fn from_bits(bits: u8) -> Commands {
        Commands(bits & 0xf)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn with(self, other: Commands) -> Commands {
        Commands(self.0 | other.0)
    }

    pub const fn load_addr(self) -> bool {
        self.0 & Self::LOAD_ADDR.0 != 0
    }

    pub const fn load_ext(self) -> bool {
        self.0 & Self::LOAD_EXT.0 != 0
    }

    pub const fn deposit(self) -> bool {
        self.0 & Self::DEPOSIT.0 != 0
    }

    pub const fn start(self) -> bool {
        self.0 & Self::START.0 != 0
    }
}

impl fmt::Display for Commands {
    /// Fixed-width `AEDS` column, a space for each inactive command.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.load_addr() { 'A' } else { ' ' },
            if self.load_ext() { 'E' } else { ' ' },
            if self.deposit() { 'D' } else { ' ' },
            if self.start() { 'S' } else { ' ' },
        )
    }
}

/// One ROM entry: command bits plus a 12-bit data word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RomWord {
    pub cmd: Commands,
    pub data: u16,
}

/// Autostart preamble burned ahead of the program: a LoadAddress /
/// LoadExtension pair for each hardware start address.
const AUTOSTART: [RomWord; 8] = [
    RomWord { cmd: Commands::LOAD_ADDR, data: 0o0000 },
    RomWord { cmd: Commands::START.with(Commands::LOAD_EXT), data: 0o0000 },
    RomWord { cmd: Commands::LOAD_ADDR, data: 0o0200 },
    RomWord { cmd: Commands::START.with(Commands::LOAD_EXT), data: 0o0000 },
    RomWord { cmd: Commands::LOAD_ADDR, data: 0o2000 },
    RomWord { cmd: Commands::START.with(Commands::LOAD_EXT), data: 0o0000 },
    RomWord { cmd: Commands::LOAD_ADDR, data: 0o4200 },
    RomWord { cmd: Commands::START.with(Commands::LOAD_EXT), data: 0o0000 },
];

/// Address deposited in the final LoadAddress|Start entry.
const START_ADDR: u16 = 0o20;

/// The two chip images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    pub rom1: [u8; ROM_BYTES],
    pub rom2: [u8; ROM_BYTES],
}

impl Default for RomImage {
    fn default() -> Self {
        RomImage { rom1: [0; ROM_BYTES], rom2: [0; ROM_BYTES] }
    }
}

#[derive(Debug, Error)]
#[error("ROM {chip} image holds {got} bytes, expected exactly {ROM_BYTES}")]
pub struct ImageSizeError {
    pub chip: u8,
    pub got: usize,
}

impl RomImage {
    pub fn from_bytes(rom1: &[u8], rom2: &[u8]) -> Result<RomImage, ImageSizeError> {
        Ok(RomImage {
            rom1: rom1
                .try_into()
                .map_err(|_| ImageSizeError { chip: 1, got: rom1.len() })?,
            rom2: rom2
                .try_into()
                .map_err(|_| ImageSizeError { chip: 2, got: rom2.len() })?,
        })
    }

    fn set_slot(&mut self, slot: usize, entry: RomWord) {
        let even = slot * 2;
        self.rom1[even] = entry.cmd.bits();
        self.rom2[even] = ((entry.data >> 8) & 0xf) as u8;
        self.rom1[even + 1] = ((entry.data >> 4) & 0xf) as u8;
        self.rom2[even + 1] = (entry.data & 0xf) as u8;
    }

    /// Reassemble the entry at `slot`. Bytes are taken as found, so a
    /// foreign image with stray high bits reads back verbatim.
    pub fn slot(&self, slot: usize) -> RomWord {
        let even = slot * 2;
        let data = u16::from(self.rom2[even]) << 8
            | u16::from(self.rom1[even + 1]) << 4
            | u16::from(self.rom2[even + 1]);
        RomWord { cmd: Commands::from_bits(self.rom1[even]), data }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("empty word stream, nothing to burn")]
    Empty,

    #[error("program needs {0} ROM entries, only {PROGRAM_SLOTS} available")]
    TooLarge(usize),
}

/// Build the chip images for a bootstrap program.
///
/// The word stream is the checksum-free output of the BIN decoder. Every
/// origin word becomes a LoadAddress entry chased by a zero LoadExtension
/// (hardware bring-up sequencing); every data word becomes a Deposit.
/// Field words burn no entry. A LoadAddress|Start entry for the fixed
/// start address closes the program, and the remaining entries stay zero.
pub fn encode(words: &[Word]) -> Result<RomImage, EncodeError> {
    if words.is_empty() {
        return Err(EncodeError::Empty);
    }

    let mut entries = Vec::with_capacity(words.len() * 2 + 1);
    for &word in words {
        match word {
            Word::Origin(addr) => {
                entries.push(RomWord { cmd: Commands::LOAD_ADDR, data: addr });
                entries.push(RomWord { cmd: Commands::LOAD_EXT, data: 0 });
            }
            Word::Data(val) => entries.push(RomWord { cmd: Commands::DEPOSIT, data: val }),
            Word::Field(_) => {}
        }
    }
    entries.push(RomWord {
        cmd: Commands::LOAD_ADDR.with(Commands::START),
        data: START_ADDR,
    });

    if entries.len() > PROGRAM_SLOTS {
        return Err(EncodeError::TooLarge(entries.len()));
    }

    let mut image = RomImage::default();
    for (slot, &entry) in AUTOSTART.iter().chain(&entries).enumerate() {
        image.set_slot(slot, entry);
    }
    Ok(image)
}

/// One decoded ROM entry plus the machine state it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Byte offset of the entry's even half.
    pub offset: usize,
    pub cmd: Commands,
    pub data: u16,
    /// Field and address a Deposit writes, when Deposit is active.
    pub deposit: Option<(u8, u16)>,
}

/// Walk the whole image, tracking the address register (set by
/// LoadAddress, incremented after every Deposit) and the 3-bit field
/// register (set by LoadExtension).
pub fn decode(image: &RomImage) -> Vec<Slot> {
    let mut addr: u16 = 0;
    let mut field: u8 = 0;
    let mut out = Vec::with_capacity(SLOTS);
    for slot in 0..SLOTS {
        let RomWord { cmd, data } = image.slot(slot);
        if cmd.load_addr() {
            addr = data;
        }
        if cmd.load_ext() {
            field = (data & 0x7) as u8;
        }
        let deposit = if cmd.deposit() {
            let target = Some((field, addr));
            addr = addr.wrapping_add(1);
            target
        } else {
            None
        };
        out.push(Slot { offset: slot * 2, cmd, data, deposit });
    }
    out
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04x} {:04o} :{} ", self.offset, self.offset, self.cmd)?;
        match self.deposit {
            Some((field, addr)) => write!(f, "{field:1o}{addr:04o} ")?,
            None => write!(f, "      ")?,
        }
        write!(f, ": {:04o}", self.data)
    }
}
