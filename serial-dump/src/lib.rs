use std::io::{self, Write};

/// Bytes per hexdump row.
const ROW: usize = 16;

/// Incremental hexdump printer:
///
/// ```text
/// 00000000  71 71 71 71 71 71 71 71  71 71 71 71 71 71 71 71  |qqqqqqqqqqqqqqqq|
/// ```
#[derive(Debug, Default)]
pub struct HexDump {
    count: usize,
    row: [u8; ROW],
}

impl HexDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8, out: &mut impl Write) -> io::Result<()> {
        let col = self.count % ROW;
        if col == 0 {
            write!(out, "{:08x}  ", self.count)?;
        }
        self.row[col] = byte;
        write!(out, "{byte:02x} ")?;
        if col == ROW / 2 - 1 {
            write!(out, " ")?;
        }
        if col == ROW - 1 {
            writeln!(out, " |{}|", ascii(&self.row))?;
        }
        self.count += 1;
        Ok(())
    }

    /// Pad and close a partial final row.
    pub fn finish(&mut self, out: &mut impl Write) -> io::Result<()> {
        let col = self.count % ROW;
        if col == 0 {
            return Ok(());
        }
        let mut pad = (ROW - col) * 3;
        if col <= ROW / 2 {
            pad += 1;
        }
        for _ in 0..pad {
            write!(out, " ")?;
        }
        writeln!(out, " |{}|", ascii(&self.row[..col]))
    }
}

fn ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect()
}
