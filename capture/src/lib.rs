use std::io::{self, Write};

use serial::Transport;
use tape::bin::{BinBody, Checksum};
use tape::framing::{Framer, RecordBody, State};
use tape::rim::RimBody;
use tape::words::Word;

use clap::ValueEnum;
use log::info;

/// Tape capture format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Every byte as received, no framing.
    Raw,
    /// Framed copy of a RIM loader tape.
    Rim,
    /// Framed copy of a BIN loader tape, with checksum verification.
    Bin,
}

/// Result of one framed capture session.
#[derive(Debug)]
pub struct Capture {
    /// True if the trailer ran out cleanly; false if a read timeout cut
    /// the record short.
    pub complete: bool,

    /// Decoded words and checksum verdict, BIN only.
    pub summary: Option<BinSummary>,
}

#[derive(Debug)]
pub struct BinSummary {
    pub words: Vec<Word>,
    pub checksum: Option<Checksum>,
    pub truncated_pair: bool,
}

const READ_CHUNK: usize = 80;

/// Copy every received byte to the sink until the line goes silent.
/// With `strip`, a run of that byte value at the very start of the
/// stream is dropped.
pub fn capture_raw(
    transport: &mut impl Transport,
    sink: &mut impl Write,
    strip: Option<u8>,
) -> io::Result<()> {
    let mut seen_any = false;
    let mut stripping = strip.is_some();
    loop {
        let mut buf = [0u8; READ_CHUNK];
        let n = transport.recv(&mut buf)?;
        if n == 0 {
            if seen_any {
                return Ok(());
            }
            // No tape yet; keep waiting.
            continue;
        }
        seen_any = true;

        let mut chunk = &buf[..n];
        if stripping {
            let skip = chunk.iter().take_while(|&&b| Some(b) == strip).count();
            chunk = &chunk[skip..];
            if !chunk.is_empty() {
                stripping = false;
            }
        }
        sink.write_all(chunk)?;
    }
}

/// Capture one RIM record.
pub fn capture_rim(transport: &mut impl Transport, sink: &mut impl Write) -> io::Result<Capture> {
    let mut framer = Framer::new(RimBody);
    let complete = drive(transport, sink, &mut framer)?;
    Ok(Capture { complete, summary: None })
}

/// Capture one BIN record and decode it.
pub fn capture_bin(transport: &mut impl Transport, sink: &mut impl Write) -> io::Result<Capture> {
    let mut framer = Framer::new(BinBody::new());
    let complete = drive(transport, sink, &mut framer)?;
    let body = framer.into_body();
    let summary = BinSummary {
        checksum: body.checksum(),
        truncated_pair: body.truncated_pair(),
        words: body.into_words(),
    };
    Ok(Capture { complete, summary: Some(summary) })
}

/// Feed the framer until the record completes or the line goes silent.
/// Waits through any amount of silence while no byte has arrived yet.
fn drive<B: RecordBody>(
    transport: &mut impl Transport,
    sink: &mut impl Write,
    framer: &mut Framer<B>,
) -> io::Result<bool> {
    loop {
        let mut buf = [0u8; READ_CHUNK];
        let n = transport.recv(&mut buf)?;
        if n == 0 {
            match framer.state() {
                State::Idle => continue,
                State::Done => return Ok(true),
                _ => {
                    info!("read timeout before end of record");
                    return Ok(false);
                }
            }
        }

        for &b in &buf[..n] {
            framer.push(b);
        }
        sink.write_all(&framer.take_output())?;
        if framer.is_done() {
            return Ok(true);
        }
    }
}
