#[cfg(test)]
mod tests {
    use bootrom::{decode, encode, Commands};
    use capture_lib::capture_bin;
    use serial::PipeTransport;
    use tape::bin::Checksum;

    /// Capture a BIN tape off the line, burn the boot ROMs, and read them
    /// back: the program must come out at the right field/address with the
    /// right values.
    #[test]
    fn tape_to_rom_and_back() {
        let tape: &[u8] = &[
            0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, // lead-in
            0x42, 0x00, // A 0200
            0x0a, 0x1c, // D 1234
            0x2e, 0x38, // D 5670
            0x03, 0x0e, // checksum 0o316
            0x80, // end of body
            0x80, 0x80, // trailer
        ];
        let mut pipe = PipeTransport::new();
        pipe.push_chunk(tape);
        pipe.push_chunk(&[0x00]);

        let mut framed = Vec::new();
        let capture = capture_bin(&mut pipe, &mut framed).unwrap();
        let summary = capture.summary.unwrap();
        assert_eq!(summary.checksum, Some(Checksum::Ok(0o316)));

        let image = encode(&summary.words).unwrap();
        let slots = decode(&image);

        let deposits: Vec<_> = slots
            .iter()
            .filter(|s| s.cmd.deposit())
            .map(|s| (s.deposit.unwrap(), s.data))
            .collect();
        assert_eq!(deposits, [((0, 0o200), 0o1234), ((0, 0o201), 0o5670)]);

        // The program is closed by the start entry at the fixed address.
        let start = slots.iter().find(|s| s.cmd.start() && s.cmd.load_addr()).unwrap();
        assert_eq!(start.data, 0o20);
    }

    /// The autostart preamble is fixed: LoadAddress/LoadExtension pairs
    /// for 0000, 0200, 2000 and 4200 ahead of any program.
    #[test]
    fn autostart_preamble() {
        let image = encode(&[tape::words::Word::Data(0o7000)]).unwrap();
        let slots = decode(&image);

        let expected = [
            (Commands::LOAD_ADDR, 0o0000),
            (Commands::START.with(Commands::LOAD_EXT), 0o0000),
            (Commands::LOAD_ADDR, 0o0200),
            (Commands::START.with(Commands::LOAD_EXT), 0o0000),
            (Commands::LOAD_ADDR, 0o2000),
            (Commands::START.with(Commands::LOAD_EXT), 0o0000),
            (Commands::LOAD_ADDR, 0o4200),
            (Commands::START.with(Commands::LOAD_EXT), 0o0000),
        ];
        for (slot, &(cmd, data)) in slots.iter().zip(&expected) {
            assert_eq!(slot.cmd, cmd);
            assert_eq!(slot.data, data);
        }
    }

    /// A corrupted tape still yields its words and the ROM tooling still
    /// runs; only the verdict changes.
    #[test]
    fn corrupt_tape_still_burns() {
        let mut tape = vec![
            0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x42, 0x00, 0x0a, 0x1c, 0x2e, 0x38,
            0x03, 0x0e, 0x80, 0x80,
        ];
        tape[10] ^= 0x20;

        let mut pipe = PipeTransport::new();
        pipe.push_chunk(&tape);
        pipe.push_chunk(&[0x00]);

        let mut framed = Vec::new();
        let capture = capture_bin(&mut pipe, &mut framed).unwrap();
        let summary = capture.summary.unwrap();
        assert!(matches!(summary.checksum, Some(Checksum::Fail { .. })));
        assert_eq!(summary.words.len(), 3);
        assert!(encode(&summary.words).is_ok());
    }
}
