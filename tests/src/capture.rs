#[cfg(test)]
mod tests {
    use capture_lib::{capture_bin, capture_rim};
    use serial::PipeTransport;
    use tape::bin::Checksum;
    use tape::words::Word;

    // A healthy BIN loader tape: lead-in, origin 0200, two data words,
    // checksum pair, end-of-body sentinel, trailer.
    const BIN_TAPE: &[u8] = &[
        0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, // lead-in
        0x42, 0x00, // A 0200
        0x0a, 0x1c, // D 1234
        0x2e, 0x38, // D 5670
        0x03, 0x0e, // checksum 0o316
        0x80, // end of body
        0x80, 0x80, // trailer
    ];

    #[test]
    fn bin_capture_end_to_end() {
        let mut pipe = PipeTransport::new();
        // Silence, then line noise just ahead of the tape.
        pipe.push_timeout();
        pipe.push_chunk(&[0x13, 0x37]);
        // The record arrives split across reads, trailed by junk that
        // terminates the trailer run.
        pipe.push_chunk(&BIN_TAPE[..11]);
        pipe.push_chunk(&BIN_TAPE[11..]);
        pipe.push_chunk(&[0x55]);

        let mut out = Vec::new();
        let capture = capture_bin(&mut pipe, &mut out).unwrap();
        assert!(capture.complete);

        // The noise burst is discarded; the record is copied verbatim.
        assert_eq!(out, BIN_TAPE);

        let summary = capture.summary.unwrap();
        assert_eq!(summary.checksum, Some(Checksum::Ok(0o316)));
        assert!(!summary.truncated_pair);
        assert_eq!(
            summary.words,
            [Word::Origin(0o200), Word::Data(0o1234), Word::Data(0o5670)],
        );
    }

    #[test]
    fn rim_capture_is_identity_on_record() {
        let record: &[u8] = &[
            0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, // lead-in
            0x41, 0x05, 0x3f, 0x22, // body, copied untouched
            0x80, // end of body
            0x80, // trailer
        ];
        let mut pipe = PipeTransport::new();
        pipe.push_chunk(record);
        pipe.push_chunk(&[0x00]); // terminator, discarded

        let mut out = Vec::new();
        let capture = capture_rim(&mut pipe, &mut out).unwrap();
        assert!(capture.complete);
        assert!(capture.summary.is_none());
        assert_eq!(out, record);
    }

    #[test]
    fn silence_before_tape_is_harmless() {
        let mut pipe = PipeTransport::new();
        for _ in 0..5 {
            pipe.push_timeout();
        }
        pipe.push_chunk(BIN_TAPE);
        pipe.push_chunk(&[0x55]);

        let mut out = Vec::new();
        let capture = capture_bin(&mut pipe, &mut out).unwrap();
        assert!(capture.complete);
        assert_eq!(out, BIN_TAPE);
    }

    #[test]
    fn timeout_mid_record_is_incomplete() {
        let mut pipe = PipeTransport::new();
        pipe.push_chunk(&BIN_TAPE[..12]);
        // The line goes dead mid-record.

        let mut out = Vec::new();
        let capture = capture_bin(&mut pipe, &mut out).unwrap();
        assert!(!capture.complete);

        // What was framed so far was still delivered downstream.
        assert_eq!(out, &BIN_TAPE[..12]);
        let summary = capture.summary.unwrap();
        assert_eq!(summary.checksum, None);
        assert_eq!(summary.words, [Word::Origin(0o200), Word::Data(0o1234)]);
    }

    #[test]
    fn timeout_during_lead_in_is_incomplete() {
        let mut pipe = PipeTransport::new();
        pipe.push_chunk(&[0x80, 0x80, 0x80]);

        let mut out = Vec::new();
        let capture = capture_rim(&mut pipe, &mut out).unwrap();
        assert!(!capture.complete);
        assert!(out.is_empty());
    }
}
