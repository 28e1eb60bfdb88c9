//! The header at the front of every compressed stream.
//!
//! Layout, all integers little-endian:
//!
//! | field              | size                |
//! |--------------------|---------------------|
//! | `symbol_count`     | `u16`               |
//! | `symbol`, `freq`   | `u8`, `u64` (× n)   |
//! | `total_char_count` | `u64`               |
//!
//! Entries appear in ascending symbol order. The packed bit stream follows
//! immediately.

use std::io::{self, Read, Write};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Bytes taken by one `(symbol, freq)` entry.
const ENTRY_SIZE: usize = 1 + 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub frequencies: FrequencyTable,
    pub total: u64,
}

impl Header {
    pub fn new(frequencies: FrequencyTable) -> Self {
        let total = frequencies.total();
        Self { frequencies, total }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        2 + ENTRY_SIZE * self.frequencies.distinct() + 8
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let symbol_count = self.frequencies.distinct() as u16;
        out.write_all(&symbol_count.to_le_bytes())?;
        for (symbol, freq) in self.frequencies.iter() {
            out.write_all(&[symbol])?;
            out.write_all(&freq.to_le_bytes())?;
        }
        out.write_all(&self.total.to_le_bytes())?;
        debug!(
            "Header written: {} symbols, {} characters, {} bytes",
            symbol_count,
            self.total,
            self.size()
        );
        Ok(())
    }

    /// Reads and validates a header, leaving `input` positioned at the first
    /// byte of the bit stream.
    pub fn read_from<R: Read>(input: &mut R) -> Result<Self> {
        let symbol_count = u16::from_le_bytes(read_array(input)?);
        if symbol_count > 256 {
            return Err(Error::TooManySymbols(symbol_count));
        }
        debug!("Frequency entries to process: {}", symbol_count);

        let mut frequencies = FrequencyTable::new();
        let mut seen = [false; 256];
        let mut counted: u64 = 0;
        for _ in 0..symbol_count {
            let [symbol] = read_array(input)?;
            let freq = u64::from_le_bytes(read_array(input)?);
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(Error::DuplicateSymbol(symbol));
            }
            if freq == 0 {
                return Err(Error::ZeroFrequency(symbol));
            }
            trace!(
                "Decoded frequency entry: byte {:#04x} ('{}') with weight {}",
                symbol,
                (symbol as char).escape_default(),
                freq
            );
            frequencies.set(symbol, freq);
            counted = counted
                .checked_add(freq)
                .ok_or(Error::FrequencyOverflow(symbol))?;
        }

        let total = u64::from_le_bytes(read_array(input)?);
        if symbol_count == 0 && total != 0 {
            return Err(Error::EmptyAlphabet(total));
        }
        if counted != total {
            return Err(Error::FrequencyMismatch {
                declared: total,
                counted,
            });
        }

        debug!(
            "Reconstructed frequency map with {} unique symbols, {} characters",
            symbol_count, total
        );
        Ok(Self { frequencies, total })
    }
}

fn read_array<R: Read, const N: usize>(input: &mut R) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::TruncatedHeader,
        _ => Error::Io(e),
    })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn encoded(header: &Header) -> Vec<u8> {
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn layout_is_little_endian_fixed_width() {
        let header = Header::new(FrequencyTable::from_bytes(b"aaab"));
        let bytes = encoded(&header);

        let mut expected = vec![2, 0];
        expected.push(b'a');
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.push(b'b');
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.extend_from_slice(&4u64.to_le_bytes());

        assert_eq!(bytes, expected);
        assert_eq!(header.size(), bytes.len());
    }

    #[test]
    fn empty_header_is_ten_bytes() {
        let header = Header::new(FrequencyTable::new());
        let bytes = encoded(&header);
        assert_eq!(bytes, vec![0; 10]);
        assert_eq!(Header::read_from(&mut &bytes[..]).unwrap(), header);
    }

    #[test]
    fn read_stops_at_bit_stream() {
        let header = Header::new(FrequencyTable::from_bytes(&[0, 0, 255, 17]));
        let mut bytes = encoded(&header);
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let mut input = &bytes[..];
        let decoded = Header::read_from(&mut input).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.total, 4);
        assert_eq!(input, &[0xAA, 0xBB]);
    }

    #[test]
    fn every_truncation_is_reported() {
        let bytes = encoded(&Header::new(FrequencyTable::from_bytes(b"hello")));
        for len in 0..bytes.len() {
            let err = Header::read_from(&mut &bytes[..len]).unwrap_err();
            assert!(matches!(err, Error::TruncatedHeader), "len {len}: {err}");
        }
    }

    fn raw(count: u16, entries: &[(u8, u64)], total: u64) -> Vec<u8> {
        let mut bytes = count.to_le_bytes().to_vec();
        for &(symbol, freq) in entries {
            bytes.push(symbol);
            bytes.extend_from_slice(&freq.to_le_bytes());
        }
        bytes.extend_from_slice(&total.to_le_bytes());
        bytes
    }

    #[test_case(raw(257, &[], 0); "too many symbols")]
    #[test_case(raw(2, &[(1, 1), (1, 1)], 2); "duplicate symbol")]
    #[test_case(raw(2, &[(1, 1), (2, 1)], 5); "total exceeds frequencies")]
    #[test_case(raw(0, &[], 3); "characters without symbols")]
    #[test_case(raw(2, &[(b'a', 0), (b'b', 3)], 3); "zero frequency entry")]
    #[test_case(raw(2, &[(b'a', u64::MAX), (b'b', 1)], u64::MAX); "frequencies overflow")]
    fn malformed_headers_are_rejected(bytes: Vec<u8>) {
        let err = Header::read_from(&mut &bytes[..]).unwrap_err();
        assert!(err.is_format_error(), "{err}");
    }

    #[test]
    fn overflowing_frequencies_name_the_entry() {
        let bytes = raw(2, &[(b'a', u64::MAX), (b'b', 1)], u64::MAX);
        let err = Header::read_from(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, Error::FrequencyOverflow(b'b')), "{err}");
    }

    #[test]
    fn zero_frequency_is_rejected_before_payload() {
        let mut bytes = raw(2, &[(b'a', 0), (b'b', 3)], 3);
        bytes.push(0x00);
        let err = Header::read_from(&mut &bytes[..]).unwrap_err();
        assert!(matches!(err, Error::ZeroFrequency(b'a')), "{err}");
    }

    #[test]
    fn mismatch_reports_both_totals() {
        let bytes = raw(1, &[(b'x', 2)], 9);
        match Header::read_from(&mut &bytes[..]) {
            Err(Error::FrequencyMismatch { declared, counted }) => {
                assert_eq!((declared, counted), (9, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
