//! The two top-level operations: compress a byte slice, expand a compressed
//! stream.

use std::io::{Read, Write};
use std::time::Instant;

use log::{debug, info};

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::header::Header;
use crate::huffman::{CodeTable, HuffmanTree, Node};

/// Outcome of [`encode`].
#[derive(Debug)]
pub struct EncodeSummary {
    pub frequencies: FrequencyTable,
    pub codes: CodeTable,
    pub header_bytes: u64,
    pub payload_bytes: u64,
}

impl EncodeSummary {
    pub fn input_bytes(&self) -> u64 {
        self.frequencies.total()
    }

    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }
}

/// Outcome of [`decode`].
#[derive(Debug)]
pub struct DecodeSummary {
    pub frequencies: FrequencyTable,
    /// Compressed bytes consumed, header included.
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// Compresses `input` into `output`: header first, then the packed codes of
/// every input byte in order.
pub fn encode<W: Write>(input: &[u8], mut output: W) -> Result<EncodeSummary> {
    let header = Header::new(FrequencyTable::from_bytes(input));
    header.write_to(&mut output)?;

    let codes = match HuffmanTree::from_frequencies(&header.frequencies) {
        Some(tree) => tree.code_table(),
        None => {
            debug!("Empty input, writing header only");
            CodeTable::new()
        }
    };

    let (mut output, payload_bytes) = write_payload(input, &codes, output)?;
    output.flush()?;

    info!(
        "Encoded {} bytes into {} header + {} payload bytes",
        input.len(),
        header.size(),
        payload_bytes
    );
    Ok(EncodeSummary {
        header_bytes: header.size() as u64,
        payload_bytes,
        frequencies: header.frequencies,
        codes,
    })
}

/// Packs the code of every byte of `input`, in order.
fn write_payload<W: Write>(input: &[u8], codes: &CodeTable, output: W) -> Result<(W, u64)> {
    debug!("Starting data encoding...");
    let mut writer = BitWriter::new(output);
    for &byte in input {
        let code = codes.get(byte).ok_or(Error::MissingCode(byte))?;
        writer.write_code(code)?;
    }
    Ok(writer.finish()?)
}

/// Expands a stream produced by [`encode`] into `output`.
///
/// Decoding stops once the number of characters declared in the header has
/// been produced; padding and anything after it is left unread.
pub fn decode<R: Read, W: Write>(mut input: R, mut output: W) -> Result<DecodeSummary> {
    let start_time = Instant::now();
    let header = Header::read_from(&mut input)?;
    let header_bytes = header.size() as u64;

    let Some(tree) = HuffmanTree::from_frequencies(&header.frequencies) else {
        debug!("Header declares no symbols, nothing to decode");
        output.flush()?;
        return Ok(DecodeSummary {
            frequencies: header.frequencies,
            input_bytes: header_bytes,
            output_bytes: 0,
        });
    };

    let root = tree.root();
    if let Node::Leaf { symbol, .. } = tree.node(root) {
        debug!(
            "Single-symbol alphabet, emitting {:#04x} {} times",
            symbol, header.total
        );
        write_repeated(&mut output, *symbol, header.total)?;
        output.flush()?;
        return Ok(DecodeSummary {
            frequencies: header.frequencies,
            input_bytes: header_bytes,
            output_bytes: header.total,
        });
    }

    debug!("Starting bitstream decoding...");
    let mut reader = BitReader::new(input);
    let mut current = root;
    let mut decoded: u64 = 0;
    while decoded < header.total {
        let Some(bit) = reader.read_bit()? else {
            return Err(Error::TruncatedStream {
                expected: header.total,
                decoded,
            });
        };
        if let Some(next) = tree.child(current, bit) {
            current = next;
        }
        if let Node::Leaf { symbol, .. } = tree.node(current) {
            output.write_all(&[*symbol])?;
            decoded += 1;
            current = root;
        }
    }
    output.flush()?;

    debug!(
        "Bitstream decoding finished in {:.2?}.",
        start_time.elapsed()
    );
    info!(
        "Decoded {} characters from {} compressed bytes",
        decoded,
        header_bytes + reader.bytes_read()
    );
    Ok(DecodeSummary {
        input_bytes: header_bytes + reader.bytes_read(),
        output_bytes: decoded,
        frequencies: header.frequencies,
    })
}

fn write_repeated<W: Write>(output: &mut W, symbol: u8, count: u64) -> Result<()> {
    let chunk = [symbol; 4096];
    let mut left = count;
    while left > 0 {
        let n = left.min(chunk.len() as u64) as usize;
        output.write_all(&chunk[..n])?;
        left -= n as u64;
    }
    Ok(())
}

/// [`encode`] into a fresh buffer.
pub fn encode_to_vec(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode(input, &mut out)?;
    Ok(out)
}

/// [`decode`] from an in-memory compressed stream.
pub fn decode_from_slice(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decode(compressed, &mut out)?;
    Ok(out)
}
