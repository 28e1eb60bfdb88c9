//! Bit-level I/O for the packed code stream.
//!
//! Both directions use the same order: the first bit of every byte is the one
//! worth 2^0. A trailing partial byte is padded with zero bits.

use std::io::{self, Read, Write};

use crate::huffman::Code;

/// Packs bits into bytes and hands each completed byte to the sink. Wrap
/// unbuffered sinks in a `BufWriter`.
pub struct BitWriter<W> {
    sink: W,
    /// Pending bits, the oldest at bit 0.
    queue: u8,
    /// Count of valid bits in the queue.
    q_bits: u8,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            queue: 0,
            q_bits: 0,
            bytes_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            self.queue |= 1 << self.q_bits;
        }
        self.q_bits += 1;
        if self.q_bits == 8 {
            self.push_byte()?;
        }
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for &bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    fn push_byte(&mut self) -> io::Result<()> {
        self.sink.write_all(&[self.queue])?;
        self.bytes_written += 1;
        self.queue = 0;
        self.q_bits = 0;
        Ok(())
    }

    /// Pads and writes any partial byte, then returns the sink and the number
    /// of bytes written through this writer.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        if self.q_bits > 0 {
            self.push_byte()?;
        }
        Ok((self.sink, self.bytes_written))
    }
}

/// Unpacks a byte source into single bits.
#[derive(Debug)]
pub struct BitReader<R> {
    source: R,
    current: u8,
    /// Bits of `current` not yet returned.
    remaining: u8,
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            current: 0,
            remaining: 0,
            bytes_read: 0,
        }
    }

    /// Next bit, or `None` once the source is exhausted.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.remaining == 0 {
            let mut byte = [0u8; 1];
            match self.source.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e),
            }
            self.current = byte[0];
            self.remaining = 8;
            self.bytes_read += 1;
        }
        let bit = self.current & 1 == 1;
        self.current >>= 1;
        self.remaining -= 1;
        Ok(Some(bit))
    }

    /// Number of whole bytes pulled from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
