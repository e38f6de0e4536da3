// SPDX-License-Identifier: Apache-2.0

//! Byte sources the tokenizer reads from.
//!
//! [`SliceSource`] walks an in-memory buffer. [`ReadSource`] pulls fixed-size
//! chunks from any [`std::io::Read`], so a document never has to be loaded
//! whole before tokenizing starts.

use std::io::{self, Read, Seek, SeekFrom};

/// Default chunk size for [`ReadSource`].
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// A forward-only byte input with one byte of lookahead.
pub trait Source {
    /// The next byte without consuming it. `None` at end of input.
    fn peek(&mut self) -> io::Result<Option<u8>>;

    /// Consume and return the next byte. `None` at end of input.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

/// A source that can go back to its first byte.
pub trait Rewind: Source {
    fn rewind(&mut self) -> io::Result<()>;
}

/// Reads from a byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Source for SliceSource<'_> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.data.get(self.pos).copied())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let b = self.data.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        Ok(b)
    }
}

impl Rewind for SliceSource<'_> {
    fn rewind(&mut self) -> io::Result<()> {
        self.pos = 0;
        Ok(())
    }
}

/// Reads from an [`io::Read`] in chunks.
///
/// `Interrupted` reads are retried; any other reader error is returned as-is.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    buffer: Box<[u8]>,
    pos: usize,
    len: usize,
    exhausted: bool,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// A chunk size of zero is treated as one.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0u8; chunk_size.max(1)].into_boxed_slice(),
            pos: 0,
            len: 0,
            exhausted: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> io::Result<()> {
        while self.pos >= self.len && !self.exhausted {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => self.exhausted = true,
                Ok(n) => {
                    log::trace!("ReadSource: read {n} bytes");
                    self.pos = 0;
                    self.len = n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        self.fill()?;
        Ok(self.buffer.get(self.pos).copied().filter(|_| self.pos < self.len))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let b = self.peek()?;
        if b.is_some() {
            self.pos += 1;
        }
        Ok(b)
    }
}

/// Seeks the reader back to stream offset zero.
impl<R: Read + Seek> Rewind for ReadSource<R> {
    fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.pos = 0;
        self.len = 0;
        self.exhausted = false;
        Ok(())
    }
}
