//! Buffered reader with byte-level peeking and offset tracking.
//!
//! Framing detection and array punctuation are handled by peeking into the
//! read buffer; only bytes that are actually consumed advance the cursor.
//! The JSON tokenizer then reads from the same buffer through [`Read`], so a
//! peeked byte is never lost between the two.

use std::io::{self, BufRead, BufReader, Read};

/// JSON insignificant whitespace plus form feed and vertical tab.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

pub(crate) struct FeedReader<R> {
    inner: BufReader<R>,
    /// Bytes handed out so far, either consumed or read
    offset: u64,
}

impl<R: Read> FeedReader<R> {
    pub(crate) fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity.max(1), reader),
            offset: 0,
        }
    }

    #[inline]
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn consume(&mut self, amount: usize) {
        self.inner.consume(amount);
        self.offset += amount as u64;
    }

    /// Consume whitespace and peek the first byte after it.
    pub(crate) fn skip_whitespace(&mut self) -> io::Result<Option<u8>> {
        loop {
            let (skipped, next) = match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let skipped = buf.iter().take_while(|&&b| is_space(b)).count();
                    (skipped, buf.get(skipped).copied())
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.consume(skipped);
            if next.is_some() {
                return Ok(next);
            }
        }
    }
}

impl<R: Read> Read for FeedReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(out)?;
        self.offset += n as u64;
        Ok(n)
    }
}
