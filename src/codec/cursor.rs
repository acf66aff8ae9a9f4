/// A read position over an in-memory input buffer.
///
/// The cursor is owned by a single decode for its duration and is never
/// shared across concurrent decodes. All reads are bounds-checked; the
/// primitives report exhaustion with `None` and the caller maps that to
/// the appropriate `DecodeError` kind for its context.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    /// Current read offset from the start of the buffer.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Reads one byte, advancing the cursor.
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Reads exactly `len` bytes, advancing the cursor. Returns `None`
    /// without advancing if fewer than `len` bytes remain.
    pub fn read_slice(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.remaining() < len {
            return None;
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }
}
