#![doc = r#"
Big-endian cursor over an in-memory NMF buffer.

The reader never allocates. Each read either returns the decoded value and
advances, or fails with [`ReaderErrorKind::OutOfBounds`] and leaves the
position where it was.
"#]

mod error;
pub use error::*;

/// A forward-only reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `data`
    pub const fn from_byte_slice(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The offset of the next byte to be read
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer
    pub const fn buffer_len(&self) -> usize {
        self.data.len()
    }

    /// Bytes left after the current position
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Read exactly `N` bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let end = self
            .position
            .checked_add(N)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| ReaderError::oob(self.position))?;

        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.data[self.position..end]);
        self.position = end;
        Ok(bytes)
    }

    /// Read a big-endian `u16`
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian `u32`
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }
}

#[test]
fn reads_big_endian() {
    use pretty_assertions::assert_eq;
    let bytes = [0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF];
    let mut reader = Reader::from_byte_slice(&bytes);

    assert_eq!(reader.read_u16().unwrap(), 0x1234);
    assert_eq!(reader.read_u32().unwrap(), 0xDEAD_BEEF);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn short_read_keeps_position() {
    use pretty_assertions::assert_eq;
    let bytes = [0x00, 0x01, 0x02];
    let mut reader = Reader::from_byte_slice(&bytes);

    assert_eq!(reader.read_u16().unwrap(), 1);
    let err = reader.read_u32().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);
    assert_eq!(reader.buffer_position(), 2);
}
