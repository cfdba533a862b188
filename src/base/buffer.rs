//! A byte buffer with a movable window.
//!
//! All encoding and decoding in this crate goes through a [`Buffer`]. It
//! owns a sequence of octets and keeps track of a read/write position, the
//! *offset*, and of how many octets are visible from that position, the
//! *remaining* length. The end of the visible window, the *logical end*,
//! may lie before the end of the physical data. This is used to stop record
//! data parsers from reading into the following record.
//!
//! Reading never fails loudly. Asking for more octets than are visible
//! results in `None` so that the caller can decide whether the short read
//! is fatal.

use super::wire::{Pack, Unpack};
use bytes::{Bytes, BytesMut};
use core::fmt;

//------------ Buffer --------------------------------------------------------

/// An owned octet sequence with a read/write window.
///
/// The buffer upholds two invariants at all times: the offset never exceeds
/// the length of the physical data and the remaining length never exceeds
/// the number of octets between the offset and the end of the physical
/// data.
#[derive(Clone, Default)]
pub struct Buffer {
    /// The physical data.
    data: BytesMut,

    /// The position of the next read or write.
    offset: usize,

    /// The number of octets visible from `offset`.
    remaining: usize,
}

/// # Creation
///
impl Buffer {
    /// Creates a new, empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer over a copy of `slice` with everything visible.
    pub fn from_slice(slice: &[u8]) -> Self {
        Self::from(BytesMut::from(slice))
    }

    /// Creates a buffer with only a part of `data` visible.
    ///
    /// The window starts at `offset` and spans `size` octets. Both are
    /// clamped to the available data.
    pub fn with_window(
        data: impl Into<BytesMut>,
        offset: usize,
        size: usize,
    ) -> Self {
        let data = data.into();
        let offset = offset.min(data.len());
        let remaining = size.min(data.len() - offset);
        Buffer {
            data,
            offset,
            remaining,
        }
    }

    /// Returns an independent cursor restricted to `size` octets at `offset`.
    ///
    /// The new buffer shares the positions of `self`, so offsets read from
    /// the data, such as compression pointers, stay valid. Nothing past the
    /// end of the window is copied, which makes it impossible for the new
    /// cursor to ever see those octets.
    pub fn scoped(&self, offset: usize, size: usize) -> Self {
        let end = offset.saturating_add(size).min(self.data.len());
        Buffer::with_window(&self.data[..end], offset, size)
    }
}

/// # Accessing the Window
///
impl Buffer {
    /// Returns the position of the next read or write.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of octets visible from the current offset.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns the length of the physical data.
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the offset has reached the end of the physical data.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Returns the visible octets.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.offset..self.offset + self.remaining]
    }

    /// Returns all of the physical data, ignoring the window.
    pub fn as_full_slice(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Converts the buffer into all of its physical data.
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }

    /// Returns the logical end of the window.
    fn end(&self) -> usize {
        self.offset + self.remaining
    }
}

/// # Reading
///
impl Buffer {
    /// Takes the next `len` octets and advances past them.
    ///
    /// Returns `None` without moving if fewer than `len` octets are visible.
    pub fn read(&mut self, len: usize) -> Option<&[u8]> {
        if len > self.remaining {
            return None;
        }
        let start = self.offset;
        self.advance(len as isize);
        Some(&self.data[start..start + len])
    }

    /// Takes a fixed-size value from the window and advances past it.
    ///
    /// This is all or nothing: if the window is shorter than the complete
    /// value, `None` is returned and the offset does not move. Multiple
    /// fields can be taken at once by asking for a tuple.
    pub fn unpack<T: Unpack>(&mut self) -> Option<T> {
        if T::UNPACK_LEN > self.remaining {
            return None;
        }
        let res = T::unpack(&self.data[self.offset..]);
        self.advance(T::UNPACK_LEN as isize);
        Some(res)
    }
}

/// # Writing
///
impl Buffer {
    /// Inserts `slice` at the current offset and advances past it.
    ///
    /// The octets that followed the offset move back. The number of visible
    /// octets after the insertion stays the same.
    pub fn write(&mut self, slice: &[u8]) {
        let tail = self.data.split_off(self.offset);
        self.data.extend_from_slice(slice);
        self.data.extend_from_slice(&tail);
        self.offset += slice.len();
    }

    /// Appends `slice` to the end of the physical data.
    ///
    /// The window grows to include the new octets.
    pub fn append(&mut self, slice: &[u8]) -> &mut Self {
        self.data.extend_from_slice(slice);
        self.remaining = self.data.len() - self.offset;
        self
    }

    /// Appends the wire format of a fixed-size value.
    pub fn pack<T: Pack>(&mut self, value: T) -> &mut Self {
        self.data.reserve(T::PACK_LEN);
        value.pack(&mut self.data);
        self.remaining = self.data.len() - self.offset;
        self
    }
}

/// # Moving the Window
///
impl Buffer {
    /// Moves the offset forward by `len` octets.
    ///
    /// A negative value moves backwards instead. The offset stops at the end
    /// of the physical data. The logical end stays where it was unless the
    /// offset moved past it.
    pub fn advance(&mut self, len: isize) -> &mut Self {
        if len < 0 {
            self.move_back(len.unsigned_abs())
        } else {
            self.move_forward(len.unsigned_abs())
        }
    }

    /// Moves the offset backward by `len` octets.
    ///
    /// A negative value moves forward instead. The offset stops at zero. The
    /// logical end stays where it was.
    pub fn rewind(&mut self, len: isize) -> &mut Self {
        if len < 0 {
            self.move_forward(len.unsigned_abs())
        } else {
            self.move_back(len.unsigned_abs())
        }
    }

    fn move_forward(&mut self, len: usize) -> &mut Self {
        let end = self.end();
        self.offset = self.offset.saturating_add(len).min(self.data.len());
        self.remaining = end
            .saturating_sub(self.offset)
            .min(self.data.len() - self.offset);
        self
    }

    fn move_back(&mut self, len: usize) -> &mut Self {
        let end = self.end();
        self.offset = self.offset.saturating_sub(len);
        self.remaining = end - self.offset;
        self
    }

    /// Moves the offset back to the start of the physical data.
    pub fn rewind_all(&mut self) -> &mut Self {
        self.remaining += self.offset;
        self.offset = 0;
        self
    }

    /// Runs `op` and restores the window afterwards.
    pub fn restore_state<R>(&mut self, op: impl FnOnce(&mut Self) -> R) -> R {
        let (offset, remaining) = (self.offset, self.remaining);
        let res = op(self);
        self.offset = offset.min(self.data.len());
        self.remaining = remaining.min(self.data.len() - self.offset);
        res
    }
}

//--- From

impl From<BytesMut> for Buffer {
    fn from(data: BytesMut) -> Self {
        let remaining = data.len();
        Buffer {
            data,
            offset: 0,
            remaining,
        }
    }
}

impl From<Bytes> for Buffer {
    fn from(data: Bytes) -> Self {
        Self::from(BytesMut::from(data.as_ref()))
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from(BytesMut::from(data.as_slice()))
    }
}

impl<'a> From<&'a [u8]> for Buffer {
    fn from(data: &'a [u8]) -> Self {
        Self::from_slice(data)
    }
}

//--- Debug

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Buffer [")?;
        for (i, octet) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", octet)?;
        }
        f.write_str("]")
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    fn assert_invariants(buf: &Buffer) {
        assert!(buf.offset() <= buf.total_len());
        assert!(buf.remaining() <= buf.total_len() - buf.offset());
    }

    #[test]
    fn default_state() {
        let mut buf = Buffer::new();
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.remaining(), 0);
        assert_eq!(buf.as_slice(), b"");
        assert!(buf.is_empty());
        assert_eq!(format!("{:?}", buf), "Buffer []");
        assert!(buf.read(1).is_none());
    }

    #[test]
    fn window() {
        let buf = Buffer::with_window(b"example".as_ref(), 1, 3);
        let copy = buf.clone();
        assert_eq!(copy.offset(), 1);
        assert_eq!(copy.remaining(), 3);
        assert_eq!(copy.as_slice(), b"xam");

        let buf = Buffer::with_window(ALPHABET, 5, 10);
        assert_eq!(buf.offset(), 5);
        assert_eq!(buf.remaining(), 10);
        assert_eq!(buf.as_slice(), &ALPHABET[5..15]);

        let buf = Buffer::with_window(ALPHABET, 20, 10);
        assert_eq!(buf.offset(), 20);
        assert_eq!(buf.remaining(), 6);
        assert_eq!(buf.as_slice(), &ALPHABET[20..]);

        let buf = Buffer::with_window(ALPHABET, 40, 10);
        assert_eq!(buf.offset(), 26);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn read_and_rewind() {
        let mut buf = Buffer::from_slice(ALPHABET);
        assert_eq!(buf.remaining(), 26);

        assert_eq!(buf.read(5), Some(b"ABCDE".as_ref()));
        assert_eq!(buf.remaining(), 21);
        assert_eq!(buf.read(1), Some(b"F".as_ref()));
        assert_eq!(buf.read(3), Some(b"GHI".as_ref()));
        assert_eq!(buf.remaining(), 17);

        buf.rewind(4);
        assert_eq!(buf.remaining(), 21);
        assert_eq!(buf.read(5), Some(b"FGHIJ".as_ref()));
        assert_eq!(buf.remaining(), 16);

        buf.rewind_all();
        assert_eq!(buf.remaining(), 26);
        assert_eq!(buf.read(5), Some(b"ABCDE".as_ref()));

        buf.advance(-1);
        assert_eq!(buf.remaining(), 22);
        assert_eq!(buf.read(5), Some(b"EFGHI".as_ref()));
        assert_eq!(buf.remaining(), 17);

        buf.rewind(-1);
        assert_eq!(buf.remaining(), 16);
        assert_eq!(buf.read(3), Some(b"KLM".as_ref()));
        assert_eq!(buf.remaining(), 13);

        buf.rewind(99);
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.remaining(), 26);

        buf.rewind(-99);
        assert_eq!(buf.offset(), 26);
        assert_eq!(buf.remaining(), 0);

        buf.rewind(99);
        assert_eq!(buf.remaining(), 26);
    }

    #[test]
    fn read_respects_window() {
        let mut buf = Buffer::with_window(ALPHABET, 2, 4);
        assert!(buf.read(5).is_none());
        assert_eq!(buf.offset(), 2);
        assert_eq!(buf.read(2), Some(b"CD".as_ref()));
        assert_eq!(buf.remaining(), 2);
        assert_eq!(buf.read(2), Some(b"EF".as_ref()));
        assert!(buf.read(1).is_none());
    }

    #[test]
    fn write_and_append() {
        let mut buf = Buffer::from_slice(b"ABCDEF");
        buf.write(b"XY");
        buf.write(b"Z");
        assert_eq!(buf.as_slice(), b"ABCDEF");

        buf.advance(2);
        buf.write(&b"QRST"[..1]);
        buf.rewind_all();
        assert_eq!(buf.as_slice(), b"XYZABQCDEF");

        buf.advance(2);
        assert_eq!(buf.as_slice(), b"ZABQCDEF");

        buf.append(b"RST");
        assert_eq!(buf.as_slice(), b"ZABQCDEFRST");
    }

    #[test]
    fn unpack() {
        let mut buf = Buffer::from_slice(&[127, 0, 0, 255]);
        assert_eq!(buf.unpack::<(u8, u8, u8, u8)>(), Some((127, 0, 0, 255)));
        assert_eq!(buf.offset(), 4);
        assert_eq!(buf.remaining(), 0);

        buf.rewind_all();
        assert_eq!(buf.unpack::<u32>(), Some(127 << 24 | 255));
    }

    #[test]
    fn unpack_exhausted_buffer() {
        let mut buf = Buffer::from_slice(&[127, 0, 0]);
        assert_eq!(buf.unpack::<(u8, u8, u8, u8)>(), None);
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.unpack::<(u8, u8, u8)>(), Some((127, 0, 0)));
        assert_eq!(buf.offset(), 3);
        assert_eq!(buf.remaining(), 0);

        buf.rewind_all();
        assert_eq!(buf.unpack::<u32>(), None);
    }

    #[test]
    fn pack() {
        let mut buf = Buffer::new();
        buf.pack((127u8, 0u8, 0u8, 255u8));
        buf.pack((1u8, 2u8, 3u8, 4u8));
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.remaining(), 8);

        assert_eq!(buf.unpack::<(u8, u8, u8, u8)>(), Some((127, 0, 0, 255)));
        assert_eq!(buf.remaining(), 4);
        assert_eq!(buf.unpack::<(u8, u8, u8, u8)>(), Some((1, 2, 3, 4)));
        assert_eq!(buf.offset(), 8);
        assert_eq!(buf.unpack::<u32>(), None);

        buf.rewind(4);
        assert_eq!(buf.unpack::<u32>(), Some(0x01020304));
        buf.rewind(8);
        assert_eq!(buf.unpack::<u32>(), Some(127 << 24 | 255));
        assert_eq!(buf.unpack::<u8>(), Some(1));
        assert_eq!(buf.unpack::<u8>(), Some(2));
    }

    #[test]
    fn scoped_cursor_is_bounded() {
        let buf = Buffer::from_slice(ALPHABET);
        let mut scoped = buf.scoped(3, 4);
        assert_eq!(scoped.offset(), 3);
        assert_eq!(scoped.as_slice(), b"DEFG");
        assert!(scoped.read(5).is_none());
        scoped.advance(10);
        assert_eq!(scoped.offset(), 7);
        assert_eq!(scoped.remaining(), 0);
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.remaining(), 26);
    }

    #[test]
    fn movement_keeps_invariants() {
        let mut buf = Buffer::with_window(ALPHABET, 3, 12);
        let moves: &[isize] =
            &[5, -2, 40, -7, -100, 13, 0, 26, -26, 1, isize::MIN, isize::MAX];
        for &step in moves {
            buf.advance(step);
            assert_invariants(&buf);
            buf.rewind(step / 2);
            assert_invariants(&buf);
            let _ = buf.read(3);
            assert_invariants(&buf);
            buf.write(b"!");
            assert_invariants(&buf);
        }
    }

    #[test]
    fn extreme_moves_are_clamped() {
        let mut buf = Buffer::from_slice(b"abc");
        buf.advance(2).advance(isize::MIN);
        assert_eq!(buf.offset(), 0);
        assert_eq!(buf.remaining(), 3);
        buf.rewind(isize::MIN);
        assert_eq!(buf.offset(), 3);
        assert_eq!(buf.remaining(), 0);
        buf.rewind(isize::MAX);
        assert_eq!(buf.offset(), 0);
        buf.advance(isize::MAX);
        assert_eq!(buf.offset(), 3);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn restore_state() {
        let mut buf = Buffer::from_slice(ALPHABET);
        buf.advance(4);
        let read = buf.restore_state(|buf| {
            buf.rewind_all();
            buf.read(2).map(<[u8]>::to_vec)
        });
        assert_eq!(read, Some(b"AB".to_vec()));
        assert_eq!(buf.offset(), 4);
        assert_eq!(buf.remaining(), 22);
    }
}
