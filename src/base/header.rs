//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of records in each of the four sections that follow the
//! header. Its content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! This module only deals with the first four octets, the message ID and
//! the flags. The section counts are always derived from the sections of a
//! [`Message`] when composing and only needed transiently when parsing.
//!
//! [`Message`]: super::message::Message
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use core::fmt;

//------------ Header --------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. It
/// keeps those four octets in wire format, i.e., in network byte order. The
/// type provides methods to access the individual fields.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Header {
    inner: [u8; 4],
}

/// # Creation and Conversion
///
impl Header {
    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header from the message ID and the flags word.
    #[must_use]
    pub fn from_id_and_flags(id: u16, flags: u16) -> Self {
        let mut inner = [0; 4];
        inner[..2].copy_from_slice(&id.to_be_bytes());
        inner[2..].copy_from_slice(&flags.to_be_bytes());
        Header { inner }
    }

    /// Returns the flags word, everything in the header but the ID.
    pub fn flags_word(self) -> u16 {
        u16::from_be_bytes([self.inner[2], self.inner[3]])
    }

    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        u16::from_be_bytes([self.inner[0], self.inner[1]])
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.inner[..2].copy_from_slice(&value.to_be_bytes())
    }

    /// Sets the value of the ID field to a randomly chosen number.
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns whether the QR bit is set.
    ///
    /// The bit is set in responses and cleared in queries.
    pub fn qr(self) -> bool {
        self.get_bit(2, 7)
    }

    /// Sets the value of the QR bit.
    pub fn set_qr(&mut self, set: bool) {
        self.set_bit(2, 7, set)
    }

    /// Returns the value of the Opcode field.
    ///
    /// This field specifies the kind of query a message contains. Normal
    /// queries have [`Opcode::QUERY`] which is also the default value when
    /// creating a new header.
    pub fn opcode(self) -> Opcode {
        Opcode::from_int((self.inner[2] >> 3) & 0x0F)
    }

    /// Sets the value of the opcode field.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.inner[2] = self.inner[2] & 0x87 | ((opcode.to_int() & 0x0F) << 3);
    }

    /// Returns whether the AA bit is set.
    ///
    /// Using this bit, a name server generating a response states whether
    /// it is authoritative for the requested domain name.
    pub fn aa(self) -> bool {
        self.get_bit(2, 2)
    }

    /// Sets the value of the AA bit.
    pub fn set_aa(&mut self, set: bool) {
        self.set_bit(2, 2, set)
    }

    /// Returns whether the TC bit is set.
    ///
    /// The *truncation* bit is set if there was more data available than
    /// fit into the message.
    pub fn tc(self) -> bool {
        self.get_bit(2, 1)
    }

    /// Sets the value of the TC bit.
    pub fn set_tc(&mut self, set: bool) {
        self.set_bit(2, 1, set)
    }

    /// Returns whether the RD bit is set.
    ///
    /// The *recursion desired* bit asks a server to resolve the query
    /// recursively on our behalf.
    pub fn rd(self) -> bool {
        self.get_bit(2, 0)
    }

    /// Sets the value of the RD bit.
    pub fn set_rd(&mut self, set: bool) {
        self.set_bit(2, 0, set)
    }

    /// Returns whether the RA bit is set.
    ///
    /// In a response, the *recursion available* bit denotes whether the
    /// responding name server supports recursion.
    pub fn ra(self) -> bool {
        self.get_bit(3, 7)
    }

    /// Sets the value of the RA bit.
    pub fn set_ra(&mut self, set: bool) {
        self.set_bit(3, 7, set)
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query.
    pub fn rcode(self) -> Rcode {
        Rcode::from_int(self.inner[3] & 0x0F)
    }

    /// Sets the value of the RCODE field.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.inner[3] = self.inner[3] & 0xF0 | (rcode.to_int() & 0x0F);
    }

    //--- Internal helpers

    /// Returns the value of the bit at the given position.
    ///
    /// The argument `offset` gives the byte offset of the underlying bytes
    /// slice and `bit` gives the number of the bit with the most significant
    /// bit being 7.
    fn get_bit(self, offset: usize, bit: usize) -> bool {
        self.inner[offset] & (1 << bit) != 0
    }

    /// Sets or resets the given bit.
    fn set_bit(&mut self, offset: usize, bit: usize, set: bool) {
        if set {
            self.inner[offset] |= 1 << bit
        } else {
            self.inner[offset] &= !(1 << bit)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Header {
    /// Formats the flags that are set, separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flags = [
            (self.qr(), "qr"),
            (self.aa(), "aa"),
            (self.tc(), "tc"),
            (self.rd(), "rd"),
            (self.ra(), "ra"),
        ];
        let mut sep = "";
        for (_, name) in flags.iter().filter(|(set, _)| *set) {
            write!(f, "{sep}{name}")?;
            sep = " ";
        }
        Ok(())
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Header")
            .field("id", &self.id())
            .field("qr", &self.qr())
            .field("opcode", &self.opcode())
            .field("aa", &self.aa())
            .field("tc", &self.tc())
            .field("rd", &self.rd())
            .field("ra", &self.ra())
            .field("rcode", &self.rcode())
            .finish()
    }
}

//--- Serialize

#[cfg(feature = "serde")]
impl serde::Serialize for Header {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Header", 8)?;
        state.serialize_field("id", &self.id())?;
        state.serialize_field("qr", &self.qr())?;
        state.serialize_field("opcode", &self.opcode())?;
        state.serialize_field("aa", &self.aa())?;
        state.serialize_field("tc", &self.tc())?;
        state.serialize_field("rd", &self.rd())?;
        state.serialize_field("ra", &self.ra())?;
        state.serialize_field("rcode", &self.rcode())?;
        state.end()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flag_bits() {
        macro_rules! test_field {
            ($get:ident, $set:ident, $default:expr, $($value:expr),*) => {
                $({
                    let mut h = Header::new();
                    assert_eq!(h.$get(), $default);
                    h.$set($value);
                    assert_eq!(h.$get(), $value);
                })*
            }
        }

        test_field!(id, set_id, 0, 0x1234);
        test_field!(qr, set_qr, false, true, false);
        test_field!(opcode, set_opcode, Opcode::QUERY, Opcode::STATUS);
        test_field!(aa, set_aa, false, true, false);
        test_field!(tc, set_tc, false, true, false);
        test_field!(rd, set_rd, false, true, false);
        test_field!(ra, set_ra, false, true, false);
        test_field!(rcode, set_rcode, Rcode::NOERROR, Rcode::REFUSED);
    }

    #[test]
    fn flags_word_layout() {
        let mut h = Header::new();
        h.set_qr(true);
        h.set_opcode(Opcode::STATUS);
        h.set_aa(true);
        h.set_rd(true);
        h.set_ra(true);
        h.set_rcode(Rcode::NXDOMAIN);
        assert_eq!(h.flags_word(), 0x8000 | 0x1000 | 0x0400 | 0x0100 | 0x0080 | 3);

        let h = Header::from_id_and_flags(7, 0x7800);
        assert_eq!(h.id(), 7);
        assert_eq!(h.opcode(), Opcode::from_int(15));
        assert!(!h.qr());
    }

    #[test]
    fn display_flags() {
        let mut h = Header::new();
        assert_eq!(h.to_string(), "");
        h.set_qr(true);
        h.set_rd(true);
        h.set_ra(true);
        assert_eq!(h.to_string(), "qr rd ra");
    }
}
