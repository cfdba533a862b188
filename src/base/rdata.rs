//! Record data of unknown types.
//!
//! Record data of types this crate has no dedicated type for is kept as the
//! raw octets it arrived as, together with its record type. It is displayed
//! in the generic format of [RFC 3597] and composed back verbatim.
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

use super::buffer::Buffer;
use super::iana::Rtype;
use super::wire::ComposeError;
use bytes::Bytes;
use core::fmt;

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates generic record data from a bytes value contain the data.
    pub fn from_octets(
        rtype: Rtype,
        data: impl Into<Bytes>,
    ) -> Result<Self, ComposeError> {
        let data = data.into();
        if data.len() > 0xFFFF {
            Err(ComposeError::LongData)
        } else {
            Ok(UnknownRecordData { rtype, data })
        }
    }

    /// Returns the record type this data is for.
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Takes everything visible in `parser` as the data.
    pub fn parse(rtype: Rtype, parser: &mut Buffer) -> Self {
        let len = parser.remaining();
        let data = parser
            .read(len)
            .map(Bytes::copy_from_slice)
            .unwrap_or_default();
        UnknownRecordData { rtype, data }
    }

    pub fn compose(&self, target: &mut Buffer) {
        target.append(&self.data);
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        for ch in self.data.iter() {
            write!(f, " {:02x}", *ch)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generic_display() {
        let data =
            UnknownRecordData::from_octets(Rtype::from_int(65280), &b"\x01\xab"[..])
                .unwrap();
        assert_eq!(data.to_string(), "\\# 2 01 ab");
        assert_eq!(data.rtype(), Rtype::from_int(65280));
    }

    #[test]
    fn long_data() {
        assert_eq!(
            UnknownRecordData::from_octets(Rtype::NULL, vec![0; 0x10000]),
            Err(ComposeError::LongData)
        );
    }
}
