//! Record data for the NULL record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::buffer::Buffer;
use crate::base::iana::Rtype;
use crate::base::wire::ComposeError;
use bytes::Bytes;
use core::fmt;

//------------ Null ---------------------------------------------------------

/// Null record data.
///
/// Null records can contain whatever data. They are experimental and not
/// allowed in zone files.
///
/// The Null record type is defined in [RFC 1035, section 3.3.10][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.10
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Null {
    data: Bytes,
}

impl Null {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NULL;

    /// Creates new Null record data from the given octets.
    pub fn from_octets(data: impl Into<Bytes>) -> Result<Self, ComposeError> {
        let data = data.into();
        if data.len() > usize::from(u16::MAX) {
            Err(ComposeError::LongData)
        } else {
            Ok(Null { data })
        }
    }

    /// The raw content of the record.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Takes everything visible in `parser`.
    pub fn parse(parser: &mut Buffer) -> Self {
        let len = parser.remaining();
        let data = parser
            .read(len)
            .map(Bytes::copy_from_slice)
            .unwrap_or_default();
        Null { data }
    }

    pub fn compose(&self, target: &mut Buffer) {
        target.append(&self.data);
    }
}

//--- Display

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}
