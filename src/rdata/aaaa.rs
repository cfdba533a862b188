//! Record data for the AAAA record.
//!
//! Only the address itself is handled. There is no special treatment of
//! IPv6 beyond that.

use crate::base::buffer::Buffer;
use crate::base::iana::Rtype;
use crate::base::wire::ParseError;
use core::fmt;
use std::net::Ipv6Addr;

//------------ Aaaa ---------------------------------------------------------

/// Aaaa record data.
///
/// Aaaa records convey the IPv6 address of a host. They are defined in
/// [RFC 3596](https://tools.ietf.org/html/rfc3596).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Aaaa {
    addr: Ipv6Addr,
}

impl Aaaa {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::AAAA;

    #[must_use]
    pub fn new(addr: Ipv6Addr) -> Aaaa {
        Aaaa { addr }
    }

    #[must_use]
    pub fn addr(&self) -> Ipv6Addr {
        self.addr
    }

    pub fn parse(parser: &mut Buffer) -> Result<Self, ParseError> {
        parser
            .unpack::<Ipv6Addr>()
            .map(Self::new)
            .ok_or(ParseError::ShortInput)
    }

    pub fn compose(&self, target: &mut Buffer) {
        target.pack(self.addr);
    }
}

impl From<Ipv6Addr> for Aaaa {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr)
    }
}

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.addr.fmt(f)
    }
}
