//! Resource record data.
//!
//! Each resource record type has its own definition of the content and
//! formatting of its data. This module provides types for the record types
//! a stub resolver commonly deals with and [`RecordData`], the sum of all of
//! them. Record data of any other type is kept as raw octets in
//! [`UnknownRecordData`].
//!
//! Record data is always parsed from a buffer whose window has been limited
//! to the record’s declared data length, so a parser can simply consume
//! everything visible.
//!
//! [`UnknownRecordData`]: crate::base::rdata::UnknownRecordData

pub use self::aaaa::Aaaa;
pub use self::rfc1035::{Mx, Null, Soa, Txt, A};

mod aaaa;
pub mod rfc1035;

use crate::base::buffer::Buffer;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::UnknownRecordData;
use crate::base::wire::{ComposeError, ParseError};
use core::fmt;

//------------ RecordData ----------------------------------------------------

/// The data of a resource record.
///
/// The variant determines the record type. CNAME, NS and PTR records all
/// carry a single domain name. TXT and SPF records share their format.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "data"))]
pub enum RecordData {
    A(A),
    Aaaa(Aaaa),
    Cname(Name),
    Ns(Name),
    Ptr(Name),
    Mx(Mx),
    Soa(Soa),
    Null(Null),
    Txt(Txt),
    Spf(Txt),
    Unknown(UnknownRecordData),
}

impl RecordData {
    /// Returns the record type of the data.
    pub fn rtype(&self) -> Rtype {
        match *self {
            RecordData::A(_) => A::RTYPE,
            RecordData::Aaaa(_) => Aaaa::RTYPE,
            RecordData::Cname(_) => Rtype::CNAME,
            RecordData::Ns(_) => Rtype::NS,
            RecordData::Ptr(_) => Rtype::PTR,
            RecordData::Mx(_) => Mx::RTYPE,
            RecordData::Soa(_) => Soa::RTYPE,
            RecordData::Null(_) => Null::RTYPE,
            RecordData::Txt(_) => Rtype::TXT,
            RecordData::Spf(_) => Rtype::SPF,
            RecordData::Unknown(ref data) => data.rtype(),
        }
    }

    /// Returns the domain name if the data consists of a single name.
    pub fn as_name(&self) -> Option<&Name> {
        match *self {
            RecordData::Cname(ref name)
            | RecordData::Ns(ref name)
            | RecordData::Ptr(ref name) => Some(name),
            _ => None,
        }
    }

    /// Parses record data of type `rtype` from everything visible in
    /// `parser`.
    ///
    /// Data of a type without a dedicated variant becomes
    /// [`RecordData::Unknown`]. This is not an error.
    pub fn parse(
        rtype: Rtype,
        parser: &mut Buffer,
    ) -> Result<Self, ParseError> {
        Ok(match rtype {
            Rtype::A => RecordData::A(A::parse(parser)?),
            Rtype::AAAA => RecordData::Aaaa(Aaaa::parse(parser)?),
            Rtype::CNAME => RecordData::Cname(Name::parse(parser)),
            Rtype::NS => RecordData::Ns(Name::parse(parser)),
            Rtype::PTR => RecordData::Ptr(Name::parse(parser)),
            Rtype::MX => RecordData::Mx(Mx::parse(parser)?),
            Rtype::SOA => RecordData::Soa(Soa::parse(parser)?),
            Rtype::NULL => RecordData::Null(Null::parse(parser)),
            Rtype::TXT => RecordData::Txt(Txt::parse(parser)),
            Rtype::SPF => RecordData::Spf(Txt::parse(parser)),
            _ => {
                RecordData::Unknown(UnknownRecordData::parse(rtype, parser))
            }
        })
    }

    /// Appends the wire format of the data to `target`.
    pub fn compose(&self, target: &mut Buffer) -> Result<(), ComposeError> {
        match *self {
            RecordData::A(ref data) => data.compose(target),
            RecordData::Aaaa(ref data) => data.compose(target),
            RecordData::Cname(ref name)
            | RecordData::Ns(ref name)
            | RecordData::Ptr(ref name) => name.compose(target)?,
            RecordData::Mx(ref data) => data.compose(target)?,
            RecordData::Soa(ref data) => data.compose(target)?,
            RecordData::Null(ref data) => data.compose(target),
            RecordData::Txt(ref data) | RecordData::Spf(ref data) => {
                data.compose(target)?
            }
            RecordData::Unknown(ref data) => data.compose(target),
        }
        Ok(())
    }
}

//--- From

impl From<A> for RecordData {
    fn from(data: A) -> Self {
        RecordData::A(data)
    }
}

impl From<Aaaa> for RecordData {
    fn from(data: Aaaa) -> Self {
        RecordData::Aaaa(data)
    }
}

impl From<Mx> for RecordData {
    fn from(data: Mx) -> Self {
        RecordData::Mx(data)
    }
}

impl From<Soa> for RecordData {
    fn from(data: Soa) -> Self {
        RecordData::Soa(data)
    }
}

impl From<Null> for RecordData {
    fn from(data: Null) -> Self {
        RecordData::Null(data)
    }
}

impl From<UnknownRecordData> for RecordData {
    fn from(data: UnknownRecordData) -> Self {
        RecordData::Unknown(data)
    }
}

//--- Display

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RecordData::A(ref data) => data.fmt(f),
            RecordData::Aaaa(ref data) => data.fmt(f),
            RecordData::Cname(ref name)
            | RecordData::Ns(ref name)
            | RecordData::Ptr(ref name) => name.fmt(f),
            RecordData::Mx(ref data) => data.fmt(f),
            RecordData::Soa(ref data) => data.fmt(f),
            RecordData::Null(ref data) => data.fmt(f),
            RecordData::Txt(ref data) | RecordData::Spf(ref data) => {
                data.fmt(f)
            }
            RecordData::Unknown(ref data) => data.fmt(f),
        }
    }
}

//============ Testing =======================================================
