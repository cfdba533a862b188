//! Resource Records.
//!
//! This module defines types and traits related to DNS resource records.
//! The most complete type is [`Record`] which contains a complete record
//! for a certain record type with owned record data.

use super::buffer::Buffer;
use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{ComposeError, FormError, ParseError};
use crate::rdata::RecordData;
use core::fmt;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. Data is arranged in a tree which is navigated using the domain
/// name. Each node in the tree carries a label, starting with the root
/// label as the top-most node. The tree is traversed by stepping through the
/// name from right to left, finding a child node carring the label of each
/// step. The domain name resulting from this traversal is part of the
/// record itself. It is called the *owner* of the record.
///
/// The record type describes the kind of data the record holds, such as IP
/// addresses. Here, it is given by the variant of the [`RecordData`].
///
/// Each record has a *time to live* or TTL. It is the number of seconds
/// the record may be cached.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Record {
    /// The owner of the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: u32,

    /// The record data. The value also specifies the record’s type.
    data: RecordData,
}

/// # Creation and Element Access
///
impl Record {
    /// Creates a new record from its parts.
    pub fn new(
        owner: impl Into<Name>,
        class: Class,
        ttl: u32,
        data: impl Into<RecordData>,
    ) -> Self {
        Record {
            owner: owner.into(),
            class,
            ttl,
            data: data.into(),
        }
    }

    /// Returns a reference to the owner domain name.
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    /// Returns the class of the record.
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL of the record in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Trades the record for its record data.
    pub fn into_data(self) -> RecordData {
        self.data
    }
}

/// # Parsing and Composing
///
impl Record {
    /// Parses a record from the current offset of `parser`.
    ///
    /// The record data is parsed from a cursor limited to the declared data
    /// length, and `parser` is moved past the data afterwards regardless of
    /// how much of it the record data type used. Record data too short for
    /// the fixed fields of its type is a form error.
    pub fn parse(parser: &mut Buffer) -> Result<Self, ParseError> {
        let owner = Name::parse(parser);
        let (rtype, class, ttl, rdlen) = parser
            .unpack::<(Rtype, Class, u32, u16)>()
            .ok_or(ParseError::ShortInput)?;
        let rdlen = usize::from(rdlen);
        if rdlen > parser.remaining() {
            return Err(ParseError::ShortInput);
        }
        let mut rdata_parser = parser.scoped(parser.offset(), rdlen);
        let data = RecordData::parse(rtype, &mut rdata_parser).map_err(
            |err| match err {
                ParseError::ShortInput => {
                    FormError::new("record data shorter than its fields").into()
                }
                err => err,
            },
        )?;
        parser.advance(rdlen as isize);
        Ok(Record {
            owner,
            class,
            ttl,
            data,
        })
    }

    /// Appends the wire format of the record to `target`.
    pub fn compose(&self, target: &mut Buffer) -> Result<(), ComposeError> {
        let mut rdata = Buffer::new();
        self.data.compose(&mut rdata)?;
        let rdlen = u16::try_from(rdata.total_len())
            .map_err(|_| ComposeError::LongData)?;
        self.owner.compose(target)?;
        target.pack((self.rtype(), self.class, self.ttl, rdlen));
        target.append(rdata.as_full_slice());
        Ok(())
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.owner,
            self.ttl,
            self.class,
            self.rtype(),
            self.data
        )
    }
}

//============ Testing =======================================================
