//! A single question in a DNS message.
//!
//! This module defines the type `Question` which represents an entry in
//! the question section of a DNS message.

use super::buffer::Buffer;
use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{ComposeError, ParseError};
use core::fmt;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. Questions
/// created by this crate always use the Internet class. The class of a
/// parsed question is kept as it was received.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the question.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// Creates a new question for the Internet class.
    pub fn new(qname: impl Into<Name>, qtype: Rtype) -> Self {
        Question {
            qname: qname.into(),
            qtype,
            qclass: Class::IN,
        }
    }

    /// Creates a new question from its three components.
    pub fn with_class(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain name in the question,
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

/// # Parsing and Composing
///
impl Question {
    pub fn parse(parser: &mut Buffer) -> Result<Self, ParseError> {
        let qname = Name::parse(parser);
        let (qtype, qclass) = parser.unpack().ok_or(ParseError::ShortInput)?;
        Ok(Question::with_class(qname, qtype, qclass))
    }

    pub fn compose(&self, target: &mut Buffer) -> Result<(), ComposeError> {
        self.qname.compose(target)?;
        target.pack((self.qtype, self.qclass));
        Ok(())
    }
}

//--- Display

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.qname, self.qclass, self.qtype)
    }
}

//============ Testing =======================================================
