//! Accessing and building DNS messages.
//!
//! A DNS message consists of a header followed by four sections: the
//! question section with the questions asked, the answer section with the
//! records answering them, the authority section with records pointing to
//! the name servers responsible, and the additional section with records
//! that may be useful to the receiver.
//!
//! [`Message`] owns all of these. It is created either as a fresh query via
//! [`Message::question`] or by parsing a received datagram via
//! [`Message::from_octets`].

use super::buffer::Buffer;
use super::header::Header;
use super::iana::{Opcode, Rcode, Rtype};
use super::name::Name;
use super::question::Question;
use super::record::Record;
use super::wire::{ComposeError, ParseError};
use bytes::Bytes;
use core::fmt;

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The section counts of the header are not stored. When composing, they
/// are taken from the lengths of the sections. When parsing, they determine
/// how many entries are read.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authority: Vec<Record>,
    additional: Vec<Record>,
}

/// # Creation
///
impl Message {
    /// Creates a new, empty query.
    ///
    /// The message has a random ID and the RD bit set. All sections are
    /// empty.
    pub fn new() -> Self {
        let mut header = Header::new();
        header.set_random_id();
        header.set_rd(true);
        Message {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Creates a query with a single question for `qname`.
    ///
    /// If no record type is given, it is derived from the name: a dotted
    /// IPv4 address is turned into its `in-addr.arpa.` name and queried for
    /// PTR, anything else is queried for A.
    pub fn question(qname: impl Into<Name>, qtype: Option<Rtype>) -> Self {
        let qname = qname.into();
        let question = match qtype {
            Some(qtype) => Question::new(qname, qtype),
            None => match qname.as_ipv4() {
                Some(addr) => Question::new(Name::reverse_ipv4(addr), Rtype::PTR),
                None => Question::new(qname, Rtype::A),
            },
        };
        let mut res = Self::new();
        res.push_question(question);
        res
    }

    /// Parses a complete message from a datagram.
    pub fn from_octets(octets: impl AsRef<[u8]>) -> Result<Self, ParseError> {
        Self::parse(&mut Buffer::from_slice(octets.as_ref()))
    }
}

/// # Header Access
///
impl Message {
    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the message ID.
    pub fn id(&self) -> u16 {
        self.header.id()
    }

    /// Sets the message ID.
    pub fn set_id(&mut self, id: u16) {
        self.header.set_id(id)
    }

    /// Returns whether the message is a query.
    pub fn is_query(&self) -> bool {
        !self.header.qr()
    }

    /// Returns whether the message is a response.
    pub fn is_response(&self) -> bool {
        self.header.qr()
    }

    pub fn opcode(&self) -> Opcode {
        self.header.opcode()
    }

    pub fn rcode(&self) -> Rcode {
        self.header.rcode()
    }
}

/// # Sections
///
impl Message {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    pub fn additional(&self) -> &[Record] {
        &self.additional
    }

    /// Returns the first question, if there is one.
    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Trades the message for the records of its answer section.
    pub fn into_answers(self) -> Vec<Record> {
        self.answers
    }

    pub fn push_question(&mut self, question: Question) {
        self.questions.push(question)
    }

    pub fn push_answer(&mut self, record: Record) {
        self.answers.push(record)
    }

    pub fn push_authority(&mut self, record: Record) {
        self.authority.push(record)
    }

    pub fn push_additional(&mut self, record: Record) {
        self.additional.push(record)
    }

    /// Returns whether all four sections are empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
            && self.answers.is_empty()
            && self.authority.is_empty()
            && self.additional.is_empty()
    }
}

/// # Parsing and Composing
///
impl Message {
    /// Parses a message from the current offset of `parser`.
    ///
    /// A message is all or nothing. If the header is incomplete or any of
    /// the questions or records fails to parse, so does the message.
    pub fn parse(parser: &mut Buffer) -> Result<Self, ParseError> {
        let (id, flags, qdcount, ancount, nscount, arcount) = parser
            .unpack::<(u16, u16, u16, u16, u16, u16)>()
            .ok_or(ParseError::ShortInput)?;
        let questions = (0..qdcount)
            .map(|_| Question::parse(parser))
            .collect::<Result<_, _>>()?;
        let answers = Self::parse_section(parser, ancount)?;
        let authority = Self::parse_section(parser, nscount)?;
        let additional = Self::parse_section(parser, arcount)?;
        Ok(Message {
            header: Header::from_id_and_flags(id, flags),
            questions,
            answers,
            authority,
            additional,
        })
    }

    fn parse_section(
        parser: &mut Buffer,
        count: u16,
    ) -> Result<Vec<Record>, ParseError> {
        (0..count).map(|_| Record::parse(parser)).collect()
    }

    /// Appends the wire format of the message to `target`.
    ///
    /// Names are never compressed.
    pub fn compose(&self, target: &mut Buffer) -> Result<(), ComposeError> {
        let count =
            |len: usize| u16::try_from(len).map_err(|_| ComposeError::LongData);
        target.pack((
            self.header.id(),
            self.header.flags_word(),
            count(self.questions.len())?,
            count(self.answers.len())?,
            count(self.authority.len())?,
            count(self.additional.len())?,
        ));
        for question in &self.questions {
            question.compose(target)?;
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authority)
            .chain(&self.additional)
        {
            record.compose(target)?;
        }
        Ok(())
    }

    /// Returns the wire format of the message.
    pub fn to_bytes(&self) -> Result<Bytes, ComposeError> {
        let mut target = Buffer::new();
        self.compose(&mut target)?;
        Ok(target.into_bytes())
    }
}

//--- Default

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

//--- Display

impl fmt::Display for Message {
    /// Formats the message similar to the output of `dig`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ";; HEADER:")?;
        writeln!(
            f,
            ";; opcode: {} status: {} id: {}",
            self.header.opcode(),
            self.header.rcode(),
            self.header.id()
        )?;
        writeln!(
            f,
            ";; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, \
             ADDITIONAL: {}",
            self.header,
            self.questions.len(),
            self.answers.len(),
            self.authority.len(),
            self.additional.len()
        )?;
        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            writeln!(f, "{}", question)?;
        }
        for (title, section) in [
            ("ANSWER", &self.answers),
            ("NAMESERVER", &self.authority),
            ("ADDITIONAL", &self.additional),
        ] {
            writeln!(f, ";; {} SECTION:", title)?;
            for record in section {
                writeln!(f, "{}", record)?;
            }
        }
        Ok(())
    }
}

//============ Testing =======================================================
