//! Basics.
//!
//! This module provides types for working with DNS data. The types allow
//! creating such data from scratch and processing it. Crucially, the
//! module provides means to extract the data from wire-format DNS messages
//! and assemble such messages.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format messages from other forms of representation conversion such
//! as printing, we use the term *parsing* for extracting data from a
//! wire-format representation and *composing* for producing such a
//! representation.
//!
//! Both parsing and composing happen on a [`Buffer`], an owned octet
//! sequence with a movable window. Parsing reads from the current offset of
//! the window and moves it forward. Composing adds to the end of the data.
//!
//! A [`Message`] owns its header and the contents of its four sections.
//! Domain names are always kept fully expanded. Compression pointers are
//! followed while parsing but never produced while composing.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, both fundamental
//! and composed. These are:
//!
//! * [buffer] for the cursor all parsing and composing goes through,
//! * [wire] for fixed-size values in wire format and the error types,
//! * [header] for the header of DNS messages,
//! * [iana] for the various IANA-registered parameters,
//! * [name] for domain names,
//! * [question] for questions,
//! * [record] for DNS resource records, and
//! * [rdata] for record data of unknown types.
//!
//! The record data of the known types lives in the crate’s top-level
//! [rdata](crate::rdata) module.

pub use self::buffer::Buffer;
pub use self::header::Header;
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::message::Message;
pub use self::name::Name;
pub use self::question::Question;
pub use self::record::Record;
pub use self::wire::{ComposeError, FormError, ParseError};

pub mod buffer;
pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
