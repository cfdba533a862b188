//! A DNS wire format codec and asynchronous stub resolver.
//!
//! This crate provides the building blocks for asking name servers
//! questions and making sense of their answers.
//!
//! # Modules
//!
//! * [base] contains the fundamental types to deal with DNS data: a buffer
//!   with a movable window, domain names, questions, records, and messages,
//!   as well as parsing and composing all of them in wire format,
//! * [rdata] contains types for the record data of the record types a stub
//!   resolver commonly deals with, and
//! * [resolv] contains an asynchronous stub resolver based on the
//!   [Tokio](https://tokio.rs/) async runtime that sends queries over UDP to
//!   a set of name servers, retrying and failing over between them.
//!
//! # Reference of Feature Flags
//!
//! * `serde`: Enables serde serialization for a number of basic types,
//!   most notably [`Message`](base::Message) and everything it contains.
//!   This can be used for dumping messages in formats such as YAML.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
pub mod resolv;
