//! IANA definitions for DNS.
//!
//! This module contains enums for parameters defined in IANA registries
//! that are relevant for this crate: record types, classes, opcodes and
//! response codes. All of them wrap the raw integer so that values this
//! crate doesn't know about survive decoding and encoding unchanged.

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;

use core::fmt;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod rcode;
pub mod rtype;

//------------ FromStrError --------------------------------------------------

/// A mnemonic could not be parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FromStrError;

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unknown mnemonic")
    }
}

impl std::error::Error for FromStrError {}
