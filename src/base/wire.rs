//! Creating and consuming data in wire format.
//!
//! The DNS wire format is big-endian throughout. The [`Pack`] and
//! [`Unpack`] traits describe values with a fixed wire size that can be
//! appended to or taken from a [`Buffer`]. They are implemented for the
//! unsigned integers used in DNS headers and records, for IP addresses,
//! and for tuples of these so that a whole run of fields can be read in a
//! single, all-or-nothing step.
//!
//! [`Buffer`]: super::buffer::Buffer

use bytes::BufMut;
use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

//------------ Pack ----------------------------------------------------------

/// A value with a fixed size in wire format that can be appended to a
/// buffer.
pub trait Pack {
    /// The number of octets the value occupies in wire format.
    const PACK_LEN: usize;

    /// Appends the wire format of the value to `target`.
    fn pack<B: BufMut + ?Sized>(&self, target: &mut B);
}

//------------ Unpack --------------------------------------------------------

/// A value with a fixed size in wire format that can be taken from the
/// beginning of a slice.
pub trait Unpack: Sized {
    /// The number of octets the value occupies in wire format.
    const UNPACK_LEN: usize;

    /// Takes a value from the beginning of `slice`.
    ///
    /// The caller guarantees that `slice` is at least `UNPACK_LEN` octets
    /// long.
    fn unpack(slice: &[u8]) -> Self;
}

macro_rules! pack_to_be_bytes {
    ( $type:ident ) => {
        impl Pack for $type {
            const PACK_LEN: usize = ($type::BITS >> 3) as usize;

            fn pack<B: BufMut + ?Sized>(&self, target: &mut B) {
                target.put_slice(&self.to_be_bytes())
            }
        }

        impl Unpack for $type {
            const UNPACK_LEN: usize = ($type::BITS >> 3) as usize;

            fn unpack(slice: &[u8]) -> Self {
                let mut buf = [0u8; ($type::BITS >> 3) as usize];
                buf.copy_from_slice(&slice[..Self::UNPACK_LEN]);
                $type::from_be_bytes(buf)
            }
        }
    };
}

pack_to_be_bytes!(u8);
pack_to_be_bytes!(u16);
pack_to_be_bytes!(u32);

impl Pack for Ipv4Addr {
    const PACK_LEN: usize = 4;

    fn pack<B: BufMut + ?Sized>(&self, target: &mut B) {
        target.put_slice(&self.octets())
    }
}

impl Unpack for Ipv4Addr {
    const UNPACK_LEN: usize = 4;

    fn unpack(slice: &[u8]) -> Self {
        Ipv4Addr::new(slice[0], slice[1], slice[2], slice[3])
    }
}

impl Pack for Ipv6Addr {
    const PACK_LEN: usize = 16;

    fn pack<B: BufMut + ?Sized>(&self, target: &mut B) {
        target.put_slice(&self.octets())
    }
}

impl Unpack for Ipv6Addr {
    const UNPACK_LEN: usize = 16;

    fn unpack(slice: &[u8]) -> Self {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&slice[..16]);
        buf.into()
    }
}

macro_rules! pack_tuple {
    ( $( $name:ident : $idx:tt ),* ) => {
        impl< $( $name: Pack ),* > Pack for ( $( $name, )* ) {
            const PACK_LEN: usize = 0 $( + $name::PACK_LEN )*;

            fn pack<Target: BufMut + ?Sized>(&self, target: &mut Target) {
                $( self.$idx.pack(target); )*
            }
        }

        impl< $( $name: Unpack ),* > Unpack for ( $( $name, )* ) {
            const UNPACK_LEN: usize = 0 $( + $name::UNPACK_LEN )*;

            #[allow(unused_assignments)]
            fn unpack(slice: &[u8]) -> Self {
                let mut pos = 0;
                ( $( {
                    let value = $name::unpack(&slice[pos..]);
                    pos += $name::UNPACK_LEN;
                    value
                }, )* )
            }
        }
    };
}

pack_tuple!(A: 0, B: 1);
pack_tuple!(A: 0, B: 1, C: 2);
pack_tuple!(A: 0, B: 1, C: 2, D: 3);
pack_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
pack_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// A label of a domain name is longer than 63 octets.
    LongLabel,

    /// A domain name is longer than 255 octets.
    LongName,

    /// Some length-prefixed data or a section is too long.
    LongData,
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            ComposeError::LongLabel => "long label",
            ComposeError::LongName => "long domain name",
            ComposeError::LongData => "long data",
        })
    }
}

impl std::error::Error for ComposeError {}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the visible data.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pack_integers_big_endian() {
        let mut target = Vec::new();
        0x1234u16.pack(&mut target);
        0xdeadbeefu32.pack(&mut target);
        7u8.pack(&mut target);
        assert_eq!(target, b"\x12\x34\xde\xad\xbe\xef\x07");
    }

    #[test]
    fn tuple_lengths() {
        assert_eq!(<(u16, u16, u32, u16)>::UNPACK_LEN, 10);
        assert_eq!(<(u16, u16, u16, u16, u16, u16)>::PACK_LEN, 12);
    }

    #[test]
    fn pack_tuple() {
        let mut target = Vec::new();
        (1u8, 0x0203u16).pack(&mut target);
        (4u8, 5u8, 0x06070809u32, 10u8, 11u16, 12u8).pack(&mut target);
        assert_eq!(target, b"\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x00\x0b\x0c");
    }

    #[test]
    fn unpack_tuple() {
        let (a, b, c) = <(u8, u16, u32)>::unpack(b"\x01\x00\x02\x00\x00\x01\x00");
        assert_eq!((a, b, c), (1, 2, 256));
    }

    #[test]
    fn addresses() {
        let mut target = Vec::new();
        Ipv4Addr::new(192, 0, 2, 1).pack(&mut target);
        assert_eq!(Ipv4Addr::unpack(&target), Ipv4Addr::new(192, 0, 2, 1));

        let mut target = Vec::new();
        Ipv6Addr::LOCALHOST.pack(&mut target);
        assert_eq!(target.len(), 16);
        assert_eq!(Ipv6Addr::unpack(&target), Ipv6Addr::LOCALHOST);
    }
}
