//! Domain names.
//!
//! A domain name is a sequence of *labels*, each up to 63 octets long,
//! terminated by the empty root label. This crate keeps names in their
//! presentation form: the labels joined by dots and always ending in a dot,
//! so that the root name is `"."` and `example.com` becomes
//! `"example.com."`.
//!
//! In their wire format, labels are prefixed with an octet containing their
//! length. In order to save space in DNS messages, a name can end in a
//! *compression pointer* to another name stored earlier in the message.
//! Pointers are only ever followed while decoding. A [`Name`] always owns
//! its fully expanded labels.

use super::buffer::Buffer;
use super::wire::ComposeError;
use core::{fmt, str};
use std::net::Ipv4Addr;

//------------ Constants -----------------------------------------------------

/// The maximum number of compression pointers followed for a single name.
///
/// Decoding stops once more pointers than this have been taken, keeping
/// whatever labels were collected until then.
pub const POINTER_CHAIN_LIMIT: usize = 64;

/// The maximum length of a single label in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// The maximum length of a name in wire format.
pub const MAX_NAME_LEN: usize = 255;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name(String);

/// # Creation
///
impl Name {
    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(".".into())
    }

    /// Creates a name from its presentation form.
    ///
    /// A missing trailing dot is added. The empty string is the root name.
    pub fn new(s: &str) -> Self {
        if s.is_empty() || s == "." {
            Self::root()
        } else if s.ends_with('.') {
            Name(s.into())
        } else {
            let mut res = String::with_capacity(s.len() + 1);
            res.push_str(s);
            res.push('.');
            Name(res)
        }
    }

    /// Returns the `in-addr.arpa.` name for reverse lookups of `addr`.
    ///
    /// The octets of the address appear in reverse order, so `192.0.2.1`
    /// becomes `1.2.0.192.in-addr.arpa.`.
    #[must_use]
    pub fn reverse_ipv4(addr: Ipv4Addr) -> Self {
        let [a, b, c, d] = addr.octets();
        Name(format!("{d}.{c}.{b}.{a}.in-addr.arpa."))
    }
}

/// # Properties
///
impl Name {
    /// Returns the presentation form of the name including the final dot.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.0 == "."
    }

    /// Returns an iterator over the non-empty labels of the name.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('.').filter(|label| !label.is_empty())
    }

    /// Returns the IPv4 address if the name is a dotted-quad literal.
    ///
    /// Both `"192.0.2.1"` and `"192.0.2.1."` are recognized.
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        self.0.strip_suffix('.').unwrap_or(&self.0).parse().ok()
    }

    /// Returns the length of the name in uncompressed wire format.
    pub fn compose_len(&self) -> usize {
        self.labels().map(|label| label.len() + 1).sum::<usize>() + 1
    }
}

/// # Wire Format
///
impl Name {
    /// Appends the uncompressed wire format of the name to `target`.
    ///
    /// The name is added to the end of the physical data and the window of
    /// `target` grows to include it.
    pub fn compose(&self, target: &mut Buffer) -> Result<(), ComposeError> {
        if self.compose_len() > MAX_NAME_LEN {
            return Err(ComposeError::LongName);
        }
        let mut wire = Vec::with_capacity(self.compose_len());
        for label in self.labels() {
            if label.len() > MAX_LABEL_LEN {
                return Err(ComposeError::LongLabel);
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
        wire.push(0);
        target.append(&wire);
        Ok(())
    }

    /// Takes a name from the current offset of `source`.
    ///
    /// Compression pointers are followed relative to the start of the
    /// buffer. After the first pointer, the buffer is left right behind that
    /// pointer, otherwise after the root label. Decoding is best effort:
    /// running out of data or following more than [`POINTER_CHAIN_LIMIT`]
    /// pointers ends the name with the labels read so far. Label content
    /// that isn't valid UTF-8 is replaced.
    pub fn parse(source: &mut Buffer) -> Self {
        let mut res = String::new();
        let mut return_to = None;
        let mut hops = 0;

        while let Some(len) = source.unpack::<u8>() {
            if len & 0xC0 == 0xC0 {
                let Some(low) = source.unpack::<u8>() else {
                    break;
                };
                if return_to.is_none() {
                    return_to = Some(source.offset());
                }
                hops += 1;
                if hops > POINTER_CHAIN_LIMIT {
                    tracing::debug!(
                        "compression pointer chain too long, name truncated"
                    );
                    break;
                }
                let target = (usize::from(len & 0x3F) << 8) | usize::from(low);
                source.rewind_all().advance(target as isize);
            } else if len == 0 {
                break;
            } else {
                let Some(label) = source.read(usize::from(len)) else {
                    break;
                };
                res.push_str(&String::from_utf8_lossy(label));
                res.push('.');
            }
        }

        if let Some(pos) = return_to {
            source.rewind_all().advance(pos as isize);
        }

        if res.is_empty() {
            Self::root()
        } else {
            Name(res)
        }
    }
}

//--- FromStr and From

impl str::FromStr for Name {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Name::new(s))
    }
}

impl<'a> From<&'a str> for Name {
    fn from(s: &'a str) -> Self {
        Name::new(s)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        if s.ends_with('.') {
            Name(s)
        } else {
            Name::new(&s)
        }
    }
}

//--- AsRef

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

//--- Serialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

//============ Testing =======================================================
