//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::buffer::Buffer;
use crate::base::wire::ComposeError;
use core::fmt;

//------------ Txt ----------------------------------------------------------

/// Txt record data.
///
/// Txt records hold descriptive text. On the wire, the text is a sequence
/// of character strings, each a length octet followed by up to 255 octets
/// of text. This type reassembles them into a single string. The same
/// format is used by SPF records.
///
/// The Txt record type is defined in [RFC 1035, section 3.3.14][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Txt {
    text: String,
}

impl Txt {
    /// The longest content of a single character string.
    const CHUNK_LEN: usize = 255;

    pub fn new(text: impl Into<String>) -> Self {
        Txt { text: text.into() }
    }

    /// Returns the reassembled text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Takes character strings until the visible data is used up.
    ///
    /// A character string that claims to be longer than what is left ends
    /// the text. Invalid UTF-8 is replaced.
    pub fn parse(parser: &mut Buffer) -> Self {
        let mut text = Vec::new();
        while let Some(len) = parser.unpack::<u8>() {
            match parser.read(usize::from(len)) {
                Some(chunk) => text.extend_from_slice(chunk),
                None => break,
            }
        }
        Txt {
            text: String::from_utf8_lossy(&text).into_owned(),
        }
    }

    pub fn compose(&self, target: &mut Buffer) -> Result<(), ComposeError> {
        let bytes = self.text.as_bytes();
        let chunks = (bytes.len() + Self::CHUNK_LEN - 1) / Self::CHUNK_LEN;
        let wire_len = bytes.len() + chunks;
        if wire_len > usize::from(u16::MAX) {
            return Err(ComposeError::LongData);
        }
        if bytes.is_empty() {
            target.append(b"\0");
        }
        for chunk in bytes.chunks(Self::CHUNK_LEN) {
            target.pack(chunk.len() as u8);
            target.append(chunk);
        }
        Ok(())
    }
}

//--- From

impl<'a> From<&'a str> for Txt {
    fn from(text: &'a str) -> Self {
        Txt::new(text)
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}
