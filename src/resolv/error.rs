//! Errors and results.

use crate::base::wire::ComposeError;
use std::{error, fmt, io, result};

//------------ Error --------------------------------------------------------

/// A query did not produce a result.
#[derive(Debug)]
pub enum Error {
    /// There are no name servers to send the query to.
    NoServers,

    /// The query could not be sent at all.
    Send(io::Error),

    /// All attempts timed out or failed.
    Exhausted,

    /// The question could not be turned into a message.
    Compose(ComposeError),

    /// The resolver has gone away before the query was answered.
    Shutdown,
}

impl Error {
    /// Returns whether the error means there was nobody to answer.
    ///
    /// This is the case if the query was sent but no usable answer came
    /// back in time or if there was no name server to ask.
    pub fn is_no_answer(&self) -> bool {
        matches!(self, Error::NoServers | Error::Exhausted)
    }
}

//--- From

impl From<ComposeError> for Error {
    fn from(error: ComposeError) -> Error {
        Error::Compose(error)
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Send(error)
    }
}

//--- Display and Error

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoServers => f.write_str("no name servers configured"),
            Error::Send(ref err) => write!(f, "sending query failed: {}", err),
            Error::Exhausted => f.write_str("all attempts failed"),
            Error::Compose(ref err) => {
                write!(f, "cannot build query: {}", err)
            }
            Error::Shutdown => f.write_str("resolver has shut down"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Send(ref err) => Some(err),
            Error::Compose(ref err) => Some(err),
            _ => None,
        }
    }
}

//------------ Result -------------------------------------------------------

pub type Result<T> = result::Result<T, Error>;

//============ Testing ======================================================
