//! Resolver configuration
//!
//! The global resolver configuration is normally read from the system’s
//! `/etc/resolv.conf`. Only the parts relevant to a stub resolver that
//! talks to a fixed set of name servers are kept: the name servers, the
//! timeout, and the number of attempts.
//!
//! The format is modeled along the lines of glibc’s resolver.

use std::io::{self, BufRead, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::str::SplitWhitespace;
use std::time::Duration;
use std::{error, fmt, fs};

//------------ ResolvConf ---------------------------------------------------

/// Resolver configuration.
///
/// This type collects all information necessary to configure how a stub
/// resolver talks to its upstream resolvers.
///
/// The type follows the builder pattern. After creating a value with
/// `ResolvConf::new()` you can manipulate the members. Once you are happy
/// with them, you call `finalize()` to make sure the configuration is valid.
/// It mostly just fixes the `servers`.
///
/// Additionally, the type can parse a glibc-style configuration file,
/// commonly known as `/etc/resolv.conf` through the `parse()` and
/// `parse_file()` methods. You still need to call `finalize()` after
/// parsing.
///
/// The easiest way, however, to get the system resolver configuration is
/// through `ResolvConf::system_default()`. This will parse the
/// configuration file or return a default configuration if that fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvConf {
    /// Addresses of servers to query.
    pub servers: Vec<SocketAddr>,

    /// Timeout to wait for a response.
    pub timeout: Duration,

    /// Number of times a query is sent before giving up.
    pub attempts: usize,
}

/// # Management
///
impl ResolvConf {
    /// Creates a new, empty configuration.
    ///
    /// Using an empty configuration will fail since it does not contain
    /// any name servers. Call `self.finalize()` to make it usable.
    pub fn new() -> Self {
        ResolvConf {
            servers: Vec::new(),
            timeout: Duration::from_secs(5),
            attempts: 2,
        }
    }

    /// Finalizes the configuration for actual use.
    ///
    /// If `servers` is empty, it adds `127.0.0.1:53`. This is exactly what
    /// glibc does.
    pub fn finalize(&mut self) {
        if self.servers.is_empty() {
            let addr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
            self.servers.push(SocketAddr::new(addr, 53));
        }
    }

    /// Creates a default configuration for this system.
    ///
    /// This currently only works for Unix-y systems.
    pub fn system_default() -> Self {
        let mut res = ResolvConf::new();
        if let Err(err) = res.parse_file("/etc/resolv.conf") {
            tracing::warn!("cannot read /etc/resolv.conf: {}", err);
        }
        res.finalize();
        res
    }
}

/// # Parsing Configuration File
///
impl ResolvConf {
    /// Parses the configuration from a file.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let mut file = fs::File::open(path)?;
        self.parse(&mut file)
    }

    /// Parses the configuration from a reader.
    ///
    /// The format is that of the /etc/resolv.conf file. Everything after a
    /// `#` or `;` is a comment. Keywords other than `nameserver` and
    /// `options` as well as unknown options are ignored.
    pub fn parse<R: Read>(&mut self, reader: &mut R) -> Result<(), Error> {
        for line in io::BufReader::new(reader).lines() {
            let line = line?;
            let line = match line.find(['#', ';']) {
                Some(idx) => &line[..idx],
                None => line.as_str(),
            };

            let mut words = line.split_whitespace();
            match words.next() {
                Some("nameserver") => self.parse_nameserver(words)?,
                Some("options") => self.parse_options(words)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_nameserver(&mut self, mut words: SplitWhitespace) -> Result<(), Error> {
        let addr: IpAddr = next_word(&mut words)?.parse()?;
        let addr = SocketAddr::new(addr, 53);
        if !self.servers.contains(&addr) {
            self.servers.push(addr)
        }
        no_more_words(words)
    }

    fn parse_options(&mut self, words: SplitWhitespace) -> Result<(), Error> {
        for word in words {
            match split_arg(word)? {
                ("timeout", Some(n)) => {
                    self.timeout = Duration::from_secs(n as u64)
                }
                ("attempts", Some(n)) => self.attempts = n,
                // Ignore unknown or misformated options.
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for ResolvConf {
    fn default() -> Self {
        Self::new()
    }
}

//--- Display

impl fmt::Display for ResolvConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for server in self.servers.iter() {
            let server = *server;
            "nameserver ".fmt(f)?;
            if server.port() == 53 {
                server.ip().fmt(f)?;
            } else {
                server.fmt(f)?;
            }
            "\n".fmt(f)?;
        }

        let mut options = Vec::new();
        if self.timeout != Duration::from_secs(5) {
            // XXX This ignores fractional seconds.
            options.push(format!("timeout:{}", self.timeout.as_secs()));
        }
        if self.attempts != 2 {
            options.push(format!("attempts:{}", self.attempts));
        }
        if !options.is_empty() {
            "options".fmt(f)?;
            for option in options {
                write!(f, " {}", option)?;
            }
            "\n".fmt(f)?;
        }
        Ok(())
    }
}

//------------ Private Helpers ----------------------------------------------
//
// These are here to wrap stuff into Results.

/// Returns a reference to the next word or an error.
fn next_word<'a>(words: &mut SplitWhitespace<'a>) -> Result<&'a str, Error> {
    match words.next() {
        Some(word) => Ok(word),
        None => Err(Error::ParseError),
    }
}

/// Returns nothing but errors out if there are words left.
fn no_more_words(mut words: SplitWhitespace) -> Result<(), Error> {
    match words.next() {
        Some(..) => Err(Error::ParseError),
        None => Ok(()),
    }
}

/// Splits the name and argument from an option with arguments.
///
/// These options consist of a name followed by a colon followed by a
/// value, which so far is only `usize`, so we do that.
fn split_arg(s: &str) -> Result<(&str, Option<usize>), Error> {
    match s.find(':') {
        Some(idx) => {
            let (left, right) = s.split_at(idx);
            Ok((left, Some(right[1..].parse()?)))
        }
        None => Ok((s, None)),
    }
}

//------------ Error --------------------------------------------------------

/// The error that can happen when parsing `resolv.conf`.
#[derive(Debug)]
pub enum Error {
    /// The file is not a proper file.
    ParseError,

    /// Something happend while reading.
    IoError(io::Error),
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::IoError(error)
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(_: std::net::AddrParseError) -> Error {
        Error::ParseError
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(_: std::num::ParseIntError) -> Error {
        Error::ParseError
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ParseError => write!(f, "error parsing configuration"),
            Error::IoError(ref e) => e.fmt(f),
        }
    }
}

//============ Testing ======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::io;

    #[test]
    fn parse_resolv_conf() {
        let mut conf = ResolvConf::new();
        let data = "# generated by hand\n\
                    nameserver 192.0.2.0\n\
                    nameserver 192.0.2.1 ; secondary\n\
                    nameserver 192.0.2.0\n\
                    search example.com\n\
                    options rotate timeout:3 attempts:4\n"
            .to_string();
        assert!(conf.parse(&mut io::Cursor::new(data)).is_ok());
        assert_eq!(
            conf.servers,
            vec![
                "192.0.2.0:53".parse::<SocketAddr>().unwrap(),
                "192.0.2.1:53".parse().unwrap()
            ]
        );
        assert_eq!(conf.timeout, Duration::from_secs(3));
        assert_eq!(conf.attempts, 4);
    }

    #[test]
    fn parse_ipv6_server() {
        let mut conf = ResolvConf::new();
        let data = "nameserver 2001:db8::53\n";
        assert!(conf.parse(&mut data.as_bytes()).is_ok());
        assert_eq!(conf.servers, vec!["[2001:db8::53]:53".parse().unwrap()]);
    }

    #[test]
    fn parse_errors() {
        let mut conf = ResolvConf::new();
        assert!(matches!(
            conf.parse(&mut "nameserver example.com\n".as_bytes()),
            Err(Error::ParseError)
        ));
        assert!(matches!(
            conf.parse(&mut "nameserver\n".as_bytes()),
            Err(Error::ParseError)
        ));
        assert!(matches!(
            conf.parse(&mut "options timeout:x\n".as_bytes()),
            Err(Error::ParseError)
        ));
    }

    #[test]
    fn finalize() {
        let mut conf = ResolvConf::new();
        conf.finalize();
        assert_eq!(conf.servers, vec!["127.0.0.1:53".parse().unwrap()]);
    }

    #[test]
    fn missing_file() {
        let mut conf = ResolvConf::new();
        assert!(matches!(
            conf.parse_file("/nonexistent/resolv.conf"),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn display() {
        let mut conf = ResolvConf::new();
        conf.servers.push("192.0.2.1:53".parse().unwrap());
        conf.servers.push("192.0.2.2:5353".parse().unwrap());
        conf.attempts = 3;
        assert_eq!(
            conf.to_string(),
            "nameserver 192.0.2.1\nnameserver 192.0.2.2:5353\noptions attempts:3\n"
        );
    }
}
