//! An asynchronous stub resolver.
//!
//! A stub resolver answers questions by asking a set of recursive name
//! servers. The [`Resolver`] provided by this module does so over UDP using
//! the [Tokio](https://tokio.rs/) runtime.
//!
//! A resolver is created from a [`Config`] which, in turn, is usually
//! derived from the system’s `/etc/resolv.conf` via [`ResolvConf`]:
//!
//! ```no_run
//! use stubdns::resolv::Resolver;
//!
//! # async fn lookup() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = Resolver::system().await?;
//! for record in resolver.a_for("example.com").await? {
//!     println!("{}", record);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Each query is sent to the name server with the best score. If that
//! server doesn’t answer within the timeout, the query moves on to the next
//! server until the number of attempts is used up. Servers earn a point for
//! each answer and lose one for each timeout. Scores are halved regularly.
//!
//! Because responses are only ever expected over UDP, answers that don’t
//! fit into the receive buffer are lost.

pub use self::conf::ResolvConf;
pub use self::config::Config;
pub use self::error::{Error, Result};
pub use self::resolver::Resolver;

pub mod conf;
mod config;
mod error;
mod pending;
mod resolver;
mod score;
