//! Record data from [RFC 1035]: initial record types.
//!
//! This RFC defines the initial set of record types. Only those still
//! relevant for a stub resolver have their own types here. Names serving as
//! the data of CNAME, NS and PTR records don't need a type of their own.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

pub use self::a::A;
pub use self::mx::Mx;
pub use self::null::Null;
pub use self::soa::Soa;
pub use self::txt::Txt;

mod a;
mod mx;
mod null;
mod soa;
mod txt;
