//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// information is represented by the record. A query includes the type
    /// of record information is requested for. A few additional types,
    /// called query types, can only be used in questions. This type
    /// represents both.
    ///
    /// Only the types of [RFC 1035] plus a few that are still in common use
    /// have constants. Any other value is kept as is.
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    =>
    Rtype, u16, "TYPE";

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// A mail destination.
    ///
    /// (Obsolete – use MX)
    (MD => 3, "MD")

    /// A mail forwarder.
    ///
    /// (Obsolete – use MX)
    (MF => 4, "MF")

    /// The canonical name for an alias
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A mailbox domain name.
    (MB => 7, "MB")

    /// A mail group member
    (MG => 8, "MG")

    /// A mail rename domain name.
    (MR => 9, "MR")

    /// A null resource record.
    (NULL => 10, "NULL")

    /// A well known service description.
    (WKS => 11, "WKS")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mailbox or mail list information.
    (MINFO => 14, "MINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Sender Policy Framework.
    ///
    /// (Deprecated in favour of TXT but still found in the wild.)
    (SPF => 99, "SPF")

    /// A request for a transfer of an entire zone.
    (AXFR => 252, "AXFR")

    /// A request for mailbox-related records (MB, MG or MR).
    (MAILB => 253, "MAILB")

    /// A request for mail agent RRs.
    (MAILA => 254, "MAILA")

    /// A request for all records the server has available.
    (ANY => 255, "ANY")
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn mnemonics() {
        assert_eq!(Rtype::from_int(15), Rtype::MX);
        assert_eq!(Rtype::MX.to_string(), "MX");
        assert_eq!(Rtype::from_mnemonic("cname"), Some(Rtype::CNAME));
        assert_eq!(Rtype::from_int(65280).to_string(), "TYPE65280");
        assert_eq!(Rtype::from_str("type65280"), Ok(Rtype::from_int(65280)));
        assert!(Rtype::from_str("BOGUS").is_err());
        assert!(!Rtype::from_int(65280).is_known());
    }
}
