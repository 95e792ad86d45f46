use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// ASN -- Autonomous System Number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(u32);

impl Asn {
    pub const fn new(asn: u32) -> Self {
        Asn(asn)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Checks if the given ASN is reserved for private use.
    ///
    /// <https://datatracker.ietf.org/doc/rfc7249/>
    pub const fn is_private(&self) -> bool {
        match self.0 {
            64512..=65534 => true,           // reserved by RFC6996
            4200000000..=4294967294 => true, // reserved by RFC6996
            _ => false,
        }
    }

    /// Checks if the given ASN is public, i.e. not part of IANA's "Special-Purpose AS Numbers"
    /// registry. Private and documentation ranges never have a Team Cymru entry, so these are
    /// not worth a DNS query.
    ///
    ///  - <https://datatracker.ietf.org/doc/rfc7249/>
    ///  - <https://www.iana.org/assignments/iana-as-numbers-special-registry/iana-as-numbers-special-registry.xhtml>
    pub const fn is_public(&self) -> bool {
        match self.0 {
            0 => false,                       // reserved by RFC7607
            112 => false,                     // reserved by RFC7534
            23456 => false,                   // reserved by RFC6793
            64496..=64511 => false,           // reserved by RFC5398
            64512..=65534 => false,           // reserved by RFC6996
            65535 => false,                   // reserved by RFC7300
            65536..=65551 => false,           // reserved by RFC5398
            4200000000..=4294967294 => false, // reserved by RFC6996
            4294967295 => false,              // reserved by RFC7300
            _ => true,
        }
    }

    /// Checks if the given ASN is reserved for use in documentation and sample code.
    ///
    /// <https://datatracker.ietf.org/doc/rfc7249/>
    pub const fn is_reserved_for_documentation(&self) -> bool {
        matches!(self.0, 64496..=64511 | 65536..=65551)
    }

    /// Placeholder label used when no name is known for this AS.
    pub fn fallback_label(&self) -> String {
        format!("AS{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(v: u32) -> Self {
        Asn(v)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.0
    }
}

impl PartialEq<u32> for Asn {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

/// Accepts both `13335` and `AS13335` (case-insensitive prefix).
impl FromStr for Asn {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = match s.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("as") => &s[2..],
            _ => s,
        };
        digits.parse::<u32>().map(Asn)
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
