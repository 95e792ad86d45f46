use crate::error::BgpmapError;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

/// The resource a looking-glass query is made for: a single address or a network prefix.
///
/// Prefixes are parsed strictly: `193.0.0.0/21` is accepted while `193.0.0.1/21` is rejected,
/// since the looking glass does not search for the nearest covering announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Address(IpAddr),
    Prefix(IpNet),
}

impl Target {
    pub fn is_ipv4(&self) -> bool {
        match self {
            Target::Address(addr) => addr.is_ipv4(),
            Target::Prefix(net) => matches!(net, IpNet::V4(_)),
        }
    }
}

impl FromStr for Target {
    type Err = BgpmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = IpAddr::from_str(s) {
            return Ok(Target::Address(addr));
        }

        let net = IpNet::from_str(s).map_err(|_| BgpmapError::InvalidInput(s.to_string()))?;
        if net.trunc() != net {
            return Err(BgpmapError::InvalidInput(format!(
                "{} has host bits set, did you mean {}?",
                s,
                net.trunc()
            )));
        }
        Ok(Target::Prefix(net))
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Address(addr) => write!(f, "{}", addr),
            Target::Prefix(net) => write!(f, "{}", net),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let target = Target::from_str("193.0.6.139").unwrap();
        assert_eq!(target, Target::Address("193.0.6.139".parse().unwrap()));
        assert!(target.is_ipv4());

        let target = Target::from_str("2001:67c:2e8:22::c100:68b").unwrap();
        assert!(!target.is_ipv4());
    }

    #[test]
    fn test_parse_prefix() {
        let target = Target::from_str("193.0.0.0/21").unwrap();
        assert_eq!(target.to_string(), "193.0.0.0/21");

        let target = Target::from_str("2001:67c:2e8::/48").unwrap();
        assert_eq!(target, Target::Prefix("2001:67c:2e8::/48".parse().unwrap()));
    }

    #[test]
    fn test_reject_host_bits() {
        let err = Target::from_str("193.0.0.1/21").unwrap_err();
        assert!(matches!(err, BgpmapError::InvalidInput(_)));
        assert!(err.to_string().contains("193.0.0.0/21"));
    }

    #[test]
    fn test_reject_garbage() {
        for input in ["not-an-ip", "", "1.2.3", "10.0.0.0/33", "::/129", "1.2.3.4/"] {
            assert!(
                matches!(Target::from_str(input), Err(BgpmapError::InvalidInput(_))),
                "{} should be rejected",
                input
            );
        }
    }
}
