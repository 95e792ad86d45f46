//! Team Cymru's [IP-to-ASN](https://www.team-cymru.org/IP-ASN-mapping.html) service queried via
//! DNS TXT records.
use crate::error::BgpmapError;
use crate::models::Asn;
use crate::resolver::AsnLookup;
use chrono::NaiveDate;
use log::debug;
use resolve::config::DnsConfig;
use resolve::record::Txt;
use resolve::resolver::DnsResolver;
use std::time::Duration;

pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// ASN information as published by Team Cymru.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CymruAsn {
    pub as_number: Asn,
    pub country_code: String,
    /// Regional registry name
    pub registry: String,
    pub allocated: Option<NaiveDate>,
    /// Autonomous System description, e.g. `TEAM-CYMRU - Team Cymru Inc., US`
    pub as_name: String,
}

pub struct CymruResolver {
    resolver: DnsResolver,
}

impl CymruResolver {
    /// Create a resolver from the system DNS configuration.
    pub fn new(timeout: Duration) -> Result<Self, BgpmapError> {
        let mut config = DnsConfig::load_default()?;
        config.timeout = timeout;
        Ok(CymruResolver {
            resolver: DnsResolver::new(config)?,
        })
    }

    /// Query everything Cymru knows about `asn`.
    pub fn query(&self, asn: Asn) -> Result<Vec<CymruAsn>, BgpmapError> {
        let query = format!("AS{}.asn.cymru.com", asn);
        debug!("resolving TXT {}", query);

        let records: Vec<Txt> =
            self.resolver
                .resolve_record(&query)
                .map_err(|e| BgpmapError::Resolution {
                    asn: asn.to_u32(),
                    reason: e.to_string(),
                })?;

        // Cymru answers in ASCII; records which are not valid UTF-8 are dropped
        let txts = records
            .into_iter()
            .filter_map(|rec| String::from_utf8(rec.data).ok())
            .collect();
        Ok(parse_cymru_asn(txts))
    }
}

impl AsnLookup for CymruResolver {
    fn lookup(&self, asn: Asn) -> Result<String, BgpmapError> {
        if !asn.is_public() {
            return Err(BgpmapError::Resolution {
                asn: asn.to_u32(),
                reason: "special-purpose AS number".to_string(),
            });
        }

        self.query(asn)?
            .into_iter()
            .find(|entry| entry.as_number == asn && !entry.as_name.is_empty())
            .map(|entry| entry.as_name)
            .ok_or_else(|| BgpmapError::Resolution {
                asn: asn.to_u32(),
                reason: "no results found".to_string(),
            })
    }
}

/// Parse Cymru's ASN query result strings.
///
/// Sample DNS TXT response:
///
///   "23028 | US | arin | 2002-01-04 | TEAM-CYMRU - Team Cymru Inc., US"
///
/// Records without a numeric first field or with fewer than five fields are skipped.
pub fn parse_cymru_asn(records: Vec<String>) -> Vec<CymruAsn> {
    let mut results = Vec::with_capacity(records.len());

    for record in records {
        let record = record.trim_matches(|c| c == '"' || c == '\'');
        let fields: Vec<&str> = record.splitn(5, '|').map(str::trim).collect();
        if fields.len() < 5 {
            continue;
        }
        let as_number = match fields[0].parse::<Asn>() {
            Err(_) => continue,
            Ok(n) => n,
        };

        results.push(CymruAsn {
            as_number,
            country_code: fields[1].to_string(),
            registry: fields[2].to_string(),
            allocated: NaiveDate::parse_from_str(fields[3], "%Y-%m-%d").ok(),
            as_name: fields[4].to_string(),
        });
    }

    results
}
