//! Domain and social handle availability.
//!
//! Provides the `DomainLookup` trait and its WHOIS implementation, the
//! `DomainChecker` that applies a `FailurePolicy` to lookup errors, and the
//! `SocialChecker` trait with its placeholder implementation.

pub mod fakes;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use namecast_model::AvailabilityMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// TLDs checked for every name, in report order.
pub const DEFAULT_TLDS: [&str; 5] = [".com", ".io", ".co", ".ai", ".app"];

/// Social platforms checked for every name, in report order.
pub const DEFAULT_PLATFORMS: [&str; 5] = ["twitter", "instagram", "linkedin", "tiktok", "github"];

/// Errors from domain lookups.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Lookup timed out after {0}s")]
    Timeout(u64),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No WHOIS server known for {0}")]
    UnsupportedTld(String),
}

/// An existing registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
}

/// Trait for domain registration lookups (WHOIS, RDAP, registrar APIs).
#[async_trait]
pub trait DomainLookup: Send + Sync {
    /// Look up a fully qualified domain. `Ok(None)` means no registration exists.
    async fn lookup(&self, domain: &str) -> Result<Option<DomainRecord>, LookupError>;

    /// Get the lookup name for logging.
    fn name(&self) -> &'static str;
}

/// WHOIS client configuration.
#[derive(Debug, Clone)]
pub struct WhoisConfig {
    /// Bound on the whole connect/query/read exchange, in seconds
    pub timeout_secs: u64,
    /// WHOIS port
    pub port: u16,
    /// Send every query to this host instead of the per-TLD registry server
    pub server_override: Option<String>,
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            port: 43,
            server_override: None,
        }
    }
}

/// Registry WHOIS servers by TLD.
const WHOIS_SERVERS: [(&str, &str); 5] = [
    ("com", "whois.verisign-grs.com"),
    ("io", "whois.nic.io"),
    ("co", "whois.nic.co"),
    ("ai", "whois.nic.ai"),
    ("app", "whois.nic.google"),
];

/// Registry phrases meaning "no such registration".
const NOT_FOUND_MARKERS: [&str; 6] = [
    "no match for",
    "not found",
    "no data found",
    "no entries found",
    "status: free",
    "is available for registration",
];

/// WHOIS lookup over TCP port 43.
#[derive(Debug, Clone, Default)]
pub struct WhoisLookup {
    config: WhoisConfig,
}

impl WhoisLookup {
    pub fn new(config: WhoisConfig) -> Self {
        Self { config }
    }

    fn server_for(&self, domain: &str) -> Result<String, LookupError> {
        if let Some(server) = &self.config.server_override {
            return Ok(server.clone());
        }

        let tld = domain.rsplit('.').next().unwrap_or_default();
        WHOIS_SERVERS
            .iter()
            .find(|(t, _)| *t == tld)
            .map(|(_, server)| server.to_string())
            .ok_or_else(|| LookupError::UnsupportedTld(tld.to_string()))
    }

    async fn query(&self, server: &str, domain: &str) -> Result<String, LookupError> {
        let port = self.config.port;
        let exchange = async {
            let mut stream = TcpStream::connect((server, port))
                .await
                .map_err(|e| LookupError::Connection(e.to_string()))?;

            stream
                .write_all(format!("{domain}\r\n").as_bytes())
                .await
                .map_err(|e| LookupError::Connection(e.to_string()))?;

            let mut buf = Vec::new();
            stream
                .read_to_end(&mut buf)
                .await
                .map_err(|e| LookupError::Connection(e.to_string()))?;

            Ok::<_, LookupError>(String::from_utf8_lossy(&buf).into_owned())
        };

        tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), exchange)
            .await
            .map_err(|_| LookupError::Timeout(self.config.timeout_secs))?
    }
}

#[async_trait]
impl DomainLookup for WhoisLookup {
    async fn lookup(&self, domain: &str) -> Result<Option<DomainRecord>, LookupError> {
        let server = self.server_for(domain)?;

        tracing::debug!(domain = %domain, server = %server, "Executing WHOIS query");

        let response = self.query(&server, domain).await?;
        parse_whois_response(domain, &response)
    }

    fn name(&self) -> &'static str {
        "whois"
    }
}

/// Parse a raw WHOIS response.
///
/// A `Domain Name:` line means registered; a registry "not found" phrase
/// means available; anything else is ambiguous and reported as an error.
pub fn parse_whois_response(
    domain: &str,
    response: &str,
) -> Result<Option<DomainRecord>, LookupError> {
    let field = |key: &str| {
        response.lines().find_map(|line| {
            let (k, v) = line.trim().split_once(':')?;
            let v = v.trim();
            (k.trim().eq_ignore_ascii_case(key) && !v.is_empty()).then(|| v.to_string())
        })
    };

    if field("Domain Name").is_some() {
        return Ok(Some(DomainRecord {
            domain: domain.to_string(),
            registrar: field("Registrar"),
            creation_date: field("Creation Date"),
        }));
    }

    let lower = response.to_lowercase();
    if NOT_FOUND_MARKERS.iter().any(|m| lower.contains(m)) {
        return Ok(None);
    }

    Err(LookupError::ParseError(format!(
        "Unrecognized WHOIS response for {domain} ({} bytes)",
        response.len()
    )))
}

/// What to report when a domain lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Report the domain as available
    Open,
    /// Report the domain as taken
    #[default]
    Closed,
}

impl FailurePolicy {
    pub fn availability(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!("unknown failure policy '{other}' (expected open or closed)")),
        }
    }
}

/// Checks a name across a list of TLDs.
#[derive(Clone)]
pub struct DomainChecker {
    lookup: Arc<dyn DomainLookup>,
    tlds: Vec<String>,
    policy: FailurePolicy,
}

impl DomainChecker {
    pub fn new(lookup: Arc<dyn DomainLookup>) -> Self {
        Self {
            lookup,
            tlds: DEFAULT_TLDS.iter().map(|t| t.to_string()).collect(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tlds(mut self, tlds: Vec<String>) -> Self {
        self.tlds = tlds;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Look up `name + tld` for every TLD, one at a time.
    pub async fn check(&self, name: &str) -> AvailabilityMap {
        let name_lower = name.to_lowercase();
        let mut result = AvailabilityMap::new();

        for tld in &self.tlds {
            let domain = format!("{name_lower}{tld}");
            let available = match self.lookup.lookup(&domain).await {
                Ok(record) => record.is_none(),
                Err(e) => {
                    tracing::warn!(
                        domain = %domain,
                        backend = self.lookup.name(),
                        policy = %self.policy,
                        error = %e,
                        "Domain lookup failed, applying failure policy"
                    );
                    self.policy.availability()
                }
            };
            result.insert(tld.clone(), available);
        }

        result
    }
}

/// Trait for social handle availability checks.
#[async_trait]
pub trait SocialChecker: Send + Sync {
    async fn check(&self, name: &str) -> AvailabilityMap;

    fn name(&self) -> &'static str;
}

/// Placeholder checker: every handle is reported available.
///
/// Stands in for per-platform handle lookups until those are wired up.
#[derive(Debug, Clone)]
pub struct StubSocialChecker {
    platforms: Vec<String>,
}

impl Default for StubSocialChecker {
    fn default() -> Self {
        Self {
            platforms: DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[async_trait]
impl SocialChecker for StubSocialChecker {
    async fn check(&self, _name: &str) -> AvailabilityMap {
        self.platforms.iter().map(|p| (p.clone(), true)).collect()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryDomainLookup;
    use tokio::net::TcpListener;

    const VERISIGN_NO_MATCH: &str = "No match for \"KESTRELLY.COM\".\r\n>>> Last update of whois database: 2026-10-19T18:00:00Z <<<\r\n";

    const VERISIGN_REGISTERED: &str = "   Domain Name: GOOGLE.COM\r\n   Registry Domain ID: 2138514_DOMAIN_COM-VRSN\r\n   Registrar: MarkMonitor Inc.\r\n   Creation Date: 1997-09-15T04:00:00Z\r\n";

    #[test]
    fn test_parse_registered() {
        let record = parse_whois_response("google.com", VERISIGN_REGISTERED)
            .unwrap()
            .unwrap();
        assert_eq!(record.domain, "google.com");
        assert_eq!(record.registrar.as_deref(), Some("MarkMonitor Inc."));
        assert_eq!(record.creation_date.as_deref(), Some("1997-09-15T04:00:00Z"));
    }

    #[test]
    fn test_parse_not_found() {
        assert!(parse_whois_response("kestrelly.com", VERISIGN_NO_MATCH)
            .unwrap()
            .is_none());
        assert!(parse_whois_response("kestrelly.io", "Domain not found.\n")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_parse_ambiguous() {
        let err = parse_whois_response("x.ai", "Rate limit exceeded\n").unwrap_err();
        assert!(matches!(err, LookupError::ParseError(_)));
    }

    #[test]
    fn test_server_table() {
        let whois = WhoisLookup::default();
        assert_eq!(whois.server_for("a.com").unwrap(), "whois.verisign-grs.com");
        assert_eq!(whois.server_for("a.app").unwrap(), "whois.nic.google");
        assert!(matches!(
            whois.server_for("a.xyz"),
            Err(LookupError::UnsupportedTld(tld)) if tld == "xyz"
        ));
    }

    #[test]
    fn test_failure_policy_parse() {
        assert_eq!("open".parse::<FailurePolicy>().unwrap(), FailurePolicy::Open);
        assert_eq!(" Closed ".parse::<FailurePolicy>().unwrap(), FailurePolicy::Closed);
        assert!("maybe".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::default(), FailurePolicy::Closed);
    }

    #[tokio::test]
    async fn test_whois_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0_u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"kestrelly.com\r\n");
            socket.write_all(VERISIGN_NO_MATCH.as_bytes()).await.unwrap();
        });

        let whois = WhoisLookup::new(WhoisConfig {
            port,
            server_override: Some("127.0.0.1".to_string()),
            ..Default::default()
        });
        assert!(whois.lookup("kestrelly.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_whois_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let whois = WhoisLookup::new(WhoisConfig {
            timeout_secs: 1,
            port,
            server_override: Some("127.0.0.1".to_string()),
        });
        let err = whois.lookup("slow.com").await.unwrap_err();
        assert!(matches!(err, LookupError::Timeout(1)));
    }

    #[tokio::test]
    async fn test_domain_checker_order_and_lowercase() {
        let lookup = Arc::new(MemoryDomainLookup::new().with_registered(["kestrel.com"]));
        let checker = DomainChecker::new(lookup.clone());

        let result = checker.check("Kestrel").await;
        let tlds: Vec<_> = result.keys().cloned().collect();
        assert_eq!(tlds, DEFAULT_TLDS.to_vec());
        assert!(!result[".com"]);
        assert!(result[".io"]);
        assert_eq!(lookup.calls()[0], "kestrel.com");
    }

    #[tokio::test]
    async fn test_domain_checker_failure_policy() {
        let lookup = Arc::new(MemoryDomainLookup::new().with_failing(["flaky.io"]));

        let open = DomainChecker::new(lookup.clone()).with_policy(FailurePolicy::Open);
        assert!(open.check("flaky").await[".io"]);

        let closed = DomainChecker::new(lookup).with_policy(FailurePolicy::Closed);
        let result = closed.check("flaky").await;
        assert!(!result[".io"]);
        assert!(result[".com"]);
    }

    #[tokio::test]
    async fn test_stub_social_all_available() {
        let result = StubSocialChecker::default().check("anything").await;
        assert_eq!(result.len(), DEFAULT_PLATFORMS.len());
        assert!(result.values().all(|v| *v));
    }
}
