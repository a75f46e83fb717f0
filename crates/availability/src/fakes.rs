//! In-memory lookup fake (testing only).
//!
//! `MemoryDomainLookup` answers from fixed sets of registered and failing
//! domains and records every domain it was asked about.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{DomainLookup, DomainRecord, LookupError};

#[derive(Debug, Default)]
pub struct MemoryDomainLookup {
    registered: HashSet<String>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MemoryDomainLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domains reported as registered, e.g. `"google.com"`.
    pub fn with_registered<'a>(mut self, domains: impl IntoIterator<Item = &'a str>) -> Self {
        self.registered
            .extend(domains.into_iter().map(str::to_lowercase));
        self
    }

    /// Domains whose lookup fails with a connection error.
    pub fn with_failing<'a>(mut self, domains: impl IntoIterator<Item = &'a str>) -> Self {
        self.failing.extend(domains.into_iter().map(str::to_lowercase));
        self
    }

    /// Every domain looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl DomainLookup for MemoryDomainLookup {
    async fn lookup(&self, domain: &str) -> Result<Option<DomainRecord>, LookupError> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(domain.to_string());

        if self.failing.contains(domain) {
            return Err(LookupError::Connection("simulated failure".to_string()));
        }

        Ok(self.registered.contains(domain).then(|| DomainRecord {
            domain: domain.to_string(),
            registrar: None,
            creation_date: None,
        }))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
