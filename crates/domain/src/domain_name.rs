use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical lookup form of a query name: lowercase, trailing dot.
pub fn fqdn(name: &str) -> String {
    let mut out = name.trim().to_ascii_lowercase();
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Domain suffix served by this resolver (used for the SOA record).
///
/// Stored without leading/trailing dots; repeated dots collapse to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DomainSuffix(String);

impl DomainSuffix {
    pub fn new(raw: &str) -> Self {
        let mut s = raw.trim().to_string();
        while s.contains("..") {
            s = s.replace("..", ".");
        }
        let s = s.trim_matches('.').to_string();
        Self(s)
    }

    /// Prefix the suffix with an environment label (`<env>.<domain>`).
    pub fn with_environment(&self, environment: &str) -> Self {
        Self::new(&format!("{}.{}", environment, self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully qualified form, e.g. `"local."`
    pub fn fqdn(&self) -> String {
        fqdn(&self.0)
    }
}

impl From<String> for DomainSuffix {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<DomainSuffix> for String {
    fn from(value: DomainSuffix) -> Self {
        value.0
    }
}

impl fmt::Display for DomainSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
