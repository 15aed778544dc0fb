//! Options controlling how Swagger documents are turned into types.
//!
//! Two historical quirks of the generated output are kept by default and can
//! be switched off individually:
//!
//! - [`BodyParamPolicy`]: body parameters are listed with the query
//!   parameters unless [`BodyParamPolicy::Body`] is selected.
//! - [`RefPolicy`]: a resolvable `$ref` only proves the definition exists and
//!   renders as `{}` unless [`RefPolicy::Substitute`] is selected.
//!
//! # Example
//!
//! ```rust
//! use chainapi_core::options::{BodyParamPolicy, GenerateOptions, RefPolicy};
//!
//! let options = GenerateOptions {
//!     body_params: BodyParamPolicy::Body,
//!     refs: RefPolicy::Substitute,
//!     ..Default::default()
//! };
//! assert!(options.includes_chain("evmos"));
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Where body parameters end up in the generated parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyParamPolicy {
    /// Listed together with the query parameters; the body type stays `undefined`
    #[default]
    Query,
    /// Listed in their own body parameter type
    Body,
}

/// How resolvable `$ref` pointers are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefPolicy {
    /// The reference node is rendered as-is, which yields `{}`
    #[default]
    Legacy,
    /// The referenced definition is expanded in place
    Substitute,
}

impl BodyParamPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl RefPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Substitute => "substitute",
        }
    }
}

impl FromStr for BodyParamPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "body" => Ok(Self::Body),
            _ => Err(format!("Unknown body parameter policy: {}", s)),
        }
    }
}

impl FromStr for RefPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "substitute" => Ok(Self::Substitute),
            _ => Err(format!("Unknown reference policy: {}", s)),
        }
    }
}

impl fmt::Display for BodyParamPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RefPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Placement of body parameters
    pub body_params: BodyParamPolicy,

    /// Rendering of resolvable references
    pub refs: RefPolicy,

    /// Chains to include; empty means every supplied chain
    pub chains: Vec<String>,
}

impl GenerateOptions {
    /// Whether documents for `chain` take part in this run
    pub fn includes_chain(&self, chain: &str) -> bool {
        self.chains.is_empty() || self.chains.iter().any(|c| c == chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("query".parse::<BodyParamPolicy>(), Ok(BodyParamPolicy::Query));
        assert_eq!("BODY".parse::<BodyParamPolicy>(), Ok(BodyParamPolicy::Body));
        assert!("header".parse::<BodyParamPolicy>().is_err());
        assert_eq!("substitute".parse::<RefPolicy>(), Ok(RefPolicy::Substitute));
        assert_eq!(RefPolicy::default().to_string(), "legacy");
    }

    #[test]
    fn test_chain_filter() {
        let all = GenerateOptions::default();
        assert!(all.includes_chain("kyve"));

        let some = GenerateOptions {
            chains: vec!["evmos".into()],
            ..Default::default()
        };
        assert!(some.includes_chain("evmos"));
        assert!(!some.includes_chain("kyve"));
    }
}
