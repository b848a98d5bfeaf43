use std::fmt;
use std::str::FromStr;

/// Listing channel sent as the `channel` search parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Rent,
    Buy,
}

impl Channel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Rent => "RENT",
            Channel::Buy => "BUY",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RENT" => Ok(Channel::Rent),
            "BUY" => Ok(Channel::Buy),
            other => Err(format!("unknown channel \"{other}\" (expected RENT or BUY)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Portal origin, e.g. `https://www.rightmove.co.uk`. No trailing slash.
    pub base_url: String,
    /// Region segment of the typeahead path (`/typeAhead/<region>/...`).
    pub typeahead_region: String,
    pub channel: Channel,
    /// Caller-side soft cap on search results; the server hard cap still applies.
    pub max_results: usize,
    pub request_timeout_secs: u64,
    /// Whole-batch deadline for concurrent page/detail fetches. `None` = no deadline.
    pub batch_timeout_secs: Option<u64>,
    /// Ceiling on in-flight requests per batch. `None` = unbounded.
    pub max_concurrent_requests: Option<usize>,
    pub user_agent: String,
}
