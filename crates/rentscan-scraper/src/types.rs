//! Wire types for the portal's typeahead and search endpoints.
//!
//! ## Observed shapes
//!
//! ### Typeahead
//! `GET /typeAhead/<region>/<token>/` returns
//! `{"typeAheadLocations": [{"displayName": "London", "locationIdentifier": "REGION^87490", ...}]}`.
//! Entries are ranked by the server; the order is significant.
//!
//! ### Search
//! `GET /api/_search?...` returns `{"properties": [...], "resultCount": "1,234", ...}`.
//! `resultCount` is a comma-grouped decimal string on live responses; a plain
//! JSON number is accepted as well. It may be absent on error-ish pages.

use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One listing object as returned by the search API. The field set is
/// server-defined and varies between listings.
pub type ListingSummary = Value;

/// Opaque server-assigned key for a geographic area (e.g. `REGION^87490`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TypeAheadResponse {
    #[serde(default)]
    pub type_ahead_locations: Vec<TypeAheadLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TypeAheadLocation {
    pub location_identifier: String,
}

/// One response from the search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub properties: Vec<ListingSummary>,

    /// Total results for the query. Only meaningful on the first page.
    #[serde(default, deserialize_with = "result_count")]
    pub result_count: Option<usize>,
}

/// `resultCount` arrives as `"1,234"`, `"17"`, `17` or `null`.
fn result_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| *c != ',').collect();
            let digits = digits.trim();
            if digits.is_empty() {
                None
            } else {
                Some(digits.parse().map_err(de::Error::custom)?)
            }
        }
        Value::Number(num) => Some(
            num.as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| de::Error::custom("resultCount is not a non-negative integer"))?,
        ),
        _ => return Err(de::Error::custom("resultCount has an unexpected type")),
    })
}
