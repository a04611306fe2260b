//! Post metadata parsing
//!
//! The metadata block holds a JSON object. Keys match case-insensitively,
//! unknown keys are ignored and trailing commas are tolerated. Any type
//! mismatch rejects the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::PostError;

/// Metadata carried by the `meta` fenced block of an index document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PostMetadata {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub lead: String,
    #[serde(rename = "ispublished")]
    pub is_published: bool,
    #[serde(rename = "publishedat", deserialize_with = "published_at")]
    pub published_at: DateTime<Utc>,
    /// Author-supplied slug; the store always replaces it with the directory name
    pub slug: Option<String>,
}

impl PostMetadata {
    /// Deserialize the raw text of a metadata block
    pub fn from_json(text: &str) -> Result<Self, PostError> {
        let value: Value = serde_json::from_str(&strip_trailing_commas(text))?;

        // Lowercase top-level keys so `isPublished`, `ISPUBLISHED` etc. all match
        let Value::Object(map) = value else {
            return Err(PostError::MetadataNotObject);
        };
        let normalized = map
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        Ok(serde_json::from_value(Value::Object(normalized))?)
    }
}

/// A `null` text field reads as the empty string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn published_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_date_string(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {:?}", s)))
}

/// Parse an ISO-8601 date or date-time. Values without an offset are taken as UTC.
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Drop commas that directly precede a closing `}` or `]`, ignoring string contents
fn strip_trailing_commas(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut chars = json.char_indices().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some((i, c)) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = json[i + 1..].trim_start().chars().next();
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}
