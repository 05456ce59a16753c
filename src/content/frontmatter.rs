//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

const YAML_FENCE: &str = "---";
const JSON_FENCE: &str = ";;;";

/// Why a document's front-matter could not be used
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("no front-matter block found")]
    Missing,

    #[error("front-matter opened with `{0}` is never closed")]
    Unterminated(&'static str),

    #[error("unsupported front-matter language `{0}`")]
    UnsupportedLanguage(String),

    #[error("front-matter block is empty")]
    Empty,

    #[error("front-matter is not a key/value mapping")]
    NotAMapping,

    #[error("field `{0}` must not be blank")]
    EmptyField(&'static str),

    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accepts any scalar and keeps its textual form
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarString)
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct OptionalScalar;

    impl<'de> Visitor<'de> for OptionalScalar {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an optional scalar")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            scalar_string(deserializer).map(Some)
        }
    }

    deserializer.deserialize_option(OptionalScalar)
}

struct ScalarString;

impl<'de> serde::de::Visitor<'de> for ScalarString {
    type Value = String;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    // Floats print the way JavaScript prints numbers: `1.0` becomes "1"
    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.to_string())
    }
}

/// Front-matter of a post
///
/// `title` and `slug` are required; every other key lands in `extra`
/// in the order it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,

    #[serde(deserialize_with = "scalar_string")]
    pub slug: String,

    #[serde(
        default,
        deserialize_with = "optional_scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with(YAML_FENCE) {
            return Self::parse_fenced(content);
        }

        if let Some(rest) = content.strip_prefix(JSON_FENCE) {
            return Self::parse_json_fenced(rest);
        }

        Err(FrontMatterError::Missing)
    }

    /// `---` / `---yaml` / `---json` block closed by a line holding only `---`
    fn parse_fenced(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let after_open = &content[YAML_FENCE.len()..];
        let (lang, rest) = match after_open.find('\n') {
            Some(pos) => (after_open[..pos].trim(), &after_open[pos + 1..]),
            None => return Err(FrontMatterError::Unterminated(YAML_FENCE)),
        };

        // A thematic break such as `-----` is markdown, not a fence
        if !lang.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FrontMatterError::Missing);
        }

        let mut offset = 0;
        let mut closed = None;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == YAML_FENCE {
                closed = Some((&rest[..offset], &rest[offset + line.len()..]));
                break;
            }
            offset += line.len();
        }
        let (block, body) = closed.ok_or(FrontMatterError::Unterminated(YAML_FENCE))?;
        let body = body.trim_start_matches(['\n', '\r']);

        let fm = match lang.to_ascii_lowercase().as_str() {
            "" | "yaml" | "yml" => Self::from_yaml(block)?,
            "json" => Self::from_json(block)?,
            other => return Err(FrontMatterError::UnsupportedLanguage(other.to_string())),
        };

        Ok((fm, body))
    }

    /// `;;;` JSON block closed by another `;;;`; the braces are optional
    fn parse_json_fenced(rest: &str) -> Result<(Self, &str), FrontMatterError> {
        let end_pos = rest
            .find(JSON_FENCE)
            .ok_or(FrontMatterError::Unterminated(JSON_FENCE))?;
        let block = rest[..end_pos].trim();
        let body = rest[end_pos + JSON_FENCE.len()..].trim_start_matches(['\n', '\r']);

        let fm = if block.starts_with('{') || block.is_empty() {
            Self::from_json(block)?
        } else {
            Self::from_json(&format!("{{{}}}", block))?
        };

        Ok((fm, body))
    }

    fn from_yaml(block: &str) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Err(FrontMatterError::Empty);
        }

        let value: serde_yaml::Value = serde_yaml::from_str(block)?;
        match value {
            serde_yaml::Value::Null => Err(FrontMatterError::Empty),
            serde_yaml::Value::Mapping(mapping) => {
                let mapping = stringify_keys(mapping)?;
                serde_yaml::from_value::<Self>(serde_yaml::Value::Mapping(mapping))?.validated()
            }
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    fn from_json(block: &str) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Err(FrontMatterError::Empty);
        }

        let value: serde_json::Value = serde_json::from_str(block)?;
        if !value.is_object() {
            return Err(FrontMatterError::NotAMapping);
        }
        serde_json::from_value::<Self>(value)?.validated()
    }

    fn validated(self) -> Result<Self, FrontMatterError> {
        if self.title.trim().is_empty() {
            return Err(FrontMatterError::EmptyField("title"));
        }
        if self.slug.trim().is_empty() {
            return Err(FrontMatterError::EmptyField("slug"));
        }
        Ok(self)
    }
}

/// Turn scalar YAML keys such as `2024:` or `true:` into string keys
fn stringify_keys(mapping: serde_yaml::Mapping) -> Result<serde_yaml::Mapping, FrontMatterError> {
    use serde_yaml::Value;

    let mut out = serde_yaml::Mapping::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                return Err(FrontMatterError::NotAMapping)
            }
        };
        out.insert(Value::String(key), value);
    }
    Ok(out)
}

/// Parse a date string in various formats
pub(crate) fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    None
}
