//! YAML frontmatter extraction.

use crate::error::{ConvertError, Result};
use crate::types::{Alias, Frontmatter};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the closing delimiter.
    pub content: &'a str,
}

/// Split content into frontmatter and body.
///
/// The block opens at the first line consisting solely of `---` and closes
/// at the next such line. Without both delimiters the whole input is body.
/// A leading byte-order mark is ignored.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut offset = 0;
    let mut yaml_start = None;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if !is_delimiter(line) {
            continue;
        }

        match yaml_start {
            None => yaml_start = Some(offset),
            Some(start) => {
                let yaml = content[start..line_start].trim_end_matches(['\n', '\r']);
                return FrontmatterSplit {
                    yaml: Some(yaml),
                    content: &content[offset..],
                };
            }
        }
    }

    FrontmatterSplit {
        yaml: None,
        content,
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == "---"
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Parse and validate the frontmatter of the note at `path`.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<Frontmatter> {
    let yaml = extract_frontmatter(content).ok_or_else(|| ConvertError::MissingFrontmatter {
        path: path.to_path_buf(),
    })?;

    let value: Value = if yaml.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(yaml).map_err(|e| malformed(path, e.to_string()))?
    };
    frontmatter_from_value(&value, path)
}

/// Build a typed [`Frontmatter`] from an already parsed YAML value.
pub fn frontmatter_from_value(value: &Value, path: &Path) -> Result<Frontmatter> {
    let mapping = match value {
        Value::Mapping(m) => Some(m),
        Value::Null => None,
        _ => return Err(malformed(path, "frontmatter is not a mapping")),
    };
    let field = |key: &str| mapping.and_then(|m| m.get(key)).filter(|v| !v.is_null());

    let title = match field("title") {
        None => None,
        Some(v) => Some(
            scalar_to_string(v).ok_or_else(|| malformed(path, "'title' must be a scalar"))?,
        ),
    }
    .filter(|t| !t.trim().is_empty())
    .ok_or_else(|| missing(path, "title"))?;

    let created_raw = field("created").ok_or_else(|| missing(path, "created"))?;
    let created = scalar_to_string(created_raw)
        .as_deref()
        .and_then(parse_created)
        .ok_or_else(|| malformed(path, "'created' is not a valid date-time"))?;

    let aliases = match field("aliases") {
        None => None,
        Some(v) => Some(parse_aliases(v, path)?),
    };
    let tags = match field("tags") {
        None => None,
        Some(v) => Some(parse_tags(v, path)?),
    };

    Ok(Frontmatter {
        title,
        created,
        aliases,
        tags,
    })
}

/// Parse a `created` timestamp.
///
/// Accepts RFC 3339 (keeping the wall-clock time in its own offset), naive
/// date-times with `T` or a space separator, and bare dates (midnight).
pub fn parse_created(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %:z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.naive_local());
        }
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_aliases(value: &Value, path: &Path) -> Result<Vec<Option<Alias>>> {
    let entries = match value {
        Value::Sequence(seq) => seq,
        // A single alias written as a bare string
        other => {
            let text = scalar_to_string(other)
                .ok_or_else(|| malformed(path, "'aliases' must be a list"))?;
            return Ok(vec![Some(Alias::Text(text))]);
        }
    };

    entries
        .iter()
        .map(|entry| -> Result<Option<Alias>> {
            match entry {
                Value::Null => Ok(None),
                Value::Mapping(m) => Ok(Some(Alias::Pairs(mapping_pairs(m, path)?))),
                other => scalar_to_string(other)
                    .map(|s| Some(Alias::Text(s)))
                    .ok_or_else(|| malformed(path, "alias entries must be strings or mappings")),
            }
        })
        .collect()
}

fn parse_tags(value: &Value, path: &Path) -> Result<Vec<Option<String>>> {
    let entries = match value {
        Value::Sequence(seq) => seq,
        other => {
            let tag =
                scalar_to_string(other).ok_or_else(|| malformed(path, "'tags' must be a list"))?;
            return Ok(vec![Some(tag)]);
        }
    };

    entries
        .iter()
        .map(|entry| match entry {
            Value::Null => Ok(None),
            other => scalar_to_string(other)
                .map(Some)
                .ok_or_else(|| malformed(path, "tag entries must be strings")),
        })
        .collect()
}

fn mapping_pairs(mapping: &Mapping, path: &Path) -> Result<Vec<(String, String)>> {
    mapping
        .iter()
        .map(|(k, v)| -> Result<(String, String)> {
            let key = scalar_to_string(k)
                .ok_or_else(|| malformed(path, "alias mapping keys must be strings"))?;
            let value = match v {
                Value::Null => String::new(),
                other => scalar_to_string(other)
                    .ok_or_else(|| malformed(path, "alias mapping values must be scalars"))?,
            };
            Ok((key, value))
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn malformed(path: &Path, message: impl Into<String>) -> ConvertError {
    ConvertError::MalformedMetadata {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn missing(path: &Path, field: &'static str) -> ConvertError {
    ConvertError::MissingRequiredField {
        path: path.to_path_buf(),
        field,
    }
}
