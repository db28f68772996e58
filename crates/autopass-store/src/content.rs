//! Parsing of decrypted entry content.
//!
//! `pass` entries follow a loose convention: the first line is the secret,
//! everything after it is a YAML mapping of extra attributes:
//!
//! ```text
//! hunter2
//! user: alice
//! url: example.com
//! ```

use serde_json::Value;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

use crate::types::Attributes;

/// Why an attribute block could not be turned into [`Attributes`].
#[derive(Debug, Error)]
pub enum ContentParseError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping of attributes, found {0}")]
    NotAMapping(&'static str),

    #[error("anchors and aliases are not allowed (line {0})")]
    Alias(usize),

    #[error("tagged values are not allowed: {0}")]
    Tag(String),

    #[error("unsupported attribute key: {0}")]
    UnsupportedKey(String),

    #[error("unsupported attribute value: {0}")]
    Value(#[from] serde_json::Error),
}

/// Decrypted content split into its secret line and attribute block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Content<'a> {
    /// First line of the plaintext.
    pub secret_line: &'a str,
    /// Everything after the first line.
    pub attributes_block: &'a str,
}

impl<'a> Content<'a> {
    /// Split plaintext at its first newline.
    pub fn split(plaintext: &'a str) -> Self {
        let (secret_line, attributes_block) =
            plaintext.split_once('\n').unwrap_or((plaintext, ""));
        Self {
            secret_line: secret_line.strip_suffix('\r').unwrap_or(secret_line),
            attributes_block,
        }
    }

    /// Parse the attribute block and store the secret line under `password_key`.
    pub fn parse(&self, password_key: &str) -> Result<Attributes, ContentParseError> {
        let mut attributes = parse_attributes_block(self.attributes_block)?;
        attributes.insert(password_key, self.secret_line);
        Ok(attributes)
    }
}

/// Parse a YAML attribute block. Blank or null documents give an empty mapping.
///
/// Only plain data is accepted: anchors, aliases and explicit tags are
/// rejected.
pub fn parse_attributes_block(block: &str) -> Result<Attributes, ContentParseError> {
    if block.trim().is_empty() {
        return Ok(Attributes::new());
    }

    if let Some(line) = find_anchor_or_alias(block) {
        return Err(ContentParseError::Alias(line));
    }

    let document = serde_yaml::from_str::<YamlValue>(block)?;
    reject_tags(&document)?;

    let mapping = match document {
        YamlValue::Null => return Ok(Attributes::new()),
        YamlValue::Mapping(mapping) => mapping,
        other => return Err(ContentParseError::NotAMapping(kind(&other))),
    };

    mapping
        .into_iter()
        .map(|(key, value)| -> Result<(String, Value), ContentParseError> {
            Ok((attribute_key(key)?, serde_json::to_value(value)?))
        })
        .collect()
}

/// Line number (1-based) of the first anchor (`&name`) or alias (`*name`).
///
/// Only node positions count: the start of a line, after `: `, `- ` or `? `,
/// and inside flow collections after `[`, `{` or `,`. Quoted scalars,
/// comments and the bodies of `|`/`>` block scalars are skipped.
fn find_anchor_or_alias(block: &str) -> Option<usize> {
    let mut block_scalar_indent: Option<usize> = None;

    for (index, line) in block.lines().enumerate() {
        let indent = line.len() - line.trim_start().len();
        if let Some(parent) = block_scalar_indent {
            if line.trim().is_empty() || indent > parent {
                continue;
            }
            block_scalar_indent = None;
        }

        if scan_line(line) {
            return Some(index + 1);
        }

        let opens_block_scalar = line
            .split_whitespace()
            .last()
            .filter(|token| token.starts_with(['|', '>']))
            .is_some_and(|token| {
                token
                    .chars()
                    .all(|c| matches!(c, '|' | '>' | '+' | '-') || c.is_ascii_digit())
            });
        if opens_block_scalar {
            block_scalar_indent = Some(indent);
        }
    }

    None
}

/// Whether `line` has `&` or `*` at a node position.
fn scan_line(line: &str) -> bool {
    let chars: Vec<char> = line.chars().collect();
    let separated = |i: usize| chars.get(i).map_or(true, |c| c.is_whitespace());

    let mut node_start = true;
    let mut flow_depth = 0usize;
    let mut quote: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(q) = quote {
            if q == '"' && c == '\\' {
                i += 1;
            } else if c == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match c {
            ' ' | '\t' => {}
            '#' if i == 0 || chars[i - 1].is_whitespace() => return false,
            '&' | '*' if node_start && !separated(i + 1) => return true,
            '\'' | '"' if node_start => {
                quote = Some(c);
                node_start = false;
            }
            '[' | '{' if node_start => flow_depth += 1,
            ']' | '}' if flow_depth > 0 => {
                flow_depth -= 1;
                node_start = false;
            }
            ',' if flow_depth > 0 => node_start = true,
            '-' | '?' if node_start && separated(i + 1) => {}
            ':' if separated(i + 1) || flow_depth > 0 => node_start = true,
            _ => node_start = false,
        }
        i += 1;
    }

    false
}

/// Fail on the first explicitly tagged node.
fn reject_tags(value: &YamlValue) -> Result<(), ContentParseError> {
    match value {
        YamlValue::Tagged(tagged) => Err(ContentParseError::Tag(tagged.tag.to_string())),
        YamlValue::Sequence(items) => items.iter().try_for_each(reject_tags),
        YamlValue::Mapping(mapping) => mapping
            .iter()
            .try_for_each(|(key, value)| reject_tags(key).and_then(|()| reject_tags(value))),
        _ => Ok(()),
    }
}

fn attribute_key(key: YamlValue) -> Result<String, ContentParseError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(ContentParseError::UnsupportedKey(kind(&other).to_string())),
    }
}

fn kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}
