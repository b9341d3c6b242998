//! schema.org JSON-LD extraction from raw HTML.
//!
//! Landing pages behind a DOI usually embed one or more
//! `<script type="application/ld+json">` blocks. Publishers mix the actual
//! product description with site chrome (breadcrumbs, the publisher itself,
//! the page), so selection skips a fixed set of non-product types and takes
//! the first remaining schema.org block in document order.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::types::Record;

/// Vocabulary marker an eligible block's `@context` must mention.
pub const SCHEMA_ORG_MARKER: &str = "schema.org";

/// Types describing page furniture rather than a product.
pub const EXCLUDED_TYPES: &[&str] = &["BreadcrumbList", "Organization", "WebSite", "WebPage", "Person"];

fn jsonld_script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
            .expect("json-ld script regex is valid")
    })
}

/// Raw bodies of every JSON-LD script tag, in document order.
pub fn extract_blocks(html: &str) -> Vec<&str> {
    jsonld_script_re()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .collect()
}

/// A JSON-LD block after parsing.
#[derive(Debug, Clone)]
pub enum ParsedBlock {
    Object(Record),
    /// Valid JSON, but not a single object (e.g. a top-level array).
    NotAnObject,
    Invalid(String),
}

/// Parse every block, keeping failures so callers can report them.
pub fn parse_blocks(html: &str) -> Vec<ParsedBlock> {
    extract_blocks(html)
        .into_iter()
        .map(|text| match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(obj)) => ParsedBlock::Object(obj),
            Ok(_) => ParsedBlock::NotAnObject,
            Err(e) => ParsedBlock::Invalid(e.to_string()),
        })
        .collect()
}

/// Whether `@context` mentions schema.org, case-insensitively. Object and
/// array contexts are matched against their JSON text.
pub fn has_schema_org_context(block: &Record) -> bool {
    let context = match block.get("@context") {
        None | Some(Value::Null) => return false,
        Some(Value::String(s)) => s.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    };
    context.contains(SCHEMA_ORG_MARKER)
}

/// Whether `@type` names page furniture. A list of types is excluded only
/// when every entry is.
pub fn is_excluded_type(block: &Record) -> bool {
    match block.get("@type") {
        Some(Value::String(t)) => EXCLUDED_TYPES.contains(&t.as_str()),
        Some(Value::Array(types)) if !types.is_empty() => types
            .iter()
            .all(|t| t.as_str().is_some_and(|t| EXCLUDED_TYPES.contains(&t))),
        _ => false,
    }
}

/// Whether a parsed block describes a harvestable product.
pub fn is_eligible(block: &Record) -> bool {
    has_schema_org_context(block) && !is_excluded_type(block)
}

/// The first eligible block in document order, with text fields normalized.
pub fn select_product(html: &str) -> Option<Record> {
    parse_blocks(html)
        .into_iter()
        .find_map(|block| match block {
            ParsedBlock::Object(obj) if is_eligible(&obj) => Some(obj),
            _ => None,
        })
        .map(|mut obj| {
            normalize_text_fields(&mut obj);
            obj
        })
}

/// Collapse list-valued `description` and `name` into single strings.
pub fn normalize_text_fields(block: &mut Record) {
    for key in ["description", "name"] {
        if let Some(Value::Array(parts)) = block.get(key) {
            let joined = join_values(parts);
            block.insert(key.to_string(), Value::String(joined));
        }
    }
}

fn join_values(parts: &[Value]) -> String {
    parts
        .iter()
        .map(|part| match part {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short, display-oriented rendering of a JSON value.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Summary of one block, for inspecting what a landing page offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    pub index: usize,
    pub ld_type: String,
    pub context: String,
    pub name: String,
    pub eligible: bool,
    pub selected: bool,
    /// Valid JSON, but not an object.
    pub not_object: bool,
    pub error: Option<String>,
}

/// Describe every block on a page and mark the one selection would pick.
pub fn describe_blocks(html: &str) -> Vec<BlockReport> {
    let mut selected_seen = false;
    parse_blocks(html)
        .into_iter()
        .enumerate()
        .map(|(index, block)| match block {
            ParsedBlock::Object(obj) => {
                let eligible = is_eligible(&obj);
                let selected = eligible && !selected_seen;
                selected_seen |= selected;
                BlockReport {
                    index,
                    ld_type: display_value(obj.get("@type")),
                    context: display_value(obj.get("@context")),
                    name: display_value(obj.get("name")).chars().take(50).collect(),
                    eligible,
                    selected,
                    not_object: false,
                    error: None,
                }
            }
            ParsedBlock::NotAnObject => BlockReport {
                index,
                ld_type: "N/A".to_string(),
                context: "N/A".to_string(),
                name: "N/A".to_string(),
                eligible: false,
                selected: false,
                not_object: true,
                error: None,
            },
            ParsedBlock::Invalid(e) => BlockReport {
                index,
                ld_type: "N/A".to_string(),
                context: "N/A".to_string(),
                name: "N/A".to_string(),
                eligible: false,
                selected: false,
                not_object: false,
                error: Some(e),
            },
        })
        .collect()
}
