//! Listing catalog: candidate items loaded from markdown files.
//!
//! Each listing file carries YAML frontmatter (tags plus arbitrary scalar
//! fields), a `### ` heading naming the item, and `- **Key**: value` bullet
//! lines holding display metadata. Field names are lower-cased on load so
//! filter and sort lookups are case-insensitive.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::query::{FieldValue, parse_sort, sort_key};

#[derive(Debug, Clone)]
pub struct Listing {
    pub slug: String,
    pub name: String,
    pub tags: Vec<String>,
    pub fields: HashMap<String, FieldValue>,
    pub content: String,
}

impl Listing {
    /// `$`-count of the price field, for interactive rendering.
    pub fn price_level(&self) -> usize {
        self.fields
            .get("price")
            .map(|v| v.price_level())
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize, Default)]
struct Frontmatter {
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, serde_yaml::Value>,
}

/// Split a document into frontmatter and body. A file without frontmatter,
/// or with an unclosed delimiter, is all body.
fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    match rest.find("\n---") {
        Some(pos) => {
            let body = &rest[pos + 4..];
            let body = body.strip_prefix('\n').unwrap_or(body);
            (Some(&rest[..pos]), body)
        }
        None => (None, content),
    }
}

/// Parse one listing document.
pub fn parse_listing(slug: &str, content: &str) -> Result<Listing> {
    let (frontmatter, body) = split_frontmatter(content);
    let frontmatter: Frontmatter = match frontmatter {
        Some(raw) => serde_yaml::from_str(raw).context("invalid frontmatter")?,
        None => Frontmatter::default(),
    };

    let mut fields: HashMap<String, FieldValue> = HashMap::new();
    for (key, value) in &frontmatter.extra {
        let value = match value {
            serde_yaml::Value::String(s) => FieldValue::Str(s.clone()),
            serde_yaml::Value::Number(n) => FieldValue::Num(n.as_f64().unwrap_or(0.0)),
            _ => continue,
        };
        fields.insert(key.to_lowercase(), value);
    }

    // `- **Key**: value` bullets override frontmatter fields of the same name.
    for line in body.lines() {
        let Some(rest) = line.trim_start().strip_prefix("- **") else {
            continue;
        };
        let Some((key, value)) = rest.split_once(':') else {
            continue;
        };
        let key = key.trim().trim_end_matches("**").trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        fields.insert(key, FieldValue::Str(value.trim().to_string()));
    }

    let heading = body.lines().find_map(|line| {
        line.strip_prefix("### ").map(|name| name.trim().to_string())
    });
    let name = heading
        .or(frontmatter.title)
        .unwrap_or_else(|| slug.to_string());

    fields.insert("name".to_string(), FieldValue::Str(name.clone()));

    Ok(Listing {
        slug: slug.to_string(),
        name,
        tags: frontmatter.tags,
        fields,
        content: body.trim().to_string(),
    })
}

/// Slug for a listing file: lower-cased stem with spaces dashed.
fn slug_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_lowercase()
        .replace(' ', "-")
}

/// Load every `*.md` listing under a directory, in file-name order.
/// A file that fails to parse is logged and skipped.
pub fn load_listings(dir: &Path) -> Result<Vec<Listing>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Catalog: failed to read {:?}", dir))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("md") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut listings = Vec::new();
    for path in paths {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Catalog: failed to read {:?}", path))?;
        match parse_listing(&slug_for(&path), &content) {
            Ok(listing) => listings.push(listing),
            Err(err) => {
                tracing::warn!("Catalog: skipping {:?}: {:#}", path, err);
            }
        }
    }

    Ok(listings)
}

/// Order listings by a `field DIRECTION` directive. A malformed directive
/// returns the input order untouched. The sort is stable, and descending
/// order preserves the original order of equal keys.
pub fn sort_listings<'a>(mut listings: Vec<&'a Listing>, expr: &str) -> Vec<&'a Listing> {
    let Some((field, descending)) = parse_sort(expr) else {
        return listings;
    };

    listings.sort_by(|a, b| {
        let ord = sort_key(&a.fields, &field).compare(&sort_key(&b.fields, &field));
        if descending { ord.reverse() } else { ord }
    });
    listings
}
