//! `@embed` directive extraction.
//!
//! Source documents request generated listings with blocks like:
//!
//! ```text
//! @embed hotels {
//!     output: "luxury-hotels",
//!     tags: (luxury AND "bora bora"),
//!     filter: price > "$$$",
//!     sort: price DESC,
//!     view: interactive
//! }
//! ```
//!
//! The parameter block is parsed line-wise into plain strings; the three
//! expression sub-languages inside it are compiled later by the query
//! module.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@embed\s+(\w+)\s*\{([^}]*)\}").expect("valid embed pattern"));

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedDirective {
    pub content_type: String,
    pub params: HashMap<String, String>,
}

impl EmbedDirective {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Extract every embed directive from a document, in order of appearance.
pub fn extract_directives(content: &str) -> Vec<EmbedDirective> {
    EMBED
        .captures_iter(content)
        .map(|caps| EmbedDirective {
            content_type: caps[1].to_string(),
            params: parse_params(&caps[2]),
        })
        .collect()
}

/// Parse the `key: value` lines of a parameter block. Lines without a colon
/// are skipped; values lose one layer of surrounding quotes.
fn parse_params(block: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for line in block.lines() {
        let line = line.trim().trim_matches(',');
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
        let value = value.strip_suffix(['"', '\'']).unwrap_or(value);
        params.insert(key.trim().to_string(), value.to_string());
    }
    params
}
