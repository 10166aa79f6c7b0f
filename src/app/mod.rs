use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::catalog::Listing;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Content root directory (holds listings and destination documents)
    #[arg(short, long)]
    pub content: PathBuf,

    /// Site configuration file (YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of threads (default: all cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Evaluate directives without writing output files
    #[arg(long)]
    pub dry_run: bool,
}

/// (listing count, distinct tag count) for the startup summary log.
pub fn summarize_catalog(listings: &[Listing]) -> (usize, usize) {
    let distinct: HashSet<&str> = listings
        .iter()
        .flat_map(|listing| listing.tags.iter().map(String::as_str))
        .collect();
    (listings.len(), distinct.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_summarize_counts_distinct_tags() {
        let listing = |tags: &[&str]| Listing {
            slug: "x".into(),
            name: "x".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            fields: HashMap::new(),
            content: String::new(),
        };
        let listings = vec![
            listing(&["luxury", "beachfront"]),
            listing(&["luxury", "spa"]),
        ];
        assert_eq!(summarize_catalog(&listings), (2, 3));
    }
}
