//! Directive processing pipeline: scans destination documents, evaluates
//! embed directives against the listing catalog, and writes derived files.
//!
//! A directive that fails to compile or names an unknown content type is
//! logged and skipped; the rest of the batch continues.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::catalog::{Listing, sort_listings};
use crate::config::SiteConfig;
use crate::directive::{EmbedDirective, extract_directives};
use crate::query::{evaluate_filter, evaluate_tags, parse_filter, parse_tag_expr};
use crate::render::{ViewMode, render_listings};

#[derive(Debug, Default, Clone, Copy)]
pub struct Summary {
    /// Destination documents scanned.
    pub files: usize,
    /// Output files generated (or, in dry-run mode, that would be).
    pub generated: usize,
    /// Directives skipped because of an error.
    pub failed: usize,
}

/// Remove every stale output directory under the destinations tree, so
/// renamed or deleted directives do not leave orphans behind.
pub fn clean_generated(root: &Path, generated_dir: &str) -> Result<usize> {
    let stale: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.file_name() == generated_dir)
        .map(|entry| entry.into_path())
        .collect();

    for dir in &stale {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Pipeline: failed to remove {:?}", dir))?;
        tracing::info!("Removed stale output directory {:?}", dir);
    }

    Ok(stale.len())
}

/// Evaluate one directive against the catalog and render the result.
pub fn generate_listing_content(
    directive: &EmbedDirective,
    listings: &[Listing],
) -> Result<String> {
    if directive.content_type != "hotels" {
        anyhow::bail!("unknown content type: {}", directive.content_type);
    }

    let mut selected: Vec<&Listing> = listings.iter().collect();

    if let Some(expr) = directive.param("tags") {
        let ast = parse_tag_expr(expr)?;
        selected.retain(|listing| evaluate_tags(&ast, &listing.tags));
    }

    if let Some(expr) = directive.param("filter") {
        let filter = parse_filter(expr)?;
        selected.retain(|listing| evaluate_filter(&filter, &listing.fields));
    }

    if let Some(expr) = directive.param("sort") {
        selected = sort_listings(selected, expr);
    }

    let view = ViewMode::from_param(directive.param("view"));
    Ok(render_listings(&selected, view))
}

/// Process one destination document: returns (generated, failed) counts.
fn process_file(
    path: &Path,
    listings: &[Listing],
    config: &SiteConfig,
    dry_run: bool,
) -> Result<(usize, usize)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Pipeline: failed to read {:?}", path))?;

    let directives = extract_directives(&content);
    if directives.is_empty() {
        return Ok((0, 0));
    }
    tracing::info!("Processing {:?} ({} directives)", path, directives.len());

    let output_dir = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&config.generated_dir);

    let mut generated = 0;
    let mut failed = 0;
    for directive in &directives {
        let Some(output) = directive.param("output") else {
            tracing::warn!(
                "Pipeline: directive in {:?} has no output name, skipping",
                path
            );
            failed += 1;
            continue;
        };

        match generate_listing_content(directive, listings) {
            Ok(rendered) => {
                let out_path = output_dir.join(format!("{}.md", output));
                if dry_run {
                    tracing::info!("Would write {:?}", out_path);
                } else {
                    std::fs::create_dir_all(&output_dir)
                        .with_context(|| format!("Pipeline: failed to create {:?}", output_dir))?;
                    std::fs::write(&out_path, rendered)
                        .with_context(|| format!("Pipeline: failed to write {:?}", out_path))?;
                    tracing::info!("Generated {:?}", out_path);
                }
                generated += 1;
            }
            Err(err) => {
                tracing::warn!("Pipeline: skipping directive in {:?}: {:#}", path, err);
                failed += 1;
            }
        }
    }

    Ok((generated, failed))
}

/// Process every destination document under the tree, in parallel.
pub fn process_tree(
    destinations: &Path,
    config: &SiteConfig,
    listings: &[Listing],
    dry_run: bool,
) -> Result<Summary> {
    if !dry_run {
        clean_generated(destinations, &config.generated_dir)?;
    }

    let files: Vec<PathBuf> = WalkDir::new(destinations)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != config.generated_dir.as_str())
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some("md")
        })
        .map(|entry| entry.into_path())
        .collect();

    let (generated, failed) = files
        .par_iter()
        .map(|path| match process_file(path, listings, config, dry_run) {
            Ok(counts) => counts,
            Err(err) => {
                tracing::warn!("Pipeline: {:#}", err);
                (0, 1)
            }
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    Ok(Summary {
        files: files.len(),
        generated,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldValue;
    use std::collections::HashMap;

    fn listing(name: &str, tags: &[&str], price: &str) -> Listing {
        let mut fields = HashMap::new();
        fields.insert("price".to_string(), FieldValue::Str(price.to_string()));
        Listing {
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            fields,
            content: format!("### {}", name),
        }
    }

    fn directive(pairs: &[(&str, &str)]) -> EmbedDirective {
        EmbedDirective {
            content_type: "hotels".to_string(),
            params: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_generate_filters_and_sorts() {
        let listings = vec![
            listing("Budget Bungalow", &["beachfront"], "$"),
            listing("Reef Palace", &["luxury", "bora bora"], "$$$$"),
            listing("Lagoon Suites", &["luxury", "bora bora"], "$$$"),
        ];
        let directive = directive(&[
            ("output", "luxury"),
            ("tags", "luxury AND \"bora bora\""),
            ("filter", "price >= \"$$$"),
            ("sort", "price DESC"),
        ]);

        let rendered = generate_listing_content(&directive, &listings).unwrap();
        let palace = rendered.find("Reef Palace").unwrap();
        let lagoon = rendered.find("Lagoon Suites").unwrap();
        assert!(palace < lagoon, "descending price order expected");
        assert!(!rendered.contains("Budget Bungalow"));
    }

    #[test]
    fn test_generate_empty_result() {
        let listings = vec![listing("Budget Bungalow", &["beachfront"], "$")];
        let directive = directive(&[("output", "x"), ("tags", "ski")]);
        let rendered = generate_listing_content(&directive, &listings).unwrap();
        assert_eq!(rendered, "No hotels found matching the criteria.");
    }

    #[test]
    fn test_generate_rejects_unknown_content_type() {
        let directive = EmbedDirective {
            content_type: "flights".to_string(),
            params: HashMap::new(),
        };
        assert!(generate_listing_content(&directive, &[]).is_err());
    }

    #[test]
    fn test_generate_propagates_query_errors() {
        let listings = vec![listing("Reef Palace", &["luxury"], "$$$")];
        let bad_tags = directive(&[("output", "x"), ("tags", "(luxury AND beach")]);
        assert!(generate_listing_content(&bad_tags, &listings).is_err());

        let bad_filter = directive(&[("output", "x"), ("filter", "price")]);
        assert!(generate_listing_content(&bad_filter, &listings).is_err());
    }
}
