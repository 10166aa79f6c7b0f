//! Markdown rendering of generated listing slices.

use crate::catalog::Listing;

/// How a generated listing is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Plain markdown blocks.
    Plain,
    /// Each item wrapped in a card div carrying data attributes for
    /// client-side filtering and sorting.
    Interactive,
}

impl ViewMode {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("interactive") => ViewMode::Interactive,
            _ => ViewMode::Plain,
        }
    }
}

/// Render an ordered slice of listings to markdown. Items are separated by
/// a thematic break; an empty slice renders a placeholder message.
pub fn render_listings(listings: &[&Listing], view: ViewMode) -> String {
    if listings.is_empty() {
        return "No hotels found matching the criteria.".to_string();
    }

    let mut output = Vec::new();
    for listing in listings {
        if view == ViewMode::Interactive {
            let tags = serde_json::to_string(&listing.tags).unwrap_or_else(|_| "[]".into());
            output.push(format!(
                "<div class=\"hotel-card\" data-price-level=\"{}\" data-tags='{}'>",
                listing.price_level(),
                tags
            ));
        }

        output.push(listing.content.trim().to_string());

        if view == ViewMode::Interactive {
            output.push("</div>".to_string());
        }

        output.push("\n---\n".to_string());
    }

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldValue;
    use std::collections::HashMap;

    fn listing(name: &str, price: &str, tags: &[&str]) -> Listing {
        let mut fields = HashMap::new();
        fields.insert("price".to_string(), FieldValue::Str(price.to_string()));
        Listing {
            slug: name.to_lowercase(),
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            fields,
            content: format!("### {}", name),
        }
    }

    #[test]
    fn test_empty_result_renders_placeholder() {
        let rendered = render_listings(&[], ViewMode::Plain);
        assert_eq!(rendered, "No hotels found matching the criteria.");
    }

    #[test]
    fn test_plain_view_separates_items() {
        let a = listing("Reef House", "$$", &[]);
        let b = listing("Lagoon Inn", "$", &[]);
        let rendered = render_listings(&[&a, &b], ViewMode::Plain);
        assert!(rendered.contains("### Reef House"));
        assert!(rendered.contains("### Lagoon Inn"));
        assert!(rendered.contains("\n---\n"));
        assert!(!rendered.contains("<div"));
    }

    #[test]
    fn test_interactive_view_carries_data_attributes() {
        let a = listing("Reef House", "$$$", &["luxury", "bora bora"]);
        let rendered = render_listings(&[&a], ViewMode::Interactive);
        assert!(rendered.contains("data-price-level=\"3\""));
        assert!(rendered.contains("data-tags='[\"luxury\",\"bora bora\"]'"));
        assert!(rendered.contains("</div>"));
    }

    #[test]
    fn test_view_mode_param() {
        assert_eq!(ViewMode::from_param(Some("interactive")), ViewMode::Interactive);
        assert_eq!(ViewMode::from_param(Some("Interactive")), ViewMode::Interactive);
        assert_eq!(ViewMode::from_param(Some("plain")), ViewMode::Plain);
        assert_eq!(ViewMode::from_param(None), ViewMode::Plain);
    }
}
