use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout of the content tree. All paths are relative to the content root
/// given on the command line.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding listing source files.
    pub listings_dir: String,
    /// Directory scanned for destination documents with embed directives.
    pub destinations_dir: String,
    /// Name of the per-document output directory.
    pub generated_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listings_dir: "hotels".to_string(),
            destinations_dir: "destinations".to_string(),
            generated_dir: "_generated".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.listings_dir, "hotels");
        assert_eq!(cfg.destinations_dir, "destinations");
        assert_eq!(cfg.generated_dir, "_generated");
    }
}
