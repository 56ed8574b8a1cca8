//! YAML Reader
//!
//! Reads a site content file written in YAML.

use std::fs;
use std::path::Path;

use crate::io::{IoError, IoResult, Reader};
use crate::site::SiteContent;

/// Reader for YAML site content
pub struct YamlReader;

impl YamlReader {
    /// Create a new YAML reader
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for YamlReader {
    fn read(&self, input: &Path) -> IoResult<SiteContent> {
        let content = fs::read_to_string(input)?;
        let site: SiteContent =
            serde_yaml::from_str(&content).map_err(|e| IoError::Parse(e.to_string()))?;
        Ok(site)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_scene::content::Category;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn yaml_reader_supports_yaml_extensions() {
        let reader = YamlReader::new();
        assert!(reader.supports_extension("yaml"));
        assert!(reader.supports_extension("yml"));
        assert!(reader.supports_extension("YAML"));
        assert!(!reader.supports_extension("json"));
    }

    #[test]
    fn yaml_reader_parses_owner_fields() {
        let site = YamlReader::new().read(&fixture("site.yaml")).unwrap();

        assert_eq!(site.name, "Rina Kusuma");
        assert_eq!(site.role, "Frontend Engineer");
        assert_eq!(site.email, "rina@example.org");
        assert_eq!(site.location.as_deref(), Some("Bandung, Indonesia"));
        assert_eq!(site.about.len(), 2);
    }

    #[test]
    fn yaml_reader_parses_records() {
        let site = YamlReader::new().read(&fixture("site.yaml")).unwrap();

        assert_eq!(site.page.skills.len(), 3);
        assert_eq!(site.page.skills[0].name, "Rust");
        assert_eq!(site.page.skills[0].percentage, 88);

        assert_eq!(site.page.projects.len(), 3);
        assert_eq!(site.page.projects[1].category, Category::Mobile);
        assert_eq!(site.page.confirmation, "Thanks, I'll get back to you soon.");
    }

    #[test]
    fn yaml_reader_defaults_icon_stylesheet() {
        let site = YamlReader::new().read(&fixture("site.yaml")).unwrap();
        assert_eq!(
            site.icon_stylesheet.as_deref(),
            Some(crate::site::DEFAULT_ICON_STYLESHEET)
        );
    }

    #[test]
    fn yaml_reader_rejects_unknown_category() {
        let result = YamlReader::new().read(&fixture("unknown_category.yaml"));
        match result {
            Err(IoError::Parse(message)) => assert!(message.contains("games")),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn yaml_reader_returns_error_for_missing_file() {
        let result = YamlReader::new().read(Path::new("nonexistent.yaml"));
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
