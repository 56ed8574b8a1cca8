//! folio - A static-site generator and dev server for an animated personal
//! portfolio page.
//!
//! Site content (YAML or JSON) is read into [`site::SiteContent`], rendered
//! through askama templates and written next to the `folio-scene` browser
//! bundle, which draws the background scene and wires up the page.

use std::path::Path;

use tracing::info;

pub mod components;
pub mod html_writer;
pub mod io;
pub mod json_reader;
pub mod server;
pub mod site;
pub mod yaml_reader;

use crate::html_writer::HTML_FORMAT;
use crate::io::{FormatRegistry, IoError, IoResult};
use crate::site::SiteContent;

/// Read and validate site content with the reader registered for the input's
/// extension. Without an input the built-in default site is used.
pub fn load_site(registry: &FormatRegistry, input: Option<&Path>) -> IoResult<SiteContent> {
    let site = match input {
        Some(path) => registry.reader_for_path(path)?.read(path)?,
        None => SiteContent::default(),
    };
    site.validate()?;
    Ok(site)
}

/// Load the site and write it to `output` with the registry's html writer
pub fn build(
    registry: &FormatRegistry,
    input: Option<&Path>,
    output: &Path,
) -> IoResult<SiteContent> {
    let site = load_site(registry, input)?;
    let writer = registry
        .writer_for_format(HTML_FORMAT)
        .ok_or_else(|| IoError::UnsupportedFormat(HTML_FORMAT.to_string()))?;
    writer.write(&site, output)?;
    info!(
        site = %site.name,
        skills = site.page.skills.len(),
        projects = site.page.projects.len(),
        output = %output.display(),
        "generated portfolio"
    );
    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_writer::HtmlWriter;
    use crate::io::Writer;
    use crate::yaml_reader::YamlReader;
    use std::fs;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    /// Writes only the owner's name, so tests can tell it apart from the page
    struct NameWriter;

    impl Writer for NameWriter {
        fn write(&self, site: &SiteContent, output: &Path) -> IoResult<()> {
            fs::create_dir_all(output)?;
            fs::write(output.join("name.txt"), &site.name)?;
            Ok(())
        }

        fn format_id(&self) -> &str {
            HTML_FORMAT
        }
    }

    #[test]
    fn load_site_without_input_uses_default() {
        let site = load_site(&FormatRegistry::with_defaults(), None).unwrap();
        assert_eq!(site, SiteContent::default());
    }

    #[test]
    fn load_site_dispatches_on_extension() {
        let registry = FormatRegistry::with_defaults();
        let yaml = load_site(&registry, Some(&fixture("site.yaml"))).unwrap();
        let json = load_site(&registry, Some(&fixture("site.json"))).unwrap();
        assert_eq!(yaml.name, json.name);
    }

    #[test]
    fn load_site_validates_content() {
        let registry = FormatRegistry::with_defaults();
        let result = load_site(&registry, Some(&fixture("invalid_percentage.yaml")));
        assert!(matches!(result, Err(IoError::InvalidContent(_))));
    }

    #[test]
    fn load_site_rejects_unknown_format() {
        let registry = FormatRegistry::with_defaults();
        let result = load_site(&registry, Some(Path::new("site.toml")));
        assert!(matches!(result, Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn build_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FormatRegistry::with_html_writer(HtmlWriter::with_scene_pkg(None));
        let site = build(&registry, Some(&fixture("site.yaml")), dir.path()).unwrap();
        assert_eq!(site.page.projects.len(), 3);
        assert!(dir.path().join("index.html").is_file());
        assert!(dir.path().join("style.css").is_file());
    }

    #[test]
    fn build_uses_the_registered_html_writer() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(YamlReader::new()));
        registry.register_writer(Box::new(NameWriter));

        build(&registry, Some(&fixture("site.yaml")), dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("name.txt")).unwrap(),
            "Rina Kusuma"
        );
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn build_without_html_writer_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(YamlReader::new()));

        let result = build(&registry, Some(&fixture("site.yaml")), dir.path());
        assert!(matches!(result, Err(IoError::UnsupportedFormat(f)) if f == "html"));
    }
}
