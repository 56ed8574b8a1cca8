//! HTML Writer
//!
//! Writes a portfolio page: `index.html`, `style.css` and, when it has been
//! built, the browser bundle from `folio-scene`.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use tracing::{debug, warn};

use crate::io::{IoError, IoResult, Writer};
use crate::site::SiteContent;

/// Stylesheet shipped next to every generated page
pub const STYLESHEET: &str = include_str!("../assets/style.css");

/// Default location of the `wasm-pack --target web` output
pub const DEFAULT_SCENE_PKG: &str = "folio-scene/pkg";

/// Format id the page writer registers under
pub const HTML_FORMAT: &str = "html";

/// Files from the bundle directory the page loads
pub const SCENE_FILES: [&str; 2] = ["folio_scene.js", "folio_scene_bg.wasm"];

/// One button in the portfolio filter bar
#[derive(Debug, Clone, PartialEq)]
pub struct FilterButton {
    /// `data-filter` value
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// Filter bar for a site: `All` first, then every category that has projects
pub fn filter_buttons(site: &SiteContent) -> Vec<FilterButton> {
    let mut buttons = vec![FilterButton {
        value: "all".to_string(),
        label: "All".to_string(),
        active: true,
    }];
    buttons.extend(site.categories().into_iter().map(|category| FilterButton {
        value: category.as_str().to_string(),
        label: category.label().to_string(),
        active: false,
    }));
    buttons
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    name: &'a str,
    role: &'a str,
    tagline: &'a str,
    about: &'a [String],
    email: &'a str,
    location: Option<&'a str>,
    icon_stylesheet: Option<&'a str>,
    filters: &'a [FilterButton],
    /// Embedded records, already escaped for a `<script>` body
    content_json: &'a str,
    has_scene: bool,
}

/// Writer for the portfolio page
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    /// Directory holding the compiled scene bundle. `None` skips the bundle.
    pub scene_pkg: Option<PathBuf>,
}

impl HtmlWriter {
    /// Writer that picks up the bundle from [`DEFAULT_SCENE_PKG`]
    pub fn new() -> Self {
        Self {
            scene_pkg: Some(PathBuf::from(DEFAULT_SCENE_PKG)),
        }
    }

    pub fn with_scene_pkg(scene_pkg: Option<PathBuf>) -> Self {
        Self { scene_pkg }
    }

    /// Copy the bundle into `output`. Returns whether the page can load it.
    fn copy_scene_bundle(&self, output: &Path) -> IoResult<bool> {
        let Some(pkg) = &self.scene_pkg else {
            return Ok(false);
        };

        let missing: Vec<&str> = SCENE_FILES
            .iter()
            .copied()
            .filter(|file| !pkg.join(file).is_file())
            .collect();
        if !missing.is_empty() {
            warn!(
                pkg = %pkg.display(),
                missing = ?missing,
                "scene bundle not found, page will render without the background animation"
            );
            return Ok(false);
        }

        for file in SCENE_FILES {
            fs::copy(pkg.join(file), output.join(file))?;
            debug!(file, "copied scene bundle file");
        }
        Ok(true)
    }

    /// Render `index.html` for a site
    fn render_index(site: &SiteContent, has_scene: bool) -> IoResult<String> {
        let filters = filter_buttons(site);
        let content_json = site.page_json()?;

        let template = IndexTemplate {
            name: &site.name,
            role: &site.role,
            tagline: &site.tagline,
            about: &site.about,
            email: &site.email,
            location: site.location.as_deref(),
            icon_stylesheet: site.icon_stylesheet.as_deref(),
            filters: &filters,
            content_json: &content_json,
            has_scene,
        };

        template.render().map_err(|e| IoError::Write(e.to_string()))
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for HtmlWriter {
    fn write(&self, site: &SiteContent, output: &Path) -> IoResult<()> {
        fs::create_dir_all(output)?;

        let has_scene = self.copy_scene_bundle(output)?;
        let html = Self::render_index(site, has_scene)?;

        fs::write(output.join("index.html"), html)?;
        fs::write(output.join("style.css"), STYLESHEET)?;

        Ok(())
    }

    fn format_id(&self) -> &str {
        HTML_FORMAT
    }
}
