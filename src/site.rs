//! Site content: who the page is about plus the records the browser renders

use serde::{Deserialize, Serialize};

use folio_scene::content::{Category, PageContent};

use crate::io::{IoError, IoResult};

/// Font Awesome stylesheet used for the `fa*` icon classes
pub const DEFAULT_ICON_STYLESHEET: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// Everything a portfolio page is generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Owner's name, shown in the nav brand and hero
    pub name: String,
    pub role: String,
    pub tagline: String,
    /// About section, one entry per paragraph
    #[serde(default)]
    pub about: Vec<String>,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Stylesheet providing the icon classes; `null` to leave it out
    #[serde(default = "default_icon_stylesheet")]
    pub icon_stylesheet: Option<String>,
    /// Skills, projects and the form confirmation, embedded for the browser
    #[serde(flatten)]
    pub page: PageContent,
}

fn default_icon_stylesheet() -> Option<String> {
    Some(DEFAULT_ICON_STYLESHEET.to_string())
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            role: "Web Developer & UI/UX Designer".to_string(),
            tagline: "I build fast, interactive websites and apps.".to_string(),
            about: vec![
                "I design and build web and mobile products, from the first sketch to production.".to_string(),
                "I care about clean code, smooth interactions and interfaces that feel obvious.".to_string(),
            ],
            email: "hello@example.com".to_string(),
            location: Some("Jakarta, Indonesia".to_string()),
            icon_stylesheet: default_icon_stylesheet(),
            page: PageContent::default(),
        }
    }
}

impl SiteContent {
    /// Check the rules serde cannot express
    pub fn validate(&self) -> IoResult<()> {
        if self.name.trim().is_empty() {
            return Err(IoError::InvalidContent("site name is empty".to_string()));
        }

        for (i, skill) in self.page.skills.iter().enumerate() {
            if skill.name.trim().is_empty() {
                return Err(IoError::InvalidContent(format!("skill #{} has no name", i + 1)));
            }
            if skill.percentage > 100 {
                return Err(IoError::InvalidContent(format!(
                    "skill '{}' has percentage {} (max 100)",
                    skill.name, skill.percentage
                )));
            }
        }

        for (i, project) in self.page.projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                return Err(IoError::InvalidContent(format!(
                    "project #{} has no title",
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// Categories used by at least one project, in filter order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.page.projects.iter().any(|p| p.category == *c))
            .collect()
    }

    /// JSON handed to the browser bundle, safe to place inside `<script>`
    pub fn page_json(&self) -> IoResult<String> {
        let json =
            serde_json::to_string(&self.page).map_err(|e| IoError::Write(e.to_string()))?;
        Ok(json
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_site_is_valid() {
        let site = SiteContent::default();
        assert!(site.validate().is_ok());
        assert_eq!(site.page.skills.len(), 8);
        assert_eq!(site.page.projects.len(), 6);
    }

    #[test]
    fn validate_rejects_percentage_over_100() {
        let mut site = SiteContent::default();
        site.page.skills[0].percentage = 101;
        let err = site.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid content: skill 'HTML/CSS' has percentage 101 (max 100)"
        );
    }

    #[test]
    fn validate_rejects_empty_names() {
        let mut site = SiteContent::default();
        site.page.skills[1].name = "  ".to_string();
        assert!(matches!(site.validate(), Err(IoError::InvalidContent(_))));

        let mut site = SiteContent::default();
        site.page.projects[2].title.clear();
        assert!(matches!(site.validate(), Err(IoError::InvalidContent(_))));

        let mut site = SiteContent::default();
        site.name.clear();
        assert!(matches!(site.validate(), Err(IoError::InvalidContent(_))));
    }

    #[test]
    fn categories_in_filter_order_without_duplicates() {
        let site = SiteContent::default();
        assert_eq!(
            site.categories(),
            vec![Category::Web, Category::Mobile, Category::Design]
        );

        let mut only_design = SiteContent::default();
        only_design
            .page
            .projects
            .retain(|p| p.category == Category::Design);
        assert_eq!(only_design.categories(), vec![Category::Design]);
    }

    #[test]
    fn page_json_cannot_close_script_tag() {
        let mut site = SiteContent::default();
        site.page.confirmation = "</script><b>hi</b> & bye".to_string();
        let json = site.page_json().unwrap();
        assert!(!json.contains("</script>"));
        assert!(!json.contains('<'));

        let back: PageContent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.confirmation, "</script><b>hi</b> & bye");
    }

    #[test]
    fn page_json_has_browser_field_names() {
        let json = SiteContent::default().page_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["skills"].is_array());
        assert_eq!(value["projects"][1]["category"], "mobile");
        assert!(value["confirmation"].is_string());
        assert!(value.get("name").is_none());
    }
}
