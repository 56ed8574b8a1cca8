//! Component rendering for isolated preview and testing.
//!
//! Each piece of the page layout lives in `templates/components/` and is
//! included by `index.html`. The structs here render the same templates on
//! their own, which backs the snapshot tests and the style guide.
//!
//! # Adding New Components
//!
//! 1. Create the template in `templates/components/your_component.html`
//! 2. Include it from `index.html` and `styleguide.html`
//! 3. Add the Askama template struct and a `ComponentRenderer` method here
//! 4. Write snapshot tests for the component

use askama::Template;
use folio_scene::content::PALETTE;
use folio_scene::markup::{portfolio_item_class, portfolio_item_html, skill_item_html};

use crate::html_writer::{FilterButton, filter_buttons};
use crate::site::SiteContent;

/// Navigation bar component template.
#[derive(Template)]
#[template(path = "components/nav.html")]
pub struct NavComponent<'a> {
    pub name: &'a str,
}

/// Hero component template.
#[derive(Template)]
#[template(path = "components/hero.html")]
pub struct HeroComponent<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub tagline: &'a str,
}

/// Portfolio filter bar component template.
#[derive(Template)]
#[template(path = "components/filter_bar.html")]
pub struct FilterBarComponent<'a> {
    pub filters: &'a [FilterButton],
}

/// Contact section component template.
#[derive(Template)]
#[template(path = "components/contact.html")]
pub struct ContactComponent<'a> {
    pub email: &'a str,
    pub location: Option<&'a str>,
}

/// Footer component template.
#[derive(Template)]
#[template(path = "components/footer.html")]
pub struct FooterComponent<'a> {
    pub name: &'a str,
}

/// Style guide page template.
#[derive(Template)]
#[template(path = "styleguide.html")]
pub struct StyleGuideTemplate<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub tagline: &'a str,
    pub email: &'a str,
    pub location: Option<&'a str>,
    pub icon_stylesheet: Option<&'a str>,
    pub filters: &'a [FilterButton],
    /// Inner markup of each `.skill-item`
    pub skill_rows: &'a [String],
    /// `(class, inner markup)` of each `.portfolio-item`
    pub portfolio_cards: &'a [(String, String)],
}

/// Renders individual components for testing and preview.
pub struct ComponentRenderer;

impl ComponentRenderer {
    pub fn nav(name: &str) -> anyhow::Result<String> {
        Ok(NavComponent { name }.render()?)
    }

    pub fn hero(name: &str, role: &str, tagline: &str) -> anyhow::Result<String> {
        let template = HeroComponent {
            name,
            role,
            tagline,
        };
        Ok(template.render()?)
    }

    pub fn filter_bar(filters: &[FilterButton]) -> anyhow::Result<String> {
        Ok(FilterBarComponent { filters }.render()?)
    }

    pub fn contact(email: &str, location: Option<&str>) -> anyhow::Result<String> {
        Ok(ContactComponent { email, location }.render()?)
    }

    pub fn footer(name: &str) -> anyhow::Result<String> {
        Ok(FooterComponent { name }.render()?)
    }

    /// Render the complete style guide page.
    ///
    /// Skill rows and portfolio cards are rendered with the same markup
    /// functions the browser bundle uses. Card tints walk the palette in order
    /// so the page is stable between reloads.
    pub fn styleguide(site: &SiteContent) -> anyhow::Result<String> {
        let filters = filter_buttons(site);
        let skill_rows: Vec<String> = site.page.skills.iter().map(skill_item_html).collect();

        let portfolio_cards: Vec<(String, String)> = site
            .page
            .projects
            .iter()
            .zip(PALETTE.iter().cycle())
            .map(|(project, tint)| {
                (
                    portfolio_item_class(project),
                    portfolio_item_html(project, tint),
                )
            })
            .collect();

        let template = StyleGuideTemplate {
            name: &site.name,
            role: &site.role,
            tagline: &site.tagline,
            email: &site.email,
            location: site.location.as_deref(),
            icon_stylesheet: site.icon_stylesheet.as_deref(),
            filters: &filters,
            skill_rows: &skill_rows,
            portfolio_cards: &portfolio_cards,
        };
        Ok(template.render()?)
    }
}
