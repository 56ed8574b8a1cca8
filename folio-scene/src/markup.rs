//! HTML fragments for skill rows and portfolio cards

use std::fmt::Write;

use crate::content::{PortfolioRecord, SkillRecord};

/// Escape text for use in element content or a quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Class attribute of a portfolio card, e.g. `portfolio-item web`
pub fn portfolio_item_class(record: &PortfolioRecord) -> String {
    format!("portfolio-item {}", record.category.as_str())
}

/// Inner markup of a `.skill-item`
pub fn skill_item_html(skill: &SkillRecord) -> String {
    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        concat!(
            r#"<div class="skill-header">"#,
            r#"<div class="skill-icon" style="color: {color}"><i class="{icon}"></i></div>"#,
            r#"<div class="skill-name">{name}</div>"#,
            r#"</div>"#,
            r#"<div class="skill-bar">"#,
            r#"<div class="skill-progress" data-percentage="{pct}"></div>"#,
            r#"</div>"#,
            r#"<div class="skill-percentage">{pct}%</div>"#,
        ),
        color = escape(&skill.color),
        icon = escape(&skill.icon),
        name = escape(&skill.name),
        pct = skill.percentage.min(100),
    );
    html
}

/// Inner markup of a `.portfolio-item`, with `tint` as the image background
pub fn portfolio_item_html(record: &PortfolioRecord, tint: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        concat!(
            r#"<div class="portfolio-img" style="background-color: {tint}"><i class="{icon}"></i></div>"#,
            r#"<div class="portfolio-content">"#,
            r#"<h3>{title}</h3>"#,
            r#"<p>{description}</p>"#,
            r#"<span class="portfolio-tag">{tag}</span>"#,
            r#"</div>"#,
        ),
        tint = escape(tint),
        icon = escape(&record.icon),
        title = escape(&record.title),
        description = escape(&record.description),
        tag = escape(record.category.label()),
    );
    html
}
