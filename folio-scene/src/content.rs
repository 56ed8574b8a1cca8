//! Records rendered into the skills list and the portfolio grid
//!
//! The generator embeds the site's records as JSON in
//! `<script id="site-content">`; when that block is missing or malformed the
//! compiled-in defaults are used.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row in the skills list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    /// Proficiency, 0..=100
    pub percentage: u8,
    /// Icon font classes, e.g. `fab fa-react`
    pub icon: String,
    /// CSS accent color
    pub color: String,
}

/// Portfolio category; the class name and `data-filter` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web,
    Mobile,
    Design,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Web, Category::Mobile, Category::Design];

    /// Lowercase identifier used in class names and filters
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Mobile => "mobile",
            Category::Design => "design",
        }
    }

    /// Human-readable label shown on cards and filter buttons
    pub fn label(self) -> &'static str {
        category_name(self.as_str())
    }
}

/// Display name for a category identifier. Unknown identifiers are returned
/// unchanged.
pub fn category_name(category: &str) -> &str {
    match category {
        "web" => "Web Development",
        "design" => "UI/UX Design",
        "mobile" => "Mobile Apps",
        other => other,
    }
}

/// One card in the portfolio grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub icon: String,
}

/// Background tints for portfolio card images
pub const PALETTE: [&str; 6] = [
    "rgba(59, 130, 246, 0.1)",
    "rgba(139, 92, 246, 0.1)",
    "rgba(16, 185, 129, 0.1)",
    "rgba(245, 158, 11, 0.1)",
    "rgba(239, 68, 68, 0.1)",
    "rgba(99, 102, 241, 0.1)",
];

/// Pick a card tint uniformly from [`PALETTE`]
pub fn random_tint<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

pub const DEFAULT_CONFIRMATION: &str =
    "Terima kasih! Pesan Anda telah dikirim. Saya akan menghubungi Anda segera.";

/// Everything the controller renders or shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default = "default_skills")]
    pub skills: Vec<SkillRecord>,
    #[serde(default = "default_projects")]
    pub projects: Vec<PortfolioRecord>,
    /// Message shown after the contact form is submitted
    #[serde(default = "default_confirmation")]
    pub confirmation: String,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            skills: default_skills(),
            projects: default_projects(),
            confirmation: default_confirmation(),
        }
    }
}

impl PageContent {
    /// Parse embedded JSON, falling back to the defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        json.and_then(|text| serde_json::from_str(text).ok())
            .unwrap_or_default()
    }
}

fn default_confirmation() -> String {
    DEFAULT_CONFIRMATION.to_string()
}

fn skill(name: &str, percentage: u8, icon: &str, color: &str) -> SkillRecord {
    SkillRecord {
        name: name.to_string(),
        percentage,
        icon: icon.to_string(),
        color: color.to_string(),
    }
}

fn project(title: &str, description: &str, category: Category, icon: &str) -> PortfolioRecord {
    PortfolioRecord {
        title: title.to_string(),
        description: description.to_string(),
        category,
        icon: icon.to_string(),
    }
}

/// The built-in skills list
pub fn default_skills() -> Vec<SkillRecord> {
    vec![
        skill("HTML/CSS", 95, "fab fa-html5", "#e34f26"),
        skill("JavaScript", 90, "fab fa-js", "#f7df1e"),
        skill("React", 88, "fab fa-react", "#61dafb"),
        skill("Node.js", 85, "fab fa-node-js", "#339933"),
        skill("UI/UX Design", 92, "fas fa-palette", "#ff6b6b"),
        skill("Python", 80, "fab fa-python", "#3776ab"),
        skill("Git/Github", 90, "fab fa-git-alt", "#f05032"),
        skill("Database Management", 85, "fas fa-database", "#00758f"),
    ]
}

/// The built-in portfolio
pub fn default_projects() -> Vec<PortfolioRecord> {
    vec![
        project(
            "E-commerce Website",
            "Website e-commerce dengan React dan Node.js",
            Category::Web,
            "fas fa-shopping-cart",
        ),
        project(
            "Mobile Banking App",
            "Aplikasi mobile banking untuk iOS dan Android",
            Category::Mobile,
            "fas fa-mobile-alt",
        ),
        project(
            "Dashboard Analytics",
            "Dashboard analitik dengan visualisasi data real-time",
            Category::Web,
            "fas fa-chart-line",
        ),
        project(
            "UI/UX Redesign",
            "Redesign UI/UX untuk aplikasi perusahaan",
            Category::Design,
            "fas fa-paint-brush",
        ),
        project(
            "Social Media App",
            "Aplikasi sosial media dengan fitur chat real-time",
            Category::Mobile,
            "fas fa-users",
        ),
        project(
            "Landing Page Modern",
            "Landing page modern dengan animasi dan responsif",
            Category::Design,
            "fas fa-laptop",
        ),
    ]
}
