//! Scroll reveals driven by intersection observers

/// Visible fraction a skill row needs before its bar fills
pub const SKILL_BAR_THRESHOLD: f64 = 0.5;

/// Visible fraction that triggers the entrance animation
pub const ENTRANCE_THRESHOLD: f64 = 0.1;

/// Elements that get the `animate` class on entry
pub const ENTRANCE_SELECTOR: &str = ".skill-item, .portfolio-item, .about-img-container";

/// Class added by the entrance animation
pub const ANIMATE_CLASS: &str = "animate";

/// The parts of an `IntersectionObserverEntry` the reveals look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl Intersection {
    /// Observers report once on `observe()` even below the threshold, so
    /// the ratio is checked as well as the intersecting flag.
    pub fn crosses(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// CSS width for a `data-percentage` value, e.g. `"88"` -> `"88%"`.
/// Values are clamped to `0..=100`; anything unparsable yields `None`.
pub fn skill_bar_width(data_percentage: &str) -> Option<String> {
    let pct: f64 = data_percentage.trim().parse().ok()?;
    if !pct.is_finite() {
        return None;
    }
    // `+ 0.0` turns a clamped `-0` into `0`
    Some(format!("{}%", pct.clamp(0.0, 100.0) + 0.0))
}

/// Whether an entrance-observed element should receive [`ANIMATE_CLASS`]
pub fn should_animate(entry: Intersection) -> bool {
    entry.crosses(ENTRANCE_THRESHOLD)
}
