//! Scroll-driven navigation highlighting

/// A section counts as current once the page has scrolled to within this
/// many pixels of its top
pub const LOOKAHEAD_PX: f64 = 200.0;

/// A `section[id]` and its offset from the top of the document
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOffset {
    pub id: String,
    pub top: f64,
}

/// Id of the section the reader is in: the last one in document order whose
/// top minus [`LOOKAHEAD_PX`] has been scrolled past. `None` above the first.
pub fn active_section(scroll_y: f64, sections: &[SectionOffset]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| scroll_y >= s.top - LOOKAHEAD_PX)
        .map(|s| s.id.as_str())
}

/// Whether a nav link with this `href` should be highlighted
pub fn link_is_active(href: Option<&str>, current: Option<&str>) -> bool {
    match (href, current) {
        (Some(href), Some(id)) => href.strip_prefix('#') == Some(id),
        _ => false,
    }
}

/// Menu open state shared by the toggle button and the nav links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A link was followed; returns true if the menu had to close
    pub fn link_clicked(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}
