//! Portfolio category filter
//!
//! A filter click restyles every card in two steps: an immediate change and
//! a deferred one that lets the CSS transition play. Each click starts a new
//! generation; deferred changes from an older generation are dropped so a
//! quick second click cannot be undone by the first click's timers.

use std::cell::Cell;

/// Delay before a shown card fades in (ms)
pub const SHOW_DELAY_MS: u32 = 100;

/// Delay before a hidden card leaves the layout (ms)
pub const HIDE_DELAY_MS: u32 = 300;

/// `data-filter` value that matches every card
pub const ALL: &str = "all";

/// Inline style properties as `(property, value)` pairs
pub type StyleChange = &'static [(&'static str, &'static str)];

/// The selection made by a filter button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Category(String),
}

impl Filter {
    /// Interpret a `data-filter` attribute
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }

    /// Whether a card with this class list passes the filter
    pub fn matches(&self, class_list: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => class_list.split_whitespace().any(|c| c == category),
        }
    }
}

/// What happens to one card on a filter click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Show,
    Hide,
}

impl Transition {
    pub fn for_item(filter: &Filter, class_list: &str) -> Self {
        if filter.matches(class_list) {
            Transition::Show
        } else {
            Transition::Hide
        }
    }

    /// Applied synchronously in the click handler
    pub fn immediate(self) -> StyleChange {
        match self {
            Transition::Show => &[("display", "block")],
            Transition::Hide => &[("opacity", "0"), ("transform", "translateY(20px)")],
        }
    }

    /// Applied after the returned delay, if no newer click happened
    pub fn deferred(self) -> (u32, StyleChange) {
        match self {
            Transition::Show => (
                SHOW_DELAY_MS,
                &[("opacity", "1"), ("transform", "translateY(0)")],
            ),
            Transition::Hide => (HIDE_DELAY_MS, &[("display", "none")]),
        }
    }
}

/// Monotonic click counter used to invalidate stale timers
#[derive(Debug, Default)]
pub struct GenerationCounter(Cell<u64>);

impl GenerationCounter {
    /// Start a new generation and return its id
    pub fn advance(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}

/// Inline style of a card as the filter leaves it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStyle {
    pub display: &'static str,
    pub opacity: &'static str,
    pub transform: &'static str,
}

impl ItemStyle {
    pub fn apply(&mut self, change: StyleChange) {
        for &(property, value) in change {
            match property {
                "display" => self.display = value,
                "opacity" => self.opacity = value,
                "transform" => self.transform = value,
                _ => {}
            }
        }
    }

    /// In layout and not faded out (unset properties count as visible)
    pub fn is_visible(&self) -> bool {
        self.display != "none" && self.opacity != "0"
    }
}

#[derive(Debug)]
struct PendingChange {
    due_ms: u32,
    generation: u64,
    item: usize,
    change: StyleChange,
}

/// Replays filter clicks against a virtual clock, mirroring what the
/// controller does with `setTimeout`.
#[derive(Debug, Default)]
pub struct FilterTimeline {
    items: Vec<(String, ItemStyle)>,
    pending: Vec<PendingChange>,
    generations: GenerationCounter,
    now_ms: u32,
}

impl FilterTimeline {
    /// Cards identified by their class lists, all initially unstyled
    pub fn new<I, S>(class_lists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: class_lists
                .into_iter()
                .map(|c| (c.into(), ItemStyle::default()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn click(&mut self, filter: &Filter) {
        let generation = self.generations.advance();

        for (index, (classes, style)) in self.items.iter_mut().enumerate() {
            let transition = Transition::for_item(filter, classes);
            style.apply(transition.immediate());

            let (delay, change) = transition.deferred();
            self.pending.push(PendingChange {
                due_ms: self.now_ms + delay,
                generation,
                item: index,
                change,
            });
        }
    }

    /// Move the clock forward, firing due timers in order
    pub fn advance(&mut self, ms: u32) {
        self.now_ms += ms;

        self.pending.sort_by_key(|p| p.due_ms);
        let split = self.pending.partition_point(|p| p.due_ms <= self.now_ms);
        for pending in self.pending.drain(..split) {
            if self.generations.is_current(pending.generation) {
                self.items[pending.item].1.apply(pending.change);
            }
        }
    }

    pub fn style(&self, index: usize) -> &ItemStyle {
        &self.items[index].1
    }

    /// Indices of cards currently visible
    pub fn visible(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, (_, style))| style.is_visible())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> FilterTimeline {
        FilterTimeline::new([
            "portfolio-item web",
            "portfolio-item mobile",
            "portfolio-item web",
            "portfolio-item design",
            "portfolio-item mobile",
            "portfolio-item design",
        ])
    }

    #[test]
    fn parse_all_and_category() {
        assert_eq!(Filter::parse("all"), Filter::All);
        assert_eq!(Filter::parse("web"), Filter::Category("web".into()));
    }

    #[test]
    fn matches_whole_class_names_only() {
        let web = Filter::parse("web");
        assert!(web.matches("portfolio-item web"));
        assert!(!web.matches("portfolio-item webby"));
        assert!(!web.matches("portfolio-item mobile"));
        assert!(Filter::All.matches("anything"));
    }

    #[test]
    fn filter_mobile_shows_exactly_mobile_items() {
        let mut timeline = grid();
        timeline.click(&Filter::parse("mobile"));
        timeline.advance(HIDE_DELAY_MS);

        assert_eq!(timeline.visible(), vec![1, 4]);
        assert_eq!(timeline.style(0).display, "none");
        assert_eq!(
            timeline.style(1),
            &ItemStyle {
                display: "block",
                opacity: "1",
                transform: "translateY(0)",
            }
        );
    }

    #[test]
    fn shown_items_fade_in_after_show_delay() {
        let mut timeline = grid();
        timeline.click(&Filter::parse("design"));
        timeline.advance(HIDE_DELAY_MS);
        timeline.click(&Filter::All);

        assert_eq!(timeline.style(0).display, "block");
        assert_eq!(timeline.style(0).opacity, "0");

        timeline.advance(SHOW_DELAY_MS - 1);
        assert_eq!(timeline.style(0).opacity, "0");
        timeline.advance(1);
        assert_eq!(timeline.style(0).opacity, "1");
    }

    #[test]
    fn hidden_items_stay_in_layout_until_hide_delay() {
        let mut timeline = grid();
        timeline.click(&Filter::parse("web"));

        assert_eq!(timeline.style(1).opacity, "0");
        assert_eq!(timeline.style(1).display, "");
        timeline.advance(HIDE_DELAY_MS - 1);
        assert_eq!(timeline.style(1).display, "");
        timeline.advance(1);
        assert_eq!(timeline.style(1).display, "none");
    }

    #[test]
    fn later_click_cancels_earlier_timers() {
        let mut timeline = grid();
        timeline.click(&Filter::parse("web"));
        timeline.advance(50);
        timeline.click(&Filter::All);
        timeline.advance(1_000);

        assert_eq!(timeline.visible(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn switching_categories_quickly_settles_on_last() {
        let mut timeline = grid();
        timeline.click(&Filter::parse("web"));
        timeline.advance(50);
        timeline.click(&Filter::parse("design"));
        timeline.advance(1_000);

        assert_eq!(timeline.visible(), vec![3, 5]);
    }

    #[test]
    fn generation_counter_tracks_latest() {
        let counter = GenerationCounter::default();
        let first = counter.advance();
        assert!(counter.is_current(first));
        let second = counter.advance();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }
}
