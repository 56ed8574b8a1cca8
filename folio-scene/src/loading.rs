//! Loading overlay timeline

/// Time after document-ready before the overlay starts fading (ms)
pub const FADE_DELAY_MS: u32 = 1_500;

/// Fade duration before the overlay is removed from layout (ms)
pub const FADE_DURATION_MS: u32 = 500;

/// What the overlay looks like at a given time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Visible,
    /// `fade-out` class applied, still in layout
    FadingOut,
    /// `display: none`
    Hidden,
}

/// Schedule of the overlay, measured from document-ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTimeline {
    pub fade_delay_ms: u32,
    pub fade_duration_ms: u32,
}

impl Default for LoadingTimeline {
    fn default() -> Self {
        Self {
            fade_delay_ms: FADE_DELAY_MS,
            fade_duration_ms: FADE_DURATION_MS,
        }
    }
}

impl LoadingTimeline {
    /// Milliseconds after ready at which `display: none` is applied
    pub fn hidden_at(&self) -> u32 {
        self.fade_delay_ms + self.fade_duration_ms
    }

    /// Delay until the fade starts for a controller that began `elapsed_ms`
    /// after ready. Zero once the fade is due.
    pub fn remaining_fade_delay(&self, elapsed_ms: f64) -> u32 {
        remaining(self.fade_delay_ms, elapsed_ms)
    }

    /// Delay until the overlay is hidden, counted like
    /// [`LoadingTimeline::remaining_fade_delay`]
    pub fn remaining_hide_delay(&self, elapsed_ms: f64) -> u32 {
        remaining(self.hidden_at(), elapsed_ms)
    }

    pub fn phase_at(&self, elapsed_ms: u32) -> LoadingPhase {
        if elapsed_ms >= self.hidden_at() {
            LoadingPhase::Hidden
        } else if elapsed_ms >= self.fade_delay_ms {
            LoadingPhase::FadingOut
        } else {
            LoadingPhase::Visible
        }
    }
}

fn remaining(at_ms: u32, elapsed_ms: f64) -> u32 {
    if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return at_ms;
    }
    (f64::from(at_ms) - elapsed_ms).max(0.0).ceil() as u32
}
