//! Scroll-linked animation: maps document progress to the values the frame
//! scheduler applies each tick.
//!
//! Every scrubbed value is a pure function of progress (`compute_targets`), so
//! scrolling back up plays the animation in reverse. The only time-based piece is
//! the one-shot features fly-in ([`FlyIn`]).

use crate::config::LensSettings;
use crate::constants::*;
use crate::scene::Section;
use smallvec::SmallVec;

/// Top and bottom of each section in document pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub spans: [(f32, f32); SECTION_COUNT],
}

impl SectionBounds {
    /// One viewport-tall section after another, which is how the page is laid out
    /// when the named section elements cannot be measured.
    pub fn uniform(viewport_height: f32) -> Self {
        let mut spans = [(0.0, 0.0); SECTION_COUNT];
        for (i, span) in spans.iter_mut().enumerate() {
            *span = (
                i as f32 * viewport_height,
                (i + 1) as f32 * viewport_height,
            );
        }
        Self { spans }
    }

    pub fn span(&self, section: Section) -> (f32, f32) {
        self.spans[section.index()]
    }
}

/// Progress range over which a section's animation is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerWindow {
    pub start: f32,
    pub end: f32,
}

impl TriggerWindow {
    /// Position inside the window, 0 before entry and 1 after exit.
    pub fn local(&self, progress: f32) -> f32 {
        if self.end > self.start {
            ((progress - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
        } else if progress >= self.start {
            1.0
        } else {
            0.0
        }
    }

    pub fn entered(&self, progress: f32) -> bool {
        progress >= self.start && (self.start > 0.0 || progress > 0.0)
    }
}

/// Trigger windows for all sections, in progress units.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerLayout {
    pub windows: [TriggerWindow; SECTION_COUNT],
}

impl TriggerLayout {
    /// Entry when a section's top reaches 80% of the viewport height, exit when
    /// its bottom reaches 20%. Both ends are clamped to the reachable scroll range.
    pub fn new(bounds: &SectionBounds, viewport_height: f32, document_height: f32) -> Self {
        let max_scroll = (document_height - viewport_height).max(0.0);
        let to_progress = |px: f32| {
            if max_scroll > 0.0 {
                (px.clamp(0.0, max_scroll)) / max_scroll
            } else {
                0.0
            }
        };
        let mut windows = [TriggerWindow { start: 0.0, end: 0.0 }; SECTION_COUNT];
        for (window, &(top, bottom)) in windows.iter_mut().zip(bounds.spans.iter()) {
            let start = top - TRIGGER_ENTER_VIEWPORT * viewport_height;
            let end = bottom - TRIGGER_EXIT_VIEWPORT * viewport_height;
            *window = TriggerWindow {
                start: to_progress(start),
                end: to_progress(end),
            };
        }
        Self { windows }
    }

    pub fn window(&self, section: Section) -> TriggerWindow {
        self.windows[section.index()]
    }
}

/// Everything the scroll position decides for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetState {
    pub camera_y: f32,
    pub wave_amplitude: f32,
    pub bar_heights: [f32; 4],
    pub contact_scale: f32,
    pub features_entered: bool,
    pub backdrop_offsets: SmallVec<[f32; 2]>,
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    0.5 - 0.5 * (std::f32::consts::PI * t.clamp(0.0, 1.0)).cos()
}

/// Height of bar `index` at window position `local`, staggered per bar.
pub fn bar_height(index: usize, local: f32) -> f32 {
    let t = (local - index as f32 * BAR_STAGGER) / BAR_RISE;
    ease_out_cubic(t)
}

/// Map document progress to this frame's target values.
pub fn compute_targets(progress: f32, layout: &TriggerLayout) -> TargetState {
    let progress = progress.clamp(0.0, 1.0);
    let camera_y = progress * -TOTAL_SECTION_SPAN;

    let showcase = layout.window(Section::Showcase).local(progress);
    let wave_amplitude = WAVE_PEAK_AMPLITUDE * (std::f32::consts::PI * showcase).sin().max(0.0);

    let stats = layout.window(Section::Stats).local(progress);
    let bar_heights = [
        bar_height(0, stats),
        bar_height(1, stats),
        bar_height(2, stats),
        bar_height(3, stats),
    ];

    let contact = layout.window(Section::Contact).local(progress);
    let contact_scale =
        CONTACT_SCALE_START + (CONTACT_SCALE_END - CONTACT_SCALE_START) * ease_in_out_sine(contact);

    // A layer with rate r appears to travel r times as far as the foreground
    let backdrop_offsets = PARALLAX_RATES
        .iter()
        .map(|rate| camera_y * (1.0 - rate))
        .collect();

    TargetState {
        camera_y,
        wave_amplitude,
        bar_heights,
        contact_scale,
        features_entered: layout.window(Section::Features).entered(progress),
        backdrop_offsets,
    }
}

/// Per-update change in progress, sampled once per tick.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    last: Option<f32>,
    velocity: f32,
}

impl ScrollTracker {
    pub fn update(&mut self, progress: f32) -> f32 {
        self.velocity = match self.last {
            Some(prev) => progress - prev,
            None => 0.0,
        };
        self.last = Some(progress);
        self.velocity
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

/// Lens offset the scheduler eases toward for a given scroll velocity.
pub fn lens_target(velocity: f32, lens: &LensSettings) -> f32 {
    let v = if velocity.is_finite() { velocity.abs() } else { 0.0 };
    lens.base_offset + (v * lens.velocity_gain).min(lens.max_offset)
}

/// One-shot staggered fly-in, started by the first entry into a trigger window.
#[derive(Clone, Debug, Default)]
pub struct FlyIn {
    started_at: Option<f32>,
}

impl FlyIn {
    pub fn update(&mut self, entered: bool, time: f32) {
        if entered && self.started_at.is_none() {
            log::debug!("features fly-in started at t={time:.2}");
            self.started_at = Some(time);
        }
    }

    pub fn started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Eased completion for the object at `index`, 0 before the reveal starts.
    pub fn completion(&self, index: usize, time: f32) -> f32 {
        match self.started_at {
            Some(t0) => {
                let delay = index as f32 * REVEAL_STAGGER_SEC;
                ease_out_cubic((time - t0 - delay) / REVEAL_DURATION_SEC)
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_window_steps_at_start() {
        let w = TriggerWindow {
            start: 0.4,
            end: 0.4,
        };
        assert_eq!(w.local(0.39), 0.0);
        assert_eq!(w.local(0.4), 1.0);
    }

    #[test]
    fn bars_are_staggered() {
        let h: Vec<f32> = (0..4).map(|i| bar_height(i, 0.3)).collect();
        assert!(h[0] > h[1] && h[1] > h[2] && h[2] > h[3]);
        assert_eq!(bar_height(3, 1.0), 1.0);
        assert_eq!(bar_height(0, 0.0), 0.0);
    }
}
