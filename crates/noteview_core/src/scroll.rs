//! Scroll position carry-over between re-renders.
//!
//! # Responsibility
//! - Capture a surface's vertical position as a fraction of its extent.
//! - Re-apply that fraction to a freshly rendered surface.
//! - Hide the display backend behind `ScrollBridge` so callers never branch
//!   on which backend is active.
//!
//! # Invariants
//! - A captured fraction is always within `[0, 1]`.
//! - A surface without scrollable overflow is never scrolled.
//! - Call order is capture(old) -> replace content -> restore(new).

use crate::config::ScrollBackend;

/// Vertical scroll access of a rendered surface, in pixels.
pub trait ScrollSurface {
    fn scroll_offset(&self) -> u32;
    /// Largest reachable offset; 0 when the content fits without a scrollbar.
    fn max_scroll_offset(&self) -> u32;
    fn set_scroll_offset(&mut self, offset: u32);
}

/// Normalized vertical position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    fraction: f64,
}

impl ScrollState {
    pub const TOP: Self = Self { fraction: 0.0 };

    /// Builds a state, clamping to `[0, 1]`; NaN maps to the top.
    pub fn from_fraction(fraction: f64) -> Self {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        Self { fraction }
    }

    pub fn fraction(self) -> f64 {
        self.fraction
    }

    /// Position as a rounded percentage (0..=100).
    pub fn percent(self) -> u32 {
        (self.fraction * 100.0).round() as u32
    }
}

pub fn capture(surface: &dyn ScrollSurface) -> ScrollState {
    let max = surface.max_scroll_offset();
    if max == 0 {
        return ScrollState::TOP;
    }
    ScrollState::from_fraction(f64::from(surface.scroll_offset()) / f64::from(max))
}

pub fn restore(surface: &mut dyn ScrollSurface, state: ScrollState) {
    let max = surface.max_scroll_offset();
    if max == 0 {
        return;
    }
    let fraction = ScrollState::from_fraction(state.fraction()).fraction();
    let target = (fraction * f64::from(max)).round() as u32;
    surface.set_scroll_offset(target.min(max));
}

/// Backend-specific way of carrying a captured position into a new render.
pub trait ScrollBridge {
    /// Percentage the rendered document should scroll itself to; 0 for none.
    fn scroll_hint(&self, state: ScrollState) -> u32;
    /// Applies `state` to the surface once the new content is in place.
    fn restore_after_render(&self, surface: &mut dyn ScrollSurface, state: ScrollState);
}

/// Surface exposes its scrollbar: restore directly after rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectScroll;

impl ScrollBridge for DirectScroll {
    fn scroll_hint(&self, _state: ScrollState) -> u32 {
        0
    }

    fn restore_after_render(&self, surface: &mut dyn ScrollSurface, state: ScrollState) {
        restore(surface, state);
    }
}

/// Surface is only scrollable from inside the document: pass a hint.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedScroll;

impl ScrollBridge for ScriptedScroll {
    fn scroll_hint(&self, state: ScrollState) -> u32 {
        state.percent()
    }

    fn restore_after_render(&self, _surface: &mut dyn ScrollSurface, _state: ScrollState) {}
}

pub fn scroll_bridge_for(backend: ScrollBackend) -> Box<dyn ScrollBridge> {
    match backend {
        ScrollBackend::Direct => Box::new(DirectScroll),
        ScrollBackend::Scripted => Box::new(ScriptedScroll),
    }
}
