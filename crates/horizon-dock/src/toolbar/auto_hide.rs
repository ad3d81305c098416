//! Auto-hide slide animation.
//!
//! A toolbar docked at a screen edge can slide off screen when the pointer
//! leaves it, leaving a sliver of [`PADDING`] pixels visible, and slide back
//! in when the pointer returns.
//!
//! ```text
//!   Visible ──hide──▶ SlidingOut ──done──▶ Hidden
//!      ▲                 │   ▲                │
//!      │               show hide              │
//!      │                 ▼   │                │
//!      └────done──── SlidingIn ◀────show──────┘
//! ```

use horizon_dock_core::{Easing, lerp_eased, logging::targets};
use horizon_dock_render::{Point, Rect, Size};

use super::layout::PADDING;

/// Alpha of unimportant buttons and the border while a toolbar is about to
/// slide out.
pub const FADED_ALPHA: f32 = 0.4;

/// Where a toolbar is in its auto-hide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Visible,
    SlidingOut,
    Hidden,
    SlidingIn,
}

impl DisplayMode {
    pub fn is_sliding(self) -> bool {
        matches!(self, Self::SlidingIn | Self::SlidingOut)
    }
}

/// A screen edge a toolbar can be docked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// The edge `rect` touches, if any. Left and right win over top and
    /// bottom.
    pub fn docked(rect: Rect, screen: Size) -> Option<Edge> {
        if rect.left() <= 0.0 {
            Some(Edge::Left)
        } else if rect.left() >= screen.width - rect.width() {
            Some(Edge::Right)
        } else if rect.top() <= 0.0 {
            Some(Edge::Top)
        } else if rect.top() >= screen.height - rect.height() {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    /// Origins of a toolbar at this edge when shown and when hidden.
    pub fn slide_endpoints(self, rect: Rect, screen: Size) -> (Point, Point) {
        let (x, y, w, h) = (rect.left(), rect.top(), rect.width(), rect.height());
        match self {
            Edge::Left => (Point::new(-PADDING, y), Point::new(-w + PADDING, y)),
            Edge::Right => (
                Point::new(screen.width - w + PADDING, y),
                Point::new(screen.width - PADDING, y),
            ),
            Edge::Top => (Point::new(x, -PADDING), Point::new(x, -h + PADDING)),
            Edge::Bottom => (
                Point::new(x, screen.height - h + PADDING),
                Point::new(x, screen.height - PADDING),
            ),
        }
    }
}

/// One slide between two origins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    start_ms: i64,
    from: Point,
    to: Point,
}

impl Slide {
    pub fn new(start_ms: i64, from: Point, to: Point) -> Self {
        Self { start_ms, from, to }
    }

    /// Origin at `now_ms`. Exactly `from` at the start and `to` once
    /// `duration_ms` has passed.
    pub fn position(&self, now_ms: i64, duration_ms: i64) -> Point {
        let elapsed = (now_ms - self.start_ms).min(duration_ms);
        let t = elapsed as f32 / duration_ms as f32;
        Point::new(
            lerp_eased(Easing::SmoothStep, self.from.x, self.to.x, t),
            lerp_eased(Easing::SmoothStep, self.from.y, self.to.y, t),
        )
    }

    pub fn is_done(&self, now_ms: i64, duration_ms: i64) -> bool {
        now_ms - self.start_ms >= duration_ms
    }
}

/// Auto-hide state of one toolbar.
#[derive(Debug, Clone)]
pub struct AutoHide {
    mode: DisplayMode,
    slide: Option<Slide>,
    duration_ms: i64,
}

impl AutoHide {
    pub fn new(duration_ms: i64) -> Self {
        Self {
            mode: DisplayMode::Visible,
            slide: None,
            duration_ms: duration_ms.max(1),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The slide in progress.
    pub fn slide(&self) -> Option<&Slide> {
        self.slide.as_ref()
    }

    /// Advance one frame for a toolbar at `rect`.
    ///
    /// `keep_shown` is whether something currently requires the toolbar to
    /// be on screen. Returns the new origin while a slide is running.
    pub fn step(&mut self, rect: Rect, screen: Size, keep_shown: bool, now_ms: i64) -> Option<Point> {
        if keep_shown {
            if !matches!(self.mode, DisplayMode::Visible | DisplayMode::SlidingIn) {
                self.begin(DisplayMode::SlidingIn, rect, screen, now_ms);
            }
        } else if !matches!(self.mode, DisplayMode::Hidden | DisplayMode::SlidingOut) {
            self.begin(DisplayMode::SlidingOut, rect, screen, now_ms);
        }

        if !self.mode.is_sliding() {
            return None;
        }
        let Some(slide) = self.slide else {
            self.finish();
            return None;
        };

        let position = slide.position(now_ms, self.duration_ms);
        tracing::trace!(target: targets::TOOLBAR, elapsed = now_ms - slide.start_ms, x = position.x, y = position.y, "slide step");
        if slide.is_done(now_ms, self.duration_ms) {
            self.finish();
        }
        Some(position)
    }

    fn begin(&mut self, mode: DisplayMode, rect: Rect, screen: Size, now_ms: i64) {
        tracing::debug!(target: targets::TOOLBAR, from = ?self.mode, to = ?mode, "starting slide");

        let start_ms = match (self.mode, &self.slide) {
            (DisplayMode::SlidingIn | DisplayMode::SlidingOut, Some(slide)) => {
                // Run the reverse slide from the matching point in time.
                let spent = (now_ms - slide.start_ms).clamp(0, self.duration_ms);
                now_ms - (self.duration_ms - spent)
            }
            _ => now_ms,
        };

        self.slide = Edge::docked(rect, screen).map(|edge| {
            let (shown, hidden) = edge.slide_endpoints(rect, screen);
            match mode {
                DisplayMode::SlidingIn => Slide::new(start_ms, hidden, shown),
                _ => Slide::new(start_ms, shown, hidden),
            }
        });
        self.mode = mode;
    }

    fn finish(&mut self) {
        self.mode = match self.mode {
            DisplayMode::SlidingIn => DisplayMode::Visible,
            DisplayMode::SlidingOut => DisplayMode::Hidden,
            other => other,
        };
        self.slide = None;
        tracing::debug!(target: targets::TOOLBAR, mode = ?self.mode, "slide done");
    }
}
