//! Pure geometry helpers shared by the float, resize and maximize engines.

use egui::{Pos2, Rect, Vec2};

/// Border thickness on each side of a rectangle, in points.
///
/// The floating border wrapper uses these to make room for its drop shadow, and the resize engine
/// hit-tests the pointer against the same bands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const ZERO: Self = Self::same(0.0);

    pub const fn same(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    /// `left + right`
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Combined horizontal and vertical thickness.
    #[inline]
    pub fn sum(&self) -> Vec2 {
        Vec2::new(self.horizontal(), self.vertical())
    }

    /// Offset from the outer corner to the inner content corner.
    #[inline]
    pub fn left_top(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }
}

/// A monitor as seen by the windowing backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    /// Full monitor rect in global (desktop) coordinates.
    pub bounds: Rect,

    /// Usable area, i.e. `bounds` minus task bars, docks and other reserved regions.
    pub visual_bounds: Rect,
}

impl Screen {
    /// A screen without reserved regions.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            visual_bounds: bounds,
        }
    }

    pub fn with_visual_bounds(mut self, visual_bounds: Rect) -> Self {
        self.visual_bounds = visual_bounds;
        self
    }
}

/// Grow a content size by the border insets around it.
#[inline]
pub fn inset_adjusted_size(size: Vec2, insets: Insets) -> Vec2 {
    size + insets.sum()
}

/// Where a floating window should be placed so that its *content* lands on `content_origin`.
#[inline]
pub fn outer_origin_for_content(content_origin: Pos2, insets: Insets) -> Pos2 {
    content_origin - insets.left_top()
}

/// Apply an optional caller-supplied offset to a point.
#[inline]
pub fn offset_by(pos: Pos2, offset: Option<Vec2>) -> Pos2 {
    offset.map_or(pos, |offset| pos + offset)
}

/// Pointer movement since the last recorded position.
#[inline]
pub fn pointer_delta(last: Pos2, current: Pos2) -> Vec2 {
    current - last
}

/// Find the screen that contains `rect`.
///
/// Prefers the screen with the largest intersection. If nothing intersects (e.g. the window was
/// moved fully off-screen), picks the screen whose bounds are closest to `rect.min`.
pub fn screen_for_rect(screens: &[Screen], rect: Rect) -> Option<&Screen> {
    fn area(rect: Rect) -> f32 {
        rect.width() * rect.height()
    }

    let mut best: Option<(&Screen, f32)> = None;
    for screen in screens {
        let inter = rect.intersect(screen.bounds);
        if !inter.is_positive() {
            continue;
        }
        let a = area(inter);
        match best {
            Some((_, best_area)) if a <= best_area => {}
            _ => best = Some((screen, a)),
        }
    }
    if let Some((screen, _)) = best {
        return Some(screen);
    }

    screens
        .iter()
        .map(|screen| {
            let b = screen.bounds;
            let clamped = egui::pos2(
                rect.min.x.clamp(b.min.x, b.max.x),
                rect.min.y.clamp(b.min.y, b.max.y),
            );
            (screen, clamped.distance(rect.min))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(screen, _d)| screen)
}

/// Visual bounds of the screen containing `rect`, if any screen is known.
pub fn visual_bounds_for_rect(screens: &[Screen], rect: Rect) -> Option<Rect> {
    screen_for_rect(screens, rect).map(|screen| screen.visual_bounds)
}
