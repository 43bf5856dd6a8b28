use egui::{Context, Id, Rect, ViewportId};

use crate::geometry::Screen;
use crate::host::Desktop;

/// Context data key (temp) set by the backend with monitor outer rects in global (desktop)
/// coordinates, in points.
pub const BACKEND_MONITORS_OUTER_RECTS_POINTS_KEY: &str = "egui-winit::monitors_outer_rects_points";

/// Context data key (temp) set by the backend with the usable work area of each monitor
/// (task bar and docks excluded), in the same order as
/// [`BACKEND_MONITORS_OUTER_RECTS_POINTS_KEY`].
///
/// Optional: when missing, the outer rects are used as visual bounds.
pub const BACKEND_MONITORS_WORK_AREAS_POINTS_KEY: &str = "egui-winit::monitors_work_areas_points";

#[inline]
pub fn set_backend_monitors_outer_rects_points(ctx: &Context, rects: Vec<Rect>) {
    let id = Id::new(BACKEND_MONITORS_OUTER_RECTS_POINTS_KEY);
    ctx.data_mut(|d| {
        d.insert_temp::<Vec<Rect>>(id, rects);
    });
}

#[inline]
pub fn set_backend_monitors_work_areas_points(ctx: &Context, rects: Vec<Rect>) {
    let id = Id::new(BACKEND_MONITORS_WORK_AREAS_POINTS_KEY);
    ctx.data_mut(|d| {
        d.insert_temp::<Vec<Rect>>(id, rects);
    });
}

#[inline]
pub fn clear_backend_monitors_points(ctx: &Context) {
    ctx.data_mut(|d| {
        d.remove::<Vec<Rect>>(Id::new(BACKEND_MONITORS_OUTER_RECTS_POINTS_KEY));
        d.remove::<Vec<Rect>>(Id::new(BACKEND_MONITORS_WORK_AREAS_POINTS_KEY));
    });
}

#[inline]
fn backend_rects(ctx: &Context, key: &str) -> Option<Vec<Rect>> {
    let id = Id::new(key);
    ctx.data(|d| {
        d.get_temp::<Vec<Rect>>(id)
            .or_else(|| d.get_temp::<Option<Vec<Rect>>>(id).flatten())
    })
}

/// The screens egui knows about.
///
/// Uses the backend monitor hints when present. Otherwise falls back to a single screen of
/// `monitor_size` at the origin, matching egui's `ViewportCommand::center_on_screen` convention.
pub fn backend_screens(ctx: &Context) -> Vec<Screen> {
    if let Some(outer) = backend_rects(ctx, BACKEND_MONITORS_OUTER_RECTS_POINTS_KEY)
        && !outer.is_empty()
    {
        let work = backend_rects(ctx, BACKEND_MONITORS_WORK_AREAS_POINTS_KEY).unwrap_or_default();
        return outer
            .iter()
            .enumerate()
            .map(|(i, &bounds)| {
                let visual = work.get(i).copied().unwrap_or(bounds);
                Screen::new(bounds).with_visual_bounds(visual)
            })
            .collect();
    }

    ctx.input(|i| i.viewport().monitor_size)
        .filter(|size| size.x.is_finite() && size.y.is_finite())
        .map(|size| vec![Screen::new(Rect::from_min_size(egui::Pos2::ZERO, size))])
        .unwrap_or_default()
}

/// Reads window geometry from the viewport info the backend feeds into [`egui::RawInput`].
///
/// Do not call these from inside a `ctx.input(..)` closure.
impl Desktop for Context {
    fn outer_rect(&self, window: ViewportId) -> Option<Rect> {
        self.input(|i| {
            let info = i.raw.viewports.get(&window)?;
            info.outer_rect.or(info.inner_rect)
        })
    }

    fn inner_rect(&self, window: ViewportId) -> Option<Rect> {
        self.input(|i| i.raw.viewports.get(&window)?.inner_rect)
    }

    fn owner_of(&self, window: ViewportId) -> Option<ViewportId> {
        if window == ViewportId::ROOT {
            return None;
        }
        self.input(|i| i.raw.viewports.get(&window)?.parent)
    }

    fn screens(&self) -> Vec<Screen> {
        backend_screens(self)
    }
}
