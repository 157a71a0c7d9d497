//! # Surface Module
//!
//! The drawing capability the painter renders through.
//!
//! ## Responsibilities
//! - **Primitives**: path building, clip, fill/stroke, rectangle fast paths,
//!   shadow parameters, surface-to-surface blits.
//! - **State**: three independent LIFO stacks (clip/paint state, transform,
//!   opacity) plus an explicit commit of the pending transform.
//! - **Scopes**: [`StateGuard`] pairs every push with exactly one pop.
//!
//! ## See Also
//! - `recording::RecordingSurface` for a backend that records calls.
//! - `revas_skia::SkiaSurface` for the raster backend.

use crate::color::Color;
use crate::geometry::Frame;
use crate::style::Shadow;
use std::ops::{Deref, DerefMut};

/// A 2D drawing target with canvas-style state management.
///
/// The trait is object-safe (apart from [`Surface::draw_surface`]) so custom
/// drawers can receive a `&mut dyn Surface`.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;

    /// Saves the clip and paint state.
    fn save(&mut self);
    /// Restores the most recently saved clip and paint state.
    fn restore(&mut self);

    /// Pushes the pending transform onto the transform stack.
    fn save_transform(&mut self);
    /// Pops the transform stack back into the pending transform.
    fn restore_transform(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Rotates by `radians`, clockwise in a y-down coordinate space.
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    /// Commits the pending transform so subsequent drawing uses it.
    fn apply_transform(&mut self);

    /// Multiplies the running opacity by `opacity` until the matching pop.
    fn push_opacity(&mut self, opacity: f32);
    fn pop_opacity(&mut self);

    /// Starts a new, empty current path.
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    /// Canvas `arcTo`: a corner arc tangent to the lines toward `(x1, y1)`
    /// and from there toward `(x2, y2)`.
    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32);
    /// Appends a closed rectangle sub-path.
    fn rect(&mut self, rect: Frame);
    fn close_path(&mut self);
    /// Intersects the clip region with the current path.
    fn clip(&mut self);
    /// Fills the current path.
    fn fill(&mut self, color: Color);
    /// Strokes the current path.
    fn stroke(&mut self, color: Color, width: f32);
    fn fill_rect(&mut self, rect: Frame, color: Color);
    fn stroke_rect(&mut self, rect: Frame, color: Color, width: f32);

    /// Applies a shadow to every subsequent fill and stroke.
    fn set_shadow(&mut self, shadow: &Shadow);
    fn reset_shadow(&mut self);

    /// Copies the pixels of `source` onto this surface at `dest`.
    fn draw_surface(&mut self, source: &mut Self, dest: Frame)
    where
        Self: Sized;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Scope {
    Clip,
    Opacity,
    Transform,
    Shadow,
}

/// A pushed surface scope, popped when dropped.
///
/// The guard derefs to the surface, so drawing continues through it:
///
/// ```rust,ignore
/// let mut clipped = StateGuard::clip(surface, true);
/// let mut faded = StateGuard::opacity(&mut *clipped, 0.5);
/// faded.fill_rect(frame, color);
/// // `faded` pops the opacity, then `clipped` restores the clip.
/// ```
pub struct StateGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    scope: Option<Scope>,
}

impl<'a, S: Surface + ?Sized> StateGuard<'a, S> {
    /// Saves the clip state when `enabled`; otherwise a no-op guard.
    pub fn clip(surface: &'a mut S, enabled: bool) -> Self {
        if enabled {
            surface.save();
        }
        Self {
            surface,
            scope: enabled.then_some(Scope::Clip),
        }
    }

    pub fn opacity(surface: &'a mut S, opacity: f32) -> Self {
        surface.push_opacity(opacity);
        Self {
            surface,
            scope: Some(Scope::Opacity),
        }
    }

    /// Saves the transform when `enabled`; otherwise a no-op guard.
    pub fn transform(surface: &'a mut S, enabled: bool) -> Self {
        if enabled {
            surface.save_transform();
        }
        Self {
            surface,
            scope: enabled.then_some(Scope::Transform),
        }
    }

    /// Sets `shadow` when present; reset on drop.
    pub fn shadow(surface: &'a mut S, shadow: Option<&Shadow>) -> Self {
        if let Some(shadow) = shadow {
            surface.set_shadow(shadow);
        }
        Self {
            surface,
            scope: shadow.map(|_| Scope::Shadow),
        }
    }
}

impl<S: Surface + ?Sized> Deref for StateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        match self.scope {
            Some(Scope::Clip) => self.surface.restore(),
            Some(Scope::Opacity) => self.surface.pop_opacity(),
            Some(Scope::Transform) => self.surface.restore_transform(),
            Some(Scope::Shadow) => self.surface.reset_shadow(),
            None => {}
        }
    }
}
