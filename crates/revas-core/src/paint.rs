//! # Paint Engine
//!
//! Recursively paints a node tree onto a [`Surface`].
//!
//! ## Responsibilities
//! - **Dispatch** (`draw_node`): prunes invisible subtrees, opens the clip,
//!   opacity and transform scopes, then paints directly or through the cache.
//! - **Cached paint** (`draw_cache`): rasterizes a ready subtree once into an
//!   offscreen surface and blits it on every paint.
//! - **Direct paint** (`draw_content`): box geometry (background, border,
//!   shadow), the custom drawer, then children in z-order.
//!
//! Scopes are opened pre-order and released post-order through
//! [`StateGuard`]s, so every exit path (including errors raised by custom
//! drawers) leaves the surface stacks balanced.

use crate::cache::{CacheKey, OffscreenCache};
use crate::errors::PaintError;
use crate::geometry::{CornerRadii, Frame};
use crate::node::{CacheMode, Container, Node};
use crate::resolve::{FrameProvider, MergedStyleResolver, NodeFrames, StyleResolver};
use crate::style::{set, Style};
use crate::surface::{StateGuard, Surface};
use tracing::{debug, instrument, trace, warn};

/// Paints nodes using injected style, frame and cache collaborators.
pub struct Painter<'a, S> {
    styles: &'a dyn StyleResolver,
    frames: &'a dyn FrameProvider,
    /// `None` when offscreen surfaces cannot be created.
    cache: Option<&'a mut dyn OffscreenCache<S>>,
}

impl<S> Default for Painter<'_, S> {
    fn default() -> Self {
        Self {
            styles: &MergedStyleResolver,
            frames: &NodeFrames,
            cache: None,
        }
    }
}

impl<'a, S: Surface> Painter<'a, S> {
    pub fn new(styles: &'a dyn StyleResolver, frames: &'a dyn FrameProvider) -> Self {
        Self {
            styles,
            frames,
            cache: None,
        }
    }

    /// Enables cached painting for nodes that request it.
    pub fn with_cache(mut self, cache: &'a mut dyn OffscreenCache<S>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Paints `node` and its subtree.
    ///
    /// `root` supplies the style context every node is resolved against.
    pub fn draw_node(
        &mut self,
        surface: &mut S,
        node: &Node,
        root: &Container,
    ) -> Result<(), PaintError> {
        let style = self.styles.resolve(node, &root.context);
        let frame = self.frames.frame(node);

        let opacity = style.opacity();
        if opacity.is_nan() || opacity <= 0.0 {
            trace!(node = %node.id(), "pruned transparent subtree");
            return Ok(());
        }

        let has_transform = style.has_transform();
        let has_clip = style.has_clip();

        let mut clipped = StateGuard::clip(surface, has_clip);
        let mut faded = StateGuard::opacity(&mut *clipped, opacity);
        let mut moved = StateGuard::transform(&mut *faded, has_transform);

        if style.has_translate() {
            moved.translate(
                set(style.translate_x).unwrap_or(0.0),
                set(style.translate_y).unwrap_or(0.0),
            );
        }

        // Rotate and scale about the frame center.
        let scale = style.scale_factors();
        if style.has_rotate() || scale.is_some() {
            let (origin_x, origin_y) = frame.center();
            moved.translate(origin_x, origin_y);
            if let Some(angle) = set(style.rotate) {
                moved.rotate(angle);
            }
            if let Some((sx, sy)) = scale {
                moved.scale(sx, sy);
            }
            moved.translate(-origin_x, -origin_y);
        }

        moved.apply_transform();

        if node.props.cache.is_enabled() && self.cache.is_some() && frame.is_drawable() {
            self.draw_cache(&mut moved, node, root, &style, frame, has_clip)
        } else {
            self.draw_content(&mut moved, node, root, &style, frame, has_clip)
        }
    }

    fn draw_cache(
        &mut self,
        surface: &mut S,
        node: &Node,
        root: &Container,
        style: &Style,
        frame: Frame,
        has_clip: bool,
    ) -> Result<(), PaintError> {
        let Some(cache) = self.cache.as_deref_mut() else {
            return self.draw_content(surface, node, root, style, frame, has_clip);
        };

        let key = match &node.props.cache {
            CacheMode::Key(key) => CacheKey::new(key.as_str()),
            _ => cache.auto_key(node),
        };

        if !cache.contains(&key) {
            if !node.is_ready() {
                debug!(%key, "subtree not ready, painting uncached");
                return self.draw_content(surface, node, root, style, frame, has_clip);
            }

            let (width, height) = frame.pixel_size();
            let mut offscreen = match cache.allocate(width, height) {
                Ok(offscreen) => offscreen,
                Err(err) => {
                    warn!(%key, "offscreen allocation failed, painting uncached: {}", err);
                    return self.draw_content(surface, node, root, style, frame, has_clip);
                }
            };
            offscreen.translate(-frame.x, -frame.y);
            offscreen.apply_transform();
            self.draw_content(&mut offscreen, node, root, style, frame, has_clip)?;

            debug!(%key, width, height, "rasterized subtree");
            if let Some(cache) = self.cache.as_deref_mut() {
                cache.insert(key.clone(), offscreen);
            }
        }

        if let Some(entry) = self
            .cache
            .as_deref_mut()
            .and_then(|cache| cache.get_mut(&key))
        {
            // 1:1 copy at the entry's own pixel size.
            let dest = Frame::new(frame.x, frame.y, entry.width() as f32, entry.height() as f32);
            trace!(%key, "blit cached subtree");
            surface.draw_surface(entry, dest);
        }
        Ok(())
    }

    fn draw_content(
        &mut self,
        surface: &mut S,
        node: &Node,
        root: &Container,
        style: &Style,
        frame: Frame,
        has_clip: bool,
    ) -> Result<(), PaintError> {
        let has_bg = style.has_background();
        let has_border = style.has_border();
        let has_radius = style.has_radius();
        let custom_path = style.has_custom_path();

        let use_frame = has_bg || has_border || has_clip || custom_path;
        let use_path = has_radius || has_clip || custom_path;

        if use_frame {
            if use_path {
                surface.begin_path();
                if has_radius {
                    rounded_rect(surface, frame, style.radii());
                } else {
                    surface.rect(frame);
                }
                surface.close_path();

                if has_clip {
                    surface.clip();
                }
            }

            if has_bg || has_border {
                let shadow = style.shadow();
                let mut shaded = StateGuard::shadow(&mut *surface, shadow.as_ref());

                if let Some(color) = style.background_color.filter(|_| has_bg) {
                    if use_path {
                        shaded.fill(color);
                    } else {
                        shaded.fill_rect(frame, color);
                    }
                }

                if let (true, Some(color), Some(width)) =
                    (has_border, style.border_color, style.border_width)
                {
                    if use_path {
                        shaded.stroke(color, width);
                    } else {
                        shaded.stroke_rect(frame, color, width);
                    }
                }
            }
        }

        if let Some(drawer) = &node.props.drawer {
            drawer(surface, node)?;
        }

        for child in node.paint_order() {
            self.draw_node(surface, child, root)?;
        }
        Ok(())
    }
}

/// Traces a rounded rectangle clockwise from the top edge.
fn rounded_rect<S: Surface + ?Sized>(surface: &mut S, frame: Frame, radii: CornerRadii) {
    let (left, top, right, bottom) = (frame.x, frame.y, frame.right(), frame.bottom());
    surface.move_to(left + radii.top_left, top);
    surface.arc_to(right, top, right, bottom, radii.top_right);
    surface.arc_to(right, bottom, left, bottom, radii.bottom_right);
    surface.arc_to(left, bottom, left, top, radii.bottom_left);
    surface.arc_to(left, top, right, top, radii.top_left);
}

impl Container {
    /// Paints the whole tree rooted at this container.
    #[instrument(level = "debug", skip_all, fields(root = %self.root.id()))]
    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        painter: &mut Painter<'_, S>,
    ) -> Result<(), PaintError> {
        painter.draw_node(surface, &self.root, self)
    }
}
