//! # Revas Skia
//!
//! A [`Surface`] backed by a Skia raster surface.
//!
//! Clip and paint state live on the Skia canvas save stack. The transform
//! and opacity scopes are tracked here: the pending matrix is only pushed to
//! the canvas on `apply_transform`, and opacity multiplies into the alpha of
//! every fill, stroke and blit.

use revas_core::{Color, Frame, MemoryCache, PaintError, Shadow, Surface};
use skia_safe::{
    image_filters, AlphaType, ClipOp, Color4f, ColorSpace, ColorType, EncodedImageFormat,
    ImageFilter, ImageInfo, Matrix, Paint, PaintStyle, Path, Rect,
};
use tracing::trace;

pub struct SkiaSurface {
    surface: skia_safe::Surface,
    width: u32,
    height: u32,
    path: Path,
    matrix: Matrix,
    matrix_stack: Vec<Matrix>,
    alpha: f32,
    alpha_stack: Vec<f32>,
    shadow: Option<ImageFilter>,
}

impl SkiaSurface {
    /// Allocates a transparent `width` x `height` raster surface.
    pub fn new(width: u32, height: u32) -> Result<Self, PaintError> {
        let info = ImageInfo::new(
            (width as i32, height as i32),
            ColorType::RGBA8888,
            AlphaType::Premul,
            Some(ColorSpace::new_srgb()),
        );
        let surface = skia_safe::surfaces::raster(&info, None, None)
            .ok_or(PaintError::SurfaceAllocation { width, height })?;
        trace!(width, height, "allocated raster surface");

        Ok(Self {
            surface,
            width,
            height,
            path: Path::new(),
            matrix: Matrix::default(),
            matrix_stack: Vec::new(),
            alpha: 1.0,
            alpha_stack: Vec::new(),
            shadow: None,
        })
    }

    /// Fills the whole surface with `color`, ignoring clip and opacity.
    pub fn clear(&mut self, color: Color) {
        self.surface.canvas().clear(to_color4f(color));
    }

    /// Reads back one unpremultiplied pixel.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let info = ImageInfo::new((1, 1), ColorType::RGBA8888, AlphaType::Unpremul, None);
        let mut bytes = [0u8; 4];
        if self
            .surface
            .read_pixels(&info, &mut bytes, 4, (x as i32, y as i32))
        {
            Some(Color::from_rgba8(bytes[0], bytes[1], bytes[2], bytes[3]))
        } else {
            None
        }
    }

    pub fn encode_png(&mut self) -> Result<Vec<u8>, PaintError> {
        let image = self.surface.image_snapshot();
        let data = image
            .encode(None, EncodedImageFormat::PNG, 100)
            .ok_or_else(|| PaintError::Encode("skia refused to encode PNG".into()))?;
        Ok(data.as_bytes().to_vec())
    }

    fn paint(&self, color: Color) -> Paint {
        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        paint.set_color4f(to_color4f(color.with_alpha_multiplied(self.alpha)), None);
        if let Some(filter) = &self.shadow {
            paint.set_image_filter(filter.clone());
        }
        paint
    }

    fn stroke_paint(&self, color: Color, width: f32) -> Paint {
        let mut paint = self.paint(color);
        paint.set_style(PaintStyle::Stroke);
        paint.set_stroke_width(width);
        paint
    }
}

impl Surface for SkiaSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.surface.canvas().save();
    }

    fn restore(&mut self) {
        self.surface.canvas().restore();
    }

    fn save_transform(&mut self) {
        self.matrix_stack.push(self.matrix);
    }

    fn restore_transform(&mut self) {
        if let Some(matrix) = self.matrix_stack.pop() {
            self.matrix = matrix;
        }
        self.apply_transform();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.matrix.pre_translate((dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.matrix.pre_rotate(radians.to_degrees(), None);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.matrix.pre_scale((sx, sy), None);
    }

    fn apply_transform(&mut self) {
        let matrix = self.matrix;
        let canvas = self.surface.canvas();
        canvas.reset_matrix();
        canvas.concat(&matrix);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.alpha_stack.push(self.alpha);
        self.alpha *= opacity.clamp(0.0, 1.0);
    }

    fn pop_opacity(&mut self) {
        if let Some(alpha) = self.alpha_stack.pop() {
            self.alpha = alpha;
        }
    }

    fn begin_path(&mut self) {
        self.path = Path::new();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x, y));
    }

    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.path.arc_to_tangent((x1, y1), (x2, y2), radius.max(0.0));
    }

    fn rect(&mut self, rect: Frame) {
        self.path.add_rect(to_rect(rect), None);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn clip(&mut self) {
        let path = self.path.clone();
        self.surface
            .canvas()
            .clip_path(&path, ClipOp::Intersect, true);
    }

    fn fill(&mut self, color: Color) {
        let paint = self.paint(color);
        let path = self.path.clone();
        self.surface.canvas().draw_path(&path, &paint);
    }

    fn stroke(&mut self, color: Color, width: f32) {
        let paint = self.stroke_paint(color, width);
        let path = self.path.clone();
        self.surface.canvas().draw_path(&path, &paint);
    }

    fn fill_rect(&mut self, rect: Frame, color: Color) {
        let paint = self.paint(color);
        self.surface.canvas().draw_rect(to_rect(rect), &paint);
    }

    fn stroke_rect(&mut self, rect: Frame, color: Color, width: f32) {
        let paint = self.stroke_paint(color, width);
        self.surface.canvas().draw_rect(to_rect(rect), &paint);
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        let sigma = shadow.blur / 2.0;
        self.shadow = image_filters::drop_shadow(
            (shadow.offset_x, shadow.offset_y),
            (sigma, sigma),
            to_color4f(shadow.color).to_color(),
            None,
            None,
            None,
        );
    }

    fn reset_shadow(&mut self) {
        self.shadow = None;
    }

    fn draw_surface(&mut self, source: &mut Self, dest: Frame) {
        let image = source.surface.image_snapshot();
        let mut paint = Paint::default();
        paint.set_anti_alias(true);
        paint.set_alpha_f(self.alpha);
        self.surface
            .canvas()
            .draw_image_rect(&image, None, to_rect(dest), &paint);
    }
}

/// An offscreen cache that allocates Skia raster surfaces.
pub fn skia_cache() -> MemoryCache<SkiaSurface> {
    MemoryCache::new(SkiaSurface::new)
}

pub fn to_color4f(color: Color) -> Color4f {
    Color4f::new(color.r, color.g, color.b, color.a)
}

fn to_rect(frame: Frame) -> Rect {
    Rect::from_xywh(frame.x, frame.y, frame.width, frame.height)
}
