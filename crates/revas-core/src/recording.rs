//! # Recording Surface
//!
//! A [`Surface`] that records every call instead of rasterizing.
//!
//! Besides the raw call log it tracks the pending and committed transforms
//! (as `kurbo::Affine`) and the running opacity, so commits and blits carry
//! the state they were issued under. Used by tests, benchmarks and for
//! dumping what a tree would paint.

use crate::color::Color;
use crate::geometry::Frame;
use crate::style::Shadow;
use crate::surface::Surface;
use kurbo::Affine;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Save,
    Restore,
    SaveTransform,
    RestoreTransform,
    Translate(f32, f32),
    Rotate(f32),
    Scale(f32, f32),
    /// The matrix committed by `apply_transform`.
    ApplyTransform(Affine),
    PushOpacity(f32),
    PopOpacity,
    BeginPath,
    MoveTo(f32, f32),
    ArcTo {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        radius: f32,
    },
    Rect(Frame),
    ClosePath,
    Clip,
    Fill(Color),
    Stroke(Color, f32),
    FillRect(Frame, Color),
    StrokeRect(Frame, Color, f32),
    SetShadow(Shadow),
    ResetShadow,
    DrawSurface {
        source: u64,
        dest: Frame,
        alpha: f32,
    },
}

impl Command {
    /// Fill, stroke and blit commands: the ones that put pixels down.
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Command::Fill(_)
                | Command::Stroke(..)
                | Command::FillRect(..)
                | Command::StrokeRect(..)
                | Command::DrawSurface { .. }
        )
    }
}

#[derive(Debug)]
pub struct RecordingSurface {
    serial: u64,
    width: u32,
    height: u32,
    commands: Vec<Command>,
    transform: Affine,
    transform_stack: Vec<Affine>,
    committed: Affine,
    opacity: f32,
    opacity_stack: Vec<f32>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            commands: Vec::new(),
            transform: Affine::IDENTITY,
            transform_stack: Vec::new(),
            committed: Affine::IDENTITY,
            opacity: 1.0,
            opacity_stack: Vec::new(),
        }
    }

    /// Identifies this surface as the source of a `DrawSurface` command.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, predicate: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// The last matrix committed with `apply_transform`.
    pub fn committed_transform(&self) -> Affine {
        self.committed
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Outstanding (save, transform, opacity) pushes.
    pub fn depth(&self) -> (usize, usize, usize) {
        let saves = self.commands.iter().fold(0isize, |depth, c| match c {
            Command::Save => depth + 1,
            Command::Restore => depth - 1,
            _ => depth,
        });
        (
            saves.max(0) as usize,
            self.transform_stack.len(),
            self.opacity_stack.len(),
        )
    }

    fn record(&mut self, command: Command) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.record(Command::Save);
    }

    fn restore(&mut self) {
        self.record(Command::Restore);
    }

    fn save_transform(&mut self) {
        self.transform_stack.push(self.transform);
        self.record(Command::SaveTransform);
    }

    fn restore_transform(&mut self) {
        if let Some(transform) = self.transform_stack.pop() {
            self.transform = transform;
        }
        self.record(Command::RestoreTransform);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform * Affine::translate((dx as f64, dy as f64));
        self.record(Command::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine::rotate(radians as f64);
        self.record(Command::Rotate(radians));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transform = self.transform * Affine::scale_non_uniform(sx as f64, sy as f64);
        self.record(Command::Scale(sx, sy));
    }

    fn apply_transform(&mut self) {
        self.committed = self.transform;
        self.record(Command::ApplyTransform(self.committed));
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.opacity_stack.push(self.opacity);
        self.opacity *= opacity;
        self.record(Command::PushOpacity(opacity));
    }

    fn pop_opacity(&mut self) {
        if let Some(opacity) = self.opacity_stack.pop() {
            self.opacity = opacity;
        }
        self.record(Command::PopOpacity);
    }

    fn begin_path(&mut self) {
        self.record(Command::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.record(Command::MoveTo(x, y));
    }

    fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.record(Command::ArcTo {
            x1,
            y1,
            x2,
            y2,
            radius,
        });
    }

    fn rect(&mut self, rect: Frame) {
        self.record(Command::Rect(rect));
    }

    fn close_path(&mut self) {
        self.record(Command::ClosePath);
    }

    fn clip(&mut self) {
        self.record(Command::Clip);
    }

    fn fill(&mut self, color: Color) {
        self.record(Command::Fill(color));
    }

    fn stroke(&mut self, color: Color, width: f32) {
        self.record(Command::Stroke(color, width));
    }

    fn fill_rect(&mut self, rect: Frame, color: Color) {
        self.record(Command::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Frame, color: Color, width: f32) {
        self.record(Command::StrokeRect(rect, color, width));
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        self.record(Command::SetShadow(*shadow));
    }

    fn reset_shadow(&mut self) {
        self.record(Command::ResetShadow);
    }

    fn draw_surface(&mut self, source: &mut Self, dest: Frame) {
        self.record(Command::DrawSurface {
            source: source.serial,
            dest,
            alpha: self.opacity,
        });
    }
}
