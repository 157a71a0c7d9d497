//! # Revas Core
//!
//! `revas-core` paints a tree of laid-out nodes onto a 2D drawing surface in
//! correct visual order.
//!
//! The tree arrives fully resolved: every [`Node`] carries a [`Frame`] from
//! the layout pass and a flattened [`Style`]. The [`Painter`] walks it
//! depth-first, honoring opacity, transforms about the frame center,
//! `overflow: hidden` clipping, rounded corners with independent radii,
//! shadows, z-order among siblings, and an optional offscreen cache that
//! rasterizes an expensive subtree once and blits it afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use revas_core::{Color, Container, Frame, Node, Painter, RecordingSurface, Style};
//!
//! let root = Node::new()
//!     .with_frame(Frame::new(0.0, 0.0, 100.0, 50.0))
//!     .with_style(Style {
//!         background_color: Some(Color::WHITE),
//!         ..Default::default()
//!     });
//! let container = Container::new(root);
//!
//! let mut surface = RecordingSurface::new(100, 50);
//! container.draw(&mut surface, &mut Painter::default()).unwrap();
//! ```

/// Offscreen surface cache.
pub mod cache;
/// RGBA colors and CSS color parsing.
pub mod color;
pub mod errors;
/// Frames and corner radii.
pub mod geometry;
/// The node tree and render root.
pub mod node;
/// The recursive paint engine.
pub mod paint;
/// A surface that records calls.
pub mod recording;
/// Style and frame providers.
pub mod resolve;
/// The flattened style record.
pub mod style;
/// The drawing surface capability and scoped state guards.
pub mod surface;

pub use cache::{CacheKey, MemoryCache, OffscreenCache};
pub use color::{Color, ColorParseError};
pub use errors::PaintError;
pub use geometry::{CornerRadii, Frame};
pub use node::{CacheMode, Container, CustomDrawer, Node, NodeId, NodeProps};
pub use paint::Painter;
pub use recording::{Command, RecordingSurface};
pub use resolve::{FrameProvider, MergedStyleResolver, NodeFrames, StyleResolver};
pub use style::{Overflow, Shadow, Style};
pub use surface::{StateGuard, Surface};
