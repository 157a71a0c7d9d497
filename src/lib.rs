//! # Revas Engine
//!
//! `revas-engine` paints laid-out UI trees with Skia.
//!
//! It ties the backend-agnostic painter in [`revas_core`] to the raster
//! backend in [`revas_skia`], and adds a JSON scene document so a tree can be
//! described, rendered and written out as PNG without writing Rust.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use revas_engine::{render_scene, RenderSettings, SceneDocument};
//!
//! let doc = SceneDocument::from_json(r##"{
//!     "width": 200,
//!     "height": 100,
//!     "background": "#ffffff",
//!     "root": {
//!         "frame": { "x": 10, "y": 10, "width": 180, "height": 80 },
//!         "style": { "backgroundColor": "#3366ff", "borderRadius": 12 }
//!     }
//! }"##).unwrap();
//! let png = render_scene(&doc, &RenderSettings::default()).unwrap();
//! std::fs::write("card.png", png).unwrap();
//! ```

pub mod errors;
/// JSON scene documents and rendering them to PNG.
pub mod scene;

pub use errors::SceneError;
pub use scene::{render_scene, CacheSpec, NodeSpec, RenderSettings, SceneDocument};

pub use revas_core::{
    CacheKey, CacheMode, Color, Container, CornerRadii, Frame, MemoryCache, Node, NodeId,
    OffscreenCache, Overflow, PaintError, Painter, RecordingSurface, Shadow, Style, Surface,
};
pub use revas_skia::{skia_cache, SkiaSurface};
