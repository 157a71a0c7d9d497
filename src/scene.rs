use crate::errors::SceneError;
use revas_core::{CacheMode, Color, Container, Frame, Node, Painter, Style};
use revas_skia::{skia_cache, SkiaSurface};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// A render target and the tree painted onto it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDocument {
    pub width: u32,
    pub height: u32,
    /// Cleared to before every frame; transparent when absent.
    #[serde(default)]
    pub background: Option<Color>,
    /// Style context every node is resolved against.
    #[serde(default)]
    pub context: Style,
    pub root: NodeSpec,
}

/// The serialized form of a [`Node`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeSpec {
    pub style: Style,
    pub frame: Frame,
    pub cache: CacheSpec,
    pub z_index: Option<i32>,
    pub ready: bool,
    pub children: Vec<NodeSpec>,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            style: Style::default(),
            frame: Frame::default(),
            cache: CacheSpec::default(),
            z_index: None,
            ready: true,
            children: Vec::new(),
        }
    }
}

/// `"cache": true` caches under the node's identity, `"cache": "key"` under
/// an explicit key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheSpec {
    Enabled(bool),
    Key(String),
}

impl Default for CacheSpec {
    fn default() -> Self {
        CacheSpec::Enabled(false)
    }
}

impl From<&CacheSpec> for CacheMode {
    fn from(spec: &CacheSpec) -> Self {
        match spec {
            CacheSpec::Enabled(false) => CacheMode::Off,
            CacheSpec::Enabled(true) => CacheMode::Auto,
            CacheSpec::Key(key) => CacheMode::Key(key.clone()),
        }
    }
}

impl NodeSpec {
    /// Builds the node and its subtree. Every call mints fresh node ids.
    pub fn build(&self) -> Node {
        let mut node = Node::new()
            .with_style(self.style.clone())
            .with_frame(self.frame)
            .with_cache(CacheMode::from(&self.cache))
            .with_ready(self.ready)
            .with_children(self.children.iter().map(NodeSpec::build));
        node.props.z_index = self.z_index;
        node
    }
}

impl SceneDocument {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn container(&self) -> Container {
        Container::new(self.root.build()).with_context(self.context.clone())
    }

    pub fn into_container(self) -> Container {
        self.container()
    }
}

/// How [`render_scene`] paints a document.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Number of times the tree is painted; the last frame is encoded.
    pub frames: u32,
    /// Honor per-node cache requests.
    pub cache: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            frames: 1,
            cache: true,
        }
    }
}

/// Paints `doc` onto a Skia raster surface and encodes the result as PNG.
///
/// All frames share one surface and one offscreen cache, so cached subtrees
/// are rasterized on the first frame and blitted on the rest.
#[instrument(skip_all, fields(width = doc.width, height = doc.height, frames = settings.frames))]
pub fn render_scene(doc: &SceneDocument, settings: &RenderSettings) -> Result<Vec<u8>, SceneError> {
    let container = doc.container();
    let background = doc.background.unwrap_or(Color::TRANSPARENT);

    let mut surface = SkiaSurface::new(doc.width, doc.height)?;
    let mut cache = skia_cache();

    for frame in 0..settings.frames.max(1) {
        surface.clear(background);
        let mut painter = if settings.cache {
            Painter::default().with_cache(&mut cache)
        } else {
            Painter::default()
        };
        container.draw(&mut surface, &mut painter)?;
        debug!(frame, "painted frame");
    }

    let png = surface.encode_png()?;
    info!(bytes = png.len(), cached = cache.len(), "scene rendered");
    Ok(png)
}
