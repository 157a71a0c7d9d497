//! # Node Module
//!
//! The paintable tree.
//!
//! ## Key Types
//! - `Node`: one element with its resolved style, frame, children and props.
//! - `NodeId`: stable identity assigned at construction, used for auto cache keys.
//! - `Container`: the render root plus the root style context.

use crate::geometry::Frame;
use crate::style::Style;
use crate::surface::Surface;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique node identity.
///
/// Assigned once in [`Node::new`]; independent of content, position and
/// paint order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User paint callback, invoked after the node's box and before its children.
pub type CustomDrawer = Arc<dyn Fn(&mut dyn Surface, &Node) -> anyhow::Result<()> + Send + Sync>;

/// Whether a node's subtree is rasterized once and blitted afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    #[default]
    Off,
    /// Cached under a key derived from the node's identity.
    Auto,
    /// Cached under an explicit key, shareable across trees.
    Key(String),
}

impl CacheMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CacheMode::Off)
    }
}

#[derive(Clone, Default)]
pub struct NodeProps {
    pub cache: CacheMode,
    /// Paint order among siblings; absent sorts as 0.
    pub z_index: Option<i32>,
    pub drawer: Option<CustomDrawer>,
}

impl fmt::Debug for NodeProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeProps")
            .field("cache", &self.cache)
            .field("z_index", &self.z_index)
            .field("drawer", &self.drawer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// One element of the paintable tree.
///
/// Cloning keeps the [`NodeId`]: a clone is the same logical node.
#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    pub style: Style,
    /// Computed by the layout pass before painting.
    pub frame: Frame,
    pub children: Vec<Node>,
    pub props: NodeProps,
    /// False while an asynchronous prerequisite (e.g. image decode) is
    /// pending; such a subtree is painted but never cached.
    pub ready: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    pub fn new() -> Self {
        Self {
            id: NodeId::next(),
            style: Style::default(),
            frame: Frame::default(),
            children: Vec::new(),
            props: NodeProps::default(),
            ready: true,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_cache(mut self, cache: CacheMode) -> Self {
        self.props.cache = cache;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.props.z_index = Some(z_index);
        self
    }

    pub fn with_drawer<F>(mut self, drawer: F) -> Self
    where
        F: Fn(&mut dyn Surface, &Node) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.props.drawer = Some(Arc::new(drawer));
        self
    }

    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// True when this node and every descendant are ready.
    pub fn is_ready(&self) -> bool {
        self.ready && self.children.iter().all(Node::is_ready)
    }

    /// Children in paint order: ascending z-index, ties in tree order.
    pub fn paint_order(&self) -> Vec<&Node> {
        let mut ordered: Vec<&Node> = self.children.iter().collect();
        ordered.sort_by_key(|child| child.props.z_index.unwrap_or(0));
        ordered
    }
}

/// The root of one render target.
#[derive(Clone, Debug, Default)]
pub struct Container {
    pub root: Node,
    /// Root style context handed to the style resolver for every node.
    pub context: Style,
}

impl Container {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            context: Style::default(),
        }
    }

    pub fn with_context(mut self, context: Style) -> Self {
        self.context = context;
        self
    }
}
