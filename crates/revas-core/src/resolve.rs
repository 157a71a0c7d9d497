//! Style and geometry providers consumed by the painter.
//!
//! Both are computed outside the paint pass; the painter asks for each
//! node's record exactly once per visit.

use crate::geometry::Frame;
use crate::node::Node;
use crate::style::Style;

/// Produces the flattened style of a node.
pub trait StyleResolver {
    fn resolve(&self, node: &Node, context: &Style) -> Style;
}

/// Produces the frame of a node.
pub trait FrameProvider {
    fn frame(&self, node: &Node) -> Frame;
}

/// Overlays the node's own style on the root context.
#[derive(Copy, Clone, Debug, Default)]
pub struct MergedStyleResolver;

impl StyleResolver for MergedStyleResolver {
    fn resolve(&self, node: &Node, context: &Style) -> Style {
        context.merged(&node.style)
    }
}

/// Reads the frame stored on the node by the layout pass.
#[derive(Copy, Clone, Debug, Default)]
pub struct NodeFrames;

impl FrameProvider for NodeFrames {
    fn frame(&self, node: &Node) -> Frame {
        node.frame
    }
}
