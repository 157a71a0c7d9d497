//! Style and frame collaborator tests.

use revas_core::{
    Color, Command, Container, Frame, FrameProvider, Node, Painter, RecordingSurface, Style,
    StyleResolver,
};

#[test]
fn root_context_applies_to_every_node() {
    let child = Node::new().with_frame(Frame::new(5.0, 5.0, 10.0, 10.0));
    let override_child = Node::new()
        .with_frame(Frame::new(20.0, 5.0, 10.0, 10.0))
        .with_style(Style {
            border_width: Some(3.0),
            ..Default::default()
        });
    let root = Node::new()
        .with_frame(Frame::from_wh(50.0, 20.0))
        .with_children([child, override_child]);

    let container = Container::new(root).with_context(Style {
        border_color: Some(Color::BLACK),
        border_width: Some(1.0),
        ..Default::default()
    });

    let mut surface = RecordingSurface::new(50, 20);
    container
        .draw(&mut surface, &mut Painter::default())
        .expect("paint");

    let widths: Vec<f32> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            Command::StrokeRect(_, _, width) => Some(*width),
            _ => None,
        })
        .collect();
    assert_eq!(widths, vec![1.0, 1.0, 3.0]);
}

struct Dimmed;

impl StyleResolver for Dimmed {
    fn resolve(&self, node: &Node, context: &Style) -> Style {
        Style {
            opacity: Some(0.5),
            ..context.merged(&node.style)
        }
    }
}

struct Shifted(f32);

impl FrameProvider for Shifted {
    fn frame(&self, node: &Node) -> Frame {
        Frame {
            x: node.frame.x + self.0,
            ..node.frame
        }
    }
}

#[test]
fn injected_collaborators_drive_painting() {
    let node = Node::new()
        .with_frame(Frame::new(0.0, 0.0, 10.0, 10.0))
        .with_style(Style {
            background_color: Some(Color::WHITE),
            ..Default::default()
        });
    let container = Container::new(node);

    let styles = Dimmed;
    let frames = Shifted(30.0);
    let mut painter = Painter::new(&styles, &frames);
    let mut surface = RecordingSurface::new(50, 50);
    container.draw(&mut surface, &mut painter).expect("paint");

    let cmds = surface.commands();
    assert!(cmds.contains(&Command::PushOpacity(0.5)));
    assert!(cmds.contains(&Command::FillRect(
        Frame::new(30.0, 0.0, 10.0, 10.0),
        Color::WHITE
    )));
}
