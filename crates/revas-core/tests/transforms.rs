//! Transform and Scope Tests
//!
//! Translate, rotate and scale about the frame center, commit points and
//! pairing of every pushed scope.

use kurbo::{Affine, Point};
use revas_core::{Command, Container, Frame, Node, Overflow, Painter, RecordingSurface, Style};

fn paint(node: Node) -> RecordingSurface {
    let mut surface = RecordingSurface::new(200, 200);
    Container::new(node)
        .draw(&mut surface, &mut Painter::default())
        .expect("paint");
    surface
}

fn committed(surface: &RecordingSurface) -> Vec<Affine> {
    surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            Command::ApplyTransform(m) => Some(*m),
            _ => None,
        })
        .collect()
}

fn assert_maps(m: Affine, from: (f64, f64), to: (f64, f64)) {
    let p = m * Point::new(from.0, from.1);
    assert!(
        (p.x - to.0).abs() < 1e-4 && (p.y - to.1).abs() < 1e-4,
        "{:?} mapped to {:?}, expected {:?}",
        from,
        p,
        to
    );
}

#[test]
fn untransformed_node_commits_identity_without_a_scope() {
    let surface = paint(Node::new().with_frame(Frame::from_wh(10.0, 10.0)));
    assert_eq!(committed(&surface), vec![Affine::IDENTITY]);
    assert_eq!(surface.count(|c| *c == Command::SaveTransform), 0);
}

#[test]
fn translation_is_applied_and_restored() {
    let node = Node::new()
        .with_frame(Frame::from_wh(10.0, 10.0))
        .with_style(Style {
            translate_x: Some(15.0),
            ..Default::default()
        });

    let surface = paint(node);
    let cmds = surface.commands();
    assert!(cmds.contains(&Command::Translate(15.0, 0.0)));
    assert_maps(committed(&surface)[0], (0.0, 0.0), (15.0, 0.0));
    assert_eq!(surface.count(|c| *c == Command::SaveTransform), 1);
    assert_eq!(surface.count(|c| *c == Command::RestoreTransform), 1);
}

#[test]
fn rotate_then_scale_about_the_center() {
    let node = Node::new()
        .with_frame(Frame::new(10.0, 20.0, 40.0, 20.0))
        .with_style(Style {
            rotate: Some(std::f32::consts::FRAC_PI_2),
            scale: Some(2.0),
            ..Default::default()
        });

    let surface = paint(node);
    let ops: Vec<&Command> = surface
        .commands()
        .iter()
        .filter(|c| {
            matches!(
                c,
                Command::Translate(..) | Command::Rotate(_) | Command::Scale(..)
            )
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            &Command::Translate(30.0, 30.0),
            &Command::Rotate(std::f32::consts::FRAC_PI_2),
            &Command::Scale(2.0, 2.0),
            &Command::Translate(-30.0, -30.0),
        ]
    );

    let m = committed(&surface)[0];
    // The center is a fixed point.
    assert_maps(m, (30.0, 30.0), (30.0, 30.0));
    // Right-middle edge: scaled 2x then rotated a quarter turn (y-down).
    assert_maps(m, (50.0, 30.0), (30.0, 70.0));
}

#[test]
fn single_axis_scale_leaves_other_axis() {
    let node = Node::new()
        .with_frame(Frame::from_wh(10.0, 10.0))
        .with_style(Style {
            scale_y: Some(3.0),
            ..Default::default()
        });

    let surface = paint(node);
    assert!(surface.commands().contains(&Command::Scale(1.0, 3.0)));
}

#[test]
fn translation_precedes_center_transform() {
    let node = Node::new()
        .with_frame(Frame::new(0.0, 0.0, 10.0, 10.0))
        .with_style(Style {
            translate_x: Some(100.0),
            scale: Some(2.0),
            ..Default::default()
        });

    let surface = paint(node);
    let m = committed(&surface)[0];
    assert_maps(m, (5.0, 5.0), (105.0, 5.0));
    assert_maps(m, (10.0, 10.0), (115.0, 15.0));
}

#[test]
fn child_commits_parent_transform_again() {
    let child = Node::new().with_frame(Frame::from_wh(5.0, 5.0));
    let node = Node::new()
        .with_frame(Frame::from_wh(10.0, 10.0))
        .with_style(Style {
            translate_y: Some(7.0),
            ..Default::default()
        })
        .with_child(child);

    let surface = paint(node);
    let commits = committed(&surface);
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0], commits[1]);
    assert_maps(commits[1], (0.0, 0.0), (0.0, 7.0));
}

#[test]
fn sibling_does_not_inherit_transform() {
    let moved = Node::new()
        .with_frame(Frame::from_wh(5.0, 5.0))
        .with_style(Style {
            translate_x: Some(50.0),
            ..Default::default()
        });
    let still = Node::new().with_frame(Frame::from_wh(5.0, 5.0));
    let root = Node::new()
        .with_frame(Frame::from_wh(100.0, 100.0))
        .with_children([moved, still]);

    let surface = paint(root);
    let commits = committed(&surface);
    assert_eq!(commits.len(), 3);
    assert_maps(commits[1], (0.0, 0.0), (50.0, 0.0));
    assert_eq!(commits[2], Affine::IDENTITY);
}

#[test]
fn scopes_nest_clip_opacity_transform_and_unwind_in_reverse() {
    let node = Node::new()
        .with_frame(Frame::from_wh(10.0, 10.0))
        .with_style(Style {
            overflow: Some(Overflow::Hidden),
            opacity: Some(0.5),
            rotate: Some(0.3),
            ..Default::default()
        });

    let surface = paint(node);
    let scope_ops: Vec<&Command> = surface
        .commands()
        .iter()
        .filter(|c| {
            matches!(
                c,
                Command::Save
                    | Command::Restore
                    | Command::PushOpacity(_)
                    | Command::PopOpacity
                    | Command::SaveTransform
                    | Command::RestoreTransform
            )
        })
        .collect();

    assert_eq!(
        scope_ops,
        vec![
            &Command::Save,
            &Command::PushOpacity(0.5),
            &Command::SaveTransform,
            &Command::RestoreTransform,
            &Command::PopOpacity,
            &Command::Restore,
        ]
    );
}

#[test]
fn deep_tree_leaves_stacks_balanced() {
    let mut node = Node::new().with_frame(Frame::from_wh(1.0, 1.0));
    for depth in 0..64 {
        node = Node::new()
            .with_frame(Frame::from_wh(1.0, 1.0))
            .with_style(Style {
                overflow: Some(Overflow::Hidden),
                translate_x: Some(depth as f32 + 1.0),
                opacity: Some(0.9),
                ..Default::default()
            })
            .with_child(node);
    }

    let surface = paint(node);
    assert_eq!(surface.depth(), (0, 0, 0));
    assert_eq!(
        surface.count(|c| *c == Command::Save),
        surface.count(|c| *c == Command::Restore)
    );
    assert_eq!(surface.count(|c| *c == Command::Clip), 64);
}
