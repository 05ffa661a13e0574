use super::*;
use crate::render::backend::Primitive;
use crate::render::recording::{RecordedEvent, RecordingRenderer};
use crate::scene::shape::ShapeKind;
use crate::scene::shapes::{Line, Rectangle};
use crate::scene::vshape::{VShape, VShapeConfig};
use crate::style::color::Color;
use crate::style::paint::StyleConfig;

fn group(scene: &mut Scene, t: Transform) -> ShapeId {
    scene.insert(Shape::group().with_transform(Some(t)))
}

#[test]
fn three_level_propagation() {
    let mut scene = Scene::new();
    let a = group(&mut scene, Transform::shift(10.0, 0.0));
    let b = group(&mut scene, Transform::scale(2.0));
    let c = group(&mut scene, Transform::shift(0.0, 5.0));
    scene.add(a, &[b]).unwrap();
    scene.add(b, &[c]).unwrap();
    let g = scene.get(c).unwrap().global_transform();
    assert_eq!(g.apply(0.0, 0.0), (10.0, 10.0));
    assert_eq!(
        scene.get(c).unwrap().parent_transform(),
        Some(scene.get(b).unwrap().global_transform())
    );
}

#[test]
fn insert_uses_stored_parent_transform() {
    let mut scene = Scene::new();
    let id = scene.insert(
        Shape::group()
            .with_transform(None)
            .with_parent_transform(Some(Transform::shift(1.0, 2.0))),
    );
    assert_eq!(
        scene.get(id).unwrap().global_transform(),
        Transform::shift(1.0, 2.0)
    );
    let bare = scene.insert(Shape::group().with_transform(None));
    assert_eq!(scene.get(bare).unwrap().global_transform(), Transform::IDENTITY);
}

#[test]
fn update_transform_then_refresh() {
    let mut scene = Scene::new();
    let a = group(&mut scene, Transform::scale(3.0));
    let b = group(&mut scene, Transform::IDENTITY);
    scene.add(a, &[b]).unwrap();
    scene
        .update_transform(a, Some(Transform::shift(1.0, 1.0)))
        .unwrap();
    assert_eq!(scene.get(b).unwrap().global_transform().apply(1.0, 0.0), (4.0, 1.0));

    scene.get_mut(a).unwrap().transform = None;
    scene.refresh_transform(a).unwrap();
    assert_eq!(
        scene.get(b).unwrap().global_transform(),
        Transform::shift(1.0, 1.0)
    );
}

#[test]
fn reverse_edge_is_a_cycle() {
    let mut scene = Scene::new();
    let a = scene.insert(Shape::group());
    let b = scene.insert(Shape::group());
    scene.add(a, &[b]).unwrap();
    let err = scene.add(b, &[a]).unwrap_err();
    assert!(matches!(err, ProgError::CycleDetected(_)));
    assert!(matches!(
        scene.add(a, &[a]).unwrap_err(),
        ProgError::CycleDetected(_)
    ));
    assert!(scene.get(b).unwrap().children().is_empty());
}

#[test]
fn failed_add_changes_nothing() {
    let mut scene = Scene::new();
    let a = scene.insert(Shape::group());
    let b = scene.insert(Shape::group());
    let c = scene.insert(Shape::group());
    scene.add(b, &[a]).unwrap();
    // `c` is fine, `b` closes a cycle.
    assert!(scene.add(a, &[c, b]).is_err());
    assert!(scene.get(a).unwrap().children().is_empty());
    assert_eq!(scene.get(c).unwrap().parent(), None);
}

#[test]
fn unknown_child_is_invalid_shape() {
    let mut scene = Scene::new();
    let a = scene.insert(Shape::group());
    let mut other = Scene::new();
    other.insert(Shape::group());
    let stranger = other.insert(Shape::group());
    let err = scene.add(a, &[stranger]).unwrap_err();
    assert!(matches!(err, ProgError::InvalidShape(_)));
    assert!(scene.insert_with_children(Shape::group(), &[stranger]).is_err());
    assert_eq!(scene.len(), 1);
}

#[test]
fn duplicates_are_kept_once() {
    let mut scene = Scene::new();
    let a = scene.insert(Shape::group());
    let b = scene.insert(Shape::group());
    scene.add(a, &[b, b]).unwrap();
    scene.add(a, &[b]).unwrap();
    assert_eq!(scene.get(a).unwrap().children(), &[b]);

    let c = scene.insert_with_children(Shape::group(), &[b, b]).unwrap();
    assert_eq!(scene.get(c).unwrap().children(), &[b]);
    // Moved, not shared.
    assert!(scene.get(a).unwrap().children().is_empty());
    assert_eq!(scene.get(b).unwrap().parent(), Some(c));
}

#[test]
fn remove_detaches_present_children_only() {
    let mut scene = Scene::new();
    let a = scene.insert(Shape::group());
    let b = scene.insert(Shape::group());
    let c = scene.insert(Shape::group());
    scene.add(a, &[b]).unwrap();
    scene.remove(a, &[b, c]).unwrap();
    assert!(scene.get(a).unwrap().children().is_empty());
    assert_eq!(scene.roots(), vec![a, b, c]);
}

#[test]
fn flatten_is_pre_order() {
    let mut scene = Scene::new();
    let root = scene.insert(Shape::group().with_name("root"));
    let l = scene.insert(Shape::group());
    let ll = scene.insert(Shape::group());
    let r = scene.insert(Shape::group());
    scene.add(root, &[l, r]).unwrap();
    scene.add(l, &[ll]).unwrap();
    assert_eq!(scene.flatten(root).unwrap(), vec![root, l, ll, r]);
    assert_eq!(scene.get(root).unwrap().to_string(), "root");
    assert_eq!(scene.get(l).unwrap().to_string(), "Group");
}

#[test]
fn draw_scopes_state_per_shape() {
    let mut scene = Scene::new();
    let filled = StyleConfig::default().with_fill(Some(Color::BLACK), 1.0);
    let root = scene.insert(
        Shape::new(Rectangle::new(2.0, 2.0).unwrap())
            .with_transform(Some(Transform::shift(5.0, 0.0)))
            .with_style(filled),
    );
    let line = scene.insert(Shape::new(
        Line::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap(),
    ));
    let empty = scene.insert(Shape::group());
    scene.add(root, &[line, empty]).unwrap();

    let mut rec = RecordingRenderer::new();
    scene.draw(root, &mut rec).unwrap();
    assert_eq!(rec.depth(), 0);

    let kinds: Vec<&str> = rec
        .events()
        .iter()
        .map(|e| match e {
            RecordedEvent::Push(_) => "push",
            RecordedEvent::Pop => "pop",
            RecordedEvent::Draw { .. } => "draw",
        })
        .collect();
    assert_eq!(
        kinds,
        ["push", "draw", "push", "draw", "pop", "push", "pop", "pop"]
    );

    let draws: Vec<_> = rec.draws().collect();
    assert!(matches!(draws[0].0, Primitive::Path(_)));
    assert!(draws[0].1.unwrap().brush.is_some());
    assert!(matches!(draws[1].0, Primitive::Line(_)));
    let line_state = draws[1].1.unwrap();
    assert!(line_state.brush.is_none());
    assert_eq!(line_state.transform, Transform::shift(5.0, 0.0));
}

#[test]
fn subdivide_and_nonlinear_reach_every_path_shape() {
    let mut scene = Scene::new();
    let cfg = VShapeConfig::default();
    let anchors = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    let a = scene.insert(Shape::new(VShape::from_anchors(cfg, &anchors, true).unwrap()));
    let b = scene.insert(Shape::new(Rectangle::default()));
    let g = scene.insert(Shape::group());
    scene.add(a, &[g]).unwrap();
    scene.add(g, &[b]).unwrap();

    scene.subdivide(a, 2).unwrap();
    let count = |scene: &Scene, id| scene.get(id).unwrap().kind.vshape().unwrap().count_anchors();
    assert_eq!(count(&scene, a), 3);
    assert_eq!(count(&scene, b), 9);

    scene.subdivide(a, 1).unwrap();
    assert_eq!(count(&scene, a), 3);

    scene
        .transform_nonlinear_xy(a, |x, y| (x + 1.0, y * 2.0))
        .unwrap();
    let ShapeKind::VShape(v) = &scene.get(a).unwrap().kind else {
        panic!("kind changed");
    };
    assert_eq!(v.get_points().0[0], Point::new(1.0, 0.0));
    let (rect_anchors, _, _) = scene.get(b).unwrap().kind.vshape().unwrap().get_points();
    assert!((rect_anchors[1].x - 1.0).abs() < 1e-9);
    assert!((rect_anchors[1].y - 1.0).abs() < 1e-9);
}

#[test]
fn failed_nonlinear_leaves_every_shape_untouched() {
    let mut scene = Scene::new();
    let cfg = VShapeConfig::default();
    let root = scene.insert(Shape::new(
        VShape::from_anchors(cfg, &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], true).unwrap(),
    ));
    let child = scene.insert(Shape::new(
        VShape::from_anchors(cfg, &[Point::new(100.0, 0.0), Point::new(110.0, 0.0)], true)
            .unwrap(),
    ));
    scene.add(root, &[child]).unwrap();
    let points = |scene: &Scene, id| {
        scene
            .get(id)
            .unwrap()
            .kind
            .vshape()
            .unwrap()
            .points()
            .to_vec()
    };
    let root_before = points(&scene, root);
    let child_before = points(&scene, child);

    let err = scene
        .transform_nonlinear(root, |p| {
            if p.x >= 100.0 {
                Point::new(f64::NAN, p.y)
            } else {
                Point::new(p.x + 1.0, p.y)
            }
        })
        .unwrap_err();
    assert!(matches!(err, ProgError::InvalidArgument(_)));
    assert_eq!(points(&scene, root), root_before);
    assert_eq!(points(&scene, child), child_before);
}

#[test]
fn copy_subtree_is_independent() {
    let mut scene = Scene::new();
    let a = group(&mut scene, Transform::shift(10.0, 0.0));
    let b = group(&mut scene, Transform::scale(2.0));
    let c = scene.insert(Shape::new(Rectangle::new(4.0, 4.0).unwrap()).with_name("leaf"));
    scene.add(a, &[b]).unwrap();
    scene.add(b, &[c]).unwrap();
    let outer = group(&mut scene, Transform::IDENTITY);
    scene.add(outer, &[a]).unwrap();

    let copy = scene.copy_subtree(a).unwrap();
    assert_eq!(scene.len(), 7);
    assert_eq!(scene.get(copy).unwrap().parent(), None);
    assert_eq!(scene.get(a).unwrap().parent(), Some(outer));

    let ids = scene.flatten(copy).unwrap();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| ![a, b, c].contains(id)));
    assert_eq!(scene.get(ids[2]).unwrap().name, "leaf");
    assert_eq!(scene.get(ids[2]).unwrap().parent(), Some(ids[1]));
    assert_eq!(
        scene.get(ids[2]).unwrap().global_transform().apply(1.0, 1.0),
        scene.get(c).unwrap().global_transform().apply(1.0, 1.0)
    );

    scene
        .update_transform(copy, Some(Transform::shift(0.0, 100.0)))
        .unwrap();
    let (_, y) = scene.get(c).unwrap().global_transform().apply(0.0, 0.0);
    assert_eq!(y, 0.0);
    assert_eq!(scene.get(outer).unwrap().children(), &[a]);
    assert!(scene.copy_subtree(ShapeId(99)).is_err());
}
