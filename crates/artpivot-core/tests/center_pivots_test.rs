//! Behavioural coverage for the pivot-centering batch.

use artpivot_core::{
    center_pivots, collect_drawings, resolve_target, union_art_box, ArtBox, ArtLayer, NodeHandle,
    NodeKind, Point2, SkipReason, UNDO_GROUP,
};
use artpivot_fixtures::{scene_from_json, InMemoryScene, UndoEvent};

const MODE_DRAWING_LAYER: &str = "Apply Embedded Pivot on Drawing Layer";
const MODE_PARENT_PEG: &str = "Apply Embedded Pivot on Parent Peg";

/// Drawing with a single line-art box covering the given OGL-unit rectangle.
fn drawing_with_box(
    scene: &mut InMemoryScene,
    name: &str,
    bl: (f64, f64),
    tr: (f64, f64),
) -> NodeHandle {
    let drawing = scene.add_drawing(name);
    scene.set_layer_box(
        &drawing,
        ArtLayer::LineArt,
        ArtBox::new(bl.0 * 1875.0, bl.1 * 1875.0, tr.0 * 1875.0, tr.1 * 1875.0),
    );
    drawing
}

fn animatable(scene: &mut InMemoryScene, drawing: &NodeHandle) {
    scene.set_bool(drawing, "can_animate", true);
    scene.set_text(drawing, "use_drawing_pivot", MODE_DRAWING_LAYER);
}

// --- Drawing collection ---------------------------------------------------

#[test]
fn it_should_expand_groups_depth_first() {
    let mut scene = InMemoryScene::new();
    let d1 = scene.add_drawing("d1");
    let d2 = scene.add_drawing("d2");
    let d3 = scene.add_drawing("d3");
    let d4 = scene.add_drawing("d4");
    let d5 = scene.add_drawing("d5");
    let peg = scene.add_peg("peg");
    let inner = scene.add_group("inner", &[d4.clone(), d5.clone()]);
    let outer = scene.add_group(
        "outer",
        &[d1.clone(), d2.clone(), inner, d3.clone(), peg],
    );

    let drawings = collect_drawings(&scene, &[outer]);
    assert_eq!(drawings, vec![d1, d2, d4, d5, d3]);
}

#[test]
fn it_should_drop_non_drawing_leaves() {
    let mut scene = InMemoryScene::new();
    let peg = scene.add_peg("peg");
    let other = scene.add_node("comp", NodeKind::Other);
    let d = scene.add_drawing("d");

    let drawings = collect_drawings(&scene, &[peg, other, d.clone()]);
    assert_eq!(drawings, vec![d]);
}

// --- Target resolution ----------------------------------------------------

#[test]
fn it_should_target_the_drawing_when_animatable() {
    let mut scene = InMemoryScene::new();
    let d = scene.add_drawing("d");
    animatable(&mut scene, &d);

    let target = resolve_target(&scene, &d, 1).expect("target resolves");
    assert!(target.on_drawing);
    assert_eq!(target.node, d);
}

#[test]
fn it_should_target_the_peg_when_mode_is_parent_peg() {
    let mut scene = InMemoryScene::new();
    let peg = scene.add_peg("peg");
    let d = scene.add_drawing("d");
    scene.set_bool(&d, "can_animate", true);
    scene.set_text(&d, "use_drawing_pivot", MODE_PARENT_PEG);
    scene.connect(&d, &peg);

    let target = resolve_target(&scene, &d, 1).expect("target resolves");
    assert!(!target.on_drawing);
    assert_eq!(target.node, peg);
}

#[test]
fn it_should_skip_non_peg_nodes_on_the_upstream_chain() {
    let mut scene = InMemoryScene::new();
    let peg = scene.add_peg("peg");
    let comp = scene.add_node("comp", NodeKind::Other);
    let d = scene.add_drawing("d");
    scene.connect(&d, &comp);
    scene.connect(&comp, &peg);

    let target = resolve_target(&scene, &d, 1).expect("target resolves");
    assert_eq!(target.node, peg);
}

#[test]
fn it_should_fail_resolution_without_a_peg() {
    let mut scene = InMemoryScene::new();
    let comp = scene.add_node("comp", NodeKind::Other);
    let d = scene.add_drawing("d");
    scene.connect(&d, &comp);

    assert_eq!(resolve_target(&scene, &d, 1), Err(SkipReason::NoPivotTarget));
}

#[test]
fn it_should_terminate_on_a_source_link_cycle() {
    let mut scene = InMemoryScene::new();
    let a = scene.add_node("a", NodeKind::Other);
    let b = scene.add_node("b", NodeKind::Other);
    let d = scene.add_drawing("d");
    scene.connect(&d, &a);
    scene.connect(&a, &b);
    scene.connect(&b, &a);

    assert_eq!(resolve_target(&scene, &d, 1), Err(SkipReason::NoPivotTarget));
}

// --- Bounding-box union ---------------------------------------------------

#[test]
fn it_should_union_layers_independent_of_order() {
    let expected_bl = Point2::new(0.0, 1.0);
    let expected_tr = Point2::new(3.0, 4.0);

    for (first, second) in [
        (ArtLayer::Underlay, ArtLayer::Overlay),
        (ArtLayer::Overlay, ArtLayer::Underlay),
    ] {
        let mut scene = InMemoryScene::new();
        let d = scene.add_drawing("d");
        scene.set_layer_box(&d, first, ArtBox::new(1875.0, 3750.0, 5625.0, 5625.0));
        scene.set_layer_box(&d, second, ArtBox::new(0.0, 1875.0, 3750.0, 7500.0));

        let (bl, tr) = union_art_box(&scene, &d, 1).expect("box present");
        assert_eq!(bl, expected_bl);
        assert_eq!(tr, expected_tr);
    }
}

#[test]
fn it_should_ignore_empty_layers_in_the_union() {
    let mut scene = InMemoryScene::new();
    let d = drawing_with_box(&mut scene, "d", (2.0, 2.0), (4.0, 6.0));

    let (bl, tr) = union_art_box(&scene, &d, 1).expect("box present");
    assert_eq!(bl, Point2::new(2.0, 2.0));
    assert_eq!(tr, Point2::new(4.0, 6.0));
}

#[test]
fn it_should_report_no_box_when_all_layers_are_empty() {
    let mut scene = InMemoryScene::new();
    let d = scene.add_drawing("d");
    assert!(union_art_box(&scene, &d, 1).is_none());
}

// --- Full runs ------------------------------------------------------------

#[test]
fn it_should_write_the_midpoint_of_the_union_box() {
    let mut scene = InMemoryScene::new();
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (20.0, 20.0));
    animatable(&mut scene, &d);
    scene.select(&[d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].node, d);
    assert_eq!(report.written[0].pivot, Point2::new(10.0, 10.0));
    assert_eq!(
        scene.text_value(&d, "pivot.x").as_deref(),
        Some("10.00000000000000000000")
    );
    assert_eq!(
        scene.text_value(&d, "pivot.y").as_deref(),
        Some("10.00000000000000000000")
    );
}

#[test]
fn it_should_compensate_for_a_non_zero_embedded_pivot() {
    let mut scene = InMemoryScene::new();
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (20.0, 20.0));
    animatable(&mut scene, &d);
    scene.set_embedded_pivot(&d, Point2::new(5.0, 3.0));
    scene.select(&[d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(report.written[0].pivot, Point2::new(5.0, 7.0));

    // The target pivot is zeroed before the embedded pivot is read back.
    let values: Vec<&str> = scene
        .attr_writes()
        .iter()
        .map(|w| w.value.as_str())
        .collect();
    assert_eq!(
        values,
        vec![
            "0",
            "0",
            "5.00000000000000000000",
            "7.00000000000000000000",
        ]
    );
}

#[test]
fn it_should_not_shift_the_center_for_a_zero_embedded_pivot() {
    let mut scene = InMemoryScene::new();
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (8.0, 4.0));
    animatable(&mut scene, &d);
    scene.select(&[d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(report.written[0].pivot, Point2::new(4.0, 2.0));
}

#[test]
fn it_should_write_on_the_peg_for_a_non_animatable_drawing() {
    let mut scene = InMemoryScene::new();
    let peg = scene.add_peg("peg");
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (2.0, 2.0));
    scene.connect(&d, &peg);
    scene.select(&[d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(report.written[0].node, peg);
    assert!(scene.text_value(&peg, "pivot.x").is_some());
    assert!(scene.text_value(&d, "pivot.x").is_none());
}

#[test]
fn it_should_convert_the_center_to_field_units_before_writing() {
    let mut scene = InMemoryScene::new().with_field_scale(2.0, 0.5);
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (20.0, 10.0));
    animatable(&mut scene, &d);
    scene.select(&[d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    // Report stays in OGL units, the attribute text is field units.
    assert_eq!(report.written[0].pivot, Point2::new(10.0, 5.0));
    assert_eq!(
        scene.text_value(&d, "pivot.x").as_deref(),
        Some("20.00000000000000000000")
    );
    assert_eq!(
        scene.text_value(&d, "pivot.y").as_deref(),
        Some("2.50000000000000000000")
    );
}

#[test]
fn it_should_skip_empty_drawings_and_continue_the_batch() {
    let mut scene = InMemoryScene::new();
    let empty = scene.add_drawing("empty");
    animatable(&mut scene, &empty);
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (2.0, 2.0));
    animatable(&mut scene, &d);
    scene.select(&[empty.clone(), d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(report.skipped, vec![(empty.clone(), SkipReason::EmptyAtFrame)]);
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].node, d);
    assert!(scene.text_value(&empty, "pivot.x").is_none());
}

#[test]
fn it_should_skip_drawings_without_a_pivot_target() {
    let mut scene = InMemoryScene::new();
    let stranded = drawing_with_box(&mut scene, "stranded", (0.0, 0.0), (2.0, 2.0));
    let d = drawing_with_box(&mut scene, "d", (0.0, 0.0), (2.0, 2.0));
    animatable(&mut scene, &d);
    scene.select(&[stranded.clone(), d.clone()]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(
        report.skipped,
        vec![(stranded, SkipReason::NoPivotTarget)]
    );
    assert_eq!(report.written.len(), 1);
}

#[test]
fn it_should_raise_one_dialog_and_touch_nothing_for_an_empty_selection() {
    let mut scene = InMemoryScene::new();
    let peg = scene.add_peg("peg");
    let empty_group = scene.add_group("g", &[]);
    scene.select(&[peg, empty_group]);

    let report = center_pivots(&mut scene).expect("run succeeds");
    assert!(report.written.is_empty());
    assert_eq!(scene.dialogs().len(), 1);
    assert!(scene.attr_writes().is_empty());
    assert!(scene.undo_events().is_empty());
}

#[test]
fn it_should_wrap_the_whole_batch_in_one_undo_group() {
    let mut scene = InMemoryScene::new();
    let d1 = drawing_with_box(&mut scene, "d1", (0.0, 0.0), (2.0, 2.0));
    animatable(&mut scene, &d1);
    let d2 = drawing_with_box(&mut scene, "d2", (1.0, 1.0), (3.0, 3.0));
    animatable(&mut scene, &d2);
    scene.select(&[d1, d2]);

    center_pivots(&mut scene).expect("run succeeds");
    assert_eq!(
        scene.undo_events(),
        &[UndoEvent::Begin(UNDO_GROUP.to_string()), UndoEvent::End]
    );
}

#[test]
fn it_should_run_a_scene_loaded_from_json() {
    let mut scene = scene_from_json(
        r#"{
            "frame": 3,
            "nodes": [
                {"name": "peg", "kind": "peg"},
                {"name": "hand", "kind": "drawing", "source": "peg",
                 "boxes": {"line-art": [0, 0, 7500, 7500],
                           "color-art": [1875, 1875, 9375, 9375]}},
                {"name": "rig", "kind": "group", "children": ["hand"]}
            ],
            "selection": ["rig"]
        }"#,
    )
    .expect("scene loads");

    let report = center_pivots(&mut scene).expect("run succeeds");
    // Union box spans (0,0)..(5,5), midpoint (2.5, 2.5), written on the peg.
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].node, "peg".to_string());
    assert_eq!(report.written[0].pivot, Point2::new(2.5, 2.5));
}
