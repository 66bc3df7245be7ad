//! Pointer Interaction Tests
//!
//! Tests for:
//! - MenuLink press/release gesture: click, threshold, hover-leave abort
//! - Hover color swapping
//! - MenuGroup click index reporting, disable and reset
//! - Rotatable rest-rotation offsets

use std::time::Duration;

use glam::{Vec3, Vec4};
use vernissage::interact::{FrameParams, LinkStyle, MenuGroup, MenuLink, PointerInfo, Rotatable};
use vernissage::resources::{Geometry, Material, Ray};
use vernissage::scene::{NodeKey, Scene};
use vernissage::Timer;

const DEFAULT: Vec4 = Vec4::ONE;
const HOVER: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

fn link_scene() -> (Scene, MenuLink, NodeKey) {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new_box("shop_link", Vec3::ONE));
    let material = scene.add_material(Material::new_basic(DEFAULT));
    let node = scene.add_mesh_node("shop_link", geometry, material);

    let style = LinkStyle {
        default_color: DEFAULT,
        hover_color: HOVER,
        max_press: MenuLink::DEFAULT_MAX_PRESS,
    };
    let link = MenuLink::new(&mut scene, node, material, style).unwrap();
    scene.update_matrix_world();

    (scene, link, node)
}

fn hit_frame(time_ms: u64, left_button: bool) -> FrameParams {
    FrameParams::new(
        Duration::from_millis(time_ms),
        Duration::from_millis(16),
        PointerInfo {
            left_button,
            ..PointerInfo::default()
        },
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)),
    )
}

fn miss_frame(time_ms: u64, left_button: bool) -> FrameParams {
    FrameParams::new(
        Duration::from_millis(time_ms),
        Duration::from_millis(16),
        PointerInfo {
            left_button,
            ..PointerInfo::default()
        },
        Ray::new(Vec3::new(50.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)),
    )
}

// ============================================================================
// Click Gesture
// ============================================================================

#[test]
fn release_within_threshold_clicks_exactly_once() {
    let (mut scene, mut link, _) = link_scene();

    assert!(!link.update(&mut scene, &hit_frame(100, true)));
    assert!(link.update(&mut scene, &hit_frame(300, false)));

    // 后续帧不再重复上报
    assert!(!link.update(&mut scene, &hit_frame(320, false)));
}

#[test]
fn press_past_threshold_is_rejected() {
    let (mut scene, mut link, _) = link_scene();

    assert!(!link.update(&mut scene, &hit_frame(0, true)));
    assert!(!link.update(&mut scene, &hit_frame(1000, false)));
}

#[test]
fn holding_the_button_does_not_click() {
    let (mut scene, mut link, _) = link_scene();

    assert!(!link.update(&mut scene, &hit_frame(0, true)));
    assert!(!link.update(&mut scene, &hit_frame(100, true)));
    assert!(!link.update(&mut scene, &hit_frame(200, true)));

    assert!(link.update(&mut scene, &hit_frame(300, false)));
}

#[test]
fn hover_leave_aborts_the_press() {
    let (mut scene, mut link, _) = link_scene();

    assert!(!link.update(&mut scene, &hit_frame(100, true)));
    // 指针滑出去，按压作废
    assert!(!link.update(&mut scene, &miss_frame(150, true)));
    // 回来松开，不算点击
    assert!(!link.update(&mut scene, &hit_frame(200, false)));
}

#[test]
fn release_off_target_does_not_click() {
    let (mut scene, mut link, _) = link_scene();

    assert!(!link.update(&mut scene, &hit_frame(100, true)));
    assert!(!link.update(&mut scene, &miss_frame(200, false)));
}

#[test]
fn disabled_link_ignores_pointer() {
    let (mut scene, mut link, _) = link_scene();
    link.disabled = true;

    assert!(!link.update(&mut scene, &hit_frame(100, true)));
    assert!(!link.update(&mut scene, &hit_frame(300, false)));
    assert!(!link.hovered());
}

#[test]
fn custom_threshold_is_honored() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new_box("shop_link", Vec3::ONE));
    let material = scene.add_material(Material::new_basic(DEFAULT));
    let node = scene.add_mesh_node("shop_link", geometry, material);

    let style = LinkStyle {
        default_color: DEFAULT,
        hover_color: HOVER,
        max_press: Duration::from_millis(50),
    };
    let mut link = MenuLink::new(&mut scene, node, material, style).unwrap();
    scene.update_matrix_world();

    assert!(!link.update(&mut scene, &hit_frame(0, true)));
    assert!(!link.update(&mut scene, &hit_frame(100, false)));
}

// ============================================================================
// Hover Color
// ============================================================================

#[test]
fn hover_swaps_to_secondary_color() {
    let (mut scene, mut link, node) = link_scene();

    link.update(&mut scene, &hit_frame(0, false));
    let key = scene.material_of(node).unwrap();
    assert_eq!(scene.materials.get(key).unwrap().color(), HOVER);

    link.update(&mut scene, &miss_frame(16, false));
    assert_eq!(scene.materials.get(key).unwrap().color(), DEFAULT);
}

#[test]
fn reset_restores_default_color() {
    let (mut scene, mut link, node) = link_scene();

    link.update(&mut scene, &hit_frame(0, false));
    link.reset(&mut scene);

    let key = scene.material_of(node).unwrap();
    assert_eq!(scene.materials.get(key).unwrap().color(), DEFAULT);
}

// ============================================================================
// Material Contract
// ============================================================================

#[test]
fn link_requires_basic_material() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new_box("shop_link", Vec3::ONE));
    let material = scene.add_material(Material::new_standard(DEFAULT));
    let node = scene.add_mesh_node("shop_link", geometry, material);

    let result = MenuLink::new(&mut scene, node, material, LinkStyle::default());
    assert!(result.is_err());
}

// ============================================================================
// MenuGroup
// ============================================================================

#[test]
fn group_reports_clicked_indices() {
    let (mut scene, link, _) = link_scene();
    let mut group = MenuGroup::new(vec![link]);

    assert!(group.update(&mut scene, &hit_frame(100, true)).is_empty());
    let clicked = group.update(&mut scene, &hit_frame(300, false));
    assert_eq!(clicked.as_slice(), &[0]);
}

#[test]
fn group_disable_suppresses_clicks() {
    let (mut scene, link, _) = link_scene();
    let mut group = MenuGroup::new(vec![link]);
    group.set_disabled(0, true);

    group.update(&mut scene, &hit_frame(100, true));
    assert!(group.update(&mut scene, &hit_frame(300, false)).is_empty());

    // 重新启用后手势恢复
    group.links_mut()[0].disabled = false;
    group.update(&mut scene, &hit_frame(400, true));
    let clicked = group.update(&mut scene, &hit_frame(600, false));
    assert_eq!(clicked.as_slice(), &[0]);
}

#[test]
fn external_marker_reads_from_node_role() {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new_box("ext", Vec3::ONE));
    let material = scene.add_material(Material::new_basic(DEFAULT));
    let internal = scene.add_mesh_node("shop_link", geometry, material);
    let external = scene.add_mesh_node("shop_link_ext", geometry, material);

    let a = MenuLink::new(&mut scene, internal, material, LinkStyle::default()).unwrap();
    let b = MenuLink::new(&mut scene, external, material, LinkStyle::default()).unwrap();

    assert!(!a.is_external(&scene));
    assert!(b.is_external(&scene));
}

// ============================================================================
// Frame Timing
// ============================================================================

#[test]
fn frame_params_follow_the_timer() {
    let mut timer = Timer::new();
    timer.tick();

    let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    let frame = FrameParams::from_timer(&timer, PointerInfo::default(), ray);

    assert_eq!(frame.time, timer.elapsed);
    assert_eq!(frame.delta, timer.delta);
}

// ============================================================================
// Rotatable
// ============================================================================

#[test]
fn rotate_offsets_from_rest_rotation() {
    let mut scene = Scene::new();
    let node = scene.add_node(vernissage::scene::Node::new("book_rotate"));
    scene
        .get_node_mut(node)
        .unwrap()
        .transform
        .set_rotation_euler(0.0, 0.5, 0.0);

    let rotatable = Rotatable::new(&scene, node);
    rotatable.rotate(&mut scene, 0.0, 0.25, 0.0);

    let euler = scene.get_node(node).unwrap().transform.rotation_euler();
    assert!((euler.y - 0.75).abs() < 1e-4);

    // 回零即回到静止姿态
    rotatable.rotate(&mut scene, 0.0, 0.0, 0.0);
    let euler = scene.get_node(node).unwrap().transform.rotation_euler();
    assert!((euler.y - 0.5).abs() < 1e-4);
}
