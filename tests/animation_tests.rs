//! Animator Tests
//!
//! Tests for:
//! - SpriteAnimator: tile advance, catch-up over long deltas, wrap-around
//! - OffsetAnimator: constant-rate UV scroll, sampler setup
//! - FadeTask: quadratic easing, completion, transparency restore

use std::time::Duration;

use glam::{Vec2, Vec3, Vec4};
use vernissage::animation::{FadeTask, OffsetAnimator, SpriteAnimator, SpriteSheet};
use vernissage::resources::{FilterMode, Geometry, Image, Material, Texture, WrapMode};
use vernissage::scene::Scene;

fn scene_with_texture() -> (Scene, vernissage::resources::TextureKey) {
    let mut scene = Scene::new();
    let texture = scene.add_texture(Texture::new("t", Image::solid_color("px", [255; 4])));
    (scene, texture)
}

fn four_tile_sheet() -> SpriteSheet {
    SpriteSheet {
        tiles_horizontal: 4,
        tiles_vertical: 1,
        number_of_tiles: 4,
        tile_display_duration: Duration::from_millis(100),
    }
}

// ============================================================================
// SpriteAnimator
// ============================================================================

#[test]
fn sprite_new_configures_repeat_wrap() {
    let (mut scene, texture) = scene_with_texture();
    let _animator = SpriteAnimator::new(&mut scene, texture, four_tile_sheet());

    let t = scene.textures.get(texture).unwrap();
    assert_eq!(t.sampler.wrap_u, WrapMode::Repeat);
    assert_eq!(t.sampler.wrap_v, WrapMode::Repeat);
    assert!((t.transform.repeat - Vec2::new(0.25, 1.0)).length() < 1e-6);
}

#[test]
fn sprite_tile_matches_elapsed_over_duration() {
    let (mut scene, texture) = scene_with_texture();
    let mut animator = SpriteAnimator::new(&mut scene, texture, four_tile_sheet());

    // T = 250ms, D = 100ms → floor(250/100) mod 4 = 2
    animator.update(&mut scene, Duration::from_millis(250));
    assert_eq!(animator.current_tile(), 2);

    let t = scene.textures.get(texture).unwrap();
    assert!((t.transform.offset.x - 0.5).abs() < 1e-6);
}

#[test]
fn sprite_tile_wraps_and_never_exceeds_count() {
    let (mut scene, texture) = scene_with_texture();
    let mut animator = SpriteAnimator::new(&mut scene, texture, four_tile_sheet());

    let mut elapsed = 0u64;
    for _ in 0..9 {
        animator.update(&mut scene, Duration::from_millis(130));
        elapsed += 130;

        let expected = (elapsed / 100) % 4;
        assert_eq!(u64::from(animator.current_tile()), expected);
        assert!(animator.current_tile() < 4);
    }
}

#[test]
fn sprite_long_delta_catches_up_in_one_update() {
    let (mut scene, texture) = scene_with_texture();
    let mut animator = SpriteAnimator::new(&mut scene, texture, four_tile_sheet());

    // 一个 650ms 的大 delta 连跳六格
    animator.update(&mut scene, Duration::from_millis(650));
    assert_eq!(animator.current_tile(), 2);
}

// ============================================================================
// OffsetAnimator
// ============================================================================

#[test]
fn offset_new_configures_sampler() {
    let (mut scene, texture) = scene_with_texture();
    let _animator = OffsetAnimator::new(&mut scene, texture, Vec2::new(0.15, 0.0));

    let t = scene.textures.get(texture).unwrap();
    assert_eq!(t.sampler.mag_filter, FilterMode::Nearest);
    assert_eq!(t.sampler.wrap_u, WrapMode::Repeat);
}

#[test]
fn offset_scroll_is_rate_times_seconds() {
    let (mut scene, texture) = scene_with_texture();
    let mut animator = OffsetAnimator::new(&mut scene, texture, Vec2::new(0.15, 0.0));

    animator.update(&mut scene, Duration::from_secs(2));
    let t = scene.textures.get(texture).unwrap();
    assert!((t.transform.offset.x - 0.3).abs() < 1e-6);
    assert!(t.transform.offset.y.abs() < 1e-6);

    animator.update(&mut scene, Duration::from_secs(1));
    let t = scene.textures.get(texture).unwrap();
    assert!((t.transform.offset.x - 0.45).abs() < 1e-6);
}

// ============================================================================
// FadeTask
// ============================================================================

fn fade_scene(opacity: f32, visible: bool) -> (Scene, vernissage::scene::NodeKey) {
    let mut scene = Scene::new();
    let geometry = scene.add_geometry(Geometry::new_box("prop", Vec3::ONE));
    let mut material = Material::new_basic(Vec4::ONE);
    material.opacity = opacity;
    let material = scene.add_material(material);
    let node = scene.add_mesh_node("prop", geometry, material);
    scene.get_node_mut(node).unwrap().visible = visible;
    (scene, node)
}

#[test]
fn fade_out_follows_quadratic_curve() {
    let (mut scene, node) = fade_scene(1.0, true);
    let mut task = FadeTask::new(
        &mut scene,
        node,
        0.0,
        Duration::ZERO,
        Duration::from_secs(1),
    )
    .unwrap();
    assert!((task.target_opacity()).abs() < f32::EPSILON);

    // t = 0.5 → 平方缓动 0.25 → 1.0 - 0.25 = 0.75
    assert!(!task.update(&mut scene, Duration::from_millis(500)));
    let key = scene.material_of(node).unwrap();
    assert!((scene.materials.get(key).unwrap().opacity - 0.75).abs() < 1e-6);
}

#[test]
fn fade_completes_and_restores_transparency() {
    let (mut scene, node) = fade_scene(1.0, true);
    let key = scene.material_of(node).unwrap();
    assert!(!scene.materials.get(key).unwrap().transparent);

    let mut task = FadeTask::new(
        &mut scene,
        node,
        0.0,
        Duration::ZERO,
        Duration::from_secs(1),
    )
    .unwrap();

    // 运行中强制透明混合
    assert!(scene.materials.get(key).unwrap().transparent);

    assert!(!task.update(&mut scene, Duration::from_secs(2)));
    assert!((scene.materials.get(key).unwrap().opacity).abs() < 1e-6);

    // 到达目标后的下一次 update 恢复原透明标记并上报完成
    assert!(task.update(&mut scene, Duration::from_secs(2)));
    assert!(!scene.materials.get(key).unwrap().transparent);
}

#[test]
fn fade_in_from_invisible_node() {
    let (mut scene, node) = fade_scene(1.0, false);
    let mut task = FadeTask::new(
        &mut scene,
        node,
        1.0,
        Duration::ZERO,
        Duration::from_secs(1),
    )
    .unwrap();

    // 构造即显形，从零透明度起步
    assert!(scene.get_node(node).unwrap().visible);
    let key = scene.material_of(node).unwrap();
    assert!((scene.materials.get(key).unwrap().opacity).abs() < 1e-6);

    assert!(!task.update(&mut scene, Duration::from_secs(1)));
    assert!((scene.materials.get(key).unwrap().opacity - 1.0).abs() < 1e-6);
    assert!(task.update(&mut scene, Duration::from_secs(1)));
}

#[test]
fn fade_opacity_is_quantized_to_millis() {
    let (mut scene, node) = fade_scene(1.0, true);
    let mut task = FadeTask::new(
        &mut scene,
        node,
        0.0,
        Duration::ZERO,
        Duration::from_secs(3),
    )
    .unwrap();

    task.update(&mut scene, Duration::from_millis(1000));
    let key = scene.material_of(node).unwrap();
    let opacity = scene.materials.get(key).unwrap().opacity;
    assert!((opacity * 1000.0 - (opacity * 1000.0).round()).abs() < 1e-4);
}
