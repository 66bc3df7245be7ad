//! Bundle Loading Tests
//!
//! Tests for:
//! - Empty resource book: immediate completion at progress 1.0
//! - Bundle access before completion
//! - One-shot load guard
//! - File-backed bundle loads: textures, scenes, blobs, JSON data
//! - Failure aggregation for unknown extensions and missing files
//!
//! All tests go through `load_blocking`, which drives the loader on the
//! internal runtime.

use std::fs;
use std::path::PathBuf;

use vernissage::assets::{
    AssetReaderVariant, BundleLoader, FileAssetReader, HttpAssetReader, LoadEvent, ResourceBook,
};
use vernissage::scene::NodeRole;

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vernissage-test-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn file_reader(dir: &PathBuf) -> AssetReaderVariant {
    AssetReaderVariant::from_source(dir.to_str().unwrap()).unwrap()
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

const MINIMAL_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "name": "man_statue" }]
}"#;

fn drain(events: &flume::Receiver<LoadEvent>) -> Vec<LoadEvent> {
    events.try_iter().collect()
}

// ============================================================================
// Empty Book
// ============================================================================

#[test]
fn empty_book_completes_immediately_at_one() {
    let dir = temp_dir();
    let mut loader = BundleLoader::new(ResourceBook::new(), file_reader(&dir));
    let events = loader.events();

    loader.load_blocking();

    assert!(loader.is_loaded());
    assert!(!loader.is_failed());
    assert!((loader.progress() - 1.0).abs() < f32::EPSILON);

    let events = drain(&events);
    assert!(matches!(events[0], LoadEvent::Progress(p) if (p - 1.0).abs() < f32::EPSILON));
    assert!(matches!(events[1], LoadEvent::Complete(_)));

    let bundle = loader.bundle().unwrap();
    assert!(bundle.files.is_empty());
    assert!(bundle.scenes.is_empty());
    assert!(bundle.data.is_none());
}

#[test]
fn bundle_before_load_errors() {
    let dir = temp_dir();
    let loader = BundleLoader::new(ResourceBook::new(), file_reader(&dir));
    assert!(loader.bundle().is_err());
}

#[test]
fn load_is_single_shot() {
    let dir = temp_dir();
    let mut loader = BundleLoader::new(ResourceBook::new(), file_reader(&dir));
    let events = loader.events();

    loader.load_blocking();
    loader.load_blocking();

    let completions = drain(&events)
        .iter()
        .filter(|e| matches!(e, LoadEvent::Complete(_)))
        .count();
    assert_eq!(completions, 1);
}

// ============================================================================
// File-Backed Bundles
// ============================================================================

#[test]
fn full_book_loads_every_category() {
    let dir = temp_dir();
    fs::write(dir.join("scene.gltf"), MINIMAL_GLTF).unwrap();
    fs::write(dir.join("tile.png"), png_bytes()).unwrap();
    fs::write(dir.join("notes.txt"), b"hello").unwrap();
    fs::write(dir.join("config.json"), br#"{ "volume": 3 }"#).unwrap();

    let book = ResourceBook::new()
        .with_meshes(["scene.gltf"])
        .with_textures(["tile.png"])
        .with_files(["notes.txt"])
        .with_data("config.json");

    let mut loader = BundleLoader::new(book, file_reader(&dir));
    let events = loader.events();
    loader.load_blocking();

    assert!(loader.is_loaded(), "errors: {:?}", loader.errors());

    let bundle = loader.bundle().unwrap();
    assert_eq!(bundle.scenes.len(), 1);
    assert_eq!(bundle.textures.len(), 1);
    assert_eq!(bundle.files.len(), 1);

    let texture = &bundle.textures["tile.png"];
    assert_eq!(texture.image.width, 2);

    let blob = &bundle.files["notes.txt"];
    assert_eq!(blob.bytes, b"hello");

    #[derive(serde::Deserialize)]
    struct Config {
        volume: u32,
    }
    let config: Config = bundle.data_as().unwrap();
    assert_eq!(config.volume, 3);

    // 进度事件单调封顶于 1.0,最终恰好 1.0
    let progresses: Vec<f32> = drain(&events)
        .iter()
        .filter_map(|e| match e {
            LoadEvent::Progress(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert!(progresses.iter().all(|&p| p <= 1.0 + f32::EPSILON));
    assert!((progresses.last().unwrap() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn imported_scene_carries_node_roles() {
    let dir = temp_dir();
    fs::write(dir.join("scene.gltf"), MINIMAL_GLTF).unwrap();

    let book = ResourceBook::new().with_mesh("scene.gltf");
    let mut loader = BundleLoader::new(book, file_reader(&dir));
    loader.load_blocking();

    let bundle = loader.bundle().unwrap();
    let scene = &bundle.scenes["scene.gltf"];
    let node = scene.find_node("man_statue").unwrap();
    assert_eq!(scene.get_node(node).unwrap().role, NodeRole::Silhouette);
}

// 一个三角形、材质标成 KHR_materials_unlit 的最小场景
const UNLIT_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "extensionsUsed": ["KHR_materials_unlit"],
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "name": "prop", "mesh": 0 }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "material": 0 }] }],
  "materials": [{
    "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.0, 1.0, 1.0] },
    "extensions": { "KHR_materials_unlit": {} }
  }],
  "accessors": [{
    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
    "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
  }],
  "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
  "buffers": [{
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
  }]
}"#;

#[test]
fn unlit_material_imports_as_basic() {
    let dir = temp_dir();
    fs::write(dir.join("prop.gltf"), UNLIT_GLTF).unwrap();

    let book = ResourceBook::new().with_mesh("prop.gltf");
    let mut loader = BundleLoader::new(book, file_reader(&dir));
    loader.load_blocking();

    let bundle = loader.bundle().unwrap();
    let scene = &bundle.scenes["prop.gltf"];
    let node = scene.find_node("prop").unwrap();

    let key = scene.material_of(node).unwrap();
    let material = scene.materials.get(key).unwrap();
    assert!(material.as_basic().is_some());
    assert_eq!(material.color(), glam::Vec4::new(1.0, 0.0, 1.0, 1.0));
}

#[test]
fn svg_blob_gets_corrected_mime() {
    let dir = temp_dir();
    fs::write(dir.join("logo.svg"), b"<svg></svg>").unwrap();

    let book = ResourceBook::new().with_file("logo.svg");
    let mut loader = BundleLoader::new(book, file_reader(&dir));
    loader.load_blocking();

    let bundle = loader.bundle().unwrap();
    assert_eq!(bundle.files["logo.svg"].mime, "image/svg+xml");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn unknown_texture_extension_fails_the_bundle() {
    let dir = temp_dir();
    fs::write(dir.join("tile.bmp"), b"whatever").unwrap();

    let book = ResourceBook::new().with_texture("tile.bmp");
    let mut loader = BundleLoader::new(book, file_reader(&dir));
    let events = loader.events();
    loader.load_blocking();

    assert!(loader.is_failed());
    assert!(!loader.is_loaded());
    assert!(loader.bundle().is_err());
    assert_eq!(loader.errors().len(), 1);

    assert!(drain(&events)
        .iter()
        .any(|e| matches!(e, LoadEvent::Failed { errors } if errors.len() == 1)));
}

#[test]
fn missing_file_fails_the_bundle() {
    let dir = temp_dir();
    let book = ResourceBook::new().with_file("ghost.txt");
    let mut loader = BundleLoader::new(book, file_reader(&dir));
    loader.load_blocking();

    assert!(loader.is_failed());
    assert!(loader.errors()[0].contains("ghost.txt"));
}

// ============================================================================
// Reader Roots
// ============================================================================

#[test]
fn reader_roots_are_normalized() {
    let dir = temp_dir();
    let file = dir.join("scene.gltf");
    fs::write(&file, MINIMAL_GLTF).unwrap();

    // 给到文件路径时回退为所在目录
    let reader = FileAssetReader::new(&file);
    assert_eq!(reader.root_path(), dir.as_path());

    // 根 URL 去掉末段文件名，保证 join 相对路径可用
    let http = HttpAssetReader::new("https://assets.example.com/bundle/scene.glb").unwrap();
    assert_eq!(http.root_url().as_str(), "https://assets.example.com/bundle/");
}

#[test]
fn one_failure_poisons_otherwise_good_items() {
    let dir = temp_dir();
    fs::write(dir.join("notes.txt"), b"hello").unwrap();

    let book = ResourceBook::new()
        .with_file("notes.txt")
        .with_file("ghost.txt");
    let mut loader = BundleLoader::new(book, file_reader(&dir));
    loader.load_blocking();

    assert!(loader.is_failed());
    assert!(loader.bundle().is_err());
}
