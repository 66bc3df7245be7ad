//! CPU 端资源：几何、图像、纹理、材质
//!
//! 渲染后端之外的所有可变资源状态都集中在这里，由 [`crate::scene::Scene`]
//! 的资源池统一持有，处理器和动画器通过 Key 访问。

pub mod geometry;
pub mod image;
pub mod material;
pub mod texture;

pub use geometry::{BoundingBox, Geometry, Ray};
pub use image::Image;
pub use material::{
    Material, MaterialChannels, MaterialData, MaterialFeatures, MeshBasicMaterial,
    MeshLambertMaterial, MeshStandardMaterial,
};
pub use texture::{FilterMode, Texture, TextureSampler, TextureTransform, WrapMode};

use slotmap::new_key_type;

new_key_type! {
    pub struct GeometryKey;
    pub struct MaterialKey;
    pub struct TextureKey;
    pub struct MeshKey;
}

/// Mesh：几何 + 材质的组合，由节点引用
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: GeometryKey,
    pub material: MaterialKey,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str, geometry: GeometryKey, material: MaterialKey) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
        }
    }
}
