use glam::{Quat, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::resources::{
    FilterMode, Geometry, Image, Material, MaterialKey, Mesh, MeshStandardMaterial, Texture,
    TextureKey, WrapMode,
};
use crate::scene::{Node, NodeKey, Scene, Transform};

/// 把 glTF/GLB 字节流装配成一个场景
///
/// 只取打补丁流水线关心的那部分：节点层级与 TRS、合并后的顶点位
/// 置、每个图元组的首个材质、基础色/AO 贴图。蒙皮、动画轨道、多
/// 图元分体这些由上游工具在导出前处理。
pub fn import_scene(name: &str, bytes: &[u8]) -> Result<Scene> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;

    let mut loader = SceneAssembler {
        scene: Scene::new(),
        buffers,
        images,
        texture_cache: FxHashMap::default(),
        material_cache: FxHashMap::default(),
    };

    for gltf_scene in document.scenes() {
        for gltf_node in gltf_scene.nodes() {
            loader.add_node(&gltf_node, None)?;
        }
    }

    loader.scene.update_matrix_world();
    log::debug!(
        "imported scene `{name}`: {} nodes, {} materials, {} textures",
        loader.scene.nodes.len(),
        loader.scene.materials.len(),
        loader.scene.textures.len()
    );

    Ok(loader.scene)
}

struct SceneAssembler {
    scene: Scene,
    buffers: Vec<gltf::buffer::Data>,
    images: Vec<gltf::image::Data>,
    // glTF 索引到场景句柄，避免共享资源被装配成多份
    texture_cache: FxHashMap<usize, TextureKey>,
    material_cache: FxHashMap<Option<usize>, MaterialKey>,
}

impl SceneAssembler {
    fn add_node(&mut self, gltf_node: &gltf::Node, parent: Option<NodeKey>) -> Result<NodeKey> {
        let name = gltf_node.name().unwrap_or("");
        let mut node = Node::new(name);

        let (translation, rotation, scale) = gltf_node.transform().decomposed();
        node.transform = Transform::from_trs(
            Vec3::from_array(translation),
            Quat::from_array(rotation),
            Vec3::from_array(scale),
        );

        if let Some(gltf_mesh) = gltf_node.mesh() {
            node.mesh = Some(self.assemble_mesh(name, &gltf_mesh)?);
        }

        let key = match parent {
            Some(parent_key) => self.scene.add_to_parent(node, parent_key),
            None => self.scene.add_node(node),
        };

        for child in gltf_node.children() {
            self.add_node(&child, Some(key))?;
        }

        Ok(key)
    }

    /// 图元组合并成一份几何体，材质取首个图元的
    fn assemble_mesh(
        &mut self,
        name: &str,
        gltf_mesh: &gltf::Mesh,
    ) -> Result<crate::resources::MeshKey> {
        let mut positions = Vec::new();
        let mut material = None;

        for primitive in gltf_mesh.primitives() {
            let reader = primitive.reader(|buffer| self.buffers.get(buffer.index()).map(|b| &b.0[..]));
            if let Some(iter) = reader.read_positions() {
                positions.extend(iter.map(Vec3::from_array));
            }

            if material.is_none() {
                material = Some(self.get_or_create_material(&primitive.material())?);
            }
        }

        let geometry = self.scene.add_geometry(Geometry::new(name, positions));
        let material = match material {
            Some(key) => key,
            None => self.scene.add_material(Material::new_basic(Vec4::ONE)),
        };

        Ok(self.scene.meshes.insert(Mesh::new(name, geometry, material)))
    }

    fn get_or_create_material(&mut self, gltf_material: &gltf::Material) -> Result<MaterialKey> {
        let cache_key = gltf_material.index();
        if let Some(&key) = self.material_cache.get(&cache_key) {
            return Ok(key);
        }

        let pbr = gltf_material.pbr_metallic_roughness();
        let color = Vec4::from_array(pbr.base_color_factor());

        let mut material = if gltf_material.unlit() {
            Material::new_basic(color)
        } else {
            let mut standard = MeshStandardMaterial::new(color);
            standard.roughness = pbr.roughness_factor();
            standard.metalness = pbr.metallic_factor();
            Material::from(standard)
        };

        if let Some(name) = gltf_material.name() {
            material = material.with_name(name);
        }
        material.double_sided = gltf_material.double_sided();
        if matches!(gltf_material.alpha_mode(), gltf::material::AlphaMode::Blend) {
            material.transparent = true;
        }

        if let Some(info) = pbr.base_color_texture() {
            material.data.channels_mut().map = self.get_or_create_texture(&info.texture());
        }
        if let Some(info) = gltf_material.occlusion_texture() {
            material.data.channels_mut().ao_map = self.get_or_create_texture(&info.texture());
        }

        let key = self.scene.add_material(material);
        self.material_cache.insert(cache_key, key);
        Ok(key)
    }

    fn get_or_create_texture(&mut self, gltf_texture: &gltf::Texture) -> Option<TextureKey> {
        let index = gltf_texture.index();
        if let Some(&key) = self.texture_cache.get(&index) {
            return Some(key);
        }

        let image_index = gltf_texture.source().index();
        let data = self.images.get(image_index)?;
        let Some(rgba) = convert_to_rgba8(data) else {
            log::warn!(
                "texture #{index}: unsupported pixel format {:?}, skipping",
                data.format
            );
            return None;
        };

        let name = gltf_texture.name().unwrap_or("texture");
        let image = Image::new(name, data.width, data.height, rgba);
        let mut texture = Texture::new(name, image);

        let sampler = gltf_texture.sampler();
        texture.sampler.wrap_u = convert_wrap(sampler.wrap_s());
        texture.sampler.wrap_v = convert_wrap(sampler.wrap_t());
        if let Some(filter) = sampler.mag_filter() {
            texture.sampler.mag_filter = match filter {
                gltf::texture::MagFilter::Nearest => FilterMode::Nearest,
                gltf::texture::MagFilter::Linear => FilterMode::Linear,
            };
        }
        if let Some(filter) = sampler.min_filter() {
            texture.sampler.min_filter = match filter {
                gltf::texture::MinFilter::Nearest
                | gltf::texture::MinFilter::NearestMipmapNearest
                | gltf::texture::MinFilter::NearestMipmapLinear => FilterMode::Nearest,
                _ => FilterMode::Linear,
            };
        }

        let key = self.scene.add_texture(texture);
        self.texture_cache.insert(index, key);
        Some(key)
    }
}

fn convert_wrap(mode: gltf::texture::WrappingMode) -> WrapMode {
    match mode {
        gltf::texture::WrappingMode::ClampToEdge => WrapMode::ClampToEdge,
        gltf::texture::WrappingMode::MirroredRepeat => WrapMode::MirrorRepeat,
        gltf::texture::WrappingMode::Repeat => WrapMode::Repeat,
    }
}

/// 像素数据统一成 RGBA8，超出 8 位的格式不支持
fn convert_to_rgba8(data: &gltf::image::Data) -> Option<Vec<u8>> {
    use gltf::image::Format;

    let pixel_count = (data.width * data.height) as usize;
    match data.format {
        Format::R8G8B8A8 => Some(data.pixels.clone()),
        Format::R8G8B8 => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for px in data.pixels.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
            Some(out)
        }
        Format::R8G8 => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for px in data.pixels.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[1], 0, 255]);
            }
            Some(out)
        }
        Format::R8 => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for &value in &data.pixels {
                out.extend_from_slice(&[value, value, value, 255]);
            }
            Some(out)
        }
        _ => None,
    }
}
