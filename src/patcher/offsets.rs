use glam::Vec2;

use crate::animation::OffsetAnimator;
use crate::errors::Result;
use crate::patcher::processor::{CommitGate, PatchOutput, SceneProcessor};
use crate::resources::{Material, MaterialChannels, MaterialKey};
use crate::scene::{NodeKey, NodeRole, Scene};

/// 滚动横幅提取器
///
/// 匹配 [`NodeRole::ScrollingBanner`] 节点。提交时惰性创建一份共享的
/// 双面透明材质，把贴图和透明贴图的 repeat 拉成横向长条，每个匹配
/// 产出一个以固定速度滚动 UV 的动画器。
pub struct OffsetProcessor {
    gate: CommitGate,
    matched: Vec<NodeKey>,

    /// 每秒 UV 滚动速度
    scroll_speed: Vec2,
    /// 贴图横向平铺次数
    repeat: Vec2,

    seed_channels: Option<MaterialChannels>,
    shared_material: Option<MaterialKey>,

    banners: Vec<OffsetAnimator>,
}

impl OffsetProcessor {
    pub const NAME: &'static str = "offset-banners";

    #[must_use]
    pub fn new() -> Self {
        Self::with_scroll(Vec2::new(0.15, 0.0), Vec2::new(10.0, 1.0))
    }

    #[must_use]
    pub fn with_scroll(scroll_speed: Vec2, repeat: Vec2) -> Self {
        Self {
            gate: CommitGate::default(),
            matched: Vec::new(),
            scroll_speed,
            repeat,
            seed_channels: None,
            shared_material: None,
            banners: Vec::new(),
        }
    }
}

impl Default for OffsetProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProcessor for OffsetProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inspect(&mut self, scene: &Scene, node: NodeKey) -> Result<()> {
        let Some(node_ref) = scene.get_node(node) else {
            return Ok(());
        };

        if node_ref.role != NodeRole::ScrollingBanner || node_ref.mesh.is_none() {
            return Ok(());
        }

        if self.seed_channels.is_none()
            && let Some(material_key) = scene.material_of(node)
            && let Some(material) = scene.materials.get(material_key)
        {
            self.seed_channels = Some(*material.channels());
        }

        self.matched.push(node);
        Ok(())
    }

    fn commit(&mut self, scene: &mut Scene) -> Result<()> {
        for &node in &std::mem::take(&mut self.matched) {
            let shared = match self.shared_material {
                Some(key) => key,
                None => {
                    let channels = self.seed_channels.unwrap_or_default();

                    // 横幅贴图拉长平铺；offset 动画靠 Repeat 环绕循环
                    for texture_key in [channels.map, channels.alpha_map].into_iter().flatten() {
                        if let Some(texture) = scene.textures.get_mut(texture_key) {
                            texture.transform.repeat = self.repeat;
                        }
                    }

                    let mut material = Material::new_basic(channels.color).with_name("banner");
                    *material.data.channels_mut() = channels;
                    material.double_sided = true;
                    material.transparent = true;
                    material.alpha_test = 0.15;
                    let key = scene.add_material(material);
                    self.shared_material = Some(key);
                    key
                }
            };

            if let Some(old_key) = scene.swap_material(node, shared)
                && old_key != shared
                && scene.materials.contains_key(old_key)
            {
                scene.dispose_material(old_key);
            }

            let map = scene
                .materials
                .get(shared)
                .and_then(|m| m.channels().map);

            let Some(texture) = map else {
                log::warn!("offset-banners: matched node has no color map, skipping animator");
                continue;
            };

            self.banners
                .push(OffsetAnimator::new(scene, texture, self.scroll_speed));
        }

        self.gate.mark();
        Ok(())
    }

    fn take_output(&mut self) -> Result<Option<PatchOutput>> {
        self.gate.ensure(Self::NAME)?;
        Ok(Some(PatchOutput::Banners(std::mem::take(&mut self.banners))))
    }
}
