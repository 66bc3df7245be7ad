use std::time::Duration;

use crate::animation::{SpriteAnimator, SpriteSheet};
use crate::errors::{Result, VernissageError};
use crate::patcher::processor::{CommitGate, PatchOutput, SceneProcessor};
use crate::resources::{Material, MaterialChannels, MaterialData, MaterialKey};
use crate::scene::{NodeKey, NodeRole, Scene};

/// 精灵表提取器
///
/// 匹配 [`NodeRole::Sprite`] 节点。材质硬性要求 Standard 或 Basic，
/// 其他一律立即失败。提交时惰性创建一份共享的不受光材质（带 0.5
/// alpha-test，所有匹配共用，避免重复的 GPU 上传），配置贴图的
/// Repeat 环绕和瓦片网格 repeat 系数，每个匹配产出一个精灵动画器。
pub struct SpriteProcessor {
    gate: CommitGate,
    matched: Vec<NodeKey>,

    sheet: SpriteSheet,

    // 第一个匹配的可视通道，共享材质从它构造
    seed_channels: Option<(MaterialChannels, bool)>,
    shared_material: Option<MaterialKey>,

    sprites: Vec<SpriteAnimator>,
}

impl SpriteProcessor {
    pub const NAME: &'static str = "sprites";

    /// 站点精灵表的固定网格：一行 14 格，全部有效，每格 100ms
    #[must_use]
    pub fn new() -> Self {
        Self::with_sheet(SpriteSheet {
            tiles_horizontal: 14,
            tiles_vertical: 1,
            number_of_tiles: 14,
            tile_display_duration: Duration::from_millis(100),
        })
    }

    #[must_use]
    pub fn with_sheet(sheet: SpriteSheet) -> Self {
        Self {
            gate: CommitGate::default(),
            matched: Vec::new(),
            sheet,
            seed_channels: None,
            shared_material: None,
            sprites: Vec::new(),
        }
    }
}

impl Default for SpriteProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProcessor for SpriteProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inspect(&mut self, scene: &Scene, node: NodeKey) -> Result<()> {
        let Some(node_ref) = scene.get_node(node) else {
            return Ok(());
        };

        if node_ref.role != NodeRole::Sprite || node_ref.mesh.is_none() {
            return Ok(());
        }

        let Some(material_key) = scene.material_of(node) else {
            return Ok(());
        };
        let Some(material) = scene.materials.get(material_key) else {
            return Ok(());
        };

        // 精灵面只接受这两种材质，其他说明资产坏了，立刻失败
        if !matches!(
            material.data,
            MaterialData::Standard(_) | MaterialData::Basic(_)
        ) {
            return Err(VernissageError::MaterialKind {
                node: node_ref.name.clone(),
                expected: "basic or standard",
                found: material.kind_name(),
            });
        }

        if self.seed_channels.is_none() {
            self.seed_channels = Some((*material.channels(), material.double_sided));
        }

        self.matched.push(node);
        Ok(())
    }

    fn commit(&mut self, scene: &mut Scene) -> Result<()> {
        for &node in &std::mem::take(&mut self.matched) {
            let shared = match self.shared_material {
                Some(key) => key,
                None => {
                    let (channels, double_sided) =
                        self.seed_channels.unwrap_or_default();
                    let mut material = Material::new_basic(channels.color).with_name("sprite-sheet");
                    *material.data.channels_mut() = channels;
                    material.double_sided = double_sided;
                    material.alpha_test = 0.5;
                    let key = scene.add_material(material);
                    self.shared_material = Some(key);
                    key
                }
            };

            // 几个匹配可能原本共用一份旧材质，释放前先确认还活着
            if let Some(old_key) = scene.swap_material(node, shared)
                && old_key != shared
                && scene.materials.contains_key(old_key)
            {
                scene.dispose_material(old_key);
            }

            // 动画器驱动共享材质的颜色贴图；没有贴图就只换材质、不出动画器
            let map = scene
                .materials
                .get(shared)
                .and_then(|m| m.channels().map);

            let Some(texture) = map else {
                log::warn!("sprites: matched node has no color map, skipping animator");
                continue;
            };

            self.sprites
                .push(SpriteAnimator::new(scene, texture, self.sheet));
        }

        self.gate.mark();
        Ok(())
    }

    fn take_output(&mut self) -> Result<Option<PatchOutput>> {
        self.gate.ensure(Self::NAME)?;
        Ok(Some(PatchOutput::Sprites(std::mem::take(&mut self.sprites))))
    }
}
