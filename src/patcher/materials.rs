use glam::Vec4;
use rustc_hash::FxHashSet;

use crate::errors::Result;
use crate::patcher::processor::{CommitGate, PatchOutput, SceneProcessor};
use crate::resources::{Material, MaterialData, MaterialKey};
use crate::scene::{NodeKey, NodeRole, Scene};

/// 材质归一化处理器
///
/// 资产导出时网格带着 Standard/Lambert 这类“遗留”材质进来；站点不跑
/// 光照管线，统一降级为非受光材质：
/// - [`NodeRole::Silhouette`] → 共享的纯黑 Basic（惰性创建一次）
/// - [`NodeRole::LitProp`] → 保留漫反射的 Lambert
/// - 其余 → 完全不受光的 Basic
///
/// 可视通道（颜色和各纹理引用）整体搬到新材质上，旧材质恰好释放一次。
/// 链接节点不归一化 —— 链接提取器自己换材质，谓词按构造不重叠。
pub struct MaterialSimplifyProcessor {
    gate: CommitGate,
    matched: Vec<NodeKey>,

    // 剪影共用一份纯黑材质；实例字段而非静态，随流水线一起构造销毁
    silhouette_material: Option<MaterialKey>,

    disposed_count: usize,
}

impl MaterialSimplifyProcessor {
    pub const NAME: &'static str = "material-simplify";

    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: CommitGate::default(),
            matched: Vec::new(),
            silhouette_material: None,
            disposed_count: 0,
        }
    }

    /// 本次提交释放的旧材质数量
    #[must_use]
    pub fn disposed_count(&self) -> usize {
        self.disposed_count
    }

    fn silhouette_material(&mut self, scene: &mut Scene) -> MaterialKey {
        *self.silhouette_material.get_or_insert_with(|| {
            let material = Material::new_basic(Vec4::new(0.0, 0.0, 0.0, 1.0))
                .with_name("silhouette-flat");
            scene.add_material(material)
        })
    }
}

impl Default for MaterialSimplifyProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProcessor for MaterialSimplifyProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inspect(&mut self, scene: &Scene, node: NodeKey) -> Result<()> {
        let Some(node_ref) = scene.get_node(node) else {
            return Ok(());
        };

        // 链接提取器自己负责链接节点的材质
        if matches!(node_ref.role, NodeRole::Link { .. }) {
            return Ok(());
        }

        let Some(material_key) = scene.material_of(node) else {
            return Ok(());
        };
        let Some(material) = scene.materials.get(material_key) else {
            return Ok(());
        };

        // 只认两种遗留材质，其余（已是 Basic 的）不重复处理
        if matches!(
            material.data,
            MaterialData::Standard(_) | MaterialData::Lambert(_)
        ) {
            self.matched.push(node);
        }

        Ok(())
    }

    fn commit(&mut self, scene: &mut Scene) -> Result<()> {
        let mut disposed: FxHashSet<MaterialKey> = FxHashSet::default();

        let matched = std::mem::take(&mut self.matched);
        for &node in &matched {
            let Some(old_key) = scene.material_of(node) else {
                continue;
            };
            let Some(old) = scene.materials.get(old_key) else {
                log::warn!("material-simplify: material vanished before commit");
                continue;
            };

            let channels = *old.channels();
            let transparent = old.transparent;
            let opacity = old.opacity;
            let double_sided = old.double_sided;

            let role = scene.get_node(node).map(|n| n.role).unwrap_or_default();

            let new_key = match role {
                NodeRole::Silhouette => self.silhouette_material(scene),
                NodeRole::LitProp => {
                    let mut material = Material::new_lambert(channels.color);
                    *material.data.channels_mut() = channels;
                    material.transparent = transparent;
                    material.opacity = opacity;
                    material.double_sided = double_sided;
                    scene.add_material(material)
                }
                _ => {
                    let mut material = Material::new_basic(channels.color);
                    *material.data.channels_mut() = channels;
                    material.transparent = transparent;
                    material.opacity = opacity;
                    material.double_sided = double_sided;
                    scene.add_material(material)
                }
            };

            scene.swap_material(node, new_key);

            // 多个网格可能共用同一份旧材质，只释放一次
            if disposed.insert(old_key) {
                scene.dispose_material(old_key);
                self.disposed_count += 1;
            }
        }

        self.gate.mark();
        Ok(())
    }

    fn take_output(&mut self) -> Result<Option<PatchOutput>> {
        self.gate.ensure(Self::NAME)?;
        Ok(None)
    }
}
