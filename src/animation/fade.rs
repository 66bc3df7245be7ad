use std::time::Duration;

use crate::errors::{Result, VernissageError};
use crate::resources::MaterialKey;
use crate::scene::{NodeKey, Scene};

/// 节点不透明度的限时渐变
///
/// 二次缓动：变化前慢后快，淡入时最后一段才显形。运行期间强制材质
/// 透明混合，到达目标后恢复材质原本的 transparent 标记。不可见的
/// 节点先归零透明度再置为可见，从全隐状态淡入。
pub struct FadeTask {
    material: MaterialKey,
    target_opacity: f32,
    start_time: Duration,
    duration: Duration,
    initial_opacity: f32,
    initial_transparent: bool,
}

impl FadeTask {
    pub fn new(
        scene: &mut Scene,
        node: NodeKey,
        target_opacity: f32,
        start_time: Duration,
        duration: Duration,
    ) -> Result<Self> {
        let node_name = scene
            .get_node(node)
            .map(|n| n.name.clone())
            .unwrap_or_default();

        let Some(material) = scene.material_of(node) else {
            return Err(VernissageError::MaterialKind {
                node: node_name,
                expected: "mesh with material",
                found: "none",
            });
        };

        let invisible = scene.get_node(node).is_some_and(|n| !n.visible);
        if invisible {
            if let Some(material_ref) = scene.materials.get_mut(material) {
                material_ref.opacity = 0.0;
            }
            if let Some(node_ref) = scene.get_node_mut(node) {
                node_ref.visible = true;
            }
        }

        let (initial_opacity, initial_transparent) = scene
            .materials
            .get_mut(material)
            .map(|m| {
                let state = (m.opacity, m.transparent);
                m.transparent = true;
                state
            })
            .unwrap_or((1.0, false));

        Ok(Self {
            material,
            target_opacity,
            start_time,
            duration,
            initial_opacity,
            initial_transparent,
        })
    }

    /// 推进渐变，返回是否已完成。完成后可以安全丢弃任务。
    pub fn update(&mut self, scene: &mut Scene, time: Duration) -> bool {
        let Some(material_ref) = scene.materials.get_mut(self.material) else {
            return true;
        };

        if (material_ref.opacity - self.target_opacity).abs() < f32::EPSILON {
            material_ref.transparent = self.initial_transparent;
            return true;
        }

        let elapsed = time.saturating_sub(self.start_time);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        let opacity = self.initial_opacity + (self.target_opacity - self.initial_opacity) * t * t;

        // 量化到千分位，让终点能与目标精确相等
        material_ref.opacity = (1000.0 * opacity).round() / 1000.0;

        false
    }

    #[must_use]
    pub fn target_opacity(&self) -> f32 {
        self.target_opacity
    }
}
