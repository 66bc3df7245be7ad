use std::time::Duration;

use glam::Vec4;

use crate::errors::{Result, VernissageError};
use crate::resources::{Geometry, Material, MaterialKey};
use crate::scene::{NodeKey, NodeRole, Scene};

use super::FrameParams;

/// 链接的外观与手势参数
#[derive(Debug, Clone, Copy)]
pub struct LinkStyle {
    pub default_color: Vec4,
    pub hover_color: Vec4,
    /// 按下到松开超过该时长则不算点击
    pub max_press: Duration,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            default_color: Vec4::ONE,
            hover_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            max_press: MenuLink::DEFAULT_MAX_PRESS,
        }
    }
}

// ============================================================================
// MenuLink
// ============================================================================

/// 可点击的场景链接
///
/// 构造时在链接节点下挂一个不可见的盒型碰撞体，尺寸取链接几何体的
/// 包围盒。命中测试走碰撞体的世界包围盒而不是原始网格，保证细长或
/// 镂空的文字网格也有一块好点的区域。
///
/// 点击手势：按下时记下时间，松开时若仍悬停且按压时长不超过
/// `max_press` 才算一次点击；指针中途离开会作废这次按压。
#[derive(Debug)]
pub struct MenuLink {
    node: NodeKey,
    collider: NodeKey,
    material: MaterialKey,
    style: LinkStyle,

    press_start: Duration,
    is_pressed: bool,
    hovered: bool,

    /// 置位后整条链接不再响应指针
    pub disabled: bool,
}

impl MenuLink {
    /// 判定为点击的默认最长按压时长
    pub const DEFAULT_MAX_PRESS: Duration = Duration::from_millis(400);

    /// 为 `node` 建一条链接。`material` 必须是 Basic 材质（链接换色
    /// 直接写它的颜色通道）。
    pub fn new(
        scene: &mut Scene,
        node: NodeKey,
        material: MaterialKey,
        style: LinkStyle,
    ) -> Result<Self> {
        let node_name = scene
            .get_node(node)
            .map(|n| n.name.clone())
            .unwrap_or_default();

        let Some(mat) = scene.materials.get(material) else {
            return Err(VernissageError::MaterialKind {
                node: node_name,
                expected: "MeshBasicMaterial",
                found: "(disposed)",
            });
        };
        if mat.as_basic().is_none() {
            return Err(VernissageError::MaterialKind {
                node: node_name,
                expected: "MeshBasicMaterial",
                found: mat.kind_name(),
            });
        }

        let bbox = scene
            .get_node(node)
            .and_then(|n| n.mesh)
            .and_then(|m| scene.meshes.get(m))
            .and_then(|m| scene.geometries.get(m.geometry))
            .and_then(Geometry::bounding_box)
            .ok_or_else(|| VernissageError::MaterialKind {
                node: node_name.clone(),
                expected: "mesh with positions",
                found: "empty geometry",
            })?;

        // 碰撞体：与链接同坐标系的盒子，中心对齐包围盒中心
        let box_geometry = scene.add_geometry(Geometry::new_box("collider", bbox.size()));
        let box_material = scene.add_material(Material::new_basic(Vec4::ONE).with_name("collider"));
        let collider = scene.add_mesh_node("collider", box_geometry, box_material);
        if let Some(collider_ref) = scene.get_node_mut(collider) {
            collider_ref.visible = false;
            collider_ref.transform.position = bbox.center();
            collider_ref.transform.mark_dirty();
        }
        scene.attach(collider, node);

        Ok(Self {
            node,
            collider,
            material,
            style,
            press_start: Duration::ZERO,
            is_pressed: false,
            hovered: false,
            disabled: false,
        })
    }

    /// 每帧推进手势状态机。返回本帧是否发生了一次点击。
    pub fn update(&mut self, scene: &mut Scene, frame: &FrameParams) -> bool {
        if self.disabled {
            return false;
        }

        let intersect = scene
            .node_world_bbox(self.collider)
            .is_some_and(|bbox| frame.ray.intersects_box(&bbox));
        self.hovered = intersect;

        let color = if intersect {
            self.style.hover_color
        } else {
            self.style.default_color
        };
        if let Some(material) = scene.materials.get_mut(self.material) {
            material.set_color(color);
        }

        // 指针离开时作废按压
        if !intersect && self.is_pressed {
            self.is_pressed = false;
            return false;
        }

        if !intersect
            || (!self.is_pressed && !frame.pointer.left_button)
            || (self.is_pressed && frame.pointer.left_button)
        {
            return false;
        }

        if !self.is_pressed && frame.pointer.left_button {
            self.is_pressed = true;
            self.press_start = frame.time;
            return false;
        }

        // 到这里一定是：悬停中、此前按下、本帧已松开
        self.is_pressed = false;

        let press_time = frame.time.saturating_sub(self.press_start);
        if press_time > self.style.max_press {
            log::debug!("press held {}ms, not a click", press_time.as_millis());
            return false;
        }

        true
    }

    /// 回到常态色并丢弃进行中的按压
    pub fn reset(&mut self, scene: &mut Scene) {
        self.is_pressed = false;
        self.hovered = false;
        if let Some(material) = scene.materials.get_mut(self.material) {
            material.set_color(self.style.default_color);
        }
    }

    #[must_use]
    pub fn node(&self) -> NodeKey {
        self.node
    }

    #[must_use]
    pub fn collider(&self) -> NodeKey {
        self.collider
    }

    #[must_use]
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// 链接指向站外与否
    #[must_use]
    pub fn is_external(&self, scene: &Scene) -> bool {
        matches!(
            scene.get_node(self.node).map(|n| n.role),
            Some(NodeRole::Link { external: true })
        )
    }
}
