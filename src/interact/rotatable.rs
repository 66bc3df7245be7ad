use glam::Vec3;

use crate::scene::{NodeKey, Scene};

/// 可被指针带动旋转的节点
///
/// 记住节点补丁时刻的静止姿态，之后所有旋转都是在静止姿态上叠加
/// 偏移，松手回零时节点回到原位而不是累积漂移。
#[derive(Debug)]
pub struct Rotatable {
    node: NodeKey,
    rest_rotation: Vec3,
}

impl Rotatable {
    #[must_use]
    pub fn new(scene: &Scene, node: NodeKey) -> Self {
        let rest_rotation = scene
            .get_node(node)
            .map(|n| n.transform.rotation_euler())
            .unwrap_or(Vec3::ZERO);

        Self {
            node,
            rest_rotation,
        }
    }

    /// 以静止姿态为基准设置旋转偏移（弧度，XYZ 欧拉角）
    pub fn rotate(&self, scene: &mut Scene, x: f32, y: f32, z: f32) {
        if let Some(node_ref) = scene.get_node_mut(self.node) {
            node_ref.transform.set_rotation_euler(
                self.rest_rotation.x + x,
                self.rest_rotation.y + y,
                self.rest_rotation.z + z,
            );
        }
    }

    #[must_use]
    pub fn node(&self) -> NodeKey {
        self.node
    }

    #[must_use]
    pub fn rest_rotation(&self) -> Vec3 {
        self.rest_rotation
    }
}
