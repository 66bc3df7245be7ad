use glam::Affine3A;
use slotmap::SlotMap;

use crate::resources::{
    BoundingBox, Geometry, GeometryKey, Material, MaterialKey, Mesh, MeshKey, Texture, TextureKey,
};
use crate::scene::NodeKey;
use crate::scene::node::Node;

/// 场景图结构
///
/// Scene 是纯数据层：节点层级 + 组件/资源池。
/// 网格、几何、材质、纹理都以 SlotMap 池持有，节点和处理器通过 Key 访问。
pub struct Scene {
    pub nodes: SlotMap<NodeKey, Node>,
    pub root_nodes: Vec<NodeKey>,

    // ====组件/资源池====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub geometries: SlotMap<GeometryKey, Geometry>,
    pub materials: SlotMap<MaterialKey, Material>,
    pub textures: SlotMap<TextureKey, Texture>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            textures: SlotMap::with_key(),
        }
    }

    /// 添加一个节点到场景 (默认放在根节点)
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let idx = self.nodes.insert(node);
        self.root_nodes.push(idx);
        idx
    }

    pub fn add_to_parent(&mut self, child: Node, parent_idx: NodeKey) -> NodeKey {
        let idx = self.nodes.insert(child);

        // 建立父子关系
        if let Some(p) = self.nodes.get_mut(parent_idx) {
            p.children.push(idx);
        }
        if let Some(c) = self.nodes.get_mut(idx) {
            c.parent = Some(parent_idx);
        }

        idx
    }

    /// 核心逻辑：建立父子关系 (Attach)
    pub fn attach(&mut self, child_idx: NodeKey, parent_idx: NodeKey) {
        if child_idx == parent_idx {
            log::warn!("Cannot attach node to itself!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child_idx).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child_idx)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child_idx) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent_idx) {
            p.children.push(child_idx);
        } else {
            log::error!("Parent node not found during attach!");
            self.root_nodes.push(child_idx);
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child_idx) {
            c.parent = Some(parent_idx);
            c.transform.mark_dirty();
        }
    }

    /// 移除节点 (递归移除所有子节点)
    pub fn remove_node(&mut self, idx: NodeKey) {
        let children = if let Some(node) = self.nodes.get(idx) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        let parent_opt = self.nodes.get(idx).and_then(|n| n.parent);
        if let Some(parent_idx) = parent_opt {
            if let Some(parent) = self.nodes.get_mut(parent_idx)
                && let Some(pos) = parent.children.iter().position(|&x| x == idx)
            {
                parent.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == idx) {
            self.root_nodes.remove(pos);
        }

        // 清理组件
        if let Some(node) = self.nodes.get(idx)
            && let Some(mesh_idx) = node.mesh
        {
            self.meshes.remove(mesh_idx);
        }

        self.nodes.remove(idx);
    }

    /// 获取只读引用
    #[must_use]
    pub fn get_node(&self, idx: NodeKey) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// 获取可变引用 (用于修改 TRS / 可见性)
    pub fn get_node_mut(&mut self, idx: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(idx)
    }

    /// 按名字查找节点；找不到是软性问题，由调用方决定是否告警
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find_map(|(key, node)| (node.name == name).then_some(key))
    }

    // ========================================================================
    // 资源管理 API
    // ========================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryKey {
        self.geometries.insert(geometry)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureKey {
        self.textures.insert(texture)
    }

    /// 创建带 Mesh 的节点并挂到根
    pub fn add_mesh_node(&mut self, name: &str, geometry: GeometryKey, material: MaterialKey) -> NodeKey {
        let mut node = Node::new(name);
        node.mesh = Some(self.meshes.insert(Mesh::new(name, geometry, material)));
        self.add_node(node)
    }

    /// 释放一个池化材质
    ///
    /// 返回材质释放前是否仍然存活。对同一个 Key 的二次释放只告警，不会
    /// 影响其他材质。
    pub fn dispose_material(&mut self, key: MaterialKey) -> bool {
        if self.materials.remove(key).is_some() {
            true
        } else {
            log::warn!("dispose_material: material already disposed or unknown");
            false
        }
    }

    /// 节点 Mesh 当前引用的材质 Key
    #[must_use]
    pub fn material_of(&self, node_key: NodeKey) -> Option<MaterialKey> {
        let mesh_key = self.nodes.get(node_key)?.mesh?;
        Some(self.meshes.get(mesh_key)?.material)
    }

    /// 将节点 Mesh 指向新材质；返回旧材质 Key
    pub fn swap_material(&mut self, node_key: NodeKey, new: MaterialKey) -> Option<MaterialKey> {
        let mesh_key = self.nodes.get(node_key)?.mesh?;
        let mesh = self.meshes.get_mut(mesh_key)?;
        let old = mesh.material;
        mesh.material = new;
        Some(old)
    }

    // ========================================================================
    // 遍历与矩阵更新
    // ========================================================================

    /// 深度优先收集所有节点 Key（每个后代恰好一次）
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeKey> = self.root_nodes.iter().rev().copied().collect();

        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            order.push(key);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }

        order
    }

    /// 更新整个场景的世界矩阵
    ///
    /// 使用迭代版本避免深层级场景的栈溢出。
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeKey, Affine3A)> = self
            .root_nodes
            .iter()
            .rev()
            .map(|&k| (k, Affine3A::IDENTITY))
            .collect();

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };

            node.transform.update_local_matrix();
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);

            for &child in node.children.iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// 节点（本体，不含子树）的世界空间包围盒
    #[must_use]
    pub fn node_world_bbox(&self, node_key: NodeKey) -> Option<BoundingBox> {
        let node = self.get_node(node_key)?;
        let mesh = self.meshes.get(node.mesh?)?;
        let geometry = self.geometries.get(mesh.geometry)?;
        let local = geometry.bounding_box()?;
        Some(local.transform(node.world_matrix()))
    }
}
