//! 场景图系统模块
//!
//! 管理场景层级结构和组件：
//! - Node: 场景节点（支持父子关系和变换）
//! - Transform: 变换组件（位置、旋转、缩放）
//! - Scene: 场景容器 + 资源池
//! - NodeRole: 从保留名字标记一次性提取的节点角色

pub mod node;
pub mod role;
pub mod scene;
pub mod transform;

// 重新导出常用类型
pub use node::Node;
pub use role::NodeRole;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
}
