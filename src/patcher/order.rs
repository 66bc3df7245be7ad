use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::patcher::processor::{CommitGate, PatchOutput, SceneProcessor};
use crate::scene::{NodeKey, Scene};

/// 绘制顺序处理器
///
/// 按精确名查静态优先级表，提交时写入节点的 render_order 提示；
/// 不在表里的节点直接忽略，不是错误。
pub struct RenderOrderProcessor {
    gate: CommitGate,
    table: FxHashMap<String, i32>,
    matched: Vec<(NodeKey, i32)>,
}

impl RenderOrderProcessor {
    pub const NAME: &'static str = "render-order";

    /// 站点场景的出厂排序表
    #[must_use]
    pub fn new() -> Self {
        let table = [
            ("aurora", 1),
            ("artist_chat", 10),
            ("book_rotate", 20),
            ("isa", 30),
            ("globalwave", 40),
            ("themoon", 50),
        ]
        .into_iter()
        .map(|(name, order)| (name.to_string(), order))
        .collect();

        Self::with_table(table)
    }

    #[must_use]
    pub fn with_table(table: FxHashMap<String, i32>) -> Self {
        Self {
            gate: CommitGate::default(),
            table,
            matched: Vec::new(),
        }
    }
}

impl Default for RenderOrderProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProcessor for RenderOrderProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inspect(&mut self, scene: &Scene, node: NodeKey) -> Result<()> {
        let Some(node_ref) = scene.get_node(node) else {
            return Ok(());
        };

        if node_ref.mesh.is_none() {
            return Ok(());
        }

        if let Some(&order) = self.table.get(&node_ref.name) {
            self.matched.push((node, order));
        }

        Ok(())
    }

    fn commit(&mut self, scene: &mut Scene) -> Result<()> {
        for &(node, order) in &std::mem::take(&mut self.matched) {
            if let Some(node_ref) = scene.get_node_mut(node) {
                node_ref.render_order = order;
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
