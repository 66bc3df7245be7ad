use crate::errors::Result;
use crate::interact::Rotatable;
use crate::patcher::processor::{CommitGate, PatchOutput, SceneProcessor};
use crate::scene::{NodeKey, Scene};

/// 可旋转节点处理器
///
/// 按精确名挑出可被交互旋转的节点，记录它们的静止姿态，
/// 输出一组 [`Rotatable`] 句柄。
pub struct RotatableProcessor {
    gate: CommitGate,
    names: Vec<String>,
    matched: Vec<NodeKey>,
    rotatables: Vec<Rotatable>,
}

impl RotatableProcessor {
    pub const NAME: &'static str = "rotatables";

    #[must_use]
    pub fn new() -> Self {
        Self::with_names(vec!["book_rotate".to_string()])
    }

    #[must_use]
    pub fn with_names(names: Vec<String>) -> Self {
        Self {
            gate: CommitGate::default(),
            names,
            matched: Vec::new(),
            rotatables: Vec::new(),
        }
    }
}

impl Default for RotatableProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProcessor for RotatableProcessor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inspect(&mut self, scene: &Scene, node: NodeKey) -> Result<()> {
        let Some(node_ref) = scene.get_node(node) else {
            return Ok(());
        };

        if self.names.iter().any(|n| *n == node_ref.name) {
            self.matched.push(node);
        }

        Ok(())
    }

    fn commit(&mut self, scene: &mut Scene) -> Result<()> {
        for &node in &std::mem::take(&mut self.matched) {
            self.rotatables.push(Rotatable::new(scene, node));
        }

        self.gate.mark();
        Ok(())
    }

    fn take_output(&mut self) -> Result<Option<PatchOutput>> {
        self.gate.ensure(Self::NAME)?;
        Ok(Some(PatchOutput::Rotatables(std::mem::take(
            &mut self.rotatables,
        ))))
    }
}
