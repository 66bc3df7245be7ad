use crate::animation::{OffsetAnimator, SpriteAnimator};
use crate::errors::{Result, VernissageError};
use crate::interact::{MenuGroup, Rotatable};
use crate::scene::{NodeKey, Scene};

/// Typed processor output.
///
/// One variant per processor family that produces anything; processors that
/// only mutate the scene (material normalizer, render-order assigner) report
/// nothing and are skipped in the patch report.
#[derive(Debug)]
pub enum PatchOutput {
    /// Interactive link collection extracted from the marker nodes.
    Links(MenuGroup),
    /// One sprite-sheet animator per matched sprite surface.
    Sprites(Vec<SpriteAnimator>),
    /// One scrolling-offset animator per matched banner surface.
    Banners(Vec<OffsetAnimator>),
    /// Spin handles for the rotatable props.
    Rotatables(Vec<Rotatable>),
}

/// 补丁处理器契约
///
/// 状态机：`created → inspecting (0..N) → committed (恰好一次) →
/// output-readable`。提交前读取输出是编程错误，立即失败。
///
/// 匹配谓词之间的互斥不由流水线保证，由处理器作者在构造时保证；commit
/// 顺序由调用方给定（材质替换必须先于依赖 `material.map` 的处理器）。
pub trait SceneProcessor {
    /// Stable identity used as the key in the patch report.
    fn name(&self) -> &'static str;

    /// First pass: offered every node exactly once; claim the ones you care
    /// about. May fail fast on hard material-kind violations.
    fn inspect(&mut self, scene: &Scene, node: NodeKey) -> Result<()>;

    /// Second pass: mutate the claimed nodes.
    fn commit(&mut self, scene: &mut Scene) -> Result<()>;

    /// Yields the typed output, once, after commit.
    fn take_output(&mut self) -> Result<Option<PatchOutput>>;
}

/// 所有处理器共享的提交门闩
#[derive(Debug, Default)]
pub(crate) struct CommitGate {
    committed: bool,
}

impl CommitGate {
    pub(crate) fn mark(&mut self) {
        self.committed = true;
    }

    pub(crate) fn ensure(&self, name: &'static str) -> Result<()> {
        if self.committed {
            Ok(())
        } else {
            Err(VernissageError::ProcessorNotCommitted(name))
        }
    }
}
