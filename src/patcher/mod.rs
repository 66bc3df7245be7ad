//! Scene-patching pipeline
//!
//! A loaded glTF scene arrives with export-time materials and nothing
//! interactive. The patcher walks the graph once, offers every node to each
//! registered processor, then commits the processors in caller order and
//! collects their typed outputs keyed by processor name.
//!
//! Processor ordering is significant wherever one processor's commit reads
//! state another one writes — the conventional order is material
//! normalization first, then the extractors.

pub mod links;
pub mod materials;
pub mod offsets;
pub mod order;
pub mod processor;
pub mod rotatables;
pub mod sprites;

pub use links::{LinkPalette, LinkProcessor};
pub use materials::MaterialSimplifyProcessor;
pub use offsets::OffsetProcessor;
pub use order::RenderOrderProcessor;
pub use processor::{PatchOutput, SceneProcessor};
pub use rotatables::RotatableProcessor;
pub use sprites::SpriteProcessor;

use rustc_hash::FxHashMap;

use crate::errors::Result;
use crate::scene::Scene;

/// 一次补丁运行收集到的输出，按处理器名索引
#[derive(Debug, Default)]
pub struct PatchReport {
    outputs: FxHashMap<&'static str, PatchOutput>,
}

impl PatchReport {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PatchOutput> {
        self.outputs.get(name)
    }

    pub fn take(&mut self, name: &str) -> Option<PatchOutput> {
        self.outputs.remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// 场景补丁器
pub struct ScenePatcher;

impl ScenePatcher {
    /// 对场景执行一次补丁流水线。
    ///
    /// 每个后代节点恰好喂给每个处理器的 inspect 一次；之后按列表顺序
    /// commit 并收集输出。谓词零命中是合法的空结果，不是错误。
    pub fn patch(
        scene: &mut Scene,
        processors: &mut [&mut dyn SceneProcessor],
    ) -> Result<PatchReport> {
        // Pass 1: inspection over a stable DFS snapshot of the graph.
        // Processors may not restructure the graph during inspection.
        for node in scene.descendants() {
            for processor in processors.iter_mut() {
                processor.inspect(scene, node)?;
            }
        }

        // Pass 2: commits, in caller order.
        let mut report = PatchReport::default();
        for processor in processors.iter_mut() {
            processor.commit(scene)?;

            if let Some(output) = processor.take_output()? {
                report.outputs.insert(processor.name(), output);
            }
        }

        Ok(report)
    }
}
