use std::time::Duration;

use glam::Vec4;

use crate::errors::Result;
use crate::interact::{LinkStyle, MenuGroup, MenuLink};
use crate::patcher::processor::{CommitGate, PatchOutput, SceneProcessor};
use crate::resources::Material;
use crate::scene::{NodeKey, NodeRole, Scene};

/// 一对链接配色：常态 / 悬停
#[derive(Debug, Clone, Copy)]
pub struct LinkPalette {
    pub default_color: Vec4,
    pub hover_color: Vec4,
}

impl LinkPalette {
    /// 站内链接：白底、悬停变红
    #[must_use]
    pub fn interior() -> Self {
        Self {
            default_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            hover_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
        }
    }

    /// 外部链接：品红底、悬停变红
    #[must_use]
    pub fn external() -> Self {
        Self {
            default_color: Vec4::new(1.0, 0.0, 1.0, 1.0),
            hover_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

/// 交互链接提取器
///
/// 匹配 [`NodeRole::Link`] 节点（剪影已在角色提取时排除）。提交时为每个
/// 匹配换上透明 Basic 材质、生成一个不可见的盒体碰撞代理子节点，并按
/// 次级标记选择配色，产出 [`MenuGroup`]。
pub struct LinkProcessor {
    gate: CommitGate,
    matched: Vec<(NodeKey, bool)>,

    interior: LinkPalette,
    external: LinkPalette,
    max_press: Duration,

    group: Option<MenuGroup>,
}

impl LinkProcessor {
    pub const NAME: &'static str = "links";

    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: CommitGate::default(),
            matched: Vec::new(),
            interior: LinkPalette::interior(),
            external: LinkPalette::external(),
            max_press: MenuLink::DEFAULT_MAX_PRESS,
            group: None,
        }
    }

    #[must_use]
    pub fn with_palettes(mut self, interior: LinkPalette, external: LinkPalette) -> Self {
        self.interior = interior;
        self.external = external;
        self
    }

    /// 统一的点击时长阈值（见 [`MenuLink::DEFAULT_MAX_PRESS`]）
    #[must_use]
    pub fn with_max_press(mut self, max_press: Duration) -> Self {
        self.max_press = max_press;
        self
    }
}

impl Default for LinkProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneProcessor for LinkProcessor {
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

        if let NodeRole::Link { external } = node_ref.role {
            self.matched.push((node, external));
        }

        Ok(())
    }

    fn commit(&mut self, scene: &mut Scene) -> Result<()> {
        let mut links = Vec::with_capacity(self.matched.len());

        for &(node, external) in &std::mem::take(&mut self.matched) {
            let palette = if external { self.external } else { self.interior };

            // 链接材质：透明 Basic，常态色起步
            let mut material = Material::new_basic(palette.default_color).with_name("link");
            material.transparent = true;
            let new_key = scene.add_material(material);

            let old = scene.swap_material(node, new_key);
            if let Some(old_key) = old {
                scene.dispose_material(old_key);
            }

            let style = LinkStyle {
                default_color: palette.default_color,
                hover_color: palette.hover_color,
                max_press: self.max_press,
            };

            links.push(MenuLink::new(scene, node, new_key, style)?);
        }

        self.group = Some(MenuGroup::new(links));
        self.gate.mark();
        Ok(())
    }

    fn take_output(&mut self) -> Result<Option<PatchOutput>> {
        self.gate.ensure(Self::NAME)?;
        Ok(self.group.take().map(PatchOutput::Links))
    }
}
