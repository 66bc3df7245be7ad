use smallvec::SmallVec;

use crate::scene::Scene;

use super::{FrameParams, MenuLink};

/// 一次补丁产出的全部链接
///
/// 每帧调用一次 [`MenuGroup::update`]，返回本帧被点击的链接下标，
/// 由宿主查表决定跳转目标。
#[derive(Debug)]
pub struct MenuGroup {
    links: Vec<MenuLink>,
}

impl MenuGroup {
    #[must_use]
    pub fn new(links: Vec<MenuLink>) -> Self {
        Self { links }
    }

    /// 推进所有链接的手势状态机，收集本帧的点击。
    ///
    /// 一帧里多条链接同时成立点击（重叠碰撞体）时全部上报，顺序
    /// 与链接下标一致。
    pub fn update(&mut self, scene: &mut Scene, frame: &FrameParams) -> SmallVec<[usize; 2]> {
        let mut clicked = SmallVec::new();
        for (index, link) in self.links.iter_mut().enumerate() {
            if link.update(scene, frame) {
                clicked.push(index);
            }
        }
        clicked
    }

    /// 所有链接回到常态色并丢弃进行中的按压
    pub fn reset(&mut self, scene: &mut Scene) {
        for link in &mut self.links {
            link.reset(scene);
        }
    }

    pub fn set_disabled(&mut self, index: usize, disabled: bool) {
        if let Some(link) = self.links.get_mut(index) {
            link.disabled = disabled;
        } else {
            log::warn!("no link at index {index}");
        }
    }

    #[must_use]
    pub fn links(&self) -> &[MenuLink] {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut [MenuLink] {
        &mut self.links
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
