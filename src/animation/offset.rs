use std::time::Duration;

use glam::Vec2;

use crate::resources::{FilterMode, TextureKey, WrapMode};
use crate::scene::Scene;

/// 匀速滚动的贴图偏移
///
/// 横幅跑马灯用。放大过滤取 Nearest 保持像素字形的硬边，U 方向
/// Repeat 让偏移可以无界增长。
#[derive(Debug)]
pub struct OffsetAnimator {
    texture: TextureKey,
    scroll_speed: Vec2,
}

impl OffsetAnimator {
    pub fn new(scene: &mut Scene, texture: TextureKey, scroll_speed: Vec2) -> Self {
        if let Some(texture_ref) = scene.textures.get_mut(texture) {
            texture_ref.sampler.mag_filter = FilterMode::Nearest;
            texture_ref.sampler.wrap_u = WrapMode::Repeat;
        }

        Self {
            texture,
            scroll_speed,
        }
    }

    pub fn update(&mut self, scene: &mut Scene, delta: Duration) {
        if let Some(texture_ref) = scene.textures.get_mut(self.texture) {
            texture_ref.transform.offset += self.scroll_speed * delta.as_secs_f32();
        }
    }

    #[must_use]
    pub fn texture(&self) -> TextureKey {
        self.texture
    }

    #[must_use]
    pub fn scroll_speed(&self) -> Vec2 {
        self.scroll_speed
    }
}
