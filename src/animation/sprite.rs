use std::time::Duration;

use glam::Vec2;

use crate::resources::{TextureKey, WrapMode};
use crate::scene::Scene;

/// 精灵图集的排版参数
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet {
    pub tiles_horizontal: u32,
    pub tiles_vertical: u32,
    /// 实际帧数，可以小于网格容量
    pub number_of_tiles: u32,
    pub tile_display_duration: Duration,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            tiles_horizontal: 14,
            tiles_vertical: 1,
            number_of_tiles: 14,
            tile_display_duration: Duration::from_millis(100),
        }
    }
}

// ============================================================================
// SpriteAnimator
// ============================================================================

/// 图集逐帧动画
///
/// 把贴图的 repeat 缩到单帧大小，每过一个帧时长就把 offset 挪到下
/// 一帧。时间欠账逐帧偿还：一次很长的 delta 会连跳多帧，帧号始终
/// 等于经过时间整除帧时长再对帧数取模。
#[derive(Debug)]
pub struct SpriteAnimator {
    texture: TextureKey,
    sheet: SpriteSheet,
    current_display_time: Duration,
    current_tile: u32,
}

impl SpriteAnimator {
    pub fn new(scene: &mut Scene, texture: TextureKey, sheet: SpriteSheet) -> Self {
        if let Some(texture_ref) = scene.textures.get_mut(texture) {
            texture_ref.sampler.wrap_u = WrapMode::Repeat;
            texture_ref.sampler.wrap_v = WrapMode::Repeat;
            texture_ref.transform.repeat = Vec2::new(
                1.0 / sheet.tiles_horizontal as f32,
                1.0 / sheet.tiles_vertical as f32,
            );
        }

        Self {
            texture,
            sheet,
            current_display_time: Duration::ZERO,
            current_tile: 0,
        }
    }

    pub fn update(&mut self, scene: &mut Scene, delta: Duration) {
        self.current_display_time += delta;

        while self.current_display_time > self.sheet.tile_display_duration {
            self.current_display_time -= self.sheet.tile_display_duration;
            self.current_tile += 1;

            if self.current_tile == self.sheet.number_of_tiles {
                self.current_tile = 0;
            }

            let column = self.current_tile % self.sheet.tiles_horizontal;
            let row = self.current_tile / self.sheet.tiles_horizontal;

            if let Some(texture_ref) = scene.textures.get_mut(self.texture) {
                texture_ref.transform.offset = Vec2::new(
                    column as f32 / self.sheet.tiles_horizontal as f32,
                    row as f32 / self.sheet.tiles_vertical as f32,
                );
            }
        }
    }

    #[must_use]
    pub fn current_tile(&self) -> u32 {
        self.current_tile
    }

    #[must_use]
    pub fn texture(&self) -> TextureKey {
        self.texture
    }
}
