//! 逐帧驱动的小型动画器：图集逐帧、贴图滚动、不透明度渐变。

mod fade;
mod offset;
mod sprite;

pub use fade::FadeTask;
pub use offset::OffsetAnimator;
pub use sprite::{SpriteAnimator, SpriteSheet};
