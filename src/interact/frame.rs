use std::time::Duration;

use glam::Vec2;

use crate::resources::Ray;
use crate::utils::Timer;

/// 指针快照
///
/// `pos_abs` 为窗口像素坐标，`pos_rel` 为 NDC（两轴 -1..1）。
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInfo {
    pub pos_abs: Vec2,
    pub pos_rel: Vec2,
    pub left_button: bool,
}

impl PointerInfo {
    #[must_use]
    pub fn new(pos_abs: Vec2, pos_rel: Vec2, left_button: bool) -> Self {
        Self {
            pos_abs,
            pos_rel,
            left_button,
        }
    }
}

/// 每帧交互输入
///
/// 由宿主在每帧开头构造一次，传给所有交互组件。`ray` 是从相机出发、
/// 穿过指针位置的世界空间拾取射线。
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    /// 自启动以来的时间
    pub time: Duration,
    /// 上一帧到本帧的间隔
    pub delta: Duration,
    pub pointer: PointerInfo,
    pub ray: Ray,
}

impl FrameParams {
    #[must_use]
    pub fn new(time: Duration, delta: Duration, pointer: PointerInfo, ray: Ray) -> Self {
        Self {
            time,
            delta,
            pointer,
            ray,
        }
    }

    /// 从帧计时器取 time/delta
    #[must_use]
    pub fn from_timer(timer: &Timer, pointer: PointerInfo, ray: Ray) -> Self {
        Self::new(timer.elapsed, timer.delta, pointer, ray)
    }
}
