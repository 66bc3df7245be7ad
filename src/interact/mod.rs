//! 指针交互：拾取、链接点击手势、可旋转节点。

mod frame;
mod group;
mod link;
mod rotatable;

pub use frame::{FrameParams, PointerInfo};
pub use group::MenuGroup;
pub use link::{LinkStyle, MenuLink};
pub use rotatable::Rotatable;
