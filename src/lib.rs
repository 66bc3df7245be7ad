//! Scene-patching pipeline and resource bundle loader for an interactive
//! 3D exhibition site.
//!
//! The crate stops at the CPU side: it loads glTF scenes and companion
//! assets into pooled scene graphs, rewrites export-time materials through
//! a processor pipeline, and hands the host typed handles for the
//! interactive pieces (clickable links, sprite and banner animators,
//! rotatable props). Rendering is the host's business.

pub mod animation;
pub mod assets;
pub mod errors;
pub mod interact;
pub mod patcher;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{FadeTask, OffsetAnimator, SpriteAnimator, SpriteSheet};
pub use assets::{AssetReaderVariant, BundleLoader, LoadEvent, ResourceBook, ResourceBundle};
pub use errors::{Result, VernissageError};
pub use interact::{FrameParams, MenuGroup, MenuLink, PointerInfo, Rotatable};
pub use patcher::{PatchOutput, PatchReport, ScenePatcher, SceneProcessor};
pub use resources::{Geometry, Image, Material, Mesh, Ray, Texture};
pub use scene::{Node, NodeRole, Scene, Transform};
pub use utils::Timer;
