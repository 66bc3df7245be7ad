//! 资源清单、拉取与装配：从 URL 列表到可用的场景与贴图。

mod book;
mod bundle;
pub mod gltf;
pub mod io;
mod loader;

pub use book::ResourceBook;
pub use bundle::{FileBlob, ResourceBundle};
pub use io::{AssetReader, AssetReaderVariant, FileAssetReader, HttpAssetReader};
pub use loader::{BundleLoader, LoadEvent};
