use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

use crate::errors::Result;
use crate::resources::Texture;
use crate::scene::Scene;

/// 原样保留的文件及其 MIME 类型
#[derive(Debug, Clone)]
pub struct FileBlob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl FileBlob {
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }
}

/// 一本清单加载完成后的全部产物，按原始 URL 检索
#[derive(Default)]
pub struct ResourceBundle {
    pub files: FxHashMap<String, FileBlob>,
    pub scenes: FxHashMap<String, Scene>,
    pub textures: FxHashMap<String, Texture>,
    pub data: Option<serde_json::Value>,
}

impl ResourceBundle {
    /// 把数据条目反序列化成调用方的类型。未配置数据 URL 时得到
    /// `serde_json::Value::Null` 的解码结果。
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.data.clone().unwrap_or(serde_json::Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}
