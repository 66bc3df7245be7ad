use uuid::Uuid;

use crate::errors::Result;

/// 解码后的图像数据 (CPU 副本)
///
/// 统一为 RGBA8，宽高之外不携带格式信息。
#[derive(Debug, Clone)]
pub struct Image {
    pub uuid: Uuid,
    pub name: String,

    pub width: u32,
    pub height: u32,

    /// RGBA8, row-major, `width * height * 4` bytes
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(name: &str, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            width,
            height,
            data,
        }
    }

    /// 从编码字节流解码（png/jpeg/webp 由 `image` crate 识别）
    pub fn decode(name: &str, bytes: &[u8]) -> Result<Self> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        Ok(Self::new(name, width, height, rgba.into_vec()))
    }

    /// 纯色 1x1 图像
    #[must_use]
    pub fn solid_color(name: &str, color: [u8; 4]) -> Self {
        Self::new(name, 1, 1, color.to_vec())
    }
}
