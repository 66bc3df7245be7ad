use bitflags::bitflags;
use glam::Vec4;
use uuid::Uuid;

use crate::resources::TextureKey;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFeatures: u32 {
        const USE_MAP       = 1 << 0;
        const USE_AO_MAP    = 1 << 1;
        const USE_ENV_MAP   = 1 << 2;
        const USE_ALPHA_MAP = 1 << 3;
    }
}

/// 各材质共有的可视通道
///
/// 材质归一化时从旧材质上整体摘下来，再挂到新材质上。
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialChannels {
    pub color: Vec4,
    pub map: Option<TextureKey>,
    pub ao_map: Option<TextureKey>,
    pub env_map: Option<TextureKey>,
    pub alpha_map: Option<TextureKey>,
}

// ============================================================================
// 具体材质定义 (Specific Materials)
// ============================================================================

// MeshBasicMaterial — 完全不受光照
// ----------------------------------------------------------------------------
#[derive(Debug, Clone, Default)]
pub struct MeshBasicMaterial {
    pub channels: MaterialChannels,
}

impl MeshBasicMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            channels: MaterialChannels {
                color,
                ..Default::default()
            },
        }
    }
}

// MeshLambertMaterial — 受光照、不投影
// ----------------------------------------------------------------------------
#[derive(Debug, Clone, Default)]
pub struct MeshLambertMaterial {
    pub channels: MaterialChannels,
}

impl MeshLambertMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            channels: MaterialChannels {
                color,
                ..Default::default()
            },
        }
    }
}

// MeshStandardMaterial — 场景资产导出时携带的“遗留”PBR 材质
// ----------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct MeshStandardMaterial {
    pub channels: MaterialChannels,
    pub roughness: f32,
    pub metalness: f32,
}

impl MeshStandardMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            channels: MaterialChannels {
                color,
                ..Default::default()
            },
            roughness: 1.0,
            metalness: 0.0,
        }
    }
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

// ============================================================================
// 核心材质枚举 (Material Data Enum)
// ============================================================================

#[derive(Debug, Clone)]
pub enum MaterialData {
    Basic(MeshBasicMaterial),
    Lambert(MeshLambertMaterial),
    Standard(MeshStandardMaterial),
}

impl MaterialData {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Basic(_) => "basic",
            Self::Lambert(_) => "lambert",
            Self::Standard(_) => "standard",
        }
    }

    #[must_use]
    pub fn channels(&self) -> &MaterialChannels {
        match self {
            Self::Basic(m) => &m.channels,
            Self::Lambert(m) => &m.channels,
            Self::Standard(m) => &m.channels,
        }
    }

    pub fn channels_mut(&mut self) -> &mut MaterialChannels {
        match self {
            Self::Basic(m) => &mut m.channels,
            Self::Lambert(m) => &mut m.channels,
            Self::Standard(m) => &mut m.channels,
        }
    }

    #[must_use]
    pub fn get_features(&self) -> MaterialFeatures {
        let ch = self.channels();
        let mut features = MaterialFeatures::empty();
        if ch.map.is_some() {
            features |= MaterialFeatures::USE_MAP;
        }
        if ch.ao_map.is_some() {
            features |= MaterialFeatures::USE_AO_MAP;
        }
        if ch.env_map.is_some() {
            features |= MaterialFeatures::USE_ENV_MAP;
        }
        if ch.alpha_map.is_some() {
            features |= MaterialFeatures::USE_ALPHA_MAP;
        }
        features
    }
}

// ============================================================================
// 材质主结构 (Material Wrapper)
// ============================================================================

#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: Option<String>,

    pub data: MaterialData,

    // 通用渲染状态 (Render States)
    pub transparent: bool,
    pub opacity: f32,
    pub double_sided: bool,
    pub depth_write: bool,
    pub alpha_test: f32,
}

impl Material {
    /// 基础构造函数
    #[must_use]
    pub fn new(data: MaterialData) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: None,
            data,
            transparent: false,
            opacity: 1.0,
            double_sided: false,
            depth_write: true,
            alpha_test: 0.0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    // 辅助构造
    #[must_use]
    pub fn new_basic(color: Vec4) -> Self {
        Self::from(MeshBasicMaterial::new(color))
    }

    #[must_use]
    pub fn new_lambert(color: Vec4) -> Self {
        Self::from(MeshLambertMaterial::new(color))
    }

    #[must_use]
    pub fn new_standard(color: Vec4) -> Self {
        Self::from(MeshStandardMaterial::new(color))
    }

    #[must_use]
    pub fn as_basic(&self) -> Option<&MeshBasicMaterial> {
        match &self.data {
            MaterialData::Basic(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_lambert(&self) -> Option<&MeshLambertMaterial> {
        match &self.data {
            MaterialData::Lambert(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_standard(&self) -> Option<&MeshStandardMaterial> {
        match &self.data {
            MaterialData::Standard(m) => Some(m),
            _ => None,
        }
    }

    // 代理方法：直接转发给内部数据
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.data.kind_name()
    }

    #[must_use]
    pub fn get_features(&self) -> MaterialFeatures {
        self.data.get_features()
    }

    #[must_use]
    pub fn channels(&self) -> &MaterialChannels {
        self.data.channels()
    }

    #[must_use]
    pub fn color(&self) -> Vec4 {
        self.data.channels().color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.data.channels_mut().color = color;
    }
}

// ============================================================================
// 语法糖：允许从 具体材质 直接转为 通用材质
// ============================================================================

impl From<MeshBasicMaterial> for Material {
    fn from(data: MeshBasicMaterial) -> Self {
        Material::new(MaterialData::Basic(data))
    }
}

impl From<MeshLambertMaterial> for Material {
    fn from(data: MeshLambertMaterial) -> Self {
        Material::new(MaterialData::Lambert(data))
    }
}

impl From<MeshStandardMaterial> for Material {
    fn from(data: MeshStandardMaterial) -> Self {
        Material::new(MaterialData::Standard(data))
    }
}
