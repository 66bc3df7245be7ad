use std::sync::OnceLock;

use glam::{Affine3A, Vec3};
use uuid::Uuid;

/// Geometry 资源
///
/// 只保留 CPU 端逻辑需要的数据：顶点位置和缓存的包围盒。
/// 命中测试、碰撞代理和补丁流水线都基于它工作。
#[derive(Debug)]
pub struct Geometry {
    pub uuid: Uuid,
    pub name: String,

    pub positions: Vec<Vec3>,

    // 惰性计算，计算一次后缓存；资源会跨加载任务共享，缓存必须 Sync
    bounding_box: OnceLock<Option<BoundingBox>>,
}

impl Geometry {
    pub fn new(name: &str, positions: Vec<Vec3>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            positions,
            bounding_box: OnceLock::new(),
        }
    }

    /// 创建轴对齐盒体（用于 MenuLink 的碰撞代理）
    #[must_use]
    pub fn new_box(name: &str, size: Vec3) -> Self {
        let he = size * 0.5;
        // 八个角点足够描述一个碰撞盒
        let positions = vec![
            Vec3::new(-he.x, -he.y, -he.z),
            Vec3::new(-he.x, -he.y, he.z),
            Vec3::new(-he.x, he.y, -he.z),
            Vec3::new(-he.x, he.y, he.z),
            Vec3::new(he.x, -he.y, -he.z),
            Vec3::new(he.x, -he.y, he.z),
            Vec3::new(he.x, he.y, -he.z),
            Vec3::new(he.x, he.y, he.z),
        ];
        Self::new(name, positions)
    }

    fn compute_bounding_box(&self) -> Option<BoundingBox> {
        if self.positions.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for &pos in &self.positions {
            min = min.min(pos);
            max = max.max(pos);
        }

        Some(BoundingBox { min, max })
    }

    /// 获取包围盒（首次访问时计算）
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        *self.bounding_box.get_or_init(|| self.compute_bounding_box())
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);

        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

// ============================================================================
// Ray (picking)
// ============================================================================

/// 拾取射线，世界空间
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Slab-method ray–AABB intersection, returns Some(t) or None
    #[must_use]
    pub fn hit_box(&self, bbox: &BoundingBox) -> Option<f32> {
        let inv = Vec3::new(
            if self.direction.x != 0.0 {
                1.0 / self.direction.x
            } else {
                f32::INFINITY
            },
            if self.direction.y != 0.0 {
                1.0 / self.direction.y
            } else {
                f32::INFINITY
            },
            if self.direction.z != 0.0 {
                1.0 / self.direction.z
            } else {
                f32::INFINITY
            },
        );

        let (mut tmin, mut tmax) = (
            (bbox.min.x - self.origin.x) * inv.x,
            (bbox.max.x - self.origin.x) * inv.x,
        );
        if tmin > tmax {
            std::mem::swap(&mut tmin, &mut tmax);
        }

        let (mut tymin, mut tymax) = (
            (bbox.min.y - self.origin.y) * inv.y,
            (bbox.max.y - self.origin.y) * inv.y,
        );
        if tymin > tymax {
            std::mem::swap(&mut tymin, &mut tymax);
        }

        if tmin > tymax || tymin > tmax {
            return None;
        }
        if tymin > tmin {
            tmin = tymin;
        }
        if tymax < tmax {
            tmax = tymax;
        }

        let (mut tzmin, mut tzmax) = (
            (bbox.min.z - self.origin.z) * inv.z,
            (bbox.max.z - self.origin.z) * inv.z,
        );
        if tzmin > tzmax {
            std::mem::swap(&mut tzmin, &mut tzmax);
        }

        if tmin > tzmax || tzmin > tmax {
            return None;
        }
        if tzmin > tmin {
            tmin = tzmin;
        }
        if tzmax < tmax {
            tmax = tzmax;
        }

        if tmax < 0.0 {
            return None;
        }
        Some(if tmin >= 0.0 { tmin } else { tmax })
    }

    #[must_use]
    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        self.hit_box(bbox).is_some()
    }
}
