//! Node roles
//!
//! The asset tags interactive behaviour onto nodes through reserved name
//! markers (a `_link` suffix segment, a `man` figure, the exact sprite and
//! banner names). Rather than let every processor re-probe raw substrings,
//! the markers are consulted exactly once — here — and the resulting role is
//! stored on the node; processors dispatch on the role.

/// 保留标记：链接节点名中必须出现的片段
pub const LINK_MARKER: &str = "_link";
/// 保留标记：指向外部站点的链接
pub const EXTERNAL_MARKER: &str = "_ext";
/// 保留标记：人形剪影（链接匹配时排除）
pub const SILHOUETTE_MARKER: &str = "man";
/// 保留标记：受光照的道具
pub const LIT_PROP_MARKER: &str = "strand";
/// 保留名：精灵表动画节点
pub const SPRITE_NAME: &str = "toothbrush";
/// 保留名：滚动横幅节点
pub const BANNER_NAME: &str = "aurora";

/// What a node is for, decided once from its authored name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeRole {
    /// No reserved marker matched; plain scenery.
    #[default]
    Scenery,
    /// Solid-color figure, flattened to an unlit black material.
    Silhouette,
    /// Keeps diffuse lighting after material normalization.
    LitProp,
    /// Clickable link proxy; `external` selects the secondary color palette.
    Link {
        external: bool,
    },
    /// Sprite-sheet animated surface.
    Sprite,
    /// Constant-scroll banner surface.
    ScrollingBanner,
}

/// 从节点名一次性提取角色
#[must_use]
pub fn classify(name: &str) -> NodeRole {
    // 精确名优先于子串标记
    if name == SPRITE_NAME {
        return NodeRole::Sprite;
    }
    if name == BANNER_NAME {
        return NodeRole::ScrollingBanner;
    }

    if name.contains(SILHOUETTE_MARKER) {
        return NodeRole::Silhouette;
    }

    if name.contains(LINK_MARKER) {
        return NodeRole::Link {
            external: name.contains(EXTERNAL_MARKER),
        };
    }

    if name.contains(LIT_PROP_MARKER) {
        return NodeRole::LitProp;
    }

    NodeRole::Scenery
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_win_over_markers() {
        assert_eq!(classify("toothbrush"), NodeRole::Sprite);
        assert_eq!(classify("aurora"), NodeRole::ScrollingBanner);
    }

    #[test]
    fn silhouette_excludes_link() {
        // “man” 同时含有链接标记时仍按剪影处理
        assert_eq!(classify("man_link"), NodeRole::Silhouette);
    }

    #[test]
    fn link_palette_marker() {
        assert_eq!(classify("shop_link"), NodeRole::Link { external: false });
        assert_eq!(
            classify("shop_link_ext"),
            NodeRole::Link { external: true }
        );
    }

    #[test]
    fn plain_names_are_scenery() {
        assert_eq!(classify("themoon"), NodeRole::Scenery);
        assert_eq!(classify(""), NodeRole::Scenery);
    }
}
