// src/annotation.rs
use serde::Deserialize;

/// Sentinel emitted by the translation service when a text region sits on a
/// non-uniform background and no single color hint applies.
pub const NON_UNIFORM_BACKGROUND: &str = "complex";

/// Taxonomy of detected text regions. Labels the service emits outside this
/// set collapse into `Other` instead of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Dialogue,
    Sfx,
    Narration,
    Other,
}

/// Fixed presentation bucket for one `RegionKind`.
pub struct KindStyle {
    pub card: &'static str,
    pub badge: &'static str,
    pub icon: &'static str,
}

impl RegionKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "dialogue" => RegionKind::Dialogue,
            "sfx" => RegionKind::Sfx,
            "narration" => RegionKind::Narration,
            _ => RegionKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionKind::Dialogue => "dialogue",
            RegionKind::Sfx => "sfx",
            RegionKind::Narration => "narration",
            RegionKind::Other => "other",
        }
    }

    pub fn style(&self) -> KindStyle {
        match self {
            RegionKind::Dialogue => KindStyle {
                card: "entry-dialogue",
                badge: "badge-dialogue",
                icon: "💬",
            },
            RegionKind::Sfx => KindStyle {
                card: "entry-sfx",
                badge: "badge-sfx",
                icon: "💥",
            },
            RegionKind::Narration => KindStyle {
                card: "entry-narration",
                badge: "badge-narration",
                icon: "📝",
            },
            RegionKind::Other => KindStyle {
                card: "entry-other",
                badge: "badge-other",
                icon: "📄",
            },
        }
    }
}

/// Normalized bounding box, fractions of the source image dimensions in the
/// order the service emits them: (ymin, xmin, ymax, xmax).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBox {
    pub ymin: f64,
    pub xmin: f64,
    pub ymax: f64,
    pub xmax: f64,
}

impl RegionBox {
    pub fn new(ymin: f64, xmin: f64, ymax: f64, xmax: f64) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
        .clamped()
    }

    /// Clamp every coordinate into [0,1] and reorder each axis so that
    /// min <= max. Idempotent: clamping a clamped box is a no-op.
    pub fn clamped(self) -> Self {
        fn unit(v: f64) -> f64 {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                0.0
            }
        }

        let (y0, y1) = (unit(self.ymin), unit(self.ymax));
        let (x0, x1) = (unit(self.xmin), unit(self.xmax));
        Self {
            ymin: y0.min(y1),
            ymax: y0.max(y1),
            xmin: x0.min(x1),
            xmax: x0.max(x1),
        }
    }
}

/// Background color hint attached to a region, if the service provided one.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundHint {
    Color(String),
    NonUniform,
}

impl BackgroundHint {
    pub fn from_hint(raw: &str) -> Self {
        if raw == NON_UNIFORM_BACKGROUND {
            BackgroundHint::NonUniform
        } else {
            BackgroundHint::Color(raw.to_string())
        }
    }
}

/// One detected and translated text region, already sanitized.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationItem {
    pub id: String,
    pub bbox: RegionBox,
    pub kind: RegionKind,
    pub original: String,
    pub translation: String,
    pub background: Option<BackgroundHint>,
}

/// Region exactly as decoded from the service output, before sanitizing.
/// Everything is optional so a sloppy response never fails wholesale.
#[derive(Debug, Default, Deserialize)]
pub struct RawRegion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub bg_color: Option<String>,
}

impl TranslationItem {
    /// Build a displayable item from a raw region. Regions missing any of
    /// id, bbox, or translation are unrenderable and yield `None`.
    pub fn from_raw(raw: RawRegion) -> Option<Self> {
        let id = raw.id.filter(|id| !id.is_empty())?;
        let bbox = match raw.bbox.as_deref() {
            Some(&[ymin, xmin, ymax, xmax]) => RegionBox::new(ymin, xmin, ymax, xmax),
            _ => return None,
        };
        let translation = raw.translation.filter(|t| !t.is_empty())?;

        Some(Self {
            id,
            bbox,
            kind: raw
                .kind
                .as_deref()
                .map(RegionKind::from_label)
                .unwrap_or(RegionKind::Other),
            original: raw.original.unwrap_or_default(),
            translation,
            background: raw.bg_color.as_deref().map(BackgroundHint::from_hint),
        })
    }
}

/// Drop unrenderable regions, keeping the order the service produced.
pub fn sanitize_regions(raw: Vec<RawRegion>) -> Vec<TranslationItem> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(idx, region)| match TranslationItem::from_raw(region) {
            Some(item) => Some(item),
            None => {
                log::warn!("dropping incomplete region at position {}", idx + 1);
                None
            }
        })
        .collect()
}

/// Supported translation directions. Fixed configuration: the set is not
/// user-extensible and each mode carries a stable key for wire use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMode {
    JaToZh,
    JaToEn,
    EnToZh,
    EnToJa,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 4] = [
        LanguageMode::JaToZh,
        LanguageMode::JaToEn,
        LanguageMode::EnToZh,
        LanguageMode::EnToJa,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LanguageMode::JaToZh => "ja-zh",
            LanguageMode::JaToEn => "ja-en",
            LanguageMode::EnToZh => "en-zh",
            LanguageMode::EnToJa => "en-ja",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LanguageMode::JaToZh => "Japanese → Chinese",
            LanguageMode::JaToEn => "Japanese → English",
            LanguageMode::EnToZh => "English → Chinese",
            LanguageMode::EnToJa => "English → Japanese",
        }
    }

    pub fn source_language(&self) -> &'static str {
        match self {
            LanguageMode::JaToZh | LanguageMode::JaToEn => "Japanese",
            LanguageMode::EnToZh | LanguageMode::EnToJa => "English",
        }
    }

    pub fn target_language(&self) -> &'static str {
        match self {
            LanguageMode::JaToZh | LanguageMode::EnToZh => "Simplified Chinese",
            LanguageMode::JaToEn => "English",
            LanguageMode::EnToJa => "Japanese",
        }
    }
}

impl Default for LanguageMode {
    fn default() -> Self {
        LanguageMode::JaToZh
    }
}

/// An imported source page, eligible for (re-)translation.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryItem {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub source_image: String,
    pub timestamp: f64,
}

/// Snapshot of one completed translation run. `items` never change after
/// the snapshot is taken; the history store exposes no mutable access.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub id: String,
    pub thumbnail: String,
    pub timestamp: f64,
    pub language_mode: LanguageMode,
    pub items: Vec<TranslationItem>,
    pub source_image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, bbox: Vec<f64>, translation: &str) -> RawRegion {
        RawRegion {
            id: Some(id.to_string()),
            bbox: Some(bbox),
            translation: Some(translation.to_string()),
            ..RawRegion::default()
        }
    }

    #[test]
    fn test_clamp_is_noop_in_range() {
        let bbox = RegionBox {
            ymin: 0.1,
            xmin: 0.2,
            ymax: 0.3,
            xmax: 0.4,
        };
        assert_eq!(bbox.clamped(), bbox);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let bbox = RegionBox {
            ymin: -0.5,
            xmin: 0.2,
            ymax: 1.7,
            xmax: 0.4,
        };
        let once = bbox.clamped();
        assert_eq!(once.clamped(), once);
        assert_eq!(once.ymin, 0.0);
        assert_eq!(once.ymax, 1.0);
    }

    #[test]
    fn test_clamp_reorders_inverted_axes() {
        let bbox = RegionBox {
            ymin: 0.8,
            xmin: 0.9,
            ymax: 0.2,
            xmax: 0.1,
        }
        .clamped();
        assert!(bbox.ymin <= bbox.ymax);
        assert!(bbox.xmin <= bbox.xmax);
    }

    #[test]
    fn test_clamp_discards_non_finite() {
        let bbox = RegionBox {
            ymin: f64::NAN,
            xmin: f64::INFINITY,
            ymax: 0.5,
            xmax: 0.5,
        }
        .clamped();
        assert_eq!(bbox.ymin, 0.0);
        assert!(bbox.xmin <= bbox.xmax);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_other() {
        assert_eq!(RegionKind::from_label("thought-bubble"), RegionKind::Other);
        assert_eq!(RegionKind::from_label(""), RegionKind::Other);
        assert_eq!(RegionKind::from_label("sfx"), RegionKind::Sfx);
    }

    #[test]
    fn test_from_raw_requires_id_bbox_translation() {
        assert!(TranslationItem::from_raw(raw("a", vec![0.1, 0.2, 0.3, 0.4], "BOOM")).is_some());

        let mut missing_id = raw("a", vec![0.1, 0.2, 0.3, 0.4], "BOOM");
        missing_id.id = None;
        assert!(TranslationItem::from_raw(missing_id).is_none());

        let short_bbox = raw("a", vec![0.1, 0.2], "BOOM");
        assert!(TranslationItem::from_raw(short_bbox).is_none());

        let mut missing_translation = raw("a", vec![0.1, 0.2, 0.3, 0.4], "BOOM");
        missing_translation.translation = None;
        assert!(TranslationItem::from_raw(missing_translation).is_none());
    }

    #[test]
    fn test_from_raw_clamps_out_of_range_bbox() {
        let item = TranslationItem::from_raw(raw("a", vec![-0.2, 0.2, 1.4, 0.4], "BOOM")).unwrap();
        assert_eq!(item.bbox.ymin, 0.0);
        assert_eq!(item.bbox.ymax, 1.0);
    }

    #[test]
    fn test_sanitize_keeps_order_and_drops_incomplete() {
        let regions = vec![
            raw("a", vec![0.1, 0.2, 0.3, 0.4], "one"),
            RawRegion::default(),
            raw("b", vec![0.5, 0.5, 0.6, 0.6], "two"),
        ];
        let items = sanitize_regions(regions);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[1].id, "b");
    }

    #[test]
    fn test_background_hint_sentinel() {
        assert_eq!(
            BackgroundHint::from_hint("complex"),
            BackgroundHint::NonUniform
        );
        assert_eq!(
            BackgroundHint::from_hint("#ffffff"),
            BackgroundHint::Color("#ffffff".to_string())
        );
    }

    #[test]
    fn test_language_mode_keys_are_distinct() {
        let keys: Vec<_> = LanguageMode::ALL.iter().map(|m| m.key()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(key));
        }
    }
}
