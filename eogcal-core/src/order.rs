use crate::error::ConfigError;
use crate::layout::TARGET_COUNT;
use serde::{Deserialize, Serialize};

/// One step of the presentation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    /// Index into the target layout.
    #[serde(rename = "n")]
    pub layout_index: usize,
    /// Audio clip announcing this target, e.g. `up_left.wav`.
    #[serde(rename = "command", default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<String>,
}

impl OrderEntry {
    pub fn new(layout_index: usize) -> Self {
        Self {
            layout_index,
            clip: None,
        }
    }

    pub fn with_clip(layout_index: usize, clip: impl Into<String>) -> Self {
        Self {
            layout_index,
            clip: Some(clip.into()),
        }
    }
}

/// The validated presentation sequence.
///
/// Every layout index in here is known to be in range, so the sequencer
/// can index the layout without checking on each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetOrder {
    entries: Vec<OrderEntry>,
    reference: Option<usize>,
}

impl TargetOrder {
    /// Validates `entries` and `reference` against the canonical layout.
    /// A `reference` of `None` disables reference presentation.
    pub fn resolve(entries: Vec<OrderEntry>, reference: Option<usize>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyOrder);
        }
        if let Some((position, entry)) = entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.layout_index >= TARGET_COUNT)
        {
            return Err(ConfigError::LayoutIndexOutOfRange {
                position,
                index: entry.layout_index,
                count: TARGET_COUNT,
            });
        }
        if let Some(index) = reference.filter(|r| *r >= TARGET_COUNT) {
            return Err(ConfigError::ReferenceOutOfRange {
                index,
                count: TARGET_COUNT,
            });
        }

        Ok(Self { entries, reference })
    }

    /// The 13-target sequence `0..=12`, centre as reference.
    pub fn canonical() -> Self {
        Self {
            entries: (0..TARGET_COUNT).map(OrderEntry::new).collect(),
            reference: Some(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn entry(&self, cursor: usize) -> Option<&OrderEntry> {
        self.entries.get(cursor)
    }

    pub fn layout_index(&self, cursor: usize) -> Option<usize> {
        self.entry(cursor).map(|e| e.layout_index)
    }

    pub fn clip(&self, cursor: usize) -> Option<&str> {
        self.entry(cursor).and_then(|e| e.clip.as_deref())
    }

    pub fn reference(&self) -> Option<usize> {
        self.reference
    }

    /// Clip of the first entry that presents the reference target.
    pub fn reference_clip(&self) -> Option<&str> {
        let reference = self.reference?;
        self.entries
            .iter()
            .find(|e| e.layout_index == reference)
            .and_then(|e| e.clip.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_well_formed_order() {
        let order = TargetOrder::resolve(
            vec![OrderEntry::with_clip(0, "center.wav"), OrderEntry::new(4)],
            Some(0),
        )
        .unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(order.layout_index(1), Some(4));
        assert_eq!(order.clip(0), Some("center.wav"));
        assert_eq!(order.clip(1), None);
        assert_eq!(order.reference_clip(), Some("center.wav"));
    }

    #[test]
    fn rejects_layout_index_past_the_pattern() {
        let err = TargetOrder::resolve(vec![OrderEntry::new(3), OrderEntry::new(13)], None)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::LayoutIndexOutOfRange {
                position: 1,
                index: 13,
                count: TARGET_COUNT
            }
        );
    }

    #[test]
    fn rejects_bad_reference_and_empty_order() {
        assert_eq!(
            TargetOrder::resolve(vec![OrderEntry::new(0)], Some(20)).unwrap_err(),
            ConfigError::ReferenceOutOfRange {
                index: 20,
                count: TARGET_COUNT
            }
        );
        assert_eq!(
            TargetOrder::resolve(Vec::new(), Some(0)).unwrap_err(),
            ConfigError::EmptyOrder
        );
    }

    #[test]
    fn canonical_order_covers_every_target() {
        let order = TargetOrder::canonical();
        assert_eq!(order.len(), TARGET_COUNT);
        assert_eq!(order.reference(), Some(0));
        assert!((0..TARGET_COUNT).all(|i| order.layout_index(i) == Some(i)));
    }

    #[test]
    fn entries_use_short_field_names_on_disk() {
        let entry: OrderEntry = serde_json::from_str(r#"{"n": 5, "command": "down_right.wav"}"#).unwrap();
        assert_eq!(entry, OrderEntry::with_clip(5, "down_right.wav"));
        let bare: OrderEntry = serde_json::from_str(r#"{"n": 2}"#).unwrap();
        assert_eq!(bare.clip, None);
    }
}
