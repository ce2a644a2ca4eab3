//! Region visibility as data: one flag per registry entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// Stable DOM id of a content region, derived from the registry index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn for_index(index: usize) -> Self {
        Self(format!("region-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionVisibility {
    pub id: RegionId,
    pub assistant: String,
    pub visible: bool,
}

/// Visibility flags for every region, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap(Vec<RegionVisibility>);

impl VisibilityMap {
    pub fn iter(&self) -> impl Iterator<Item = &RegionVisibility> {
        self.0.iter()
    }

    pub fn is_visible(&self, id: &RegionId) -> Option<bool> {
        self.0.iter().find(|r| &r.id == id).map(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|r| r.visible).count()
    }

    pub fn visible_region(&self) -> Option<&RegionVisibility> {
        self.0.iter().find(|r| r.visible)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The region for `selected_name` is visible, every other one hidden.
pub fn apply_visibility(registry: &Registry, selected_name: &str) -> VisibilityMap {
    VisibilityMap(
        registry
            .iter()
            .enumerate()
            .map(|(index, assistant)| RegionVisibility {
                id: RegionId::for_index(index),
                assistant: assistant.name.clone(),
                visible: assistant.name == selected_name,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssistantDescriptor;

    fn registry() -> Registry {
        Registry::new(vec![
            AssistantDescriptor::new("A", "https://a.example/a", "", ""),
            AssistantDescriptor::new("B", "https://a.example/b", "", ""),
            AssistantDescriptor::new("C", "https://a.example/c", "", ""),
        ])
        .unwrap()
    }

    #[test]
    fn region_ids_follow_registry_index() {
        let map = apply_visibility(&registry(), "A");
        let ids: Vec<_> = map.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["region-0", "region-1", "region-2"]);
    }

    #[test]
    fn exactly_selected_region_visible() {
        let map = apply_visibility(&registry(), "B");
        assert_eq!(map.len(), 3);
        assert_eq!(map.visible_count(), 1);
        assert_eq!(map.is_visible(&RegionId::for_index(0)), Some(false));
        assert_eq!(map.is_visible(&RegionId::for_index(1)), Some(true));
        assert_eq!(map.is_visible(&RegionId::for_index(2)), Some(false));
        assert_eq!(map.visible_region().map(|r| r.assistant.as_str()), Some("B"));
    }

    #[test]
    fn unknown_region_id() {
        let map = apply_visibility(&registry(), "A");
        assert_eq!(map.is_visible(&RegionId::for_index(9)), None);
    }

    #[test]
    fn serializes_as_array() {
        let map = apply_visibility(&registry(), "C");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json[2]["id"], "region-2");
        assert_eq!(json[2]["visible"], true);
        assert_eq!(json[0]["visible"], false);
    }
}
