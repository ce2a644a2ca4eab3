//! Structured description of the page, independent of any markup.
//!
//! The HTML templates draw exactly what these functions return, so the
//! "mount everything, flag one visible" contract is checked here.

use serde::Serialize;

use crate::registry::Registry;
use crate::selection::SelectionState;
use crate::visibility::{RegionId, VisibilityMap, apply_visibility};

/// One navigation control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub icon: String,
    pub label: String,
    pub description: String,
    pub active: bool,
}

/// One embedded-content region. Always present, whether visible or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRegion {
    pub id: RegionId,
    pub assistant: String,
    pub url: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageModel {
    pub navigation: Vec<NavItem>,
    pub regions: Vec<ContentRegion>,
    pub visibility: VisibilityMap,
    /// Text of the "Active Assistant" panel.
    pub active_label: String,
}

pub fn render_navigation(registry: &Registry, state: &SelectionState) -> Vec<NavItem> {
    registry
        .iter()
        .map(|assistant| NavItem {
            name: assistant.name.clone(),
            icon: assistant.icon.clone(),
            label: assistant.label(),
            description: assistant.description.clone(),
            active: state.is_selected(&assistant.name),
        })
        .collect()
}

pub fn render_content_regions(registry: &Registry, state: &SelectionState) -> Vec<ContentRegion> {
    registry
        .iter()
        .zip(apply_visibility(registry, state.selected()).iter())
        .map(|(assistant, flag)| ContentRegion {
            id: flag.id.clone(),
            assistant: assistant.name.clone(),
            url: assistant.url.clone(),
            visible: flag.visible,
        })
        .collect()
}

/// Full page for `state`. A state naming an assistant this registry does not
/// hold is drawn as the default selection, so exactly one region is visible
/// and the label always names it.
pub fn render_page(registry: &Registry, state: &SelectionState) -> PageModel {
    let state = SelectionState::initialize(registry, Some(state.clone()));
    let active_label = registry
        .get(state.selected())
        .unwrap_or_else(|| registry.first())
        .label();

    PageModel {
        navigation: render_navigation(registry, &state),
        regions: render_content_regions(registry, &state),
        visibility: apply_visibility(registry, state.selected()),
        active_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssistantDescriptor;

    const URL_A: &str = "https://hub.example.com/w/chat/rfpassessment";
    const URL_B: &str = "https://hub.example.com/w/chat/proposalgenerator";

    fn registry() -> Registry {
        Registry::new(vec![
            AssistantDescriptor::new(
                "RFP Assessment",
                URL_A,
                "📋",
                "Analyze and evaluate RFP requirements",
            ),
            AssistantDescriptor::new(
                "Generate Proposal",
                URL_B,
                "📄",
                "Create comprehensive proposals",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn navigation_marks_active_entry() {
        let registry = registry();
        let state = SelectionState::initial(&registry);
        let nav = render_navigation(&registry, &state);

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].label, "📋 RFP Assessment");
        assert_eq!(nav[0].description, "Analyze and evaluate RFP requirements");
        assert!(nav[0].active);
        assert!(!nav[1].active);
    }

    #[test]
    fn all_regions_rendered_with_one_visible() {
        let registry = registry();
        let state = SelectionState::initial(&registry);
        let regions = render_content_regions(&registry, &state);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].url, URL_A);
        assert_eq!(regions[1].url, URL_B);
        assert!(regions[0].visible);
        assert!(!regions[1].visible);
    }

    #[test]
    fn end_to_end_switch() {
        let registry = registry();

        let state = SelectionState::initialize(&registry, None);
        let before = render_page(&registry, &state);
        assert_eq!(state.selected(), "RFP Assessment");
        assert!(before.regions[0].visible);
        assert!(!before.regions[1].visible);

        let state = state.select(&registry, "Generate Proposal").unwrap();
        let after = render_page(&registry, &state);
        assert_eq!(state.selected(), "Generate Proposal");
        assert!(!after.regions[0].visible);
        assert!(after.regions[1].visible);
        assert_eq!(after.active_label, "📄 Generate Proposal");

        // Region A is still part of the page with the same id and url.
        assert_eq!(after.regions[0].id, before.regions[0].id);
        assert_eq!(after.regions[0].url, before.regions[0].url);

        assert!(state.select(&registry, "Nonexistent").is_err());
        assert_eq!(state.selected(), "Generate Proposal");
        assert_eq!(render_page(&registry, &state), after);
    }

    #[test]
    fn foreign_state_renders_as_default() {
        let registry = registry();
        let other = Registry::new(vec![AssistantDescriptor::new(
            "Retired Assistant",
            "https://hub.example.com/w/chat/retired",
            "🗄",
            "",
        )])
        .unwrap();
        let stale = SelectionState::initial(&other);

        let page = render_page(&registry, &stale);
        assert_eq!(page.visibility.visible_count(), 1);
        assert!(page.regions[0].visible);
        assert!(page.navigation[0].active);
        assert_eq!(page.active_label, "📋 RFP Assessment");
        assert_eq!(page, render_page(&registry, &SelectionState::initial(&registry)));
    }

    #[test]
    fn page_visibility_agrees_with_regions() {
        let registry = registry();
        let state = SelectionState::initial(&registry)
            .select(&registry, "Generate Proposal")
            .unwrap();
        let page = render_page(&registry, &state);
        for region in &page.regions {
            assert_eq!(page.visibility.is_visible(&region.id), Some(region.visible));
        }
    }
}
