//! Assistant registry, selection state and visibility rules for the proposal suite.
//!
//! Everything here is pure: the server threads a [`SelectionState`] per
//! session through [`SelectionState::select`] and renders from
//! [`render::render_page`]. Every content region is always part of the
//! render model; only its visibility flag changes.

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod render;
pub mod selection;
pub mod visibility;

pub use descriptor::AssistantDescriptor;
pub use error::{RegistryError, SelectError};
pub use registry::Registry;
pub use render::{
    ContentRegion, NavItem, PageModel, render_content_regions, render_navigation, render_page,
};
pub use selection::SelectionState;
pub use visibility::{RegionId, RegionVisibility, VisibilityMap, apply_visibility};
