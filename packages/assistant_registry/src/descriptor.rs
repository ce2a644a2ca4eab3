use serde::{Deserialize, Serialize};

/// One externally hosted chat assistant.
///
/// `name` doubles as the registry key and the navigation label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantDescriptor {
    pub name: String,
    /// Absolute `http`/`https` address loaded into the assistant's region.
    pub url: String,
    /// Short glyph shown before the name.
    #[serde(default)]
    pub icon: String,
    /// Help text shown as the navigation tooltip.
    #[serde(default)]
    pub description: String,
}

impl AssistantDescriptor {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        icon: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            icon: icon.into(),
            description: description.into(),
        }
    }

    /// `"<icon> <name>"`, or just the name when no icon is configured.
    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.icon, self.name)
        }
    }
}
