use std::collections::HashSet;

use http::Uri;

use crate::descriptor::AssistantDescriptor;
use crate::error::RegistryError;

/// Ordered, read-only set of assistants. Insertion order is display order.
///
/// Construction is the only place the invariants are checked: non-empty,
/// unique non-empty names, absolute `http(s)` URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    assistants: Vec<AssistantDescriptor>,
}

impl Registry {
    pub fn new(assistants: Vec<AssistantDescriptor>) -> Result<Self, RegistryError> {
        if assistants.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::with_capacity(assistants.len());
        for (index, assistant) in assistants.iter().enumerate() {
            if assistant.name.trim().is_empty() {
                return Err(RegistryError::EmptyName { index });
            }
            if !seen.insert(assistant.name.as_str()) {
                return Err(RegistryError::DuplicateName(assistant.name.clone()));
            }
            validate_url(&assistant.url).map_err(|reason| RegistryError::InvalidUrl {
                name: assistant.name.clone(),
                url: assistant.url.clone(),
                reason,
            })?;
        }

        Ok(Self { assistants })
    }

    pub fn assistants(&self) -> &[AssistantDescriptor] {
        &self.assistants
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssistantDescriptor> {
        self.assistants.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assistants.iter().map(|a| a.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&AssistantDescriptor> {
        self.assistants.iter().find(|a| a.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.assistants.iter().position(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// The default selection. Never fails: the registry is non-empty.
    pub fn first(&self) -> &AssistantDescriptor {
        &self.assistants[0]
    }
}

fn validate_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("url is empty".to_string());
    }

    let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| e.to_string())?;
    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => return Err(format!("unsupported scheme {other:?}")),
        None => return Err("url must be absolute".to_string()),
    }
    if uri.host().is_none_or(str::is_empty) {
        return Err("url has no host".to_string());
    }
    if let Some(authority) = uri.authority() {
        validate_port(authority.as_str())?;
    }
    Ok(())
}

// `Uri` accepts any digits after the colon and `port()` hides the ones that
// overflow, so read the port back out of the authority text.
fn validate_port(authority: &str) -> Result<(), String> {
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, rest)| rest);
    let Some((_, port)) = host_port.rsplit_once(':') else {
        return Ok(());
    };
    if port.contains(']') {
        // IPv6 literal without a port
        return Ok(());
    }
    match port.parse::<u16>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(format!("invalid port {port:?}")),
    }
}
