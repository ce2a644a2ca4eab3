use anyhow::{Context, Result};
use assistant_registry::{AssistantDescriptor, Registry};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// File config (figment-deserialized from defaults / profile / TOML / env vars)
// =============================================================================
//
//   proposal_suite.toml:   [server]
//                          port = 8080
//
//                          [[assistants]]
//                          name = "RFP Assessment"
//                          url = "https://..."
//
//   env var:               SUITE_SERVER__PORT=8080   (double underscore = nesting)

/// Named configuration presets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// host=127.0.0.1, plain cookies
    Local,
    /// host=0.0.0.0, Secure cookies
    Server,
}

/// Top-level tunable configuration, deserialized by figment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub server: ServerFileConfig,
    #[serde(default)]
    pub session: SessionFileConfig,
    #[serde(default)]
    pub page: PageFileConfig,
    #[serde(default = "default_assistants")]
    pub assistants: Vec<AssistantDescriptor>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            profile: None,
            server: ServerFileConfig::default(),
            session: SessionFileConfig::default(),
            page: PageFileConfig::default(),
            assistants: default_assistants(),
        }
    }
}

/// Listener address (lives under `[server]`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerFileConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Session cookie and expiry (lives under `[session]`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionFileConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub secure: bool,
    /// Idle seconds before a session is dropped. 0 keeps sessions forever.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
    /// Live sessions kept before the least recently seen is evicted.
    /// 0 removes the cap.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionFileConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure: false,
            ttl_secs: default_session_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Sidebar text (lives under `[page]`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageFileConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_features")]
    pub features: Vec<String>,
}

impl Default for PageFileConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            icon: default_icon(),
            features: default_features(),
        }
    }
}

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

fn default_cookie_name() -> String {
    "suite_session".to_string()
}
fn default_session_ttl() -> u64 {
    86400
}
fn default_sweep_interval() -> u64 {
    300
}
fn default_max_sessions() -> usize {
    10_000
}
fn default_title() -> String {
    "AI Proposal Suite".to_string()
}
fn default_subtitle() -> String {
    "Your Professional AI Assistants".to_string()
}
fn default_icon() -> String {
    "🤖".to_string()
}
fn default_features() -> Vec<String> {
    [
        "✅ Chat history preserved",
        "📁 Document uploads",
        "🔄 Instant switching",
        "🎯 Specialized models",
        "💾 Persistent sessions",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// The built-in assistants, used when the config file defines none.
pub fn default_assistants() -> Vec<AssistantDescriptor> {
    vec![
        AssistantDescriptor::new(
            "RFP Assessment",
            "https://hub.nexalab.ai/w/chat/rfpassessment-192",
            "📋",
            "Analyze and evaluate RFP requirements",
        ),
        AssistantDescriptor::new(
            "Generate Proposal",
            "https://hub.nexalab.ai/w/chat/proposalgenerator-193",
            "📄",
            "Create comprehensive proposals",
        ),
        AssistantDescriptor::new(
            "Vendor Proposal Analysis",
            "https://hub.nexalab.ai/w/chat/vendorproposalevaluator-194",
            "🔍",
            "Compare and analyze vendor proposals",
        ),
        AssistantDescriptor::new(
            "SOW Analysis",
            "https://hub.nexalab.ai/w/chat/sowanalysis-191",
            "📊",
            "Review and analyze statements of work",
        ),
    ]
}

/// Build a figment that layers: defaults → profile defaults → TOML file → SUITE_* env vars.
///
/// The CLI profile takes priority over the one named in the file.
pub fn load_config(config_path: &Path, cli_profile: Option<&Profile>) -> figment::Figment {
    use figment::{
        Figment,
        providers::{Env, Format, Serialized, Toml},
    };

    // Pass 1: peek at profile from the file/env (CLI overrides file)
    let base = Figment::from(Serialized::defaults(FileConfig::default()))
        .merge(Toml::file(config_path))
        .merge(Env::prefixed("SUITE_").split("__"));

    let profile: Option<Profile> = cli_profile
        .cloned()
        .or_else(|| base.extract_inner("profile").ok());

    // Pass 2: profile defaults sit between struct defaults and the file
    Figment::from(Serialized::defaults(FileConfig::default()))
        .merge(Serialized::defaults(profile_to_file_config(profile.as_ref())))
        .merge(Toml::file(config_path))
        .merge(Env::prefixed("SUITE_").split("__"))
}

fn profile_to_file_config(profile: Option<&Profile>) -> FileConfig {
    match profile {
        Some(Profile::Local) => FileConfig {
            profile: Some(Profile::Local),
            server: ServerFileConfig {
                host: Some("127.0.0.1".to_string()),
                ..Default::default()
            },
            session: SessionFileConfig {
                secure: false,
                ..Default::default()
            },
            ..Default::default()
        },
        Some(Profile::Server) => FileConfig {
            profile: Some(Profile::Server),
            server: ServerFileConfig {
                host: Some("0.0.0.0".to_string()),
                ..Default::default()
            },
            session: SessionFileConfig {
                secure: true,
                ..Default::default()
            },
            ..Default::default()
        },
        None => FileConfig::default(),
    }
}

// =============================================================================
// Runtime config (validated view of FileConfig)
// =============================================================================

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    /// `None` disables expiry.
    pub ttl: Option<Duration>,
    pub sweep_interval: Duration,
    /// `None` leaves the store unbounded.
    pub max_sessions: Option<usize>,
}

impl SessionConfig {
    pub fn from_file(fc: &SessionFileConfig) -> Self {
        Self {
            cookie_name: fc.cookie_name.clone(),
            secure: fc.secure,
            ttl: (fc.ttl_secs > 0).then(|| Duration::from_secs(fc.ttl_secs)),
            sweep_interval: Duration::from_secs(fc.sweep_interval_secs.max(1)),
            max_sessions: (fc.max_sessions > 0).then_some(fc.max_sessions),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub features: Vec<String>,
}

impl PageConfig {
    pub fn from_file(fc: &PageFileConfig) -> Self {
        Self {
            title: fc.title.clone(),
            subtitle: fc.subtitle.clone(),
            icon: fc.icon.clone(),
            features: fc.features.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SuiteConfig {
    pub addr: SocketAddr,
    pub session: SessionConfig,
    pub page: PageConfig,
    pub registry: Registry,
}

impl SuiteConfig {
    /// Validate a loaded config. An invalid registry is fatal.
    pub fn from_file(fc: FileConfig) -> Result<Self> {
        let host = fc.server.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = fc.server.port.unwrap_or(DEFAULT_PORT);
        let addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid listen address {host}:{port}"))?;

        let registry = Registry::new(fc.assistants).context("Invalid assistant registry")?;

        Ok(Self {
            addr,
            session: SessionConfig::from_file(&fc.session),
            page: PageConfig::from_file(&fc.page),
            registry,
        })
    }
}
