//! Static front-end configuration.

use serde::{Deserialize, Serialize};

/// Where the bundled front end lives and how it is exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    /// Serve the front end at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// URL prefix the directory is mounted under.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
    /// Filesystem directory holding the assets.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
    /// URL prefixes reachable without logging in (stylesheets, scripts).
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            mount_path: default_mount_path(),
            root_dir: default_root_dir(),
            public_paths: default_public_paths(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_mount_path() -> String {
    "/html5".to_string()
}

fn default_root_dir() -> String {
    "./static".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/html5/css_html5/".to_string(),
        "/html5/js_html5/".to_string(),
    ]
}
