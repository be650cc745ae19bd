use crate::config::{join_fragment, normalize_base, PageConfig, DEFAULT_AUTOPLAY_INTERVAL_MS};
use crate::utils::error::{Result, SitewireError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page layout manifest: which fragments make up the page, where they
/// land, grouped by load phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    pub page: PageSection,
    #[serde(default)]
    pub structure: Vec<FragmentEntry>,
    pub carousel: Option<FragmentEntry>,
    #[serde(default)]
    pub content: Vec<FragmentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSection {
    pub base_url: String,
    pub autoplay_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentEntry {
    pub path: String,
    pub target: String,
}

impl PageManifest {
    /// Load a manifest from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SitewireError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse a manifest from a TOML string. `${VAR}` references are
    /// replaced from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        toml::from_str(&processed).map_err(|e| SitewireError::ConfigValidation {
            field: "manifest".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });
        Ok(result.to_string())
    }

    /// Resolve fragment paths against the base URL into a runnable page
    /// configuration.
    pub fn resolve(&self) -> Result<PageConfig> {
        let base = normalize_base(&self.page.base_url)?;

        let mut structure = Vec::new();
        for entry in &self.structure {
            structure.push(join_fragment(&base, &entry.path, &entry.target)?);
        }
        let carousel = match &self.carousel {
            Some(entry) => Some(join_fragment(&base, &entry.path, &entry.target)?),
            None => None,
        };
        let mut content = Vec::new();
        for entry in &self.content {
            content.push(join_fragment(&base, &entry.path, &entry.target)?);
        }

        Ok(PageConfig {
            structure,
            carousel,
            content,
            autoplay_interval_ms: self
                .page
                .autoplay_interval_ms
                .unwrap_or(DEFAULT_AUTOPLAY_INTERVAL_MS),
        })
    }
}
