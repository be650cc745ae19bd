#[cfg(feature = "cli")]
pub mod cli;
pub mod manifest;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::carousel::DEFAULT_AUTOPLAY_INTERVAL;
use crate::domain::model::FragmentRequest;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SitewireError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use std::time::Duration;
use url::Url;

/// Fully-resolved page configuration: absolute fragment URLs grouped by
/// load phase.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub structure: Vec<FragmentRequest>,
    pub carousel: Option<FragmentRequest>,
    pub content: Vec<FragmentRequest>,
    pub autoplay_interval_ms: u64,
}

impl PageConfig {
    /// The built-in page layout: header and footer frame the page, a
    /// carousel below the header, then marquee, products and contact
    /// sections.
    pub fn default_layout(base_url: &str, autoplay_interval_ms: u64) -> Result<Self> {
        let base = normalize_base(base_url)?;
        Ok(Self {
            structure: vec![
                join_fragment(&base, "components/header.html", "header-placeholder")?,
                join_fragment(&base, "components/footer.html", "footer-placeholder")?,
            ],
            carousel: Some(join_fragment(
                &base,
                "components/carousel.html",
                "carousel-placeholder",
            )?),
            content: vec![
                join_fragment(&base, "components/marquee.html", "marquee-placeholder")?,
                join_fragment(&base, "components/products.html", "products-placeholder")?,
                join_fragment(&base, "components/contact.html", "contact-placeholder")?,
            ],
            autoplay_interval_ms,
        })
    }

    fn fragments(&self) -> impl Iterator<Item = &FragmentRequest> {
        self.structure
            .iter()
            .chain(self.carousel.iter())
            .chain(self.content.iter())
    }

    /// Ids of every container the page shell must provide.
    pub fn container_ids(&self) -> Vec<String> {
        self.fragments()
            .map(|fragment| fragment.target.clone())
            .collect()
    }
}

impl ConfigProvider for PageConfig {
    fn structure_fragments(&self) -> &[FragmentRequest] {
        &self.structure
    }

    fn carousel_fragment(&self) -> Option<&FragmentRequest> {
        self.carousel.as_ref()
    }

    fn content_fragments(&self) -> &[FragmentRequest] {
        &self.content
    }

    fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

impl Validate for PageConfig {
    fn validate(&self) -> Result<()> {
        if self.structure.is_empty() && self.carousel.is_none() && self.content.is_empty() {
            return Err(SitewireError::ConfigValidation {
                field: "fragments".to_string(),
                message: "page defines no fragments to load".to_string(),
            });
        }
        validate_positive_number("autoplay_interval_ms", self.autoplay_interval_ms, 100)?;
        for fragment in self.fragments() {
            validate_url("fragment url", &fragment.url)?;
            validate_non_empty_string("fragment target", &fragment.target)?;
        }
        Ok(())
    }
}

/// Parse a base URL, forcing the trailing slash that makes relative
/// fragment paths append instead of replace.
pub(crate) fn normalize_base(base_url: &str) -> Result<Url> {
    let mut text = base_url.to_string();
    if !text.ends_with('/') {
        text.push('/');
    }
    Url::parse(&text).map_err(|e| SitewireError::InvalidConfigValue {
        field: "base_url".to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn join_fragment(base: &Url, path: &str, target: &str) -> Result<FragmentRequest> {
    let url = base.join(path).map_err(|e| SitewireError::InvalidConfigValue {
        field: "fragment path".to_string(),
        value: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(FragmentRequest::new(url.as_str(), target))
}

/// Default autoplay interval in milliseconds, shared by the CLI flag and
/// the manifest fallback.
pub(crate) const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = DEFAULT_AUTOPLAY_INTERVAL.as_millis() as u64;
