use crate::config::manifest::PageManifest;
use crate::config::{PageConfig, DEFAULT_AUTOPLAY_INTERVAL_MS};
use crate::utils::error::Result;
use clap::Parser;

/// Command line entry: point sitewire at a fragment server and watch it
/// assemble the page.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitewire")]
#[command(about = "Assembles a static page from remote HTML fragments")]
pub struct CliConfig {
    /// Base URL the fragment paths resolve against.
    #[arg(long, default_value = "http://localhost:8080")]
    pub base_url: String,

    /// TOML page manifest; the built-in layout is used when omitted.
    #[arg(long)]
    pub manifest: Option<String>,

    /// Milliseconds between carousel autoplay ticks.
    #[arg(long, default_value_t = DEFAULT_AUTOPLAY_INTERVAL_MS)]
    pub autoplay_interval_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Turn the CLI arguments into a resolved page configuration. A
    /// manifest, when given, decides the whole layout; otherwise the
    /// built-in layout applies.
    pub fn resolve(&self) -> Result<PageConfig> {
        match &self.manifest {
            Some(path) => PageManifest::from_file(path)?.resolve(),
            None => PageConfig::default_layout(&self.base_url, self.autoplay_interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_the_builtin_layout() {
        let cli = CliConfig::parse_from(["sitewire"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.structure.len(), 2);
        assert!(config.carousel.is_some());
        assert_eq!(config.autoplay_interval_ms, 4000);
    }

    #[test]
    fn flags_override_base_url_and_interval() {
        let cli = CliConfig::parse_from([
            "sitewire",
            "--base-url",
            "http://fragments.test:9000",
            "--autoplay-interval-ms",
            "1500",
        ]);
        let config = cli.resolve().unwrap();

        assert!(config.structure[0]
            .url
            .starts_with("http://fragments.test:9000/"));
        assert_eq!(config.autoplay_interval_ms, 1500);
    }
}
