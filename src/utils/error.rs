use thiserror::Error;

#[derive(Error, Debug)]
pub enum SitewireError {
    #[error("Fragment request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fragment {url} returned HTTP status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Container #{id} not found in the document")]
    MissingContainer { id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl SitewireError {
    /// Short operator-facing description, free of internals.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(_) | Self::FetchStatus { .. } => {
                "A page fragment could not be retrieved".to_string()
            }
            Self::MissingContainer { id } => {
                format!("The page shell has no container #{}", id)
            }
            Self::Io(_) => "A local file could not be read".to_string(),
            Self::TaskJoin(_) => "A background load was interrupted".to_string(),
            Self::ConfigValidation { field, .. } | Self::InvalidConfigValue { field, .. } => {
                format!("The configuration value for {} is not usable", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::FetchStatus { .. } => {
                "Check that the fragment server is reachable and the fragment paths exist"
            }
            Self::MissingContainer { .. } => {
                "Make sure the page shell declares a container for every fragment target"
            }
            Self::Io(_) => "Verify the manifest path and its permissions",
            Self::TaskJoin(_) => "Re-run the assembly; report if it keeps happening",
            Self::ConfigValidation { .. } | Self::InvalidConfigValue { .. } => {
                "Fix the manifest or the CLI flags and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SitewireError>;
