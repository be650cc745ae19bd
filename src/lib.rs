pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::PageConfig;

pub use crate::adapters::{dom::InMemoryDom, http::HttpFetcher};
pub use crate::core::bootstrap::{BootReport, Bootstrapper};
pub use crate::core::carousel::Carousel;
pub use crate::core::loader::FragmentLoader;
pub use crate::domain::model::{ContentFailure, FragmentRequest};
pub use crate::domain::ports::{ConfigProvider, Dom, Fetcher};
pub use crate::utils::error::{Result, SitewireError};
