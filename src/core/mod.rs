pub mod bootstrap;
pub mod carousel;
pub mod dropdown;
pub mod loader;

pub use crate::domain::model::{ContentFailure, FragmentRequest};
pub use crate::domain::ports::{ConfigProvider, Dom, Fetcher};
pub use crate::utils::error::Result;
