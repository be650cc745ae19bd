use crate::core::{Dom, Fetcher, FragmentRequest, Result};
use crate::utils::error::SitewireError;
use std::sync::Arc;

/// Fetches a fragment and injects it into its target container.
pub struct FragmentLoader<F: Fetcher> {
    fetcher: F,
    dom: Arc<dyn Dom>,
}

impl<F: Fetcher> FragmentLoader<F> {
    pub fn new(fetcher: F, dom: Arc<dyn Dom>) -> Self {
        Self { fetcher, dom }
    }

    /// Retrieve the fragment body and replace the target's content.
    /// The target is touched exactly once, and only when the fetch
    /// succeeded and the container exists; a failed load leaves the
    /// document as it was.
    pub async fn load(&self, request: &FragmentRequest) -> Result<()> {
        tracing::debug!("Loading fragment {} into #{}", request.url, request.target);
        let body = self.fetcher.fetch_text(&request.url).await?;

        if !self.dom.has_element(&request.target) {
            tracing::error!(
                "Container #{} not found, dropping fragment {}",
                request.target,
                request.url
            );
            return Err(SitewireError::MissingContainer {
                id: request.target.clone(),
            });
        }

        self.dom.set_content(&request.target, &body)?;
        tracing::debug!("Fragment {} injected ({} bytes)", request.url, body.len());
        Ok(())
    }
}

impl<F: Fetcher + Clone> Clone for FragmentLoader<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            dom: Arc::clone(&self.dom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dom::InMemoryDom;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Clone, Default)]
    struct MockFetcher {
        pages: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockFetcher {
        fn with_page(url: &str, body: &str) -> Self {
            let fetcher = Self::default();
            fetcher
                .pages
                .lock()
                .unwrap()
                .insert(url.to_string(), body.to_string());
            fetcher
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.pages.lock().unwrap().get(url).cloned().ok_or_else(|| {
                SitewireError::FetchStatus {
                    url: url.to_string(),
                    status: 404,
                }
            })
        }
    }

    #[tokio::test]
    async fn injects_the_fetched_body_into_the_target() {
        let dom = Arc::new(InMemoryDom::with_containers(["header-placeholder"]));
        let fetcher = MockFetcher::with_page("header.html", "<header>Shop</header>");
        let loader = FragmentLoader::new(fetcher, dom.clone() as Arc<dyn Dom>);

        let request = FragmentRequest::new("header.html", "header-placeholder");
        assert_ok!(loader.load(&request).await);

        assert_eq!(
            dom.content("header-placeholder").unwrap(),
            "<header>Shop</header>"
        );
    }

    #[tokio::test]
    async fn missing_container_fails_without_touching_the_document() {
        let dom = Arc::new(InMemoryDom::with_containers(["present"]));
        let fetcher = MockFetcher::with_page("header.html", "<header></header>");
        let loader = FragmentLoader::new(fetcher, dom.clone() as Arc<dyn Dom>);

        let request = FragmentRequest::new("header.html", "absent");
        let result = loader.load(&request).await;

        assert!(matches!(
            result,
            Err(SitewireError::MissingContainer { .. })
        ));
        assert_eq!(dom.content("present").unwrap(), "");
        assert!(!dom.has_element("absent"));
    }

    #[tokio::test]
    async fn fetch_failure_propagates_and_leaves_the_document_alone() {
        let dom = Arc::new(InMemoryDom::with_containers(["header-placeholder"]));
        let fetcher = MockFetcher::default();
        let loader = FragmentLoader::new(fetcher, dom.clone() as Arc<dyn Dom>);

        let request = FragmentRequest::new("gone.html", "header-placeholder");
        assert_err!(loader.load(&request).await);

        assert_eq!(dom.content("header-placeholder").unwrap(), "");
    }
}
