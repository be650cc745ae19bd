use crate::core::carousel::Carousel;
use crate::core::dropdown;
use crate::core::loader::FragmentLoader;
use crate::core::{ConfigProvider, ContentFailure, Dom, Fetcher, FragmentRequest, Result};
use crate::domain::ports::BODY_ID;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Drives the page through its load phases: structural fragments first,
/// then the carousel and its controller, then the remaining content.
pub struct Bootstrapper<F, C>
where
    F: Fetcher + Clone + 'static,
    C: ConfigProvider,
{
    loader: FragmentLoader<F>,
    dom: Arc<dyn Dom>,
    config: C,
}

impl<F, C> Bootstrapper<F, C>
where
    F: Fetcher + Clone + 'static,
    C: ConfigProvider,
{
    pub fn new(fetcher: F, dom: Arc<dyn Dom>, config: C) -> Self {
        Self {
            loader: FragmentLoader::new(fetcher, Arc::clone(&dom)),
            dom,
            config,
        }
    }

    /// Assemble the page. A structural or carousel failure replaces the
    /// visible page with an error notice and aborts; content failures
    /// are recorded in the report and swallowed.
    pub async fn run(&self) -> Result<BootReport> {
        dropdown::install_outside_close(&self.dom);

        match self.assemble().await {
            Ok(report) => {
                tracing::info!(
                    "✅ Page assembled: {} fragments in {:?}",
                    report.structural.len() + report.content.len(),
                    report.duration
                );
                Ok(report)
            }
            Err(error) => {
                tracing::error!("❌ Page assembly failed: {}", error);
                self.render_failure(&error);
                Err(error)
            }
        }
    }

    async fn assemble(&self) -> Result<BootReport> {
        let started = Instant::now();

        // Phase 1: structural fragments, together; all of them must land
        // before anything else renders.
        tracing::info!("Loading structural fragments...");
        let structural = self.load_batch(self.config.structure_fragments()).await?;

        // Phase 2: the carousel markup, then its controller; the
        // controller can only bind once the markup is in the document.
        let carousel = match self.config.carousel_fragment() {
            Some(request) => {
                tracing::info!("Loading carousel fragment...");
                self.loader.load(request).await?;
                Carousel::attach(Arc::clone(&self.dom), self.config.autoplay_interval())
            }
            None => None,
        };

        // Phase 3: remaining content. The page is already live at this
        // point; a broken product strip only gets logged.
        tracing::info!("Loading content fragments...");
        let (content, content_failures) =
            self.load_content(self.config.content_fragments()).await?;

        Ok(BootReport {
            structural,
            content,
            content_failures,
            carousel,
            duration: started.elapsed(),
        })
    }

    async fn load_batch(&self, requests: &[FragmentRequest]) -> Result<Vec<FragmentRequest>> {
        let mut tasks = JoinSet::new();
        for request in requests {
            let loader = self.loader.clone();
            let request = request.clone();
            tasks.spawn(async move { loader.load(&request).await.map(|_| request) });
        }

        let mut loaded = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            loaded.push(joined??);
        }
        Ok(loaded)
    }

    async fn load_content(
        &self,
        requests: &[FragmentRequest],
    ) -> Result<(Vec<FragmentRequest>, Vec<ContentFailure>)> {
        let mut tasks = JoinSet::new();
        for request in requests {
            let loader = self.loader.clone();
            let request = request.clone();
            tasks.spawn(async move {
                let outcome = loader.load(&request).await;
                (request, outcome)
            });
        }

        let mut loaded = Vec::new();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (request, outcome) = joined?;
            match outcome {
                Ok(()) => loaded.push(request),
                Err(error) => {
                    tracing::error!("Content fragment {} failed: {}", request.url, error);
                    failures.push(ContentFailure {
                        request,
                        reason: error.to_string(),
                    });
                }
            }
        }
        Ok((loaded, failures))
    }

    /// Replace the visible page with a critical-error notice.
    fn render_failure(&self, error: &crate::utils::error::SitewireError) {
        let notice = format!(
            concat!(
                r#"<div class="critical-error">"#,
                "<h1>Something went wrong loading this page</h1>",
                "<p>{}</p>",
                "</div>"
            ),
            error
        );
        if self.dom.set_content(BODY_ID, &notice).is_err() {
            tracing::error!("Document has no body to render the failure notice into");
        }
    }
}

/// What the bootstrapper did, for operator logs and for callers that
/// need to keep the carousel alive.
#[derive(Debug)]
pub struct BootReport {
    pub structural: Vec<FragmentRequest>,
    pub content: Vec<FragmentRequest>,
    pub content_failures: Vec<ContentFailure>,
    pub carousel: Option<Arc<Carousel>>,
    pub duration: Duration,
}

impl BootReport {
    pub fn summary(&self) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();
        summary.insert(
            "structural_fragments".to_string(),
            serde_json::Value::from(self.structural.len()),
        );
        summary.insert(
            "content_fragments".to_string(),
            serde_json::Value::from(self.content.len()),
        );
        summary.insert(
            "content_failures".to_string(),
            serde_json::Value::from(self.content_failures.len()),
        );
        summary.insert(
            "carousel_slides".to_string(),
            serde_json::Value::from(
                self.carousel
                    .as_ref()
                    .map(|carousel| carousel.total_slides())
                    .unwrap_or(0),
            ),
        );
        summary.insert(
            "duration_ms".to_string(),
            serde_json::Value::from(self.duration.as_millis() as u64),
        );
        summary
    }
}
