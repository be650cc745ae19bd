use crate::core::Dom;
use crate::domain::ports::{DomEvent, EventKind};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Element id the carousel listens on for hover pause/resume.
pub const CAROUSEL_ID: &str = "carousel";
/// Element id of the strip that receives the horizontal offset.
pub const TRACK_ID: &str = "slides";
/// Class carried by each slide panel.
pub const SLIDE_CLASS: &str = "slide";

/// Default delay between autoplay ticks.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(4000);

/// One slide visible at a time; the strip is shifted left by
/// `index * 100%` of the container width, and the index wraps at both
/// ends.
pub struct Carousel {
    dom: Arc<dyn Dom>,
    total_slides: usize,
    interval: Duration,
    index: Mutex<usize>,
    autoplay: Mutex<Option<JoinHandle<()>>>,
    weak: Weak<Carousel>,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("total_slides", &self.total_slides)
            .field("interval", &self.interval)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Carousel {
    /// Wire the carousel against a document that already contains its
    /// markup. Returns `None` (with a warning) when the container, the
    /// slide strip or the slides are missing; a page without a working
    /// carousel is still a page.
    pub fn attach(dom: Arc<dyn Dom>, interval: Duration) -> Option<Arc<Self>> {
        if !dom.has_element(CAROUSEL_ID) || !dom.has_element(TRACK_ID) {
            tracing::warn!("Carousel markup not found in the document, skipping setup");
            return None;
        }
        let slides = dom.ids_with_class(SLIDE_CLASS);
        if slides.is_empty() {
            tracing::warn!("Carousel has no slides, skipping setup");
            return None;
        }

        let carousel = Arc::new_cyclic(|weak| Self {
            dom: Arc::clone(&dom),
            total_slides: slides.len(),
            interval,
            index: Mutex::new(0),
            autoplay: Mutex::new(None),
            weak: weak.clone(),
        });
        tracing::info!("Carousel initialized with {} slides", carousel.total_slides);

        carousel.apply_offset(0);
        carousel.start_autoplay();

        let paused = Arc::clone(&carousel);
        dom.add_listener(
            CAROUSEL_ID,
            EventKind::PointerEnter,
            Arc::new(move |_: &DomEvent| paused.stop_autoplay()),
        );
        let resumed = Arc::clone(&carousel);
        dom.add_listener(
            CAROUSEL_ID,
            EventKind::PointerLeave,
            Arc::new(move |_: &DomEvent| resumed.start_autoplay()),
        );

        Some(carousel)
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn current_index(&self) -> usize {
        *self.index.lock().unwrap()
    }

    /// Step the carousel. `1` moves forward, `-1` back; the index wraps
    /// past either end. Does nothing when the strip is gone or there are
    /// no slides.
    pub fn advance(&self, direction: i64) {
        if self.total_slides == 0 || !self.dom.has_element(TRACK_ID) {
            return;
        }

        let mut index = self.index.lock().unwrap();
        let total = self.total_slides as i64;
        let mut next = *index as i64 + direction;
        if next < 0 {
            next = total - 1;
        } else if next >= total {
            next = 0;
        }
        *index = next as usize;
        drop(index);

        self.apply_offset(next);
    }

    fn apply_offset(&self, index: i64) {
        let offset = -index * 100;
        self.dom
            .set_style(TRACK_ID, "transform", &format!("translateX({}%)", offset));
    }

    /// (Re)start the autoplay ticker. The previous ticker, if any, is
    /// cancelled first so two can never run at once.
    pub fn start_autoplay(&self) {
        self.stop_autoplay();

        let weak = self.weak.clone();
        let interval = self.interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first advance
            // happens one full interval later.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(carousel) = weak.upgrade() else { break };
                carousel.advance(1);
            }
        });
        *self.autoplay.lock().unwrap() = Some(handle);
    }

    /// Cancel the autoplay ticker. No-op when not running.
    pub fn stop_autoplay(&self) {
        if let Some(handle) = self.autoplay.lock().unwrap().take() {
            handle.abort();
        }
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay.lock().unwrap().is_some()
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.stop_autoplay();
    }
}
