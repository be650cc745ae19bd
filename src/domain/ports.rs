use crate::domain::model::FragmentRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Id of the root element every document provides.
pub const BODY_ID: &str = "body";

/// Pointer events the page glue reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerLeave,
    PointerDown,
}

/// A dispatched pointer event. `target` is the id of the element the
/// pointer was over, when the dispatcher knows it.
#[derive(Debug, Clone, Default)]
pub struct DomEvent {
    pub target: Option<String>,
}

/// Callback registered against an element or the whole document.
pub type Listener = Arc<dyn Fn(&DomEvent) + Send + Sync>;

/// Resolves a URL to its textual body. Non-success statuses and
/// transport failures are errors; nothing is retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// The document surface the page glue mutates. Deliberately narrow:
/// containers are addressed by id, and only the operations the loaders
/// and widgets need are exposed.
pub trait Dom: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    /// Replace the inner content of `id`. Elements recorded for the
    /// previous content are dropped before the new fragment is taken in.
    /// Errors when the container does not exist.
    fn set_content(&self, id: &str, html: &str) -> Result<()>;

    fn content(&self, id: &str) -> Option<String>;

    /// Class operations are no-ops on unknown ids.
    fn add_class(&self, id: &str, class: &str);
    fn remove_class(&self, id: &str, class: &str);
    /// Returns the class state after the toggle.
    fn toggle_class(&self, id: &str, class: &str) -> bool;
    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_style(&self, id: &str, property: &str, value: &str);
    fn style(&self, id: &str, property: &str) -> Option<String>;

    /// Ids of every element carrying `class`, in document order.
    fn ids_with_class(&self, class: &str) -> Vec<String>;

    fn add_listener(&self, id: &str, event: EventKind, listener: Listener);
    fn add_document_listener(&self, event: EventKind, listener: Listener);
}

/// Which fragments make up the page and how the carousel behaves.
pub trait ConfigProvider: Send + Sync {
    /// Fragments the page cannot render without; loaded first, together.
    fn structure_fragments(&self) -> &[FragmentRequest];

    /// The carousel fragment, when the page has one.
    fn carousel_fragment(&self) -> Option<&FragmentRequest>;

    /// Remaining content; loaded last, failures are non-fatal.
    fn content_fragments(&self) -> &[FragmentRequest];

    fn autoplay_interval(&self) -> Duration;
}
