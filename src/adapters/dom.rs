use crate::domain::ports::{Dom, DomEvent, EventKind, Listener, BODY_ID};
use crate::utils::error::{Result, SitewireError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
struct ElementRecord {
    id: String,
    parent: Option<String>,
    classes: Vec<String>,
    styles: HashMap<String, String>,
    content: String,
}

/// An id-addressed document model: containers, classes, inline styles
/// and pointer listeners, nothing more.
///
/// Injected fragments are scanned for addressable elements (anything
/// carrying an `id` or `class` attribute). The scan is flat: every
/// element found in a fragment is recorded as a direct child of the
/// container it was injected into. Elements with classes but no id get
/// a synthetic id so class queries can still address them.
pub struct InMemoryDom {
    elements: Mutex<Vec<ElementRecord>>,
    listeners: Mutex<HashMap<(String, EventKind), Vec<Listener>>>,
    document_listeners: Mutex<HashMap<EventKind, Vec<Listener>>>,
}

impl Default for InMemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDom {
    pub fn new() -> Self {
        Self {
            elements: Mutex::new(vec![ElementRecord {
                id: BODY_ID.to_string(),
                ..Default::default()
            }]),
            listeners: Mutex::new(HashMap::new()),
            document_listeners: Mutex::new(HashMap::new()),
        }
    }

    /// A document holding `body` plus one empty container per id, the
    /// shell a static page ships before any fragment arrives.
    pub fn with_containers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dom = Self::new();
        {
            let mut elements = dom.elements.lock().unwrap();
            for id in ids {
                elements.push(ElementRecord {
                    id: id.into(),
                    parent: Some(BODY_ID.to_string()),
                    ..Default::default()
                });
            }
        }
        dom
    }

    /// Simulate a pointer event on one element.
    pub fn dispatch(&self, id: &str, event: EventKind) {
        // Handlers are cloned out before invocation so they can mutate
        // the document or (de)register listeners without deadlocking.
        let handlers: Vec<Listener> = {
            let listeners = self.listeners.lock().unwrap();
            listeners
                .get(&(id.to_string(), event))
                .cloned()
                .unwrap_or_default()
        };
        let dom_event = DomEvent {
            target: Some(id.to_string()),
        };
        for handler in handlers {
            handler(&dom_event);
        }
    }

    /// Simulate a document-level pointer event, optionally over `target`.
    pub fn dispatch_document(&self, event: EventKind, target: Option<&str>) {
        let handlers: Vec<Listener> = {
            let listeners = self.document_listeners.lock().unwrap();
            listeners.get(&event).cloned().unwrap_or_default()
        };
        let dom_event = DomEvent {
            target: target.map(str::to_string),
        };
        for handler in handlers {
            handler(&dom_event);
        }
    }

    fn remove_descendants(elements: &mut Vec<ElementRecord>, root: &str) {
        let mut doomed: Vec<String> = vec![root.to_string()];
        let mut index = 0;
        while index < doomed.len() {
            let parent = doomed[index].clone();
            for element in elements.iter() {
                if element.parent.as_deref() == Some(parent.as_str()) {
                    doomed.push(element.id.clone());
                }
            }
            index += 1;
        }
        elements.retain(|element| element.id == root || !doomed.contains(&element.id));
    }

    fn scan_fragment(elements: &mut Vec<ElementRecord>, container: &str, html: &str) {
        let tag_re = Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)([^>]*)>").unwrap();
        let id_re = Regex::new(r#"\bid\s*=\s*"([^"]*)""#).unwrap();
        let class_re = Regex::new(r#"\bclass\s*=\s*"([^"]*)""#).unwrap();

        let mut anonymous = 0usize;
        for captures in tag_re.captures_iter(html) {
            let attrs = captures.get(2).map(|m| m.as_str()).unwrap_or("");
            let id = id_re.captures(attrs).map(|c| c[1].to_string());
            let classes: Vec<String> = class_re
                .captures(attrs)
                .map(|c| c[1].split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();

            if id.is_none() && classes.is_empty() {
                continue;
            }
            let id = id.unwrap_or_else(|| {
                anonymous += 1;
                format!("{}-el-{}", container, anonymous)
            });
            // First registration wins, matching getElementById semantics.
            if elements.iter().any(|element| element.id == id) {
                continue;
            }
            elements.push(ElementRecord {
                id,
                parent: Some(container.to_string()),
                classes,
                ..Default::default()
            });
        }
    }
}

impl Dom for InMemoryDom {
    fn has_element(&self, id: &str) -> bool {
        self.elements.lock().unwrap().iter().any(|e| e.id == id)
    }

    fn set_content(&self, id: &str, html: &str) -> Result<()> {
        let mut elements = self.elements.lock().unwrap();
        if !elements.iter().any(|e| e.id == id) {
            return Err(SitewireError::MissingContainer { id: id.to_string() });
        }
        Self::remove_descendants(&mut elements, id);
        if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
            element.content = html.to_string();
        }
        Self::scan_fragment(&mut elements, id, html);
        Ok(())
    }

    fn content(&self, id: &str) -> Option<String> {
        self.elements
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.content.clone())
    }

    fn add_class(&self, id: &str, class: &str) {
        let mut elements = self.elements.lock().unwrap();
        if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        let mut elements = self.elements.lock().unwrap();
        if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
            element.classes.retain(|c| c != class);
        }
    }

    fn toggle_class(&self, id: &str, class: &str) -> bool {
        let mut elements = self.elements.lock().unwrap();
        match elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                if let Some(position) = element.classes.iter().position(|c| c == class) {
                    element.classes.remove(position);
                    false
                } else {
                    element.classes.push(class.to_string());
                    true
                }
            }
            None => false,
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_style(&self, id: &str, property: &str, value: &str) {
        let mut elements = self.elements.lock().unwrap();
        if let Some(element) = elements.iter_mut().find(|e| e.id == id) {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.elements
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.styles.get(property).cloned())
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.classes.iter().any(|c| c == class))
            .map(|e| e.id.clone())
            .collect()
    }

    fn add_listener(&self, id: &str, event: EventKind, listener: Listener) {
        if !self.has_element(id) {
            tracing::warn!("Listener target #{} does not exist, dropping registration", id);
            return;
        }
        self.listeners
            .lock()
            .unwrap()
            .entry((id.to_string(), event))
            .or_default()
            .push(listener);
    }

    fn add_document_listener(&self, event: EventKind, listener: Listener) {
        self.document_listeners
            .lock()
            .unwrap()
            .entry(event)
            .or_default()
            .push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn shell_containers_exist_and_start_empty() {
        let dom = InMemoryDom::with_containers(["header-placeholder", "footer-placeholder"]);

        assert!(dom.has_element(BODY_ID));
        assert!(dom.has_element("header-placeholder"));
        assert!(dom.has_element("footer-placeholder"));
        assert_eq!(dom.content("header-placeholder").unwrap(), "");
        assert!(!dom.has_element("carousel"));
    }

    #[test]
    fn set_content_registers_fragment_elements() {
        let dom = InMemoryDom::with_containers(["carousel-placeholder"]);
        dom.set_content(
            "carousel-placeholder",
            r#"<div id="carousel"><div id="slides"><div class="slide"></div><div class="slide"></div></div></div>"#,
        )
        .unwrap();

        assert!(dom.has_element("carousel"));
        assert!(dom.has_element("slides"));
        assert_eq!(dom.ids_with_class("slide").len(), 2);
    }

    #[test]
    fn set_content_replaces_previous_children() {
        let dom = InMemoryDom::with_containers(["main"]);
        dom.set_content("main", r#"<div id="old"><span class="slide"></span></div>"#)
            .unwrap();
        dom.set_content("main", r#"<div id="new"></div>"#).unwrap();

        assert!(!dom.has_element("old"));
        assert!(dom.ids_with_class("slide").is_empty());
        assert!(dom.has_element("new"));
    }

    #[test]
    fn set_content_on_unknown_container_fails() {
        let dom = InMemoryDom::new();
        let result = dom.set_content("nowhere", "<p>hi</p>");
        assert!(matches!(
            result,
            Err(SitewireError::MissingContainer { .. })
        ));
    }

    #[test]
    fn replacing_body_drops_the_whole_shell() {
        let dom = InMemoryDom::with_containers(["header-placeholder"]);
        dom.set_content("header-placeholder", r#"<nav id="menu"></nav>"#)
            .unwrap();

        dom.set_content(BODY_ID, "<h1>error</h1>").unwrap();

        assert!(!dom.has_element("header-placeholder"));
        assert!(!dom.has_element("menu"));
        assert_eq!(dom.content(BODY_ID).unwrap(), "<h1>error</h1>");
    }

    #[test]
    fn class_operations_round_trip() {
        let dom = InMemoryDom::with_containers(["menu"]);

        assert!(!dom.has_class("menu", "show"));
        dom.add_class("menu", "show");
        assert!(dom.has_class("menu", "show"));
        // Adding twice keeps a single entry.
        dom.add_class("menu", "show");
        dom.remove_class("menu", "show");
        assert!(!dom.has_class("menu", "show"));

        assert!(dom.toggle_class("menu", "show"));
        assert!(!dom.toggle_class("menu", "show"));
        assert!(!dom.has_class("menu", "show"));
    }

    #[test]
    fn styles_are_stored_per_property() {
        let dom = InMemoryDom::with_containers(["slides"]);
        dom.set_style("slides", "transform", "translateX(-100%)");

        assert_eq!(
            dom.style("slides", "transform").unwrap(),
            "translateX(-100%)"
        );
        assert!(dom.style("slides", "opacity").is_none());
    }

    #[test]
    fn listeners_fire_on_dispatch() {
        let dom = InMemoryDom::with_containers(["carousel"]);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        dom.add_listener(
            "carousel",
            EventKind::PointerEnter,
            Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        dom.dispatch("carousel", EventKind::PointerEnter);
        dom.dispatch("carousel", EventKind::PointerLeave);
        dom.dispatch("elsewhere", EventKind::PointerEnter);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn document_listeners_receive_the_target() {
        let dom = InMemoryDom::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        dom.add_document_listener(
            EventKind::PointerDown,
            Arc::new(move |event| {
                sink.lock().unwrap().push(event.target.clone());
            }),
        );

        dom.dispatch_document(EventKind::PointerDown, Some("menu-btn"));
        dom.dispatch_document(EventKind::PointerDown, None);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[Some("menu-btn".to_string()), None]);
    }
}
