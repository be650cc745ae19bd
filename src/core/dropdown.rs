use crate::core::Dom;
use crate::domain::ports::{DomEvent, EventKind};
use std::sync::Arc;

/// Class carried by every dropdown panel.
pub const DROPDOWN_CLASS: &str = "dropdown-content";
/// Class that makes a dropdown visible.
pub const OPEN_CLASS: &str = "show";
/// Class carried by elements allowed to open a dropdown.
pub const TRIGGER_CLASS: &str = "dropbtn";

/// Open the requested dropdown and close every other open one. Opening
/// an already-open dropdown closes it. Unknown ids only close the rest.
pub fn toggle_dropdown(dom: &dyn Dom, id: &str) {
    for other in dom.ids_with_class(DROPDOWN_CLASS) {
        if other != id && dom.has_class(&other, OPEN_CLASS) {
            dom.remove_class(&other, OPEN_CLASS);
        }
    }
    if dom.has_element(id) {
        dom.toggle_class(id, OPEN_CLASS);
    }
}

/// Close all open dropdowns whenever a pointer-down lands outside a
/// trigger element.
pub fn install_outside_close(dom: &Arc<dyn Dom>) {
    let document = Arc::clone(dom);
    dom.add_document_listener(
        EventKind::PointerDown,
        Arc::new(move |event: &DomEvent| {
            let on_trigger = event
                .target
                .as_deref()
                .map(|target| document.has_class(target, TRIGGER_CLASS))
                .unwrap_or(false);
            if on_trigger {
                return;
            }
            for id in document.ids_with_class(DROPDOWN_CLASS) {
                if document.has_class(&id, OPEN_CLASS) {
                    document.remove_class(&id, OPEN_CLASS);
                }
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dom::InMemoryDom;

    fn menu_dom() -> Arc<InMemoryDom> {
        let dom = Arc::new(InMemoryDom::with_containers(["header-placeholder"]));
        dom.set_content(
            "header-placeholder",
            concat!(
                r#"<button id="shop-btn" class="dropbtn"></button>"#,
                r#"<div id="shop-menu" class="dropdown-content"></div>"#,
                r#"<button id="help-btn" class="dropbtn"></button>"#,
                r#"<div id="help-menu" class="dropdown-content"></div>"#,
                r#"<div id="banner"></div>"#,
            ),
        )
        .unwrap();
        dom
    }

    #[test]
    fn toggling_opens_and_closes() {
        let dom = menu_dom();

        toggle_dropdown(dom.as_ref(), "shop-menu");
        assert!(dom.has_class("shop-menu", OPEN_CLASS));

        toggle_dropdown(dom.as_ref(), "shop-menu");
        assert!(!dom.has_class("shop-menu", OPEN_CLASS));
    }

    #[test]
    fn opening_one_closes_the_others() {
        let dom = menu_dom();

        toggle_dropdown(dom.as_ref(), "shop-menu");
        toggle_dropdown(dom.as_ref(), "help-menu");

        assert!(!dom.has_class("shop-menu", OPEN_CLASS));
        assert!(dom.has_class("help-menu", OPEN_CLASS));
    }

    #[test]
    fn unknown_id_still_closes_open_menus() {
        let dom = menu_dom();
        toggle_dropdown(dom.as_ref(), "shop-menu");

        toggle_dropdown(dom.as_ref(), "no-such-menu");
        assert!(!dom.has_class("shop-menu", OPEN_CLASS));
    }

    #[test]
    fn outside_pointer_down_closes_everything() {
        let dom = menu_dom();
        let document: Arc<dyn Dom> = dom.clone();
        install_outside_close(&document);

        toggle_dropdown(dom.as_ref(), "shop-menu");
        dom.dispatch_document(EventKind::PointerDown, Some("banner"));

        assert!(!dom.has_class("shop-menu", OPEN_CLASS));
    }

    #[test]
    fn pointer_down_on_a_trigger_leaves_menus_open() {
        let dom = menu_dom();
        let document: Arc<dyn Dom> = dom.clone();
        install_outside_close(&document);

        toggle_dropdown(dom.as_ref(), "shop-menu");
        dom.dispatch_document(EventKind::PointerDown, Some("help-btn"));

        assert!(dom.has_class("shop-menu", OPEN_CLASS));
    }

    #[test]
    fn targetless_pointer_down_closes_everything() {
        let dom = menu_dom();
        let document: Arc<dyn Dom> = dom.clone();
        install_outside_close(&document);

        toggle_dropdown(dom.as_ref(), "help-menu");
        dom.dispatch_document(EventKind::PointerDown, None);

        assert!(!dom.has_class("help-menu", OPEN_CLASS));
    }
}
