//! DOM event listeners and small element helpers

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

/// A listener that unregisters itself when dropped.
///
/// Scene-scoped listeners live in one of these and go away with the scene.
pub struct EventSubscription {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        if removed.is_err() {
            log::warn!("Failed to remove {} listener", self.event);
        }
    }
}

/// Register a listener for the lifetime of the page
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("Failed to add {} listener", event);
    }
    closure.forget();
}

/// Register a click handler on `#id`, if the element exists
pub fn on_click(document: &Document, id: &str, handler: impl FnMut(Event) + 'static) {
    match document.get_element_by_id(id) {
        Some(el) => listen(&el, "click", handler),
        None => log::debug!("No #{} element", id),
    }
}

/// Set the text of the first element matching `selector`
pub fn set_text(document: &Document, selector: &str, text: &str) {
    if let Some(el) = document.query_selector(selector).ok().flatten() {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Show or hide an element through the `hidden` class
pub fn set_visible(el: &Element, visible: bool) {
    let _ = el.class_list().toggle_with_force("hidden", !visible);
}

pub fn set_visible_by_id(document: &Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        set_visible(&el, visible);
    }
}
