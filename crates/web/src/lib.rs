#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod site;

#[cfg(target_arch = "wasm32")]
pub use dom::duplicate_marquee_tracks;
#[cfg(target_arch = "wasm32")]
pub use site::Site;

// WASM entry point
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo::events::EventListener;
#[cfg(target_arch = "wasm32")]
use showreel_core::SiteConfig;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Window};

#[cfg(target_arch = "wasm32")]
const CONFIG_ELEMENT_ID: &str = "showreel-config";

#[cfg(target_arch = "wasm32")]
thread_local! {
    static SITE: RefCell<Option<Rc<Site>>> = const { RefCell::new(None) };
}

/// Read the optional `<script type="application/json" id="showreel-config">`
/// blob. Anything unreadable falls back to the defaults.
#[cfg(target_arch = "wasm32")]
fn load_config(document: &Document) -> SiteConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&text).unwrap_or_else(|e| {
        web_sys::console::error_1(&format!("showreel: ignoring config: {e}").into());
        SiteConfig::default()
    })
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;

    if document.ready_state() != "loading" {
        return mount(window, document);
    }
    let target = document.clone();
    EventListener::once(&target, "DOMContentLoaded", move |_| {
        if let Err(e) = mount(window, document) {
            web_sys::console::error_2(&"showreel: mount failed".into(), &e);
        }
    })
    .forget();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn mount(window: Window, document: Document) -> Result<(), JsValue> {
    let config = load_config(&document);
    logging::init(&config.log_filter);

    let site = Site::mount(window, document, config)?;
    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}

/// Whether the site controllers are mounted on this page.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn is_mounted() -> bool {
    SITE.with(|slot| slot.borrow().is_some())
}
