//! Element lookup and the primitive DOM/media operations behind
//! `UiCommand`s.

use showreel_core::SiteConfig;
use showreel_protocol::{MediaTarget, Target};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlMediaElement, HtmlVideoElement};

const DUPLICATED_MARKER: &str = "data-duplicated";

pub fn query_one<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn same_node(a: &JsValue, b: &JsValue) -> bool {
    a == b
}

/// Render a `JsValue` error for logging.
pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Handles to every element the controllers address, resolved once at
/// startup. Missing elements stay `None`/empty; commands aimed at them are
/// dropped.
pub struct Dom {
    pub header: Option<Element>,
    pub hamburger: Option<Element>,
    pub nav_links: Option<Element>,
    pub modal: Option<Element>,
    pub modal_video: Option<HtmlVideoElement>,
    pub hero_video: Option<HtmlVideoElement>,
    pub videos: Vec<HtmlVideoElement>,
    pub reveals: Vec<Element>,
}

impl Dom {
    pub fn discover(document: &Document, config: &SiteConfig) -> Self {
        Self {
            header: query_one(document, &config.header.selector),
            hamburger: query_one(document, &config.shell.hamburger),
            nav_links: query_one(document, &config.shell.nav_links),
            modal: query_one(document, &config.shell.modal),
            modal_video: query_one(document, &config.shell.modal_video),
            hero_video: query_one(document, &config.shell.hero_video),
            videos: query_all(document, &config.media.selector),
            reveals: query_all(document, &config.reveal.selector),
        }
    }

    pub fn element(&self, target: Target) -> Option<&Element> {
        match target {
            Target::Header => self.header.as_ref(),
            Target::Hamburger => self.hamburger.as_ref(),
            Target::NavLinks => self.nav_links.as_ref(),
            Target::Modal => self.modal.as_ref(),
            Target::Reveal(id) => self.reveals.get(id.0 as usize),
        }
    }

    pub fn media(&self, target: MediaTarget) -> Option<&HtmlMediaElement> {
        let video = match target {
            MediaTarget::Tracked(id) => self.videos.get(id.0 as usize),
            MediaTarget::Modal => self.modal_video.as_ref(),
            MediaTarget::Hero => self.hero_video.as_ref(),
        }?;
        Some(&**video)
    }

    pub fn video_index(&self, target: &Element) -> Option<usize> {
        self.videos
            .iter()
            .position(|v| same_node(v.as_ref(), target.as_ref()))
    }

    pub fn reveal_index(&self, target: &Element) -> Option<usize> {
        self.reveals
            .iter()
            .position(|el| same_node(el.as_ref(), target.as_ref()))
    }
}

/// Append a copy of each marquee track's children so the CSS animation can
/// loop without a visible seam. Tracks already marked are skipped.
pub fn duplicate_marquee_tracks(document: &Document, selector: &str) -> Result<usize, JsValue> {
    let mut duplicated = 0;
    for track in query_all::<Element>(document, selector) {
        if track.has_attribute(DUPLICATED_MARKER) {
            continue;
        }
        let children = track.children();
        let originals: Vec<Element> = (0..children.length())
            .filter_map(|i| children.item(i))
            .collect();
        for child in originals {
            let copy = child.clone_node_with_deep(true)?;
            if let Some(copy) = copy.dyn_ref::<Element>() {
                copy.set_attribute("aria-hidden", "true")?;
            }
            track.append_child(&copy)?;
        }
        track.set_attribute(DUPLICATED_MARKER, "")?;
        duplicated += 1;
    }
    Ok(duplicated)
}
