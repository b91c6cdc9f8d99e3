//! Wires the core controllers to browser events and applies the commands
//! they return.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use showreel_core::PlaybackError;
use showreel_core::config::SiteConfig;
use showreel_core::header::HeaderController;
use showreel_core::media::{MediaManager, PageVisibility, VisibilityEntry};
use showreel_core::header::HeaderState;
use showreel_core::shell::{
    HeroVideo, InteractionLatch, MenuToggle, RevealTracker, VideoModal, modal,
};
use showreel_protocol::{
    MediaTarget, PlayAttempt, RevealId, ScrollSample, TimerToken, UiCommand, VideoId,
};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, DomException, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::dom::{self, Dom};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

fn classify_rejection(err: &JsValue) -> PlaybackError {
    match err.dyn_ref::<DomException>() {
        Some(exception) => PlaybackError::from_dom_name(&exception.name(), &exception.message()),
        None => PlaybackError::Media(dom::describe(err)),
    }
}

fn entries_of(entries: &Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
}

struct Controllers {
    header: Option<HeaderController>,
    media: MediaManager,
    menu: MenuToggle,
    modal: VideoModal,
    reveal: RevealTracker,
    hero: HeroVideo,
    interaction: InteractionLatch,
}

/// The mounted page. Lives for the page's lifetime; every listener holds a
/// clone of the `Rc`.
pub struct Site {
    window: Window,
    document: Document,
    config: SiteConfig,
    dom: Dom,
    controllers: RefCell<Controllers>,
    /// Outstanding frame callback for the header's scroll gate.
    frame: RefCell<Option<AnimationFrame>>,
    /// The armed touch/click retry pair, empty when disarmed.
    retry_listeners: RefCell<Vec<EventListener>>,
    listeners: RefCell<Vec<EventListener>>,
    reveal_observer: RefCell<Option<IntersectionObserver>>,
    observers: RefCell<Vec<(IntersectionObserver, ObserverCallback)>>,
}

impl Site {
    pub fn mount(
        window: Window,
        document: Document,
        config: SiteConfig,
    ) -> Result<Rc<Self>, JsValue> {
        let dom = Dom::discover(&document, &config);

        let header = dom.header.as_ref().map(|_| {
            let offset = ScrollSample::from_offset(window.scroll_y().unwrap_or(0.0), 0.0).y;
            HeaderController::new(
                config.header.clone(),
                offset,
                prefers_reduced_motion(&window),
            )
        });

        let mut media = MediaManager::new();
        for video in &dom.videos {
            let deferred = video.get_attribute(&config.media.source_attribute);
            media.register(deferred, !video.src().is_empty());
        }

        let mut reveal = RevealTracker::new();
        for _ in &dom.reveals {
            reveal.register();
        }

        let expanded = dom
            .hamburger
            .as_ref()
            .and_then(|h| h.get_attribute("aria-expanded"))
            .is_some_and(|v| v == "true");
        let modal = VideoModal::new(dom.modal_video.is_some());

        let site = Rc::new(Self {
            window,
            document,
            config,
            dom,
            controllers: RefCell::new(Controllers {
                header,
                media,
                menu: MenuToggle::new(expanded),
                modal,
                reveal,
                hero: HeroVideo::new(),
                interaction: InteractionLatch::new(),
            }),
            frame: RefCell::new(None),
            retry_listeners: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            reveal_observer: RefCell::new(None),
            observers: RefCell::new(Vec::new()),
        });

        site.bind_header();
        site.bind_menu();
        site.bind_modal();
        site.bind_reveal()?;
        site.bind_media()?;
        site.start_hero();

        match dom::duplicate_marquee_tracks(&site.document, &site.config.shell.marquee_tracks) {
            Ok(tracks) => debug!(tracks, "marquee tracks duplicated"),
            Err(err) => warn!(error = %dom::describe(&err), "marquee duplication failed"),
        }

        info!(
            header = site.dom.header.is_some(),
            videos = site.dom.videos.len(),
            reveals = site.dom.reveals.len(),
            "showreel mounted"
        );
        Ok(site)
    }

    /// Header state, or `None` when the page has no header and scroll
    /// tracking is off.
    pub fn header_state(&self) -> Option<HeaderState> {
        self.controllers
            .borrow()
            .header
            .as_ref()
            .map(HeaderController::state)
    }

    /// Whether the touch/click retry pair is currently installed.
    pub fn interaction_armed(&self) -> bool {
        !self.retry_listeners.borrow().is_empty()
    }

    fn page(&self) -> PageVisibility {
        PageVisibility {
            hidden: self.document.hidden(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Run one controller handler and apply what it returns. The borrow is
    /// released before any command runs.
    fn dispatch(self: &Rc<Self>, handler: impl FnOnce(&mut Controllers) -> Vec<UiCommand>) {
        let commands = handler(&mut self.controllers.borrow_mut());
        for command in commands {
            self.apply(command);
        }
    }

    /// Carry out one command against the page.
    pub fn apply(self: &Rc<Self>, command: UiCommand) {
        match command {
            UiCommand::AddClass { target, class } => {
                if let Some(el) = self.dom.element(target)
                    && let Err(err) = el.class_list().add_1(class.class_name())
                {
                    warn!(?target, error = %dom::describe(&err), "add class failed");
                }
            }
            UiCommand::RemoveClass { target, class } => {
                if let Some(el) = self.dom.element(target)
                    && let Err(err) = el.class_list().remove_1(class.class_name())
                {
                    warn!(?target, error = %dom::describe(&err), "remove class failed");
                }
            }
            UiCommand::SetAria {
                target,
                attribute,
                value,
            } => {
                if let Some(el) = self.dom.element(target) {
                    let value = if value { "true" } else { "false" };
                    if let Err(err) = el.set_attribute(attribute.attribute_name(), value) {
                        warn!(?target, error = %dom::describe(&err), "set attribute failed");
                    }
                }
            }
            UiCommand::Unobserve { target } => {
                if let (Some(observer), Some(el)) =
                    (self.reveal_observer.borrow().as_ref(), self.dom.element(target))
                {
                    observer.unobserve(el);
                }
            }
            UiCommand::ScheduleTimer { delay_ms, token } => {
                let site = Rc::clone(self);
                Timeout::new(delay_ms, move || site.on_timer(token)).forget();
            }
            UiCommand::AssignSource { media, url } => {
                if let Some(el) = self.dom.media(media) {
                    el.set_src(&url);
                }
            }
            UiCommand::Rewind { media } => {
                if let Some(el) = self.dom.media(media) {
                    el.set_current_time(0.0);
                }
            }
            UiCommand::Play { media, attempt } => self.play(media, attempt),
            UiCommand::Pause { media } => {
                if let Some(el) = self.dom.media(media)
                    && let Err(err) = el.pause()
                {
                    warn!(?media, error = %dom::describe(&err), "pause failed");
                }
            }
            UiCommand::ArmInteractionRetry => self.arm_interaction_retry(),
        }
    }

    fn bind_header(self: &Rc<Self>) {
        if self.dom.header.is_none() {
            debug!("no header element, scroll tracking disabled");
            return;
        }
        let site = Rc::clone(self);
        self.listen(EventListener::new(&self.window, "scroll", move |_| {
            site.on_scroll();
        }));
    }

    fn on_scroll(self: &Rc<Self>) {
        let y = self.window.scroll_y().unwrap_or(0.0);
        let sample = ScrollSample::from_offset(y, self.now_ms());
        let needs_frame = self
            .controllers
            .borrow_mut()
            .header
            .as_mut()
            .is_some_and(|header| header.on_scroll(sample));
        if needs_frame {
            let site = Rc::clone(self);
            let handle = request_animation_frame(move |_| site.on_frame());
            *self.frame.borrow_mut() = Some(handle);
        }
    }

    fn on_frame(self: &Rc<Self>) {
        self.frame.borrow_mut().take();
        self.dispatch(|c| c.header.as_mut().map(HeaderController::on_frame).unwrap_or_default());
    }

    fn on_timer(self: &Rc<Self>, token: TimerToken) {
        self.dispatch(|c| {
            c.header
                .as_mut()
                .map(|header| header.on_timer(token))
                .unwrap_or_default()
        });
    }

    fn bind_menu(self: &Rc<Self>) {
        let Some(hamburger) = self.dom.hamburger.as_ref() else {
            return;
        };
        let site = Rc::clone(self);
        self.listen(EventListener::new(hamburger, "click", move |_| {
            site.dispatch(|c| c.menu.toggle());
        }));
    }

    fn bind_modal(self: &Rc<Self>) {
        if self.dom.modal.is_none() {
            debug!("no video modal on this page");
            return;
        }

        let shell = &self.config.shell;
        let mut openers: Vec<Element> = dom::query_all(&self.document, &shell.modal_triggers);
        let cards: Vec<Element> = dom::query_all(&self.document, &shell.video_cards);
        openers.extend(cards.iter().cloned());
        for opener in &openers {
            let site = Rc::clone(self);
            self.listen(EventListener::new(opener, "click", move |_| {
                site.dispatch(|c| c.modal.open());
            }));
        }

        for card in &cards {
            let site = Rc::clone(self);
            self.listen(EventListener::new_with_options(
                card,
                "keypress",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                        return;
                    };
                    if modal::is_activation_key(&key) {
                        event.prevent_default();
                        site.dispatch(|c| c.modal.open());
                    }
                },
            ));
        }

        for selector in [&shell.modal_close, &shell.modal_overlay] {
            if let Some(closer) = dom::query_one::<Element>(&self.document, selector) {
                let site = Rc::clone(self);
                self.listen(EventListener::new(&closer, "click", move |_| {
                    site.dispatch(|c| c.modal.close());
                }));
            }
        }

        let site = Rc::clone(self);
        self.listen(EventListener::new(&self.document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                let key = event.key();
                site.dispatch(|c| c.modal.on_key(&key));
            }
        }));
    }

    fn bind_reveal(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.dom.reveals.is_empty() {
            return Ok(());
        }
        let site = Rc::clone(self);
        let callback = ObserverCallback::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries_of(&entries) {
                let Some(index) = site.dom.reveal_index(&entry.target()) else {
                    continue;
                };
                let visibility = VisibilityEntry::from(entry.is_intersecting());
                site.dispatch(|c| {
                    c.reveal
                        .on_intersection(RevealId(index as u32), visibility)
                });
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(self.config.reveal.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for el in &self.dom.reveals {
            observer.observe(el);
        }
        *self.reveal_observer.borrow_mut() = Some(observer.clone());
        self.observers.borrow_mut().push((observer, callback));
        Ok(())
    }

    fn start_hero(self: &Rc<Self>) {
        if self.dom.hero_video.is_some() {
            self.dispatch(|c| c.hero.start());
        }
    }

    fn bind_media(self: &Rc<Self>) -> Result<(), JsValue> {
        if self.dom.videos.is_empty() {
            debug!("no background videos on this page");
            return Ok(());
        }

        let site = Rc::clone(self);
        let callback = ObserverCallback::new(move |entries: Array, _: IntersectionObserver| {
            let page = site.page();
            for entry in entries_of(&entries) {
                let Some(index) = site.dom.video_index(&entry.target()) else {
                    continue;
                };
                let visibility = VisibilityEntry::from(entry.is_intersecting());
                site.dispatch(|c| {
                    c.media
                        .on_intersection(VideoId(index as u32), visibility, page)
                });
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&self.config.media.root_margin);
        init.set_threshold(&JsValue::from_f64(self.config.media.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for video in &self.dom.videos {
            observer.observe(video);
        }
        self.observers.borrow_mut().push((observer, callback));

        let site = Rc::clone(self);
        self.listen(EventListener::new(
            &self.document,
            "visibilitychange",
            move |_| {
                let page = site.page();
                site.dispatch(|c| c.media.on_page_visibility(page));
            },
        ));

        for (index, video) in self.dom.videos.iter().enumerate() {
            let site = Rc::clone(self);
            let element = video.clone();
            self.listen(EventListener::new(video, "error", move |_| {
                let message = element.error().map_or_else(
                    || "unknown media error".to_string(),
                    |err| format!("media error code {}", err.code()),
                );
                site.dispatch(|c| c.media.on_media_error(VideoId(index as u32), &message));
            }));
        }
        Ok(())
    }

    fn play(self: &Rc<Self>, media: MediaTarget, attempt: PlayAttempt) {
        let Some(el) = self.dom.media(media) else {
            return;
        };
        match el.play() {
            Ok(promise) => {
                let site = Rc::clone(self);
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        site.on_play_rejected(media, attempt, &classify_rejection(&err));
                    }
                });
            }
            Err(err) => self.on_play_rejected(media, attempt, &classify_rejection(&err)),
        }
    }

    fn on_play_rejected(
        self: &Rc<Self>,
        media: MediaTarget,
        attempt: PlayAttempt,
        error: &PlaybackError,
    ) {
        self.dispatch(|c| match media {
            MediaTarget::Tracked(id) => c.media.on_play_rejected(id, attempt, error),
            MediaTarget::Hero => c.hero.on_play_rejected(attempt, error),
            MediaTarget::Modal => {
                debug!(%error, "modal video did not start");
                Vec::new()
            }
        });
    }

    /// Install the one-shot touch/click pair. Whichever fires first retries
    /// every armed video and drops both listeners.
    fn arm_interaction_retry(self: &Rc<Self>) {
        if !self.controllers.borrow_mut().interaction.arm() {
            return;
        }
        let mut armed = self.retry_listeners.borrow_mut();
        for event in ["touchstart", "click"] {
            let site = Rc::clone(self);
            armed.push(EventListener::once(&self.document, event, move |_| {
                site.on_user_interaction();
            }));
        }
    }

    fn on_user_interaction(self: &Rc<Self>) {
        if !self.controllers.borrow_mut().interaction.fire() {
            return;
        }
        let fired = std::mem::take(&mut *self.retry_listeners.borrow_mut());
        self.dispatch(|c| {
            let mut commands = c.media.on_user_interaction();
            commands.extend(c.hero.on_user_interaction());
            commands
        });
        drop(fired);
    }
}
