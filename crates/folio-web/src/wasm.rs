#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: the browser host for [`Page`].
//!
//! The host discovers the page once, translates DOM events into
//! [`Signal`]s, and applies the returned [`Effect`]s to live elements.
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    ClickSignal, Effect, Key, KeySignal, LayoutProbe, NodeId, PreferenceStore, SectionGeometry,
    Signal, SignalKind,
};
use folio_runtime::Page;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement,
    KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage, Window,
};

use crate::discover::{Discovered, FoundLink, fragment_target, parse_config, selector};
use crate::error::WebHostError;
use crate::redeliver::must_redeliver;
use crate::registry::ElementRegistry;

/// Global installed by the email relay's client script.
const RELAY_GLOBAL: &str = "emailjs";

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn js_error(value: JsValue) -> WebHostError {
    WebHostError::Js(describe(&value))
}

impl From<WebHostError> for JsValue {
    fn from(err: WebHostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// ── Host capabilities ──

struct DomProbe<'a> {
    window: &'a Window,
    registry: &'a ElementRegistry<Element>,
}

impl LayoutProbe for DomProbe<'_> {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn measure(&self, node: NodeId) -> Option<SectionGeometry> {
        let element = self.registry.get(node)?.dyn_ref::<HtmlElement>()?;
        if !element.is_connected() {
            return None;
        }
        Some(SectionGeometry::new(
            f64::from(element.offset_top()),
            f64::from(element.offset_height()),
        ))
    }

    fn client_top(&self, node: NodeId) -> Option<f64> {
        self.registry
            .get(node)
            .map(|element| element.get_bounding_client_rect().top())
    }
}

struct LocalStorage(Option<Storage>);

impl LocalStorage {
    fn open(window: &Window) -> Self {
        Self(window.local_storage().ok().flatten())
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.0 else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            tracing::warn!(target: "folio.web", key, error = %describe(&err), "preference not saved");
        }
    }
}

// ── Discovery ──

fn query_all(document: &Document, sel: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(sel) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn discover(document: &Document) -> Result<Discovered<Element>, WebHostError> {
    let body = document.body().ok_or(WebHostError::MissingGlobal("body"))?;
    let mut found = Discovered::new(Element::from(body));
    found.sections = query_all(document, selector::SECTIONS)
        .into_iter()
        .map(|element| {
            let id = element.id();
            (element, id)
        })
        .collect();
    found.nav_links = query_all(document, selector::NAV_LINKS)
        .into_iter()
        .map(|element| {
            let href = element.get_attribute("href").unwrap_or_default();
            let target = fragment_target(&href).and_then(|id| document.get_element_by_id(id));
            FoundLink {
                id: element.id(),
                classes: element.class_name(),
                target,
                href,
                element,
            }
        })
        .collect();
    found.theme_toggle = document.get_element_by_id(selector::THEME_TOGGLE_ID);
    found.hamburger = document.get_element_by_id(selector::HAMBURGER_ID);
    found.nav_menu = document.get_element_by_id(selector::NAV_MENU_ID);
    found.resume_button = document.get_element_by_id(selector::RESUME_BUTTON_ID);
    found.resume_dropdown = document.get_element_by_id(selector::RESUME_DROPDOWN_ID);
    found.dropdown_items = query_all(document, selector::DROPDOWN_ITEMS);
    found.project_cards = query_all(document, selector::PROJECT_CARDS);
    found.contact_form = document.get_element_by_id(selector::CONTACT_FORM_ID);
    Ok(found)
}

// ── Host state ──

struct Listener {
    kind: SignalKind,
    target: EventTarget,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn detach(&self) {
        let Some(event_type) = self.kind.dom_event() else {
            return;
        };
        let _ = self
            .target
            .remove_event_listener_with_callback(event_type, self.callback.as_ref().unchecked_ref());
    }
}

struct Host {
    window: Window,
    registry: ElementRegistry<Element>,
    page: Page,
    listeners: Vec<Listener>,
    /// Detached listeners. The dispatch that released one may still be
    /// running inside its closure, so they are never dropped mid-dispatch.
    released: Vec<Listener>,
}

type Shared = Rc<RefCell<Host>>;

impl Host {
    fn release(&mut self, kind: SignalKind) {
        let (released, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.listeners)
            .into_iter()
            .partition(|listener| listener.kind == kind);
        self.listeners = kept;
        for listener in released {
            listener.detach();
            tracing::debug!(target: "folio.web", signal = kind.label(), "listener released");
            self.released.push(listener);
        }
    }
}

fn mount(config_json: Option<&str>) -> Result<Shared, WebHostError> {
    let window = web_sys::window().ok_or(WebHostError::MissingGlobal("window"))?;
    let document = window
        .document()
        .ok_or(WebHostError::MissingGlobal("document"))?;
    let config = parse_config(config_json)?;

    let mut registry = ElementRegistry::new();
    let outline = discover(&document)?.into_outline(&mut registry);
    let (page, effects) = {
        let probe = DomProbe {
            window: &window,
            registry: &registry,
        };
        Page::mount(&outline, config, &probe, &LocalStorage::open(&window))?
    };

    let shared = Rc::new(RefCell::new(Host {
        window: window.clone(),
        registry,
        page,
        listeners: Vec::new(),
        released: Vec::new(),
    }));
    {
        let mut host = shared.borrow_mut();
        apply(&shared, &mut host, effects, None);
    }
    listen(&shared, &window, &document)?;

    // The module may load after the page did.
    if document.ready_state() == "complete" {
        deliver(&shared, Signal::Load, None);
    }
    Ok(shared)
}

fn listen(shared: &Shared, window: &Window, document: &Document) -> Result<(), WebHostError> {
    let kinds = shared.borrow().page.subscriptions();
    let mut listeners = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let Some(event_type) = kind.dom_event() else {
            continue;
        };
        let target = match kind {
            SignalKind::Scroll | SignalKind::Resize | SignalKind::Load => {
                EventTarget::from(window.clone())
            }
            _ => EventTarget::from(document.clone()),
        };
        let handler = Rc::clone(shared);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Some(signal) = translate(&handler, kind, &event) {
                deliver(&handler, signal, Some(&event));
            }
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(kind.is_passive());
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_type,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(js_error)?;
        listeners.push(Listener {
            kind,
            target,
            callback,
        });
    }
    shared.borrow_mut().listeners = listeners;
    Ok(())
}

// ── Signals in, effects out ──

fn translate(shared: &Shared, kind: SignalKind, event: &Event) -> Option<Signal> {
    match kind {
        SignalKind::Scroll => Some(Signal::Scroll),
        SignalKind::Resize => Some(Signal::Resize),
        SignalKind::Load => Some(Signal::Load),
        SignalKind::Click | SignalKind::KeyDown | SignalKind::Submit => {
            let target = event.target()?.dyn_into::<Element>().ok()?;
            let host = shared.try_borrow().ok()?;
            let path = || {
                host.registry
                    .path(std::iter::successors(Some(target.clone()), |e| e.parent_element()))
            };
            match kind {
                SignalKind::Click => {
                    let click = ClickSignal::new(path());
                    Some(Signal::Click(if target.tag_name().eq_ignore_ascii_case("a") {
                        click.on_anchor()
                    } else {
                        click
                    }))
                }
                SignalKind::KeyDown => {
                    let key = event
                        .dyn_ref::<KeyboardEvent>()
                        .map_or(Key::Other, |k| Key::from_dom(&k.key()));
                    Some(Signal::KeyDown(KeySignal::new(key).at(path())))
                }
                _ => host
                    .registry
                    .lookup(&target)
                    .map(|form| Signal::Submit { form }),
            }
        }
        SignalKind::Timer | SignalKind::RelayOutcome => None,
    }
}

/// Deliver `signal` from a fresh task after `ms` milliseconds.
fn deliver_later(
    window: &Window,
    shared: &Shared,
    signal: Signal,
    ms: i32,
) -> Result<(), WebHostError> {
    let handler = Rc::clone(shared);
    let callback = Closure::once_into_js(move || deliver(&handler, signal, None));
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
        .map_err(js_error)?;
    Ok(())
}

fn deliver(shared: &Shared, signal: Signal, event: Option<&Event>) {
    let Ok(mut guard) = shared.try_borrow_mut() else {
        let label = signal.kind().label();
        if !must_redeliver(&signal) {
            tracing::warn!(target: "folio.web", signal = label, "host busy, signal dropped");
            return;
        }
        let requeued = web_sys::window()
            .ok_or(WebHostError::MissingGlobal("window"))
            .and_then(|window| deliver_later(&window, shared, signal, 0));
        match requeued {
            Ok(()) => tracing::debug!(target: "folio.web", signal = label, "host busy, signal requeued"),
            Err(err) => console_error(&err.to_string()),
        }
        return;
    };
    let host = &mut *guard;
    let effects = {
        let probe = DomProbe {
            window: &host.window,
            registry: &host.registry,
        };
        host.page.dispatch(&signal, &probe)
    };
    apply(shared, host, effects, event);
}

fn apply(shared: &Shared, host: &mut Host, effects: Vec<Effect>, event: Option<&Event>) {
    for effect in effects {
        if let Err(err) = apply_one(shared, host, effect, event) {
            console_error(&err.to_string());
            tracing::warn!(target: "folio.web", error = %err, "effect failed");
        }
    }
}

fn relay_method(window: &Window, name: &str) -> Result<(JsValue, Function), WebHostError> {
    let relay = Reflect::get(window, &JsValue::from_str(RELAY_GLOBAL)).map_err(js_error)?;
    if relay.is_undefined() || relay.is_null() {
        return Err(WebHostError::MissingGlobal(RELAY_GLOBAL));
    }
    let method = Reflect::get(&relay, &JsValue::from_str(name))
        .map_err(js_error)?
        .dyn_into::<Function>()
        .map_err(js_error)?;
    Ok((relay, method))
}

fn send_form(
    window: &Window,
    form: Option<&Element>,
    service_id: &str,
    template_id: &str,
) -> Result<Promise, WebHostError> {
    let form = form.ok_or(WebHostError::Js("contact form is gone".into()))?;
    let (relay, send) = relay_method(window, "sendForm")?;
    send.call3(
        &relay,
        &JsValue::from_str(service_id),
        &JsValue::from_str(template_id),
        form,
    )
    .map_err(js_error)?
    .dyn_into::<Promise>()
    .map_err(js_error)
}

fn apply_one(
    shared: &Shared,
    host: &mut Host,
    effect: Effect,
    event: Option<&Event>,
) -> Result<(), WebHostError> {
    match effect {
        Effect::AddClass { target, class } => {
            if let Some(element) = host.registry.get(target) {
                element.class_list().add_1(class).map_err(js_error)?;
            }
        }
        Effect::RemoveClass { target, class } => {
            if let Some(element) = host.registry.get(target) {
                element.class_list().remove_1(class).map_err(js_error)?;
            }
        }
        Effect::SetAttribute {
            target,
            name,
            value,
        } => {
            if let Some(element) = host.registry.get(target) {
                element.set_attribute(name, &value).map_err(js_error)?;
            }
        }
        Effect::Persist { key, value } => LocalStorage::open(&host.window).set(&key, &value),
        Effect::ScheduleTimer { timer, delay } => {
            let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            deliver_later(&host.window, shared, Signal::Timer(timer), ms)?;
        }
        Effect::ScrollIntoView { target } => {
            if let Some(element) = host.registry.get(target) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                element.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
        Effect::PreventDefault => {
            if let Some(event) = event {
                event.prevent_default();
            }
        }
        Effect::StopPropagation => {
            if let Some(event) = event {
                event.stop_propagation();
            }
        }
        Effect::InitRelay { public_key } => {
            let (relay, init) = relay_method(&host.window, "init")?;
            init.call1(&relay, &JsValue::from_str(&public_key))
                .map_err(js_error)?;
        }
        Effect::SendForm {
            form,
            service_id,
            template_id,
        } => {
            let sent = send_form(
                &host.window,
                host.registry.get(form),
                &service_id,
                &template_id,
            );
            let handler = Rc::clone(shared);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match sent {
                    Ok(promise) => JsFuture::from(promise)
                        .await
                        .map(|_| ())
                        .map_err(|err| describe(&err)),
                    Err(err) => Err(err.to_string()),
                };
                deliver(&handler, Signal::RelayOutcome(outcome), None);
            });
        }
        Effect::ResetForm { form } => {
            if let Some(form) = host
                .registry
                .get(form)
                .and_then(|element| element.dyn_ref::<HtmlFormElement>())
            {
                form.reset();
            }
        }
        Effect::Notify { message } => {
            host.window.alert_with_message(&message).map_err(js_error)?;
        }
        Effect::Release(kind) => host.release(kind),
    }
    Ok(())
}

// ── Exports ──

/// The portfolio page, mounted on the current document.
#[wasm_bindgen]
pub struct PortfolioPage {
    host: Shared,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl PortfolioPage {
    /// Discover the page, apply its initial state, and start listening.
    ///
    /// `config_json` is an optional JSON page configuration; omitted fields
    /// keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PortfolioPage, JsValue> {
        install_panic_hook();
        let host = mount(config_json.as_deref()).map_err(|err| {
            console_error(&err.to_string());
            JsValue::from(err)
        })?;
        Ok(Self { host })
    }

    /// Id of the section currently highlighted in the navigation.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        let host = self.host.try_borrow().ok()?;
        host.page.context().active_section_id().map(str::to_owned)
    }

    /// Reactions run since mount.
    #[wasm_bindgen(js_name = reactionsRun)]
    pub fn reactions_run(&self) -> f64 {
        self.host
            .try_borrow()
            .map_or(0.0, |host| host.page.reactions_run() as f64)
    }

    /// Stop listening. Classes already applied stay in place.
    pub fn dispose(&self) {
        let Ok(mut host) = self.host.try_borrow_mut() else {
            return;
        };
        for listener in host.listeners.drain(..) {
            listener.detach();
        }
        host.released.clear();
    }
}
