//! Browser entry point for the score globe.
//!
//! All view state lives in a thread-local [`GlobeState`] that is only touched
//! from the browser event loop. The score file and the country outlines are
//! fetched independently; whichever arrives second triggers the final paint.
//! Each mount bumps a generation so fetches started by an earlier mount
//! cannot write into the current one.

use std::cell::RefCell;

use formats::CountryCollection;
use foundation::math::Vec2;
use layers::svg::Viewport;
use layers::{CountryLayer, Details, GlobeStyle, clear_details, show_details};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, MouseEvent, PointerEvent, WheelEvent};

mod config;
mod data_service;
mod globe_controller;
mod view;

pub use config::GlobeConfig;
use data_service::{DataLoad, LoadState, Paint, fetch_country_data, fetch_geography, fetch_json};
pub use globe_controller::{DragEvent, GlobeController, WheelDeltaMode, ZoomEvent, ZoomOutcome};
use view::GlobeDom;

#[derive(Debug, Default)]
struct GlobeState {
    config: GlobeConfig,
    controller: GlobeController,
    load: LoadState,
    dom: Option<GlobeDom>,
    /// Drag listeners on `window`; removed again on re-mount.
    window_listeners: Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)>,
    layer: CountryLayer,
    globe_style: GlobeStyle,
    details: Details,
    details_listener: Option<js_sys::Function>,
}

thread_local! {
    static STATE: RefCell<GlobeState> = RefCell::new(GlobeState::default());
}

fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<GlobeState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn try_with_state<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&RefCell<GlobeState>) -> Result<R, JsValue>,
{
    STATE
        .try_with(f)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn window_viewport() -> Result<Viewport, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    Ok(())
}

/// Mount the globe into the element with id `container_id` using the
/// default settings.
#[wasm_bindgen]
pub fn init_globe(container_id: &str) -> Result<(), JsValue> {
    mount(container_id, GlobeConfig::default())
}

/// Like [`init_globe`], with settings given as a JSON object.
#[wasm_bindgen]
pub fn init_globe_with_config(container_id: &str, config_json: &str) -> Result<(), JsValue> {
    let config =
        GlobeConfig::from_json_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount(container_id, config)
}

fn mount(container_id: &str, config: GlobeConfig) -> Result<(), JsValue> {
    let document = document()?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {container_id}")))?;
    let viewport = window_viewport()?;

    let (svg, generation) = try_with_state(|state| {
        let mut s = state.borrow_mut();
        if let Some(old) = s.dom.take() {
            old.unmount();
        }
        detach_window_listeners(&mut s.window_listeners)?;
        let controller = GlobeController::new(&config, viewport);
        let dom = GlobeDom::mount(
            &document,
            &container,
            viewport,
            controller.projection(),
            &s.globe_style,
        )?;
        let svg = dom.svg.clone();

        s.controller = controller;
        let generation = s.load.restart();
        s.details = Details::Cleared;
        s.dom = Some(dom);
        s.config = config.clone();
        Ok((svg, generation))
    })?;

    let listeners = attach_interaction(&svg)?;
    try_with_state(|state| {
        state.borrow_mut().window_listeners = listeners;
        Ok(())
    })?;

    spawn_local(load_country_data(generation, config.data_url.clone()));
    spawn_local(load_geography(generation, config.geography_url));
    Ok(())
}

async fn load_country_data(generation: u64, url: String) {
    let result = if url == formats::COUNTRY_DATA_PATH {
        fetch_country_data().await
    } else {
        fetch_json(&url).await
    };

    let load = match result {
        Ok(data) => {
            log(&format!("loaded scores for {} countries", data.len()));
            DataLoad::Loaded(data)
        }
        Err(err) => {
            log_error(&format!("Failed to fetch {url}: {err}"));
            DataLoad::Failed(err.to_string())
        }
    };

    with_state(|state| {
        let mut s = state.borrow_mut();
        let s = &mut *s;
        match s.load.data_arrived(generation, load) {
            Paint::Fills => {
                if let (Some(dom), Some(geography)) = (&s.dom, s.load.geography()) {
                    if let Err(err) = dom.repaint_fills(&s.layer, geography, s.load.scores()) {
                        log_error(&format!("repaint failed: {err:?}"));
                    }
                }
            }
            Paint::Stale => log(&format!("dropped scores from {url}: globe was re-mounted")),
            Paint::Nothing | Paint::Countries => {}
        }
    });
}

async fn load_geography(generation: u64, url: String) {
    let collection = match fetch_geography(&url).await {
        Ok(c) => c,
        Err(err) => {
            log_error(&format!("Failed to fetch {url}: {err:?}"));
            return;
        }
    };
    log(&format!(
        "loaded {} country outlines ({} skipped)",
        collection.len(),
        collection.skipped
    ));

    if let Err(err) = draw_geography(generation, collection) {
        log_error(&format!("drawing countries failed: {err:?}"));
    }
}

fn draw_geography(generation: u64, collection: CountryCollection) -> Result<(), JsValue> {
    let document = document()?;
    try_with_state(|state| {
        let mut s = state.borrow_mut();
        let s = &mut *s;
        if s.load.geography_arrived(generation, collection) == Paint::Stale {
            log("dropped country outlines: globe was re-mounted");
            return Ok(());
        }
        let (Some(dom), Some(geography)) = (s.dom.as_mut(), s.load.geography()) else {
            return Ok(());
        };
        let paths = s
            .layer
            .extract(geography, s.load.scores(), s.controller.projection());

        for (el, path) in dom.draw_countries(&document, &s.layer, &paths)? {
            attach_hover(&el, path.iso_a2.clone(), path.name.clone())?;
        }
        Ok(())
    })
}

fn attach_hover(el: &Element, iso_a2: String, name: String) -> Result<(), JsValue> {
    let on_enter = Closure::<dyn FnMut()>::new(move || {
        update_details(|current, data| show_details(current, data, &iso_a2, &name));
    });
    el.add_event_listener_with_callback("mouseover", on_enter.as_ref().unchecked_ref())?;
    on_enter.forget();

    let on_leave = Closure::<dyn FnMut()>::new(move || {
        update_details(|_, _| clear_details());
    });
    el.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
    on_leave.forget();
    Ok(())
}

fn update_details<F>(f: F)
where
    F: FnOnce(Details, Option<&formats::CountryData>) -> Details,
{
    let (details, listener, element_id) = with_state(|state| {
        let mut s = state.borrow_mut();
        let s = &mut *s;
        let current = std::mem::take(&mut s.details);
        s.details = f(current, s.load.scores());
        (
            s.details.clone(),
            s.details_listener.clone(),
            s.config.details_element_id.clone(),
        )
    });
    publish_details(&details, listener.as_ref(), &element_id);
}

/// `undefined` when cleared, a string when shown, `null` when withheld.
fn details_to_js(details: &Details) -> JsValue {
    match details {
        Details::Cleared => JsValue::UNDEFINED,
        Details::Text(text) => JsValue::from_str(text),
        Details::Withheld => JsValue::NULL,
    }
}

fn publish_details(details: &Details, listener: Option<&js_sys::Function>, element_id: &str) {
    if let Some(el) = document()
        .ok()
        .and_then(|d| d.get_element_by_id(element_id))
    {
        el.set_text_content(details.text());
    }
    if let Some(f) = listener {
        if let Err(err) = f.call1(&JsValue::NULL, &details_to_js(details)) {
            log_error(&format!("details listener failed: {err:?}"));
        }
    }
}

fn detach_window_listeners(
    listeners: &mut Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)>,
) -> Result<(), JsValue> {
    if listeners.is_empty() {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    for (event, listener) in listeners.drain(..) {
        window.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Pointer, wheel and double-click handling. Pointer events cover mouse,
/// touch and pen alike. The returned `window` listeners must be kept alive
/// until the next mount detaches them.
fn attach_interaction(
    svg: &Element,
) -> Result<Vec<(&'static str, Closure<dyn FnMut(PointerEvent)>)>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let target = svg.clone();
    let on_down = Closure::<dyn FnMut(PointerEvent)>::new(move |e: PointerEvent| {
        e.prevent_default();
        if let Err(err) = target.set_pointer_capture(e.pointer_id()) {
            log_error(&format!("pointer capture failed: {err:?}"));
        }
        let pos = Vec2::new(e.client_x() as f64, e.client_y() as f64);
        with_state(|state| state.borrow_mut().controller.on_pointer_down(pos));
    });
    svg.add_event_listener_with_callback("pointerdown", on_down.as_ref().unchecked_ref())?;
    on_down.forget();

    let on_move = Closure::<dyn FnMut(PointerEvent)>::new(|e: PointerEvent| {
        let pos = Vec2::new(e.client_x() as f64, e.client_y() as f64);
        let event = with_state(|state| state.borrow_mut().controller.on_pointer_move(pos));
        if let Some(event) = event {
            report(drag_globe(event.dx, event.dy));
        }
    });
    let on_up = Closure::<dyn FnMut(PointerEvent)>::new(|_e: PointerEvent| {
        with_state(|state| state.borrow_mut().controller.on_pointer_up());
    });
    let on_cancel = Closure::<dyn FnMut(PointerEvent)>::new(|_e: PointerEvent| {
        with_state(|state| state.borrow_mut().controller.on_pointer_up());
    });

    let listeners = vec![
        ("pointermove", on_move),
        ("pointerup", on_up),
        ("pointercancel", on_cancel),
    ];
    for (event, listener) in &listeners {
        window.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    }

    let on_wheel = Closure::<dyn FnMut(WheelEvent)>::new(|e: WheelEvent| {
        e.prevent_default();
        let mode = WheelDeltaMode::from_dom(e.delta_mode());
        let delta_y = e.delta_y();
        report(apply_zoom(|c| c.on_wheel(delta_y, mode)).map(|_| ()));
    });
    svg.add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref())?;
    on_wheel.forget();

    let on_dblclick = Closure::<dyn FnMut(MouseEvent)>::new(|e: MouseEvent| {
        e.prevent_default();
        let shift = e.shift_key();
        report(apply_zoom(|c| c.on_double_click(shift)).map(|_| ()));
    });
    svg.add_event_listener_with_callback("dblclick", on_dblclick.as_ref().unchecked_ref())?;
    on_dblclick.forget();

    Ok(listeners)
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log_error(&format!("globe update failed: {err:?}"));
    }
}

/// Redraw outlines and the background disc from the current projection.
fn redraw(s: &GlobeState) -> Result<(), JsValue> {
    let Some(dom) = &s.dom else {
        return Ok(());
    };
    let projection = s.controller.projection();
    if let Some(geography) = s.load.geography() {
        dom.redraw_paths(geography, projection)?;
    }
    dom.set_globe_radius(s.controller.globe_radius())
}

fn apply_zoom<F>(f: F) -> Result<f64, JsValue>
where
    F: FnOnce(&mut GlobeController) -> ZoomOutcome,
{
    try_with_state(|state| {
        let mut s = state.borrow_mut();
        let outcome = f(&mut s.controller);
        redraw(&s)?;
        Ok(outcome.k())
    })
}

/// Rotate the globe by a pixel delta, as a drag would.
#[wasm_bindgen]
pub fn drag_globe(dx: f64, dy: f64) -> Result<(), JsValue> {
    try_with_state(|state| {
        let mut s = state.borrow_mut();
        s.controller.on_drag(DragEvent { dx, dy });
        redraw(&s)
    })
}

/// Apply a zoom factor; returns the factor actually used (never below 0.3).
#[wasm_bindgen]
pub fn zoom_globe(k: f64) -> Result<f64, JsValue> {
    apply_zoom(|c| c.on_zoom(ZoomEvent { k }))
}

#[wasm_bindgen]
pub fn set_viewport_size(width: f64, height: f64) -> Result<(), JsValue> {
    try_with_state(|state| {
        let mut s = state.borrow_mut();
        let viewport = Viewport::new(width, height);
        s.controller.set_viewport(viewport);
        if let Some(dom) = &s.dom {
            dom.resize(viewport, s.controller.projection())?;
        }
        redraw(&s)
    })
}

#[wasm_bindgen]
pub fn get_country_details() -> JsValue {
    with_state(|state| Some(details_to_js(&state.borrow().details))).unwrap_or(JsValue::UNDEFINED)
}

/// Register `callback(details)`; it receives `undefined`, a string or `null`.
#[wasm_bindgen]
pub fn on_details_change(callback: js_sys::Function) {
    with_state(|state| state.borrow_mut().details_listener = Some(callback));
}

#[wasm_bindgen]
pub fn is_data_loaded() -> bool {
    with_state(|state| state.borrow().load.data().is_loaded())
}

#[wasm_bindgen]
pub fn get_projection_state() -> JsValue {
    let (rotate, scale, zoom) = with_state(|state| {
        let s = state.borrow();
        let p = s.controller.projection();
        (p.rotate(), p.scale(), s.controller.zoom().k())
    });

    let o = js_sys::Object::new();
    let r = js_sys::Array::new();
    for angle in rotate {
        r.push(&JsValue::from_f64(angle));
    }
    let _ = js_sys::Reflect::set(&o, &JsValue::from_str("rotate"), &r);
    let _ = js_sys::Reflect::set(&o, &JsValue::from_str("scale"), &JsValue::from_f64(scale));
    let _ = js_sys::Reflect::set(&o, &JsValue::from_str("zoom"), &JsValue::from_f64(zoom));
    o.into()
}

#[wasm_bindgen]
pub fn get_globe_debug() -> String {
    with_state(|state| {
        let s = state.borrow();
        format!("{}\nmount: {}", s.controller.debug_info(), s.load.generation())
    })
}
