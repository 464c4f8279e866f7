//! Leaflet bindings (the page loads `leaflet.js`, exposing the global `L`).

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{LatLng, MapWidget};
use crate::config::FlightConfig;
use crate::util::{clog, cwarn, cwarn_js};

pub const CONTAINER_ID: &str = "map";
const ZOOM_STYLE_ID: &str = "leaflet-disable-zoom-style";

/// Interaction handlers switched off so touches only steer the plane.
const INTERACTION_HANDLERS: [&str; 7] = [
    "dragging",
    "touchZoom",
    "doubleClickZoom",
    "scrollWheelZoom",
    "boxZoom",
    "keyboard",
    "tap",
];

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Map, js_namespace = L)]
    #[derive(Clone, Debug)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container_id: &str) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setView)]
    fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, catch, js_name = panBy)]
    fn pan_by(this: &Map, offset: &JsValue, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &Map) -> JsLatLng;

    #[wasm_bindgen(method, catch, js_name = removeControl)]
    fn remove_control(this: &Map, control: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(js_name = LatLng, js_namespace = L)]
    type JsLatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLatLng) -> f64;

    #[wasm_bindgen(js_name = TileLayer, js_namespace = L)]
    type TileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &JsValue) -> Result<TileLayer, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &Map) -> Result<TileLayer, JsValue>;
}

#[derive(Serialize)]
struct PanOptions {
    animate: bool,
    duration: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions<'a> {
    max_zoom: f64,
    attribution: &'a str,
}

/// Serializes through JSON so option structs stay plain serde types.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let raw = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&raw)
}

fn point(a: f64, b: f64) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(a), &JsValue::from_f64(b)).into()
}

/// A live Leaflet map plus the cached options object used for every pan.
#[derive(Clone, Debug)]
pub struct LeafletHandle {
    map: Map,
    pan_options: JsValue,
}

impl LeafletHandle {
    pub fn raw(&self) -> &Map {
        &self.map
    }
}

impl MapWidget for LeafletHandle {
    fn pan_by(&mut self, dx: f64, dy: f64) {
        if let Err(e) = self.map.pan_by(&point(dx, dy), &self.pan_options) {
            cwarn_js("panBy failed", &e);
        }
    }

    fn center(&self) -> LatLng {
        let c = self.map.get_center();
        LatLng::new(c.lat(), c.lng())
    }
}

fn ensure_container(document: &web_sys::Document) -> Result<(), JsValue> {
    if document.get_element_by_id(CONTAINER_ID).is_some() {
        return Ok(());
    }
    let div = document.create_element("div")?;
    div.set_id(CONTAINER_ID);
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.prepend_with_node_1(&div)?;
    clog("created missing #map container");
    Ok(())
}

/// Creates the map at the configured start view, adds the tile layer and
/// exposes the handle as `window.appMap`.
pub fn init_map(cfg: &FlightConfig) -> Result<LeafletHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    ensure_container(&document)?;

    let map = create_map(CONTAINER_ID)?;
    map.set_view(&point(cfg.start.lat, cfg.start.lng), cfg.start_zoom)?;

    let tile_options = to_js(&TileLayerOptions {
        max_zoom: cfg.max_zoom,
        attribution: &cfg.attribution,
    })?;
    tile_layer(&cfg.tile_url, &tile_options)?.add_to(&map)?;

    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str("appMap"), &map) {
        cwarn_js("could not expose window.appMap", &e);
    }
    let pan_options = to_js(&PanOptions {
        animate: false,
        duration: 0.0,
    })?;
    clog(&format!(
        "map initialized at ({}, {}) zoom {}",
        cfg.start.lat, cfg.start.lng, cfg.start_zoom
    ));
    Ok(LeafletHandle { map, pan_options })
}

fn disable_handler(map: &Map, name: &str) -> Result<bool, JsValue> {
    let handler = js_sys::Reflect::get(map, &JsValue::from_str(name))?;
    if handler.is_undefined() || handler.is_null() {
        return Ok(false);
    }
    let disable = js_sys::Reflect::get(&handler, &JsValue::from_str("disable"))?;
    match disable.dyn_ref::<js_sys::Function>() {
        Some(f) => {
            f.call0(&handler)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn hide_zoom_control_with_css() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if document.get_element_by_id(ZOOM_STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(ZOOM_STYLE_ID);
    style.set_text_content(Some(".leaflet-control-zoom { display: none !important; }"));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    head.append_child(&style)?;
    Ok(())
}

fn remove_zoom_control(map: &Map) -> Result<(), JsValue> {
    let control = js_sys::Reflect::get(map, &JsValue::from_str("zoomControl"))?;
    if control.is_undefined() || control.is_null() {
        return hide_zoom_control_with_css();
    }
    map.remove_control(&control)?;
    Ok(())
}

/// Turns off every built-in pan/zoom interaction. Each failure is logged and
/// skipped; the map stays usable.
pub fn disable_interactions(handle: &LeafletHandle) {
    let map = handle.raw();
    for name in INTERACTION_HANDLERS {
        match disable_handler(map, name) {
            Ok(true) => {}
            Ok(false) => cwarn(&format!("map handler `{name}` not available, skipping")),
            Err(e) => cwarn_js(&format!("failed to disable `{name}`"), &e),
        }
    }
    if let Err(e) = remove_zoom_control(map) {
        cwarn_js("failed to remove zoomControl, hiding via CSS", &e);
        if let Err(e) = hide_zoom_control_with_css() {
            cwarn_js("could not hide zoom control", &e);
        }
    }
}
