// ============================================================================
// MAPBOX FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Solo wrappers para mapboxgl - Sin estado, sin lógica
// Mapbox ordena los pares como [lng, lat]; esa conversión vive aquí y en
// ningún otro sitio.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::Coordinates;

#[wasm_bindgen(js_namespace = mapboxgl)]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, js_class = "Map", catch)]
    pub fn new(options: &js_sys::Object) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_class = "Map", js_name = setCenter)]
    pub fn set_center(this: &MapboxMap, center: &JsValue);

    #[wasm_bindgen(method, js_class = "Map", js_name = getCenter)]
    pub fn get_center(this: &MapboxMap) -> LngLat;

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn resize(this: &MapboxMap);

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn on(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn off(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_class = "Map")]
    pub fn remove(this: &MapboxMap);

    #[wasm_bindgen(js_name = Marker)]
    pub type MapboxMarker;

    #[wasm_bindgen(constructor, js_class = "Marker")]
    pub fn new() -> MapboxMarker;

    #[wasm_bindgen(method, js_class = "Marker", js_name = setLngLat)]
    pub fn set_lng_lat(this: &MapboxMarker, position: &JsValue);

    #[wasm_bindgen(method, js_class = "Marker", js_name = getLngLat)]
    pub fn get_lng_lat(this: &MapboxMarker) -> LngLat;

    #[wasm_bindgen(method, js_class = "Marker", js_name = addTo)]
    pub fn add_to(this: &MapboxMarker, map: &MapboxMap);

    #[wasm_bindgen(method, js_class = "Marker")]
    pub fn remove(this: &MapboxMarker);

    #[wasm_bindgen(js_name = LngLat)]
    pub type LngLat;

    #[wasm_bindgen(method, getter, js_class = "LngLat")]
    pub fn lng(this: &LngLat) -> f64;

    #[wasm_bindgen(method, getter, js_class = "LngLat")]
    pub fn lat(this: &LngLat) -> f64;
}

#[wasm_bindgen]
extern "C" {
    /// Evento de ratón de mapboxgl (click)
    pub type MapMouseEvent;

    #[wasm_bindgen(method, getter, js_name = lngLat)]
    pub fn lng_lat(this: &MapMouseEvent) -> LngLat;
}

/// Helper: Coordinates -> [lng, lat]
pub fn to_lng_lat(coordinates: Coordinates) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(coordinates.longitude));
    pair.push(&JsValue::from_f64(coordinates.latitude));
    pair.into()
}

/// Helper: LngLat -> Coordinates
pub fn from_lng_lat(lng_lat: &LngLat) -> Coordinates {
    Coordinates {
        latitude: lng_lat.lat(),
        longitude: lng_lat.lng(),
    }
}

fn mapboxgl_global() -> Option<JsValue> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str("mapboxgl"))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Helper: ¿ya existe window.mapboxgl?
pub fn library_present() -> bool {
    mapboxgl_global().is_some()
}

/// Helper: mapboxgl.accessToken = token
pub fn set_access_token(token: &str) -> Result<(), JsValue> {
    let mapboxgl = mapboxgl_global()
        .ok_or_else(|| JsValue::from_str("mapboxgl is not loaded"))?;
    js_sys::Reflect::set(&mapboxgl, &JsValue::from_str("accessToken"), &JsValue::from_str(token))?;
    Ok(())
}

/// Helper: window.ResizeObserver existe (navegadores antiguos no lo tienen)
pub fn resize_observer_supported() -> bool {
    web_sys::window()
        .map(|window| {
            js_sys::Reflect::has(&window, &JsValue::from_str("ResizeObserver")).unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Helper: opciones del constructor de mapboxgl.Map
pub fn map_options(
    container: &web_sys::HtmlElement,
    center: Coordinates,
    zoom: f64,
    style: &str,
) -> Result<js_sys::Object, JsValue> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"container".into(), container.unchecked_ref())?;
    js_sys::Reflect::set(&options, &"center".into(), &to_lng_lat(center))?;
    js_sys::Reflect::set(&options, &"zoom".into(), &JsValue::from_f64(zoom))?;
    js_sys::Reflect::set(&options, &"style".into(), &JsValue::from_str(style))?;
    Ok(options)
}
