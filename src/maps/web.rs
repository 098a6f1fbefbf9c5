use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ResizeObserver};

use super::{ListenerId, MapError, MapMarker, MapProvider, MapWidget};
use crate::bridge::{ResizeSource, ResizeSubscription};
use crate::models::Coordinates;
use crate::utils::mapbox_ffi::{self, MapMouseEvent, MapboxMap, MapboxMarker};

/// Proveedor de mapas para web usando Mapbox GL JS
pub struct WebMapProvider {
    style_url: String,
}

impl WebMapProvider {
    pub fn new(style_url: impl Into<String>) -> Self {
        Self {
            style_url: style_url.into(),
        }
    }
}

impl Default for WebMapProvider {
    fn default() -> Self {
        Self::new(crate::config::CONFIG.map_config.style_url.clone())
    }
}

impl MapProvider for WebMapProvider {
    type Container = HtmlElement;
    type Map = WebMap;

    fn create_map(
        &self,
        container: &HtmlElement,
        center: Coordinates,
        zoom: f64,
    ) -> Result<WebMap, MapError> {
        if !mapbox_ffi::library_present() {
            return Err(MapError::LibraryUnavailable);
        }
        if !container.is_connected() {
            return Err(MapError::NotReady);
        }

        log::info!("🗺️ Inicializando Mapbox GL JS...");
        let options = mapbox_ffi::map_options(container, center, zoom, &self.style_url)
            .map_err(|e| MapError::CreationFailed(format!("{:?}", e)))?;
        let map = MapboxMap::new(&options)
            .map_err(|e| MapError::CreationFailed(format!("{:?}", e)))?;

        Ok(WebMap {
            map,
            listeners: RefCell::new(HashMap::new()),
            next_listener: Cell::new(0),
        })
    }
}

type ClickClosure = Closure<dyn FnMut(MapMouseEvent)>;

/// Mapa Mapbox vivo + los closures de click que le pasamos
pub struct WebMap {
    map: MapboxMap,
    listeners: RefCell<HashMap<ListenerId, ClickClosure>>,
    next_listener: Cell<u32>,
}

impl MapWidget for WebMap {
    type Marker = WebMarker;

    fn create_marker(&self, position: Coordinates) -> Result<WebMarker, MapError> {
        let marker = MapboxMarker::new();
        marker.set_lng_lat(&mapbox_ffi::to_lng_lat(position));
        marker.add_to(&self.map);
        Ok(WebMarker { marker })
    }

    fn set_center(&self, center: Coordinates) {
        self.map.set_center(&mapbox_ffi::to_lng_lat(center));
    }

    fn center(&self) -> Coordinates {
        mapbox_ffi::from_lng_lat(&self.map.get_center())
    }

    fn trigger_resize(&self) {
        self.map.resize();
    }

    fn add_click_listener(&self, listener: Rc<dyn Fn(Coordinates)>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);

        let closure = Closure::wrap(Box::new(move |event: MapMouseEvent| {
            listener(mapbox_ffi::from_lng_lat(&event.lng_lat()));
        }) as Box<dyn FnMut(MapMouseEvent)>);
        self.map.on("click", closure.as_ref().unchecked_ref());
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_click_listener(&self, id: ListenerId) {
        if let Some(closure) = self.listeners.borrow_mut().remove(&id) {
            self.map.off("click", closure.as_ref().unchecked_ref());
        }
    }

    fn dispose(&self) {
        // Los closures restantes mueren con el mapa
        for (_, closure) in self.listeners.borrow_mut().drain() {
            self.map.off("click", closure.as_ref().unchecked_ref());
        }
        self.map.remove();
    }
}

pub struct WebMarker {
    marker: MapboxMarker,
}

impl MapMarker for WebMarker {
    fn set_position(&self, position: Coordinates) {
        self.marker.set_lng_lat(&mapbox_ffi::to_lng_lat(position));
    }

    fn position(&self) -> Coordinates {
        mapbox_ffi::from_lng_lat(&self.marker.get_lng_lat())
    }

    fn remove(&self) {
        self.marker.remove();
    }
}

// ============================================================================
// RESIZE OBSERVER
// ============================================================================

/// Observa el tamaño del contenedor con ResizeObserver.
///
/// En navegadores sin ResizeObserver no observa nada.
pub struct ElementResizeSource;

struct ObserverGuard {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl ResizeSource<HtmlElement> for ElementResizeSource {
    fn observe(&self, container: &HtmlElement, on_resize: Rc<dyn Fn()>) -> Option<ResizeSubscription> {
        if !mapbox_ffi::resize_observer_supported() {
            log::warn!("⚠️ [MAP] ResizeObserver no disponible en este navegador");
            return None;
        }

        let callback = Closure::wrap(Box::new(move || on_resize()) as Box<dyn FnMut()>);
        let observer = match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("⚠️ [MAP] No se pudo crear ResizeObserver: {:?}", e);
                return None;
            }
        };
        observer.observe(container);

        Some(ResizeSubscription::new(ObserverGuard {
            observer,
            _callback: callback,
        }))
    }
}
