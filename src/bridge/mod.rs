// ============================================================================
// MAP BRIDGE - Puente entre el estado de la app y el mapa externo
// ============================================================================
// La app es dueña de las coordenadas. El puente:
// - crea el mapa y su marcador una sola vez por contenedor (lifecycle)
// - empuja las coordenadas de la app hacia el mapa (sync)
// - propone coordenadas nuevas cuando el operador hace click (click)
// - mantiene el centro al cambiar el tamaño del contenedor (resize)
// ============================================================================

mod click;
mod lifecycle;
mod resize;
mod scheduler;
mod sync;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::maps::{ListenerId, MapProvider, MapWidget};
use crate::models::Coordinates;
use crate::services::ScriptLoader;

pub use resize::{NoResize, ResizeSource, ResizeSubscription};
pub use scheduler::{Scheduler, TimerHandle};
#[cfg(target_arch = "wasm32")]
pub use scheduler::TimeoutScheduler;

/// Estado del widget para UN contenedor montado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Uninitialized,
    Initializing,
    Initialized,
    /// La librería no cargó; el área del mapa queda vacía
    Unavailable,
    Disposed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeOptions {
    pub zoom: f64,
    /// Espera del re-centrado correctivo; ajustable, no es una garantía
    pub corrective_delay_ms: u32,
}

impl BridgeOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            zoom: config.map_config.default_zoom,
            corrective_delay_ms: config.map_config.corrective_delay_ms,
        }
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Callback hacia la aplicación: (lat, lng) propuesto por un click
pub type CoordinateCallback = Rc<dyn Fn(Coordinates)>;

/// Handles vivos mientras el widget está inicializado
struct Mounted<M: MapWidget> {
    map: M,
    marker: M::Marker,
    listener: ListenerId,
    /// Última posición escrita en el marcador
    marker_at: Coordinates,
    /// Último centro aplicado desde la app
    centered_at: Coordinates,
    corrective_done: bool,
    resize: Option<ResizeSubscription>,
    corrective: Option<TimerHandle>,
}

struct BridgeInner<P: MapProvider> {
    provider: P,
    loader: ScriptLoader,
    scheduler: Rc<dyn Scheduler>,
    resize_source: Rc<dyn ResizeSource<P::Container>>,
    on_change: CoordinateCallback,
    options: BridgeOptions,
    latest: Coordinates,
    state: WidgetState,
    mounted: Option<Mounted<P::Map>>,
}

/// Puente para un contenedor montado. Clonar comparte el mismo puente.
pub struct MapBridge<P: MapProvider> {
    inner: Rc<RefCell<BridgeInner<P>>>,
}

impl<P: MapProvider> Clone for MapBridge<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: MapProvider + 'static> MapBridge<P> {
    pub fn new(
        provider: P,
        loader: ScriptLoader,
        scheduler: Rc<dyn Scheduler>,
        resize_source: Rc<dyn ResizeSource<P::Container>>,
        on_change: CoordinateCallback,
        initial: Coordinates,
        options: BridgeOptions,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BridgeInner {
                provider,
                loader,
                scheduler,
                resize_source,
                on_change,
                options,
                latest: initial,
                state: WidgetState::Uninitialized,
                mounted: None,
            })),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.inner.borrow().state
    }

    /// Últimas coordenadas conocidas por el puente
    pub fn latest(&self) -> Coordinates {
        self.inner.borrow().latest
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().mounted.is_some()
    }
}
