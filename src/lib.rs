// ============================================================================
// SOLAR SITE PICKER - Selector de coordenadas sobre Mapbox (RUST PURO)
// ============================================================================
// - Models: Coordenadas compartidas con la app anfitriona
// - Maps: Capacidades del mapa externo (trait) + implementación Mapbox web
// - Services: Carga única de la librería de mapas
// - Bridge: Estado de la app ↔ mapa externo
// - Hooks/Components: Integración Yew
// ============================================================================

pub mod bridge;
pub mod config;
pub mod maps;
pub mod models;
pub mod services;
mod utils;

#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod hooks;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeOptions, MapBridge, WidgetState};
pub use models::Coordinates;
pub use services::{LoadFailure, LoadState, ScriptLoader};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    if config::CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 Solar Site Picker - Rust + Yew");

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .ok_or_else(|| JsValue::from_str("#app element not found"))?;
    yew::Renderer::<components::App>::with_root(root).render();

    Ok(())
}
