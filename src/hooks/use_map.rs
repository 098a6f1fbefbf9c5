// ============================================================================
// USE MAP HOOK - Ciclo de vida del selector de coordenadas
// ============================================================================
// Hook nativo de Yew - Delega toda la lógica al MapBridge
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;

use crate::bridge::{BridgeOptions, MapBridge, TimeoutScheduler, WidgetState};
use crate::config::CONFIG;
use crate::maps::web::{ElementResizeSource, WebMapProvider};
use crate::models::Coordinates;
use crate::services::ScriptLoader;

/// Handle del hook
#[derive(Clone)]
pub struct UseMapHandle {
    pub state: UseStateHandle<WidgetState>,
}

#[hook]
pub fn use_map(
    node_ref: NodeRef,
    coordinates: Coordinates,
    on_coordinate_change: Callback<(f64, f64)>,
    loader: ScriptLoader,
) -> UseMapHandle {
    let state = use_state(|| WidgetState::Uninitialized);
    let bridge = use_mut_ref(|| None::<MapBridge<WebMapProvider>>);

    // El callback del padre cambia en cada render; el puente lee siempre el último
    let latest_callback = use_mut_ref(|| on_coordinate_change.clone());
    *latest_callback.borrow_mut() = on_coordinate_change;

    // Montaje / desmontaje
    {
        let bridge = bridge.clone();
        let latest_callback = latest_callback.clone();

        use_effect_with((), move |_| {
            let on_change: Rc<dyn Fn(Coordinates)> = Rc::new(move |picked: Coordinates| {
                let callback = latest_callback.borrow().clone();
                callback.emit(picked.as_tuple());
            });

            *bridge.borrow_mut() = Some(MapBridge::new(
                WebMapProvider::default(),
                loader,
                Rc::new(TimeoutScheduler),
                Rc::new(ElementResizeSource),
                on_change,
                coordinates,
                BridgeOptions::from_config(&CONFIG),
            ));

            move || {
                if let Some(bridge) = bridge.borrow_mut().take() {
                    bridge.dispose();
                }
            }
        });
    }

    // En cada render: si el contenedor faltaba, se reintenta aquí
    {
        let bridge = bridge.clone();
        let node_ref = node_ref.clone();
        let state = state.clone();

        use_effect(move || {
            attach_if_needed(&bridge, &node_ref, state);
            || ()
        });
    }

    // App → mapa
    {
        let bridge = bridge.clone();

        use_effect_with(coordinates, move |coordinates| {
            if let Some(bridge) = bridge.borrow().as_ref() {
                bridge.sync(*coordinates);
            }
            || ()
        });
    }

    UseMapHandle { state }
}

fn attach_if_needed(
    bridge: &Rc<RefCell<Option<MapBridge<WebMapProvider>>>>,
    node_ref: &NodeRef,
    state: UseStateHandle<WidgetState>,
) {
    let pending = match bridge.borrow().as_ref() {
        Some(bridge) if bridge.state() == WidgetState::Uninitialized => {
            bridge.attach(node_ref.cast::<HtmlElement>())
        }
        _ => None,
    };

    if let Some(pending) = pending {
        state.set(WidgetState::Initializing);
        wasm_bindgen_futures::spawn_local(async move {
            let reached = pending.await;
            state.set(reached);
        });
    }
}
