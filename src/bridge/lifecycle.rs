// ============================================================================
// LIFECYCLE - Uninitialized → Initializing → Initialized → Disposed
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use super::{click, resize, BridgeInner, MapBridge, Mounted, WidgetState};
use crate::maps::{MapMarker, MapProvider, MapWidget};
use crate::services::LoadFailure;

impl<P: MapProvider + 'static> MapBridge<P> {
    /// Arrancar la inicialización sobre `container`.
    ///
    /// Devuelve el future a lanzar en el event loop (`spawn_local`), o `None` si
    /// no hay nada que hacer: contenedor ausente (se reintenta en el próximo
    /// render), inicialización ya en marcha o hecha, o puente liberado.
    /// El future termina con el estado alcanzado.
    pub fn attach(
        &self,
        container: Option<P::Container>,
    ) -> Option<impl Future<Output = WidgetState> + 'static> {
        let Some(container) = container else {
            log::debug!("🗺️ [MAP] Contenedor aún no disponible, se reintenta en el próximo render");
            return None;
        };

        let loader = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != WidgetState::Uninitialized || inner.mounted.is_some() {
                log::debug!("🗺️ [MAP] attach ignorado en estado {:?}", inner.state);
                return None;
            }
            inner.state = WidgetState::Initializing;
            inner.loader.clone()
        };

        // Se pide la carga ya, no al primer poll
        let pending = loader.ensure_loaded();
        let weak = Rc::downgrade(&self.inner);

        Some(async move {
            let result = pending.await;
            match weak.upgrade() {
                Some(cell) => complete(&cell, &container, result),
                None => {
                    log::debug!("🗺️ [MAP] Carga resuelta tras desmontar, descartada");
                    WidgetState::Disposed
                }
            }
        })
    }

    /// Liberar mapa, marcador, listener, observación y temporizador.
    ///
    /// Idempotente. No toca el estado de carga del script.
    pub fn dispose(&self) {
        let mounted = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == WidgetState::Disposed {
                return;
            }
            inner.state = WidgetState::Disposed;
            inner.mounted.take()
        };

        if let Some(mounted) = mounted {
            let Mounted {
                map,
                marker,
                listener,
                resize,
                corrective,
                ..
            } = mounted;
            drop(resize);
            drop(corrective);
            map.remove_click_listener(listener);
            marker.remove();
            map.dispose();
            log::info!("🧹 [MAP] Mapa liberado");
        }
    }
}

fn complete<P: MapProvider + 'static>(
    cell: &Rc<RefCell<BridgeInner<P>>>,
    container: &P::Container,
    result: Result<(), LoadFailure>,
) -> WidgetState {
    let state = cell.borrow().state;
    if state != WidgetState::Initializing {
        log::debug!("🗺️ [MAP] Carga resuelta en estado {:?}, descartada", state);
        return state;
    }

    match result {
        Ok(()) => initialize(cell, container),
        Err(failure) => {
            log::warn!("⚠️ [MAP] Mapa no disponible: {}", failure);
            cell.borrow_mut().state = WidgetState::Unavailable;
            WidgetState::Unavailable
        }
    }
}

fn initialize<P: MapProvider + 'static>(
    cell: &Rc<RefCell<BridgeInner<P>>>,
    container: &P::Container,
) -> WidgetState {
    let mut guard = cell.borrow_mut();
    let inner = &mut *guard;
    if inner.mounted.is_some() {
        return inner.state;
    }

    let center = inner.latest;
    let map = match inner.provider.create_map(container, center, inner.options.zoom) {
        Ok(map) => map,
        Err(e) => {
            log::error!("❌ [MAP] Error creando el mapa: {}", e);
            inner.state = WidgetState::Unavailable;
            return inner.state;
        }
    };
    let marker = match map.create_marker(center) {
        Ok(marker) => marker,
        Err(e) => {
            log::error!("❌ [MAP] Error creando el marcador: {}", e);
            map.dispose();
            inner.state = WidgetState::Unavailable;
            return inner.state;
        }
    };

    let weak = Rc::downgrade(cell);
    let listener = map.add_click_listener(Rc::new({
        let weak = weak.clone();
        move |position| click::handle_click(&weak, position)
    }));
    let resize = inner.resize_source.observe(
        container,
        Rc::new({
            let weak = weak.clone();
            move || resize::handle_resize(&weak)
        }),
    );
    if resize.is_none() {
        log::debug!("📐 [MAP] Sin observación de tamaño en este entorno");
    }
    let corrective = inner.scheduler.once(
        inner.options.corrective_delay_ms,
        Box::new(move || corrective_recenter(&weak)),
    );

    inner.mounted = Some(Mounted {
        map,
        marker,
        listener,
        marker_at: center,
        centered_at: center,
        corrective_done: false,
        resize,
        corrective: Some(corrective),
    });
    inner.state = WidgetState::Initialized;
    log::info!(
        "✅ [MAP] Mapa inicializado en ({}, {})",
        center.latitude,
        center.longitude
    );
    inner.state
}

/// Muchos mapas embebidos miden mal su contenedor en el primer pintado dentro
/// de un layout flexible: un único resize + re-centrado poco después.
fn corrective_recenter<P: MapProvider>(weak: &Weak<RefCell<BridgeInner<P>>>) {
    let Some(cell) = weak.upgrade() else {
        return;
    };
    let Ok(mut guard) = cell.try_borrow_mut() else {
        return;
    };
    let inner = &mut *guard;
    if inner.state != WidgetState::Initialized {
        return;
    }
    let latest = inner.latest;
    let Some(mounted) = inner.mounted.as_mut() else {
        return;
    };
    if mounted.corrective_done {
        return;
    }

    mounted.corrective_done = true;
    mounted.map.trigger_resize();
    mounted.map.set_center(latest);
    mounted.centered_at = latest;
    log::debug!("🎯 [MAP] Re-centrado correctivo aplicado");
}
