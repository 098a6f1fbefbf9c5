use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::BridgeInner;
use crate::maps::{MapProvider, MapWidget};

/// Observación activa del tamaño del contenedor; soltarla la desconecta
pub struct ResizeSubscription {
    _guard: Box<dyn Any>,
}

impl ResizeSubscription {
    pub fn new(guard: impl Any) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// Fuente de notificaciones de tamaño de un contenedor.
///
/// Devuelve `None` si el entorno no sabe observar tamaños.
pub trait ResizeSource<C> {
    fn observe(&self, container: &C, on_resize: Rc<dyn Fn()>) -> Option<ResizeSubscription>;
}

/// Entorno sin observación de tamaño
pub struct NoResize;

impl<C> ResizeSource<C> for NoResize {
    fn observe(&self, _container: &C, _on_resize: Rc<dyn Fn()>) -> Option<ResizeSubscription> {
        None
    }
}

/// El contenedor cambió de tamaño: recalcular layout sin mover el centro
pub(super) fn handle_resize<P: MapProvider>(weak: &Weak<RefCell<BridgeInner<P>>>) {
    let Some(cell) = weak.upgrade() else {
        return;
    };
    let Ok(inner) = cell.try_borrow() else {
        log::warn!("⚠️ [MAP] Resize durante otra operación del puente, ignorado");
        return;
    };
    let Some(mounted) = inner.mounted.as_ref() else {
        return;
    };

    let center = mounted.map.center();
    mounted.map.trigger_resize();
    mounted.map.set_center(center);
    log::debug!(
        "📐 [MAP] Resize, centro restaurado en ({}, {})",
        center.latitude,
        center.longitude
    );
}
