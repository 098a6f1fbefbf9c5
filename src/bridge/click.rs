use std::cell::RefCell;
use std::rc::Weak;

use super::BridgeInner;
use crate::maps::{MapMarker, MapProvider};
use crate::models::Coordinates;

/// Click en el mapa: mover el marcador ya y proponer la coordenada a la app.
///
/// La app decide; si acepta, el valor vuelve a bajar por `sync` y como es el
/// mismo no provoca más cambios.
pub(super) fn handle_click<P: MapProvider>(
    weak: &Weak<RefCell<BridgeInner<P>>>,
    position: Coordinates,
) {
    let Some(cell) = weak.upgrade() else {
        return;
    };

    let on_change = {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            log::warn!("⚠️ [MAP] Click durante otra operación del puente, ignorado");
            return;
        };
        let Some(mounted) = guard.mounted.as_mut() else {
            return;
        };
        if mounted.marker_at != position {
            mounted.marker.set_position(position);
            mounted.marker_at = position;
        }
        guard.on_change.clone()
    };

    log::info!(
        "📍 [MAP] Click en ({}, {})",
        position.latitude,
        position.longitude
    );
    // Sin borrow activo: la app puede llamar a sync desde aquí
    on_change(position);
}
