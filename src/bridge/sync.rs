use super::MapBridge;
use crate::maps::{MapMarker, MapProvider, MapWidget};
use crate::models::Coordinates;

impl<P: MapProvider + 'static> MapBridge<P> {
    /// Llevar al mapa las coordenadas que decidió la app.
    ///
    /// Solo escribe en el mapa, nunca hacia la app. Sin mapa todavía, solo se
    /// recuerda el valor para la inicialización. Devuelve si hubo alguna
    /// mutación del widget.
    pub fn sync(&self, coordinates: Coordinates) -> bool {
        let Ok(mut guard) = self.inner.try_borrow_mut() else {
            log::warn!("⚠️ [MAP] sync reentrante ignorado");
            return false;
        };
        let inner = &mut *guard;
        inner.latest = coordinates;

        let Some(mounted) = inner.mounted.as_mut() else {
            return false;
        };

        let mut changed = false;
        if mounted.marker_at != coordinates {
            mounted.marker.set_position(coordinates);
            mounted.marker_at = coordinates;
            changed = true;
        }
        if mounted.centered_at != coordinates {
            mounted.map.set_center(coordinates);
            mounted.centered_at = coordinates;
            changed = true;
        }

        if changed {
            log::debug!(
                "🔄 [MAP] Sincronizado a ({}, {})",
                coordinates.latitude,
                coordinates.longitude
            );
        }
        changed
    }
}
