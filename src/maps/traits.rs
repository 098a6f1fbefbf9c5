use std::rc::Rc;

use crate::models::Coordinates;
use super::MapError;

/// Identificador de un listener de click registrado en el mapa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Proveedor de mapas: sabe crear un mapa dentro de un contenedor.
///
/// El puente solo depende de estas capacidades, nunca del modelo de objetos de
/// un proveedor concreto (Mapbox en web, dobles en tests).
pub trait MapProvider {
    type Container: Clone + 'static;
    type Map: MapWidget + 'static;

    /// Crear el mapa centrado en `center`
    fn create_map(
        &self,
        container: &Self::Container,
        center: Coordinates,
        zoom: f64,
    ) -> Result<Self::Map, MapError>;
}

/// Instancia viva de un mapa externo
///
/// Los handles externos son referencias mutables compartidas, por eso todos los
/// métodos toman `&self`.
pub trait MapWidget {
    type Marker: MapMarker + 'static;

    /// Crear un marcador en `position`
    fn create_marker(&self, position: Coordinates) -> Result<Self::Marker, MapError>;

    fn set_center(&self, center: Coordinates);

    fn center(&self) -> Coordinates;

    /// Forzar al mapa a recalcular su tamaño
    fn trigger_resize(&self);

    fn add_click_listener(&self, listener: Rc<dyn Fn(Coordinates)>) -> ListenerId;

    fn remove_click_listener(&self, id: ListenerId);

    /// Liberar el mapa; el handle no se usa después
    fn dispose(&self);
}

/// Marcador único dibujado sobre el mapa
pub trait MapMarker {
    fn set_position(&self, position: Coordinates);

    fn position(&self) -> Coordinates;

    fn remove(&self);
}
