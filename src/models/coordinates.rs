use serde::{Deserialize, Serialize};

use crate::utils::constants::COORDINATE_EPSILON;

/// Coordenadas geográficas
///
/// El valor canónico pertenece a la aplicación anfitriona; el mapa solo lo lee
/// y propone cambios (clicks).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self {
            latitude: lat,
            longitude: lng,
        }
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// (lat, lng), el formato del callback hacia la aplicación
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Igualdad con tolerancia de punto flotante
    pub fn same_position(&self, other: &Coordinates) -> bool {
        (self.latitude - other.latitude).abs() <= COORDINATE_EPSILON
            && (self.longitude - other.longitude).abs() <= COORDINATE_EPSILON
    }

    /// Parsear lo que el operador escribe en el formulario
    pub fn parse(latitude: &str, longitude: &str) -> Option<Coordinates> {
        let latitude: f64 = latitude.trim().parse().ok()?;
        let longitude: f64 = longitude.trim().parse().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Coordinates { latitude, longitude })
    }
}
