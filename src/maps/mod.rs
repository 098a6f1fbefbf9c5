// Módulo de mapas con implementaciones específicas por plataforma

#[cfg(target_arch = "wasm32")]
pub mod web;

// Traits comunes para todas las plataformas
pub mod traits;

pub use traits::{ListenerId, MapMarker, MapProvider, MapWidget};

/// Error del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    NotReady,
    LibraryUnavailable,
    CreationFailed(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::NotReady => write!(f, "Map is not ready"),
            MapError::LibraryUnavailable => write!(f, "Map library is not loaded"),
            MapError::CreationFailed(msg) => write!(f, "Map creation failed: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
