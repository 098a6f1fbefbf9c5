use serde::{Deserialize, Serialize};

use crate::utils::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub mapbox_access_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_logging: true,
            map_config: MapConfig::default(),
            mapbox_access_token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub script_url: String,
    pub stylesheet_url: String,
    pub style_url: String,
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    pub corrective_delay_ms: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            script_url: DEFAULT_MAPBOX_SCRIPT_URL.to_string(),
            stylesheet_url: DEFAULT_MAPBOX_CSS_URL.to_string(),
            style_url: DEFAULT_MAPBOX_STYLE_URL.to_string(),
            default_center_lat: DEFAULT_CENTER_LAT,
            default_center_lng: DEFAULT_CENTER_LNG,
            default_zoom: DEFAULT_ZOOM,
            corrective_delay_ms: DEFAULT_CORRECTIVE_DELAY_MS,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                script_url: option_env!("MAPBOX_SCRIPT_URL")
                    .unwrap_or(DEFAULT_MAPBOX_SCRIPT_URL).to_string(),
                stylesheet_url: option_env!("MAPBOX_CSS_URL")
                    .unwrap_or(DEFAULT_MAPBOX_CSS_URL).to_string(),
                style_url: option_env!("MAPBOX_STYLE_URL")
                    .unwrap_or(DEFAULT_MAPBOX_STYLE_URL).to_string(),
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_CENTER_LAT),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_CENTER_LNG),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_ZOOM),
                corrective_delay_ms: option_env!("MAP_CORRECTIVE_DELAY_MS")
                    .and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_CORRECTIVE_DELAY_MS),
            },
            mapbox_access_token: option_env!("MAPBOX_ACCESS_TOKEN")
                .unwrap_or("").trim().to_string(),
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Obtiene el token de Mapbox
    pub fn mapbox_token(&self) -> &str {
        &self.mapbox_access_token
    }

    pub fn default_center(&self) -> crate::models::Coordinates {
        crate::models::Coordinates {
            latitude: self.map_config.default_center_lat,
            longitude: self.map_config.default_center_lng,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
