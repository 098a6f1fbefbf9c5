pub const DEFAULT_MAPBOX_SCRIPT_URL: &str =
    "https://api.mapbox.com/mapbox-gl-js/v3.6.0/mapbox-gl.js";

pub const DEFAULT_MAPBOX_CSS_URL: &str =
    "https://api.mapbox.com/mapbox-gl-js/v3.6.0/mapbox-gl.css";

/// Imagen satelital: el operador elige tejados
pub const DEFAULT_MAPBOX_STYLE_URL: &str = "mapbox://styles/mapbox/satellite-streets-v12";

pub const DEFAULT_CENTER_LAT: f64 = 12.8604075;
pub const DEFAULT_CENTER_LNG: f64 = 77.6625644;
pub const DEFAULT_ZOOM: f64 = 18.0;

/// Espera antes del re-centrado correctivo tras crear el mapa (ms)
pub const DEFAULT_CORRECTIVE_DELAY_MS: u32 = 300;

/// Tolerancia para comparar posiciones tras un resize
pub const COORDINATE_EPSILON: f64 = 1e-9;
