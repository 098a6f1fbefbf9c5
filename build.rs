use std::env;
use std::fs;
use std::path::Path;

// Claves que config.rs lee con option_env!
const FORWARDED_KEYS: &[&str] = &[
    "MAPBOX_ACCESS_TOKEN",
    "MAPBOX_SCRIPT_URL",
    "MAPBOX_CSS_URL",
    "MAPBOX_STYLE_URL",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "DEFAULT_MAP_ZOOM",
    "MAP_CORRECTIVE_DELAY_MS",
    "ENABLE_LOGGING",
];

fn main() {
    for key in FORWARDED_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");

    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=.env exists but could not be read, using defaults");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        // Solo las claves conocidas, y sin pisar variables ya exportadas
        if FORWARDED_KEYS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value.trim().trim_matches('"'));
        }
    }
}
