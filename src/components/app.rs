use yew::prelude::*;

use crate::config::CONFIG;
use crate::models::Coordinates;
use super::{CoordinateForm, CoordinatePicker};

fn format_degrees(value: f64) -> String {
    format!("{:.7}", value)
}

/// Shell de la app: dueña de las coordenadas canónicas
#[function_component(App)]
pub fn app() -> Html {
    let coordinates = use_state(|| CONFIG.default_center());
    let latitude_text = use_state(|| format_degrees(coordinates.latitude));
    let longitude_text = use_state(|| format_degrees(coordinates.longitude));

    // Entrada tecleada: solo valores parseables llegan al estado canónico
    let on_latitude_input = {
        let coordinates = coordinates.clone();
        let latitude_text = latitude_text.clone();
        let longitude_text = longitude_text.clone();
        Callback::from(move |value: String| {
            if let Some(parsed) = Coordinates::parse(&value, &longitude_text) {
                coordinates.set(parsed);
            }
            latitude_text.set(value);
        })
    };
    let on_longitude_input = {
        let coordinates = coordinates.clone();
        let latitude_text = latitude_text.clone();
        let longitude_text = longitude_text.clone();
        Callback::from(move |value: String| {
            if let Some(parsed) = Coordinates::parse(&latitude_text, &value) {
                coordinates.set(parsed);
            }
            longitude_text.set(value);
        })
    };

    // Click en el mapa: la app siempre acepta la propuesta
    let on_coordinate_change = {
        let coordinates = coordinates.clone();
        let latitude_text = latitude_text.clone();
        let longitude_text = longitude_text.clone();
        Callback::from(move |(lat, lng): (f64, f64)| {
            log::info!("📍 [APP] Coordenadas elegidas en el mapa: ({}, {})", lat, lng);
            coordinates.set(Coordinates::new(lat, lng));
            latitude_text.set(format_degrees(lat));
            longitude_text.set(format_degrees(lng));
        })
    };

    html! {
        <main class="site-picker">
            <CoordinateForm
                latitude={(*latitude_text).clone()}
                longitude={(*longitude_text).clone()}
                {on_latitude_input}
                {on_longitude_input}
            />
            <CoordinatePicker
                coordinates={*coordinates}
                {on_coordinate_change}
            />
        </main>
    }
}
