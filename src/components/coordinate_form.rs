use yew::prelude::*;

use crate::models::Coordinates;

#[derive(Properties, PartialEq, Clone)]
pub struct CoordinateFormProps {
    pub latitude: String,
    pub longitude: String,
    pub on_latitude_input: Callback<String>,
    pub on_longitude_input: Callback<String>,
}

/// Entrada tecleada de latitud/longitud
#[function_component(CoordinateForm)]
pub fn coordinate_form(props: &CoordinateFormProps) -> Html {
    let on_lat = {
        let cb = props.on_latitude_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let on_lng = {
        let cb = props.on_longitude_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };

    let invalid = Coordinates::parse(&props.latitude, &props.longitude).is_none();

    html! {
        <div class={classes!("coordinate-form", invalid.then_some("coordinate-form--invalid"))}>
            <label>
                {"Latitude"}
                <input type="text" inputmode="decimal" value={props.latitude.clone()} oninput={on_lat} />
            </label>
            <label>
                {"Longitude"}
                <input type="text" inputmode="decimal" value={props.longitude.clone()} oninput={on_lng} />
            </label>
        </div>
    }
}
