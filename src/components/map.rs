use yew::prelude::*;

use crate::bridge::WidgetState;
use crate::hooks::use_map;
use crate::models::Coordinates;
use crate::services::ScriptLoader;

#[derive(Properties, PartialEq)]
pub struct CoordinatePickerProps {
    pub coordinates: Coordinates,
    pub on_coordinate_change: Callback<(f64, f64)>,
    /// Por defecto, el loader global del proceso
    #[prop_or_default]
    pub loader: Option<ScriptLoader>,
}

#[function_component(CoordinatePicker)]
pub fn coordinate_picker(props: &CoordinatePickerProps) -> Html {
    let node_ref = use_node_ref();
    let loader = props.loader.clone().unwrap_or_else(ScriptLoader::global);

    let map = use_map(
        node_ref.clone(),
        props.coordinates,
        props.on_coordinate_change.clone(),
        loader,
    );

    let class = match *map.state {
        WidgetState::Unavailable => "coordinate-picker coordinate-picker--unavailable",
        _ => "coordinate-picker",
    };

    html! {
        <div ref={node_ref} class={class} />
    }
}
