pub mod app;
pub mod coordinate_form;
pub mod map;

pub use app::App;
pub use coordinate_form::CoordinateForm;
pub use map::{CoordinatePicker, CoordinatePickerProps};
