pub mod script_loader;
#[cfg(target_arch = "wasm32")]
pub mod script_injector;

pub use script_loader::*;
