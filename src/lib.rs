#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod constants;
mod detach;
mod dom;
mod events;
mod frame;
mod handles;
mod paint;
mod stage;
mod style;

pub use handles::{MagneticControl, MotionScene};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("motion-web starting");
    Ok(())
}
