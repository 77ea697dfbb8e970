/// yt-clear-interface - Browser extension that hides parts of the YouTube interface
/// Built with Rust + WASM + Yew

pub mod descriptor;
pub mod dom;
pub mod preferences;
pub mod reconciler;
pub mod settings;
pub mod watch;
mod content;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Hide the selected regions on the current YouTube page
#[wasm_bindgen]
pub fn start_content_script() {
    content::start();
}

// Start the Yew app for the options page
#[wasm_bindgen]
pub fn start_options_page() {
    yew::Renderer::<ui::options::OptionsPage>::new().render();
}
