use wasm_bindgen::prelude::*;

mod app;
mod args;
mod board;
mod history;
mod utils;

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, args_error) = args::Args::from_fragment_or_default(&location_hash);
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    if let Some(err) = args_error {
        log::error!("ignoring location fragment {:?}: {}", location_hash, err);
    }
    log::debug!("seed: {:?}, segment: {:?}", args.seed, args.segment);

    let root = document()
        .get_element_by_id("bingo")
        .expect("Could not find id=\"bingo\" element");

    log::debug!("App started");
    yew::Renderer::<app::App>::with_root_and_props(root, args.into()).render();
}
