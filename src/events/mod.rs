pub mod keys;

use crate::app::App;
use crate::constants::*;
use crate::dom;
use keys::{action_for_key, prevents_default, UiAction};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_buttons(document: &web::Document, app: &App) {
    let bindings = [
        (MODE_BUTTON_ID, UiAction::ToggleMode),
        (DEBUG_BUTTON_ID, UiAction::ToggleDebug),
        (QUALITY_BUTTON_ID, UiAction::ToggleQuality),
        (PHOTO_CLOSE_ID, UiAction::DismissPhoto),
    ];
    for (id, action) in bindings {
        let app = app.clone();
        dom::add_click_listener(document, id, move || app.dispatch(action));
    }
}

pub fn wire_global_keydown(app: &App) {
    if let Some(window) = web::window() {
        let app = app.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.repeat() {
                    return;
                }
                if let Some(action) = action_for_key(&ev.key()) {
                    if prevents_default(action) {
                        ev.prevent_default();
                    }
                    log::info!("[keys] {:?}", action);
                    app.dispatch(action);
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
