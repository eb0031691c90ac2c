use crate::constants::*;
use crate::dom;
use tree_core::{PhotoChange, PhotoOverlay, QualityPreset, SceneMode, Status};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn set_status(document: &web::Document, status: &Status) {
    dom::set_text(document, STATUS_ID, &status.to_string());
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        _ = el.class_list().toggle_with_force("error", status.is_error());
    }
}

/// Button label names the mode a click switches to.
pub fn update_mode_button(document: &web::Document, mode: SceneMode) {
    let label = match mode {
        SceneMode::Chaos => "Form tree",
        SceneMode::Formed => "Scatter",
    };
    dom::set_text(document, MODE_BUTTON_ID, label);
}

pub fn update_quality_button(document: &web::Document, preset: QualityPreset) {
    dom::set_text(document, QUALITY_BUTTON_ID, &format!("Quality: {}", preset));
}

pub fn apply_photo_change(document: &web::Document, change: &PhotoChange, photo: &PhotoOverlay) {
    match change {
        PhotoChange::Shown { .. } => {
            if let Some(url) = photo.current_url() {
                if let Some(img) = document
                    .get_element_by_id(PHOTO_IMAGE_ID)
                    .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
                {
                    img.set_src(url);
                }
            }
            dom::set_hidden(document, PHOTO_OVERLAY_ID, false);
        }
        PhotoChange::Hidden => dom::set_hidden(document, PHOTO_OVERLAY_ID, true),
    }
}

/// Debug overlay: live webcam preview and the last classifier label.
pub fn toggle_debug(document: &web::Document) -> bool {
    let show = dom::is_hidden(document, DEBUG_OVERLAY_ID);
    dom::set_hidden(document, DEBUG_OVERLAY_ID, !show);
    show
}

pub fn set_debug_label(document: &web::Document, label: Option<&str>) {
    dom::set_text(document, DEBUG_LABEL_ID, label.unwrap_or("-"));
}
