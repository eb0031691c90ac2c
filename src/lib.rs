#![cfg(target_arch = "wasm32")]
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use tree_core::{load_quality, PhotoOverlay, Scene, Status};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod session;
mod storage;
mod vision;

use app::App;
use constants::*;

fn wire_canvas_resize(app: &App) {
    app.sync_canvas_size();
    let app_resize = app.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        app_resize.sync_canvas_size();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let settings = storage::open_settings();
    let preset = load_quality(settings.as_ref());
    let mut rng = StdRng::from_entropy();
    let scene = Scene::new(preset, &mut rng);
    let app = App::new(
        document.clone(),
        canvas.clone(),
        scene,
        rng,
        settings,
        PhotoOverlay::new(PHOTO_URLS.iter().copied()),
    );
    app.set_status(&Status::Initializing);
    overlay::update_mode_button(&document, app.state.borrow().mode());
    overlay::update_quality_button(&document, preset);

    wire_canvas_resize(&app);
    events::wire_buttons(&document, &app);
    events::wire_global_keydown(&app);

    // Rendering starts without waiting for the gesture path
    let instances = app.scene.borrow().instance_count();
    let gpu = frame::init_gpu(&canvas, instances).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        app.clone(),
        canvas,
        gpu,
    )));
    frame::start_loop(frame_ctx);

    session::start(app, preset);
    Ok(())
}
