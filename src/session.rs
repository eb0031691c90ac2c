//! Gesture session lifecycle: recognizer + camera start-up, the rate-limited
//! inference loop, and teardown on quality change.

use crate::app::App;
use crate::constants::*;
use crate::frame::{request_frame, TickCell};
use crate::overlay;
use crate::vision::{WebCamera, WebRecognizer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{
    init_with_fallback, Classifier, GestureError, GesturePipeline, QualityPreset, Status,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type WebPipeline = GesturePipeline<WebRecognizer, WebCamera>;

pub struct GestureSession {
    pipeline: Rc<RefCell<WebPipeline>>,
    inference: InferenceLoop,
}

impl GestureSession {
    fn shutdown(self) {
        self.inference.cancel();
        self.pipeline.borrow_mut().teardown();
    }
}

/// Runs at display pace via `requestAnimationFrame`; the pipeline's throttle
/// decides which ticks do classifier work.
struct InferenceLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickCell,
}

impl InferenceLoop {
    fn start(app: App, pipeline: Rc<RefCell<WebPipeline>>) -> Self {
        let raf_id = Rc::new(Cell::new(None));
        let tick: TickCell = Rc::new(RefCell::new(None));
        let tick_next = Rc::downgrade(&tick);
        let raf_next = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_next.set(None);
            app.poll_gestures(&pipeline);
            // a cancelled loop has dropped its closure, so nothing is rescheduled
            if let Some(tick) = tick_next.upgrade() {
                raf_next.set(request_frame(&tick));
            }
        }) as Box<dyn FnMut()>));
        raf_id.set(request_frame(&tick));
        Self { raf_id, tick }
    }

    fn cancel(self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

fn webcam_element(document: &web::Document) -> Option<web::HtmlVideoElement> {
    document
        .get_element_by_id(VIDEO_ID)
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
}

async fn open_pipeline(
    app: &App,
    video: web::HtmlVideoElement,
    preset: QualityPreset,
) -> Result<WebPipeline, GestureError> {
    app.set_status(&Status::DownloadingModel);
    let (mut recognizer, delegate) = init_with_fallback(|d| {
        WebRecognizer::create(GESTURE_MODEL_URL, VISION_WASM_BASE, d, video.clone())
    })
    .await?;
    log::info!("[gesture] recognizer on {} delegate", delegate.as_str());

    app.set_status(&Status::RequestingCamera);
    let camera = match WebCamera::open(video, preset.camera()).await {
        Ok(c) => c,
        Err(e) => {
            recognizer.close();
            return Err(e);
        }
    };
    Ok(GesturePipeline::new(
        recognizer,
        camera,
        preset.max_inference_hz(),
    ))
}

/// Start a gesture session in the background. Failures leave the app on
/// manual control with the error shown as status.
pub fn start(app: App, preset: QualityPreset) {
    let generation = app.generation.get();
    let Some(video) = webcam_element(&app.document) else {
        log::warn!("[camera] missing #{}", VIDEO_ID);
        app.set_status(&Status::ManualOnly);
        return;
    };
    spawn_local(async move {
        let result = open_pipeline(&app, video, preset).await;
        if app.generation.get() != generation {
            // superseded by a quality change; dropping releases everything
            log::info!("[gesture] stale session discarded");
            return;
        }
        match result {
            Ok(pipeline) => {
                let pipeline = Rc::new(RefCell::new(pipeline));
                let inference = InferenceLoop::start(app.clone(), pipeline.clone());
                *app.session.borrow_mut() = Some(GestureSession {
                    pipeline,
                    inference,
                });
                app.set_status(&Status::Ready);
            }
            Err(e) => {
                log::error!("[gesture] {}; manual control only", e);
                app.set_status(&Status::from(&e));
            }
        }
    });
}

/// Cancel the inference loop, release the recognizer and camera, and drop any
/// photo the old session left on screen.
pub fn stop(app: &App) {
    app.generation.set(app.generation.get().wrapping_add(1));
    let session = app.session.borrow_mut().take();
    if let Some(session) = session {
        session.shutdown();
    }
    app.state.borrow_mut().set_rotation_speed(0.0);
    app.dismiss_photo();
    overlay::set_debug_label(&app.document, None);
}
