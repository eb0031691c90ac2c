use crate::dom;
use crate::events::keys::UiAction;
use crate::overlay;
use crate::session::{self, GestureSession, WebPipeline};
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{
    save_quality, PhotoOverlay, QualityPreset, Scene, SceneState, SettingsStore, Status,
};
use web_sys as web;

/// Handles shared by the render loop, the inference loop and UI callbacks.
/// Everything runs on the page's single thread, so `Rc<RefCell<..>>` is enough.
#[derive(Clone)]
pub struct App {
    /// Mode is written by UI actions and gesture commands; rotation speed only
    /// by the inference loop. The render loop only reads.
    pub state: Rc<RefCell<SceneState>>,
    /// Written by the render loop (morph step) and rebuilt on quality change.
    pub scene: Rc<RefCell<Scene>>,
    /// Written by pinch edges and explicit dismissal.
    pub photo: Rc<RefCell<PhotoOverlay>>,
    pub rng: Rc<RefCell<StdRng>>,
    pub settings: Rc<RefCell<Box<dyn SettingsStore>>>,
    pub session: Rc<RefCell<Option<GestureSession>>>,
    /// Bumped on every session stop so late async start-ups can tell they
    /// were superseded.
    pub generation: Rc<Cell<u32>>,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
}

impl App {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        scene: Scene,
        rng: StdRng,
        settings: Box<dyn SettingsStore>,
        photo: PhotoOverlay,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(SceneState::default())),
            scene: Rc::new(RefCell::new(scene)),
            photo: Rc::new(RefCell::new(photo)),
            rng: Rc::new(RefCell::new(rng)),
            settings: Rc::new(RefCell::new(settings)),
            session: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            document,
            canvas,
        }
    }

    pub fn preset(&self) -> QualityPreset {
        self.scene.borrow().preset()
    }

    pub fn set_status(&self, status: &Status) {
        log::info!("[status] {}", status);
        overlay::set_status(&self.document, status);
    }

    pub fn sync_canvas_size(&self) {
        dom::sync_canvas_backing_size(&self.canvas, self.preset().max_device_pixel_ratio());
    }

    pub fn dispatch(&self, action: UiAction) {
        match action {
            UiAction::ToggleMode => {
                let mode = self.state.borrow_mut().toggle_mode();
                log::info!("[mode] {}", mode);
                overlay::update_mode_button(&self.document, mode);
            }
            UiAction::ToggleDebug => {
                let visible = overlay::toggle_debug(&self.document);
                log::info!("[debug] overlay visible={}", visible);
            }
            UiAction::ToggleQuality => self.set_quality(self.preset().toggled()),
            UiAction::DismissPhoto => self.dismiss_photo(),
        }
    }

    pub fn dismiss_photo(&self) {
        let mut photo = self.photo.borrow_mut();
        if let Some(change) = photo.dismiss() {
            overlay::apply_photo_change(&self.document, &change, &photo);
        }
    }

    /// Persist the preset, stop the gesture session, rebuild every pool with
    /// the new counts and start a fresh session with the new constraints.
    pub fn set_quality(&self, preset: QualityPreset) {
        if let Err(e) = save_quality(self.settings.borrow_mut().as_mut(), preset) {
            log::warn!("[quality] not persisted: {}", e);
        }
        session::stop(self);
        self.scene
            .borrow_mut()
            .rebuild(preset, &mut *self.rng.borrow_mut());
        overlay::update_quality_button(&self.document, preset);
        self.sync_canvas_size();
        session::start(self.clone(), preset);
    }

    /// One inference-loop tick: poll the pipeline and reflect what changed.
    pub fn poll_gestures(&self, pipeline: &RefCell<WebPipeline>) {
        let outcome = {
            let mut state = self.state.borrow_mut();
            let mut photo = self.photo.borrow_mut();
            let mut rng = self.rng.borrow_mut();
            pipeline
                .borrow_mut()
                .poll(dom::now_ms(), &mut state, &mut photo, &mut *rng)
        };
        if outcome.mode_changed {
            overlay::update_mode_button(&self.document, self.state.borrow().mode());
        }
        if let Some(change) = outcome.photo {
            overlay::apply_photo_change(&self.document, &change, &self.photo.borrow());
        }
        if let Some(status) = outcome.status {
            let label = match &status {
                Status::Detected(label) => Some(label.as_str()),
                _ => None,
            };
            overlay::set_debug_label(&self.document, label);
            overlay::set_status(&self.document, &status);
        }
    }
}
