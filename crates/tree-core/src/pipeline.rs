//! Rate-limited gesture pipeline sitting between the external classifier and
//! the shared scene state.
//!
//! The classifier and camera are traits so the browser bindings and test
//! doubles plug in the same way. The pipeline owns both and releases them
//! exactly once, on [`GesturePipeline::teardown`] or drop.

use crate::error::GestureError;
use crate::gesture::{GestureEvent, GestureFrame, GestureProcessor, RecognizerOutput};
use crate::photo::{PhotoChange, PhotoOverlay};
use crate::state::SceneState;
use crate::status::Status;
use rand::Rng;
use std::future::Future;

/// Hardware backend requested from the classifier runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delegate {
    Gpu,
    Cpu,
}

impl Delegate {
    pub fn as_str(self) -> &'static str {
        match self {
            Delegate::Gpu => "GPU",
            Delegate::Cpu => "CPU",
        }
    }
}

/// Hand landmark and gesture classifier invoked on the current video frame.
pub trait Classifier {
    /// `timestamp_ms` strictly increases between calls.
    fn recognize(&mut self, timestamp_ms: f64) -> Result<RecognizerOutput, GestureError>;
    fn close(&mut self);
}

/// Live camera stream feeding the classifier.
pub trait CameraFeed {
    /// A frame is available for classification.
    fn is_ready(&self) -> bool;
    fn stop(&mut self);
}

/// Create a classifier on the GPU delegate, retrying once on the CPU delegate.
/// Only the CPU failure is reported when both fail.
pub async fn init_with_fallback<C, F, Fut>(mut create: F) -> Result<(C, Delegate), GestureError>
where
    F: FnMut(Delegate) -> Fut,
    Fut: Future<Output = Result<C, GestureError>>,
{
    match create(Delegate::Gpu).await {
        Ok(c) => {
            log::info!("[gesture] classifier ready on GPU delegate");
            Ok((c, Delegate::Gpu))
        }
        Err(e) => {
            log::warn!("[gesture] GPU delegate failed ({}), retrying on CPU", e);
            let c = create(Delegate::Cpu).await?;
            log::info!("[gesture] classifier ready on CPU delegate");
            Ok((c, Delegate::Cpu))
        }
    }
}

/// Caps classifier calls to a maximum rate. Accepted timestamps are at least
/// one interval apart, so they strictly increase.
#[derive(Clone, Debug)]
pub struct InferenceThrottle {
    min_interval_ms: f64,
    last_run_ms: Option<f64>,
}

impl InferenceThrottle {
    pub fn from_hz(max_hz: f32) -> Self {
        let hz = if max_hz.is_finite() && max_hz > 0.0 {
            max_hz as f64
        } else {
            1.0
        };
        Self {
            min_interval_ms: 1000.0 / hz,
            last_run_ms: None,
        }
    }

    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    /// `Some(timestamp)` when enough time has passed since the last run.
    pub fn ready(&mut self, now_ms: f64) -> Option<f64> {
        if let Some(last) = self.last_run_ms {
            if now_ms - last < self.min_interval_ms {
                return None;
            }
        }
        self.last_run_ms = Some(now_ms);
        Some(now_ms)
    }
}

/// What one processed frame changed, for the UI to reflect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureOutcome {
    pub status: Option<Status>,
    pub photo: Option<PhotoChange>,
    pub mode_changed: bool,
}

/// Apply a processed frame to the shared state and photo overlay.
pub fn apply_gesture_frame<R: Rng + ?Sized>(
    frame: &GestureFrame,
    state: &mut SceneState,
    photo: &mut PhotoOverlay,
    rng: &mut R,
) -> GestureOutcome {
    let mut outcome = GestureOutcome::default();
    for ev in &frame.events {
        match ev {
            GestureEvent::PinchStart => {
                if let Some(change) = photo.on_pinch_start(rng) {
                    outcome.photo = Some(change);
                }
            }
            GestureEvent::PinchEnd => {
                if let Some(change) = photo.on_pinch_end() {
                    outcome.photo = Some(change);
                }
            }
            GestureEvent::OpenPalm | GestureEvent::ClosedFist => {
                if let Some(mode) = ev.command() {
                    outcome.mode_changed |= state.apply_command(mode);
                }
            }
            GestureEvent::None => {}
        }
    }
    state.set_rotation_speed(frame.rotation_speed);
    outcome
}

pub struct GesturePipeline<C: Classifier, F: CameraFeed> {
    classifier: Option<C>,
    camera: Option<F>,
    processor: GestureProcessor,
    throttle: InferenceThrottle,
    last_label: Option<String>,
    failed_frames: u64,
}

impl<C: Classifier, F: CameraFeed> GesturePipeline<C, F> {
    pub fn new(classifier: C, camera: F, max_inference_hz: f32) -> Self {
        Self {
            classifier: Some(classifier),
            camera: Some(camera),
            processor: GestureProcessor::new(),
            throttle: InferenceThrottle::from_hz(max_inference_hz),
            last_label: None,
            failed_frames: 0,
        }
    }

    /// Classifier and camera are still held.
    pub fn is_active(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn failed_frames(&self) -> u64 {
        self.failed_frames
    }

    /// Run at render pace; does classifier work only when the throttle allows
    /// and the camera has a frame. A failed frame is logged and skipped, and
    /// counts as no hand. A terminal error releases the pipeline.
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        state: &mut SceneState,
        photo: &mut PhotoOverlay,
        rng: &mut R,
    ) -> GestureOutcome {
        let Some(classifier) = self.classifier.as_mut() else {
            return GestureOutcome::default();
        };
        if !self.camera.as_ref().map(|c| c.is_ready()).unwrap_or(false) {
            state.set_rotation_speed(0.0);
            return GestureOutcome::default();
        }
        let Some(timestamp) = self.throttle.ready(now_ms) else {
            return GestureOutcome::default();
        };
        let output = match classifier.recognize(timestamp) {
            Ok(out) => out,
            Err(e) => {
                state.set_rotation_speed(0.0);
                if e.is_terminal() {
                    log::error!("[gesture] {}; manual control only", e);
                    self.teardown();
                    return GestureOutcome {
                        status: Some(Status::from(&e)),
                        ..GestureOutcome::default()
                    };
                }
                self.failed_frames += 1;
                log::warn!("[gesture] frame skipped: {}", e);
                return GestureOutcome::default();
            }
        };

        let frame = self.processor.process(&output);
        let mut outcome = apply_gesture_frame(&frame, state, photo, rng);

        let label = frame.top_label.filter(|l| l != "None");
        if label != self.last_label {
            outcome.status = Some(match &label {
                Some(l) => Status::Detected(l.clone()),
                None => Status::Ready,
            });
            self.last_label = label;
        }
        outcome
    }

    /// Release the classifier and stop the camera. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(mut classifier) = self.classifier.take() {
            classifier.close();
            log::info!("[gesture] classifier released");
        }
        if let Some(mut camera) = self.camera.take() {
            camera.stop();
            log::info!("[camera] stream stopped");
        }
        self.processor.reset();
        self.last_label = None;
    }
}

impl<C: Classifier, F: CameraFeed> Drop for GesturePipeline<C, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
