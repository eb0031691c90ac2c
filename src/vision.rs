//! Browser side of the gesture path: the MediaPipe recognizer behind a small
//! JS shim, and the webcam stream feeding it.

use js_sys::{Array, Object, Reflect};
use tree_core::{
    CameraConstraints, CameraFeed, Classification, Classifier, Delegate, GestureError, Landmark,
    RankedGestures, RecognizerOutput,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[wasm_bindgen(module = "/js/gesture_bridge.js")]
extern "C" {
    /// Resolves to a `GestureRecognizer` running in VIDEO mode.
    #[wasm_bindgen(js_name = createRecognizer)]
    fn create_recognizer(model_url: &str, wasm_base: &str, delegate: &str) -> js_sys::Promise;

    #[wasm_bindgen(catch, js_name = recognizeForVideo)]
    fn recognize_for_video(
        recognizer: &JsValue,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = closeRecognizer)]
    fn close_recognizer(recognizer: &JsValue);
}

fn js_message(e: &JsValue) -> String {
    Reflect::get(e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}

fn js_error_name(e: &JsValue) -> Option<String> {
    Reflect::get(e, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
}

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn get_f32(obj: &JsValue, key: &str) -> f32 {
    get(obj, key).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
}

pub struct WebRecognizer {
    handle: JsValue,
    video: web::HtmlVideoElement,
}

impl WebRecognizer {
    pub async fn create(
        model_url: &str,
        wasm_base: &str,
        delegate: Delegate,
        video: web::HtmlVideoElement,
    ) -> Result<Self, GestureError> {
        let handle = JsFuture::from(create_recognizer(model_url, wasm_base, delegate.as_str()))
            .await
            .map_err(|e| match delegate {
                Delegate::Gpu => GestureError::DelegateUnavailable("GPU", js_message(&e)),
                Delegate::Cpu => GestureError::ModelLoad(js_message(&e)),
            })?;
        Ok(Self { handle, video })
    }
}

/// Convert a `GestureRecognizerResult` into plain Rust data.
fn parse_result(result: &JsValue) -> RecognizerOutput {
    let mut out = RecognizerOutput::empty();
    if let Some(hands) = get(result, "landmarks") {
        for hand in Array::from(&hands).iter() {
            let points = Array::from(&hand)
                .iter()
                .map(|p| Landmark::new(get_f32(&p, "x"), get_f32(&p, "y"), get_f32(&p, "z")))
                .collect();
            out.hands.push(points);
        }
    }
    if let Some(gestures) = get(result, "gestures") {
        for per_hand in Array::from(&gestures).iter() {
            let ranked: RankedGestures = Array::from(&per_hand)
                .iter()
                .map(|c| {
                    let label = get(&c, "categoryName")
                        .and_then(|v| v.as_string())
                        .unwrap_or_default();
                    Classification::new(label, get_f32(&c, "score"))
                })
                .collect();
            out.gestures.push(ranked);
        }
    }
    out
}

impl Classifier for WebRecognizer {
    fn recognize(&mut self, timestamp_ms: f64) -> Result<RecognizerOutput, GestureError> {
        let result = recognize_for_video(&self.handle, &self.video, timestamp_ms)
            .map_err(|e| GestureError::Inference(js_message(&e)))?;
        Ok(parse_result(&result))
    }

    fn close(&mut self) {
        close_recognizer(&self.handle);
    }
}

/// Live webcam stream attached to the page's `<video>` element.
pub struct WebCamera {
    stream: web::MediaStream,
    video: web::HtmlVideoElement,
}

impl WebCamera {
    pub async fn open(
        video: web::HtmlVideoElement,
        constraints: CameraConstraints,
    ) -> Result<Self, GestureError> {
        let devices = web::window()
            .ok_or_else(|| GestureError::CameraUnavailable("no window".into()))?
            .navigator()
            .media_devices()
            .map_err(|e| GestureError::CameraUnavailable(js_message(&e)))?;

        let video_opts = Object::new();
        let set = |obj: &Object, key: &str, value: JsValue| {
            _ = Reflect::set(obj, &JsValue::from_str(key), &value);
        };
        let ideal = |v: u32| {
            let o = Object::new();
            set(&o, "ideal", JsValue::from(v));
            JsValue::from(o)
        };
        set(&video_opts, "width", ideal(constraints.width));
        set(&video_opts, "height", ideal(constraints.height));
        set(&video_opts, "frameRate", ideal(constraints.frame_rate));
        set(&video_opts, "facingMode", JsValue::from_str("user"));
        let request = Object::new();
        set(&request, "video", video_opts.into());
        set(&request, "audio", JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(request.unchecked_ref::<web::MediaStreamConstraints>())
            .map_err(|e| GestureError::CameraUnavailable(js_message(&e)))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| match js_error_name(&e).as_deref() {
                Some("NotAllowedError") | Some("SecurityError") => {
                    GestureError::CameraDenied(js_message(&e))
                }
                _ => GestureError::CameraUnavailable(js_message(&e)),
            })?
            .unchecked_into();

        video.set_src_object(Some(&stream));
        video.set_muted(true);
        if let Ok(p) = video.play() {
            // autoplay may be rejected until the first user gesture
            if let Err(e) = JsFuture::from(p).await {
                log::warn!("[camera] video.play() rejected: {}", js_message(&e));
            }
        }
        log::info!(
            "[camera] stream started ({}x{}@{} requested)",
            constraints.width,
            constraints.height,
            constraints.frame_rate
        );
        Ok(Self { stream, video })
    }
}

impl CameraFeed for WebCamera {
    fn is_ready(&self) -> bool {
        // HAVE_CURRENT_DATA or better
        self.video.ready_state() >= 2 && self.video.video_width() > 0
    }

    fn stop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        // a newer session may already own the element
        if self.video.src_object().as_ref() == Some(&self.stream) {
            self.video.set_src_object(None);
        }
    }
}
