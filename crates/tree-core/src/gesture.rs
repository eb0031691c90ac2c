//! Gesture signal processing: turns noisy per-frame classifier output into
//! edge-triggered pinch events, mode commands and a rotation speed.

use crate::constants::*;
use crate::state::SceneMode;
use smallvec::SmallVec;

/// Hand landmark in normalized image coordinates (x, y in 0..1, z relative
/// depth on roughly the same scale as x).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

pub type RankedGestures = SmallVec<[Classification; 4]>;

/// One classifier invocation: landmark sets and ranked gestures per hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizerOutput {
    pub hands: Vec<Vec<Landmark>>,
    pub gestures: Vec<RankedGestures>,
}

impl RecognizerOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn primary_hand(&self) -> Option<&[Landmark]> {
        self.hands.first().map(Vec::as_slice)
    }

    pub fn top_gesture(&self) -> Option<&Classification> {
        self.gestures.first().and_then(|ranked| ranked.first())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    OpenPalm,
    ClosedFist,
    PinchStart,
    PinchEnd,
    None,
}

impl GestureEvent {
    /// Mode command carried by the event, if any.
    pub fn command(self) -> Option<SceneMode> {
        match self {
            GestureEvent::OpenPalm => Some(SceneMode::Chaos),
            GestureEvent::ClosedFist => Some(SceneMode::Formed),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinchEdge {
    Start,
    End,
}

/// Thumb, index and middle tips all within [`PINCH_THRESHOLD`] of each other.
pub fn is_pinch(landmarks: &[Landmark]) -> bool {
    let (Some(thumb), Some(index), Some(middle)) = (
        landmarks.get(THUMB_TIP),
        landmarks.get(INDEX_TIP),
        landmarks.get(MIDDLE_TIP),
    ) else {
        return false;
    };
    thumb.distance(index) < PINCH_THRESHOLD
        && thumb.distance(middle) < PINCH_THRESHOLD
        && index.distance(middle) < PINCH_THRESHOLD
}

/// Debounces the per-frame pinch test into start/end edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct PinchTracker {
    active: bool,
}

impl PinchTracker {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, pinching: bool) -> Option<PinchEdge> {
        if pinching == self.active {
            return None;
        }
        self.active = pinching;
        Some(if pinching {
            PinchEdge::Start
        } else {
            PinchEdge::End
        })
    }

    pub fn reset(&mut self) {
        self.active = false;
    }
}

/// Discrete classifier label to mode command. Suppressed while pinching.
pub fn map_gesture(top: Option<&Classification>, pinching: bool) -> Option<GestureEvent> {
    if pinching {
        return None;
    }
    let top = top?;
    if top.score <= GESTURE_CONFIDENCE_MIN {
        return None;
    }
    match top.label.as_str() {
        "Open_Palm" => Some(GestureEvent::OpenPalm),
        "Closed_Fist" => Some(GestureEvent::ClosedFist),
        _ => None,
    }
}

/// Raw rotation speed from the wrist's horizontal offset to frame centre.
#[inline]
pub fn rotation_from_wrist(wrist_x: f32) -> f32 {
    (0.5 - wrist_x) * ROTATION_SCALE
}

#[inline]
pub fn apply_deadzone(speed: f32) -> f32 {
    if speed.abs() < ROTATION_DEADZONE || !speed.is_finite() {
        0.0
    } else {
        speed
    }
}

/// Result of processing one classifier frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureFrame {
    /// At most a pinch edge followed by a mode gesture.
    pub events: SmallVec<[GestureEvent; 2]>,
    pub rotation_speed: f32,
    pub hand_detected: bool,
    pub top_label: Option<String>,
}

impl GestureFrame {
    pub fn command(&self) -> Option<SceneMode> {
        self.events.iter().rev().find_map(|e| e.command())
    }

    pub fn has(&self, event: GestureEvent) -> bool {
        self.events.contains(&event)
    }
}

#[derive(Clone, Debug, Default)]
pub struct GestureProcessor {
    pinch: PinchTracker,
}

impl GestureProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinching(&self) -> bool {
        self.pinch.is_active()
    }

    pub fn process(&mut self, output: &RecognizerOutput) -> GestureFrame {
        let hand = output.primary_hand();
        // a lost hand ends any pinch in progress
        let pinching = hand.map(is_pinch).unwrap_or(false);

        let mut frame = GestureFrame {
            hand_detected: hand.is_some(),
            top_label: output.top_gesture().map(|c| c.label.clone()),
            ..Default::default()
        };

        match self.pinch.update(pinching) {
            Some(PinchEdge::Start) => frame.events.push(GestureEvent::PinchStart),
            Some(PinchEdge::End) => frame.events.push(GestureEvent::PinchEnd),
            None => {}
        }

        if let Some(ev) = map_gesture(output.top_gesture(), pinching) {
            frame.events.push(ev);
        }

        frame.rotation_speed = hand
            .and_then(|h| h.get(WRIST))
            .map(|wrist| apply_deadzone(rotation_from_wrist(wrist.x)))
            .unwrap_or(0.0);

        frame
    }

    pub fn reset(&mut self) {
        self.pinch.reset();
    }
}
