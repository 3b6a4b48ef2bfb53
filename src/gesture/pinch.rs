//! Pinch classification with hysteresis.

use crate::constants::{INDEX_TIP, THUMB_TIP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchState {
    #[default]
    Open,
    Pinched,
}

/// Two-threshold pinch detector.
///
/// Fires once when the thumb-index distance drops below `pinch_threshold` and
/// rearms only after it rises above `release_threshold`.
#[derive(Debug, Clone)]
pub struct PinchDetector {
    pub state: PinchState,
    pub pinch_threshold: f64,
    pub release_threshold: f64,
}

impl PinchDetector {
    pub fn new(pinch_threshold: f64, release_threshold: f64) -> Self {
        Self {
            state: PinchState::Open,
            pinch_threshold,
            release_threshold,
        }
    }

    /// Feed one fingertip distance. Returns true on a new pinch.
    pub fn update(&mut self, distance: f64) -> bool {
        match self.state {
            PinchState::Open if distance < self.pinch_threshold => {
                self.state = PinchState::Pinched;
                true
            }
            PinchState::Pinched if distance > self.release_threshold => {
                self.state = PinchState::Open;
                false
            }
            _ => false,
        }
    }

    /// Feed a full landmark set (normalised coordinates). Short sets are ignored.
    pub fn update_landmarks(&mut self, landmarks: &[[f64; 2]]) -> bool {
        match fingertip_distance(landmarks) {
            Some(d) => self.update(d),
            None => false,
        }
    }
}

/// Distance between the thumb tip and index fingertip.
pub fn fingertip_distance(landmarks: &[[f64; 2]]) -> Option<f64> {
    let thumb = landmarks.get(THUMB_TIP)?;
    let index = landmarks.get(INDEX_TIP)?;
    let dx = thumb[0] - index[0];
    let dy = thumb[1] - index[1];
    Some((dx * dx + dy * dy).sqrt())
}
