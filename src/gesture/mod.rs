//! Pinch-gesture input.
//!
//! Hand landmark detection runs in an external process. This module turns its
//! landmark stream into discrete pinch events delivered over a channel that
//! the game controller drains between ticks.

pub mod feed;
pub mod pinch;

pub use feed::LandmarkFeed;
pub use pinch::{PinchDetector, PinchState};

use crossbeam_channel::Receiver;
use thiserror::Error;

/// Events emitted by a gesture source.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// The source opened and is tracking.
    Ready,
    /// The source could not be opened; play continues without gestures.
    Unavailable(String),
    /// One open-to-pinched transition.
    Pinch,
    /// Hand visibility changed.
    Hand(bool),
}

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("gesture tracking is not configured")]
    NotConfigured,

    #[error("gesture tracking already started")]
    AlreadyStarted,

    #[error("could not start gesture tracking: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Capability state as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureStatus {
    /// Not started yet.
    #[default]
    Off,
    /// Started, waiting for the source to report in.
    Starting,
    Ready,
    /// Unavailable for the rest of the session.
    Unavailable,
}

/// A pinch event producer that can be started and torn down.
pub trait GestureInput {
    /// Begin tracking in the background and return the event channel.
    fn start(&mut self) -> Result<Receiver<GestureEvent>, GestureError>;

    /// Stop tracking and release the underlying source.
    fn stop(&mut self);
}

/// Keyboard-only sessions.
#[derive(Debug, Default)]
pub struct NoGesture;

impl GestureInput for NoGesture {
    fn start(&mut self) -> Result<Receiver<GestureEvent>, GestureError> {
        Err(GestureError::NotConfigured)
    }

    fn stop(&mut self) {}
}

/// Gesture source fed from a caller-owned channel.
#[derive(Debug)]
pub struct ChannelGesture {
    rx: Option<Receiver<GestureEvent>>,
}

impl ChannelGesture {
    pub fn new(rx: Receiver<GestureEvent>) -> Self {
        Self { rx: Some(rx) }
    }
}

impl GestureInput for ChannelGesture {
    fn start(&mut self) -> Result<Receiver<GestureEvent>, GestureError> {
        self.rx.take().ok_or(GestureError::AlreadyStarted)
    }

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_no_gesture_reports_not_configured() {
        let mut g = NoGesture;
        assert!(matches!(g.start(), Err(GestureError::NotConfigured)));
    }

    #[test]
    fn test_channel_gesture_starts_once() {
        let (tx, rx) = unbounded();
        let mut g = ChannelGesture::new(rx);
        let events = g.start().unwrap();
        tx.send(GestureEvent::Pinch).unwrap();
        assert_eq!(events.try_recv().unwrap(), GestureEvent::Pinch);
        assert!(matches!(g.start(), Err(GestureError::AlreadyStarted)));
    }
}
