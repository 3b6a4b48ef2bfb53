//! Landmark stream reader.
//!
//! An external hand tracker writes one JSON frame per line to a file or FIFO:
//!
//! ```text
//! {"landmarks": [[0.41, 0.52, -0.01], [0.44, 0.49, -0.02], ...]}
//! {"landmarks": null}
//! ```
//!
//! Coordinates are normalised; only x and y are used. A background thread
//! runs the pinch detector over the stream and reports on a channel.

use super::pinch::PinchDetector;
use super::{GestureError, GestureEvent, GestureInput};
use crate::config::GameConfig;
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Deserialize;
use std::fs::File;
#[cfg(unix)]
use std::fs::OpenOptions;
use std::io::{self, BufRead, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Sleep between reads while the source has nothing new.
const IDLE_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Deserialize)]
struct LandmarkFrame {
    landmarks: Option<Vec<Vec<f64>>>,
}

/// Parse one line. `Ok(None)` means no hand in frame.
fn parse_frame(line: &str) -> Result<Option<Vec<[f64; 2]>>, String> {
    let frame: LandmarkFrame = serde_json::from_str(line).map_err(|e| e.to_string())?;
    let Some(points) = frame.landmarks else {
        return Ok(None);
    };
    points
        .iter()
        .map(|p| match p.as_slice() {
            [x, y, ..] => Ok([*x, *y]),
            _ => Err(format!("landmark with {} coordinates", p.len())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Turns landmark lines into gesture events, tracking hand visibility.
struct FrameHandler<'a> {
    detector: &'a mut PinchDetector,
    visible: bool,
}

impl<'a> FrameHandler<'a> {
    fn new(detector: &'a mut PinchDetector) -> Self {
        Self {
            detector,
            visible: false,
        }
    }

    /// Returns false once the receiver has gone away.
    fn handle_line(&mut self, line: &str, tx: &Sender<GestureEvent>) -> bool {
        if line.trim().is_empty() {
            return true;
        }
        let frame = match parse_frame(line) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("skipping landmark line: {}", e);
                return true;
            }
        };

        let mut events = Vec::new();
        match frame {
            Some(points) => {
                if !self.visible {
                    self.visible = true;
                    events.push(GestureEvent::Hand(true));
                }
                if self.detector.update_landmarks(&points) {
                    events.push(GestureEvent::Pinch);
                }
            }
            None => {
                if self.visible {
                    self.visible = false;
                    events.push(GestureEvent::Hand(false));
                }
            }
        }
        events.into_iter().all(|event| tx.send(event).is_ok())
    }

    fn finish(self, tx: &Sender<GestureEvent>) {
        if self.visible {
            let _ = tx.send(GestureEvent::Hand(false));
        }
    }
}

/// Run the detector over `reader` until EOF, a read error, `stop`, or the
/// receiver going away. Malformed lines are skipped.
pub fn pump<R: BufRead>(
    reader: R,
    detector: &mut PinchDetector,
    stop: &AtomicBool,
    tx: &Sender<GestureEvent>,
) {
    let mut handler = FrameHandler::new(detector);
    for line in reader.lines() {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("landmark stream read failed: {}", e);
                break;
            }
        };
        if !handler.handle_line(&line, tx) {
            return;
        }
    }
    handler.finish(tx);
}

/// Open the landmark source without blocking. Returns the file and whether
/// it is a FIFO, which is followed past EOF until stopped.
#[cfg(unix)]
fn open_source(path: &Path) -> io::Result<(File, bool)> {
    use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};

    let file = OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)?;
    let follow = file.metadata()?.file_type().is_fifo();
    Ok((file, follow))
}

#[cfg(not(unix))]
fn open_source(path: &Path) -> io::Result<(File, bool)> {
    Ok((File::open(path)?, false))
}

/// Split complete lines off the front of `pending` and hand them over.
fn drain_lines(
    pending: &mut Vec<u8>,
    handler: &mut FrameHandler<'_>,
    tx: &Sender<GestureEvent>,
) -> bool {
    while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
        let raw: Vec<u8> = pending.drain(..=pos).collect();
        if !handler.handle_line(&String::from_utf8_lossy(&raw), tx) {
            return false;
        }
    }
    true
}

/// Read `file` until EOF (regular files) or `stop`. Reads never block, so
/// the stop flag is seen within one idle poll even when the writer is silent.
fn follow_source(
    mut file: File,
    follow: bool,
    detector: &mut PinchDetector,
    stop: &AtomicBool,
    tx: &Sender<GestureEvent>,
) {
    let mut handler = FrameHandler::new(detector);
    let mut pending = Vec::new();
    let mut chunk = [0u8; 4096];

    while !stop.load(Ordering::Relaxed) {
        match file.read(&mut chunk) {
            Ok(0) if follow => thread::sleep(IDLE_POLL),
            Ok(0) => {
                if !pending.is_empty() {
                    pending.push(b'\n');
                    if !drain_lines(&mut pending, &mut handler, tx) {
                        return;
                    }
                }
                break;
            }
            Ok(n) => {
                pending.extend_from_slice(&chunk[..n]);
                if !drain_lines(&mut pending, &mut handler, tx) {
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(IDLE_POLL),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                tracing::warn!("landmark stream read failed: {}", e);
                break;
            }
        }
    }
    handler.finish(tx);
}

/// Gesture source backed by a landmark file or FIFO.
#[derive(Debug)]
pub struct LandmarkFeed {
    path: PathBuf,
    pinch_threshold: f64,
    release_threshold: f64,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LandmarkFeed {
    pub fn new(path: impl Into<PathBuf>, pinch_threshold: f64, release_threshold: f64) -> Self {
        Self {
            path: path.into(),
            pinch_threshold,
            release_threshold,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Feed for the configured landmark path, if any.
    pub fn from_config(config: &GameConfig) -> Option<Self> {
        config.landmarks_path.as_ref().map(|path| {
            Self::new(path, config.pinch_threshold, config.release_threshold)
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

fn run_feed(
    path: PathBuf,
    mut detector: PinchDetector,
    stop: Arc<AtomicBool>,
    tx: Sender<GestureEvent>,
) {
    let (file, follow) = match open_source(&path) {
        Ok(opened) => opened,
        Err(e) => {
            let _ = tx.send(GestureEvent::Unavailable(format!("{}: {}", path.display(), e)));
            return;
        }
    };
    if tx.send(GestureEvent::Ready).is_err() {
        return;
    }
    follow_source(file, follow, &mut detector, &stop, &tx);
    tracing::debug!("landmark feed {} closed", path.display());
}

impl GestureInput for LandmarkFeed {
    fn start(&mut self) -> Result<Receiver<GestureEvent>, GestureError> {
        if self.handle.is_some() {
            return Err(GestureError::AlreadyStarted);
        }
        let (tx, rx) = unbounded();
        let stop = Arc::new(AtomicBool::new(false));
        self.stop = Arc::clone(&stop);

        let path = self.path.clone();
        let detector = PinchDetector::new(self.pinch_threshold, self.release_threshold);
        let handle = thread::Builder::new()
            .name("landmark-feed".to_string())
            .spawn(move || run_feed(path, detector, stop, tx))?;
        self.handle = Some(handle);
        Ok(rx)
    }

    /// Signal the reader thread and wait for it to close the source.
    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("landmark feed thread panicked");
            }
        }
    }
}

impl Drop for LandmarkFeed {
    fn drop(&mut self) {
        self.stop();
    }
}
