//! The speech capture capability interface and its implementations.
//!
//! Capture runs between an explicit `start` and `stop`. While active it
//! pushes [`TranscriptEvent`]s into the channel handed to `start`; every
//! interim transcript carries the full utterance so far, so the consumer
//! overwrites (never appends to) its compose buffer.

use tokio::sync::mpsc;

use crate::error::CaptureError;

/// Events emitted by an active capture.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    /// A live transcript update. Carries the full utterance so far.
    Interim(String),
    /// The recognizer stopped on its own (end of speech, timeout).
    Ended,
    /// The recognizer failed; capture is no longer active.
    Failed(CaptureError),
}

/// A continuous speech-to-text capability.
///
/// Start and stop are idempotent from the caller's perspective: starting
/// an already-started capture or stopping an already-stopped one is a
/// no-op. Implementations are selected once at startup; platforms without
/// a recognition primitive get [`UnsupportedCapture`].
pub trait SpeechCapture: Send {
    /// Whether the platform can capture speech at all.
    fn is_available(&self) -> bool;

    /// Begin capturing, delivering events into `events`.
    fn start(
        &mut self,
        events: mpsc::UnboundedSender<TranscriptEvent>,
    ) -> Result<(), CaptureError>;

    /// Stop capturing. No events are delivered after this returns.
    fn stop(&mut self);
}

/// The `None` implementation, wired when the platform has no
/// speech-recognition primitive.
#[derive(Debug, Default)]
pub struct UnsupportedCapture;

impl SpeechCapture for UnsupportedCapture {
    fn is_available(&self) -> bool {
        false
    }

    fn start(
        &mut self,
        _events: mpsc::UnboundedSender<TranscriptEvent>,
    ) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn stop(&mut self) {}
}

/// A capture that replays a fixed script of events when started.
///
/// Events are delivered synchronously into the channel on `start`; the
/// consumer drains them at its own pace. Used by controller tests and the
/// demo shell.
#[derive(Debug, Default)]
pub struct ScriptedCapture {
    script: Vec<TranscriptEvent>,
    active: bool,
}

impl ScriptedCapture {
    pub fn new(script: Vec<TranscriptEvent>) -> Self {
        Self {
            script,
            active: false,
        }
    }

    /// Whether a start has happened without a matching stop.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl SpeechCapture for ScriptedCapture {
    fn is_available(&self) -> bool {
        true
    }

    fn start(
        &mut self,
        events: mpsc::UnboundedSender<TranscriptEvent>,
    ) -> Result<(), CaptureError> {
        if self.active {
            return Ok(());
        }
        self.active = true;
        tracing::debug!(events = self.script.len(), "Scripted capture started");
        for event in &self.script {
            if events.send(event.clone()).is_err() {
                break;
            }
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.active = false;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_capture_reports_unavailable() {
        let capture = UnsupportedCapture;
        assert!(!capture.is_available());
    }

    #[test]
    fn test_unsupported_capture_start_fails() {
        let mut capture = UnsupportedCapture;
        let (tx, _rx) = mpsc::unbounded_channel();
        assert_eq!(capture.start(tx), Err(CaptureError::Unsupported));
    }

    #[test]
    fn test_unsupported_capture_stop_is_noop() {
        let mut capture = UnsupportedCapture;
        capture.stop();
        capture.stop();
    }

    #[test]
    fn test_scripted_capture_delivers_script() {
        let mut capture = ScriptedCapture::new(vec![
            TranscriptEvent::Interim("hel".to_string()),
            TranscriptEvent::Interim("hello".to_string()),
            TranscriptEvent::Ended,
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        capture.start(tx).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            TranscriptEvent::Interim("hel".to_string())
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            TranscriptEvent::Interim("hello".to_string())
        );
        assert_eq!(rx.try_recv().unwrap(), TranscriptEvent::Ended);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_scripted_capture_double_start_is_noop() {
        let mut capture = ScriptedCapture::new(vec![TranscriptEvent::Interim("x".to_string())]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        capture.start(tx.clone()).unwrap();
        capture.start(tx).unwrap();

        assert!(rx.try_recv().is_ok());
        // The second start delivered nothing.
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_scripted_capture_stop_allows_restart() {
        let mut capture = ScriptedCapture::new(vec![TranscriptEvent::Ended]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        capture.start(tx.clone()).unwrap();
        assert!(capture.is_active());
        capture.stop();
        assert!(!capture.is_active());

        capture.start(tx).unwrap();
        assert_eq!(rx.try_recv().unwrap(), TranscriptEvent::Ended);
        assert_eq!(rx.try_recv().unwrap(), TranscriptEvent::Ended);
    }

    #[test]
    fn test_scripted_capture_failure_event() {
        let mut capture =
            ScriptedCapture::new(vec![TranscriptEvent::Failed(CaptureError::PermissionDenied)]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        capture.start(tx).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            TranscriptEvent::Failed(CaptureError::PermissionDenied)
        );
    }
}
