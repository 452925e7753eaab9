//! Print dispatch: the effectful half of printing.
//!
//! A composed document is injected into a hidden frame, printed once the
//! frame signals it is ready (or the settle limit passes, whichever comes
//! first), and the frame is removed after a fixed delay whether or not the
//! user actually printed.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::ChequebookError;

/// Timing policy for a print dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintTimings {
    /// Longest wait for the ready signal before printing anyway.
    pub settle_limit: Duration,
    /// Delay between the print call and removing the frame.
    pub remove_after: Duration,
}

impl Default for PrintTimings {
    fn default() -> Self {
        Self {
            settle_limit: Duration::from_millis(500),
            remove_after: Duration::from_millis(1000),
        }
    }
}

/// A detached frame that can hold and print one document.
#[async_trait]
pub trait PrintFrame: Send {
    /// Load the document into the frame.
    async fn inject(&mut self, html: &str) -> Result<(), ChequebookError>;

    /// Resolve once the document has loaded and its image is decoded.
    async fn ready(&mut self);

    /// Open the print dialog for the frame.
    async fn print(&mut self) -> Result<(), ChequebookError>;

    /// Detach the frame.
    async fn remove(&mut self);
}

/// How the wait before printing ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    SettleTimeout,
}

/// Outcome of [`dispatch`]. Failures are reported here, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// `None` if the document could not be injected.
    pub readiness: Option<Readiness>,
    pub printed: bool,
}

/// Inject `html` into `frame`, print it, and remove the frame.
pub async fn dispatch<F>(frame: &mut F, html: &str, timings: PrintTimings) -> DispatchReport
where
    F: PrintFrame + ?Sized,
{
    if let Err(e) = frame.inject(html).await {
        tracing::warn!(error = %e, "print frame rejected the document");
        frame.remove().await;
        return DispatchReport {
            readiness: None,
            printed: false,
        };
    }

    let readiness = match tokio::time::timeout(timings.settle_limit, frame.ready()).await {
        Ok(()) => Readiness::Ready,
        Err(_) => {
            tracing::debug!(
                limit_ms = timings.settle_limit.as_millis() as u64,
                "print frame not ready in time, printing anyway"
            );
            Readiness::SettleTimeout
        }
    };

    let printed = match frame.print().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "print dialog failed");
            false
        }
    };

    tokio::time::sleep(timings.remove_after).await;
    frame.remove().await;

    DispatchReport {
        readiness: Some(readiness),
        printed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[derive(Default)]
    struct RecordingFrame {
        ready_after: Option<Duration>,
        fail_inject: bool,
        fail_print: bool,
        events: Vec<(&'static str, Duration)>,
        start: Option<Instant>,
    }

    impl RecordingFrame {
        fn log(&mut self, event: &'static str) {
            let start = *self.start.get_or_insert_with(Instant::now);
            self.events.push((event, start.elapsed()));
        }
    }

    #[async_trait]
    impl PrintFrame for RecordingFrame {
        async fn inject(&mut self, _html: &str) -> Result<(), ChequebookError> {
            self.log("inject");
            if self.fail_inject {
                return Err(ChequebookError::Transport("frame detached".to_string()));
            }
            Ok(())
        }

        async fn ready(&mut self) {
            match self.ready_after {
                Some(delay) => tokio::time::sleep(delay).await,
                None => std::future::pending::<()>().await,
            }
        }

        async fn print(&mut self) -> Result<(), ChequebookError> {
            self.log("print");
            if self.fail_print {
                return Err(ChequebookError::Transport("print dialog blocked".to_string()));
            }
            Ok(())
        }

        async fn remove(&mut self) {
            self.log("remove");
        }
    }

    #[test]
    fn test_default_timings() {
        let timings = PrintTimings::default();
        assert_eq!(timings.settle_limit, Duration::from_millis(500));
        assert_eq!(timings.remove_after, Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_prints_on_ready_signal() {
        let mut frame = RecordingFrame {
            ready_after: Some(Duration::from_millis(40)),
            ..Default::default()
        };
        let report = dispatch(&mut frame, "<html></html>", PrintTimings::default()).await;
        assert_eq!(report.readiness, Some(Readiness::Ready));
        assert!(report.printed);
        let (_, printed_at) = frame.events[1];
        let (_, removed_at) = frame.events[2];
        assert!(printed_at >= Duration::from_millis(40) && printed_at < Duration::from_millis(500));
        assert!(removed_at >= printed_at + Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_limit_bounds_the_wait() {
        let mut frame = RecordingFrame::default();
        let report = dispatch(&mut frame, "<html></html>", PrintTimings::default()).await;
        assert_eq!(report.readiness, Some(Readiness::SettleTimeout));
        let (name, printed_at) = frame.events[1];
        assert_eq!(name, "print");
        assert!(printed_at >= Duration::from_millis(500));
        assert_eq!(frame.events[2].0, "remove");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_inject_still_removes() {
        let mut frame = RecordingFrame {
            fail_inject: true,
            ..Default::default()
        };
        let report = dispatch(&mut frame, "", PrintTimings::default()).await;
        assert_eq!(report.readiness, None);
        assert!(!report.printed);
        let names: Vec<_> = frame.events.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["inject", "remove"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_print_still_removes() {
        let mut frame = RecordingFrame {
            ready_after: Some(Duration::from_millis(10)),
            fail_print: true,
            ..Default::default()
        };
        let report = dispatch(&mut frame, "<html></html>", PrintTimings::default()).await;
        assert_eq!(report.readiness, Some(Readiness::Ready));
        assert!(!report.printed);
        let names: Vec<_> = frame.events.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["inject", "print", "remove"]);
        let (_, printed_at) = frame.events[1];
        let (_, removed_at) = frame.events[2];
        assert!(removed_at >= printed_at + Duration::from_millis(1000));
    }
}
