use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::backend::AnalyzerBackend;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HealthStatus {
    Unknown,
    Online,
    Offline(String),
}

#[derive(Clone, Debug)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// UTC wall clock, `HH:MM:SS`.
    pub checked_at: String,
}

fn now_label() -> String {
    OffsetDateTime::now_utc()
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default()
}

/// Background liveness probe against `/health`.
///
/// Probes once immediately and then every `interval`. Stopping (or dropping
/// the monitor) wakes the thread and joins it.
pub struct HealthMonitor {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    rx: Receiver<HealthReport>,
    latest: Option<HealthReport>,
}

impl HealthMonitor {
    pub fn start(backend: Arc<dyn AnalyzerBackend>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (tx, rx) = mpsc::channel::<HealthReport>();

        let handle = std::thread::spawn(move || loop {
            let status = match backend.health() {
                Ok(()) => HealthStatus::Online,
                Err(e) => HealthStatus::Offline(e.to_string()),
            };
            tracing::debug!(?status, "health probe");
            let report = HealthReport {
                status,
                checked_at: now_label(),
            };
            if tx.send(report).is_err() {
                break;
            }
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
            rx,
            latest: None,
        }
    }

    /// Drains finished probes. Returns true when the status changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(report) = self.rx.try_recv() {
            let prev = self.latest.as_ref().map(|r| r.status.clone());
            if prev.as_ref() != Some(&report.status) {
                match &report.status {
                    HealthStatus::Online => tracing::info!("analyzer backend online"),
                    HealthStatus::Offline(e) => tracing::warn!(error = %e, "analyzer backend offline"),
                    HealthStatus::Unknown => {}
                }
                changed = true;
            }
            self.latest = Some(report);
        }
        changed
    }

    pub fn status(&self) -> HealthStatus {
        self.latest
            .as_ref()
            .map(|r| r.status.clone())
            .unwrap_or(HealthStatus::Unknown)
    }

    pub fn checked_at(&self) -> Option<&str> {
        self.latest.as_ref().map(|r| r.checked_at.as_str())
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;
    use std::sync::atomic::Ordering;
    use std::time::Instant;

    fn wait_for(mon: &mut HealthMonitor, want: &HealthStatus) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            mon.poll();
            if &mon.status() == want {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn reports_online_then_offline() {
        let fake = Arc::new(FakeBackend::new());
        let mut mon = HealthMonitor::start(fake.clone(), Duration::from_millis(10));
        assert!(wait_for(&mut mon, &HealthStatus::Online));
        assert!(mon.checked_at().is_some());

        *fake.healthy.lock().unwrap() = false;
        assert!(wait_for(
            &mut mon,
            &HealthStatus::Offline("Could not reach the analyzer backend: connection refused".into())
        ));
        mon.stop();
    }

    #[test]
    fn stop_ends_polling_promptly() {
        let fake = Arc::new(FakeBackend::new());
        let mut mon = HealthMonitor::start(fake.clone(), Duration::from_secs(3600));
        assert!(wait_for(&mut mon, &HealthStatus::Online));

        let t0 = Instant::now();
        mon.stop();
        assert!(!mon.is_running());
        assert!(t0.elapsed() < Duration::from_secs(5));

        let calls = fake.health_calls.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(fake.health_calls.load(Ordering::SeqCst), calls);
    }
}
