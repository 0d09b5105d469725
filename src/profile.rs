//! Phase timing and memory checkpoints for the pipeline logs
//!
//! - Memory: RSS (Resident Set Size) from /proc/self/status, 0 where unavailable
//! - Timing: `PhaseTimer` logs elapsed time per phase and since start

use std::fs;
use std::time::{Duration, Instant};

/// Get current RSS (Resident Set Size) in bytes from /proc/self/status
pub fn get_rss_bytes() -> u64 {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_vm_rss(&status))
        .unwrap_or(0)
}

/// Get current RSS in megabytes
pub fn get_rss_mb() -> f64 {
    get_rss_bytes() as f64 / (1024.0 * 1024.0)
}

/// Extract VmRSS from /proc status text ("VmRSS:    123456 kB")
fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kb = line.split_whitespace().nth(1)?.parse::<u64>().ok()?;
    Some(kb * 1024)
}

/// Logs the duration of consecutive pipeline phases
#[derive(Debug)]
pub struct PhaseTimer {
    start: Instant,
    last: Instant,
}

impl PhaseTimer {
    pub fn start(label: &str) -> Self {
        tracing::debug!("[PHASE @0.000s] {} (rss {:.2} MB)", label, get_rss_mb());
        let now = Instant::now();
        PhaseTimer { start: now, last: now }
    }

    /// Log the end of a phase; returns the phase duration
    pub fn phase(&mut self, label: &str) -> Duration {
        let now = Instant::now();
        let section = now - self.last;
        self.last = now;
        tracing::debug!(
            "[PHASE @{:.3}s +{:.3}s] {} (rss {:.2} MB)",
            self.elapsed().as_secs_f64(),
            section.as_secs_f64(),
            label,
            get_rss_mb()
        );
        section
    }

    /// Time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tquake_map\nVmPeak:\t  2000 kB\nVmRSS:\t  1536 kB\nThreads:\t4\n";
        assert_eq!(parse_vm_rss(status), Some(1536 * 1024));
        assert_eq!(parse_vm_rss("Name:\tx\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\tlots kB\n"), None);
    }

    #[test]
    fn test_phase_timer_is_monotonic() {
        let mut timer = PhaseTimer::start("test");
        let first = timer.phase("one");
        let _ = timer.phase("two");
        assert!(timer.elapsed() >= first);
    }
}
