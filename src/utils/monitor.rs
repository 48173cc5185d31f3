#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub cpu_usage: f32,
    pub memory_usage_kb: u64,
    pub peak_memory_kb: u64,
    pub elapsed_time: Duration,
}

/// Per-phase CPU/memory logging for `--monitor`. A disabled monitor does nothing.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<std::cell::RefCell<MonitorState>>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_kb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let state = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(std::cell::RefCell::new(MonitorState {
                    system: System::new(),
                    pid,
                    peak_memory_kb: 0,
                })),
                Err(e) => {
                    tracing::warn!("System monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            state,
            start_time: Instant::now(),
        }
    }

    pub fn get_stats(&self) -> Option<PhaseStats> {
        let mut state = self.state.as_ref()?.borrow_mut();
        let pid = state.pid;
        state.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let (cpu_usage, memory_kb) = {
            let process = state.system.process(pid)?;
            (process.cpu_usage(), process.memory() / 1024)
        };
        state.peak_memory_kb = state.peak_memory_kb.max(memory_kb);

        Some(PhaseStats {
            cpu_usage,
            memory_usage_kb: memory_kb,
            peak_memory_kb: state.peak_memory_kb,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}KB, Peak: {}KB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_kb,
                stats.peak_memory_kb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}KB",
                stats.elapsed_time,
                stats.peak_memory_kb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// Without the cli feature there is no sysinfo; monitoring is a no-op.
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
