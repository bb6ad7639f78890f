//! Resident memory sampling.
//!
//! One trait, one backend per target OS. A backend that cannot read the
//! number reports 0 instead of failing the run.

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Source of the current process resident set size.
pub trait MemorySampler {
    /// Resident memory in whole megabytes, or 0 if unavailable.
    fn resident_mb(&self) -> u64;
}

/// Sampler for targets with no backend. Always reports 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSampler;

impl MemorySampler for NullSampler {
    fn resident_mb(&self) -> u64 {
        0
    }
}

/// Memory used by a run, clamped so a shrinking RSS records as 0.
pub fn memory_delta_mb(before: u64, after: u64) -> u64 {
    after.saturating_sub(before)
}

/// Best sampler for the current target.
pub fn default_sampler() -> Box<dyn MemorySampler> {
    #[cfg(target_os = "linux")]
    {
        Box::new(ProcfsSampler)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(SysinfoSampler)
    }
}

/// Reads `/proc/self/status`, falling back to `/proc/self/statm`.
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcfsSampler;

#[cfg(target_os = "linux")]
impl MemorySampler for ProcfsSampler {
    fn resident_mb(&self) -> u64 {
        if let Some(kb) = std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| parse_vm_rss_kb(&s))
        {
            return kb / 1024;
        }

        match std::fs::read_to_string("/proc/self/statm")
            .ok()
            .and_then(|s| parse_statm_resident_pages(&s))
        {
            Some(pages) => pages * STATM_PAGE_SIZE / BYTES_PER_MB,
            None => {
                tracing::debug!("procfs unavailable, reporting 0 MB resident");
                0
            }
        }
    }
}

/// statm counts pages. Assumes 4 KiB pages, so the fallback is only
/// approximate on kernels built with 16 KiB or 64 KiB pages (some aarch64).
#[cfg(target_os = "linux")]
const STATM_PAGE_SIZE: u64 = 4096;

/// Queries the current process through `sysinfo`.
#[cfg(not(target_os = "linux"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSampler;

#[cfg(not(target_os = "linux"))]
impl MemorySampler for SysinfoSampler {
    fn resident_mb(&self) -> u64 {
        let Ok(pid) = sysinfo::get_current_pid() else {
            tracing::debug!("no pid for current process, reporting 0 MB resident");
            return 0;
        };
        let mut sys = sysinfo::System::new();
        sys.refresh_process(pid);
        sys.process(pid)
            .map(|p| p.memory() / BYTES_PER_MB)
            .unwrap_or(0)
    }
}

/// `VmRSS` value in KiB from the contents of `/proc/<pid>/status`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}

/// Resident page count (second column) from `/proc/<pid>/statm`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_statm_resident_pages(statm: &str) -> Option<u64> {
    statm.split_whitespace().nth(1).and_then(|p| p.parse().ok())
}
