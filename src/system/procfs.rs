use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{MonitorError, Result};

use super::platform;
use super::sample::{SystemCpuSample, SystemMemorySample};
use super::source::{CounterSource, ProcessEnumerator};

pub const DEFAULT_PROC_ROOT: &str = "/proc";

const UNKNOWN_NAME: &str = "?";

/// Fields between the closing `)` of the command name and utime:
/// state ppid pgrp session tty_nr tpgid flags minflt cminflt majflt cmajflt.
const FIELDS_BEFORE_UTIME: usize = 11;

/// Reads counters from a procfs mount.
///
/// The root is configurable so that a synthetic tree can stand in for
/// `/proc`.
#[derive(Debug, Clone)]
pub struct Procfs {
    root: PathBuf,
    page_kb: u64,
    memory_fallback: bool,
}

impl Default for Procfs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl Procfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            page_kb: platform::page_size_bytes() / 1024,
            memory_fallback: true,
        }
    }

    /// Overrides the page size read from the host.
    pub fn with_page_size(mut self, page_size_bytes: u64) -> Self {
        self.page_kb = page_size_bytes / 1024;
        self
    }

    /// Enables or disables the system-information fallback used when
    /// `meminfo` cannot be read.
    pub fn with_memory_fallback(mut self, enabled: bool) -> Self {
        self.memory_fallback = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn page_kb(&self) -> u64 {
        self.page_kb
    }

    fn pid_file(&self, pid: u32, name: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(name)
    }
}

impl CounterSource for Procfs {
    fn sample_system_cpu(&self) -> Result<SystemCpuSample> {
        let path = self.root.join("stat");
        let contents = fs::read_to_string(&path)
            .map_err(|e| MonitorError::source_unavailable(&path, e.to_string()))?;
        let first = contents.lines().next().unwrap_or_default();
        parse_cpu_line(first).ok_or_else(|| {
            MonitorError::source_unavailable(&path, "first line is not an aggregate cpu record")
        })
    }

    fn sample_system_memory(&self) -> Result<SystemMemorySample> {
        let path = self.root.join("meminfo");
        let primary = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| parse_meminfo(&contents));
        if let Some(sample) = primary {
            return Ok(sample);
        }

        if self.memory_fallback
            && let Some((total_kb, free_kb)) = platform::system_memory_kb()
        {
            warn!(path = %path.display(), "meminfo unreadable, using sysinfo fallback");
            return Ok(SystemMemorySample {
                total_kb,
                available_kb: free_kb,
            });
        }

        Err(MonitorError::source_unavailable(
            &path,
            "MemTotal/MemAvailable not found and no fallback available",
        ))
    }

    fn sample_process_cpu(&self, pid: u32) -> Option<u64> {
        let record = fs::read(self.pid_file(pid, "stat")).ok()?;
        parse_pid_stat_ticks(&record)
    }

    fn sample_process_memory(&self, pid: u32) -> Option<u64> {
        let contents = fs::read(self.pid_file(pid, "statm")).ok()?;
        let pages = parse_statm_resident(&contents)?;
        Some(pages.saturating_mul(self.page_kb))
    }

    fn process_display_name(&self, pid: u32) -> String {
        fs::read(self.pid_file(pid, "comm"))
            .ok()
            .and_then(|contents| parse_comm(&String::from_utf8_lossy(&contents)))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }
}

impl ProcessEnumerator for Procfs {
    fn list_pids(&self) -> Result<Vec<u32>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| MonitorError::enumeration_unavailable(&self.root, e))?;

        let mut pids = Vec::new();
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str()
                && let Some(pid) = parse_pid(name)
            {
                pids.push(pid);
            }
        }
        Ok(pids)
    }
}

/// Accepts only all-digit names; `parse::<u32>` alone would let `+12` in.
fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Parses `cpu  user nice system idle [iowait irq softirq steal ...]`.
pub fn parse_cpu_line(line: &str) -> Option<SystemCpuSample> {
    let mut fields = line.split_whitespace();
    if fields.next()? != "cpu" {
        return None;
    }

    let mut values = [0u64; 8];
    let mut count = 0;
    for (slot, field) in values.iter_mut().zip(fields) {
        match field.parse::<u64>() {
            Ok(v) => {
                *slot = v;
                count += 1;
            }
            Err(_) => break,
        }
    }
    if count < 4 {
        return None;
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal] = values;
    let total = [user, nice, system, idle, iowait, irq, softirq, steal]
        .iter()
        .fold(0u64, |acc, v| acc.saturating_add(*v));
    Some(SystemCpuSample {
        total,
        idle: idle.saturating_add(iowait),
    })
}

/// Extracts `MemTotal` and `MemAvailable` (kB). Both must be present and
/// non-zero.
pub fn parse_meminfo(contents: &str) -> Option<SystemMemorySample> {
    let mut total_kb = None;
    let mut available_kb = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kb = parse_kb_value(rest);
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available_kb = parse_kb_value(rest);
        }
    }
    match (total_kb?, available_kb?) {
        (0, _) | (_, 0) => None,
        (total_kb, available_kb) => Some(SystemMemorySample {
            total_kb,
            available_kb,
        }),
    }
}

fn parse_kb_value(rest: &str) -> Option<u64> {
    rest.split_whitespace().next()?.parse().ok()
}

/// Sums utime and stime from a `/proc/<pid>/stat` record.
///
/// The command name sits in parentheses and may itself contain spaces,
/// parentheses or arbitrary non-UTF-8 bytes, so the search starts from the
/// last `)` and only the ASCII fields after it are decoded.
pub fn parse_pid_stat_ticks(record: &[u8]) -> Option<u64> {
    let after_comm = record.iter().rposition(|&b| b == b')')? + 1;
    let fields = std::str::from_utf8(&record[after_comm..]).ok()?;
    let mut fields = fields
        .split_whitespace()
        .skip(FIELDS_BEFORE_UTIME);
    let utime: u64 = fields.next()?.parse().ok()?;
    let stime: u64 = fields.next()?.parse().ok()?;
    Some(utime.saturating_add(stime))
}

/// Resident page count, the second field of `/proc/<pid>/statm`.
pub fn parse_statm_resident(contents: &[u8]) -> Option<u64> {
    let mut fields = std::str::from_utf8(contents).ok()?.split_whitespace();
    let _size: u64 = fields.next()?.parse().ok()?;
    fields.next()?.parse().ok()
}

fn parse_comm(contents: &str) -> Option<String> {
    let line = contents.lines().next()?;
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
