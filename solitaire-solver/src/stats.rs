//! Search statistics tracking.

use std::time::Instant;

/// Current process memory usage in bytes (resident set size).
/// Returns None if unable to determine.
#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            let kb: u64 = rest.split_whitespace().next()?.parse().ok()?;
            return Some(kb * 1024);
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Statistics collected during one solve.
#[derive(Debug)]
pub struct SolverStats {
    /// Positions expanded (pushed as DFS frames).
    pub frames_expanded: u64,

    /// Children skipped because their canonical form was already visited.
    pub dedup_hits: u64,

    /// Maximum stack depth reached.
    pub max_depth: u64,

    start_time: Instant,
}

impl SolverStats {
    pub fn new() -> Self {
        Self {
            frames_expanded: 0,
            dedup_hits: 0,
            max_depth: 0,
            start_time: Instant::now(),
        }
    }

    /// Positions expanded per second since construction.
    pub fn positions_per_sec(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.frames_expanded as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print a summary of the finished search.
    pub fn print_summary(&self) {
        println!("Positions expanded: {}", self.frames_expanded);
        println!("Dedup hits: {}", self.dedup_hits);
        println!("Max depth: {}", self.max_depth);
        println!("Average rate: {:.0} positions/sec", self.positions_per_sec());
        if let Some(mem) = get_memory_usage() {
            println!("Memory: {}", format_bytes(mem));
        }
    }
}

impl Default for SolverStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_bytes(16 * 1024 * 1024 * 1024), "16.00 GB");
    }
}
