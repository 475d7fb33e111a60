//! Console output gated by verbosity

/// Verbosity level for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only
    Quiet,
    /// Default output
    Normal,
    /// Extra detail (per-parameter listings and the like)
    Verbose,
}

/// Print a message when the active level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}
