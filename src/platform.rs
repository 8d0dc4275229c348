//! Host platform detection and the privilege probe.
use anyhow::Result;
use std::fmt;

use crate::exec::{self, ExecResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// Microsoft Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        let os = if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            // Default to Linux for other Unix-like systems
            Os::Linux
        };
        Self { os }
    }

    /// Create a platform with explicit values (for testing).
    #[cfg(test)]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether the current process runs as root / Administrator.
    ///
    /// Unix asks `id -u`; Windows asks `net session`, which only succeeds in
    /// an elevated shell. A probe that cannot run counts as not elevated.
    #[must_use]
    pub fn has_elevated_privileges(&self) -> bool {
        let probe = match self.os {
            Os::Linux => exec::run_unchecked("id", &["-u"]),
            Os::Windows => exec::run_unchecked("net", &["session"]),
        };
        self.interpret_probe(probe)
    }

    fn interpret_probe(&self, probe: Result<ExecResult>) -> bool {
        let Ok(result) = probe else {
            return false;
        };
        match self.os {
            Os::Linux => result.success && result.stdout.trim() == "0",
            Os::Windows => result.success,
        }
    }
}
