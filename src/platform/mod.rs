//! Default architecture detection.
//!
//! The architecture can come from structured client hints (`architecture` and
//! `bitness`), from a user-agent string, or from the host running the tool.
//! Anything unrecognised resolves to w64.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::runtime::Runtime;
use crate::selection::Architecture;

/// High-entropy client hints as reported by `navigator.userAgentData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientHints {
    pub architecture: Option<String>,
    pub bitness: Option<String>,
}

/// Where the default architecture is taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformSource {
    ClientHints(ClientHints),
    UserAgent(String),
    Host,
}

impl ClientHints {
    /// Missing hints count as 64-bit x86.
    pub fn architecture(&self) -> Architecture {
        let arch = self.architecture.as_deref().unwrap_or("x86");
        let bitness = self.bitness.as_deref().unwrap_or("64");

        match arch {
            "x86" if bitness == "64" => Architecture::W64,
            "x86" => Architecture::W32,
            "arm" => Architecture::Arm64,
            _ => Architecture::W64,
        }
    }
}

/// Extracts the CPU architecture from a user-agent string using the names
/// common UA parsers report: `amd64`, `ia32` or `arm64`.
pub fn cpu_from_user_agent(user_agent: &str) -> Option<&'static str> {
    let lower = user_agent.to_ascii_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c == ';' || c == '(' || c == ')' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    let has = |names: &[&str]| tokens.iter().any(|t| names.contains(t));

    if has(&["win64", "x64", "wow64", "amd64", "x86_64", "x86-64"]) {
        Some("amd64")
    } else if has(&["ia32", "i386", "i486", "i686", "x86", "win32"]) {
        Some("ia32")
    } else if has(&["arm64", "aarch64", "armv8", "armv8l"]) {
        Some("arm64")
    } else {
        None
    }
}

/// Maps a UA-parser CPU name to a build architecture.
pub fn architecture_from_cpu(cpu: Option<&str>) -> Architecture {
    match cpu {
        Some("ia32") => Architecture::W32,
        Some("arm64") => Architecture::Arm64,
        _ => Architecture::W64,
    }
}

pub fn architecture_from_user_agent(user_agent: &str) -> Architecture {
    let cpu = cpu_from_user_agent(user_agent);
    debug!("User agent CPU architecture: {:?}", cpu);
    architecture_from_cpu(cpu)
}

/// Maps a Rust target architecture name (`std::env::consts::ARCH`).
pub fn architecture_from_host(arch: &str) -> Architecture {
    match arch {
        "x86" => Architecture::W32,
        "aarch64" | "arm64ec" => Architecture::Arm64,
        _ => Architecture::W64,
    }
}

#[tracing::instrument(skip(runtime))]
pub fn detect<R: Runtime>(runtime: &R, source: &PlatformSource) -> Architecture {
    let architecture = match source {
        PlatformSource::ClientHints(hints) => hints.architecture(),
        PlatformSource::UserAgent(ua) => architecture_from_user_agent(ua),
        PlatformSource::Host => architecture_from_host(runtime.host_arch()),
    };

    debug!("Detected architecture {} from {:?}", architecture, source);
    architecture
}
