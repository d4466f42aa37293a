//! GitHub release lookup.

mod client;
mod types;

#[cfg(test)]
pub use client::MockLatestRelease;
pub use client::{DEFAULT_API_URL, GitHub, LatestRelease, resolve_version};
pub use types::{GitHubRepo, Release};
