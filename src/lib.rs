//! Download-link selector for the libvips Windows binaries.
//!
//! Picks an architecture/variant/linking combination, keeps it valid under
//! the distribution's rule table and renders the matching
//! `vips-dev-*.zip` release asset URL.

pub mod commands;
pub mod download;
pub mod github;
pub mod http;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod selection;
