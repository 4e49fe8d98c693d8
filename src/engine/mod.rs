//! Render loop and host lifecycle.
//!
//! [`render_loop::ParticleEngine`] owns the per-session state and runs one tick per frame.
//! [`render_loop::RunningEngine`] ties it to a [`host::Host`] and guarantees teardown.

/// Host boundary: surface mounting, frame requests and resize subscriptions.
pub mod host;
/// Per-frame driver and its host-attached form.
pub mod render_loop;
