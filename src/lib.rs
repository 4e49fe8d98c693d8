//! Morphfield: a particle cloud that morphs through a fixed catalog of parametric 3D shapes.
//!
//! The crate is split the same way the frame loop is:
//! - `shapes`: deterministic point-cloud generators and the precomputed catalog
//! - `animation`: the hold/transition scheduler, easing and the live-buffer blend
//! - `render`: camera, backend trait and the CPU point rasterizer
//! - `engine`: the per-frame driver and its host lifecycle
//! - `pipeline`: offline frame sequences for the CLI and tests
#![forbid(unsafe_code)]

mod animation;
mod config;
mod engine;
mod foundation;
mod pipeline;
mod render;
mod shapes;

pub use animation::{
    ease::Ease,
    interp::{LiveBuffer, blend_into},
    scheduler::{Phase, TickOutcome, Timing, TransitionState, tick},
};
pub use config::{
    DEFAULT_HOLD_DURATION_MS, DEFAULT_PARTICLE_COUNT, DEFAULT_SEED,
    DEFAULT_TRANSITION_DURATION_MS, EngineConfig,
};
pub use engine::{
    host::{
        FrameRequestId, HeadlessHost, Host, HostEvent, ListenerId, Subscription, SurfaceId,
    },
    render_loop::{FrameReport, ParticleEngine, RunningEngine, TeardownReport},
};
pub use foundation::core::{Fps, FrameIndex, Mat4, Rgba8Premul, Vec3, Viewport};
pub use foundation::error::{MorphError, MorphResult};
pub use foundation::math::{SessionRng, all_finite, bounding_radius, mean_radius, seeded_rng};
pub use pipeline::{
    FrameSink, InMemorySink, LastFrameSink, PngDirSink, RenderStats, SinkConfig, render_at,
    render_sequence, write_png,
};
pub use render::{
    backend::{BackendKind, FrameRGBA, PointStyle, RenderBackend, SceneParams, create_backend},
    camera::{Camera, CameraConfig, Rotation},
    cpu::{CpuBackend, CpuStats},
};
pub use shapes::{
    catalog::{CATALOG_SIZE, ShapeBuffer, ShapeCatalog, ShapeKind, ShapeSummary},
    generators,
    seed::{ColorBuffer, SEED_CLOUD_RADIUS, seed_cloud},
};
