use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    animation::{
        interp::LiveBuffer,
        scheduler::{TickOutcome, Timing, TransitionState, tick},
    },
    config::EngineConfig,
    engine::host::{FrameRequestId, Host, SurfaceId, Subscription},
    foundation::core::Viewport,
    foundation::error::{MorphError, MorphResult},
    foundation::math::seeded_rng,
    render::{
        backend::{BackendKind, FrameRGBA, RenderBackend, SceneParams, create_backend},
        camera::{Camera, Rotation},
    },
    shapes::{
        catalog::ShapeCatalog,
        seed::{ColorBuffer, seed_cloud},
    },
};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// What happened during one [`ParticleEngine::frame`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Zero-based count of frames presented before this one.
    pub frame: u64,
    pub delta_ms: f64,
    pub outcome: TickOutcome,
    /// Whether the live buffer was re-uploaded to the backend.
    pub uploaded_positions: bool,
}

/// Owns every piece of per-session state and drives one tick per display refresh.
///
/// The transition state and the live buffer are only written from [`ParticleEngine::frame`].
pub struct ParticleEngine {
    config: EngineConfig,
    timing: Timing,
    catalog: ShapeCatalog,
    colors: ColorBuffer,
    live: LiveBuffer,
    state: TransitionState,
    rotation: Rotation,
    camera: Camera,
    viewport: Viewport,
    pixel_ratio: f32,
    backend: Box<dyn RenderBackend>,
    surface: SurfaceId,
    frames_rendered: u64,
}

impl std::fmt::Debug for ParticleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleEngine")
            .field("surface", &self.surface)
            .field("particles", &self.catalog.particle_count())
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("frames_rendered", &self.frames_rendered)
            .finish_non_exhaustive()
    }
}

impl ParticleEngine {
    /// Build the catalog and seed cloud from `config.seed` and size the backend surface.
    #[tracing::instrument(skip_all, fields(particles = config.particle_count, seed = config.seed))]
    pub fn new(
        config: EngineConfig,
        viewport: Viewport,
        mut backend: Box<dyn RenderBackend>,
    ) -> MorphResult<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let (seed_positions, colors) = seed_cloud(config.particle_count, &mut rng);
        let catalog = ShapeCatalog::generate(config.particle_count, &mut rng);

        backend.resize(viewport, 1.0)?;
        backend.upload_colors(colors.as_slice())?;
        backend.upload_positions(&seed_positions)?;

        Ok(Self {
            timing: config.timing(),
            camera: Camera::new(config.camera, viewport),
            catalog,
            colors,
            live: LiveBuffer::new(seed_positions),
            state: TransitionState::default(),
            rotation: Rotation::default(),
            viewport,
            pixel_ratio: 1.0,
            backend,
            surface: SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed)),
            frames_rendered: 0,
            config,
        })
    }

    pub fn with_backend_kind(
        config: EngineConfig,
        viewport: Viewport,
        kind: BackendKind,
    ) -> MorphResult<Self> {
        Self::new(config, viewport, create_backend(kind))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn colors(&self) -> &ColorBuffer {
        &self.colors
    }

    pub fn live(&self) -> &LiveBuffer {
        &self.live
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    pub fn scene(&self) -> SceneParams {
        SceneParams {
            model: self.rotation.model_matrix(),
            view: self.camera.view(),
            projection: self.camera.projection(),
            point: self.config.point,
            fog_density: self.config.fog_density,
            background: self.config.background,
        }
    }

    /// Run one tick at host timestamp `timestamp_ms` and present the scene.
    ///
    /// Positions are re-uploaded only when a transitioning frame wrote to the live buffer; the
    /// scene is presented every frame so the rotation keeps moving during holds.
    pub fn frame(&mut self, timestamp_ms: f64) -> MorphResult<FrameReport> {
        let delta_ms = self.state.advance_clock(timestamp_ms);
        self.rotation.advance(self.config.rotation_step);

        let (next, outcome) = tick(self.state, delta_ms, &self.timing, self.catalog.len());
        self.state = next;
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Started { from, to } => {
                tracing::debug!(
                    from = self.catalog.get(from).kind().name(),
                    to = self.catalog.get(to).kind().name(),
                    "transition started"
                );
            }
            TickOutcome::Blend { from, to, progress } => {
                self.live.blend(
                    self.catalog.get(from).as_slice(),
                    self.catalog.get(to).as_slice(),
                    self.config.ease,
                    progress,
                );
                if !self.state.is_transitioning() {
                    tracing::debug!(
                        shape = self.catalog.get(to).kind().name(),
                        "transition finished"
                    );
                }
            }
        }

        let uploaded_positions = self.live.is_dirty();
        if uploaded_positions {
            self.backend.upload_positions(self.live.as_slice())?;
            self.live.take_dirty();
        }
        self.backend.present(&self.scene())?;

        let report = FrameReport {
            frame: self.frames_rendered,
            delta_ms,
            outcome,
            uploaded_positions,
        };
        self.frames_rendered += 1;
        Ok(report)
    }

    /// Apply a new logical viewport and device pixel ratio.
    ///
    /// Only the projection and the surface change; the transition state and live buffer are
    /// left alone.
    pub fn resize(&mut self, viewport: Viewport, device_pixel_ratio: f32) -> MorphResult<()> {
        let ratio = self.config.effective_pixel_ratio(device_pixel_ratio);
        self.backend.resize(viewport, ratio)?;
        self.camera.set_viewport(viewport);
        self.viewport = viewport;
        self.pixel_ratio = ratio;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = ratio,
            "viewport resized"
        );
        Ok(())
    }

    /// Read back the last presented frame.
    pub fn readback(&self) -> MorphResult<FrameRGBA> {
        self.backend.readback_rgba8()
    }

    pub fn release(&mut self) {
        self.backend.release();
    }

    /// Attach to `host` and begin requesting frames.
    ///
    /// A missing container is not an error: the surface simply stays unmounted.
    pub fn start<H: Host>(mut self, mut host: H) -> MorphResult<RunningEngine<H>> {
        self.resize(host.viewport(), host.device_pixel_ratio())?;

        let mounted = host.container_attached() && host.mount_surface(self.surface);
        if !mounted {
            tracing::warn!(surface = self.surface.0, "no host container, surface not mounted");
        }
        let resize = Subscription::subscribe(&mut host);
        let pending_frame = Some(host.request_frame());
        tracing::info!(
            surface = self.surface.0,
            particles = self.catalog.particle_count(),
            "particle engine started"
        );

        Ok(RunningEngine {
            engine: self,
            host,
            resize,
            pending_frame,
            mounted,
            stopped: false,
        })
    }
}

/// Resources released by [`RunningEngine::stop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub cancelled_frame: bool,
    pub unsubscribed: bool,
    pub unmounted: bool,
    pub frames_rendered: u64,
}

/// An engine attached to a host. Teardown runs on [`RunningEngine::stop`] or on drop.
pub struct RunningEngine<H: Host> {
    engine: ParticleEngine,
    host: H,
    resize: Subscription,
    pending_frame: Option<FrameRequestId>,
    mounted: bool,
    stopped: bool,
}

impl<H: Host> RunningEngine<H> {
    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending_frame
    }

    /// Display-refresh callback: tick once, then request the next frame.
    ///
    /// A failed tick requests no further frame, so the loop ends there. Teardown still runs on
    /// stop or drop.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> MorphResult<FrameReport> {
        if self.stopped {
            return Err(MorphError::host("frame delivered after teardown"));
        }
        self.pending_frame = None;
        let report = self.engine.frame(timestamp_ms).inspect_err(|err| {
            tracing::warn!(
                surface = self.engine.surface_id().0,
                error = %err,
                "frame failed, no further frames requested"
            );
        })?;
        self.pending_frame = Some(self.host.request_frame());
        Ok(report)
    }

    /// Resize callback: re-read the host viewport and pixel ratio.
    pub fn on_resize(&mut self) -> MorphResult<()> {
        if self.stopped {
            return Err(MorphError::host("resize delivered after teardown"));
        }
        let viewport = self.host.viewport();
        let ratio = self.host.device_pixel_ratio();
        self.engine.resize(viewport, ratio)
    }

    pub fn stop(mut self) -> TeardownReport {
        self.teardown()
    }

    // Order matters: no callback may reach the engine once the backend is released.
    fn teardown(&mut self) -> TeardownReport {
        if self.stopped {
            return TeardownReport::default();
        }
        self.stopped = true;

        let cancelled_frame = match self.pending_frame.take() {
            Some(id) => {
                self.host.cancel_frame(id);
                true
            }
            None => false,
        };
        let unsubscribed = self.resize.dispose(&mut self.host);
        let unmounted = if self.mounted && self.host.container_attached() {
            self.host.unmount_surface(self.engine.surface_id())
        } else {
            false
        };
        self.mounted = false;
        self.engine.release();

        let report = TeardownReport {
            cancelled_frame,
            unsubscribed,
            unmounted,
            frames_rendered: self.engine.frames_rendered(),
        };
        tracing::info!(
            surface = self.engine.surface_id().0,
            frames = report.frames_rendered,
            unmounted,
            "particle engine stopped"
        );
        report
    }
}

impl<H: Host> Drop for RunningEngine<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/render_loop.rs"]
mod tests;
