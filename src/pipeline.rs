//! Offline driver: simulate the display loop at a fixed frame rate and collect frames.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    animation::scheduler::TickOutcome,
    engine::render_loop::ParticleEngine,
    foundation::core::{Fps, FrameIndex},
    foundation::error::{MorphError, MorphResult},
    render::backend::FrameRGBA,
};

/// Provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order between `begin` and `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()>;
    fn end(&mut self) -> MorphResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MorphResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Retains only the most recent frame, reusing its pixel buffer between pushes.
#[derive(Debug, Default)]
pub struct LastFrameSink {
    last: Option<(FrameIndex, FrameRGBA)>,
    frames_seen: u64,
}

impl LastFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(FrameIndex, FrameRGBA)> {
        self.last.as_ref()
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

impl FrameSink for LastFrameSink {
    fn begin(&mut self, _cfg: SinkConfig) -> MorphResult<()> {
        self.last = None;
        self.frames_seen = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()> {
        match &mut self.last {
            Some((last_idx, last)) => {
                *last_idx = idx;
                last.width = frame.width;
                last.height = frame.height;
                last.premultiplied = frame.premultiplied;
                last.data.clone_from(&frame.data);
            }
            None => self.last = Some((idx, frame.clone())),
        }
        self.frames_seen += 1;
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> MorphResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MorphResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", idx.0));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> MorphResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Encode one frame as PNG with straight alpha.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> MorphResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_rendered: u64,
    /// Frames on which the live buffer was re-uploaded.
    pub position_uploads: u64,
    pub transitions_started: u64,
}

impl RenderStats {
    fn record(&mut self, uploaded: bool, outcome: TickOutcome) {
        self.frames_rendered += 1;
        self.position_uploads += u64::from(uploaded);
        if matches!(outcome, TickOutcome::Started { .. }) {
            self.transitions_started += 1;
        }
    }
}

/// Drive `frame_count` frames at host timestamps `k * 1000 / fps` and hand each to `sink`.
///
/// Timestamps are absolute, so `engine` should be fresh; earlier frames on the same engine make
/// the leading timestamps count as zero deltas.
#[tracing::instrument(skip(engine, sink))]
pub fn render_sequence(
    engine: &mut ParticleEngine,
    fps: Fps,
    frame_count: u64,
    sink: &mut dyn FrameSink,
) -> MorphResult<RenderStats> {
    if frame_count == 0 {
        return Err(MorphError::validation("frame_count must be > 0"));
    }
    let surface = engine.backend().surface_size();
    sink.begin(SinkConfig {
        width: surface.width,
        height: surface.height,
        fps,
    })?;

    let mut stats = RenderStats::default();
    for k in 0..frame_count {
        let idx = FrameIndex(k);
        let report = engine.frame(fps.timestamp_ms(idx))?;
        stats.record(report.uploaded_positions, report.outcome);
        sink.push_frame(idx, &engine.readback()?)?;
    }
    sink.end()?;
    Ok(stats)
}

/// Simulate the loop at `fps` up to `at_ms` and return the frame presented at that time.
pub fn render_at(engine: &mut ParticleEngine, fps: Fps, at_ms: f64) -> MorphResult<FrameRGBA> {
    if !at_ms.is_finite() || at_ms < 0.0 {
        return Err(MorphError::validation("at_ms must be finite and >= 0"));
    }
    let last = fps.frames_until_ms(at_ms);
    for k in 0..=last {
        engine.frame(fps.timestamp_ms(FrameIndex(k)))?;
    }
    if fps.timestamp_ms(FrameIndex(last)) < at_ms {
        engine.frame(at_ms)?;
    }
    engine.readback()
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
