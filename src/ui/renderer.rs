use anyhow::{Context, Result};
use deepcow_core::{EntityKind, Frame, Renderer};
use std::io::Write;

/// Logs a one-line summary of every `every`-th frame through `tracing`.
pub struct TraceRenderer {
    every: u64,
    frames: u64,
}

impl TraceRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for TraceRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.frames += 1;
        if (self.frames - 1) % self.every != 0 {
            return Ok(());
        }
        let count = |kind: EntityKind| frame.entities.iter().filter(|e| e.kind == kind).count();
        let rays_hit = frame
            .agents()
            .flat_map(|a| a.rays.iter())
            .filter(|r| r.hit.is_some())
            .count();
        tracing::info!(
            tick = frame.tick,
            cows = count(EntityKind::Cow),
            wolves = count(EntityKind::Wolf),
            grass = count(EntityKind::Grass),
            rays_hit = rays_hit,
            "Frame"
        );
        for agent in frame.agents() {
            tracing::debug!(
                id = %agent.id,
                kind = ?agent.kind,
                x = agent.position.x,
                y = agent.position.y,
                heading = agent.heading.unwrap_or_default(),
                "Agent"
            );
        }
        Ok(())
    }
}

/// Writes each frame as one JSON object per line, for offline visualisers.
pub struct JsonlRenderer<W: Write> {
    writer: W,
    frames: u64,
}

impl<W: Write> JsonlRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for JsonlRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame).context("Failed to encode frame")?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write frame")?;
        self.frames += 1;
        Ok(())
    }
}
