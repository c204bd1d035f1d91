//! Read-only view of the arena for external renderers.
//!
//! The engine never draws. Callers that want visuals take a [`Frame`] after
//! each step and hand it to their own [`Renderer`].

use crate::perception::RayTrace;
use deepcow_data::{Color, EntityKind, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: Uuid,
    pub kind: EntityKind,
    pub position: Vector2,
    pub radius: f64,
    pub color: Color,
    /// `None` for grass.
    pub heading: Option<f64>,
    pub rays: Vec<RayTrace>,
}

/// Everything needed to draw one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    /// Cows, then wolves, then grass.
    pub entities: Vec<EntityView>,
}

impl Frame {
    pub fn agents(&self) -> impl Iterator<Item = &EntityView> {
        self.entities.iter().filter(|e| e.kind.is_agent())
    }
}

/// Sink for frames, owned by the caller.
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

/// Discards every frame; headless runs use this.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame) -> anyhow::Result<()> {
        Ok(())
    }
}
