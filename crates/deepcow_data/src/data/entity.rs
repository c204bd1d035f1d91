use serde::{Deserialize, Serialize};

/// Category of a simulated object.
///
/// Perception, collision and feeding switch on this tag rather than on the
/// concrete Rust type holding the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Cow,
    Wolf,
    Grass,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Cow, EntityKind::Wolf, EntityKind::Grass];

    /// Agents act and perceive; grass only sits still.
    #[must_use]
    pub fn is_agent(self) -> bool {
        matches!(self, EntityKind::Cow | EntityKind::Wolf)
    }

    /// Position of this kind in one-hot encodings.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            EntityKind::Cow => 0,
            EntityKind::Wolf => 1,
            EntityKind::Grass => 2,
        }
    }
}

/// Display color of an entity. Cosmetic only; the engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const COW: Color = Color::rgb(150, 75, 0);
    pub const WOLF: Color = Color::rgb(25, 25, 112);
    pub const GRASS: Color = Color::rgb(0, 255, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}
