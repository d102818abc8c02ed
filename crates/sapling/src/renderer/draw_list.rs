use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::types::EntityId;

/// One quad emitted by a draw hook, in viewport pixels.
/// Flat 6 x 4 bytes so a renderer can read the list as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Left edge in viewport space.
    pub x: f32,
    /// Top edge in viewport space.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Owner's draw order hint.
    pub z_index: i32,
    /// Owner handle (`EntityId.0`).
    pub owner: u32,
}

impl DrawInstance {
    pub const STRIDE_BYTES: usize = std::mem::size_of::<DrawInstance>();

    pub fn new(owner: EntityId, top_left: Vec2, size: Vec2, z_index: i32) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.x,
            height: size.y,
            z_index,
            owner: owner.0,
        }
    }

    pub fn owner(&self) -> EntityId {
        EntityId(self.owner)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Output of a draw pass, in emission order.
#[derive(Debug, Default)]
pub struct DrawList {
    instances: Vec<DrawInstance>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { instances: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, instance: DrawInstance) {
        self.instances.push(instance);
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    /// Stable sort by z-index, for painters that want back-to-front order.
    /// Equal z-indices keep emission order.
    pub fn sort_by_z(&mut self) {
        self.instances.sort_by_key(|i| i.z_index);
    }

    /// Instance data as raw bytes for a renderer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
