use bytemuck::{Pod, Zeroable};

/// Per-star draw data written to the shared frame buffer for the host
/// renderer. Must match the host's `protocol.ts`: 4 floats = 16 bytes
/// stride.
///
/// Positions are projected screen coordinates relative to the canvas
/// center, before the camera transform — the host applies
/// translate/rotate/scale once for the whole frame. `size` is the glow
/// sprite quad edge; a host without the sprite texture draws a filled
/// circle of radius `size / 8` instead.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct StarInstance {
    /// Screen X relative to canvas center.
    pub x: f32,
    /// Screen Y relative to canvas center.
    pub y: f32,
    /// Glow sprite quad edge in pixels.
    pub size: f32,
    /// Opacity for the additive draw (0.0 = invisible, 1.0 = full).
    pub alpha: f32,
}

impl StarInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Frame instance list, layered: ambient stars occupy [0, layer_split),
/// shooting star trails and heads follow. The host draws in order, so the
/// split keeps ambient stars beneath the shooting layer.
pub struct InstanceBuffer {
    pub instances: Vec<StarInstance>,
    pub layer_split: u32,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            layer_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.layer_split = 0;
    }

    pub fn push(&mut self, instance: StarInstance) {
        self.instances.push(instance);
    }

    pub fn set_layer_split(&mut self, split: u32) {
        self.layer_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_instance_is_4_floats() {
        assert_eq!(std::mem::size_of::<StarInstance>(), 16);
        assert_eq!(StarInstance::FLOATS, 4);
    }

    #[test]
    fn push_and_count() {
        let mut buf = InstanceBuffer::with_capacity(8);
        buf.push(StarInstance::default());
        buf.push(StarInstance::default());
        assert_eq!(buf.instance_count(), 2);
    }

    #[test]
    fn clear_resets_split() {
        let mut buf = InstanceBuffer::with_capacity(8);
        buf.push(StarInstance::default());
        buf.set_layer_split(1);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.layer_split, 0);
    }
}
