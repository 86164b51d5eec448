//! UI rendering seam.
//!
//! The interface draws through [`RenderBackend`]; it never talks to a
//! graphics API. [`UiRenderer`] is a backend that collects commands per
//! frame, sorts them by depth and groups them into batches, and can emit
//! GPU-ready [`QuadInstance`] records.

use crate::assets::TextureRef;
use crate::layout::{Rect, Vec2};
use crate::style::Color;

/// Drawing operations the interface issues.
pub trait RenderBackend {
    /// Flat coloured rectangle.
    fn draw_quad(&mut self, bounds: Rect, z: f32, color: Color);

    /// Textured rectangle.
    fn draw_image(&mut self, bounds: Rect, z: f32, texture: TextureRef);

    /// A run of text starting at `origin` (baseline left).
    fn draw_text(&mut self, text: &str, origin: Vec2, z: f32, scale: f32, color: Color);
}

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Quad {
        /// Bounds.
        bounds: Rect,
        /// Depth.
        z: f32,
        /// Fill color.
        color: Color,
    },
    /// Textured quad.
    Image {
        /// Bounds.
        bounds: Rect,
        /// Depth.
        z: f32,
        /// Texture.
        texture: TextureRef,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// Baseline origin.
        origin: Vec2,
        /// Depth.
        z: f32,
        /// Font units to pixels.
        scale: f32,
        /// Text color.
        color: Color,
    },
}

impl RenderCommand {
    /// Depth of the command.
    #[must_use]
    pub const fn z(&self) -> f32 {
        match self {
            Self::Quad { z, .. } | Self::Image { z, .. } | Self::Text { z, .. } => *z,
        }
    }

    fn material(&self) -> Material {
        match self {
            Self::Quad { .. } => Material::Solid,
            Self::Image { texture, .. } => Material::Texture(texture.id),
            Self::Text { .. } => Material::Text,
        }
    }
}

/// Pipeline state shared by every command in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Untextured quads.
    Solid,
    /// Quads sampling one texture.
    Texture(u32),
    /// Glyph runs.
    Text,
}

/// A batch of render commands with the same material.
#[derive(Debug, Clone)]
pub struct UiBatch {
    /// Shared material.
    pub material: Material,
    /// Commands in this batch, in draw order.
    pub commands: Vec<RenderCommand>,
}

/// Backend that records commands and batches them per frame.
#[derive(Debug)]
pub struct UiRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Final batches for rendering.
    batches: Vec<UiBatch>,
}

impl UiRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            batches: Vec::with_capacity(64),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.batches.clear();
    }

    /// Adds a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Commands recorded so far this frame, in submission order.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Ends the frame: sorts by depth (stable, so equal depths keep
    /// submission order) and merges neighbours sharing a material.
    pub fn end_frame(&mut self) -> &[UiBatch] {
        let mut commands = std::mem::take(&mut self.commands);
        commands.sort_by(|a, b| a.z().total_cmp(&b.z()));

        self.batches.clear();
        for command in commands {
            let material = command.material();
            match self.batches.last_mut() {
                Some(batch) if batch.material == material => batch.commands.push(command),
                _ => self.batches.push(UiBatch {
                    material,
                    commands: vec![command],
                }),
            }
        }
        &self.batches
    }

    /// Instance records for every quad and image in the ended frame.
    #[must_use]
    pub fn quad_instances(&self) -> Vec<QuadInstance> {
        self.batches
            .iter()
            .flat_map(|batch| batch.commands.iter())
            .filter_map(|command| match command {
                RenderCommand::Quad { bounds, z, color } => {
                    Some(QuadInstance::new(*bounds, *z, color.to_array(), QuadInstance::NO_TEXTURE))
                }
                RenderCommand::Image { bounds, z, texture } => {
                    Some(QuadInstance::new(*bounds, *z, Color::WHITE.to_array(), texture.id))
                }
                RenderCommand::Text { .. } => None,
            })
            .collect()
    }
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for UiRenderer {
    fn draw_quad(&mut self, bounds: Rect, z: f32, color: Color) {
        self.push(RenderCommand::Quad { bounds, z, color });
    }

    fn draw_image(&mut self, bounds: Rect, z: f32, texture: TextureRef) {
        self.push(RenderCommand::Image { bounds, z, texture });
    }

    fn draw_text(&mut self, text: &str, origin: Vec2, z: f32, scale: f32, color: Color) {
        self.push(RenderCommand::Text {
            text: text.to_owned(),
            origin,
            z,
            scale,
            color,
        });
    }
}

/// Per-instance quad data for the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    /// Bottom-left corner.
    pub position: [f32; 2],
    /// Width and height.
    pub size: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
    /// Depth.
    pub z: f32,
    /// Texture id, or [`Self::NO_TEXTURE`].
    pub texture: u32,
}

impl QuadInstance {
    /// Texture id of an untextured quad.
    pub const NO_TEXTURE: u32 = u32::MAX;

    /// Creates a new instance.
    #[must_use]
    pub const fn new(bounds: Rect, z: f32, color: [f32; 4], texture: u32) -> Self {
        Self {
            position: [bounds.x, bounds.y],
            size: [bounds.width, bounds.height],
            color,
            z,
            texture,
        }
    }
}
