//! Texture resolution seam.

use std::collections::HashMap;

/// Opaque asset handle. Zero means "no asset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AssetHandle(pub u64);

impl AssetHandle {
    /// The empty handle.
    pub const EMPTY: Self = Self(0);

    /// Returns true if this handle names no asset.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A resolved texture as seen by the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRef {
    /// Backend texture id.
    pub id: u32,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

impl TextureRef {
    /// Width divided by height, or `None` for a degenerate texture.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.height != 0).then(|| self.width as f32 / self.height as f32)
    }
}

/// Resolves asset handles to textures.
pub trait AssetResolver {
    /// Looks up a texture, returning `None` if the handle is unknown.
    fn texture_from_handle(&self, handle: AssetHandle) -> Option<TextureRef>;
}

/// In-memory resolver backed by a map.
#[derive(Debug, Default)]
pub struct TextureTable {
    textures: HashMap<AssetHandle, TextureRef>,
}

impl TextureTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture under a handle.
    pub fn insert(&mut self, handle: AssetHandle, texture: TextureRef) {
        self.textures.insert(handle, texture);
    }
}

impl AssetResolver for TextureTable {
    fn texture_from_handle(&self, handle: AssetHandle) -> Option<TextureRef> {
        self.textures.get(&handle).copied()
    }
}
