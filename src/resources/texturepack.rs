//! Tile texture table.
//!
//! Maps every [`TileKind`] of the loaded level to the texture key a renderer
//! should draw for it. The table is built once at level load from
//! [`GameConfig::tile_textures`] and never changes afterwards.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use glam::IVec2;
use log::warn;
use rustc_hash::FxHashMap;

use crate::level::{LevelLayout, TileKind};
use crate::resources::gameconfig::GameConfig;

#[derive(Resource, Debug, Clone, Default)]
pub struct TexturePack {
    textures: FxHashMap<TileKind, Arc<str>>,
}

impl TexturePack {
    /// Build the table for the kinds present in `layout`.
    ///
    /// Kinds drawn as terrain (blocks and the exit) without a configured
    /// texture are reported; they draw nothing.
    pub fn for_level(config: &GameConfig, layout: &LevelLayout) -> Self {
        let mut textures = FxHashMap::default();
        for kind in layout.kinds_present() {
            match config.tile_textures.get(&kind) {
                Some(key) => {
                    textures.insert(kind, Arc::from(key.as_str()));
                }
                None if is_terrain(kind) => {
                    warn!("No texture configured for tile kind '{}'", kind.name());
                }
                None => {}
            }
        }
        Self { textures }
    }

    pub fn texture(&self, kind: TileKind) -> Option<&str> {
        self.textures.get(&kind).map(|key| key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Every textured cell of `layout` in row-major order.
    pub fn cell_textures<'a>(
        &'a self,
        layout: &'a LevelLayout,
    ) -> impl Iterator<Item = (IVec2, &'a str)> + 'a {
        (0..layout.height()).flat_map(move |y| {
            (0..layout.width()).filter_map(move |x| {
                let kind = layout.kind(x, y)?;
                let key = self.texture(kind)?;
                Some((IVec2::new(x as i32, y as i32), key))
            })
        })
    }
}

fn is_terrain(kind: TileKind) -> bool {
    matches!(
        kind,
        TileKind::Exit | TileKind::PlatformBlock | TileKind::PassableBlock | TileKind::ImpassableBlock
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_only_holds_present_kinds() {
        let layout = LevelLayout::parse("1.X\n###").unwrap();
        let pack = TexturePack::for_level(&GameConfig::new(), &layout);
        assert_eq!(pack.texture(TileKind::ImpassableBlock), Some("Tiles/BlockA0"));
        assert_eq!(pack.texture(TileKind::Exit), Some("Tiles/Exit"));
        assert_eq!(pack.texture(TileKind::PlatformBlock), None);
        assert_eq!(pack.len(), 2);
    }

    #[test]
    fn test_cell_textures_row_major() {
        let layout = LevelLayout::parse("1.X\n#-#").unwrap();
        let pack = TexturePack::for_level(&GameConfig::new(), &layout);
        let cells: Vec<(IVec2, &str)> = pack.cell_textures(&layout).collect();
        assert_eq!(
            cells,
            vec![
                (IVec2::new(2, 0), "Tiles/Exit"),
                (IVec2::new(0, 1), "Tiles/BlockA0"),
                (IVec2::new(1, 1), "Tiles/Platform"),
                (IVec2::new(2, 1), "Tiles/BlockA0"),
            ]
        );
    }
}
