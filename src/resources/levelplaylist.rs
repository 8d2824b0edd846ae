use bevy_ecs::prelude::Resource;

use crate::level::LevelLayout;

/// Levels the session cycles through, parsed once at startup.
#[derive(Resource, Debug, Clone)]
pub struct LevelPlaylist {
    layouts: Vec<LevelLayout>,
    current: usize,
}

impl LevelPlaylist {
    /// Returns `None` for an empty list.
    pub fn new(layouts: Vec<LevelLayout>) -> Option<Self> {
        if layouts.is_empty() {
            return None;
        }
        Some(Self { layouts, current: 0 })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &LevelLayout {
        &self.layouts[self.current]
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Move to the next level, wrapping around after the last one.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.layouts.len();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps() {
        let a = LevelLayout::parse("1X\n##").unwrap();
        let b = LevelLayout::parse("X1\n##").unwrap();
        let mut playlist = LevelPlaylist::new(vec![a.clone(), b]).unwrap();
        assert_eq!(playlist.current(), &a);
        assert_eq!(playlist.advance(), 1);
        assert_eq!(playlist.advance(), 0);
        assert!(LevelPlaylist::new(Vec::new()).is_none());
    }
}
