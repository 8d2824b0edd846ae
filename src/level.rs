//! Level text format.
//!
//! A level is one character per cell, one line per row:
//!
//! ```text
//! ....................
//! .1........G.......X.
//! ####....---....#####
//! ```
//!
//! | symbol      | kind              | collision  |
//! |-------------|-------------------|------------|
//! | `.`         | air               | passable   |
//! | `X`         | exit              | passable   |
//! | `1`         | player start      | passable   |
//! | `G`         | gem               | passable   |
//! | `-` `~`     | platform block    | platform   |
//! | `:`         | passable block    | passable   |
//! | `#`         | impassable block  | impassable |
//! | `A`..`D`    | monster spawn     | passable   |
//!
//! Any other character is rejected when the level is loaded, so the
//! simulation only ever sees validated grids.

use std::fmt;
use std::path::Path;

use glam::IVec2;

use crate::resources::tilegrid::{Tile, TileGrid, TileSize};

/// Everything that can make a level unloadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Character not in the symbol table. `line` and `column` are 1-based.
    UnknownSymbol {
        symbol: char,
        line: usize,
        column: usize,
    },
    /// Row width differs from the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    Empty,
    MissingStart,
    DuplicateStart { line: usize, column: usize },
    MissingExit,
    DuplicateExit { line: usize, column: usize },
    InvalidDimensions {
        width: i32,
        height: i32,
        cells: usize,
    },
    InvalidTileSize { width: i32, height: i32 },
    Io(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::UnknownSymbol {
                symbol,
                line,
                column,
            } => write!(
                f,
                "unsupported tile symbol {symbol:?} at line {line}, column {column}"
            ),
            LevelError::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line} is {found} cells wide, expected {expected}"
            ),
            LevelError::Empty => write!(f, "level has no rows"),
            LevelError::MissingStart => write!(f, "level must have a starting point"),
            LevelError::DuplicateStart { line, column } => write!(
                f,
                "second starting point at line {line}, column {column}"
            ),
            LevelError::MissingExit => write!(f, "level must have an exit"),
            LevelError::DuplicateExit { line, column } => {
                write!(f, "second exit at line {line}, column {column}")
            }
            LevelError::InvalidDimensions {
                width,
                height,
                cells,
            } => write!(f, "{cells} cells do not fill a {width}x{height} grid"),
            LevelError::InvalidTileSize { width, height } => {
                write!(f, "invalid tile size {width}x{height}")
            }
            LevelError::Io(e) => write!(f, "failed to read level: {e}"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Sprite set used by a monster spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    A,
    B,
    C,
    D,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [MonsterKind::A, MonsterKind::B, MonsterKind::C, MonsterKind::D];

    pub fn sprite_set(self) -> &'static str {
        match self {
            MonsterKind::A => "MonsterA",
            MonsterKind::B => "MonsterB",
            MonsterKind::C => "MonsterC",
            MonsterKind::D => "MonsterD",
        }
    }
}

/// What a level cell holds, before it is reduced to a collision [`Tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Air,
    Exit,
    Start,
    Gem,
    PlatformBlock,
    PassableBlock,
    ImpassableBlock,
    Monster(MonsterKind),
}

impl TileKind {
    /// Look up a level symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let kind = match symbol {
            '.' => TileKind::Air,
            'X' => TileKind::Exit,
            '1' => TileKind::Start,
            'G' => TileKind::Gem,
            '-' | '~' => TileKind::PlatformBlock,
            ':' => TileKind::PassableBlock,
            '#' => TileKind::ImpassableBlock,
            'A' => TileKind::Monster(MonsterKind::A),
            'B' => TileKind::Monster(MonsterKind::B),
            'C' => TileKind::Monster(MonsterKind::C),
            'D' => TileKind::Monster(MonsterKind::D),
            _ => return None,
        };
        Some(kind)
    }

    /// Collision classification of this kind.
    pub fn collision(self) -> Tile {
        match self {
            TileKind::ImpassableBlock => Tile::Impassable,
            TileKind::PlatformBlock => Tile::Platform,
            TileKind::Air
            | TileKind::Exit
            | TileKind::Start
            | TileKind::Gem
            | TileKind::PassableBlock
            | TileKind::Monster(_) => Tile::Passable,
        }
    }

    /// Config key naming this kind (used by the texture table).
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Air => "air",
            TileKind::Exit => "exit",
            TileKind::Start => "start",
            TileKind::Gem => "gem",
            TileKind::PlatformBlock => "platform_block",
            TileKind::PassableBlock => "passable_block",
            TileKind::ImpassableBlock => "impassable_block",
            TileKind::Monster(MonsterKind::A) => "monster_a",
            TileKind::Monster(MonsterKind::B) => "monster_b",
            TileKind::Monster(MonsterKind::C) => "monster_c",
            TileKind::Monster(MonsterKind::D) => "monster_d",
        }
    }

    pub const ALL: [TileKind; 11] = [
        TileKind::Air,
        TileKind::Exit,
        TileKind::Start,
        TileKind::Gem,
        TileKind::PlatformBlock,
        TileKind::PassableBlock,
        TileKind::ImpassableBlock,
        TileKind::Monster(MonsterKind::A),
        TileKind::Monster(MonsterKind::B),
        TileKind::Monster(MonsterKind::C),
        TileKind::Monster(MonsterKind::D),
    ];
}

/// Parsed, validated level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    width: usize,
    height: usize,
    kinds: Vec<TileKind>,
    start: IVec2,
    exit: IVec2,
}

impl LevelLayout {
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<&str> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }

        let width = rows[0].chars().count();
        let mut kinds = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut exit = None;

        for (y, row) in rows.iter().enumerate() {
            let line = y + 1;
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    line,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let column = x + 1;
                let kind = TileKind::from_symbol(symbol).ok_or(LevelError::UnknownSymbol {
                    symbol,
                    line,
                    column,
                })?;
                let cell = IVec2::new(x as i32, y as i32);
                match kind {
                    TileKind::Start if start.is_some() => {
                        return Err(LevelError::DuplicateStart { line, column });
                    }
                    TileKind::Start => start = Some(cell),
                    TileKind::Exit if exit.is_some() => {
                        return Err(LevelError::DuplicateExit { line, column });
                    }
                    TileKind::Exit => exit = Some(cell),
                    _ => {}
                }
                kinds.push(kind);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            kinds,
            start: start.ok_or(LevelError::MissingStart)?,
            exit: exit.ok_or(LevelError::MissingExit)?,
        })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LevelError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn kind(&self, x: usize, y: usize) -> Option<TileKind> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.kinds[y * self.width + x])
    }

    pub fn start_cell(&self) -> IVec2 {
        self.start
    }

    pub fn exit_cell(&self) -> IVec2 {
        self.exit
    }

    fn cells(&self) -> impl Iterator<Item = (IVec2, TileKind)> + '_ {
        self.kinds.iter().enumerate().map(|(i, kind)| {
            (
                IVec2::new((i % self.width) as i32, (i / self.width) as i32),
                *kind,
            )
        })
    }

    pub fn enemy_spawns(&self) -> impl Iterator<Item = (IVec2, MonsterKind)> + '_ {
        self.cells().filter_map(|(cell, kind)| match kind {
            TileKind::Monster(monster) => Some((cell, monster)),
            _ => None,
        })
    }

    pub fn gem_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells()
            .filter_map(|(cell, kind)| (kind == TileKind::Gem).then_some(cell))
    }

    /// Kinds that occur at least once, in symbol-table order.
    pub fn kinds_present(&self) -> Vec<TileKind> {
        TileKind::ALL
            .into_iter()
            .filter(|kind| self.kinds.contains(kind))
            .collect()
    }

    /// Reduce the layout to its immutable collision grid.
    pub fn to_tile_grid(&self, tile_size: TileSize) -> Result<TileGrid, LevelError> {
        TileGrid::new(
            self.width as i32,
            self.height as i32,
            self.kinds.iter().map(|kind| kind.collision()).collect(),
            tile_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilegrid::TileSource;

    const LEVEL: &str = "\
..........
.1..G...X.
.A..---.B.
##########
";

    #[test]
    fn test_symbol_table() {
        assert_eq!(TileKind::from_symbol('#').unwrap().collision(), Tile::Impassable);
        assert_eq!(TileKind::from_symbol('-').unwrap().collision(), Tile::Platform);
        assert_eq!(TileKind::from_symbol('~').unwrap().collision(), Tile::Platform);
        for symbol in ['.', 'X', '1', 'G', ':', 'A', 'B', 'C', 'D'] {
            assert_eq!(
                TileKind::from_symbol(symbol).unwrap().collision(),
                Tile::Passable,
                "{symbol}"
            );
        }
        assert_eq!(TileKind::from_symbol('?'), None);
    }

    #[test]
    fn test_parse_level() {
        let layout = LevelLayout::parse(LEVEL).unwrap();
        assert_eq!(layout.width(), 10);
        assert_eq!(layout.height(), 4);
        assert_eq!(layout.start_cell(), IVec2::new(1, 1));
        assert_eq!(layout.exit_cell(), IVec2::new(8, 1));
        assert_eq!(layout.gem_cells().collect::<Vec<_>>(), vec![IVec2::new(4, 1)]);
        assert_eq!(
            layout.enemy_spawns().collect::<Vec<_>>(),
            vec![(IVec2::new(1, 2), MonsterKind::A), (IVec2::new(8, 2), MonsterKind::B)]
        );
        assert_eq!(layout.kind(4, 2), Some(TileKind::PlatformBlock));
        assert_eq!(layout.kind(10, 0), None);
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let layout = LevelLayout::parse("1.X\r\n###\r\n").unwrap();
        assert_eq!(layout.width(), 3);
        assert_eq!(layout.height(), 2);
    }

    #[test]
    fn test_unknown_symbol_is_fatal() {
        let err = LevelLayout::parse("1.X\n#?#\n").unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownSymbol {
                symbol: '?',
                line: 2,
                column: 2
            }
        );
        assert!(err.to_string().contains("'?'"));
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let err = LevelLayout::parse("1.X\n##\n").unwrap_err();
        assert_eq!(
            err,
            LevelError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_start_and_exit_rules() {
        assert_eq!(LevelLayout::parse(""), Err(LevelError::Empty));
        assert_eq!(LevelLayout::parse("..X\n"), Err(LevelError::MissingStart));
        assert_eq!(LevelLayout::parse("1..\n"), Err(LevelError::MissingExit));
        assert_eq!(
            LevelLayout::parse("11X\n"),
            Err(LevelError::DuplicateStart { line: 1, column: 2 })
        );
        assert_eq!(
            LevelLayout::parse("1XX\n"),
            Err(LevelError::DuplicateExit { line: 1, column: 3 })
        );
    }

    #[test]
    fn test_to_tile_grid() {
        let grid = LevelLayout::parse(LEVEL)
            .unwrap()
            .to_tile_grid(TileSize::default())
            .unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.classification(4, 2), Tile::Platform);
        assert_eq!(grid.classification(0, 3), Tile::Impassable);
        assert_eq!(grid.classification(8, 1), Tile::Passable);
    }

    #[test]
    fn test_kinds_present() {
        let layout = LevelLayout::parse("1.X\n###\n").unwrap();
        assert_eq!(
            layout.kinds_present(),
            vec![
                TileKind::Air,
                TileKind::Exit,
                TileKind::Start,
                TileKind::ImpassableBlock
            ]
        );
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = LevelLayout::load_from_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
