#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sword Arena adapters.

use std::fmt;

use anyhow::Result as AnyResult;
use sword_arena_core::{Arena, CellCoord, GridPoint, Swing};

/// Glyph drawn on empty arena cells.
pub const BACKGROUND_GLYPH: char = '.';
/// Glyph drawn for the player.
pub const PLAYER_GLYPH: char = '@';
/// Glyph drawn for every enemy.
pub const ENEMY_GLYPH: char = 'E';
/// Glyph drawn for the spawner.
pub const SPAWNER_GLYPH: char = 'S';

/// Finished character grid handed to a [`DisplaySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl Frame {
    /// Creates a frame covering `arena` with every cell set to `glyph`.
    #[must_use]
    pub fn filled(arena: Arena, glyph: char) -> Self {
        let width = arena.width();
        let height = arena.height();
        Self {
            width,
            height,
            cells: vec![glyph; width as usize * height as usize],
        }
    }

    /// Number of columns in the frame.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the frame.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Glyph stored at `cell`, if the cell lies inside the frame.
    #[must_use]
    pub fn glyph(&self, cell: CellCoord) -> Option<char> {
        self.index(cell.column(), cell.row())
            .map(|index| self.cells[index])
    }

    /// Overwrites the glyph at `point`. Points outside the frame are skipped.
    pub fn draw(&mut self, point: GridPoint, glyph: char) {
        let (Ok(column), Ok(row)) = (u32::try_from(point.x()), u32::try_from(point.y())) else {
            return;
        };
        if let Some(index) = self.index(column, row) {
            self.cells[index] = glyph;
        }
    }

    /// Iterates over the frame rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().collect())
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(row as usize * self.width as usize + column as usize)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

/// Scene description combining the arena and its inhabitants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Arena bounding the projected frame.
    pub arena: Arena,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Cells occupied by enemies still in play.
    pub enemies: Vec<CellCoord>,
    /// Cell occupied by the spawner.
    pub spawner: CellCoord,
    /// Swing that is still within its display window, if any.
    pub swing: Option<Swing>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        arena: Arena,
        player: CellCoord,
        enemies: Vec<CellCoord>,
        spawner: CellCoord,
        swing: Option<Swing>,
    ) -> Self {
        Self {
            arena,
            player,
            enemies,
            spawner,
            swing,
        }
    }

    /// Projects the scene onto a character grid.
    ///
    /// Layers are drawn spawner first, then enemies, the player and finally the
    /// swing, so later layers win where they overlap.
    #[must_use]
    pub fn project(&self) -> Frame {
        let mut frame = Frame::filled(self.arena, BACKGROUND_GLYPH);
        frame.draw(self.spawner.to_point(), SPAWNER_GLYPH);
        for enemy in &self.enemies {
            frame.draw(enemy.to_point(), ENEMY_GLYPH);
        }
        frame.draw(self.player.to_point(), PLAYER_GLYPH);
        if let Some(swing) = &self.swing {
            for (point, glyph) in swing.glyphs() {
                frame.draw(point, glyph);
            }
        }
        frame
    }
}

/// Source of at most one pressed key per tick.
pub trait InputSource {
    /// Returns the key pressed since the previous poll without blocking.
    fn poll_key(&mut self) -> AnyResult<Option<char>>;
}

/// Destination for finished frames.
pub trait DisplaySink {
    /// Presents `frame`, replacing whatever was shown before.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}
