#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sword Arena game.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters feed raw keys into the
//! [`EventBus`] as [`Event::Input`] values, systems subscribed to the bus turn
//! events into follow-up events or [`Command`] values, and the world executes
//! those commands via its `apply` entry point. Every mutation of the world is
//! expressible as a command; every cross-system message is an event.

pub mod bus;

use std::time::Duration;

use thiserror::Error;

pub use bus::{EventBus, Handler};

/// Canonical banner emitted when the game boots.
pub const WELCOME_BANNER: &str = "Welcome to Sword Arena.";

/// Rectangular playing field measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Arena {
    width: u32,
    height: u32,
}

impl Arena {
    /// Arena used by the shipped game: twenty columns by ten rows.
    pub const DEFAULT: Self = Self {
        width: 20,
        height: 10,
    };

    /// Creates an arena with the provided dimensions.
    ///
    /// Both dimensions must be positive so that every clamp has a valid target.
    pub const fn new(width: u32, height: u32) -> Result<Self, ArenaError> {
        if width == 0 || height == 0 {
            return Err(ArenaError::Empty { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns contained in the arena.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the arena.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell lies inside the arena.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Converts a signed point into an arena cell, or `None` when it falls outside.
    #[must_use]
    pub fn cell_at(&self, point: GridPoint) -> Option<CellCoord> {
        let column = u32::try_from(point.x()).ok()?;
        let row = u32::try_from(point.y()).ok()?;
        let cell = CellCoord::new(column, row);
        self.contains(cell).then_some(cell)
    }

    /// Snaps a signed point onto the nearest arena cell.
    #[must_use]
    pub fn clamp(&self, point: GridPoint) -> CellCoord {
        let column = i64::from(point.x()).clamp(0, i64::from(self.width) - 1);
        let row = i64::from(point.y()).clamp(0, i64::from(self.height) - 1);
        // Both values lie in `0..u32::MAX` after clamping.
        CellCoord::new(column as u32, row as u32)
    }

    /// Moves a cell by one step and clamps the result to the arena.
    #[must_use]
    pub fn step_clamped(&self, cell: CellCoord, step: Step) -> CellCoord {
        self.clamp(cell.to_point().offset(step.dx(), step.dy()))
    }

    /// Cell located at the requested corner of the arena.
    #[must_use]
    pub const fn corner(&self, corner: Corner) -> CellCoord {
        let right = self.width - 1;
        let bottom = self.height - 1;
        match corner {
            Corner::TopLeft => CellCoord::new(0, 0),
            Corner::TopRight => CellCoord::new(right, 0),
            Corner::BottomLeft => CellCoord::new(0, bottom),
            Corner::BottomRight => CellCoord::new(right, bottom),
        }
    }

    /// Returns the corner occupied by the cell, if any.
    #[must_use]
    pub fn corner_of(&self, cell: CellCoord) -> Option<Corner> {
        Corner::ALL.into_iter().find(|corner| self.corner(*corner) == cell)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reasons an arena description may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// One of the dimensions was zero.
    #[error("arena must span at least one cell (received {width}x{height})")]
    Empty {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
}

/// Location of a single arena cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new arena cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Converts the cell into a signed point for offset arithmetic.
    #[must_use]
    pub fn to_point(self) -> GridPoint {
        GridPoint::new(
            i32::try_from(self.column).unwrap_or(i32::MAX),
            i32::try_from(self.row).unwrap_or(i32::MAX),
        )
    }
}

/// Signed grid position that may lie outside the arena.
///
/// Swing anchors use this type because a swing drawn next to a wall extends
/// past it; only the in-bounds part is ever drawn or struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPoint {
    x: i32,
    y: i32,
}

impl GridPoint {
    /// Creates a new signed grid point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate, growing to the right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate, growing downwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point translated by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Unit displacement whose components are each `-1`, `0`, or `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    dx: i32,
    dy: i32,
}

impl Step {
    /// Step that leaves a position unchanged.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Creates a step from arbitrary deltas, keeping only their signs.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    /// Step that moves `from` one cell closer to `to` along each axis independently.
    ///
    /// An axis on which both cells already agree contributes no movement.
    #[must_use]
    pub const fn toward(from: CellCoord, to: CellCoord) -> Self {
        Self {
            dx: axis_sign(from.column(), to.column()),
            dy: axis_sign(from.row(), to.row()),
        }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Reports whether the step leaves a position unchanged.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

const fn axis_sign(from: u32, to: u32) -> i32 {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}

/// Cardinal directions used for movement and attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Unit step pointing in this direction.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::North => Step::new(0, -1),
            Self::East => Step::new(1, 0),
            Self::South => Step::new(0, 1),
            Self::West => Step::new(-1, 0),
        }
    }
}

/// The four arena corners a spawner may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    /// Column zero, row zero.
    TopLeft,
    /// Last column, row zero.
    TopRight,
    /// Column zero, last row.
    BottomLeft,
    /// Last column, last row.
    BottomRight,
}

impl Corner {
    /// Every corner in a fixed order, used for uniform selection.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Arena cell currently occupied by the enemy.
    pub cell: CellCoord,
    /// Player moves remaining before the enemy may step again.
    pub cooldown: u32,
    /// Cooldown restored after every step.
    pub move_delay: u32,
}

impl EnemySnapshot {
    /// Reports whether the enemy may step on the next chase pass.
    #[must_use]
    pub const fn ready_to_move(&self) -> bool {
        self.cooldown == 0
    }
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of live enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemies are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the spawner used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnerSnapshot {
    /// Corner the spawner currently occupies.
    pub corner: Corner,
    /// Arena cell of that corner.
    pub cell: CellCoord,
    /// Ticks remaining before the spawner relocates.
    pub relocation_cooldown: u32,
    /// Cooldown restored after every relocation.
    pub relocation_delay: u32,
    /// Ticks remaining before the spawner creates an enemy.
    pub spawn_cooldown: u32,
    /// Cooldown restored after every spawn.
    pub spawn_delay: u32,
}

/// Independent countdowns driven by the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnerTimer {
    /// Countdown until the spawner hops to another corner.
    Relocation,
    /// Countdown until the spawner creates an enemy.
    Spawn,
}

/// Axis along which a swing pattern is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Single row of glyphs extending along the x axis.
    Horizontal,
    /// Stack of rows extending along the y axis.
    Vertical,
}

/// Visible sword swing anchored next to the player.
///
/// Glyph `c` of pattern row `r` occupies `anchor + (c, r)`. Horizontal swings
/// therefore advance along x only, while vertical swings advance one row per
/// pattern line. Spaces are transparent and occupy nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swing {
    anchor: GridPoint,
    pattern: &'static [&'static str],
    orientation: Orientation,
    started_at: Duration,
}

impl Swing {
    /// Creates a swing that started at the provided simulation time.
    #[must_use]
    pub const fn new(
        anchor: GridPoint,
        pattern: &'static [&'static str],
        orientation: Orientation,
        started_at: Duration,
    ) -> Self {
        Self {
            anchor,
            pattern,
            orientation,
            started_at,
        }
    }

    /// Upper-left point of the pattern.
    #[must_use]
    pub const fn anchor(&self) -> GridPoint {
        self.anchor
    }

    /// Glyph rows drawn from the anchor.
    #[must_use]
    pub const fn pattern(&self) -> &'static [&'static str] {
        self.pattern
    }

    /// Layout axis of the pattern.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Simulation time at which the swing was created.
    #[must_use]
    pub const fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Time elapsed since the swing was created.
    #[must_use]
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Reports whether the swing is still within its display window at `now`.
    #[must_use]
    pub fn visible_at(&self, now: Duration, display: Duration) -> bool {
        self.age(now) < display
    }

    /// Occupied points paired with their glyphs, in pattern order.
    pub fn glyphs(&self) -> impl Iterator<Item = (GridPoint, char)> + '_ {
        let anchor = self.anchor;
        self.pattern.iter().zip(0_i32..).flat_map(move |(row, dy)| {
            row.chars()
                .zip(0_i32..)
                .filter(|(glyph, _)| *glyph != ' ')
                .map(move |(glyph, dx)| (anchor.offset(dx, dy), glyph))
        })
    }
}

/// Events dispatched through the [`EventBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A raw key read from the input source this tick.
    Input {
        /// Character produced by the key press.
        key: char,
    },
    /// The player intends to move by one step.
    Move {
        /// Requested displacement.
        step: Step,
    },
    /// The player swings the sword.
    Attack {
        /// Direction of the swing.
        direction: Direction,
    },
    /// A single arena cell was struck.
    Damage {
        /// Cell receiving the hit.
        cell: CellCoord,
    },
}

impl Event {
    /// Tag used to route the event to its subscribers.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Input { .. } => EventKind::Input,
            Self::Move { .. } => EventKind::Move,
            Self::Attack { .. } => EventKind::Attack,
            Self::Damage { .. } => EventKind::Damage,
        }
    }
}

/// Closed set of event tags that handlers subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Subscribes to [`Event::Input`].
    Input,
    /// Subscribes to [`Event::Move`].
    Move,
    /// Subscribes to [`Event::Attack`].
    Attack,
    /// Subscribes to [`Event::Damage`].
    Damage,
}

impl EventKind {
    /// Number of distinct event kinds.
    pub const COUNT: usize = 4;

    /// Every event kind in declaration order.
    pub const ALL: [Self; Self::COUNT] = [Self::Input, Self::Move, Self::Attack, Self::Damage];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Input => 0,
            Self::Move => 1,
            Self::Attack => 2,
            Self::Damage => 3,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the player by one step, clamped to the arena.
    MovePlayer {
        /// Requested displacement.
        step: Step,
    },
    /// Hides the active swing, if any.
    CancelSwing,
    /// Replaces the active swing.
    ShowSwing {
        /// Swing to display.
        swing: Swing,
    },
    /// Moves an enemy by one step and restarts its movement cooldown.
    StepEnemy {
        /// Identifier of the enemy to move.
        enemy: EnemyId,
        /// Requested displacement.
        step: Step,
    },
    /// Counts down an enemy's movement cooldown by one.
    CoolEnemy {
        /// Identifier of the enemy whose cooldown elapses.
        enemy: EnemyId,
    },
    /// Removes an enemy from play.
    RemoveEnemy {
        /// Identifier of the enemy to remove.
        enemy: EnemyId,
    },
    /// Moves the spawner to a corner and restarts its relocation cooldown.
    RelocateSpawner {
        /// Destination corner.
        corner: Corner,
    },
    /// Creates an enemy at the spawner and restarts its spawn cooldown.
    SpawnEnemy,
    /// Counts down one of the spawner's cooldowns by one.
    CoolSpawner {
        /// Countdown to advance.
        timer: SpawnerTimer,
    },
}

/// Fixed tuning constants for a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Playing field dimensions.
    pub arena: Arena,
    /// Cell the player occupies when the game starts.
    pub player_start: CellCoord,
    /// Delay between consecutive frames.
    pub tick: Duration,
    /// How long a swing stays visible after the attack.
    pub swing_display: Duration,
    /// Player moves an enemy waits between steps.
    pub enemy_move_delay: u32,
    /// Ticks the spawner waits between corner hops.
    pub spawner_relocation_delay: u32,
    /// Ticks the spawner waits between enemy spawns.
    pub spawn_delay: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Arena::DEFAULT,
            player_start: CellCoord::new(5, 5),
            tick: Duration::from_millis(100),
            swing_display: Duration::from_millis(500),
            enemy_move_delay: 1,
            spawner_relocation_delay: 50,
            spawn_delay: 30,
        }
    }
}
