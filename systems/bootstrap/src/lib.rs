#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap that wires the Sword Arena systems to the event bus and drives
//! one frame at a time.

use std::time::Duration;

use anyhow::Result as AnyResult;
use log::{debug, trace};
use sword_arena_core::{Command, Event, EventBus, EventKind, GameConfig};
use sword_arena_rendering::{DisplaySink, Frame, InputSource, Scene};
use sword_arena_system_chase::Chase;
use sword_arena_system_combat::Combat;
use sword_arena_system_damage::DamageResolution;
use sword_arena_system_intent::{AttackIntent, MoveIntent};
use sword_arena_system_movement::Movement;
use sword_arena_system_spawning::{self as spawning, Spawning};
use sword_arena_world::{self as world, query, InvariantViolation, World};

/// A running game session: the world, the bus routing events through the
/// systems, and the spawner driven once per frame.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    world: World,
    bus: EventBus<World>,
    spawning: Spawning,
}

impl Game {
    /// Creates a session laid out according to `config`.
    #[must_use]
    pub fn new(config: GameConfig, spawning: spawning::Config) -> Self {
        let mut bus = EventBus::new();
        subscribe_systems(&mut bus);
        Self {
            config,
            world: World::new(&config),
            bus,
            spawning: Spawning::new(spawning),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the session was created with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of handlers listening for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.bus.subscriber_count(kind)
    }

    /// Dispatches `event` and every event it causes before returning.
    pub fn emit(&mut self, event: &Event) {
        self.bus.emit(&mut self.world, event);
    }

    /// Advances the session by one frame and projects the result.
    ///
    /// The clock moves by `dt`, the optional key is dispatched to completion,
    /// the spawner runs, and an expired swing is hidden before the scene is
    /// projected. Invariants are checked last.
    pub fn frame(&mut self, key: Option<char>, dt: Duration) -> Result<Frame, InvariantViolation> {
        world::apply(&mut self.world, Command::Tick { dt });

        if let Some(key) = key {
            trace!("key {key:?} pressed");
            self.emit(&Event::Input { key });
        }

        let mut commands = Vec::new();
        self.spawning.handle(query::spawner(&self.world), &mut commands);
        apply_all(&mut self.world, commands);

        if query::swing_expired(&self.world) {
            debug!("swing display window elapsed");
            world::apply(&mut self.world, Command::CancelSwing);
        }

        let frame = scene(&self.world).project();
        world::check_invariants(&self.world)?;
        Ok(frame)
    }

    /// Polls `input`, advances one frame and hands the result to `display`.
    pub fn run_frame<I, D>(
        &mut self,
        input: &mut I,
        display: &mut D,
        dt: Duration,
    ) -> AnyResult<()>
    where
        I: InputSource,
        D: DisplaySink,
    {
        let key = input.poll_key()?;
        let frame = self.frame(key, dt)?;
        display.present(&frame)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default(), spawning::Config::new(0))
    }
}

/// Captures the scene the world currently shows.
#[must_use]
pub fn scene(world: &World) -> Scene {
    let enemies = query::enemy_view(world)
        .iter()
        .map(|enemy| enemy.cell)
        .collect();
    Scene::new(
        query::arena(world),
        query::player_cell(world),
        enemies,
        query::spawner(world).cell,
        query::swing(world).cloned(),
    )
}

fn apply_all(world: &mut World, commands: Vec<Command>) {
    for command in commands {
        world::apply(world, command);
    }
}

fn subscribe_systems(bus: &mut EventBus<World>) {
    let move_intent = MoveIntent::new();
    bus.subscribe(EventKind::Input, move |world, event, bus| {
        let mut intents = Vec::new();
        move_intent.handle(event, &mut intents);
        for intent in &intents {
            bus.emit(world, intent);
        }
    });

    let attack_intent = AttackIntent::new();
    bus.subscribe(EventKind::Input, move |world, event, bus| {
        let mut intents = Vec::new();
        attack_intent.handle(event, &mut intents);
        for intent in &intents {
            bus.emit(world, intent);
        }
    });

    let movement = Movement::new();
    bus.subscribe(EventKind::Move, move |world, event, _| {
        let mut commands = Vec::new();
        movement.handle(event, &mut commands);
        apply_all(world, commands);
    });

    // Enemies advance only when the player moves.
    let chase = Chase::new();
    bus.subscribe(EventKind::Move, move |world, event, _| {
        let mut commands = Vec::new();
        let enemies = query::enemy_view(world);
        chase.handle(event, query::player_cell(world), &enemies, &mut commands);
        apply_all(world, commands);
    });

    let combat = Combat::new();
    bus.subscribe(EventKind::Attack, move |world, event, bus| {
        let mut strikes = Vec::new();
        let mut commands = Vec::new();
        combat.handle(
            event,
            query::arena(world),
            query::player_cell(world),
            query::clock(world),
            &mut strikes,
            &mut commands,
        );
        for strike in &strikes {
            bus.emit(world, strike);
        }
        apply_all(world, commands);
    });

    let damage = DamageResolution::new();
    bus.subscribe(EventKind::Damage, move |world, event, _| {
        let mut commands = Vec::new();
        damage.handle(event, &query::enemy_view(world), &mut commands);
        apply_all(world, commands);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_kind_has_subscribers() {
        let game = Game::default();

        assert_eq!(game.subscriber_count(EventKind::Input), 2);
        assert_eq!(game.subscriber_count(EventKind::Move), 2);
        assert_eq!(game.subscriber_count(EventKind::Attack), 1);
        assert_eq!(game.subscriber_count(EventKind::Damage), 1);
    }

    #[test]
    fn session_keeps_the_config_it_was_built_with() {
        let config = GameConfig {
            tick: Duration::from_millis(40),
            ..GameConfig::default()
        };
        let game = Game::new(config, spawning::Config::new(9));

        assert_eq!(game.config(), &config);
    }

    #[test]
    fn first_frame_shows_player_and_spawner() {
        let mut game = Game::default();
        let frame = game
            .frame(None, Duration::from_millis(100))
            .expect("fresh world satisfies invariants");

        assert_eq!(frame.to_string().lines().count(), 10);
        assert_eq!(
            frame.glyph(query::player_cell(game.world())),
            Some(sword_arena_rendering::PLAYER_GLYPH)
        );
        assert_eq!(
            frame.glyph(query::spawner(game.world()).cell),
            Some(sword_arena_rendering::SPAWNER_GLYPH)
        );
    }
}
