use proptest::prelude::*;
use sword_arena_core::{Command, Corner, GameConfig, Step};
use sword_arena_world::{self as world, check_invariants, query, World};

fn step() -> impl Strategy<Value = Step> {
    (-1_i32..=1, -1_i32..=1).prop_map(|(dx, dy)| Step::new(dx, dy))
}

fn corner() -> impl Strategy<Value = Corner> {
    prop::sample::select(Corner::ALL.to_vec())
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        step().prop_map(|step| Command::MovePlayer { step }),
        corner().prop_map(|corner| Command::RelocateSpawner { corner }),
        Just(Command::SpawnEnemy),
        Just(Command::CancelSwing),
    ]
}

proptest! {
    #[test]
    fn player_and_enemies_stay_inside_arena(
        commands in prop::collection::vec(command(), 0..200),
        enemy_steps in prop::collection::vec(step(), 0..200),
    ) {
        let mut world = World::new(&GameConfig::default());
        for command in commands {
            world::apply(&mut world, command);
        }
        let enemies = query::enemy_view(&world).into_vec();
        for (index, step) in enemy_steps.into_iter().enumerate() {
            if let Some(enemy) = enemies.get(index % enemies.len().max(1)) {
                world::apply(&mut world, Command::StepEnemy { enemy: enemy.id, step });
            }
        }

        prop_assert_eq!(check_invariants(&world), Ok(()));
        let arena = query::arena(&world);
        prop_assert!(arena.contains(query::player_cell(&world)));
        for enemy in query::enemy_view(&world).iter() {
            prop_assert!(arena.contains(enemy.cell));
        }
        prop_assert!(arena.corner_of(query::spawner(&world).cell).is_some());
    }

    #[test]
    fn zero_moves_never_change_the_player(repeats in 0_usize..20) {
        let mut world = World::new(&GameConfig::default());
        let before = query::player_cell(&world);
        for _ in 0..repeats {
            world::apply(&mut world, Command::MovePlayer { step: Step::ZERO });
        }
        prop_assert_eq!(query::player_cell(&world), before);
    }
}
