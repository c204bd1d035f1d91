mod common;

use common::EnvironmentBuilder;
use deepcow_core::config::EnvConfig;
use deepcow_core::{Action, Environment, SimError};

#[test]
fn test_short_action_list_is_rejected_atomically() {
    let mut env = EnvironmentBuilder::new()
        .with_cow(100.0, 100.0, 0.0)
        .with_wolf(300.0, 300.0, 0.0)
        .with_grass(700.0, 500.0)
        .build();
    env.step(&[Action::MoveForward, Action::MoveForward]).unwrap();
    let frame_before = env.frame();

    let err = env.step(&[Action::MoveForward]).unwrap_err();
    assert!(err.is_step_rejection());
    assert_eq!(env.frame(), frame_before);
    assert_eq!(env.tick(), 1);
}

#[test]
fn test_long_action_list_is_rejected() {
    let mut env = EnvironmentBuilder::new().with_cow(100.0, 100.0, 0.0).build();
    let err = env
        .step(&[Action::Nothing, Action::Nothing, Action::Nothing])
        .unwrap_err();
    assert!(matches!(
        err,
        SimError::ActionCountMismatch {
            expected: 1,
            actual: 3
        }
    ));
}

#[test]
fn test_unknown_action_index_is_rejected_atomically() {
    let mut env = EnvironmentBuilder::new()
        .with_cow(100.0, 100.0, 0.0)
        .with_cow(200.0, 100.0, 0.0)
        .build();
    let frame_before = env.frame();
    let err = env.step_indices(&[1, Action::COUNT]).unwrap_err();
    assert!(matches!(err, SimError::UnknownAction(i) if i == Action::COUNT));
    assert_eq!(env.frame(), frame_before);
}

#[test]
fn test_empty_arena_steps() {
    let mut env = EnvironmentBuilder::new().build();
    assert!(env.reset().is_empty());
    let outcome = env.step(&[]).unwrap();
    assert!(outcome.states.is_empty());
    assert!(outcome.rewards.is_empty());
    assert!(!outcome.done);
}

#[test]
fn test_invalid_construction_is_rejected() {
    let cases: Vec<Box<dyn Fn(&mut EnvConfig)>> = vec![
        Box::new(|c| c.arena.width = 0.0),
        Box::new(|c| c.arena.height = -5.0),
        Box::new(|c| c.delta_time = 0.0),
        Box::new(|c| c.cow.mass = 0.0),
        Box::new(|c| c.wolf.radius = -1.0),
        Box::new(|c| c.grass.radius = 0.0),
        Box::new(|c| c.cow.field_of_view = 720.0),
    ];
    for (i, modify) in cases.iter().enumerate() {
        let mut config = EnvConfig::default();
        modify(&mut config);
        let result = Environment::new(config);
        assert!(
            matches!(result, Err(SimError::Config(_))),
            "case {i} should be rejected"
        );
    }
}

#[test]
fn test_degenerate_sensors_are_allowed() {
    let mut env = EnvironmentBuilder::new()
        .with_config(|c| {
            c.cow.ray_count = 0;
            c.wolf.field_of_view = 0.0;
            c.wolf.ray_count = 5;
        })
        .with_cow(100.0, 100.0, 0.0)
        .with_wolf(300.0, 100.0, 0.0)
        .build();
    let outcome = env.step(&[Action::Nothing, Action::Nothing]).unwrap();
    assert!(outcome.states[0].rays.is_empty());
    let wolf_rays = &outcome.states[1].rays;
    assert_eq!(wolf_rays.len(), 5);
    assert!(wolf_rays.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_tiny_arena_pins_agents() {
    let mut env = EnvironmentBuilder::new()
        .with_arena(30.0, 30.0)
        .with_random_cows(1)
        .build();
    for _ in 0..10 {
        env.step(&[Action::MoveForward]).unwrap();
        let p = env.cows()[0].body.position;
        assert_eq!((p.x, p.y), (15.0, 15.0));
    }
}
