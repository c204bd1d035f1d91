use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deepcow_core::config::SpeciesConfig;
use deepcow_core::perception::Sensor;
use deepcow_core::{Action, EnvConfig, Environment, Vector2};
use deepcow_core::entity::EntitySnapshot;
use deepcow_data::EntityKind;
use uuid::Uuid;

fn crowded_config(cows: usize, wolves: usize) -> EnvConfig {
    EnvConfig {
        cow: SpeciesConfig {
            count: cows,
            ..SpeciesConfig::cow()
        },
        wolf: SpeciesConfig {
            count: wolves,
            ..SpeciesConfig::wolf()
        },
        seed: Some(42),
        ..Default::default()
    }
}

fn bench_step_default(c: &mut Criterion) {
    let mut env = Environment::new(crowded_config(1, 1)).unwrap();
    let actions = vec![Action::MoveForward; env.agent_count()];

    c.bench_function("step_1_cow_1_wolf", |b| {
        b.iter(|| {
            let outcome = env.step(black_box(&actions)).unwrap();
            if outcome.done {
                env.reset();
            }
            black_box(outcome.rewards.len())
        })
    });
}

fn bench_step_crowded(c: &mut Criterion) {
    let mut env = Environment::new(crowded_config(20, 20)).unwrap();
    let actions: Vec<Action> = (0..env.agent_count())
        .map(|i| Action::ALL[i % Action::COUNT])
        .collect();

    c.bench_function("step_20_cows_20_wolves", |b| {
        b.iter(|| {
            let outcome = env.step(black_box(&actions)).unwrap();
            if outcome.done {
                env.reset();
            }
            black_box(outcome.states.len())
        })
    });
}

fn bench_sensor_scan(c: &mut Criterion) {
    let sensor = Sensor {
        ray_count: 20,
        field_of_view: 100.0,
        ray_length: 300.0,
    };
    let targets: Vec<EntitySnapshot> = (0..100)
        .map(|i| EntitySnapshot {
            id: Uuid::from_u128(i as u128 + 1),
            kind: EntityKind::ALL[i % 3],
            position: Vector2::new((i % 10) as f64 * 80.0, (i / 10) as f64 * 60.0),
            radius: 20.0,
        })
        .collect();
    let self_id = Uuid::from_u128(0);

    c.bench_function("sensor_scan_20_rays_100_targets", |b| {
        b.iter(|| {
            let (readings, _) =
                sensor.scan(self_id, black_box(Vector2::new(400.0, 300.0)), 0.0, &targets);
            black_box(readings)
        })
    });
}

criterion_group!(benches, bench_step_default, bench_step_crowded, bench_sensor_scan);
criterion_main!(benches);
