//! End-to-end scenario tests for both braking rules

use crash_prevention_sim::simulation::{
    mutual_yield, Axis, BrakingRule, ChainCascade, FixedStep, InputEvent, LoopControl, MutualYield,
    Position, Rgb, RunState, Scenario, SimConfig, Simulation, Vehicle, VehicleId,
};

const DELTA: f32 = 0.01;

fn car(id: usize, x: f32, y: f32, axis: Axis, speed: f32) -> Vehicle {
    Vehicle::new(
        VehicleId(id),
        format!("Car {}", id + 1),
        Position::new(x, y),
        axis,
        speed,
        Rgb::ELECTRIC_BLUE,
    )
}

fn speeds(sim: &Simulation) -> Vec<f32> {
    sim.vehicles().iter().map(|v| v.speed).collect()
}

/// Two vehicles 1000 units apart (800px at scale 0.8) that reach the crossing together
fn converging_pair() -> Simulation {
    let config = SimConfig::intersection();
    let meet_after = 800.0 / 40.0_f32.hypot(32.0);
    let vehicles = vec![
        car(0, 1000.0 - 40.0 * meet_after, 1000.0, Axis::Horizontal, 50.0),
        car(1, 1000.0, 1000.0 - 32.0 * meet_after, Axis::Vertical, 40.0),
    ];
    let rule = mutual_yield(&vehicles).unwrap();
    Simulation::new(config, vehicles, rule).unwrap()
}

#[test]
fn test_converging_pair_starts_1000_units_apart() {
    let sim = converging_pair();
    let distance = sim.vehicles()[0].distance_to(&sim.vehicles()[1]) / sim.config.scale_factor;
    assert!((distance - 1000.0).abs() < 0.1, "distance {}", distance);
}

#[test]
fn test_mutual_yield_brakes_both_until_halt() {
    let mut sim = converging_pair();
    let threshold = sim.config.detection_threshold();
    let mut braking_started_at: Option<f32> = None;

    for _ in 0..6000 {
        let before = speeds(&sim);
        let in_range = sim.vehicles()[0].distance_to(&sim.vehicles()[1]) < threshold;
        let elapsed_before = sim.stats().elapsed_time;

        let state = sim.step(DELTA);
        let after = speeds(&sim);

        for speed in &after {
            assert!(*speed >= 0.0, "negative speed {}", speed);
        }

        if in_range {
            braking_started_at.get_or_insert(elapsed_before);
        }
        if braking_started_at.is_some() {
            for (b, a) in before.iter().zip(&after) {
                assert!(*a < *b || *a == 0.0, "speed went from {} to {}", b, a);
            }
        } else {
            assert_eq!(before, after, "speed changed before the pair was in range");
        }

        let both_stopped = after.iter().all(|s| *s == 0.0);
        if both_stopped {
            assert_eq!(state, RunState::Halted);
            break;
        }
        assert_eq!(state, RunState::Running);
    }

    assert_eq!(sim.state(), RunState::Halted);
    let onset = braking_started_at.expect("vehicles never came within range");
    let halted_at = sim.stats().halted_at.expect("halt time not recorded");
    // The faster vehicle needs 50 / 8 = 6.25s of braking to stop
    let braking_time = halted_at - onset;
    assert!(
        (6.2..=6.35).contains(&braking_time),
        "braked for {}s",
        braking_time
    );
}

#[test]
fn test_mutual_yield_keeps_braking_stopped_vehicle() {
    let config = SimConfig::intersection();
    let vehicles = vec![
        car(0, 0.0, 0.0, Axis::Horizontal, 0.0),
        car(1, 100.0, 100.0, Axis::Vertical, 20.0),
    ];
    let rule = mutual_yield(&vehicles).unwrap();
    let mut sim = Simulation::new(config, vehicles, rule).unwrap();

    sim.step(0.5);
    assert_eq!(sim.vehicles()[0].speed, 0.0);
    assert!((sim.vehicles()[1].speed - 16.0).abs() < 1e-4);
    assert!(sim.vehicles()[0].decelerating);
    assert_eq!(sim.state(), RunState::Running);
}

#[test]
fn test_mutual_yield_does_not_brake_out_of_range() {
    let config = SimConfig::intersection();
    let vehicles = vec![
        car(0, 0.0, 0.0, Axis::Horizontal, 50.0),
        car(1, 1000.0, 0.0, Axis::Vertical, 40.0),
    ];
    let rule = mutual_yield(&vehicles).unwrap();
    let mut sim = Simulation::new(config, vehicles, rule).unwrap();

    sim.step(DELTA);
    assert_eq!(speeds(&sim), vec![50.0, 40.0]);
    assert_eq!(sim.collision_time(), None);
}

#[test]
fn test_collision_estimate_reported_in_range() {
    let mut sim = converging_pair();
    let threshold = sim.config.detection_threshold();
    while sim.vehicles()[0].distance_to(&sim.vehicles()[1]) >= threshold {
        sim.step(DELTA);
    }
    sim.step(DELTA);
    let estimate = sim.collision_time().expect("no estimate while in range");
    assert!(estimate.is_finite() && estimate > 0.0);
}

#[test]
fn test_default_intersection_halts() {
    let mut sim = Simulation::from_scenario(Scenario::Intersection).unwrap();
    for _ in 0..10_000 {
        if sim.step(DELTA) == RunState::Halted {
            break;
        }
    }
    assert_eq!(sim.state(), RunState::Halted);
    assert!(sim.vehicles().iter().all(|v| v.speed == 0.0));
}

#[test]
fn test_convoy_latches_from_front_to_back() {
    let mut sim = Simulation::from_scenario(Scenario::Convoy).unwrap();
    assert_eq!(speeds(&sim), vec![80.0, 80.0, 70.0]);

    let spacing = sim.vehicles()[1].position.x - sim.vehicles()[0].position.x;
    assert!((spacing / sim.config.scale_factor - 500.0).abs() < 1e-3);

    let mut flags_seen = [false; 3];
    for _ in 0..10_000 {
        sim.step(DELTA);

        for (seen, vehicle) in flags_seen.iter_mut().zip(sim.vehicles()) {
            assert!(vehicle.speed >= 0.0);
            if *seen {
                assert!(vehicle.decelerating, "{} released its brakes", vehicle.label);
            }
            *seen = vehicle.decelerating;
        }

        if sim.state().is_halted() {
            break;
        }
    }

    assert_eq!(sim.state(), RunState::Halted);
    assert!(sim.vehicles().iter().all(|v| v.speed == 0.0));

    let BrakingRule::ChainCascade(chain) = sim.rule() else {
        panic!("convoy should use a braking chain");
    };
    assert_eq!(chain.latched(), &[VehicleId(2), VehicleId(1), VehicleId(0)]);
}

#[test]
fn test_convoy_lead_latches_on_first_frame() {
    let mut sim = Simulation::from_scenario(Scenario::Convoy).unwrap();
    sim.step(DELTA);
    assert!(sim.vehicles()[2].decelerating);
    assert!(!sim.vehicles()[1].decelerating);
    assert!(!sim.vehicles()[0].decelerating);
    assert!(sim.vehicles()[2].speed < 70.0);
    assert_eq!(sim.vehicles()[1].speed, 80.0);
}

#[test]
fn test_chain_lead_waits_until_ahead_of_middle() {
    let config = SimConfig::convoy();
    let vehicles = vec![
        car(0, 0.0, 450.0, Axis::Horizontal, 10.0),
        car(1, 0.0, 450.0, Axis::Horizontal, 20.0),
    ];
    let rule = BrakingRule::ChainCascade(ChainCascade::new(&vehicles).unwrap());
    let mut sim = Simulation::new(config, vehicles, rule).unwrap();

    // Level with the vehicle behind it: not yet ahead
    sim.step(DELTA);
    assert!(!sim.vehicles()[1].decelerating);
    // The follower is already inside the detection range
    assert!(sim.vehicles()[0].decelerating);

    sim.step(DELTA);
    assert!(sim.vehicles()[1].decelerating);
}

#[test]
fn test_chain_orders_by_position() {
    let vehicles = vec![
        car(0, 800.0, 0.0, Axis::Horizontal, 70.0),
        car(1, 0.0, 0.0, Axis::Horizontal, 80.0),
        car(2, 400.0, 0.0, Axis::Horizontal, 80.0),
    ];
    let chain = ChainCascade::new(&vehicles).unwrap();
    assert_eq!(chain.order(), &[1, 2, 0]);
}

#[test]
fn test_chain_rejects_bad_layouts() {
    let single = vec![car(0, 0.0, 0.0, Axis::Horizontal, 10.0)];
    assert!(ChainCascade::new(&single).is_err());

    let mixed = vec![
        car(0, 0.0, 0.0, Axis::Horizontal, 10.0),
        car(1, 0.0, 100.0, Axis::Vertical, 10.0),
    ];
    assert!(ChainCascade::new(&mixed).is_err());
    assert!(mutual_yield(&single).is_err());
}

#[test]
fn test_simulation_rejects_rule_built_for_other_vehicles() {
    let three = vec![
        car(0, 0.0, 450.0, Axis::Horizontal, 80.0),
        car(1, 400.0, 450.0, Axis::Horizontal, 80.0),
        car(2, 800.0, 450.0, Axis::Horizontal, 70.0),
    ];
    let chain = BrakingRule::ChainCascade(ChainCascade::new(&three).unwrap());
    let two = three[..2].to_vec();
    assert!(Simulation::new(SimConfig::convoy(), two, chain.clone()).is_err());
    assert!(Simulation::new(SimConfig::convoy(), three, chain).is_ok());

    let mixed = vec![
        car(0, 0.0, 450.0, Axis::Horizontal, 80.0),
        car(1, 400.0, 0.0, Axis::Vertical, 80.0),
    ];
    let pair = vec![
        car(0, 0.0, 450.0, Axis::Horizontal, 80.0),
        car(1, 400.0, 450.0, Axis::Horizontal, 80.0),
    ];
    let pair_chain = BrakingRule::ChainCascade(ChainCascade::new(&pair).unwrap());
    assert!(Simulation::new(SimConfig::convoy(), mixed, pair_chain).is_err());

    let single = vec![car(0, 0.0, 0.0, Axis::Horizontal, 50.0)];
    let lone_yield = BrakingRule::MutualYield(MutualYield::new());
    assert!(Simulation::new(SimConfig::intersection(), single, lone_yield).is_err());
}

#[test]
fn test_restart_restores_initial_state() {
    let mut sim = Simulation::from_scenario(Scenario::Convoy).unwrap();
    let initial: Vec<(Position, f32)> = sim
        .vehicles()
        .iter()
        .map(|v| (v.position, v.speed))
        .collect();

    for _ in 0..1500 {
        sim.step(DELTA);
    }
    assert!(sim.vehicles().iter().any(|v| v.decelerating));

    sim.restart();
    for (vehicle, (position, speed)) in sim.vehicles().iter().zip(&initial) {
        assert_eq!(vehicle.position, *position);
        assert_eq!(vehicle.speed, *speed);
        assert!(!vehicle.decelerating);
        assert_eq!(vehicle.deceleration, 0.0);
    }
    let BrakingRule::ChainCascade(chain) = sim.rule() else {
        panic!("convoy should use a braking chain");
    };
    assert!(chain.latched().is_empty());
    assert_eq!(sim.state(), RunState::Running);
    assert_eq!(sim.stats().frames, 0);
    assert_eq!(sim.stats().restarts, 1);
}

#[test]
fn test_halted_simulation_does_not_move() {
    let mut sim = Simulation::from_scenario(Scenario::Intersection).unwrap();
    while sim.step(DELTA) != RunState::Halted {}

    let positions: Vec<Position> = sim.vehicles().iter().map(|v| v.position).collect();
    let frames = sim.stats().frames;
    sim.step(1.0);
    let after: Vec<Position> = sim.vehicles().iter().map(|v| v.position).collect();
    assert_eq!(positions, after);
    assert_eq!(sim.stats().frames, frames);
}

#[test]
fn test_restart_click_only_when_halted_and_on_button() {
    let mut sim = Simulation::from_scenario(Scenario::Intersection).unwrap();
    let button = sim.restart_button().center();

    sim.step(DELTA);
    let moved = sim.vehicles()[0].position;
    assert_eq!(
        sim.handle_event(InputEvent::Click(button)),
        LoopControl::Continue
    );
    assert_eq!(sim.vehicles()[0].position, moved);

    while sim.step(DELTA) != RunState::Halted {}

    assert_eq!(
        sim.handle_event(InputEvent::Click(Position::new(5.0, 5.0))),
        LoopControl::Continue
    );
    assert_eq!(sim.state(), RunState::Halted);

    assert_eq!(
        sim.handle_event(InputEvent::Click(button)),
        LoopControl::Restarted
    );
    assert_eq!(sim.state(), RunState::Running);
    assert_eq!(sim.vehicles()[0].position, sim.vehicles()[0].initial_position());
}

#[test]
fn test_restart_button_bounds() {
    let config = SimConfig::intersection();
    let button = config.restart_button();
    assert_eq!(button.x, 540.0);
    assert_eq!(button.y, 820.0);
    assert!(button.contains(Position::new(540.0, 820.0)));
    assert!(button.contains(Position::new(659.0, 859.0)));
    assert!(!button.contains(Position::new(660.0, 840.0)));
    assert!(!button.contains(Position::new(600.0, 819.0)));
}

#[test]
fn test_frame_drains_input_before_stepping() {
    let mut sim = Simulation::from_scenario(Scenario::Intersection).unwrap();
    let mut clock = FixedStep::new(DELTA);

    let control = sim.frame(&mut clock, [InputEvent::Quit]);
    assert_eq!(control, LoopControl::Exit);
    assert_eq!(sim.stats().frames, 0);

    let control = sim.frame(&mut clock, std::iter::empty());
    assert_eq!(control, LoopControl::Continue);
    assert_eq!(sim.stats().frames, 1);
}

#[test]
fn test_config_validation() {
    assert!(SimConfig::intersection().validate().is_ok());
    assert!(SimConfig::convoy().validate().is_ok());

    let bad_scale = SimConfig {
        scale_factor: 0.0,
        ..SimConfig::intersection()
    };
    assert!(bad_scale.validate().is_err());

    let bad_decel = SimConfig {
        deceleration_rate: -1.0,
        ..SimConfig::intersection()
    };
    assert!(bad_decel.validate().is_err());

    let bad_rate = SimConfig {
        frame_rate: 0,
        ..SimConfig::convoy()
    };
    assert!(Simulation::with_config(Scenario::Convoy, bad_rate).is_err());
}

#[test]
fn test_stats_track_minimum_separation() {
    let mut sim = Simulation::from_scenario(Scenario::Intersection).unwrap();
    let start = sim.min_separation().unwrap();
    for _ in 0..100 {
        sim.step(DELTA);
    }
    let min = sim.stats().min_separation.unwrap();
    assert!(min < start);
    assert_eq!(sim.stats().frames, 100);
}
