//! Proximity braking rules
//!
//! Both rules share the same primitive: when two detection radii overlap a
//! vehicle sheds `deceleration_rate` units of speed per second, floored at zero.
//! They differ in who brakes and whether the decision is latched.

use anyhow::{ensure, Result};
use log::debug;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

use super::config::SimConfig;
use super::types::VehicleId;
use super::vehicle::Vehicle;

/// Estimated seconds until two vehicles meet.
///
/// The pixel distance is converted to simulation units and divided by the
/// magnitude of the relative velocity. Vehicles with no relative motion never
/// meet, which is reported as positive infinity.
pub fn collision_time(a: &Vehicle, b: &Vehicle, scale_factor: f32) -> f32 {
    let distance = a.distance_to(b) / scale_factor;

    let (ax, ay) = a.velocity();
    let (bx, by) = b.velocity();
    let relative_velocity = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();

    if relative_velocity == 0.0 {
        return f32::INFINITY;
    }
    distance / relative_velocity
}

/// Symmetric, continuously re-evaluated braking.
///
/// Every frame, every pair of vehicles closer than the detection threshold
/// brakes together. Nothing is latched: braking stops as soon as the pair
/// separates, and a stopped vehicle keeps "braking" at zero speed.
#[derive(Debug, Clone, Default)]
pub struct MutualYield {
    /// Smallest collision-time estimate among pairs in range on the last frame
    pub last_collision_time: Option<f32>,
    in_range: HashSet<(VehicleId, VehicleId)>,
}

impl MutualYield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when at least one pair braked this frame and every vehicle is stopped
    fn before_motion(
        &mut self,
        vehicles: &mut [Vehicle],
        delta_secs: f32,
        config: &SimConfig,
    ) -> bool {
        let threshold = config.detection_threshold();
        let mut braking = vec![false; vehicles.len()];
        let mut in_range = HashSet::new();
        let mut soonest: Option<f32> = None;

        for i in 0..vehicles.len() {
            for j in (i + 1)..vehicles.len() {
                let (a, b) = (&vehicles[i], &vehicles[j]);
                if a.distance_to(b) >= threshold {
                    continue;
                }

                let estimate = collision_time(a, b, config.scale_factor);
                soonest = Some(soonest.map_or(estimate, |t| t.min(estimate)));

                let pair = (a.id, b.id);
                if !self.in_range.contains(&pair) {
                    debug!(
                        "{} and {} within detection range, collision in {:.2}s",
                        a.label, b.label, estimate
                    );
                }
                in_range.insert(pair);
                braking[i] = true;
                braking[j] = true;
            }
        }

        self.in_range = in_range;
        self.last_collision_time = soonest;

        if !braking.iter().any(|b| *b) {
            return false;
        }

        for (vehicle, _) in vehicles.iter_mut().zip(&braking).filter(|(_, b)| **b) {
            vehicle.engage_brakes(config.deceleration_rate);
            vehicle.brake(config.deceleration_rate, delta_secs);
        }

        vehicles.iter().all(Vehicle::is_stopped)
    }

    fn reset(&mut self) {
        self.last_collision_time = None;
        self.in_range.clear();
    }
}

/// One-shot braking cascade through a single-file queue.
///
/// The lead vehicle brakes first, then each follower latches its brakes the
/// first frame it gets within range of the vehicle directly ahead of it.
#[derive(Debug, Clone)]
pub struct ChainCascade {
    /// Vehicle indices ordered from the back of the queue to the front
    order: Vec<usize>,
    /// Vehicles in the order their brakes latched during the current run
    latched: Vec<VehicleId>,
}

impl ChainCascade {
    /// Build the chain from the vehicles' starting positions.
    ///
    /// All vehicles must share one axis; at least two are needed.
    pub fn new(vehicles: &[Vehicle]) -> Result<Self> {
        ensure!(
            vehicles.len() >= 2,
            "a braking chain needs at least two vehicles, got {}",
            vehicles.len()
        );
        let axis = vehicles[0].axis;
        ensure!(
            vehicles.iter().all(|v| v.axis == axis),
            "every vehicle in a braking chain must travel along the same axis"
        );

        let mut order: Vec<usize> = (0..vehicles.len()).collect();
        order.sort_by_key(|&i| OrderedFloat(vehicles[i].progress()));

        Ok(Self {
            order,
            latched: Vec::new(),
        })
    }

    /// Vehicle indices from the back of the queue to the front
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Vehicles in the order their brakes latched
    pub fn latched(&self) -> &[VehicleId] {
        &self.latched
    }

    fn before_motion(&mut self, vehicles: &mut [Vehicle], delta_secs: f32, config: &SimConfig) {
        let threshold = config.detection_threshold();
        let rate = config.deceleration_rate;
        let n = self.order.len();

        let lead = self.order[n - 1];
        let behind_lead = self.order[n - 2];
        if !vehicles[lead].decelerating
            && vehicles[lead].progress() > vehicles[behind_lead].progress()
        {
            self.latch(&mut vehicles[lead], rate);
        }

        for k in (0..n - 1).rev() {
            let follower = self.order[k];
            let ahead = self.order[k + 1];
            if vehicles[follower].decelerating {
                continue;
            }
            if vehicles[follower].distance_to(&vehicles[ahead]) <= threshold {
                self.latch(&mut vehicles[follower], rate);
            }
        }

        for vehicle in vehicles.iter_mut() {
            vehicle.apply_latched_brakes(delta_secs);
        }
    }

    fn latch(&mut self, vehicle: &mut Vehicle, rate: f32) {
        if vehicle.engage_brakes(rate) {
            debug!("{} brakes latched at {:.1} m/s", vehicle.label, vehicle.speed);
            self.latched.push(vehicle.id);
        }
    }

    fn reset(&mut self) {
        self.latched.clear();
    }
}

/// Braking strategy chosen when a scenario is built
#[derive(Debug, Clone)]
pub enum BrakingRule {
    MutualYield(MutualYield),
    ChainCascade(ChainCascade),
}

impl BrakingRule {
    /// Check that the rule can drive this set of vehicles
    pub fn check_fits(&self, vehicles: &[Vehicle]) -> Result<()> {
        match self {
            BrakingRule::MutualYield(_) => ensure!(
                vehicles.len() >= 2,
                "mutual yielding needs at least two vehicles, got {}",
                vehicles.len()
            ),
            BrakingRule::ChainCascade(rule) => {
                ensure!(
                    rule.order.len() == vehicles.len(),
                    "braking chain was built for {} vehicles, got {}",
                    rule.order.len(),
                    vehicles.len()
                );
                let axis = vehicles[0].axis;
                ensure!(
                    vehicles.iter().all(|v| v.axis == axis),
                    "every vehicle in a braking chain must travel along the same axis"
                );
            }
        }
        Ok(())
    }

    /// Evaluate triggers and apply this frame's deceleration.
    /// Returns true if the run halts before any vehicle moves.
    pub fn before_motion(
        &mut self,
        vehicles: &mut [Vehicle],
        delta_secs: f32,
        config: &SimConfig,
    ) -> bool {
        match self {
            BrakingRule::MutualYield(rule) => rule.before_motion(vehicles, delta_secs, config),
            BrakingRule::ChainCascade(rule) => {
                rule.before_motion(vehicles, delta_secs, config);
                false
            }
        }
    }

    /// Returns true if the run halts once every vehicle has moved
    pub fn after_motion(&self, vehicles: &[Vehicle]) -> bool {
        match self {
            BrakingRule::MutualYield(_) => false,
            BrakingRule::ChainCascade(_) => vehicles.iter().all(Vehicle::is_stopped),
        }
    }

    /// Latest collision-time estimate, when the rule computes one
    pub fn collision_time(&self) -> Option<f32> {
        match self {
            BrakingRule::MutualYield(rule) => rule.last_collision_time,
            BrakingRule::ChainCascade(_) => None,
        }
    }

    /// Clear every latch and diagnostic
    pub fn reset(&mut self) {
        match self {
            BrakingRule::MutualYield(rule) => rule.reset(),
            BrakingRule::ChainCascade(rule) => rule.reset(),
        }
    }
}
