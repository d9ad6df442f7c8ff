//! Ring-shaped track the agents drive around.
//!
//! Each agent is a point car with a heading. Every step it reads five ray
//! distances to the track walls, receives a steering and acceleration
//! command, and moves. Leaving the ring ends its episode. In the spirit of a
//! Gym environment, [`Track::reset`] starts an episode, [`Track::sensors`]
//! observes, [`Track::step`] acts and [`Track::fitness`] reports the reward.

use neuro::{FitnessScore, MotorOutput, SensorInput};
use std::f32::consts::{PI, TAU};

pub const INNER_RADIUS: f32 = 40.0;
pub const OUTER_RADIUS: f32 = 60.0;
pub const RAY_LENGTH: f32 = 30.0;
/// Ray directions relative to the heading, in degrees.
pub const RAY_ANGLES: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
pub const SENSOR_COUNT: usize = RAY_ANGLES.len();

const MAX_TURN: f32 = 0.1;
const MAX_SPEED: f32 = 2.0;
const SURVIVAL_BONUS: f32 = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub alive: bool,
    /// Distance travelled along the centre line, counter-clockwise positive.
    pub progress: f32,
    pub steps_alive: u32,
}

impl Car {
    fn at_start() -> Self {
        let mid = (INNER_RADIUS + OUTER_RADIUS) / 2.0;
        Self { x: mid, y: 0.0, heading: PI / 2.0, alive: true, progress: 0.0, steps_alive: 0 }
    }

    fn radius(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

pub struct Track {
    cars: Vec<Car>,
}

impl Track {
    #[must_use]
    pub fn new(agents: usize) -> Self {
        Self { cars: vec![Car::at_start(); agents] }
    }

    pub fn reset(&mut self) {
        self.cars.fill(Car::at_start());
    }

    #[must_use]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    #[must_use]
    pub fn all_crashed(&self) -> bool {
        self.cars.iter().all(|c| !c.alive)
    }

    /// Normalized ray readings for every car still driving.
    #[must_use]
    pub fn sensors(&self) -> Vec<SensorInput> {
        self.cars
            .iter()
            .enumerate()
            .filter(|(_, car)| car.alive)
            .map(|(agent_id, car)| SensorInput {
                agent_id,
                sensors: RAY_ANGLES
                    .iter()
                    .map(|deg| {
                        let angle = car.heading + deg.to_radians();
                        wall_distance(car.x, car.y, angle.cos(), angle.sin()) / RAY_LENGTH
                    })
                    .collect(),
            })
            .collect()
    }

    /// Applies motor commands. Commands for crashed or unknown agents are ignored.
    pub fn step(&mut self, commands: &[MotorOutput]) {
        for command in commands {
            let Some(car) = self.cars.get_mut(command.agent_id) else {
                continue;
            };
            if !car.alive {
                continue;
            }
            let before = car.y.atan2(car.x);
            car.heading += command.steering.clamp(-1.0, 1.0) * MAX_TURN;
            let speed = command.acceleration.clamp(0.0, 1.0) * MAX_SPEED;
            car.x += speed * car.heading.cos();
            car.y += speed * car.heading.sin();

            let r = car.radius();
            if !(INNER_RADIUS..=OUTER_RADIUS).contains(&r) {
                car.alive = false;
                continue;
            }
            let after = car.y.atan2(car.x);
            car.progress += wrap_angle(after - before) * (INNER_RADIUS + OUTER_RADIUS) / 2.0;
            car.steps_alive += 1;
        }
    }

    #[must_use]
    pub fn fitness(&self) -> Vec<FitnessScore> {
        self.cars
            .iter()
            .enumerate()
            .map(|(agent_id, car)| FitnessScore {
                agent_id,
                fitness: car.progress + car.steps_alive as f32 * SURVIVAL_BONUS,
            })
            .collect()
    }
}

/// Wraps an angle difference into `(-PI, PI]`.
fn wrap_angle(mut delta: f32) -> f32 {
    while delta > PI {
        delta -= TAU;
    }
    while delta <= -PI {
        delta += TAU;
    }
    delta
}

/// Distance along the unit ray `(dx, dy)` from `(x, y)` to the nearest wall,
/// capped at [`RAY_LENGTH`].
fn wall_distance(x: f32, y: f32, dx: f32, dy: f32) -> f32 {
    [INNER_RADIUS, OUTER_RADIUS]
        .iter()
        .filter_map(|&r| circle_hit(x, y, dx, dy, r))
        .fold(RAY_LENGTH, f32::min)
}

/// Nearest positive `t` with `|p + t d| = r`.
fn circle_hit(x: f32, y: f32, dx: f32, dy: f32, r: f32) -> Option<f32> {
    let b = x * dx + y * dy;
    let c = x * x + y * y - r * r;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    [-b - root, -b + root].into_iter().find(|&t| t > 0.0)
}
