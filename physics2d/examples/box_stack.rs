// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Box stack example
//!
//! Drops a pyramid of boxes and a few balls onto a static floor and prints
//! the state of the scene as it settles.
//!
//! Usage:
//!   cargo run --example box_stack -- [--rows N] [--seconds S] [--iterations N] [--restitution] [--warm-start]

use physics2d::prelude::*;

const DT: f64 = 1.0 / 60.0;
const BOX_SIZE: f64 = 40.0;
const FLOOR_Y: f64 = 500.0;

struct DemoConfig {
    rows: usize,
    seconds: f64,
    iterations: usize,
    restitution: bool,
    warm_start: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            rows: 5,
            seconds: 5.0,
            iterations: 10,
            restitution: false,
            warm_start: false,
        }
    }
}

fn parse_args() -> DemoConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<usize>() {
                        Ok(rows) if rows > 0 => config.rows = rows,
                        _ => eprintln!("Warning: Invalid rows '{}', using default {}", args[i + 1], config.rows),
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --rows requires an argument");
                    std::process::exit(1);
                }
            }
            "--seconds" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<f64>() {
                        Ok(seconds) if seconds > 0.0 => config.seconds = seconds,
                        _ => eprintln!("Warning: Invalid seconds '{}', using default {}", args[i + 1], config.seconds),
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --seconds requires an argument");
                    std::process::exit(1);
                }
            }
            "--iterations" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<usize>() {
                        Ok(iterations) if iterations > 0 => config.iterations = iterations,
                        _ => eprintln!(
                            "Warning: Invalid iterations '{}', using default {}",
                            args[i + 1],
                            config.iterations
                        ),
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --iterations requires an argument");
                    std::process::exit(1);
                }
            }
            "--restitution" => {
                config.restitution = true;
                i += 1;
            }
            "--warm-start" => {
                config.warm_start = true;
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}

fn build_scene(world: &mut World, rows: usize) -> Vec<BodyHandle> {
    world.add_body(RigidBody::new(Shape::boxed(1200.0, 40.0), Vec2::new(0.0, FLOOR_Y + 20.0), 0.0));

    let mut boxes = Vec::new();
    for row in 0..rows {
        let count = rows - row;
        let y = FLOOR_Y - BOX_SIZE / 2.0 - row as f64 * (BOX_SIZE + 1.0);
        let left = -(count as f64 - 1.0) * (BOX_SIZE + 2.0) / 2.0;
        for column in 0..count {
            let x = left + column as f64 * (BOX_SIZE + 2.0);
            boxes.push(world.add_body(
                RigidBody::new(Shape::boxed(BOX_SIZE, BOX_SIZE), Vec2::new(x, y), 1.0).with_restitution(0.2),
            ));
        }
    }

    // A few balls thrown at the pyramid
    for i in 0..3 {
        let position = Vec2::new(-400.0 - 40.0 * i as f64, FLOOR_Y - 150.0 - 30.0 * i as f64);
        world.add_body(
            RigidBody::new(Shape::circle(12.0), position, 2.0)
                .with_velocity(Vec2::new(300.0, -100.0))
                .with_restitution(0.5),
        );
    }

    boxes
}

fn main() {
    println!("Physics 2D - Box Stack Example");
    println!("==============================\n");

    let config = parse_args();

    let mut solver = SolverConfig::default().with_iterations(config.iterations);
    if config.restitution {
        solver = solver.with_restitution_bias();
    }
    if config.warm_start {
        solver = solver.with_contact_warm_starting();
    }

    let mut world = match World::try_new(WorldConfig::default().with_solver(solver)) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let boxes = build_scene(&mut world, config.rows);

    println!("Configuration:");
    println!("  Rows: {} ({} boxes)", config.rows, boxes.len());
    println!("  Solver iterations: {}", config.iterations);
    println!("  Restitution bias: {}", config.restitution);
    println!("  Contact warm starting: {}", config.warm_start);
    println!("  Duration: {:.1} s at {:.0} Hz\n", config.seconds, 1.0 / DT);

    let ticks = (config.seconds / DT).round() as usize;
    let report_every = (0.5 / DT).round() as usize;

    for tick in 1..=ticks {
        world.update(DT);

        if tick % report_every == 0 {
            let colliding = world.bodies().filter(|(_, body)| body.is_colliding()).count();
            println!(
                "t = {:5.2} s  contacts: {:4}  colliding bodies: {:3}  kinetic energy: {:12.2}",
                tick as f64 * DT,
                world.contacts().len(),
                colliding,
                world.total_kinetic_energy()
            );
        }
    }

    println!("\nFinal box positions:");
    for handle in &boxes {
        if let Some(body) = world.body(*handle) {
            println!(
                "  {} at {}  rotation {:+.3} rad  speed {:.3}",
                handle,
                body.position(),
                body.rotation(),
                body.velocity().magnitude()
            );
        }
    }

    let top = boxes
        .iter()
        .filter_map(|handle| world.body(*handle))
        .map(|body| body.position().y)
        .fold(f64::MAX, f64::min);
    println!("\nHighest box center: y = {:.2} (floor top at y = {:.2})", top, FLOOR_Y);
}
