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
//! Pendulum chain example
//!
//! Hangs a chain of boxes from a static pivot with joint constraints,
//! releases it horizontally and tracks the chain length and energy.
//!
//! Usage:
//!   cargo run --example pendulum_chain -- [--links N] [--seconds S] [--drag K]

use physics2d::prelude::*;

const DT: f64 = 1.0 / 60.0;
const LINK_LENGTH: f64 = 30.0;

fn main() {
    println!("Physics 2D - Pendulum Chain Example");
    println!("===================================\n");

    let args: Vec<String> = std::env::args().collect();
    let mut links = 8usize;
    let mut seconds = 4.0;
    let mut drag = 0.0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--links" | "--seconds" | "--drag" if i + 1 >= args.len() => {
                eprintln!("Error: {} requires an argument", args[i]);
                std::process::exit(1);
            }
            "--links" => {
                match args[i + 1].parse::<usize>() {
                    Ok(value) if value > 0 => links = value,
                    _ => eprintln!("Warning: Invalid links '{}', using default {}", args[i + 1], links),
                }
                i += 2;
            }
            "--seconds" => {
                match args[i + 1].parse::<f64>() {
                    Ok(value) if value > 0.0 => seconds = value,
                    _ => eprintln!("Warning: Invalid seconds '{}', using default {}", args[i + 1], seconds),
                }
                i += 2;
            }
            "--drag" => {
                match args[i + 1].parse::<f64>() {
                    Ok(value) if value >= 0.0 => drag = value,
                    _ => eprintln!("Warning: Invalid drag '{}', using default {}", args[i + 1], drag),
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let mut world = World::default();
    if drag > 0.0 {
        world.add_force_provider(Box::new(DragForce::new(drag)));
    }

    let pivot = world.add_body(RigidBody::new(Shape::circle(4.0), Vec2::ZERO, 0.0));

    // Links are boxes laid out to the right and joined end to end
    let mut chain = vec![pivot];
    let mut previous = pivot;
    for link in 0..links {
        let center = Vec2::new((link as f64 + 0.5) * LINK_LENGTH, 0.0);
        let handle = world.add_body(RigidBody::new(Shape::boxed(LINK_LENGTH - 8.0, 6.0), center, 1.0));
        let anchor = Vec2::new(link as f64 * LINK_LENGTH, 0.0);

        if let Err(err) = world.add_joint(previous, handle, anchor) {
            eprintln!("Error: could not join link {}: {}", link, err);
            std::process::exit(1);
        }
        chain.push(handle);
        previous = handle;
    }

    println!("Configuration:");
    println!("  Links: {} ({} joints)", links, world.constraint_count());
    println!("  Link length: {:.1} px", LINK_LENGTH);
    println!("  Drag: {}", drag);
    println!("  Duration: {:.1} s\n", seconds);

    let ticks = (seconds / DT).round() as usize;
    let report_every = (0.25 / DT).round() as usize;
    let mut worst_stretch = 0.0_f64;

    for tick in 1..=ticks {
        world.update(DT);

        // Gap between each joint's two anchor points
        for (_, constraint) in world.constraints() {
            let Some(joint) = constraint.as_any().downcast_ref::<JointConstraint>() else {
                continue;
            };
            let (a, b) = joint.bodies();
            if let (Some(body_a), Some(body_b)) = (world.body(a), world.body(b)) {
                let (pa, pb) = joint.anchor_world_points(body_a, body_b);
                worst_stretch = worst_stretch.max((pb - pa).magnitude());
            }
        }

        if tick % report_every == 0 {
            let tip = chain
                .last()
                .and_then(|handle| world.body(*handle))
                .map(|body| body.position())
                .unwrap_or(Vec2::ZERO);
            println!(
                "t = {:5.2} s  tip: {}  tip distance: {:7.2}  kinetic energy: {:12.2}",
                tick as f64 * DT,
                tip,
                tip.magnitude(),
                world.total_kinetic_energy()
            );
        }
    }

    println!("\nLargest anchor separation seen: {:.4} px", worst_stretch);
    println!("Nominal chain length: {:.1} px", links as f64 * LINK_LENGTH);
}
