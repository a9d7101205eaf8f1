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
//! Integration tests for the impulse solver
//!
//! These drive the constraint phases directly where a test needs to observe
//! per-tick behavior, and go through `World` for end-to-end resolution.

use physics2d::collision::is_colliding;
use physics2d::prelude::*;

const DT: f64 = 1.0 / 60.0;

#[test]
fn test_static_body_ignores_impulses() {
    let mut body = RigidBody::new(Shape::boxed(50.0, 50.0), Vec2::new(10.0, 20.0), 0.0);
    assert!(body.is_static());
    assert_eq!(body.inv_mass(), 0.0);
    assert_eq!(body.inv_inertia(), 0.0);

    for magnitude in [1.0, 1e6, 1e12] {
        body.apply_impulse_linear(Vec2::new(magnitude, -magnitude));
        body.apply_impulse_angular(magnitude);
        body.apply_impulse_at_point(Vec2::new(magnitude, magnitude), Vec2::new(25.0, 0.0));
    }

    assert_eq!(body.velocity(), Vec2::ZERO);
    assert_eq!(body.angular_velocity(), 0.0);

    body.add_force(Vec2::new(1000.0, 0.0));
    body.integrate_forces(DT);
    body.integrate_velocities(DT);
    assert_eq!(body.position(), Vec2::new(10.0, 20.0));
}

#[test]
fn test_static_body_unmoved_by_collision() {
    let mut world = World::default();
    let floor = world.add_body(RigidBody::new(Shape::boxed(200.0, 20.0), Vec2::new(0.0, 100.0), 0.0));
    world.add_body(
        RigidBody::new(Shape::circle(10.0), Vec2::new(0.0, 75.0), 5.0).with_velocity(Vec2::new(0.0, 500.0)),
    );

    for _ in 0..60 {
        world.update(DT);
    }

    let floor = world.body(floor).unwrap();
    assert_eq!(floor.position(), Vec2::new(0.0, 100.0));
    assert_eq!(floor.velocity(), Vec2::ZERO);
    assert_eq!(floor.rotation(), 0.0);
}

#[test]
fn test_joint_converges_monotonically() {
    let mut a = RigidBody::new(Shape::circle(1.0), Vec2::new(0.0, 0.0), 1.0);
    let mut b = RigidBody::new(Shape::circle(1.0), Vec2::new(5.0, 0.0), 1.0);
    let mut joint = JointConstraint::with_local_anchors(
        BodyHandle::new(0, 0),
        Vec2::ZERO,
        BodyHandle::new(1, 0),
        Vec2::ZERO,
    );
    let config = SolverConfig::default();

    let separation = |joint: &JointConstraint, a: &RigidBody, b: &RigidBody| {
        let (pa, pb) = joint.anchor_world_points(a, b);
        (pb - pa).magnitude()
    };

    let mut previous = separation(&joint, &a, &b);
    assert!((previous - 5.0).abs() < 1e-12);

    for tick in 0..2000 {
        joint.pre_solve(&mut a, &mut b, DT, &config);
        for _ in 0..config.iterations {
            joint.solve(&mut a, &mut b);
        }
        joint.post_solve(&config);
        a.integrate_velocities(DT);
        b.integrate_velocities(DT);

        let current = separation(&joint, &a, &b);
        assert!(
            current <= previous + 1e-9,
            "separation grew at tick {}: {} -> {}",
            tick,
            previous,
            current
        );
        previous = current;
    }

    // Slack of 0.01 on the squared distance leaves about 0.1 units
    assert!(previous < 0.11, "anchors still {} apart", previous);
    assert!(joint.cached_lambda().abs() <= config.joint_lambda_limit);
}

#[test]
fn test_joint_conserves_momentum() {
    let mut a = RigidBody::new(Shape::circle(1.0), Vec2::new(0.0, 0.0), 2.0);
    let mut b = RigidBody::new(Shape::circle(1.0), Vec2::new(8.0, 3.0), 1.0);
    let mut joint = JointConstraint::with_local_anchors(
        BodyHandle::new(0, 0),
        Vec2::ZERO,
        BodyHandle::new(1, 0),
        Vec2::ZERO,
    );
    let config = SolverConfig::default();

    for _ in 0..100 {
        joint.pre_solve(&mut a, &mut b, DT, &config);
        for _ in 0..config.iterations {
            joint.solve(&mut a, &mut b);
        }
        joint.post_solve(&config);
        a.integrate_velocities(DT);
        b.integrate_velocities(DT);
    }

    // Equal and opposite impulses: total momentum stays zero
    let momentum = a.velocity() * a.mass() + b.velocity() * b.mass();
    assert!(momentum.magnitude() < 1e-6);
}

#[test]
fn test_elastic_head_on_collision() {
    let config = WorldConfig::default()
        .with_gravity(0.0)
        .with_solver(SolverConfig::default().with_restitution_bias());
    let mut world = World::new(config);

    let speed = 50.0;
    let a = world.add_body(
        RigidBody::new(Shape::circle(10.0), Vec2::new(0.0, 0.0), 1.0)
            .with_velocity(Vec2::new(speed, 0.0))
            .with_restitution(1.0)
            .with_friction(0.0),
    );
    let b = world.add_body(
        RigidBody::new(Shape::circle(10.0), Vec2::new(19.995, 0.0), 1.0)
            .with_velocity(Vec2::new(-speed, 0.0))
            .with_restitution(1.0)
            .with_friction(0.0),
    );

    let normal = Vec2::new(1.0, 0.0);
    let relative_before = (world.body(b).unwrap().velocity() - world.body(a).unwrap().velocity()).dot(normal);

    world.update(DT);
    assert_eq!(world.contacts().len(), 1);

    let va = world.body(a).unwrap().velocity();
    let vb = world.body(b).unwrap().velocity();
    let relative_after = (vb - va).dot(normal);

    assert!(relative_before < 0.0);
    assert!((relative_after + relative_before).abs() < 1e-6);
    assert!((va.x + speed).abs() < 1e-6);
    assert!((vb.x - speed).abs() < 1e-6);
}

#[test]
fn test_inelastic_without_restitution_bias() {
    let mut world = World::new(WorldConfig::default().with_gravity(0.0));
    let a = world.add_body(
        RigidBody::new(Shape::circle(10.0), Vec2::new(0.0, 0.0), 1.0)
            .with_velocity(Vec2::new(50.0, 0.0))
            .with_friction(0.0),
    );
    let b = world.add_body(
        RigidBody::new(Shape::circle(10.0), Vec2::new(19.995, 0.0), 1.0)
            .with_velocity(Vec2::new(-50.0, 0.0))
            .with_friction(0.0),
    );

    world.update(DT);

    // Closing velocity removed, nothing added back
    let va = world.body(a).unwrap().velocity();
    let vb = world.body(b).unwrap().velocity();
    assert!((vb.x - va.x).abs() < 1e-6);
    assert!((va.x + vb.x).abs() < 1e-6);
}

#[test]
fn test_friction_impulse_bounded_by_normal_impulse() {
    let mut ground = RigidBody::new(Shape::boxed(200.0, 20.0), Vec2::new(0.0, 0.0), 0.0);
    let mut block =
        RigidBody::new(Shape::boxed(20.0, 20.0), Vec2::new(0.0, -19.0), 1.0).with_velocity(Vec2::new(100.0, 30.0));

    let mut contacts = Vec::new();
    assert!(is_colliding(
        BodyHandle::new(0, 0),
        &ground,
        BodyHandle::new(1, 0),
        &block,
        &mut contacts
    ));

    let mut penetrations: Vec<_> = contacts
        .iter()
        .map(|contact| PenetrationConstraint::new(contact, &ground, &block))
        .collect();

    let config = SolverConfig::default();
    for penetration in &mut penetrations {
        penetration.pre_solve(&mut ground, &mut block, DT, &config);
    }

    for _ in 0..config.iterations {
        for penetration in &mut penetrations {
            penetration.solve(&mut ground, &mut block);

            let [normal, tangent] = penetration.cached_lambda();
            assert!(normal >= 0.0);
            assert!(tangent.abs() <= normal * penetration.friction() + 1e-9);
        }
    }

    assert!((penetrations[0].friction() - 0.7).abs() < 1e-12);
    assert!(penetrations.iter().any(|p| p.cached_lambda()[0] > 0.0));
    // Sliding slowed down and the block no longer moves into the ground
    assert!(block.velocity().x < 100.0);
    assert!(block.velocity().y < 30.0);
    assert_eq!(ground.velocity(), Vec2::ZERO);
}

#[test]
fn test_penetration_never_pulls_bodies_together() {
    // Overlapping but already separating fast
    let mut a = RigidBody::new(Shape::circle(10.0), Vec2::new(0.0, 0.0), 1.0).with_velocity(Vec2::new(-100.0, 0.0));
    let mut b = RigidBody::new(Shape::circle(10.0), Vec2::new(19.0, 0.0), 1.0).with_velocity(Vec2::new(100.0, 0.0));

    let mut contacts = Vec::new();
    assert!(is_colliding(BodyHandle::new(0, 0), &a, BodyHandle::new(1, 0), &b, &mut contacts));

    let mut penetration = PenetrationConstraint::new(&contacts[0], &a, &b);
    let config = SolverConfig::default();
    penetration.pre_solve(&mut a, &mut b, DT, &config);
    for _ in 0..config.iterations {
        penetration.solve(&mut a, &mut b);
    }
    penetration.post_solve(&config);

    assert_eq!(penetration.cached_lambda()[0], 0.0);
    assert_eq!(a.velocity(), Vec2::new(-100.0, 0.0));
    assert_eq!(b.velocity(), Vec2::new(100.0, 0.0));
}
