use nudge::{
    Body, BodyConfig, BodyId, ColliderId, ForceField, NoOpStepObserver, PhysicsError, PointerInput, Rect,
    ReleaseImpulse, StepObserver, Vec2, World, WorldConfig,
};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Counter {
    integrations: usize,
    collisions: Vec<(ColliderId, ColliderId)>,
    grabs: Vec<BodyId>,
    releases: Vec<BodyId>,
    steps: usize,
}

impl StepObserver for Counter {
    fn on_integrate(&mut self, _sub_step: usize) { self.integrations += 1; }
    fn on_collision(&mut self, subject: ColliderId, target: ColliderId) { self.collisions.push((subject, target)); }
    fn on_grab(&mut self, body: BodyId) { self.grabs.push(body); }
    fn on_release(&mut self, body: BodyId) { self.releases.push(body); }
    fn on_step_complete(&mut self) { self.steps += 1; }
}

fn bird_config() -> BodyConfig<f32> {
    BodyConfig::new()
        .with_max_speed(15.0)
        .with_damping(Vec2::new(1.0, 0.9))
        .with_radius(16.0)
}

#[test]
fn bird_lands_on_ground_listener() {
    let mut world = World::new(WorldConfig::new().with_gravity(Vec2::new(0.0, 1.0)));
    let bird = world.add_body(Body::new(Vec2::new(250.0, 175.0), 1.0).with_config(bird_config()));
    let ground = world.add_body(Body::anchored(Vec2::new(250.0, 700.0)));
    let bird_box = world.add_collider(bird, 32.0, 32.0).unwrap();
    let ground_box = world.add_collider(ground, 500.0, 2.0).unwrap();

    let landed = Rc::new(Cell::new(false));
    let flag = landed.clone();
    world.colliders_mut().subscribe(bird_box, ground_box, move || flag.set(true)).unwrap();

    let mut observer = Counter::default();
    let mut steps = 0;
    while !landed.get() && steps < 500 {
        world.step(&PointerInput::default(), &mut observer);
        steps += 1;
    }

    assert!(landed.get(), "bird never reached the ground");
    assert_eq!(observer.collisions.last(), Some(&(bird_box, ground_box)));
    assert_eq!(observer.steps, steps);
    assert_eq!(world.body(ground).position, Vec2::new(250.0, 700.0));
    assert!(world.body(bird).speed() <= 15.0 + 1e-4);
}

fn pipe(x: f32, y: f32, speed: f32) -> Body<f32> {
    Body::new(Vec2::new(x, y), 1.0)
        .with_config(BodyConfig::new().with_gravity_scale(0.0))
        .with_velocity(Vec2::new(-speed, 0.0))
}

#[test]
fn scoring_listener_removed_after_first_hit() {
    let mut world = World::new(WorldConfig::new().with_gravity(Vec2::new(0.0, 0.1)));
    let bird = world.add_body(Body::new(Vec2::new(250.0, 300.0), 1.0).with_config(bird_config()));
    let gap = world.add_body(pipe(400.0, 300.0, 2.0));
    let bird_box = world.add_collider(bird, 32.0, 32.0).unwrap();
    let gap_box = world.add_collider(gap, 50.0, 150.0).unwrap();

    let score = Rc::new(Cell::new(0));
    let s = score.clone();
    world.colliders_mut().subscribe(bird_box, gap_box, move || s.set(s.get() + 1)).unwrap();

    for _ in 0..200 {
        let hits = world.step(&PointerInput::default(), &mut NoOpStepObserver);
        for (subject, target) in hits {
            if target == gap_box {
                world.colliders_mut().unsubscribe(subject, target);
            }
        }
    }

    assert_eq!(score.get(), 1);
    assert!(!world.colliders().is_subscribed(bird_box, gap_box));
    assert_eq!(world.body(gap).position, Vec2::new(0.0, 300.0));
    assert!(world.body(bird).position.y > 300.0, "bird ignored gravity");
}

#[test]
fn offscreen_pipes_are_removed_and_slots_reused() {
    let mut world: World<f32> = World::default();
    let bird = world.add_body(Body::new(Vec2::new(250.0, 300.0), 1.0).with_config(bird_config()));
    let bird_box = world.add_collider(bird, 32.0, 32.0).unwrap();

    let passes = Rc::new(Cell::new(0));
    for _ in 0..50 {
        let id = world.add_body(pipe(600.0, 300.0, 20.0));
        let pipe_box = world.add_collider(id, 50.0, 150.0).unwrap();
        let p = passes.clone();
        world.colliders_mut().subscribe(bird_box, pipe_box, move || p.set(p.get() + 1)).unwrap();
        assert_eq!(id.index(), 1);
        assert_eq!(pipe_box.index(), 1);

        while world.body(id).position.x >= -50.0 {
            world.step(&PointerInput::default(), &mut NoOpStepObserver);
        }
        world.remove_body(id).unwrap();
        assert_eq!(world.try_body(id).err(), Some(PhysicsError::BodyRemoved { index: 1 }));
    }

    assert_eq!(passes.get(), 4 * 50);
    assert_eq!(world.body_count(), 1);
    assert_eq!(world.bodies().len(), 2);
    assert_eq!(world.colliders().collider_count(), 1);
    assert_eq!(world.colliders().subscription_count(), 0);
    assert_eq!(world.live_bodies().map(|(id, _)| id).collect::<Vec<_>>(), vec![bird]);
}

#[test]
fn removing_held_body_ends_drag_and_drops_springs() {
    let mut world: World<f32> = World::default();
    let hook = world.add_body(Body::anchored(Vec2::new(0.0, 0.0)));
    let bob = world.add_body(
        Body::new(Vec2::new(50.0, 0.0), 1.0).with_config(BodyConfig::new().with_capture_radius(10.0)),
    );
    world.connect(hook, bob, 40.0, 0.1).unwrap();
    world.add_collider(bob, 4.0, 4.0).unwrap();

    world.step(&PointerInput::pressed(Vec2::new(50.0, 0.0)), &mut NoOpStepObserver);
    assert_eq!(world.drag().dragged_body(), Some(bob));

    let removed = world.remove_body(bob).unwrap();
    assert!((removed.position.x - 49.0).abs() < 1e-4, "spring pull before the grab: {:?}", removed.position);
    assert!(!world.drag().is_dragging());
    assert_eq!(world.spring_count(), 0);
    assert_eq!(world.colliders().collider_count(), 0);
    assert!(!world.is_live(bob));
    assert_eq!(world.remove_body(bob).err(), Some(PhysicsError::BodyRemoved { index: 1 }));

    world.step(&PointerInput::pressed(Vec2::new(50.0, 0.0)), &mut NoOpStepObserver);
    assert!(!world.drag().is_dragging(), "vacant slot was grabbed");
    assert_eq!(world.connect(hook, bob, 1.0, 0.1).err(), Some(PhysicsError::BodyRemoved { index: 1 }));
}

#[test]
fn water_slows_falling_bodies() {
    let config = WorldConfig::new().with_gravity(Vec2::new(0.0, 0.2));
    let mut dry = World::new(config);
    let mut wet = World::new(config);
    wet.add_field(ForceField::new(Rect::new(0.0, 0.0, 800.0, 800.0).unwrap(), 0.1).unwrap());

    let a = dry.add_body(Body::new(Vec2::new(100.0, 10.0), 2.0));
    let b = wet.add_body(Body::new(Vec2::new(100.0, 10.0), 2.0));
    for _ in 0..60 {
        dry.step(&PointerInput::default(), &mut NoOpStepObserver);
        wet.step(&PointerInput::default(), &mut NoOpStepObserver);
    }

    assert!(wet.body(b).velocity.y > 0.0);
    assert!(wet.body(b).velocity.y < dry.body(a).velocity.y);
    assert!(wet.body(b).velocity.y < 2.1, "terminal speed exceeded: {}", wet.body(b).velocity.y);
}

#[test]
fn held_body_ignores_gravity_until_flicked() {
    let config = WorldConfig::new()
        .with_gravity(Vec2::new(0.0, 0.2))
        .with_release(ReleaseImpulse::Preserve);
    let mut world = World::new(config);
    let body = world.add_body(
        Body::new(Vec2::new(100.0, 100.0), 1.0).with_config(BodyConfig::new().with_radius(24.0).draggable()),
    );
    let mut observer = Counter::default();

    world.step(&PointerInput::pressed(Vec2::new(100.0, 100.2)), &mut observer);
    assert_eq!(observer.grabs, vec![body]);
    let held_at = world.body(body).position;

    for i in 1..=5 {
        world.step(&PointerInput::pressed(Vec2::new(100.0 + 4.0 * i as f32, 100.2)), &mut observer);
    }
    assert_eq!(world.body(body).position.y, held_at.y);
    assert!(world.drag().is_dragging());

    world.step(&PointerInput::released(Vec2::new(120.0, 100.2)), &mut observer);
    assert_eq!(observer.releases, vec![body]);
    assert!(!world.drag().is_dragging());

    let x_before = world.body(body).position.x;
    world.step(&PointerInput::released(Vec2::new(120.0, 100.2)), &mut observer);
    assert!(world.body(body).position.x > x_before, "release flick had no effect");
}

#[test]
fn sub_steps_run_integration_repeatedly() {
    let mut world: World<f64> = World::new(WorldConfig::new().with_sub_steps(8));
    world.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0));
    let mut observer = Counter::default();
    world.step(&PointerInput::default(), &mut observer);
    assert_eq!(observer.integrations, 8);
    assert_eq!(observer.steps, 1);
}

#[test]
fn bodies_stay_inside_walls() {
    let bounds = Rect::from_size(200.0f32, 200.0).unwrap();
    let mut world = World::new(
        WorldConfig::new()
            .with_gravity(Vec2::new(0.3, 0.5))
            .with_bounds(bounds)
            .with_floor_friction(0.01),
    );
    for i in 0..5 {
        let body = Body::new(Vec2::new(20.0 + 30.0 * i as f32, 50.0), 1.0)
            .with_config(BodyConfig::new().with_radius(8.0))
            .with_velocity(Vec2::new(-3.0 + i as f32, 2.0));
        world.add_body(body);
    }
    for _ in 0..500 {
        world.step(&PointerInput::default(), &mut NoOpStepObserver);
        for body in world.bodies() {
            assert!(body.position.x >= 8.0 && body.position.x <= 192.0);
            assert!(body.position.y >= 8.0 && body.position.y <= 192.0);
        }
    }
}

#[test]
fn handles_are_validated() {
    let mut world: World<f32> = World::default();
    let a = world.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0));
    let ghost = BodyId::from_index(3);

    assert_eq!(world.connect(a, ghost, 1.0, 0.1).err(), Some(PhysicsError::BodyOutOfBounds { index: 3, count: 1 }));
    assert!(world.add_collider(ghost, 1.0, 1.0).is_err());
    assert!(world.try_body(a).is_ok());
    assert_eq!(world.spring_count(), 0);
}

#[test]
fn cancel_drag_through_world() {
    let mut world: World<f32> = World::default();
    let body = world.add_body(
        Body::new(Vec2::new(10.0, 10.0), 1.0).with_config(BodyConfig::new().with_capture_radius(5.0)),
    );
    world.step(&PointerInput::pressed(Vec2::new(10.0, 10.0)), &mut NoOpStepObserver);
    assert_eq!(world.drag().dragged_body(), Some(body));
    assert_eq!(world.cancel_drag(), Some(body));
    assert!(!world.body(body).is_held());
}
