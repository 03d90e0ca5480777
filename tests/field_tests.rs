//! Integration tests for the particle field.
//!
//! These drive a field through the public API the way a host would:
//! resize and pointer events between ticks, drawing to a surface.

use plexus::prelude::*;
use plexus::{DrawCommand, LinkStrategy};

fn seeded(count: usize, seed: u64) -> FieldConfig {
    FieldConfig {
        particle_count: count,
        seed: Some(seed),
        ..FieldConfig::default()
    }
}

fn in_bounds(field: &Field) -> bool {
    let (width, height) = field.size();
    field
        .particles()
        .iter()
        .all(|p| (0.0..=width).contains(&p.position.x) && (0.0..=height).contains(&p.position.y))
}

// ============================================================================
// Motion
// ============================================================================

#[test]
fn test_particles_stay_in_bounds_over_long_runs() {
    let mut field = Field::with_config(640.0, 480.0, seeded(200, 11));
    let mut list = DrawList::new();

    for tick in 0..1000 {
        // Sweep the pointer around so attraction keeps kicking particles
        let t = tick as f32 * 0.05;
        field.handle(HostEvent::PointerMove {
            x: 320.0 + 250.0 * t.cos(),
            y: 240.0 + 200.0 * t.sin(),
        });
        list.reset();
        field.tick(&mut list);
        assert!(in_bounds(&field), "escaped bounds at tick {}", tick);
    }
}

#[test]
fn test_shrinking_resize_mid_run() {
    let mut field = Field::with_config(1000.0, 800.0, seeded(100, 3));
    let mut list = DrawList::new();

    for _ in 0..50 {
        field.tick(&mut list);
    }
    field.handle(HostEvent::Resize {
        width: 200.0,
        height: 150.0,
    });
    field.tick(&mut list);

    assert_eq!(field.size(), (200.0, 150.0));
    assert!(in_bounds(&field));
}

#[test]
fn test_zero_sized_surface() {
    let mut field = Field::with_config(0.0, 0.0, seeded(10, 5));
    let mut canvas = Canvas::new(0, 0);
    for _ in 0..10 {
        field.tick(&mut canvas);
    }
    assert!(field.particles().iter().all(|p| p.position == Vec2::ZERO));
}

#[test]
fn test_population_is_fixed() {
    let mut field = Field::with_config(300.0, 300.0, seeded(37, 1));
    let mut list = DrawList::new();
    for _ in 0..100 {
        list.reset();
        field.tick(&mut list);
    }
    assert_eq!(field.particles().len(), 37);
}

#[test]
fn test_pointer_pulls_only_nearby_particles() {
    let mut field = Field::with_config(400.0, 400.0, seeded(60, 21));
    let pointer = Vec2::new(200.0, 200.0);
    field.on_pointer_move(pointer.x, pointer.y);

    // Zero motion isolates the pull
    for p in field.particles_mut() {
        p.velocity = Vec2::ZERO;
    }
    let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();

    // First tick only builds velocity, second one moves
    let mut list = DrawList::new();
    field.tick(&mut list);
    field.tick(&mut list);

    for (start, p) in before.iter().zip(field.particles()) {
        let d0 = start.distance(pointer);
        let d1 = p.position.distance(pointer);
        if d0 >= 100.0 {
            assert_eq!(p.position, *start);
        } else if d0 > 1.0 && d0 < 90.0 {
            assert!(d1 < d0, "particle at {} did not move closer", d0);
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_frame_structure() {
    let field = Field::with_config(500.0, 500.0, seeded(40, 8));
    let mut list = DrawList::new();
    field.render(&mut list);

    let commands = list.commands();
    assert_eq!(commands[0], DrawCommand::Clear);
    assert_eq!(list.circles().count(), 40);
    assert_eq!(list.lines().count(), field.links().len());

    // Every disc precedes every line
    let first_line = commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Line { .. }))
        .unwrap_or(commands.len());
    assert!(commands[first_line..]
        .iter()
        .all(|c| matches!(c, DrawCommand::Line { .. })));
}

#[test]
fn test_link_alphas_are_faint() {
    let field = Field::with_config(300.0, 300.0, seeded(80, 13));
    for link in field.links() {
        assert!(link.distance < 100.0);
        assert!(link.alpha > 0.0 && link.alpha <= 0.2);
    }
}

#[test]
fn test_link_strategies_agree_while_running() {
    let base = seeded(150, 99);
    let mut all = Field::with_config(800.0, 600.0, base.clone());
    let mut grid = Field::with_config(
        800.0,
        600.0,
        FieldConfig {
            link_strategy: LinkStrategy::Grid,
            ..base
        },
    );

    all.on_pointer_move(400.0, 300.0);
    grid.on_pointer_move(400.0, 300.0);

    let mut a = DrawList::new();
    let mut b = DrawList::new();
    for _ in 0..20 {
        a.reset();
        b.reset();
        all.tick(&mut a);
        grid.tick(&mut b);
        assert_eq!(a.commands(), b.commands());
    }
}

#[test]
fn test_canvas_snapshot_has_content() {
    let (field, canvas) = Simulation::new()
        .with_seed(42)
        .with_window_size(320, 240)
        .run_headless(60)
        .unwrap();

    let painted = canvas.as_raw().chunks(4).filter(|px| px[3] > 0).count();
    assert!(painted > 0);
    assert!(in_bounds(&field));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_json_config_drives_headless_run() {
    let json = r#"{
        "field": { "particle_count": 12, "seed": 4, "link_strategy": "grid" },
        "window": { "width": 64, "height": 48 }
    }"#;
    let config = Config::from_json(json).unwrap();
    let (field, canvas) = Simulation::new().with_config(config).run_headless(5).unwrap();

    assert_eq!(field.particles().len(), 12);
    assert_eq!(field.config().link_strategy, LinkStrategy::Grid);
    assert_eq!((canvas.width(), canvas.height()), (64, 48));
}

#[test]
fn test_invalid_json_config() {
    let result = Config::from_json(r#"{ "field": { "link_distance": -1 } }"#);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let result = Config::from_json("{ not json");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
