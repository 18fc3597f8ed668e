use glam::Vec2;
use particle_engine::particles::particle_store::{ParticleStore, SeedPolicy};

#[test]
fn seed_positions_lie_inside_the_configured_square() {
    let policy = SeedPolicy::default();
    let half = policy.spread / 2.0;

    for count in [1usize, 10, 1000] {
        let columns = ParticleStore::initialize(count, &policy);
        assert_eq!(columns.positions.len(), count);
        for pos in &columns.positions {
            assert!(pos.x.abs() <= half, "x = {} escapes the square", pos.x);
            assert!(pos.y.abs() <= half, "y = {} escapes the square", pos.y);
        }
    }
}

#[test]
fn seed_masses_lie_in_the_configured_range() {
    let policy = SeedPolicy::default();
    let columns = ParticleStore::initialize(1000, &policy);
    for mass in &columns.masses {
        assert!(
            (policy.mass_range.start..policy.mass_range.end).contains(mass),
            "mass {mass} outside {:?}",
            policy.mass_range
        );
    }
}

#[test]
fn seed_velocities_start_at_rest_and_colors_carry_the_tint() {
    let policy = SeedPolicy::default();
    let columns = ParticleStore::initialize(100, &policy);
    assert!(columns.velocities.iter().all(|v| *v == Vec2::ZERO));
    assert!(columns.colors.iter().all(|c| *c == policy.color));
}

#[test]
fn all_columns_are_index_aligned() {
    let columns = ParticleStore::initialize(77, &SeedPolicy::default());
    assert_eq!(columns.positions.len(), 77);
    assert_eq!(columns.colors.len(), 77);
    assert_eq!(columns.velocities.len(), 77);
    assert_eq!(columns.masses.len(), 77);
}

#[test]
fn zero_count_produces_empty_columns() {
    let columns = ParticleStore::initialize(0, &SeedPolicy::default());
    assert!(columns.positions.is_empty());
    assert!(columns.colors.is_empty());
    assert!(columns.velocities.is_empty());
    assert!(columns.masses.is_empty());
}
