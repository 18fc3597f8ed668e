use glam::Vec2;
use particle_engine::force_field::{ForceField, MAX_FORCE_SOURCES, POINTER_SOURCE};

#[test]
fn pixel_to_device_mapping_hits_the_fixed_points() {
    let field = ForceField::new(800.0, 600.0);

    assert_eq!(field.map_to_device(400.0, 300.0), Vec2::new(0.0, 0.0));
    assert_eq!(field.map_to_device(0.0, 0.0), Vec2::new(-1.0, 1.0));
    assert_eq!(field.map_to_device(800.0, 600.0), Vec2::new(1.0, -1.0));
}

#[test]
fn pointer_move_stores_the_mapped_location() {
    let mut field = ForceField::new(800.0, 600.0);
    field.on_pointer_move(400.0, 300.0);
    assert_eq!(field.location(POINTER_SOURCE), Vec2::ZERO);

    field.on_pointer_move(800.0, 0.0);
    assert_eq!(field.location(POINTER_SOURCE), Vec2::new(1.0, 1.0));
}

#[test]
fn reshape_changes_the_mapping_but_not_stored_locations() {
    let mut field = ForceField::new(800.0, 600.0);
    field.on_pointer_move(400.0, 300.0);
    let before = field.location(POINTER_SOURCE);

    field.reshape(1600.0, 1200.0);
    // Stored locations are not remapped retroactively.
    assert_eq!(field.location(POINTER_SOURCE), before);
    // The next event uses the new denominators.
    field.on_pointer_move(800.0, 600.0);
    assert_eq!(field.location(POINTER_SOURCE), Vec2::ZERO);
}

#[test]
fn power_follows_the_button_state() {
    let mut field = ForceField::new(800.0, 600.0);
    assert_eq!(field.power(POINTER_SOURCE), 0.0);

    field.on_pointer_button(true);
    assert!(field.power(POINTER_SOURCE) > 0.0);

    field.on_pointer_button(false);
    assert_eq!(field.power(POINTER_SOURCE), 0.0);
}

#[test]
fn snapshot_freezes_the_field_state() {
    let mut field = ForceField::new(800.0, 600.0);
    field.set_location(1, 0.25, -0.5);
    field.set_power(1, -2.0);

    let params = field.snapshot(10, 0.016);
    assert_eq!(params.num_particles, 10);
    assert_eq!(params.num_sources, MAX_FORCE_SOURCES as u32);
    assert_eq!(params.delta_time, 0.016);
    assert_eq!(params.sources[1].location, [0.25, -0.5]);
    assert_eq!(params.sources[1].power, -2.0);

    // Later mutations do not reach an already-taken snapshot.
    field.set_power(1, 7.0);
    assert_eq!(params.sources[1].power, -2.0);
}
