use particle_engine::force_field::POINTER_SOURCE;
use particle_engine::frame_controller::FrameController;
use particle_engine::interop::Owner;
use particle_engine::particles::particle_store::SeedPolicy;

mod common;

const DELTA_TIME: f32 = 0.016;

#[test]
fn force_input_perturbs_particle_state() {
    let Some(setup) = pollster::block_on(common::setup()) else {
        return;
    };
    let wgpu_context = &setup.wgpu_context;

    let mut controller = FrameController::new_headless(wgpu_context, 10, SeedPolicy::default())
        .expect("headless controller");

    let seed_positions = controller
        .store()
        .positions()
        .graphics_view()
        .download(wgpu_context)
        .unwrap();
    let seed_velocities = controller
        .store()
        .velocities()
        .download(wgpu_context)
        .unwrap();
    assert_eq!(seed_positions.len(), 10);

    controller
        .force_field_mut()
        .set_location(POINTER_SOURCE, 0.0, 0.0);
    controller.force_field_mut().set_power(POINTER_SOURCE, 1.0);

    controller.step_physics(wgpu_context, DELTA_TIME);

    let positions = controller
        .store()
        .positions()
        .graphics_view()
        .download(wgpu_context)
        .unwrap();
    let velocities = controller
        .store()
        .velocities()
        .download(wgpu_context)
        .unwrap();

    // The system must observably respond to force input.
    assert_ne!(seed_positions, positions);
    assert_ne!(seed_velocities, velocities);

    // The bracket is closed again after the step.
    assert_eq!(controller.store().positions().owner(), Owner::Graphics);
}

#[test]
fn unforced_particles_stay_at_rest() {
    let Some(setup) = pollster::block_on(common::setup()) else {
        return;
    };
    let wgpu_context = &setup.wgpu_context;

    let mut controller = FrameController::new_headless(wgpu_context, 10, SeedPolicy::default())
        .expect("headless controller");

    let seed_positions = controller
        .store()
        .positions()
        .graphics_view()
        .download(wgpu_context)
        .unwrap();

    // No source has power, velocities are seeded at zero: a dispatch must
    // carry the buffer through the bracket bit-identical.
    controller.step_physics(wgpu_context, DELTA_TIME);

    let positions = controller
        .store()
        .positions()
        .graphics_view()
        .download(wgpu_context)
        .unwrap();
    assert_eq!(seed_positions, positions);
}

#[test]
fn zero_particles_dispatch_as_a_noop() {
    let Some(setup) = pollster::block_on(common::setup()) else {
        return;
    };
    let wgpu_context = &setup.wgpu_context;

    let mut controller = FrameController::new_headless(wgpu_context, 0, SeedPolicy::default())
        .expect("headless controller");

    controller.step_physics(wgpu_context, DELTA_TIME);

    assert_eq!(controller.store().count(), 0);
    assert_eq!(controller.store().positions().owner(), Owner::Graphics);
}
