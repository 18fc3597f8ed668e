pub mod particle_store;
pub mod physics_kernel;
pub mod particle_drawer;
