use particle_engine::interop::{Interop, Owner};

#[test]
fn ownership_alternates_strictly_between_graphics_and_compute() {
    let mut shared = Interop::register("particle positions");
    assert_eq!(shared.owner(), Owner::Graphics);

    for _ in 0..5 {
        let access = shared.begin_compute_access();
        assert_eq!(shared.owner(), Owner::Compute);
        assert_eq!(*shared.compute_view(&access), "particle positions");
        shared.end_compute_access(access);
        assert_eq!(shared.owner(), Owner::Graphics);
        assert_eq!(*shared.graphics_view(), "particle positions");
    }
}

#[test]
#[should_panic(expected = "protocol violation")]
fn two_begins_without_an_end_are_rejected() {
    let mut shared = Interop::register(());
    let _first = shared.begin_compute_access();
    let _second = shared.begin_compute_access();
}

#[test]
#[should_panic(expected = "protocol violation")]
fn graphics_view_is_rejected_while_compute_owns_the_buffer() {
    let mut shared = Interop::register(());
    let _access = shared.begin_compute_access();
    let _ = shared.graphics_view();
}
