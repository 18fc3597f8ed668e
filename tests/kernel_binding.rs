use particle_engine::particles::physics_kernel::{
    PhysicsKernel, SlotTable, KERNEL_SLOTS, SLOT_FORCE_FIELD, SLOT_MASSES, SLOT_POSITIONS,
    SLOT_VELOCITIES,
};

#[test]
fn rebinding_one_slot_leaves_the_others_untouched() {
    let mut slots: SlotTable<&str> = SlotTable::new(KERNEL_SLOTS);
    slots.bind(SLOT_POSITIONS, "positions");
    slots.bind(SLOT_VELOCITIES, "velocities");
    slots.bind(SLOT_FORCE_FIELD, "field");
    slots.bind(SLOT_MASSES, "masses");
    assert!(slots.is_complete());
    slots.clear_dirty();

    slots.bind(SLOT_FORCE_FIELD, "field v2");

    assert_eq!(slots.get(SLOT_POSITIONS), Some(&"positions"));
    assert_eq!(slots.get(SLOT_VELOCITIES), Some(&"velocities"));
    assert_eq!(slots.get(SLOT_FORCE_FIELD), Some(&"field v2"));
    assert_eq!(slots.get(SLOT_MASSES), Some(&"masses"));
    assert!(slots.dirty());
}

#[test]
fn incomplete_slot_tables_are_detected() {
    let mut slots: SlotTable<u32> = SlotTable::new(KERNEL_SLOTS);
    assert!(!slots.is_complete());
    slots.bind(SLOT_POSITIONS, 1);
    slots.bind(SLOT_VELOCITIES, 2);
    slots.bind(SLOT_MASSES, 3);
    assert!(!slots.is_complete());
    slots.bind(SLOT_FORCE_FIELD, 4);
    assert!(slots.is_complete());
}

#[test]
#[should_panic(expected = "out of range")]
fn binding_past_the_last_slot_is_rejected() {
    let mut slots: SlotTable<u32> = SlotTable::new(KERNEL_SLOTS);
    slots.bind(KERNEL_SLOTS, 9);
}

#[test]
fn dispatch_covers_exactly_the_particle_range() {
    // One invocation per index in [0, count): enough workgroups to reach
    // count - 1, never a full workgroup past it. The kernel guards the tail.
    const WORKGROUP_SIZE: u32 = 64;

    assert_eq!(PhysicsKernel::workgroups_for(0), 0);

    for count in [1u32, 63, 64, 65, 1000, 1_000_000] {
        let groups = PhysicsKernel::workgroups_for(count);
        assert!(groups * WORKGROUP_SIZE >= count);
        assert!((groups - 1) * WORKGROUP_SIZE < count);
    }
}
