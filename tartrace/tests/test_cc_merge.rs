use tartrace::cc_merge::merge_cc_entries;
use tartrace::entry_builder::EntryBuilder;
use tartrace::reg_resolver::{RegisterResolver, TarmacResolver};
use tartrace::regs::{RegClass, RegId, CCREG_C, CCREG_GE, CCREG_NZ, CCREG_V, MISCREG_CPSR};
use tartrace::snapshot::CommitSnapshot;
use tartrace::tarmac_context::{PcState, StaticInst};
use tartrace::trace_entry::RegEntry;

fn thread() -> CommitSnapshot {
    let mut snap = CommitSnapshot::new(42, PcState::default(), StaticInst::default());
    snap.set_reg(RegId::new(RegClass::Misc, MISCREG_CPSR), 0x10);
    snap.set_reg(RegId::new(RegClass::CondCode, CCREG_NZ), 0b10);
    snap.set_reg(RegId::new(RegClass::CondCode, CCREG_C), 0);
    snap.set_reg(RegId::new(RegClass::CondCode, CCREG_V), 1);
    snap.set_reg(RegId::new(RegClass::CondCode, CCREG_GE), 0xf);
    snap.set_reg(RegId::new(RegClass::Integer, 0), 1);
    snap.set_reg(RegId::new(RegClass::Integer, 1), 2);
    snap
}

fn resolved_queue(snap: &CommitSnapshot, builder: &EntryBuilder, regs: &[RegId]) -> Vec<RegEntry> {
    regs.iter()
        .map(|reg| {
            let mut entry = builder.reg_entry(*reg);
            TarmacResolver.resolve(&mut entry, snap).unwrap();
            entry
        })
        .collect()
}

fn names(queue: &[RegEntry]) -> Vec<&str> {
    queue.iter().map(|reg| reg.name.as_str()).collect()
}

#[test]
fn test_no_cc_leaves_queue_untouched() {
    let snap = thread();
    let builder = EntryBuilder::new(snap.tick, &snap.context());
    let mut queue = resolved_queue(
        &snap,
        &builder,
        &[RegId::new(RegClass::Integer, 1), RegId::new(RegClass::Integer, 0)],
    );

    merge_cc_entries(&mut queue, &builder, &TarmacResolver, &snap).unwrap();
    assert_eq!(names(&queue), vec!["r1", "r0"]);
}

#[test]
fn test_cc_only_becomes_single_cpsr() {
    let snap = thread();
    let builder = EntryBuilder::new(snap.tick, &snap.context());
    let mut queue = resolved_queue(
        &snap,
        &builder,
        &[
            RegId::new(RegClass::CondCode, CCREG_NZ),
            RegId::new(RegClass::CondCode, CCREG_C),
            RegId::new(RegClass::CondCode, CCREG_V),
            RegId::new(RegClass::CondCode, CCREG_GE),
        ],
    );

    merge_cc_entries(&mut queue, &builder, &TarmacResolver, &snap).unwrap();
    assert_eq!(queue.len(), 1);
    assert!(queue[0].is_cpsr());
    assert!(queue[0].valid);
    assert_eq!(queue[0].value, 0x900f0010);
}

#[test]
fn test_synthesized_cpsr_goes_last() {
    let snap = thread();
    let builder = EntryBuilder::new(snap.tick, &snap.context());
    let mut queue = resolved_queue(
        &snap,
        &builder,
        &[
            RegId::new(RegClass::Integer, 0),
            RegId::new(RegClass::CondCode, CCREG_NZ),
            RegId::new(RegClass::Integer, 1),
        ],
    );

    merge_cc_entries(&mut queue, &builder, &TarmacResolver, &snap).unwrap();
    assert_eq!(names(&queue), vec!["r0", "r1", "cpsr"]);
    assert!(queue.iter().all(|reg| reg.class != RegClass::CondCode));
}

#[test]
fn test_existing_cpsr_keeps_its_position() {
    let snap = thread();
    let builder = EntryBuilder::new(snap.tick, &snap.context());
    let mut queue = resolved_queue(
        &snap,
        &builder,
        &[
            RegId::new(RegClass::Misc, MISCREG_CPSR),
            RegId::new(RegClass::CondCode, CCREG_C),
            RegId::new(RegClass::Integer, 0),
        ],
    );

    merge_cc_entries(&mut queue, &builder, &TarmacResolver, &snap).unwrap();
    assert_eq!(names(&queue), vec!["cpsr", "r0"]);
}

#[test]
fn test_repeated_cpsr_is_collapsed() {
    let snap = thread();
    let builder = EntryBuilder::new(snap.tick, &snap.context());
    let mut queue = resolved_queue(
        &snap,
        &builder,
        &[
            RegId::new(RegClass::Misc, MISCREG_CPSR),
            RegId::new(RegClass::CondCode, CCREG_NZ),
            RegId::new(RegClass::Integer, 0),
            RegId::new(RegClass::Misc, MISCREG_CPSR),
        ],
    );

    merge_cc_entries(&mut queue, &builder, &TarmacResolver, &snap).unwrap();
    assert_eq!(names(&queue), vec!["cpsr", "r0"]);
    assert_eq!(queue.iter().filter(|reg| reg.is_cpsr()).count(), 1);
}
