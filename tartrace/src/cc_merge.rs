use crate::entry_builder::EntryBuilder;
use crate::error::TraceError;
use crate::reg_resolver::RegisterResolver;
use crate::regs::{RegClass, RegId, MISCREG_CPSR};
use crate::tarmac_context::ThreadContext;
use crate::trace_entry::RegEntry;

/// The simulator writes CPSR flags as separate condition code registers,
/// while a Tarmac trace carries a single CPSR line. Drop every CC entry,
/// keep only the first queued CPSR entry and, if there was at least one CC
/// entry but no CPSR entry, append a freshly resolved one.
pub fn merge_cc_entries<R: RegisterResolver + ?Sized>(
    queue: &mut Vec<RegEntry>,
    builder: &EntryBuilder,
    resolver: &R,
    thread: &dyn ThreadContext,
) -> Result<(), TraceError> {
    let (cc, rest): (Vec<RegEntry>, Vec<RegEntry>) = queue
        .drain(..)
        .partition(|reg| reg.class == RegClass::CondCode);
    *queue = rest;

    let mut seen_cpsr = false;
    queue.retain(|reg| !reg.is_cpsr() || !std::mem::replace(&mut seen_cpsr, true));

    if cc.is_empty() || seen_cpsr {
        return Ok(());
    }

    let mut cpsr = builder.reg_entry(RegId::new(RegClass::Misc, MISCREG_CPSR));
    resolver.resolve(&mut cpsr, thread)?;
    queue.push(cpsr);
    Ok(())
}
