use log::trace;

use crate::error::TraceError;
use crate::regs::{
    banked_int_reg_name, fold_cc_into_cpsr, OperatingMode, RegClass, RegId, RegIndex, CCREG_C,
    CCREG_GE, CCREG_NZ, CCREG_V, MISCREG_CPSR,
};
use crate::tarmac_context::ThreadContext;
use crate::trace_entry::RegEntry;

fn read(thread: &dyn ThreadContext, reg: RegId) -> Result<u64, TraceError> {
    thread.read_reg(reg).ok_or(TraceError::MissingRegister(reg))
}

/// Second phase of register entry generation: fills in the value of an
/// entry built by the `EntryBuilder`. Each entry is resolved once.
///
/// One update function per register class; later architecture versions
/// override the ones they extend. Entries left untouched stay invalid and
/// are not printed as data.
pub trait RegisterResolver {
    fn resolve(&self, entry: &mut RegEntry, thread: &dyn ThreadContext) -> Result<(), TraceError> {
        let index = entry.index;
        match entry.class {
            RegClass::Misc => self.update_misc(entry, thread, index),
            RegClass::CondCode => self.update_cc(entry, thread, index),
            RegClass::Float => self.update_float(entry, thread, index),
            RegClass::Integer => self.update_int(entry, thread, index),
            RegClass::Vector => self.update_vec(entry, thread, index),
            RegClass::Predicate => self.update_pred(entry, thread, index),
        }
    }

    fn update_misc(
        &self,
        entry: &mut RegEntry,
        thread: &dyn ThreadContext,
        index: RegIndex,
    ) -> Result<(), TraceError> {
        let raw = thread
            .read_misc_reg(index)
            .ok_or(TraceError::MissingRegister(RegId::new(RegClass::Misc, index)))?;

        // CPSR flags live in the CC registers
        entry.value = if index == MISCREG_CPSR {
            let cc = |idx| read(thread, RegId::new(RegClass::CondCode, idx));
            fold_cc_into_cpsr(raw, cc(CCREG_NZ)?, cc(CCREG_C)?, cc(CCREG_V)?, cc(CCREG_GE)?)
        } else {
            raw
        };
        entry.valid = true;
        Ok(())
    }

    fn update_cc(
        &self,
        entry: &mut RegEntry,
        thread: &dyn ThreadContext,
        index: RegIndex,
    ) -> Result<(), TraceError> {
        entry.value = read(thread, RegId::new(RegClass::CondCode, index))?;
        entry.valid = true;
        Ok(())
    }

    fn update_float(
        &self,
        entry: &mut RegEntry,
        thread: &dyn ThreadContext,
        index: RegIndex,
    ) -> Result<(), TraceError> {
        entry.value = read(thread, RegId::new(RegClass::Float, index))?;
        entry.valid = true;
        Ok(())
    }

    fn update_int(
        &self,
        entry: &mut RegEntry,
        thread: &dyn ThreadContext,
        index: RegIndex,
    ) -> Result<(), TraceError> {
        let cpsr = thread
            .read_misc_reg(MISCREG_CPSR)
            .ok_or(TraceError::MissingRegister(RegId::new(RegClass::Misc, MISCREG_CPSR)))?;
        entry.name = banked_int_reg_name(index, OperatingMode::from_cpsr(cpsr));
        entry.value = read(thread, RegId::new(RegClass::Integer, index))?;
        entry.valid = true;
        Ok(())
    }

    /// Not yet implemented for this ISA generation.
    fn update_vec(
        &self,
        entry: &mut RegEntry,
        _thread: &dyn ThreadContext,
        _index: RegIndex,
    ) -> Result<(), TraceError> {
        trace!("Leaving vector register {} unresolved", entry.name);
        Ok(())
    }

    /// Not yet implemented for this ISA generation.
    fn update_pred(
        &self,
        entry: &mut RegEntry,
        _thread: &dyn ThreadContext,
        _index: RegIndex,
    ) -> Result<(), TraceError> {
        trace!("Leaving predicate register {} unresolved", entry.name);
        Ok(())
    }
}

/// Resolver for pre-ARMv8 cores.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarmacResolver;

impl RegisterResolver for TarmacResolver {}
