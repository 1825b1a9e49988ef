use std::rc::Rc;

use crate::error::TraceError;
use crate::regs::{reg_name, OperatingMode, RegClass, RegId, MISCREG_CPSR};
use crate::tarmac_context::{AccessKind, TarmacContext};
use crate::trace_entry::{InstEntry, MemEntry, RegEntry};

/// Number of instructions traced in this session. Starts at zero when the
/// tracer is created and is never reset.
#[derive(Debug, Default)]
pub struct InstCounter {
    count: u64,
}

impl InstCounter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn next(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    pub fn current(&self) -> u64 {
        self.count
    }
}

/// Turns the state of one committed instruction into trace entries. Register
/// entries come out unresolved.
pub struct EntryBuilder {
    pub when: u64,
    pub cpu: Rc<str>,
}

impl EntryBuilder {
    pub fn new(when: u64, ctx: &TarmacContext) -> Self {
        Self {
            when,
            cpu: Rc::from(ctx.thread.cpu_name()),
        }
    }

    pub fn add_inst_entry(
        &self,
        queue: &mut Vec<InstEntry>,
        ctx: &TarmacContext,
        counter: &mut InstCounter,
    ) -> Result<(), TraceError> {
        let cpsr = ctx
            .thread
            .read_misc_reg(MISCREG_CPSR)
            .ok_or(TraceError::MissingRegister(RegId::new(
                RegClass::Misc,
                MISCREG_CPSR,
            )))?;

        let inst_size = ctx.pc.inst_size();
        let opcode = if inst_size == 16 {
            ctx.static_inst.opcode & 0xffff
        } else {
            ctx.static_inst.opcode
        };

        queue.push(InstEntry {
            when: self.when,
            taken: ctx.predicate,
            inst_count: counter.next(),
            addr: ctx.pc.addr,
            opcode,
            inst_size,
            disassembly: ctx.static_inst.disassembly.to_uppercase(),
            iset_state: ctx.pc.iset_state(),
            mode: OperatingMode::from_cpsr(cpsr),
            secure_mode: ctx.thread.is_secure(),
        });
        Ok(())
    }

    pub fn add_mem_entries(&self, queue: &mut Vec<MemEntry>, ctx: &TarmacContext) {
        for access in ctx.mem_accesses {
            queue.push(MemEntry {
                when: self.when,
                cpu: self.cpu.clone(),
                load_access: access.kind == AccessKind::Load,
                addr: access.addr,
                size: access.size,
                data: access.data,
            });
        }
    }

    pub fn add_reg_entries(&self, queue: &mut Vec<RegEntry>, ctx: &TarmacContext) {
        for reg in &ctx.static_inst.dest_regs {
            queue.push(self.reg_entry(*reg));
        }
    }

    pub fn reg_entry(&self, reg: RegId) -> RegEntry {
        RegEntry {
            when: self.when,
            cpu: self.cpu.clone(),
            valid: false,
            class: reg.class,
            index: reg.index,
            name: reg_name(reg),
            value: 0,
        }
    }
}
