use std::io::{Result as IoResult, Write};
use std::rc::Rc;

use crate::regs::{ISetState, OperatingMode, RegClass, RegId, RegIndex};

/// Print contract shared by every entry kind: one line per entry.
pub trait TarmacPrint {
    fn print(&self, outs: &mut dyn Write, verbosity: u8, prefix: &str) -> IoResult<()>;
}

#[derive(Debug, Clone)]
pub struct InstEntry {
    pub when: u64,
    /// Executed (IT) or skipped on a failed condition check (IS).
    pub taken: bool,
    pub inst_count: u64,
    pub addr: u64,
    pub opcode: u32,
    /// 16 or 32
    pub inst_size: u8,
    pub disassembly: String,
    pub iset_state: ISetState,
    pub mode: OperatingMode,
    pub secure_mode: bool,
}

impl TarmacPrint for InstEntry {
    fn print(&self, outs: &mut dyn Write, _verbosity: u8, prefix: &str) -> IoResult<()> {
        let digits = (self.inst_size >> 2) as usize;
        writeln!(
            outs,
            "{}{} clk {} ({}) {:08x} {:0digits$x} {} {}_{} : {}",
            prefix,
            self.when,
            if self.taken { "IT" } else { "IS" },
            self.inst_count,
            self.addr,
            self.opcode,
            self.iset_state,
            self.mode,
            if self.secure_mode { "s" } else { "ns" },
            self.disassembly,
            digits = digits,
        )
    }
}

#[derive(Debug, Clone)]
pub struct RegEntry {
    pub when: u64,
    pub cpu: Rc<str>,
    /// Only set once the resolver has produced a value.
    pub valid: bool,
    pub class: RegClass,
    pub index: RegIndex,
    pub name: String,
    pub value: u64,
}

impl RegEntry {
    pub fn reg_id(&self) -> RegId {
        RegId::new(self.class, self.index)
    }

    pub fn is_cpsr(&self) -> bool {
        self.reg_id().is_cpsr()
    }
}

impl TarmacPrint for RegEntry {
    fn print(&self, outs: &mut dyn Write, verbosity: u8, prefix: &str) -> IoResult<()> {
        if self.valid {
            writeln!(
                outs,
                "{}{} clk {} R {} {:08x}",
                prefix, self.when, self.cpu, self.name, self.value
            )
        } else if verbosity > 0 {
            writeln!(
                outs,
                "{}{} clk {} R {} <invalid>",
                prefix, self.when, self.cpu, self.name
            )
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct MemEntry {
    pub when: u64,
    pub cpu: Rc<str>,
    pub load_access: bool,
    pub addr: u64,
    /// Bytes
    pub size: u8,
    pub data: u64,
}

impl TarmacPrint for MemEntry {
    fn print(&self, outs: &mut dyn Write, _verbosity: u8, prefix: &str) -> IoResult<()> {
        let digits = self.size as usize * 2;
        writeln!(
            outs,
            "{}{} clk {} M{}{} {:08x} {:0digits$x}",
            prefix,
            self.when,
            self.cpu,
            if self.load_access { "R" } else { "W" },
            self.size,
            self.addr,
            self.data,
            digits = digits,
        )
    }
}
