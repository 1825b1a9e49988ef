use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TraceError;
use crate::regs::{RegClass, RegId, RegIndex};
use crate::tarmac_context::{MemAccess, PcState, StaticInst, TarmacContext, ThreadContext};

fn default_cpu() -> String {
    "cpu0".to_string()
}

fn default_predicate() -> bool {
    true
}

/// Register values visible after the instruction committed.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegFile {
    #[serde(default)]
    pub misc: HashMap<RegIndex, u64>,
    #[serde(default)]
    pub cc: HashMap<RegIndex, u64>,
    #[serde(default)]
    pub float: HashMap<RegIndex, u64>,
    #[serde(default)]
    pub int: HashMap<RegIndex, u64>,
}

/// Recorded state of one committed instruction, one JSON object per line:
///
/// {"tick": 1000, "pc": {"addr": 4096}, "inst": {"opcode": 3818913797,
///  "disassembly": "mov r0, #5", "dest_regs": [{"class": "integer", "index": 0}]},
///  "regs": {"misc": {"0": 467}, "int": {"0": 5}}}
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommitSnapshot {
    pub tick: u64,
    #[serde(default = "default_cpu")]
    pub cpu: String,
    pub pc: PcState,
    #[serde(default)]
    pub secure: bool,
    #[serde(default = "default_predicate")]
    pub predicate: bool,
    pub inst: StaticInst,
    #[serde(default)]
    pub mem: Vec<MemAccess>,
    #[serde(default)]
    pub regs: RegFile,
}

impl CommitSnapshot {
    pub fn new(tick: u64, pc: PcState, inst: StaticInst) -> Self {
        Self {
            tick,
            cpu: default_cpu(),
            pc,
            secure: false,
            predicate: default_predicate(),
            inst,
            mem: Vec::new(),
            regs: RegFile::default(),
        }
    }

    pub fn from_json(line: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(line)?)
    }

    pub fn set_reg(&mut self, reg: RegId, value: u64) {
        let file = match reg.class {
            RegClass::Misc => &mut self.regs.misc,
            RegClass::CondCode => &mut self.regs.cc,
            RegClass::Float => &mut self.regs.float,
            RegClass::Integer => &mut self.regs.int,
            RegClass::Vector | RegClass::Predicate => return,
        };
        file.insert(reg.index, value);
    }

    pub fn context(&self) -> TarmacContext<'_> {
        TarmacContext::new(self, &self.inst, self.pc, &self.mem, self.predicate)
    }
}

impl ThreadContext for CommitSnapshot {
    fn cpu_name(&self) -> &str {
        &self.cpu
    }

    fn is_secure(&self) -> bool {
        self.secure
    }

    fn read_misc_reg(&self, index: RegIndex) -> Option<u64> {
        self.regs.misc.get(&index).copied()
    }

    fn read_reg(&self, reg: RegId) -> Option<u64> {
        let file = match reg.class {
            RegClass::Misc => &self.regs.misc,
            RegClass::CondCode => &self.regs.cc,
            RegClass::Float => &self.regs.float,
            RegClass::Integer => &self.regs.int,
            RegClass::Vector | RegClass::Predicate => return None,
        };
        file.get(&reg.index).copied()
    }
}
