use serde_derive::{Deserialize, Serialize};

use crate::regs::{ISetState, RegId, RegIndex};

/// Read access to the architectural state of the thread that committed an
/// instruction. Reads must not have side effects. `None` means the context
/// does not carry the register at all.
pub trait ThreadContext {
    fn cpu_name(&self) -> &str;
    fn is_secure(&self) -> bool;
    fn read_misc_reg(&self, index: RegIndex) -> Option<u64>;
    fn read_reg(&self, reg: RegId) -> Option<u64>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PcState {
    pub addr: u64,
    #[serde(default)]
    pub thumb: bool,
    /// Thumb instruction using the 32-bit encoding.
    #[serde(default)]
    pub big_thumb: bool,
    #[serde(default)]
    pub aarch64: bool,
}

impl PcState {
    pub fn iset_state(&self) -> ISetState {
        if self.aarch64 {
            ISetState::A64
        } else if self.thumb {
            ISetState::Thumb
        } else {
            ISetState::Arm
        }
    }

    pub fn inst_size(&self) -> u8 {
        if self.iset_state() == ISetState::Thumb && !self.big_thumb {
            16
        } else {
            32
        }
    }
}

/// Decoded form of the committed instruction.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StaticInst {
    pub opcode: u32,
    #[serde(default)]
    pub disassembly: String,
    #[serde(default)]
    pub dest_regs: Vec<RegId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    Load,
    Store,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemAccess {
    pub kind: AccessKind,
    pub addr: u64,
    pub size: u8,
    pub data: u64,
}

/// Everything a record needs to know about one committed instruction.
pub struct TarmacContext<'a> {
    pub thread: &'a dyn ThreadContext,
    pub static_inst: &'a StaticInst,
    pub pc: PcState,
    pub mem_accesses: &'a [MemAccess],
    /// False when the instruction failed its condition check.
    pub predicate: bool,
}

impl<'a> TarmacContext<'a> {
    pub fn new(
        thread: &'a dyn ThreadContext,
        static_inst: &'a StaticInst,
        pc: PcState,
        mem_accesses: &'a [MemAccess],
        predicate: bool,
    ) -> Self {
        Self {
            thread,
            static_inst,
            pc,
            mem_accesses,
            predicate,
        }
    }
}
