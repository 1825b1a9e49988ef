use serde_derive::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as DisplayResult};

pub type RegIndex = u16;

/// Register classes an instruction can write.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RegClass {
    Misc,
    CondCode,
    Float,
    Integer,
    Vector,
    Predicate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegId {
    pub class: RegClass,
    pub index: RegIndex,
}

impl RegId {
    pub fn new(class: RegClass, index: RegIndex) -> Self {
        Self { class, index }
    }

    pub fn is_cpsr(&self) -> bool {
        self.class == RegClass::Misc && self.index == MISCREG_CPSR
    }
}

impl Display for RegId {
    fn fmt(&self, f: &mut Formatter) -> DisplayResult {
        write!(f, "{:?}[{}]", self.class, self.index)
    }
}

pub const MISCREG_CPSR: RegIndex = 0;

static MISC_REG_NAMES: &[&str] = &[
    "cpsr", "spsr", "spsr_fiq", "spsr_irq", "spsr_svc", "spsr_mon", "spsr_abt", "spsr_hyp",
    "spsr_und", "elr_hyp", "fpsid", "fpscr", "mvfr1", "mvfr0", "fpexc", "sctlr", "scr", "nsacr",
];

pub fn misc_reg_name(index: RegIndex) -> String {
    match MISC_REG_NAMES.get(index as usize) {
        Some(name) => name.to_string(),
        None => format!("misc{}", index),
    }
}

pub const CCREG_NZ: RegIndex = 0;
pub const CCREG_C: RegIndex = 1;
pub const CCREG_V: RegIndex = 2;
pub const CCREG_GE: RegIndex = 3;
pub const CCREG_FP: RegIndex = 4;

pub fn cc_reg_name(index: RegIndex) -> String {
    match index {
        CCREG_NZ => "nz".to_string(),
        CCREG_C => "c".to_string(),
        CCREG_V => "v".to_string(),
        CCREG_GE => "ge".to_string(),
        CCREG_FP => "fp".to_string(),
        _ => format!("cc{}", index),
    }
}

pub const INTREG_FP: RegIndex = 11;
pub const INTREG_SP: RegIndex = 13;
pub const INTREG_LR: RegIndex = 14;
pub const INTREG_PC: RegIndex = 15;

pub fn int_reg_name(index: RegIndex) -> String {
    match index {
        INTREG_PC => "pc".to_string(),
        INTREG_SP => "sp".to_string(),
        INTREG_FP => "fp".to_string(),
        INTREG_LR => "lr".to_string(),
        _ => format!("r{}", index),
    }
}

/// Integer register name as seen from `mode`: AArch32 exception modes bank
/// sp and lr (hyp only sp), fiq also banks r8-r12.
pub fn banked_int_reg_name(index: RegIndex, mode: OperatingMode) -> String {
    let banked = match mode {
        OperatingMode::Fiq => (8..=INTREG_LR).contains(&index),
        OperatingMode::Hyp => index == INTREG_SP,
        OperatingMode::Irq
        | OperatingMode::Svc
        | OperatingMode::Mon
        | OperatingMode::Abort
        | OperatingMode::Undefined => index == INTREG_SP || index == INTREG_LR,
        _ => false,
    };

    if banked {
        format!("{}_{}", int_reg_name(index), mode)
    } else {
        int_reg_name(index)
    }
}

pub fn float_reg_name(index: RegIndex) -> String {
    format!("f{}", index)
}

pub fn reg_name(reg: RegId) -> String {
    match reg.class {
        RegClass::Misc => misc_reg_name(reg.index),
        RegClass::CondCode => cc_reg_name(reg.index),
        RegClass::Float => float_reg_name(reg.index),
        RegClass::Integer => int_reg_name(reg.index),
        RegClass::Vector => format!("v{}", reg.index),
        RegClass::Predicate => format!("p{}", reg.index),
    }
}

/* CPSR layout:
 * 31:30 NZ, 29 C, 28 V, 19:16 GE, 4:0 M
 */
const CPSR_NZ_SHIFT: u32 = 30;
const CPSR_C_SHIFT: u32 = 29;
const CPSR_V_SHIFT: u32 = 28;
const CPSR_GE_SHIFT: u32 = 16;
const CPSR_MODE_MASK: u64 = 0x1f;

/// Overwrite the flag fields of a raw CPSR value with the condition code
/// registers.
pub fn fold_cc_into_cpsr(cpsr: u64, nz: u64, c: u64, v: u64, ge: u64) -> u64 {
    let mask = (0x3 << CPSR_NZ_SHIFT)
        | (0x1 << CPSR_C_SHIFT)
        | (0x1 << CPSR_V_SHIFT)
        | (0xf << CPSR_GE_SHIFT);
    (cpsr & !mask)
        | ((nz & 0x3) << CPSR_NZ_SHIFT)
        | ((c & 0x1) << CPSR_C_SHIFT)
        | ((v & 0x1) << CPSR_V_SHIFT)
        | ((ge & 0xf) << CPSR_GE_SHIFT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    El0t,
    El1t,
    El1h,
    El2t,
    El2h,
    El3t,
    El3h,
    User,
    Fiq,
    Irq,
    Svc,
    Mon,
    Abort,
    Hyp,
    Undefined,
    System,
    Unsupported(u8),
}

impl OperatingMode {
    pub fn from_cpsr(cpsr: u64) -> Self {
        match (cpsr & CPSR_MODE_MASK) as u8 {
            0x00 => Self::El0t,
            0x04 => Self::El1t,
            0x05 => Self::El1h,
            0x08 => Self::El2t,
            0x09 => Self::El2h,
            0x0c => Self::El3t,
            0x0d => Self::El3h,
            0x10 => Self::User,
            0x11 => Self::Fiq,
            0x12 => Self::Irq,
            0x13 => Self::Svc,
            0x16 => Self::Mon,
            0x17 => Self::Abort,
            0x1a => Self::Hyp,
            0x1b => Self::Undefined,
            0x1f => Self::System,
            other => Self::Unsupported(other),
        }
    }
}

impl Display for OperatingMode {
    fn fmt(&self, f: &mut Formatter) -> DisplayResult {
        let label = match self {
            Self::El0t => "EL0t",
            Self::El1t => "EL1t",
            Self::El1h => "EL1h",
            Self::El2t => "EL2t",
            Self::El2h => "EL2h",
            Self::El3t => "EL3t",
            Self::El3h => "EL3h",
            Self::User => "usr",
            Self::Fiq => "fiq",
            Self::Irq => "irq",
            Self::Svc => "svc",
            Self::Mon => "mon",
            Self::Abort => "abt",
            Self::Hyp => "hyp",
            Self::Undefined => "und",
            Self::System => "sys",
            Self::Unsupported(_) => "Unsupported",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ISetState {
    Arm,
    Thumb,
    A64,
}

impl Display for ISetState {
    fn fmt(&self, f: &mut Formatter) -> DisplayResult {
        match self {
            Self::Arm => write!(f, "A"),
            Self::Thumb => write!(f, "T"),
            Self::A64 => write!(f, "O"),
        }
    }
}
