//! A64 register names and IR operand helpers.

use alift_ir::{Expr, Flag, Reg};

use crate::types::Gpr;

const X_NAMES: [&str; 31] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11", "x12", "x13",
    "x14", "x15", "x16", "x17", "x18", "x19", "x20", "x21", "x22", "x23", "x24", "x25", "x26",
    "x27", "x28", "x29", "x30",
];

const W_NAMES: [&str; 31] = [
    "w0", "w1", "w2", "w3", "w4", "w5", "w6", "w7", "w8", "w9", "w10", "w11", "w12", "w13",
    "w14", "w15", "w16", "w17", "w18", "w19", "w20", "w21", "w22", "w23", "w24", "w25", "w26",
    "w27", "w28", "w29", "w30",
];

/// Negative flag.
pub const FLAG_N: Flag = Flag::new("n");
/// Zero flag.
pub const FLAG_Z: Flag = Flag::new("z");
/// Carry flag.
pub const FLAG_C: Flag = Flag::new("c");
/// Overflow flag.
pub const FLAG_V: Flag = Flag::new("v");

/// Pseudo-register carrying the `svc` immediate into a system call.
#[must_use]
pub const fn syscall_imm() -> Reg {
    Reg::new("syscall_imm", 4)
}

/// Link register (`x30`).
#[must_use]
pub const fn link_register() -> Reg {
    Reg::new("x30", 8)
}

/// Assembly name of a register operand.
#[must_use]
pub const fn gpr_name(gpr: Gpr) -> &'static str {
    match (gpr.index, gpr.sp, gpr.wide) {
        (31, true, true) => "sp",
        (31, true, false) => "wsp",
        (31, false, true) => "xzr",
        (31, false, false) => "wzr",
        (i, _, true) => X_NAMES[i as usize & 31],
        (i, _, false) => W_NAMES[i as usize & 31],
    }
}

impl Gpr {
    /// IR register for a write, or `None` for the zero register.
    ///
    /// 32-bit views are sub-registers of their 64-bit parent.
    #[must_use]
    pub const fn reg(self) -> Option<Reg> {
        if self.is_zero() {
            return None;
        }
        let name = gpr_name(self);
        if self.wide {
            Some(Reg::new(name, 8))
        } else {
            let parent = if self.index == 31 {
                "sp"
            } else {
                X_NAMES[self.index as usize & 31]
            };
            Some(Reg::sub(name, 4, parent))
        }
    }

    /// IR expression for a read. The zero register reads as `CONST(0)`.
    #[must_use]
    pub fn read(self) -> Expr {
        match self.reg() {
            Some(reg) => Expr::reg(reg),
            None => Expr::constant(0, self.size()),
        }
    }
}
