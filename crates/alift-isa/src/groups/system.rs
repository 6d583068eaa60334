//! System instructions (hints, barriers, PSTATE and system-register moves)
//! - decode, lift, disasm.

use alift_ir::{CallParams, Expr, IRBuilder, Reg, Stmt};

use super::InstructionGroup;
use crate::decode::DecodedInstr;
use crate::encode::{bit, bits, decode_rd};
use crate::regs::gpr_name;
use crate::tables::{OPTION_SY, SymbolTables};
use crate::types::{BarrierKind, Direction, Gpr, Instr, SysRegSelector};

/// System-instruction class: `bits[31:22] == 0b1101010100`.
const SYSTEM_CLASS: u32 = 0b11_0101_0100;

/// Intrinsic writing a system register or PSTATE field.
pub const WRITE_STATUS_REG: &str = "_WriteStatusReg";
/// Intrinsic reading a system register.
pub const READ_STATUS_REG: &str = "_ReadStatusReg";

/// System instruction group.
pub struct SystemGroup;

impl InstructionGroup for SystemGroup {
    fn name(&self) -> &'static str {
        "system"
    }

    fn decode32(&self, raw: u32) -> Option<Instr> {
        if bits(raw, 31, 22) != SYSTEM_CLASS {
            return None;
        }

        let read = bit(raw, 21);
        let op0 = bits(raw, 20, 19) as u8;
        let op1 = bits(raw, 18, 16) as u8;
        let crn = bits(raw, 15, 12) as u8;
        let crm = bits(raw, 11, 8) as u8;
        let op2 = bits(raw, 7, 5) as u8;
        let rt = decode_rd(raw);

        if op0 >= 2 {
            let direction = if read {
                Direction::Read
            } else {
                Direction::Write
            };
            return Some(Instr::SystemRegisterMove {
                direction,
                rt: Gpr::zr_form(rt, true),
                sysreg: SysRegSelector::new(op0, op1, crn, crm, op2),
            });
        }

        if read || op0 != 0 || rt != 31 {
            return None;
        }

        match crn {
            2 if op1 == 3 => Some(Instr::Hint {
                imm: (crm << 3) | op2,
            }),
            3 if op1 == 3 => {
                let kind = match op2 {
                    4 => BarrierKind::Dsb,
                    5 => BarrierKind::Dmb,
                    6 => BarrierKind::Isb,
                    _ => return None,
                };
                Some(Instr::Barrier { kind, option: crm })
            }
            4 if is_pstate_field(op1, op2) => Some(Instr::PstateMove {
                field: SysRegSelector::pstate(op1, op2),
                imm: crm,
            }),
            _ => None,
        }
    }

    fn handles(&self, instr: &Instr) -> bool {
        matches!(
            instr,
            Instr::Hint { .. }
                | Instr::Barrier { .. }
                | Instr::PstateMove { .. }
                | Instr::SystemRegisterMove { .. }
        )
    }

    fn lift(&self, instr: &DecodedInstr, tables: &SymbolTables) -> Vec<Stmt> {
        match instr.instr {
            Instr::Hint { imm } => lift_hint(imm, tables),
            Instr::Barrier { kind, .. } => lift_barrier(kind),
            Instr::PstateMove { field, imm } => lift_pstate(field, imm, tables),
            Instr::SystemRegisterMove {
                direction,
                rt,
                sysreg,
            } => lift_sysreg_move(direction, rt, sysreg, tables),
            _ => vec![Stmt::Undefined],
        }
    }

    fn disasm(&self, instr: &DecodedInstr, tables: &SymbolTables) -> String {
        match instr.instr {
            Instr::Hint { imm } => tables.hint_mnemonic(imm).into_owned(),
            Instr::Barrier {
                kind: BarrierKind::Isb,
                option: OPTION_SY,
            } => "isb".to_string(),
            Instr::Barrier { kind, option } => {
                format!("{} {}", kind.mnemonic(), tables.barrier_option(option))
            }
            Instr::PstateMove { field, imm } => {
                format!("msr {}, #{imm:#x}", tables.sysreg_name(field))
            }
            Instr::SystemRegisterMove {
                direction: Direction::Write,
                rt,
                sysreg,
            } => format!("msr {}, {}", tables.sysreg_name(sysreg), gpr_name(rt)),
            Instr::SystemRegisterMove {
                direction: Direction::Read,
                rt,
                sysreg,
            } => format!("mrs {}, {}", gpr_name(rt), tables.sysreg_name(sysreg)),
            _ => "<?>".to_string(),
        }
    }
}

/// PSTATE fields writable with `msr <field>, #imm`, keyed by `(op1, op2)`.
const fn is_pstate_field(op1: u8, op2: u8) -> bool {
    matches!(
        (op1, op2),
        (0, 3) | (0, 4) | (0, 5) | (3, 1) | (3, 2) | (3, 4) | (3, 6) | (3, 7)
    )
}

fn lift_hint(imm: u8, tables: &SymbolTables) -> Vec<Stmt> {
    IRBuilder::new()
        .intrinsic(Vec::new(), tables.hint_intrinsic(imm), CallParams::empty())
        .build()
}

fn lift_barrier(kind: BarrierKind) -> Vec<Stmt> {
    IRBuilder::new()
        .intrinsic(Vec::new(), kind.intrinsic(), CallParams::empty())
        .build()
}

fn lift_pstate(field: SysRegSelector, imm: u8, tables: &SymbolTables) -> Vec<Stmt> {
    let dest = Reg::named(tables.sysreg_name(field), 8);
    IRBuilder::new()
        .intrinsic(
            vec![dest],
            WRITE_STATUS_REG,
            CallParams::one(Expr::constant(u64::from(imm), 4)),
        )
        .build()
}

fn lift_sysreg_move(
    direction: Direction,
    rt: Gpr,
    sysreg: SysRegSelector,
    tables: &SymbolTables,
) -> Vec<Stmt> {
    let name = tables.sysreg_name(sysreg);
    match direction {
        Direction::Write => IRBuilder::new()
            .intrinsic(
                vec![Reg::named(name, 8)],
                WRITE_STATUS_REG,
                CallParams::one(rt.read()),
            )
            .build(),
        Direction::Read => IRBuilder::new()
            .intrinsic(
                rt.reg().into_iter().collect(),
                READ_STATUS_REG,
                CallParams::one(Expr::sysreg(name)),
            )
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::InstrWord;
    use alift_ir::serialize_stmt;

    fn decode(raw: u32) -> Option<DecodedInstr> {
        SystemGroup
            .decode32(raw)
            .map(|instr| DecodedInstr::new(InstrWord::new(0, raw), instr))
    }

    fn lift(raw: u32) -> Vec<String> {
        let instr = decode(raw).unwrap();
        SystemGroup
            .lift(&instr, SymbolTables::standard())
            .iter()
            .map(serialize_stmt)
            .collect()
    }

    fn disasm(raw: u32) -> String {
        SystemGroup.disasm(&decode(raw).unwrap(), SymbolTables::standard())
    }

    #[test]
    fn test_decode_hints() {
        assert_eq!(SystemGroup.decode32(0xD503_201F), Some(Instr::Hint { imm: 0 }));
        assert_eq!(SystemGroup.decode32(0xD503_245F), Some(Instr::Hint { imm: 0x22 }));
        // Highest hint immediate: CRm=15, op2=7.
        assert_eq!(SystemGroup.decode32(0xD503_2FFF), Some(Instr::Hint { imm: 0x7F }));
        // Rt != 31 is not a hint.
        assert_eq!(SystemGroup.decode32(0xD503_2000), None);
    }

    #[test]
    fn test_decode_barriers() {
        assert_eq!(
            SystemGroup.decode32(0xD503_3FBF),
            Some(Instr::Barrier {
                kind: BarrierKind::Dmb,
                option: 15
            })
        );
        assert_eq!(
            SystemGroup.decode32(0xD503_3A9F),
            Some(Instr::Barrier {
                kind: BarrierKind::Dsb,
                option: 10
            })
        );
        assert_eq!(
            SystemGroup.decode32(0xD503_3FDF),
            Some(Instr::Barrier {
                kind: BarrierKind::Isb,
                option: 15
            })
        );
        // clrex (op2=2) is not a barrier.
        assert_eq!(SystemGroup.decode32(0xD503_3F5F), None);
    }

    #[test]
    fn test_decode_sysreg_moves() {
        assert_eq!(
            SystemGroup.decode32(0xD51E_C000),
            Some(Instr::SystemRegisterMove {
                direction: Direction::Write,
                rt: Gpr::zr_form(0, true),
                sysreg: SysRegSelector::new(3, 6, 12, 0, 0),
            })
        );
        assert_eq!(
            SystemGroup.decode32(0xD53E_1000),
            Some(Instr::SystemRegisterMove {
                direction: Direction::Read,
                rt: Gpr::zr_form(0, true),
                sysreg: SysRegSelector::new(3, 6, 1, 0, 0),
            })
        );
    }

    #[test]
    fn test_decode_pstate() {
        assert_eq!(
            SystemGroup.decode32(0xD503_44FF),
            Some(Instr::PstateMove {
                field: SysRegSelector::pstate(3, 7),
                imm: 4
            })
        );
        // op1=1, op2=0 is not a named PSTATE field.
        assert_eq!(SystemGroup.decode32(0xD501_401F), None);
    }

    #[test]
    fn test_rejects_other_classes() {
        assert_eq!(SystemGroup.decode32(0xD400_0001), None);
        assert_eq!(SystemGroup.decode32(0xD65F_03C0), None);
    }

    #[test]
    fn test_lift_barriers_ignore_option() {
        for raw in [0xD503_3FBF, 0xD503_3EBF, 0xD503_3ABF] {
            assert_eq!(lift(raw), ["INTRINSIC([],__dmb,CALL_PARAM([]))"]);
        }
        assert_eq!(lift(0xD503_3F9F), ["INTRINSIC([],__dsb,CALL_PARAM([]))"]);
        assert_eq!(lift(0xD503_3FDF), ["INTRINSIC([],__isb,CALL_PARAM([]))"]);
    }

    #[test]
    fn test_lift_hints() {
        assert_eq!(lift(0xD503_245F), ["INTRINSIC([],SystemHintOp_BTI,CALL_PARAM([]))"]);
        assert_eq!(lift(0xD503_207F), ["INTRINSIC([],SystemHintOp_WFI,CALL_PARAM([]))"]);
        assert_eq!(
            lift(0xD503_22BF),
            ["INTRINSIC([],SystemHintOp_HINT_21,CALL_PARAM([]))"]
        );
    }

    #[test]
    fn test_lift_sysreg_moves() {
        assert_eq!(
            lift(0xD51E_1000),
            ["INTRINSIC([sctlr_el3],_WriteStatusReg,CALL_PARAM([<il: x0>]))"]
        );
        assert_eq!(
            lift(0xD53E_1000),
            ["INTRINSIC([x0],_ReadStatusReg,CALL_PARAM([<il: sctlr_el3>]))"]
        );
        // msr sctlr_el3, xzr
        assert_eq!(
            lift(0xD51E_101F),
            ["INTRINSIC([sctlr_el3],_WriteStatusReg,CALL_PARAM([<il: 0>]))"]
        );
        // mrs xzr, sctlr_el3
        assert_eq!(
            lift(0xD53E_101F),
            ["INTRINSIC([],_ReadStatusReg,CALL_PARAM([<il: sctlr_el3>]))"]
        );
    }

    #[test]
    fn test_lift_unnamed_sysreg() {
        // msr s3_7_c15_c2_3, x1
        assert_eq!(
            lift(0xD51F_F261),
            ["INTRINSIC([s3_7_c15_c2_3],_WriteStatusReg,CALL_PARAM([<il: x1>]))"]
        );
    }

    #[test]
    fn test_lift_pstate() {
        assert_eq!(
            lift(0xD503_44FF),
            ["INTRINSIC([daifclr],_WriteStatusReg,CALL_PARAM([<il: 4>]))"]
        );
    }

    #[test]
    fn test_disasm() {
        assert_eq!(disasm(0xD503_201F), "nop");
        assert_eq!(disasm(0xD503_245F), "bti c");
        assert_eq!(disasm(0xD503_3ABF), "dmb ishst");
        assert_eq!(disasm(0xD503_3FDF), "isb");
        assert_eq!(disasm(0xD503_44FF), "msr daifclr, #0x4");
        assert_eq!(disasm(0xD51E_C000), "msr vbar_el3, x0");
        assert_eq!(disasm(0xD53E_1000), "mrs x0, sctlr_el3");
    }
}
