//! Data processing (move wide, register move, add/sub immediate,
//! conditional compare) - decode, lift, disasm.

use alift_ir::{Expr, IRBuilder, Stmt};
use tracing::warn;

use super::InstructionGroup;
use crate::decode::DecodedInstr;
use crate::encode::{bit, bits, decode_imm16, decode_rd, decode_rm, decode_rn, decode_sf};
use crate::regs::{FLAG_C, FLAG_N, FLAG_V, FLAG_Z, gpr_name};
use crate::tables::SymbolTables;
use crate::types::{CompareOperand, Condition, Gpr, Instr, MoveWideKind};

/// Move wide (immediate): `bits[28:23] == 0b100101`.
const MOVE_WIDE_CLASS: u32 = 0b10_0101;
/// Add/subtract (immediate): `bits[28:23] == 0b100010`.
const ADD_SUB_IMM_CLASS: u32 = 0b10_0010;
/// Logical (shifted register): `bits[28:24] == 0b01010`.
const LOGICAL_REG_CLASS: u32 = 0b0_1010;
/// Conditional compare: `bits[29:21] == 0b111010010`.
const COND_COMPARE_CLASS: u32 = 0b1_1101_0010;

/// Data-processing instruction group.
pub struct DataGroup;

impl InstructionGroup for DataGroup {
    fn name(&self) -> &'static str {
        "data"
    }

    fn decode32(&self, raw: u32) -> Option<Instr> {
        if bits(raw, 28, 23) == MOVE_WIDE_CLASS {
            return decode_move_wide(raw);
        }
        if bits(raw, 28, 23) == ADD_SUB_IMM_CLASS {
            return Some(decode_add_sub_imm(raw));
        }
        if bits(raw, 28, 24) == LOGICAL_REG_CLASS {
            return decode_move_register(raw);
        }
        if bits(raw, 29, 21) == COND_COMPARE_CLASS {
            return decode_cond_compare(raw);
        }
        None
    }

    fn handles(&self, instr: &Instr) -> bool {
        matches!(
            instr,
            Instr::MoveImmediate { .. }
                | Instr::MoveRegister { .. }
                | Instr::AddSubImmediate { .. }
                | Instr::ConditionalCompare { .. }
        )
    }

    fn lift(&self, instr: &DecodedInstr, tables: &SymbolTables) -> Vec<Stmt> {
        match instr.instr {
            Instr::MoveImmediate {
                kind,
                rd,
                imm16,
                shift,
            } => lift_move_wide(kind, rd, imm16, shift),
            Instr::MoveRegister { rd, rm } => {
                IRBuilder::new().write_reg(rd.reg(), rm.read()).build()
            }
            Instr::AddSubImmediate {
                sub,
                set_flags,
                rd,
                rn,
                imm12,
                shift12,
            } => lift_add_sub_imm(sub, set_flags, rd, rn, imm12, shift12),
            Instr::ConditionalCompare { .. } => {
                warn!(
                    addr = instr.addr,
                    raw = instr.raw,
                    "conditional compare lifting is unimplemented: {}",
                    self.disasm(instr, tables)
                );
                vec![Stmt::Unimplemented]
            }
            _ => vec![Stmt::Undefined],
        }
    }

    fn disasm(&self, instr: &DecodedInstr, tables: &SymbolTables) -> String {
        match instr.instr {
            Instr::MoveImmediate {
                kind: MoveWideKind::Keep,
                rd,
                imm16,
                shift,
            } => format!("movk {}, #{imm16:#x}{}", gpr_name(rd), lsl(shift)),
            Instr::MoveImmediate {
                kind,
                rd,
                imm16,
                shift,
            } if prefers_mov_alias(kind, rd.wide, imm16, shift) => format!(
                "mov {}, #{:#x}",
                gpr_name(rd),
                move_wide_value(kind, rd.wide, imm16, shift)
            ),
            Instr::MoveImmediate {
                kind,
                rd,
                imm16,
                shift,
            } => format!(
                "{} {}, #{imm16:#x}{}",
                kind.mnemonic(),
                gpr_name(rd),
                lsl(shift)
            ),
            Instr::MoveRegister { rd, rm } => format!("mov {}, {}", gpr_name(rd), gpr_name(rm)),
            Instr::AddSubImmediate {
                sub,
                set_flags,
                rd,
                rn,
                imm12,
                shift12,
            } => disasm_add_sub_imm(sub, set_flags, rd, rn, imm12, shift12),
            Instr::ConditionalCompare {
                negate,
                rn,
                operand,
                cond,
                nzcv,
            } => {
                let mnemonic = if negate { "ccmn" } else { "ccmp" };
                let operand = match operand {
                    CompareOperand::Imm(imm) => format!("#{imm:#x}"),
                    CompareOperand::Reg(rm) => gpr_name(rm).to_string(),
                };
                format!(
                    "{mnemonic} {}, {operand}, #{nzcv:#x}, {}",
                    gpr_name(rn),
                    tables.condition(cond)
                )
            }
            _ => "<?>".to_string(),
        }
    }
}

fn decode_move_wide(raw: u32) -> Option<Instr> {
    let sf = decode_sf(raw);
    let hw = bits(raw, 22, 21) as u8;
    let kind = match bits(raw, 30, 29) {
        0 => MoveWideKind::Not,
        2 => MoveWideKind::Zero,
        3 => MoveWideKind::Keep,
        _ => return None,
    };
    if !sf && hw >= 2 {
        return None;
    }
    Some(Instr::MoveImmediate {
        kind,
        rd: Gpr::zr_form(decode_rd(raw), sf),
        imm16: decode_imm16(raw),
        shift: hw * 16,
    })
}

fn decode_add_sub_imm(raw: u32) -> Instr {
    let sf = decode_sf(raw);
    let set_flags = bit(raw, 29);
    // Rd is the zero register when setting flags, SP otherwise.
    let rd = if set_flags {
        Gpr::zr_form(decode_rd(raw), sf)
    } else {
        Gpr::sp_form(decode_rd(raw), sf)
    };
    Instr::AddSubImmediate {
        sub: bit(raw, 30),
        set_flags,
        rd,
        rn: Gpr::sp_form(decode_rn(raw), sf),
        imm12: bits(raw, 21, 10) as u16,
        shift12: bit(raw, 22),
    }
}

fn decode_move_register(raw: u32) -> Option<Instr> {
    let sf = decode_sf(raw);
    let opc = bits(raw, 30, 29);
    let shift = bits(raw, 23, 22);
    let negate = bit(raw, 21);
    let imm6 = bits(raw, 15, 10);
    let rn = decode_rn(raw);
    // orr rd, zr, rm
    if opc != 1 || shift != 0 || negate || imm6 != 0 || rn != 31 {
        return None;
    }
    Some(Instr::MoveRegister {
        rd: Gpr::zr_form(decode_rd(raw), sf),
        rm: Gpr::zr_form(decode_rm(raw), sf),
    })
}

fn decode_cond_compare(raw: u32) -> Option<Instr> {
    if bit(raw, 10) || bit(raw, 4) {
        return None;
    }
    let sf = decode_sf(raw);
    let field = decode_rm(raw);
    let operand = if bit(raw, 11) {
        CompareOperand::Imm(field)
    } else {
        CompareOperand::Reg(Gpr::zr_form(field, sf))
    };
    Some(Instr::ConditionalCompare {
        negate: !bit(raw, 30),
        rn: Gpr::zr_form(decode_rn(raw), sf),
        operand,
        cond: Condition(bits(raw, 15, 12) as u8),
        nzcv: bits(raw, 3, 0) as u8,
    })
}

const fn width_mask(wide: bool) -> u64 {
    if wide { u64::MAX } else { 0xFFFF_FFFF }
}

/// Value written by `movz` / `movn`.
const fn move_wide_value(kind: MoveWideKind, wide: bool, imm16: u16, shift: u8) -> u64 {
    let value = (imm16 as u64) << shift;
    match kind {
        MoveWideKind::Not => !value & width_mask(wide),
        _ => value,
    }
}

/// `movz`/`movn` print as `mov` unless the alias would be ambiguous.
const fn prefers_mov_alias(kind: MoveWideKind, wide: bool, imm16: u16, shift: u8) -> bool {
    match kind {
        MoveWideKind::Zero => imm16 != 0 || shift == 0,
        MoveWideKind::Not => (imm16 != 0 || shift == 0) && (wide || imm16 != 0xFFFF),
        MoveWideKind::Keep => false,
    }
}

fn lsl(shift: u8) -> String {
    if shift == 0 {
        String::new()
    } else {
        format!(", lsl #{shift}")
    }
}

fn lift_move_wide(kind: MoveWideKind, rd: Gpr, imm16: u16, shift: u8) -> Vec<Stmt> {
    let size = rd.size();
    let value = match kind {
        MoveWideKind::Keep => {
            let keep = !(0xFFFF_u64 << shift) & width_mask(rd.wide);
            Expr::or(
                Expr::and(rd.read(), Expr::constant(keep, size)),
                Expr::constant(u64::from(imm16) << shift, size),
            )
        }
        _ => Expr::constant(move_wide_value(kind, rd.wide, imm16, shift), size),
    };
    IRBuilder::new().write_reg(rd.reg(), value).build()
}

fn lift_add_sub_imm(
    sub: bool,
    set_flags: bool,
    rd: Gpr,
    rn: Gpr,
    imm12: u16,
    shift12: bool,
) -> Vec<Stmt> {
    let size = rd.size();
    let imm = u64::from(imm12) << if shift12 { 12 } else { 0 };

    // mov to/from sp
    if !sub && !set_flags && imm == 0 {
        return IRBuilder::new().write_reg(rd.reg(), rn.read()).build();
    }

    let operand = rn.read();
    let result = if sub {
        Expr::sub(operand.clone(), Expr::constant(imm, size))
    } else {
        Expr::add(operand.clone(), Expr::constant(imm, size))
    };

    let mut builder = IRBuilder::new();
    if set_flags {
        let zero = || Expr::constant(0, size);
        let (z, c, v) = if sub {
            (
                Expr::cmp_e(operand.clone(), Expr::constant(imm, size)),
                Expr::cmp_uge(operand.clone(), Expr::constant(imm, size)),
                Expr::cmp_slt(operand, result.clone()),
            )
        } else {
            (
                Expr::cmp_e(result.clone(), zero()),
                Expr::cmp_ult(result.clone(), operand.clone()),
                Expr::cmp_slt(result.clone(), operand),
            )
        };
        builder = builder
            .write_flag(FLAG_N, Expr::cmp_slt(result.clone(), zero()))
            .write_flag(FLAG_Z, z)
            .write_flag(FLAG_C, c)
            .write_flag(FLAG_V, v);
    }
    builder.write_reg(rd.reg(), result).build()
}

fn disasm_add_sub_imm(
    sub: bool,
    set_flags: bool,
    rd: Gpr,
    rn: Gpr,
    imm12: u16,
    shift12: bool,
) -> String {
    let shift = if shift12 { ", lsl #12" } else { "" };
    if !sub && !set_flags && imm12 == 0 && !shift12 && (rd.index == 31 || rn.index == 31) {
        return format!("mov {}, {}", gpr_name(rd), gpr_name(rn));
    }
    if set_flags && rd.is_zero() {
        let mnemonic = if sub { "cmp" } else { "cmn" };
        return format!("{mnemonic} {}, #{imm12:#x}{shift}", gpr_name(rn));
    }
    let mnemonic = match (sub, set_flags) {
        (false, false) => "add",
        (false, true) => "adds",
        (true, false) => "sub",
        (true, true) => "subs",
    };
    format!(
        "{mnemonic} {}, {}, #{imm12:#x}{shift}",
        gpr_name(rd),
        gpr_name(rn)
    )
}
