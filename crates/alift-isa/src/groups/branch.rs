//! Exception generation and unconditional branches - decode, lift, disasm.

use alift_ir::{CallParams, Expr, IRBuilder, Stmt};

use super::InstructionGroup;
use crate::decode::DecodedInstr;
use crate::encode::{bit, bits, decode_imm16, decode_rn, sign_extend};
use crate::regs::{gpr_name, syscall_imm};
use crate::tables::SymbolTables;
use crate::types::{ExceptionKind, Gpr, Instr};

/// Exception generation: `bits[31:24] == 0xD4`.
const EXCEPTION_CLASS: u32 = 0xD4;
/// Unconditional branch (immediate): `bits[30:26] == 0b00101`.
const BRANCH_IMM_CLASS: u32 = 0b00101;
/// Unconditional branch (register): `bits[31:25] == 0b1101011`.
const BRANCH_REG_CLASS: u32 = 0b110_1011;

/// Branch and exception instruction group.
pub struct BranchGroup;

impl InstructionGroup for BranchGroup {
    fn name(&self) -> &'static str {
        "branch"
    }

    fn decode32(&self, raw: u32) -> Option<Instr> {
        if bits(raw, 31, 24) == EXCEPTION_CLASS {
            return decode_exception(raw);
        }
        if bits(raw, 30, 26) == BRANCH_IMM_CLASS {
            return Some(Instr::Branch {
                link: bit(raw, 31),
                offset: sign_extend(bits(raw, 25, 0), 26) << 2,
            });
        }
        if bits(raw, 31, 25) == BRANCH_REG_CLASS {
            return decode_branch_reg(raw);
        }
        None
    }

    fn handles(&self, instr: &Instr) -> bool {
        matches!(
            instr,
            Instr::Syscall { .. }
                | Instr::Exception { .. }
                | Instr::Branch { .. }
                | Instr::BranchRegister { .. }
                | Instr::Return { .. }
        )
    }

    fn lift(&self, instr: &DecodedInstr, _tables: &SymbolTables) -> Vec<Stmt> {
        match instr.instr {
            Instr::Syscall { imm } => IRBuilder::new()
                .write_reg(Some(syscall_imm()), Expr::constant(u64::from(imm), 4))
                .syscall()
                .build(),
            Instr::Exception {
                kind: ExceptionKind::Brk,
                imm,
            } => vec![Stmt::Trap(u64::from(imm))],
            Instr::Exception { kind, imm } => IRBuilder::new()
                .intrinsic(
                    Vec::new(),
                    exception_intrinsic(kind),
                    CallParams::one(Expr::constant(u64::from(imm), 4)),
                )
                .build(),
            Instr::Branch { link, offset } => {
                let target = Expr::const_ptr(instr.addr.wrapping_add_signed(offset));
                if link {
                    IRBuilder::new().call(target).build()
                } else {
                    IRBuilder::new().jump(target).build()
                }
            }
            Instr::BranchRegister { link: true, rn } => IRBuilder::new().call(rn.read()).build(),
            Instr::BranchRegister { link: false, rn } => IRBuilder::new().jump(rn.read()).build(),
            Instr::Return { rn } => IRBuilder::new().ret(rn.read()).build(),
            _ => vec![Stmt::Undefined],
        }
    }

    fn disasm(&self, instr: &DecodedInstr, _tables: &SymbolTables) -> String {
        match instr.instr {
            Instr::Syscall { imm } => format!("svc #{imm:#x}"),
            Instr::Exception { kind, imm } => format!("{} #{imm:#x}", kind.mnemonic()),
            Instr::Branch { link, offset } => {
                let mnemonic = if link { "bl" } else { "b" };
                format!("{mnemonic} {:#x}", instr.addr.wrapping_add_signed(offset))
            }
            Instr::BranchRegister { link, rn } => {
                let mnemonic = if link { "blr" } else { "br" };
                format!("{mnemonic} {}", gpr_name(rn))
            }
            Instr::Return { rn } if rn.index == 30 => "ret".to_string(),
            Instr::Return { rn } => format!("ret {}", gpr_name(rn)),
            _ => "<?>".to_string(),
        }
    }
}

fn decode_exception(raw: u32) -> Option<Instr> {
    let opc = bits(raw, 23, 21);
    let op2 = bits(raw, 4, 2);
    let ll = bits(raw, 1, 0);
    let imm = decode_imm16(raw);
    if op2 != 0 {
        return None;
    }
    let kind = match (opc, ll) {
        (0, 1) => return Some(Instr::Syscall { imm }),
        (0, 2) => ExceptionKind::Hvc,
        (0, 3) => ExceptionKind::Smc,
        (1, 0) => ExceptionKind::Brk,
        _ => return None,
    };
    Some(Instr::Exception { kind, imm })
}

fn decode_branch_reg(raw: u32) -> Option<Instr> {
    let opc = bits(raw, 24, 21);
    let op2 = bits(raw, 20, 16);
    let op3 = bits(raw, 15, 10);
    let op4 = bits(raw, 4, 0);
    if op2 != 0x1F || op3 != 0 || op4 != 0 {
        return None;
    }
    let rn = Gpr::zr_form(decode_rn(raw), true);
    match opc {
        0 => Some(Instr::BranchRegister { link: false, rn }),
        1 => Some(Instr::BranchRegister { link: true, rn }),
        2 => Some(Instr::Return { rn }),
        _ => None,
    }
}

const fn exception_intrinsic(kind: ExceptionKind) -> &'static str {
    match kind {
        ExceptionKind::Hvc => "__hvc",
        ExceptionKind::Smc => "__smc",
        ExceptionKind::Brk => "__brk",
    }
}
