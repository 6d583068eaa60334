//! Golden-output oracle.
//!
//! Each case is a little-endian byte string lifted as a pretend function
//! terminated by `ret`. The expected text is everything before the first
//! `RET(REG(x30))`, with a trailing `"; "` trimmed. Golden strings use the
//! `LLIL_` dialect.

use alift_ir::{Expr, SerializeOptions, Serializer, Stmt};
use alift_isa::link_register;
use rayon::prelude::*;

use crate::hex::{parse_hex, to_hex};
use crate::pipeline::{LiftConfig, Pipeline};
use crate::{Error, Result};

/// `ret` (`c0 03 5f d6`).
pub const RET_BYTES: [u8; 4] = [0xc0, 0x03, 0x5f, 0xd6];

/// One golden case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoldenCase {
    /// Hex bytes of the instructions, without the trailing `ret`.
    pub input: &'static str,
    /// Expected text.
    pub expected: &'static str,
    /// Assembly of the input.
    pub note: &'static str,
}

const fn case(input: &'static str, expected: &'static str, note: &'static str) -> GoldenCase {
    GoldenCase {
        input,
        expected,
        note,
    }
}

const SYSCALL_0: &str = "LLIL_SET_REG(syscall_imm,LLIL_CONST(0)); LLIL_SYSCALL()";
const SYSCALL_1: &str = "LLIL_SET_REG(syscall_imm,LLIL_CONST(1)); LLIL_SYSCALL()";
const SYSCALL_2: &str = "LLIL_SET_REG(syscall_imm,LLIL_CONST(2)); LLIL_SYSCALL()";
const SYSCALL_3: &str = "LLIL_SET_REG(syscall_imm,LLIL_CONST(3)); LLIL_SYSCALL()";
const DMB: &str = "LLIL_INTRINSIC([],__dmb,LLIL_CALL_PARAM([]))";
const DSB: &str = "LLIL_INTRINSIC([],__dsb,LLIL_CALL_PARAM([]))";
const ISB: &str = "LLIL_INTRINSIC([],__isb,LLIL_CALL_PARAM([]))";
const CMP_W1_18: &str = "LLIL_SET_FLAG(n,LLIL_CMP_SLT(LLIL_SUB(LLIL_REG(w1),LLIL_CONST(18)),LLIL_CONST(0))); \
LLIL_SET_FLAG(z,LLIL_CMP_E(LLIL_REG(w1),LLIL_CONST(18))); \
LLIL_SET_FLAG(c,LLIL_CMP_UGE(LLIL_REG(w1),LLIL_CONST(18))); \
LLIL_SET_FLAG(v,LLIL_CMP_SLT(LLIL_REG(w1),LLIL_SUB(LLIL_REG(w1),LLIL_CONST(18))))";

/// Built-in golden table.
pub const GOLDEN_CASES: &[GoldenCase] = &[
    case("010000d4c0035fd6", SYSCALL_0, "svc #0; ret"),
    case("210000d4c0035fd6", SYSCALL_1, "svc #1; ret"),
    case("410000d4c0035fd6", SYSCALL_2, "svc #2; ret"),
    case("610000d4c0035fd6", SYSCALL_3, "svc #3; ret"),
    case("bf3f03d5", DMB, "dmb sy"),
    case("bf3e03d5", DMB, "dmb st"),
    case("bf3a03d5", DMB, "dmb ishst"),
    case("9f3f03d5", DSB, "dsb sy"),
    case("9f3e03d5", DSB, "dsb st"),
    case("9f3a03d5", DSB, "dsb ishst"),
    case("df3f03d5", ISB, "isb"),
    case(
        "1f2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_NOP,LLIL_CALL_PARAM([]))",
        "hint #0x0",
    ),
    case(
        "3f2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_YIELD,LLIL_CALL_PARAM([]))",
        "hint #0x1",
    ),
    case(
        "5f2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_WFE,LLIL_CALL_PARAM([]))",
        "hint #0x2",
    ),
    case(
        "7f2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_WFI,LLIL_CALL_PARAM([]))",
        "hint #0x3",
    ),
    case(
        "9f2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_SEV,LLIL_CALL_PARAM([]))",
        "sev",
    ),
    case(
        "bf2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_SEVL,LLIL_CALL_PARAM([]))",
        "hint #0x5",
    ),
    case(
        "df2003d5",
        "LLIL_INTRINSIC([],SystemHintOp_DGH,LLIL_CALL_PARAM([]))",
        "hint #0x6",
    ),
    case(
        "1f2203d5",
        "LLIL_INTRINSIC([],SystemHintOp_ESB,LLIL_CALL_PARAM([]))",
        "hint #0x10",
    ),
    case(
        "3f2203d5",
        "LLIL_INTRINSIC([],SystemHintOp_PSB,LLIL_CALL_PARAM([]))",
        "hint #0x11",
    ),
    case(
        "5f2203d5",
        "LLIL_INTRINSIC([],SystemHintOp_TSB,LLIL_CALL_PARAM([]))",
        "hint #0x12",
    ),
    case(
        "9f2203d5",
        "LLIL_INTRINSIC([],SystemHintOp_CSDB,LLIL_CALL_PARAM([]))",
        "hint #0x14",
    ),
    case(
        "5f2403d5",
        "LLIL_INTRINSIC([],SystemHintOp_BTI,LLIL_CALL_PARAM([]))",
        "hint #0x22",
    ),
    case(
        "00c01ed5",
        "LLIL_INTRINSIC([vbar_el3],_WriteStatusReg,LLIL_CALL_PARAM([<il: x0>]))",
        "msr vbar_el3, x0",
    ),
    case(
        "00101ed5",
        "LLIL_INTRINSIC([sctlr_el3],_WriteStatusReg,LLIL_CALL_PARAM([<il: x0>]))",
        "msr sctlr_el3, x0",
    ),
    case(
        "ff4403d5",
        "LLIL_INTRINSIC([daifclr],_WriteStatusReg,LLIL_CALL_PARAM([<il: 4>]))",
        "msr daifclr, #0x4",
    ),
    case(
        "00103ed5",
        "LLIL_INTRINSIC([x0],_ReadStatusReg,LLIL_CALL_PARAM([<il: sctlr_el3>]))",
        "mrs x0, sctlr_el3",
    ),
    case("0a008052", "LLIL_SET_REG(w10,LLIL_CONST(0))", "mov w10, #0"),
    case("ea031f2a", "LLIL_SET_REG(w10,LLIL_CONST(0))", "mov w10, wzr"),
    case("e00300aa", "", "mov x0, x0 (removed as dead)"),
    case("3f480071", CMP_W1_18, "cmp w1, #18"),
];

/// Pipeline configured for the golden table: optimized, `LLIL_` dialect.
#[must_use]
pub fn golden_pipeline() -> Pipeline<'static> {
    Pipeline::new(LiftConfig::new().with_serialize_options(SerializeOptions::llil()))
}

/// Lift `data` followed by `ret` and return the text before the return.
pub fn instr_to_il(pipeline: &Pipeline<'_>, data: &[u8]) -> Result<String> {
    let mut bytes = Vec::with_capacity(data.len() + RET_BYTES.len());
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(&RET_BYTES);

    let text = pipeline.lift_to_string(&bytes)?;
    let ret = Serializer::new(&pipeline.config().serialize)
        .stmt(&Stmt::Ret(Expr::reg(link_register())));

    let end = match text.find(&ret) {
        Some(end) if text.ends_with(&ret) => end,
        _ => {
            return Err(Error::MissingReturn {
                input: to_hex(data),
                actual: text,
            });
        }
    };
    let head = &text[..end];
    Ok(head.strip_suffix("; ").unwrap_or(head).to_string())
}

/// Result of running one golden case.
#[derive(Clone, Debug)]
pub struct CaseOutcome {
    pub case: GoldenCase,
    /// Oracle text, or the error message.
    pub actual: std::result::Result<String, String>,
}

impl CaseOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.actual.as_deref() == Ok(self.case.expected)
    }

    /// Actual text or error, for reports.
    #[must_use]
    pub fn actual_text(&self) -> &str {
        match &self.actual {
            Ok(text) | Err(text) => text,
        }
    }
}

/// Run one golden case.
#[must_use]
pub fn run_case(pipeline: &Pipeline<'_>, case: GoldenCase) -> CaseOutcome {
    let actual = parse_hex(case.input)
        .and_then(|data| instr_to_il(pipeline, &data))
        .map_err(|err| err.to_string());
    CaseOutcome { case, actual }
}

/// Run every golden case in parallel, preserving table order.
#[must_use]
pub fn run_golden(pipeline: &Pipeline<'_>) -> Vec<CaseOutcome> {
    GOLDEN_CASES
        .par_iter()
        .map(|case| run_case(pipeline, *case))
        .collect()
}
