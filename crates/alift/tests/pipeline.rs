//! Integration tests for the lifting pipeline.

use alift::oracle::{golden_pipeline, instr_to_il};
use alift::{Error, LiftConfig, Pipeline, SerializeOptions, optimize_function, parse_hex};

fn lift(hex: &str) -> String {
    let bytes = parse_hex(hex).unwrap();
    instr_to_il(&golden_pipeline(), &bytes).unwrap()
}

#[test]
fn test_truncated_lengths_rejected() {
    let pipeline = Pipeline::default();
    for hex in ["", "1f", "1f20", "1f2003", "1f2003d5c0", "1f2003d5c0035f"] {
        let bytes = parse_hex(hex).unwrap();
        let err = pipeline.lift_function(&bytes).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedInput { len } if len == bytes.len()),
            "{hex}: {err}"
        );
    }
}

#[test]
fn test_optimizer_idempotent() {
    // mov x0, x0; mov w10, #0; cmp w1, #18; mov x0, x0; ret
    let bytes = parse_hex("e00300aa 0a008052 3f480071 e00300aa c0035fd6").unwrap();
    let mut once = Pipeline::new(LiftConfig::new().with_optimize(false))
        .lift_function(&bytes)
        .unwrap();
    let removed = optimize_function(&mut once);
    assert_eq!(removed, 2);
    let mut twice = once.clone();
    assert_eq!(optimize_function(&mut twice), 0);
    assert_eq!(once, twice);
}

#[test]
fn test_self_move_removed() {
    assert_eq!(lift("e00300aa"), "");
}

#[test]
fn test_overwritten_write_removed() {
    // movz w10, #5; mov w10, #0
    assert_eq!(
        lift("aa008052 0a008052"),
        "LLIL_SET_REG(w10,LLIL_CONST(0))"
    );
}

#[test]
fn test_compare_flags_retained() {
    let text = lift("3f480071");
    assert!(text.starts_with("LLIL_SET_FLAG(n,"));
    assert_eq!(text.matches("LLIL_SET_FLAG(").count(), 4);
    assert!(!text.contains("SET_REG"));
}

#[test]
fn test_conditional_compare_unimplemented() {
    // ccmp w6, #0x12, #0x1, mi
    assert_eq!(lift("c148527a"), "LLIL_UNIMPL()");
}

#[test]
fn test_undefined_word() {
    assert_eq!(lift("00000000"), "LLIL_UNDEF()");
}

#[test]
fn test_uncurated_hint() {
    // hint #0x7f
    assert_eq!(
        lift("ff2f03d5"),
        "LLIL_INTRINSIC([],SystemHintOp_HINT_127,LLIL_CALL_PARAM([]))"
    );
}

#[test]
fn test_default_dialect_has_no_prefix() {
    let pipeline = Pipeline::new(LiftConfig::new().with_serialize_options(SerializeOptions::default()));
    let text = instr_to_il(&pipeline, &parse_hex("bf3f03d5").unwrap()).unwrap();
    assert_eq!(text, "INTRINSIC([],__dmb,CALL_PARAM([]))");
}

#[test]
fn test_disassemble_listing() {
    let pipeline = Pipeline::new(LiftConfig::new().with_base(0x1000));
    let lines = pipeline
        .disassemble(&parse_hex("00c01ed5 c0035fd6").unwrap())
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0x00001000  d51ec000  sysreg"));
    assert!(lines[0].ends_with("msr vbar_el3, x0"));
    assert!(lines[1].ends_with("ret"));
}
