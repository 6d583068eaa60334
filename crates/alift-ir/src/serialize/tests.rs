use super::*;
use crate::reg::{Flag, Reg};
use crate::stmt::CallParams;

fn x0() -> Reg {
    Reg::new("x0", 8)
}

fn w10() -> Reg {
    Reg::sub("w10", 4, "x10")
}

#[test]
fn test_set_reg_const() {
    let stmt = Stmt::set_reg(w10(), Expr::constant(0, 4));
    assert_eq!(serialize_stmt(&stmt), "SET_REG(w10,CONST(0))");
}

#[test]
fn test_intrinsic_no_params() {
    let stmt = Stmt::intrinsic(Vec::new(), "__dmb", CallParams::empty());
    assert_eq!(serialize_stmt(&stmt), "INTRINSIC([],__dmb,CALL_PARAM([]))");
}

#[test]
fn test_intrinsic_write_status_reg() {
    let stmt = Stmt::intrinsic(
        vec![Reg::new("vbar_el3", 8)],
        "_WriteStatusReg",
        CallParams::one(Expr::reg(x0())),
    );
    assert_eq!(
        serialize_stmt(&stmt),
        "INTRINSIC([vbar_el3],_WriteStatusReg,CALL_PARAM([<il: x0>]))"
    );
}

#[test]
fn test_intrinsic_read_status_reg() {
    let stmt = Stmt::intrinsic(
        vec![x0()],
        "_ReadStatusReg",
        CallParams::one(Expr::sysreg("sctlr_el3")),
    );
    assert_eq!(
        serialize_stmt(&stmt),
        "INTRINSIC([x0],_ReadStatusReg,CALL_PARAM([<il: sctlr_el3>]))"
    );
}

#[test]
fn test_intrinsic_multiple_params() {
    let stmt = Stmt::intrinsic(
        vec![x0(), Reg::new("x1", 8)],
        "__pair",
        CallParams(vec![Expr::constant(4, 8), Expr::constant(32, 8)]),
    );
    assert_eq!(
        serialize_stmt(&stmt),
        "INTRINSIC([x0,x1],__pair,CALL_PARAM([<il: 4>,<il: 0x20>]))"
    );
}

#[test]
fn test_control_flow_nodes() {
    let cond = Stmt::If {
        cond: Expr::flag(Flag::new("n")),
        then_target: 1,
        else_target: 3,
    };
    assert_eq!(serialize_stmt(&cond), "IF(FLAG(n),1,3)");
    assert_eq!(serialize_stmt(&Stmt::Goto(8)), "GOTO(8)");
    assert_eq!(
        serialize_stmt(&Stmt::Ret(Expr::reg(Reg::new("x30", 8)))),
        "RET(REG(x30))"
    );
    assert_eq!(
        serialize_stmt(&Stmt::Call(Expr::const_ptr(0x40))),
        "CALL(CONST_PTR(64))"
    );
    assert_eq!(serialize_stmt(&Stmt::Trap(1)), "TRAP(1)");
    assert_eq!(serialize_stmt(&Stmt::Undefined), "UNDEF()");
    assert_eq!(serialize_stmt(&Stmt::Unimplemented), "UNIMPL()");
}

#[test]
fn test_arithmetic_and_flags() {
    let w6 = Reg::sub("w6", 4, "x6");
    let sub = Expr::sub(Expr::reg(w6), Expr::constant(18, 4));
    assert_eq!(serialize_expr(&sub), "SUB(REG(w6),CONST(18))");
    assert_eq!(
        serialize_stmt(&Stmt::Eval(sub.clone())),
        "SUB(REG(w6),CONST(18))"
    );
    let flag = Stmt::set_flag(Flag::new("v"), Expr::constant(1, 0));
    assert_eq!(serialize_stmt(&flag), "SET_FLAG(v,CONST(1))");
    let z = Stmt::set_flag(Flag::new("z"), Expr::cmp_e(sub, Expr::constant(0, 4)));
    assert_eq!(
        serialize_stmt(&z),
        "SET_FLAG(z,CMP_E(SUB(REG(w6),CONST(18)),CONST(0)))"
    );
}

#[test]
fn test_block_join_and_prefix() {
    let mut block = BasicBlock::new(0);
    block.push(Stmt::set_reg(
        Reg::new("syscall_imm", 8),
        Expr::constant(0, 8),
    ));
    block.push(Stmt::Syscall);

    assert_eq!(
        serialize_block(&block, &SerializeOptions::default()),
        "SET_REG(syscall_imm,CONST(0)); SYSCALL()"
    );
    assert_eq!(
        serialize_block(&block, &SerializeOptions::llil()),
        "LLIL_SET_REG(syscall_imm,LLIL_CONST(0)); LLIL_SYSCALL()"
    );
}

#[test]
fn test_empty_block_is_empty_string() {
    let block = BasicBlock::new(0);
    assert_eq!(serialize_block(&block, &SerializeOptions::default()), "");
}

#[test]
fn test_function_spans_blocks() {
    let mut func = Function::new(0);
    let mut first = BasicBlock::new(0);
    first.push_instr(4, [Stmt::Jump(Expr::const_ptr(8))]);
    let mut second = BasicBlock::new(8);
    second.push_instr(4, [Stmt::Ret(Expr::reg(Reg::new("x30", 8)))]);
    func.blocks.push(first);
    func.blocks.push(second);

    assert_eq!(
        serialize_function(&func, &SerializeOptions::default()),
        "JUMP(CONST_PTR(8)); RET(REG(x30))"
    );
}

#[test]
fn test_structurally_equal_trees_serialize_identically() {
    let build = || {
        Stmt::intrinsic(
            vec![Reg::named(String::from("daifclr"), 8)],
            "_WriteStatusReg",
            CallParams::one(Expr::constant(4, 8)),
        )
    };
    let a = build();
    let b = build();
    assert_eq!(a, b);
    assert_eq!(serialize_stmt(&a), serialize_stmt(&b));
    assert_eq!(
        serialize_stmt(&a),
        "INTRINSIC([daifclr],_WriteStatusReg,CALL_PARAM([<il: 4>]))"
    );
}
