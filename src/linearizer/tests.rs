//! Unit tests for linearization.
//!
//! This module contains tests for address assignment and label patching:
//! - Default and custom layouts
//! - Label markers holding addresses without rendering
//! - Jump target resolution
//! - Error cases

use super::linearizer::{linearize, Layout};
use crate::codegen::ir::{Atom, CmpOp, Expr, Instruction, Label, PrintArg, Target};

fn label(name: &str) -> Label {
    Label(name.to_string())
}

fn assign(target: &str, value: i64) -> Instruction {
    Instruction::Assign {
        target: target.to_string(),
        value: Expr::Atom(Atom::Number(value)),
    }
}

#[test]
fn test_default_layout_addresses() {
    let stream = vec![assign("x", 5), Instruction::Halt];
    let program = linearize(&stream, Layout::default()).unwrap();

    assert_eq!(program.lines[0].0, 10);
    assert_eq!(program.lines[1].0, 20);
    assert_eq!(program.to_source(), "10 x = 5\n20 STOP");
}

#[test]
fn test_custom_layout_addresses() {
    let stream = vec![assign("x", 1), assign("y", 2), Instruction::Halt];
    let program = linearize(&stream, Layout { start: 100, step: 5 }).unwrap();

    let addresses: Vec<u32> = program.lines.iter().map(|(a, _)| *a).collect();
    assert_eq!(addresses, vec![100, 105, 110]);
}

#[test]
fn test_markers_hold_addresses_but_do_not_render() {
    let stream = vec![
        assign("x", 1),
        Instruction::Label(label("T0001")),
        Instruction::Print(PrintArg::Atom(Atom::Var("x".to_string()))),
    ];
    let program = linearize(&stream, Layout::default()).unwrap();

    assert_eq!(program.address_of("T0001"), Some(20));
    // The marker keeps line 20; the rendered listing skips straight over it.
    assert_eq!(program.to_source(), "10 x = 1\n30 PRINT x");
}

#[test]
fn test_jump_targets_resolve_to_addresses() {
    let stream = vec![
        Instruction::IfGoto {
            left: Expr::Atom(Atom::Var("x".to_string())),
            cmp: CmpOp::Eq,
            right: Expr::Atom(Atom::Number(0)),
            target: Target::Label(label("T0001")),
        },
        Instruction::Goto(Target::Label(label("X0002"))),
        Instruction::Label(label("T0001")),
        Instruction::Halt,
        Instruction::Label(label("X0002")),
    ];
    let program = linearize(&stream, Layout::default()).unwrap();

    assert_eq!(
        program.lines[0].1,
        Instruction::IfGoto {
            left: Expr::Atom(Atom::Var("x".to_string())),
            cmp: CmpOp::Eq,
            right: Expr::Atom(Atom::Number(0)),
            target: Target::Address(30),
        }
    );
    assert_eq!(program.lines[1].1, Instruction::Goto(Target::Address(50)));
    assert_eq!(
        program.to_source(),
        "10 IF x = 0 THEN 30\n20 GOTO 50\n40 STOP"
    );
}

#[test]
fn test_relinearization_is_stable() {
    let stream = vec![
        Instruction::Goto(Target::Label(label("T0001"))),
        Instruction::Label(label("T0001")),
        Instruction::Halt,
    ];
    let program = linearize(&stream, Layout::default()).unwrap();

    let patched: Vec<Instruction> = program.lines.iter().map(|(_, i)| i.clone()).collect();
    let again = linearize(&patched, Layout::default()).unwrap();

    assert_eq!(program.lines, again.lines);
}

#[test]
fn test_unresolved_label_is_rejected() {
    let stream = vec![Instruction::Goto(Target::Label(label("T9999")))];
    let error = linearize(&stream, Layout::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnresolvedLabel");
}

#[test]
fn test_zero_step_is_rejected() {
    let error = linearize(&[Instruction::Halt], Layout { start: 10, step: 0 }).unwrap_err();

    assert_eq!(error.get_error_name(), "InternalFault");
}

#[test]
fn test_surviving_call_is_rejected() {
    let stream = vec![Instruction::Call {
        name: "p".to_string(),
        args: vec![],
    }];
    let error = linearize(&stream, Layout::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "InternalFault");
}

#[test]
fn test_string_rendering_quotes_text() {
    let stream = vec![Instruction::Print(PrintArg::Text("done".to_string()))];
    let program = linearize(&stream, Layout::default()).unwrap();

    assert_eq!(program.to_source(), "10 PRINT \"done\"");
}
