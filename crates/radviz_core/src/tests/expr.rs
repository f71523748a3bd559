//! Tests for specification expressions
//!
//! These tests verify:
//! - Parameter references are substituted with the model's values
//! - Compiled functions agree with the same formula evaluated directly
//! - Signatures restrict which arguments a function may use
//! - Specification files require all four functions

use crate::error::SpecError;
use crate::expr::{Argument, Arguments, ExprError, compile};
use crate::model::{Function, FunctionKind, Specification};

use super::fixtures::{SOLVER_FNCS, parameters};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_display_substitutes_parameters() {
    let compiled = compile(" (1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))", &parameters()).unwrap();
    assert_eq!(compiled.display, "(1.0 - (1.0 - 0.9*r)*exp(-s))");
}

#[test]
fn test_radt_matches_direct_evaluation() {
    let p = parameters();
    let radt = Function::compile(
        FunctionKind::Radt,
        "(1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))",
        &p,
    )
    .unwrap();

    for (r, s) in [(0.0_f64, 0.0_f64), (0.25, 0.5), (1.0, 2.0)] {
        let expected = 1.0 - (1.0 - p.delta * r) * (-s).exp();
        assert_close(radt.call(&[r, s]).unwrap(), expected);
    }
}

#[test]
fn test_solver_specification_evaluates_every_function() {
    let p = parameters();
    let spec = Specification::parse(SOLVER_FNCS, &p).unwrap();
    let (q, r, s, x): (f64, f64, f64, f64) = (0.4, 0.3, 0.7, 2.0);

    let radt = 1.0 - (1.0 - p.delta * r) * (-s).exp();
    assert_close(spec.radt(r, s), radt);
    assert_close(spec.util(q, r, s), radt * (1.0 - (-q).exp()));
    assert_close(
        spec.cost(r, s),
        ((p.alpha * s).exp() - 1.0) * (1.0 - p.gamma * radt),
    );
    assert_close(spec.wltt(q, r, s, x), p.r * (x - radt * q));
}

#[test]
fn test_bare_names_and_extra_functions() {
    let p = parameters();
    let compiled = compile("pow(x, 2) + sqrt(abs(-q)) / alpha - log(exp(R))", &p).unwrap();
    let args = Arguments {
        q: 4.0,
        x: 3.0,
        ..Default::default()
    };
    assert_close(compiled.expr.eval(&args), 9.0 + 2.0 / p.alpha - p.r);
    assert_eq!(compiled.display, "pow(x, 2) + sqrt(abs(-q)) / 2.0 - log(exp(1.25))");
}

#[test]
fn test_unknown_symbols_are_rejected() {
    let p = parameters();
    assert_eq!(
        compile("v->m->kappa * v->r", &p).unwrap_err(),
        ExprError::UnknownSymbol("v->m->kappa".to_string())
    );
    assert_eq!(
        compile("sin(v->r)", &p).unwrap_err(),
        ExprError::UnknownFunction("sin".to_string())
    );
    assert!(matches!(
        compile("exp(v->r, v->s)", &p).unwrap_err(),
        ExprError::ArgumentCount { expected: 1, found: 2, .. }
    ));
    assert!(matches!(
        compile("(v->r + 1.0", &p).unwrap_err(),
        ExprError::UnexpectedEnd { .. }
    ));
}

#[test]
fn test_signature_rejects_foreign_arguments() {
    let err = Function::compile(FunctionKind::Cost, "v->q * v->s", &parameters()).unwrap_err();
    match err {
        ExprError::UnboundArgument {
            argument,
            function,
            signature,
        } => {
            assert_eq!(argument, Argument::Q);
            assert_eq!(function, "cost");
            assert_eq!(signature, "r, s");
        }
        other => panic!("expected unbound argument, got {other:?}"),
    }
}

#[test]
fn test_call_checks_arity() {
    let spec = Specification::parse(SOLVER_FNCS, &parameters()).unwrap();
    let wltt = spec.function(FunctionKind::Wltt);
    assert!(matches!(
        wltt.call(&[1.0, 2.0]),
        Err(ExprError::ArgumentCount { expected: 4, found: 2, .. })
    ));
    assert_close(wltt.call(&[0.0, 0.0, 0.0, 2.0]).unwrap(), 1.25 * 2.0);
}

#[test]
fn test_missing_function_is_reported() {
    let text = SOLVER_FNCS
        .lines()
        .filter(|line| !line.starts_with("wltt"))
        .collect::<Vec<_>>()
        .join("\n");
    match Specification::parse(&text, &parameters()) {
        Err(SpecError::MissingFunction(kind)) => assert_eq!(kind, FunctionKind::Wltt),
        other => panic!("expected missing function, got {other:?}"),
    }
}

#[test]
fn test_file_string_reparses() {
    let p = parameters();
    let spec = Specification::parse(SOLVER_FNCS, &p).unwrap();
    let text = spec.to_file_string();
    assert!(text.starts_with("util = ((1.0 - (1.0 - v->m->delta*v->r)"));
    assert_eq!(Specification::parse(&text, &p).unwrap(), spec);
}
