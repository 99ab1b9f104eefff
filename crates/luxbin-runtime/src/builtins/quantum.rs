//! Façade langage du moteur de qubits ([`crate::quantum`]).
//!
//! Une référence de qubit inconnue de la table est traitée comme un opérande
//! mal typé : aucune mutation, valeur par défaut.

use super::arg;
use crate::ctx::ExecCtx;
use crate::quantum::QubitId;
use crate::registry::{Arity, BuiltinFlags, BuiltinFn, Registry};
use crate::value::Value;

pub(super) fn install(reg: &mut Registry) {
    let q = BuiltinFlags::QUANTUM;
    reg.register_all(&[
        ("quantum_superpose", Arity::Variadic, q, quantum_superpose as BuiltinFn),
        ("quantum_measure",   Arity::Fixed(1), q, quantum_measure as BuiltinFn),
        ("quantum_entangle",  Arity::Fixed(2), q, quantum_entangle as BuiltinFn),
        ("quantum_hadamard",  Arity::Fixed(1), q, quantum_hadamard as BuiltinFn),
        ("quantum_cnot",      Arity::Fixed(2), q, quantum_cnot as BuiltinFn),
        ("quantum_phase",     Arity::Fixed(2), q, quantum_phase as BuiltinFn),
        ("quantum_teleport",  Arity::Fixed(2), q, quantum_teleport as BuiltinFn),
    ]);
}

fn qubit(args: &[Value], i: usize) -> Option<QubitId> {
    arg(args, i).as_qubit()
}

// seul le nombre d'arguments compte ; table pleine → nil
fn quantum_superpose(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    ctx.qubits_mut().superpose(args.len()).map_or(Value::Nil, Value::Qubit)
}

fn quantum_measure(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    let Some(id) = qubit(args, 0) else {
        return Value::Int(0);
    };
    let (table, rng) = ctx.qubits_and_rng();
    Value::Int(table.measure(id, rng).map_or(0, i64::from))
}

fn quantum_entangle(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    if let (Some(a), Some(b)) = (qubit(args, 0), qubit(args, 1)) {
        ctx.qubits_mut().entangle(a, b);
    }
    Value::Nil
}

fn quantum_hadamard(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    if let Some(id) = qubit(args, 0) {
        ctx.qubits_mut().hadamard(id);
    }
    arg(args, 0).clone()
}

fn quantum_cnot(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    if let (Some(c), Some(t)) = (qubit(args, 0), qubit(args, 1)) {
        ctx.qubits_mut().cnot(c, t);
    }
    Value::Nil
}

fn quantum_phase(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    if let (Some(id), Some(angle)) = (qubit(args, 0), arg(args, 1).as_f64()) {
        ctx.qubits_mut().phase(id, angle);
    }
    arg(args, 0).clone()
}

fn quantum_teleport(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    let done = match (qubit(args, 0), qubit(args, 1)) {
        (Some(src), Some(dst)) => ctx.qubits_mut().teleport(src, dst),
        _ => false,
    };
    Value::Bool(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::Qubit;
    use pretty_assertions::assert_eq;

    #[test]
    fn superpose_counts_arguments() {
        let mut ctx = ExecCtx::default();
        let q = quantum_superpose(&mut [Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)], &mut ctx);
        let id = q.as_qubit().unwrap();
        let p0 = ctx.qubits().get(id).unwrap().probability_zero();
        assert!((p0 - 0.25).abs() < 1e-12);

        let q = quantum_superpose(&mut [], &mut ctx);
        let p0 = ctx.qubits().get(q.as_qubit().unwrap()).unwrap().probability_zero();
        assert!((p0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ill_typed_operands_are_no_ops() {
        let mut ctx = ExecCtx::default();
        assert_eq!(quantum_measure(&mut [Value::Int(3)], &mut ctx), Value::Int(0));
        assert_eq!(quantum_measure(&mut [Value::Qubit(QubitId::from_u32(42))], &mut ctx), Value::Int(0));
        assert_eq!(quantum_hadamard(&mut [Value::from("q")], &mut ctx), Value::from("q"));
        assert_eq!(quantum_entangle(&mut [Value::Nil, Value::Nil], &mut ctx), Value::Nil);
        assert_eq!(quantum_teleport(&mut [Value::Int(1), Value::Int(2)], &mut ctx), Value::Bool(false));
        assert!(ctx.qubits().is_empty());
    }

    #[test]
    fn phase_ignores_non_numeric_angle() {
        let mut ctx = ExecCtx::default();
        let id = ctx.qubits_mut().alloc(Qubit::one()).unwrap();
        let q = Value::Qubit(id);
        assert_eq!(quantum_phase(&mut [q.clone(), Value::from("pi")], &mut ctx), q);
        assert_eq!(ctx.qubits().get(id), Some(&Qubit::one()));
    }

    #[test]
    fn measure_collapses_basis_states() {
        let mut ctx = ExecCtx::default();
        let one = Value::Qubit(ctx.qubits_mut().alloc(Qubit::one()).unwrap());
        assert_eq!(quantum_measure(&mut [one.clone()], &mut ctx), Value::Int(1));
        assert_eq!(quantum_measure(&mut [one], &mut ctx), Value::Int(1));
    }
}
