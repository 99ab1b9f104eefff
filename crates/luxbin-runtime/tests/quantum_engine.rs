//! Moteur de qubits vu depuis le langage.

use luxbin_runtime::prelude::*;
use num_complex::Complex64;
use pretty_assertions::assert_eq;

const EPS: f64 = 1e-9;

fn seeded(seed: u64) -> Runtime {
    Runtime::standard(RuntimeConfig::default().with_seed(seed).with_echo(false))
}

fn id_of(v: &Value) -> QubitId {
    v.as_qubit().expect("qubit attendu")
}

fn state(rt: &Runtime, q: &Value) -> [Complex64; 2] {
    rt.ctx().qubits().state(id_of(q)).expect("qubit inconnu")
}

fn close(a: [Complex64; 2], b: [Complex64; 2]) -> bool {
    (a[0] - b[0]).norm() < EPS && (a[1] - b[1]).norm() < EPS
}

#[test]
fn fair_superposition_measures_half_ones() {
    let mut rt = seeded(2024);
    let trials = 10_000;
    let mut ones = 0;
    for _ in 0..trials {
        let q = rt.call("quantum_superpose", vec![]).unwrap();
        if rt.call("quantum_measure", vec![q]).unwrap() == Value::Int(1) {
            ones += 1;
        }
    }
    assert!((4_500..=5_500).contains(&ones), "{ones} issues 1 sur {trials}");
}

#[test]
fn measurement_is_sticky() {
    let mut rt = seeded(9);
    for _ in 0..50 {
        let q = rt.call("quantum_superpose", vec![Value::Int(0), Value::Int(1)]).unwrap();
        let first = rt.call("quantum_measure", vec![q.clone()]).unwrap();
        let second = rt.call("quantum_measure", vec![q.clone()]).unwrap();
        assert_eq!(first, second);
        let expected = if first == Value::Int(0) { Qubit::zero().state } else { Qubit::one().state };
        assert_eq!(state(&rt, &q), expected);
    }
}

#[test]
fn hadamard_is_an_involution() {
    let mut rt = seeded(1);
    let q = rt.call("quantum_superpose", vec![Value::Int(1), Value::Int(2), Value::Int(3)]).unwrap();
    rt.call("quantum_phase", vec![q.clone(), Value::Float(0.3)]).unwrap();
    let before = state(&rt, &q);
    let out = rt.call("quantum_hadamard", vec![q.clone()]).unwrap();
    assert_eq!(out, q);
    rt.call("quantum_hadamard", vec![q.clone()]).unwrap();
    assert!(close(state(&rt, &q), before));
}

#[test]
fn hadamard_twice_restores_basis_zero() {
    let mut rt = seeded(1);
    let q = rt.call("quantum_superpose", vec![]).unwrap();
    rt.ctx_mut().qubits_mut().get_mut(id_of(&q)).unwrap().state = Qubit::zero().state;
    rt.call("quantum_hadamard", vec![q.clone()]).unwrap();
    rt.call("quantum_hadamard", vec![q.clone()]).unwrap();
    // 1/√2 · 1/√2 · 2 ne retombe pas exactement sur 1
    let [a0, a1] = state(&rt, &q);
    assert!((a0.re - 1.0).abs() < EPS && a0.im.abs() < EPS);
    assert!(a1.norm() < EPS);
    assert!(close([a0, a1], Qubit::zero().state));
}

#[test]
fn foreign_context_ids_are_ill_typed() {
    let reg = Registry::standard();
    let superpose = reg.resolve("quantum_superpose").unwrap();
    let ghost = reg.invoke_detached(superpose, &mut []).unwrap();
    assert!(matches!(ghost, Value::Qubit(_)));

    let mut rt = seeded(1);
    let mine = rt.call("quantum_superpose", vec![]).unwrap();
    assert_eq!(id_of(&mine).to_u32(), id_of(&ghost).to_u32());
    rt.ctx_mut().qubits_mut().get_mut(id_of(&mine)).unwrap().state = Qubit::one().state;

    assert_eq!(rt.call("quantum_teleport", vec![mine.clone(), ghost.clone()]), Ok(Value::Bool(false)));
    assert_eq!(rt.call("quantum_teleport", vec![ghost.clone(), mine.clone()]), Ok(Value::Bool(false)));
    rt.call("quantum_hadamard", vec![ghost.clone()]).unwrap();
    rt.call("quantum_cnot", vec![ghost.clone(), mine.clone()]).unwrap();
    rt.call("quantum_entangle", vec![mine.clone(), ghost.clone()]).unwrap();
    assert_eq!(rt.call("quantum_measure", vec![ghost]), Ok(Value::Int(0)));

    assert_eq!(state(&rt, &mine), Qubit::one().state);
    assert_eq!(rt.ctx().qubits().partner(id_of(&mine)), None);
    assert_eq!(rt.ctx().qubits().len(), 1);
}

#[test]
fn entanglement_is_a_named_link() {
    let mut rt = seeded(1);
    let a = rt.call("quantum_superpose", vec![]).unwrap();
    let b = rt.call("quantum_superpose", vec![]).unwrap();
    let c = rt.call("quantum_superpose", vec![]).unwrap();
    let before = state(&rt, &a);

    assert_eq!(rt.call("quantum_entangle", vec![a.clone(), b.clone()]), Ok(Value::Nil));
    rt.call("quantum_entangle", vec![b.clone(), c.clone()]).unwrap();

    let table = rt.ctx().qubits();
    assert_eq!(table.partner(id_of(&a)), Some(id_of(&b)));
    assert_eq!(table.partner(id_of(&b)), Some(id_of(&c)));
    assert_eq!(table.partner(id_of(&c)), Some(id_of(&b)));
    assert_eq!(state(&rt, &a), before);

    // mesurer un partenaire ne touche pas l'autre
    rt.call("quantum_measure", vec![b.clone()]).unwrap();
    assert_eq!(state(&rt, &a), before);
}

#[test]
fn cnot_swaps_target_when_control_leans_to_one() {
    let mut rt = seeded(1);
    let control = rt.call("quantum_superpose", vec![]).unwrap();
    let target = rt.call("quantum_superpose", vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]).unwrap();
    let id = id_of(&target);
    rt.ctx_mut().qubits_mut().get_mut(id).unwrap().state =
        [Complex64::new(0.6, 0.0), Complex64::new(0.8, 0.0)];

    // contrôle équilibré : rien
    assert_eq!(rt.call("quantum_cnot", vec![control.clone(), target.clone()]), Ok(Value::Nil));
    assert_eq!(state(&rt, &target), [Complex64::new(0.6, 0.0), Complex64::new(0.8, 0.0)]);

    // la cible, qui penche vers 1, sert de contrôle sur l'autre qubit
    rt.call("quantum_phase", vec![control.clone(), Value::Float(1.0)]).unwrap();
    let before = state(&rt, &control);
    rt.call("quantum_cnot", vec![target, control.clone()]).unwrap();
    assert_eq!(state(&rt, &control), [before[1], before[0]]);
}

#[test]
fn teleport_moves_state_and_resets_source() {
    let mut rt = seeded(1);
    let src = rt.call("quantum_superpose", vec![]).unwrap();
    let dst = rt.call("quantum_superpose", vec![]).unwrap();
    rt.call("quantum_phase", vec![src.clone(), Value::Float(std::f64::consts::FRAC_PI_2)]).unwrap();
    let moved = state(&rt, &src);

    assert_eq!(rt.call("quantum_teleport", vec![src.clone(), dst.clone()]), Ok(Value::Bool(true)));
    assert!(close(state(&rt, &dst), moved));
    assert_eq!(state(&rt, &src), Qubit::zero().state);

    let untouched = state(&rt, &dst);
    assert_eq!(rt.call("quantum_teleport", vec![Value::Int(1), dst.clone()]), Ok(Value::Bool(false)));
    assert_eq!(rt.call("quantum_teleport", vec![dst.clone(), Value::Nil]), Ok(Value::Bool(false)));
    assert_eq!(state(&rt, &dst), untouched);
}

#[test]
fn gates_fail_soft_on_wrong_types() {
    let mut rt = seeded(1);
    assert_eq!(rt.call("quantum_measure", vec![Value::from("q")]), Ok(Value::Int(0)));
    assert_eq!(rt.call("quantum_hadamard", vec![Value::Int(5)]), Ok(Value::Int(5)));
    assert_eq!(rt.call("quantum_phase", vec![Value::Nil, Value::Float(1.0)]), Ok(Value::Nil));
    assert_eq!(rt.call("quantum_cnot", vec![Value::Int(1), Value::Int(2)]), Ok(Value::Nil));
    let ghost = Value::Qubit(QubitId::from_u32(77));
    assert_eq!(rt.call("quantum_measure", vec![ghost.clone()]), Ok(Value::Int(0)));
    assert_eq!(rt.call("quantum_hadamard", vec![ghost.clone()]), Ok(ghost));
    assert!(rt.ctx().qubits().is_empty());
}

#[test]
fn phase_drift_is_not_renormalized() {
    let mut rt = seeded(1);
    let q = rt.call("quantum_superpose", vec![Value::Int(0), Value::Int(0), Value::Int(0)]).unwrap();
    let norm_before = rt.ctx().qubits().get(id_of(&q)).unwrap().norm_sqr();
    for _ in 0..10 {
        rt.call("quantum_phase", vec![q.clone(), Value::Float(0.7)]).unwrap();
        rt.call("quantum_hadamard", vec![q.clone()]).unwrap();
    }
    let norm_after = rt.ctx().qubits().get(id_of(&q)).unwrap().norm_sqr();
    assert!((norm_before - 2.0 / 3.0).abs() < EPS);
    assert!((norm_after - norm_before).abs() < 1e-6);

    assert!(rt.ctx_mut().qubits_mut().normalize(id_of(&q)));
    let norm = rt.ctx().qubits().get(id_of(&q)).unwrap().norm_sqr();
    assert!((norm - 1.0).abs() < EPS);
}

#[test]
fn same_seed_same_outcomes() {
    let run = |seed| {
        let mut rt = seeded(seed);
        (0..64)
            .map(|_| {
                let q = rt.call("quantum_superpose", vec![]).unwrap();
                rt.call("quantum_measure", vec![q]).unwrap()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(5), run(5));
}
