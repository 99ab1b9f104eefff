//! Arithmétique et aléatoire.
//!
//! Opérande non numérique ou erreur de domaine (racine d'un négatif, débordement
//! de `pow`, `floor` d'un infini…) → nil.

use super::{arg, lang_lt};
use crate::ctx::ExecCtx;
use crate::registry::{Arity, BuiltinFlags, BuiltinFn, Registry};
use crate::value::{float_to_i64, Value};

pub(super) fn install(reg: &mut Registry) {
    let m = BuiltinFlags::MATH;
    reg.register_all(&[
        ("photon_abs",     Arity::Fixed(1), m, photon_abs as BuiltinFn),
        ("photon_sqrt",    Arity::Fixed(1), m, photon_sqrt as BuiltinFn),
        ("photon_pow",     Arity::Fixed(2), m, photon_pow as BuiltinFn),
        ("photon_sin",     Arity::Fixed(1), m, photon_sin as BuiltinFn),
        ("photon_cos",     Arity::Fixed(1), m, photon_cos as BuiltinFn),
        ("photon_tan",     Arity::Fixed(1), m, photon_tan as BuiltinFn),
        ("photon_floor",   Arity::Fixed(1), m, photon_floor as BuiltinFn),
        ("photon_ceil",    Arity::Fixed(1), m, photon_ceil as BuiltinFn),
        ("photon_round",   Arity::Fixed(1), m, photon_round as BuiltinFn),
        ("photon_min",     Arity::Fixed(2), m, photon_min as BuiltinFn),
        ("photon_max",     Arity::Fixed(2), m, photon_max as BuiltinFn),
        ("photon_random",  Arity::Fixed(0), m, photon_random as BuiltinFn),
        ("photon_randint", Arity::Fixed(2), m, photon_randint as BuiltinFn),
    ]);
}

/// Résultat flottant ; NaN né d'une entrée non-NaN = erreur de domaine.
fn unary_float(v: &Value, f: fn(f64) -> f64) -> Value {
    let Some(x) = v.as_f64() else {
        return Value::Nil;
    };
    let y = f(x);
    if y.is_nan() && !x.is_nan() {
        Value::Nil
    } else {
        Value::Float(y)
    }
}

/// Arrondi vers entier : entier inchangé, flottant non fini ou hors plage → nil.
fn to_int_with(v: &Value, f: fn(f64) -> f64) -> Value {
    match v {
        Value::Int(i) => Value::Int(*i),
        Value::Float(x) => float_to_i64(f(*x)).map_or(Value::Nil, Value::Int),
        _ => Value::Nil,
    }
}

fn photon_abs(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    match arg(args, 0) {
        Value::Int(i) => i.checked_abs().map_or(Value::Float((*i as f64).abs()), Value::Int),
        Value::Float(x) => Value::Float(x.abs()),
        _ => Value::Nil,
    }
}

fn photon_sqrt(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    unary_float(arg(args, 0), f64::sqrt)
}

fn photon_pow(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let (Some(base), Some(exp)) = (arg(args, 0).as_f64(), arg(args, 1).as_f64()) else {
        return Value::Nil;
    };
    let r = base.powf(exp);
    let finite_inputs = base.is_finite() && exp.is_finite();
    if (r.is_nan() && !base.is_nan() && !exp.is_nan()) || (r.is_infinite() && finite_inputs) {
        return Value::Nil;
    }
    Value::Float(r)
}

fn photon_sin(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    unary_float(arg(args, 0), f64::sin)
}

fn photon_cos(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    unary_float(arg(args, 0), f64::cos)
}

fn photon_tan(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    unary_float(arg(args, 0), f64::tan)
}

fn photon_floor(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    to_int_with(arg(args, 0), f64::floor)
}

fn photon_ceil(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    to_int_with(arg(args, 0), f64::ceil)
}

// demi-valeurs vers le pair : round(2.5) == 2
fn photon_round(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    to_int_with(arg(args, 0), f64::round_ties_even)
}

fn photon_min(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let (a, b) = (arg(args, 0), arg(args, 1));
    match lang_lt(b, a) {
        Some(true) => b.clone(),
        Some(false) => a.clone(),
        None => Value::Nil,
    }
}

fn photon_max(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let (a, b) = (arg(args, 0), arg(args, 1));
    match lang_lt(a, b) {
        Some(true) => b.clone(),
        Some(false) => a.clone(),
        None => Value::Nil,
    }
}

fn photon_random(_args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    Value::Float(ctx.random_f64())
}

fn photon_randint(args: &mut [Value], ctx: &mut ExecCtx) -> Value {
    let (Some(lo), Some(hi)) = (arg(args, 0).as_i64(), arg(args, 1).as_i64()) else {
        return Value::Nil;
    };
    ctx.random_int(lo, hi).map_or(Value::Nil, Value::Int)
}
