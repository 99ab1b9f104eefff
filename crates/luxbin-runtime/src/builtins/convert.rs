//! Conversions de type.

use super::arg;
use crate::ctx::ExecCtx;
use crate::registry::{Arity, BuiltinFlags, BuiltinFn, Registry};
use crate::value::{float_to_i64, Value};

pub(super) fn install(reg: &mut Registry) {
    let c = BuiltinFlags::CONVERT;
    reg.register_all(&[
        ("photon_to_int",    Arity::Fixed(1), c, photon_to_int as BuiltinFn),
        ("photon_to_float",  Arity::Fixed(1), c, photon_to_float as BuiltinFn),
        ("photon_to_string", Arity::Fixed(1), c, photon_to_string as BuiltinFn),
        ("photon_to_bool",   Arity::Fixed(1), c, photon_to_bool as BuiltinFn),
        ("photon_type",      Arity::Fixed(1), c, photon_type as BuiltinFn),
    ]);
}

/// Texte → flottant, espaces autour ignorés.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Troncature ; tout échec (texte illisible, non fini, hors plage) → 0.
fn photon_to_int(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let n = match arg(args, 0) {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(x) => float_to_i64(*x),
        Value::Str(s) => parse_number(s).and_then(float_to_i64),
        _ => None,
    };
    Value::Int(n.unwrap_or(0))
}

// booléen → échec (0.0), contrairement à to_int
fn photon_to_float(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let x = match arg(args, 0) {
        Value::Int(_) | Value::Float(_) => arg(args, 0).as_f64(),
        Value::Str(s) => parse_number(s),
        _ => None,
    };
    Value::Float(x.unwrap_or(0.0))
}

fn photon_to_string(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    Value::Str(arg(args, 0).to_display())
}

fn photon_to_bool(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    Value::Bool(arg(args, 0).is_truthy())
}

fn photon_type(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    Value::from(arg(args, 0).type_name())
}
