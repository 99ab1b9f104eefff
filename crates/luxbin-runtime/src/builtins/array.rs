//! Séquences (et longueur/découpe des textes).
//!
//! `push`, `pop` et `set` modifient leur tableau **en place** dans la tranche
//! d'arguments : l'interpréteur qui lie ses arguments par référence voit la
//! mutation, comme dans le langage d'origine.

use std::cmp::Ordering;

use super::{arg, lang_lt};
use crate::ctx::ExecCtx;
use crate::registry::{Arity, BuiltinFlags, BuiltinFn, Registry};
use crate::value::Value;

pub(super) fn install(reg: &mut Registry) {
    let a = BuiltinFlags::ARRAY;
    let seq = BuiltinFlags::ARRAY | BuiltinFlags::TEXT;
    let mutates = a | BuiltinFlags::MUTATES;
    reg.register_all(&[
        ("photon_len",     Arity::Fixed(1), seq, photon_len as BuiltinFn),
        ("photon_slice",   Arity::Fixed(3), seq, photon_slice as BuiltinFn),
        ("photon_array",   Arity::Fixed(1), a, photon_array as BuiltinFn),
        ("photon_push",    Arity::Fixed(2), mutates, photon_push as BuiltinFn),
        ("photon_pop",     Arity::Fixed(1), mutates, photon_pop as BuiltinFn),
        ("photon_get",     Arity::Fixed(2), seq, photon_get as BuiltinFn),
        ("photon_set",     Arity::Fixed(3), mutates, photon_set as BuiltinFn),
        ("photon_sort",    Arity::Fixed(1), a, photon_sort as BuiltinFn),
        ("photon_reverse", Arity::Fixed(1), seq, photon_reverse as BuiltinFn),
        ("photon_range",   Arity::Variadic, a, photon_range as BuiltinFn),
    ]);
}

fn empty() -> Value {
    Value::Array(Vec::new())
}

/// Vec pré-réservé ; `None` si la taille demandée ne tient pas en mémoire.
fn reserve(len: usize) -> Option<Vec<Value>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len).ok()?;
    Some(out)
}

/// Indice de découpe façon « négatif = depuis la fin », borné à `[0, len]`.
fn clamp_index(i: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let j = if i < 0 { i.saturating_add(len_i).max(0) } else { i.min(len_i) };
    usize::try_from(j).unwrap_or(0)
}

fn photon_len(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let n = match arg(args, 0) {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => 0,
    };
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn photon_slice(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let (Some(start), Some(end)) = (arg(args, 1).as_i64(), arg(args, 2).as_i64()) else {
        return Value::Nil;
    };
    match arg(args, 0) {
        Value::Array(items) => {
            let (s, e) = (clamp_index(start, items.len()), clamp_index(end, items.len()));
            Value::Array(if s < e { items[s..e].to_vec() } else { Vec::new() })
        }
        Value::Str(text) => {
            let n = text.chars().count();
            let (s, e) = (clamp_index(start, n), clamp_index(end, n));
            let out: String = if s < e { text.chars().skip(s).take(e - s).collect() } else { String::new() };
            Value::Str(out)
        }
        _ => Value::Nil,
    }
}

fn photon_array(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let Some(size) = arg(args, 0).as_i64().and_then(|n| usize::try_from(n).ok()) else {
        return empty();
    };
    match reserve(size) {
        Some(mut out) => {
            out.resize(size, Value::Nil);
            Value::Array(out)
        }
        None => empty(),
    }
}

fn photon_push(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let val = arg(args, 1).clone();
    match args.first_mut() {
        Some(Value::Array(items)) => {
            items.push(val);
            Value::Array(items.clone())
        }
        Some(other) => other.clone(),
        None => Value::Nil,
    }
}

fn photon_pop(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    match args.first_mut() {
        Some(Value::Array(items)) => items.pop().unwrap_or_default(),
        _ => Value::Nil,
    }
}

fn photon_get(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let Some(idx) = arg(args, 1).as_i64().and_then(|i| usize::try_from(i).ok()) else {
        return Value::Nil;
    };
    match arg(args, 0) {
        Value::Array(items) => items.get(idx).cloned().unwrap_or_default(),
        Value::Str(s) => s.chars().nth(idx).map_or(Value::Nil, |c| Value::Str(c.to_string())),
        _ => Value::Nil,
    }
}

fn photon_set(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let idx = arg(args, 1).as_i64().and_then(|i| usize::try_from(i).ok());
    let val = arg(args, 2).clone();
    match args.first_mut() {
        Some(Value::Array(items)) => {
            if let Some(slot) = idx.and_then(|i| items.get_mut(i)) {
                *slot = val;
            }
            Value::Array(items.clone())
        }
        Some(other) => other.clone(),
        None => Value::Nil,
    }
}

/// Ordre total d'un tableau homogène (nombres, textes ou booléens).
fn sort_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
    }
}

/// Copie triée ; tableau hétérogène → copie inchangée.
fn photon_sort(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let Value::Array(items) = arg(args, 0) else {
        return arg(args, 0).clone();
    };
    let comparable = items.windows(2).all(|w| lang_lt(&w[0], &w[1]).is_some());
    let mut out = items.clone();
    if comparable {
        out.sort_by(sort_order);
    }
    Value::Array(out)
}

fn photon_reverse(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    match arg(args, 0) {
        Value::Array(items) => Value::Array(items.iter().rev().cloned().collect()),
        Value::Str(s) => Value::Array(s.chars().rev().map(|c| Value::Str(c.to_string())).collect()),
        _ => empty(),
    }
}

/// `range(end)`, `range(start, end)`, `range(start, end, step)` demi-ouverts.
///
/// Aucun argument, plus de trois, pas nul ou opérande non numérique → `[]`.
fn photon_range(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let Some(nums) = args.iter().map(Value::as_i64).collect::<Option<Vec<i64>>>() else {
        return empty();
    };
    let (start, end, step) = match nums.as_slice() {
        [end] => (0, *end, 1),
        [start, end] => (*start, *end, 1),
        [start, end, step] => (*start, *end, *step),
        _ => return empty(),
    };
    if step == 0 {
        return empty();
    }
    let span = i128::from(end) - i128::from(start);
    let stride = i128::from(step);
    let count = if (stride > 0 && span > 0) || (stride < 0 && span < 0) {
        (span.abs() + stride.abs() - 1) / stride.abs()
    } else {
        0
    };
    let Ok(count) = usize::try_from(count) else {
        return empty();
    };
    let Some(mut out) = reserve(count) else {
        return empty();
    };
    let mut cur = start;
    for _ in 0..count {
        out.push(Value::Int(cur));
        cur = cur.wrapping_add(step);
    }
    Value::Array(out)
}
