//! Texte et longueurs d'onde.

use super::{arg, text_of};
use crate::ctx::ExecCtx;
use crate::registry::{Arity, BuiltinFlags, BuiltinFn, Registry};
use crate::spectrum;
use crate::value::Value;

pub(super) fn install(reg: &mut Registry) {
    let t = BuiltinFlags::TEXT;
    reg.register_all(&[
        ("photon_concat",     Arity::Fixed(2), t, photon_concat as BuiltinFn),
        ("photon_wavelength", Arity::Fixed(1), t, photon_wavelength as BuiltinFn),
        ("photon_char",       Arity::Fixed(1), t, photon_char as BuiltinFn),
        ("photon_upper",      Arity::Fixed(1), t, photon_upper as BuiltinFn),
        ("photon_lower",      Arity::Fixed(1), t, photon_lower as BuiltinFn),
        ("photon_split",      Arity::Fixed(2), t, photon_split as BuiltinFn),
        ("photon_join",       Arity::Fixed(2), t | BuiltinFlags::ARRAY, photon_join as BuiltinFn),
        ("photon_strip",      Arity::Fixed(1), t, photon_strip as BuiltinFn),
    ]);
}

fn photon_concat(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let mut out = text_of(arg(args, 0));
    out.push_str(&text_of(arg(args, 1)));
    Value::Str(out)
}

fn photon_wavelength(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let wl = arg(args, 0)
        .as_str()
        .map_or(spectrum::DEFAULT_WAVELENGTH, spectrum::wavelength_of_text);
    Value::Float(wl)
}

fn photon_char(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    match arg(args, 0).as_f64() {
        Some(wl) => Value::Str(spectrum::nearest_char(wl).to_string()),
        None => Value::Str(String::new()),
    }
}

fn photon_upper(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    Value::Str(text_of(arg(args, 0)).to_uppercase())
}

fn photon_lower(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    Value::Str(text_of(arg(args, 0)).to_lowercase())
}

fn photon_strip(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    Value::Str(text_of(arg(args, 0)).trim().to_owned())
}

/// Découpe sur le séparateur exact ; séparateur vide ou non textuel → `[s]`.
fn photon_split(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let s = text_of(arg(args, 0));
    match arg(args, 1).as_str() {
        Some(sep) if !sep.is_empty() => {
            Value::Array(s.split(sep).map(Value::from).collect())
        }
        _ => Value::Array(vec![Value::Str(s)]),
    }
}

/// Joint l'affichage des éléments (ou des caractères d'un texte).
fn photon_join(args: &mut [Value], _ctx: &mut ExecCtx) -> Value {
    let sep = arg(args, 1).as_str().unwrap_or_default();
    let parts: Vec<String> = match arg(args, 0) {
        Value::Array(items) => items.iter().map(text_of).collect(),
        Value::Str(s) => s.chars().map(String::from).collect(),
        _ => return Value::Str(String::new()),
    };
    Value::Str(parts.join(sep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(f: BuiltinFn, mut args: Vec<Value>) -> Value {
        f(&mut args, &mut ExecCtx::default())
    }

    #[test]
    fn concat_uses_display() {
        let v = run(photon_concat, vec![Value::from("n="), Value::Float(2.0)]);
        assert_eq!(v, Value::from("n=2.0"));
        assert_eq!(run(photon_concat, vec![Value::Nil, Value::Bool(false)]), Value::from("nilfalse"));
    }

    #[test]
    fn split_and_join() {
        let parts = run(photon_split, vec![Value::from("a  b"), Value::from(" ")]);
        assert_eq!(parts, Value::from(vec![Value::from("a"), Value::from(""), Value::from("b")]));
        assert_eq!(
            run(photon_split, vec![Value::from("ab"), Value::from("")]),
            Value::from(vec![Value::from("ab")])
        );
        let joined = run(photon_join, vec![Value::from(vec![Value::Int(1), Value::from("x")]), Value::from("-")]);
        assert_eq!(joined, Value::from("1-x"));
        assert_eq!(run(photon_join, vec![Value::from("abc"), Value::from(".")]), Value::from("a.b.c"));
        assert_eq!(run(photon_join, vec![Value::Int(3), Value::from(".")]), Value::from(""));
    }

    #[test]
    fn case_and_strip() {
        assert_eq!(run(photon_upper, vec![Value::from("lumière")]), Value::from("LUMIÈRE"));
        assert_eq!(run(photon_lower, vec![Value::Bool(true)]), Value::from("true"));
        assert_eq!(run(photon_strip, vec![Value::from("  photon \n")]), Value::from("photon"));
    }

    #[test]
    fn wavelengths() {
        assert_eq!(run(photon_wavelength, vec![Value::from("Abc")]), Value::Float(403.1));
        assert_eq!(run(photon_wavelength, vec![Value::from("€")]), Value::Float(540.3));
        assert_eq!(run(photon_wavelength, vec![Value::Int(1)]), Value::Float(540.3));
        assert_eq!(run(photon_char, vec![Value::Int(403)]), Value::from("A"));
        assert_eq!(run(photon_char, vec![Value::Nil]), Value::from(""));
    }
}
