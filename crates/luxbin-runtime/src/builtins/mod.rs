//! Bibliothèque standard LUXBIN.
//!
//! Chaque sous-module enregistre sa famille de builtins. Tous sont **totaux** :
//! un opérande du mauvais type donne la valeur par défaut documentée (nil, 0,
//! texte vide, `false` ou l'entrée inchangée), jamais une erreur.

use crate::registry::Registry;
use crate::value::Value;

mod array;
mod convert;
mod io;
mod math;
mod quantum;
mod text;

/// Installe toute la bibliothèque standard dans `reg`.
pub fn install(reg: &mut Registry) {
    io::install(reg);
    math::install(reg);
    text::install(reg);
    array::install(reg);
    convert::install(reg);
    quantum::install(reg);
}

static NIL: Value = Value::Nil;

/// `i`-ème argument, nil s'il manque (appel direct hors registre).
fn arg(args: &[Value], i: usize) -> &Value {
    args.get(i).unwrap_or(&NIL)
}

/// `a < b` au sens du langage : nombres entre eux, textes entre eux,
/// booléens entre eux. `None` pour deux types incomparables.
fn lang_lt(a: &Value, b: &Value) -> Option<bool> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x < y),
        (Value::Str(x), Value::Str(y)) => Some(x < y),
        (Value::Bool(x), Value::Bool(y)) => Some(x < y),
        _ => Some(a.as_f64()? < b.as_f64()?),
    }
}

/// Texte de référence d'un opérande : le texte lui-même, sinon son affichage.
fn text_of(v: &Value) -> String {
    match v {
        Value::Str(s) => s.clone(),
        other => other.to_display(),
    }
}
