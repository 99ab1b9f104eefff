//! Valeur dynamique échangée entre l'interpréteur et les builtins.

use std::fmt;

use crate::quantum::QubitId;

/* --------------------------- Types de valeur --------------------------- */

/// Union fermée : seule monnaie qui traverse la frontière de dispatch.
///
/// Les qubits ne sont **pas** portés par valeur : `Qubit` contient un
/// identifiant dans la [`QubitTable`](crate::QubitTable) du contexte.
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Absence de valeur.
    #[default]
    Nil,
    /// Booléen.
    Bool(bool),
    /// Entier 64 bits signé.
    Int(i64),
    /// Flottant 64 bits.
    Float(f64),
    /// Texte UTF-8 possédé.
    Str(String),
    /// Séquence ordonnée.
    Array(Vec<Value>),
    /// Référence vers un qubit de la table du contexte.
    Qubit(QubitId),
}

impl Value {
    /// Nom du type tel que le voit le langage (`photon_type`).
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Qubit(_) => "qubit",
        }
    }

    /// Vérité du langage : nil, `false`, `0`, `0.0`, texte vide et tableau vide
    /// sont faux ; tout le reste est vrai.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Qubit(_) => true,
        }
    }

    /// Vue flottante d'un opérande numérique. Les booléens ne sont pas des nombres.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Vue entière (troncature) d'un opérande numérique.
    ///
    /// `None` si l'opérande n'est pas un nombre ou si le flottant est non fini
    /// ou hors de la plage `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(x) => float_to_i64(*x),
            _ => None,
        }
    }

    /// Identifiant de qubit, si la valeur en est un.
    pub const fn as_qubit(&self) -> Option<QubitId> {
        match self {
            Value::Qubit(id) => Some(*id),
            _ => None,
        }
    }

    /// Texte emprunté, si la valeur en est un.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Rendu texte « affichable » : ce que `photon_print` et `photon_to_string` émettent.
    pub fn to_display(&self) -> String {
        self.to_string()
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Troncature vers `i64`, `None` hors plage ou non fini.
pub(crate) fn float_to_i64(x: f64) -> Option<i64> {
    // i64::MAX as f64 vaut 2^63 : borne exclue
    if x.is_finite() && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x.trunc() as i64)
    } else {
        None
    }
}

fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => fmt_float(*x, f),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Qubit(id) => write!(f, "<qubit #{}>", id.to_u32()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => {
                if s.chars().count() > 64 {
                    let head: String = s.chars().take(64).collect();
                    write!(f, "Str({head}…)")
                } else {
                    write!(f, "Str({s})")
                }
            }
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Qubit(id) => write!(f, "Qubit({})", id.to_u32()),
        }
    }
}

/* Conversions */
impl From<()> for Value { fn from((): ()) -> Self { Value::Nil } }
impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(i64::from(v)) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::Str(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::Str(v.to_owned()) } }
impl From<Vec<Value>> for Value { fn from(v: Vec<Value>) -> Self { Value::Array(v) } }
impl From<QubitId> for Value { fn from(v: QubitId) -> Self { Value::Qubit(v) } }

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_matches_language_rules() {
        assert_eq!(Value::Nil.to_display(), "nil");
        assert_eq!(Value::Bool(true).to_display(), "true");
        assert_eq!(Value::Float(3.0).to_display(), "3.0");
        assert_eq!(Value::Float(2.5).to_display(), "2.5");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_display(), "-inf");
        assert_eq!(Value::Float(f64::NAN).to_display(), "nan");
        let arr = Value::from(vec![Value::Int(1), Value::from("a"), Value::Nil]);
        assert_eq!(arr.to_display(), r#"[1, "a", nil]"#);
        assert_eq!(Value::Qubit(QubitId::from_u32(3)).to_display(), "<qubit #3>");
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Qubit(QubitId::from_u32(1)).is_truthy());
    }

    #[test]
    fn numeric_views_exclude_bools() {
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::Float(-2.7).as_i64(), Some(-2));
        assert_eq!(Value::Float(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::Float(1e30).as_i64(), None);
    }
}
