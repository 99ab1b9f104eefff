//! luxbin-runtime — bibliothèque standard hôte du langage LUXBIN
//!
//! Ce crate fournit tout ce que l'interpréteur appelle **hors** de sa boucle
//! d'exécution :
//!
//! - [`Value`] : l'union fermée échangée à la frontière (nil/bool/int/float/
//!   texte/tableau/qubit)
//! - [`Registry`] : table immuable nom → [`BuiltinEntry`] (arité fixe ou
//!   variadique), construite une fois puis partagée par `Arc`
//! - [`ExecCtx`] : contexte passé aux builtins (journal de sortie, console,
//!   entrée, source aléatoire, table des qubits)
//! - [`quantum`] : moteur de qubits simulés (amplitudes complexes,
//!   mesure/effondrement, portes, intrication « par référence »)
//! - [`spectrum`] : table caractère ↔ longueur d'onde
//! - [`Runtime`] : couple registre + contexte, avec `call(name, args)`
//!
//! Deux politiques d'erreur cohabitent volontairement : la frontière de
//! dispatch échoue franchement ([`Error::Name`], [`Error::Arity`]), alors que
//! chaque builtin est **total** et renvoie une valeur par défaut documentée
//! quand on lui passe un opérande du mauvais type.
//!
//! ⚠️ Ce crate ne lexe, ne parse et n'exécute pas de programme LUXBIN.
//!
//! # Exemple
//! ```
//! use luxbin_runtime::prelude::*;
//!
//! let mut rt = Runtime::standard(RuntimeConfig::default().with_seed(7).with_echo(false));
//! let r = rt.call("photon_range", vec![Value::Int(0), Value::Int(5), Value::Int(2)]).unwrap();
//! assert_eq!(r, Value::from(vec![Value::Int(0), Value::Int(2), Value::Int(4)]));
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod builtins;
pub mod config;
pub mod ctx;
pub mod error;
pub mod quantum;
pub mod registry;
pub mod spectrum;
pub mod value;

pub use config::RuntimeConfig;
pub use ctx::{Captured, ExecCtx, OutputLog};
pub use error::{Error, RResult};
pub use quantum::{Qubit, QubitId, QubitTable};
pub use registry::{Arity, BuiltinEntry, BuiltinFlags, BuiltinFn, Registry, Runtime};
pub use value::Value;

/* ----------------------------- Macro sucrée ----------------------------- */

/// Déclare un builtin en deux lignes.
///
/// # Exemple
/// ```
/// use luxbin_runtime::{luxbin_builtin, Arity, BuiltinFlags, ExecCtx, Registry, Value};
///
/// luxbin_builtin!(twice |args, _ctx| {
///     match &args[0] {
///         Value::Int(i) => Value::Int(i * 2),
///         _ => Value::Nil,
///     }
/// });
///
/// let mut reg = Registry::new();
/// reg.register("twice", Arity::Fixed(1), BuiltinFlags::MATH, twice);
/// let entry = reg.resolve("twice").unwrap();
/// let mut ctx = ExecCtx::default();
/// let out = reg.invoke(entry, &mut [Value::Int(21)], &mut ctx).unwrap();
/// assert_eq!(out, Value::Int(42));
/// ```
#[macro_export]
macro_rules! luxbin_builtin {
    ($name:ident |$args:ident, $ctx:ident| $body:block) => {
        pub fn $name($args: &mut [$crate::Value], $ctx: &mut $crate::ExecCtx) -> $crate::Value {
            $body
        }
    };
}

/* -------------------------------- Prelude -------------------------------- */

/// Prelude pratique pour importer d'un coup.
pub mod prelude {
    pub use crate::{
        luxbin_builtin, Arity, BuiltinEntry, BuiltinFlags, BuiltinFn, Captured, Error, ExecCtx,
        OutputLog, Qubit, QubitId, QubitTable, RResult, Registry, Runtime, RuntimeConfig, Value,
    };
}
