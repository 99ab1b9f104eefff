//! Erreurs de la frontière de dispatch.
//!
//! Ce sont les **seules** erreurs que le runtime lève : les builtins eux-mêmes
//! sont totaux et ne renvoient jamais d'erreur.

use thiserror::Error;

/// Erreurs runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Nom de builtin inconnu (`NameError` côté langage).
    #[error("NameError: builtin introuvable: {0}")]
    Name(String),

    /// Nombre d'arguments différent de l'arité fixe déclarée (`ArityError`).
    #[error("ArityError: {name} attend {expected} argument(s), reçu {got}")]
    Arity {
        /// Nom du builtin appelé.
        name: String,
        /// Arité déclarée.
        expected: usize,
        /// Nombre d'arguments effectivement fournis.
        got: usize,
    },
}

impl Error {
    /// Nom de la classe d'erreur exposée au langage.
    pub const fn kind(&self) -> &'static str {
        match self {
            Error::Name(_) => "NameError",
            Error::Arity { .. } => "ArityError",
        }
    }
}

/// Résultat du runtime.
pub type RResult<T> = std::result::Result<T, Error>;
