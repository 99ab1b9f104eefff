//! Registre des builtins : nom → (callable, arité déclarée).
//!
//! Le registre se construit une fois (typiquement [`Registry::standard`]) puis
//! ne bouge plus : on le partage par référence ou `Arc` entre autant de
//! lecteurs que nécessaire. Tout l'état mutable vit dans [`ExecCtx`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::config::RuntimeConfig;
use crate::ctx::ExecCtx;
use crate::error::{Error, RResult};
use crate::value::Value;

/* -------------------------- Signature des builtins -------------------------- */

/// Callable d'un builtin : arguments (mutables, pour `push`/`pop`/`set`) +
/// contexte. Un builtin est **total** : il renvoie toujours une valeur.
pub type BuiltinFn = fn(&mut [Value], &mut ExecCtx) -> Value;

/// Arité déclarée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactement `n` arguments.
    Fixed(usize),
    /// N'importe quel nombre d'arguments (≥ 0).
    Variadic,
}

impl Arity {
    /// Code historique de la table : `-1` = variadique.
    pub const VARIADIC_CODE: i64 = -1;

    /// Décode le code historique (`n ≥ 0` fixe, négatif variadique).
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code).map_or(Self::Variadic, Self::Fixed)
    }

    /// Code historique.
    pub fn code(self) -> i64 {
        match self {
            Self::Fixed(n) => i64::try_from(n).unwrap_or(i64::MAX),
            Self::Variadic => Self::VARIADIC_CODE,
        }
    }

    /// Vrai si `got` arguments respectent le contrat.
    pub const fn accepts(self, got: usize) -> bool {
        match self {
            Self::Fixed(n) => n == got,
            Self::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Variadic => f.write_str("*"),
        }
    }
}

bitflags! {
    /// Catégories d'un builtin (listing, filtrage côté hôte).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BuiltinFlags: u16 {
        /// Touche la console ou le système de fichiers.
        const IO      = 1 << 0;
        /// Arithmétique / aléatoire.
        const MATH    = 1 << 1;
        /// Texte et longueurs d'onde.
        const TEXT    = 1 << 2;
        /// Séquences.
        const ARRAY   = 1 << 3;
        /// Conversions de type.
        const CONVERT = 1 << 4;
        /// Moteur de qubits.
        const QUANTUM = 1 << 5;
        /// Modifie un argument en place.
        const MUTATES = 1 << 6;
    }
}

impl BuiltinFlags {
    /// Noms courts des catégories actives, dans l'ordre de déclaration.
    pub fn labels(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

/// Descripteur d'un builtin.
#[derive(Clone)]
pub struct BuiltinEntry {
    /// Nom exposé au langage.
    pub name: String,
    /// Arité déclarée.
    pub arity: Arity,
    /// Catégories.
    pub flags: BuiltinFlags,
    /// Pointeur de fonction.
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinEntry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl BuiltinEntry {
    /// Vérifie l'arité puis délègue au callable.
    pub fn invoke(&self, args: &mut [Value], ctx: &mut ExecCtx) -> RResult<Value> {
        if !self.arity.accepts(args.len()) {
            let expected = match self.arity {
                Arity::Fixed(n) => n,
                Arity::Variadic => args.len(),
            };
            tracing::debug!(name = %self.name, expected, got = args.len(), "arité refusée");
            return Err(Error::Arity { name: self.name.clone(), expected, got: args.len() });
        }
        Ok((self.func)(args, ctx))
    }
}

/* ------------------------------ Registre ------------------------------ */

/// Table immuable nom → [`BuiltinEntry`].
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<String, BuiltinEntry>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("len", &self.entries.len()).finish()
    }
}

impl Registry {
    /// Registre vide (pour des hôtes qui composent leur propre table).
    pub fn new() -> Self {
        Self::default()
    }

    /// La bibliothèque standard complète (`photon_*`, `quantum_*`, `__import__`).
    pub fn standard() -> Self {
        let mut reg = Self::new();
        crate::builtins::install(&mut reg);
        tracing::debug!(builtins = reg.len(), "registre standard construit");
        reg
    }

    /// Enregistre (ou remplace) un builtin ; renvoie l'ancienne entrée.
    pub fn register(
        &mut self,
        name: &str,
        arity: Arity,
        flags: BuiltinFlags,
        func: BuiltinFn,
    ) -> Option<BuiltinEntry> {
        let entry = BuiltinEntry { name: name.to_owned(), arity, flags, func };
        self.entries.insert(name.to_owned(), entry)
    }

    /// Enregistre un lot.
    pub fn register_all(&mut self, entries: &[(&str, Arity, BuiltinFlags, BuiltinFn)]) {
        for (name, arity, flags, func) in entries {
            self.register(name, *arity, *flags, *func);
        }
    }

    /// Résout un nom ; `None` pour un nom inconnu (jamais de panique).
    pub fn resolve(&self, name: &str) -> Option<&BuiltinEntry> {
        self.entries.get(name)
    }

    /// Vrai si le nom est enregistré.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Invoque une entrée résolue (voir [`BuiltinEntry::invoke`]).
    pub fn invoke(
        &self,
        entry: &BuiltinEntry,
        args: &mut [Value],
        ctx: &mut ExecCtx,
    ) -> RResult<Value> {
        entry.invoke(args, ctx)
    }

    /// Invoque sans contexte hôte : un contexte jetable (config par défaut) est
    /// créé pour l'appel. Les qubits créés par cet appel meurent avec lui : leurs
    /// identifiants ne désignent rien dans un autre contexte.
    pub fn invoke_detached(&self, entry: &BuiltinEntry, args: &mut [Value]) -> RResult<Value> {
        let mut ctx = ExecCtx::default();
        entry.invoke(args, &mut ctx)
    }

    /// Résout puis invoque ; nom inconnu → [`Error::Name`].
    pub fn call(&self, name: &str, args: &mut [Value], ctx: &mut ExecCtx) -> RResult<Value> {
        let entry = self.resolve(name).ok_or_else(|| {
            tracing::debug!(name, "builtin introuvable");
            Error::Name(name.to_owned())
        })?;
        entry.invoke(args, ctx)
    }

    /// Nombre de builtins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Vrai si vide.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Noms triés.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Entrées triées par nom.
    pub fn entries(&self) -> Vec<&BuiltinEntry> {
        let mut entries: Vec<&BuiltinEntry> = self.entries.values().collect();
        entries.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

/* ------------------------------ Runtime ------------------------------ */

/// Registre partagé + contexte propre : ce qu'un interpréteur garde sous la main.
#[derive(Debug)]
pub struct Runtime {
    registry: Arc<Registry>,
    ctx: ExecCtx,
}

impl Runtime {
    /// Registre standard + contexte sur la vraie console.
    pub fn standard(cfg: RuntimeConfig) -> Self {
        Self::with_parts(Arc::new(Registry::standard()), ExecCtx::new(&cfg))
    }

    /// Assemble un runtime à partir d'un registre déjà partagé.
    pub const fn with_parts(registry: Arc<Registry>, ctx: ExecCtx) -> Self {
        Self { registry, ctx }
    }

    /// Registre (clonable pour d'autres lecteurs).
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Contexte.
    pub const fn ctx(&self) -> &ExecCtx {
        &self.ctx
    }

    /// Contexte (écriture).
    pub fn ctx_mut(&mut self) -> &mut ExecCtx {
        &mut self.ctx
    }

    /// Appelle un builtin par nom avec des arguments possédés.
    pub fn call(&mut self, name: &str, mut args: Vec<Value>) -> RResult<Value> {
        self.registry.call(name, &mut args, &mut self.ctx)
    }

    /// Appelle un builtin en laissant les mutations visibles dans `args`.
    pub fn call_in_place(&mut self, name: &str, args: &mut [Value]) -> RResult<Value> {
        self.registry.call(name, args, &mut self.ctx)
    }
}

/* --------------------------------- Tests --------------------------------- */
