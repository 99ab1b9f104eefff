//! Contexte d'exécution passé à chaque builtin.
//!
//! Il possède tout l'état mutable que les builtins touchent : journal de
//! sortie, console, entrée, source aléatoire et table des qubits. Le registre,
//! lui, reste immuable.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::RuntimeConfig;
use crate::quantum::QubitTable;

/* ------------------------------ Journal ------------------------------ */

/// Journal de sortie append-only, partageable entre threads.
///
/// Un hôte garde un clone pour récupérer ce que le programme a émis, sans
/// couper l'écho console.
#[derive(Clone, Default)]
pub struct OutputLog(Arc<Mutex<Vec<String>>>);

impl OutputLog {
    /// Journal vide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une entrée.
    pub fn push(&self, line: impl Into<String>) {
        self.0.lock().push(line.into());
    }

    /// Copie des entrées.
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Dernière entrée.
    pub fn last(&self) -> Option<String> {
        self.0.lock().last().cloned()
    }

    /// Nombre d'entrées.
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Vrai si rien n'a été émis.
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Vide le journal.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl fmt::Debug for OutputLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputLog").field("len", &self.len()).finish()
    }
}

/* ------------------------ Outil de capture console ------------------------ */

/// Petit writer qui **capture** la console dans une String (utile en tests/REPL).
#[derive(Default, Clone)]
pub struct Captured(Arc<Mutex<String>>);

impl Captured {
    /// Récupère le buffer (copie).
    pub fn get(&self) -> String {
        self.0.lock().clone()
    }
    /// Réinitialise le buffer.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.0.lock().push_str(&s);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/* ------------------------------ Contexte ------------------------------ */

/// Contexte passé aux builtins.
pub struct ExecCtx {
    output: OutputLog,
    console: Box<dyn Write + Send>,
    input: Box<dyn BufRead + Send>,
    rng: StdRng,
    qubits: QubitTable,
    echo: bool,
}

impl Default for ExecCtx {
    fn default() -> Self {
        Self::new(&RuntimeConfig::default())
    }
}

impl fmt::Debug for ExecCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecCtx")
            .field("output", &self.output)
            .field("qubits", &self.qubits)
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}

impl ExecCtx {
    /// Contexte branché sur la vraie console (stdout/stdin).
    pub fn new(cfg: &RuntimeConfig) -> Self {
        let rng = cfg.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            output: OutputLog::new(),
            console: Box::new(io::stdout()),
            input: Box::new(io::BufReader::new(io::stdin())),
            rng,
            qubits: QubitTable::new(),
            echo: cfg.echo,
        }
    }

    /// Variante utile pour tests : console capturée, pas d'entrée.
    pub fn with_captured_console(cfg: &RuntimeConfig) -> (Self, Captured) {
        let cap = Captured::default();
        let ctx = Self::new(cfg).with_console(cap.clone()).with_input(io::empty());
        (ctx, cap)
    }

    /// Injecte un writer console custom (buffer, fichier…).
    #[must_use]
    pub fn with_console<W: Write + Send + 'static>(mut self, w: W) -> Self {
        self.console = Box::new(w);
        self
    }

    /// Injecte une source d'entrée custom (lue par `photon_input`).
    #[must_use]
    pub fn with_input<R: BufRead + Send + 'static>(mut self, r: R) -> Self {
        self.input = Box::new(r);
        self
    }

    /// Partage un journal existant (l'hôte en garde un clone).
    #[must_use]
    pub fn with_output_log(mut self, log: OutputLog) -> Self {
        self.output = log;
        self
    }

    /// Journal de sortie.
    pub const fn output(&self) -> &OutputLog {
        &self.output
    }

    /// Table des qubits.
    pub const fn qubits(&self) -> &QubitTable {
        &self.qubits
    }

    /// Table des qubits (écriture).
    pub fn qubits_mut(&mut self) -> &mut QubitTable {
        &mut self.qubits
    }

    /// Table des qubits et source aléatoire empruntées ensemble (pour `measure`).
    pub fn qubits_and_rng(&mut self) -> (&mut QubitTable, &mut StdRng) {
        (&mut self.qubits, &mut self.rng)
    }

    /// Source aléatoire.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Flottant uniforme dans `[0, 1)`.
    pub fn random_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Entier uniforme dans `[lo, hi]` ; `None` si `lo > hi`.
    pub fn random_int(&mut self, lo: i64, hi: i64) -> Option<i64> {
        (lo <= hi).then(|| self.rng.gen_range(lo..=hi))
    }

    /// Émet une ligne : écho console (si activé) **et** journal.
    ///
    /// Un échec d'écriture console est avalé ; le journal est toujours alimenté.
    pub fn emit(&mut self, text: &str) {
        if self.echo {
            if let Err(e) = writeln!(self.console, "{text}").and_then(|()| self.console.flush()) {
                tracing::debug!(error = %e, "écho console impossible");
            }
        }
        self.output.push(text);
    }

    /// Affiche une invite (sans retour à la ligne) puis lit une ligne.
    ///
    /// Le terminateur de ligne est retiré ; EOF ou erreur → `None`.
    pub fn prompt_line(&mut self, prompt: &str) -> Option<String> {
        if !prompt.is_empty() {
            let shown = self.console.write_all(prompt.as_bytes()).and_then(|()| self.console.flush());
            if let Err(e) = shown {
                tracing::debug!(error = %e, "affichage de l'invite impossible");
            }
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
            Err(e) => {
                tracing::debug!(error = %e, "lecture de l'entrée impossible");
                None
            }
        }
    }
}
