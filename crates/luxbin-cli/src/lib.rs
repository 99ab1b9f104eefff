//! luxbin-cli — bibliothèque interne du binaire `luxbin`
//!
//! Le parsing d'arguments reste dans `main.rs` ; ici on exécute des commandes
//! déjà typées contre le runtime, en écrivant dans un `Write` fourni (stdout en
//! vrai, un `Vec<u8>` en test).
//!
//! Points clés :
//! - Inspection du registre standard (`list`)
//! - Appel direct d'un builtin avec des arguments littéraux JSON (`call`)
//! - Statistiques de mesure du moteur de qubits (`measure`)
//! - Consultation de la table des longueurs d'onde (`spectrum`, `nearest`)
//! - Traces (`feature = "trace"`) et couleurs (`feature = "color"`) optionnelles

#![deny(unused_must_use)]
#![forbid(unsafe_code)]

use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context, Result};
use luxbin_runtime::{spectrum, Registry, Runtime, RuntimeConfig, Value};
#[cfg(feature = "color")]
use owo_colors::OwoColorize;

// ───────────────────────────── Types publics ─────────────────────────────

/// Commande haut-niveau (sans parsing CLI — réservé à main.rs).
#[derive(Clone, Debug)]
pub enum Command {
    /// Liste les builtins du registre standard.
    List(ListTask),
    /// Appelle un builtin par son nom.
    Call(CallTask),
    /// Superpose puis mesure `trials` qubits et compte les issues.
    Measure(MeasureTask),
    /// Longueur d'onde de chaque caractère d'un texte.
    Spectrum(SpectrumTask),
    /// Caractère le plus proche d'une longueur d'onde.
    Nearest(NearestTask),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ListTask {
    pub format: ListFormat,
}

#[derive(Clone, Debug, Default)]
pub struct CallTask {
    pub name: String,
    pub args: Vec<String>, // littéraux JSON, texte brut sinon
}

#[derive(Clone, Debug)]
pub struct MeasureTask {
    pub trials: u32,
    pub states: usize, // arguments passés à quantum_superpose
}

impl Default for MeasureTask {
    fn default() -> Self {
        Self { trials: 1000, states: 2 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpectrumTask {
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct NearestTask {
    pub wavelength: f64,
}

// ───────────────────────────── Initialisation ─────────────────────────────

/// Initialise le logger selon la feature `trace`.
pub fn init_logger() {
    #[cfg(feature = "trace")]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .format_timestamp_secs()
            .try_init();
    }
}

// ───────────────────────────── Exécution ─────────────────────────────

/// Exécute une commande sur stdout. Retourne un code de sortie.
pub fn execute(cmd: Command, cfg: &RuntimeConfig) -> Result<i32> {
    let mut w = BufWriter::new(io::stdout().lock());
    let code = execute_to(cmd, cfg, &mut w)?;
    w.flush()?;
    Ok(code)
}

/// Variante de [`execute`] vers un writer arbitraire.
pub fn execute_to(cmd: Command, cfg: &RuntimeConfig, out: &mut dyn Write) -> Result<i32> {
    #[cfg(feature = "trace")]
    log::debug!("commande: {cmd:?}");
    match cmd {
        Command::List(t) => list_entry(&t, out)?,
        Command::Call(t) => call_entry(t, cfg, out)?,
        Command::Measure(t) => measure_entry(&t, cfg, out)?,
        Command::Spectrum(t) => spectrum_entry(&t, out)?,
        Command::Nearest(t) => nearest_entry(&t, out)?,
    }
    Ok(0)
}

fn list_entry(task: &ListTask, out: &mut dyn Write) -> Result<()> {
    let reg = Registry::standard();
    match task.format {
        ListFormat::Table => {
            for e in reg.entries() {
                writeln!(out, "{:<20} {:>2}  {}", e.name, e.arity, e.flags.labels().join(", "))?;
            }
        }
        ListFormat::Json => {
            let payload: Vec<_> = reg
                .entries()
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "name": e.name,
                        "arity": e.arity.code(),
                        "flags": e.flags.labels(),
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        }
    }
    Ok(())
}

fn call_entry(task: CallTask, cfg: &RuntimeConfig, out: &mut dyn Write) -> Result<()> {
    let args: Vec<Value> = task.args.iter().map(|a| parse_arg(a)).collect();
    let mut rt = Runtime::standard(cfg.clone());
    let result = rt
        .call(&task.name, args)
        .with_context(|| format!("appel de `{}`", task.name))?;
    writeln!(out, "{result}")?;
    Ok(())
}

fn measure_entry(task: &MeasureTask, cfg: &RuntimeConfig, out: &mut dyn Write) -> Result<()> {
    if task.trials == 0 {
        bail!("--trials doit être > 0");
    }
    let mut rt = Runtime::standard(cfg.clone());
    let mut ones = 0_u32;
    for _ in 0..task.trials {
        let q = rt.call("quantum_superpose", vec![Value::Nil; task.states])?;
        if rt.call("quantum_measure", vec![q])? == Value::Int(1) {
            ones += 1;
        }
    }
    let zeros = task.trials - ones;
    let total = f64::from(task.trials);
    writeln!(out, "0: {zeros:>8} ({:.2}%)", 100.0 * f64::from(zeros) / total)?;
    writeln!(out, "1: {ones:>8} ({:.2}%)", 100.0 * f64::from(ones) / total)?;

    let n = if task.states == 0 { 2 } else { task.states };
    status_info("P(0)", &format!("attendu {:.4}", 1.0 / n as f64));
    Ok(())
}

fn spectrum_entry(task: &SpectrumTask, out: &mut dyn Write) -> Result<()> {
    for c in task.text.chars() {
        match spectrum::lookup(c) {
            Some(wl) => writeln!(out, "{c:?}\t{wl:.1}")?,
            None => writeln!(out, "{c:?}\t{:.1}\t(hors table)", spectrum::DEFAULT_WAVELENGTH)?,
        }
    }
    Ok(())
}

fn nearest_entry(task: &NearestTask, out: &mut dyn Write) -> Result<()> {
    if task.wavelength.is_nan() {
        bail!("longueur d'onde invalide: NaN");
    }
    writeln!(out, "{:?}", spectrum::nearest_char(task.wavelength))?;
    Ok(())
}

// ───────────────────────────── Arguments ─────────────────────────────

/// Argument de ligne de commande → valeur : littéral JSON si possible, sinon
/// le texte brut (`call photon_upper lux` marche sans guillemets).
pub fn parse_arg(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map_or_else(|_| Value::from(raw), |json| value_from_json(&json))
}

/// Conversion JSON → [`Value`]. Un objet n'a pas d'équivalent : il est gardé
/// comme texte.
pub fn value_from_json(json: &serde_json::Value) -> Value {
    use serde_json::Value as J;
    match json {
        J::Null => Value::Nil,
        J::Bool(b) => Value::Bool(*b),
        J::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or_default(),
        J::String(s) => Value::Str(s.clone()),
        J::Array(items) => Value::Array(items.iter().map(value_from_json).collect()),
        J::Object(_) => Value::Str(json.to_string()),
    }
}

// ───────────────────────────── Sorties jolies ─────────────────────────────

pub fn status_ok(tag: &str, msg: &str) {
    #[cfg(feature = "color")]
    {
        eprintln!("{} {}", tag.green().bold(), msg);
    }
    #[cfg(not(feature = "color"))]
    {
        eprintln!("{tag} {msg}");
    }
}

pub fn status_info(tag: &str, msg: &str) {
    #[cfg(feature = "color")]
    {
        eprintln!("{} {}", tag.blue().bold(), msg);
    }
    #[cfg(not(feature = "color"))]
    {
        eprintln!("{tag} {msg}");
    }
}

// ───────────────────────────── Tests ─────────────────────────────
