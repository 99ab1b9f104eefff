//! `luxbin` — CLI du runtime LUXBIN
//!
//! Ici on fait uniquement : parsing d'arguments, initialisation (logger,
//! couleur, config runtime), et délégation à `luxbin_cli` (lib).

#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use luxbin_runtime::RuntimeConfig;

use luxbin_cli as cli;

// ──────────────────────────── CLI (clap) ────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "luxbin", version, about = "LUXBIN CLI — builtins, qubits, spectre", long_about = None)]
struct Opt {
    /// Augmente la verbosité (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux (casse la verbosité)
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    /// Force la couleur (si la feature `color` est compilée)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto, global = true)]
    color: ColorChoice,

    /// Graine de la source aléatoire (remplace LUXBIN_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Coupe l'écho console de photon_print (remplace LUXBIN_ECHO)
    #[arg(long = "no-echo", global = true)]
    no_echo: bool,

    /// Sous-commandes
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lister les builtins (nom, arité, catégories)
    List {
        /// Sortie JSON (pretty-printed) au lieu du tableau texte
        #[arg(long)]
        json: bool,
    },

    /// Appeler un builtin ; chaque argument est un littéral JSON (texte brut sinon)
    Call {
        /// Nom du builtin (ex. photon_concat)
        name: String,
        /// Arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Superposer puis mesurer N qubits et afficher la répartition
    Measure {
        /// Nombre de tirages
        #[arg(short = 'n', long, default_value_t = 1000)]
        trials: u32,
        /// Nombre d'états passés à quantum_superpose
        #[arg(short = 'k', long, default_value_t = 2)]
        states: usize,
    },

    /// Longueur d'onde de chaque caractère d'un texte
    Spectrum {
        /// Texte à décomposer
        text: String,
    },

    /// Caractère le plus proche d'une longueur d'onde (nm)
    Nearest {
        /// Longueur d'onde
        #[arg(allow_hyphen_values = true)]
        wavelength: f64,
    },
}

// ──────────────────────────── Logger / Verbosité ────────────────────────────

fn init_telemetry(verbose: u8, quiet: bool) {
    #[cfg(feature = "trace")]
    {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        std::env::set_var(
            "RUST_LOG",
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        );
        cli::init_logger();
    }
    #[cfg(not(feature = "trace"))]
    let _ = (verbose, quiet);
}

fn init_color(choice: ColorChoice) {
    // owo-colors détecte le TTY ; on ne force que sur demande
    match choice {
        ColorChoice::Auto => {}
        ColorChoice::Always => {
            std::env::set_var("CLICOLOR_FORCE", "1");
            std::env::remove_var("NO_COLOR");
        }
        ColorChoice::Never => {
            std::env::set_var("NO_COLOR", "1");
            std::env::remove_var("CLICOLOR_FORCE");
        }
    }
}

/// Environnement, puis drapeaux de la ligne de commande par-dessus.
fn runtime_config(opt: &Opt) -> RuntimeConfig {
    let mut cfg = RuntimeConfig::from_env();
    if let Some(seed) = opt.seed {
        cfg = cfg.with_seed(seed);
    }
    if opt.no_echo {
        cfg = cfg.with_echo(false);
    }
    cfg
}

// ──────────────────────────── main ────────────────────────────

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main() -> Result<()> {
    let opt = Opt::parse();

    init_color(opt.color);
    init_telemetry(opt.verbose, opt.quiet);
    let cfg = runtime_config(&opt);

    use cli::{CallTask, ListFormat, ListTask, MeasureTask, NearestTask, SpectrumTask};

    let command = match opt.cmd {
        Command::List { json } => {
            let format = if json { ListFormat::Json } else { ListFormat::Table };
            cli::Command::List(ListTask { format })
        }
        Command::Call { name, args } => cli::Command::Call(CallTask { name, args }),
        Command::Measure { trials, states } => {
            cli::Command::Measure(MeasureTask { trials, states })
        }
        Command::Spectrum { text } => cli::Command::Spectrum(SpectrumTask { text }),
        Command::Nearest { wavelength } => cli::Command::Nearest(NearestTask { wavelength }),
    };

    let code = cli::execute(command, &cfg).context("échec d'exécution de la commande")?;
    if code != 0 {
        std::process::exit(code);
    }
    if opt.verbose > 0 && !opt.quiet {
        cli::status_ok("OK", "terminé");
    }
    Ok(())
}
