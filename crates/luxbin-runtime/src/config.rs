//! Configuration du runtime (graine aléatoire, écho console).
//!
//! La configuration décrit le contexte ; c'est [`ExecCtx`](crate::ExecCtx) qui
//! l'applique.

/// Variable d'environnement : graine `u64` de la source aléatoire.
pub const ENV_SEED: &str = "LUXBIN_SEED";
/// Variable d'environnement : `0`/`false`/`off`/`no` coupe l'écho console.
pub const ENV_ECHO: &str = "LUXBIN_ECHO";

/// Configuration d'un contexte d'exécution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuntimeConfig {
    /// Graine de la source aléatoire ; `None` = entropie de l'OS.
    pub seed: Option<u64>,
    /// Écrit aussi `photon_print` sur la console (le journal est toujours alimenté).
    pub echo: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { seed: None, echo: true }
    }
}

impl RuntimeConfig {
    /// Configuration par défaut.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lit `LUXBIN_SEED` et `LUXBIN_ECHO` ; les valeurs mal formées sont ignorées.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Variante testable de [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => cfg.seed = Some(seed),
                Err(_) => {
                    tracing::debug!(value = %raw, "LUXBIN_SEED ignorée (pas un u64)");
                }
            }
        }
        if let Some(raw) = lookup(ENV_ECHO) {
            match parse_flag(&raw) {
                Some(echo) => cfg.echo = echo,
                None => {
                    tracing::debug!(value = %raw, "LUXBIN_ECHO ignorée (booléen attendu)");
                }
            }
        }
        cfg
    }

    /// Fixe la graine.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Active/coupe l'écho console.
    #[must_use]
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |k| pairs.iter().find(|(key, _)| *key == k).map(|(_, v)| (*v).to_string())
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[(ENV_SEED, "42"), (ENV_ECHO, "off")]));
        assert_eq!(cfg, RuntimeConfig { seed: Some(42), echo: false });
    }

    #[test]
    fn malformed_env_is_ignored() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[(ENV_SEED, "soon"), (ENV_ECHO, "maybe")]));
        assert_eq!(cfg, RuntimeConfig::default());
    }
}
