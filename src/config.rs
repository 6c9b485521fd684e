//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//!
//! Variables reconocidas:
//! - `CALLBACK_DEFAULT_MIN_ARGUMENTS`: aridad mínima aplicada por `prepare` (default 0).
//! - `CALLBACK_DEMO_VERBOSE`: el binario demo imprime los argumentos resueltos (default false).
use callback_core::Callback;
use once_cell::sync::Lazy;

use crate::errors::ConfigError;

pub const DEFAULT_MIN_ARGUMENTS_VAR: &str = "CALLBACK_DEFAULT_MIN_ARGUMENTS";
pub const DEMO_VERBOSE_VAR: &str = "CALLBACK_DEMO_VERBOSE";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Defaults aplicados a cada `Callback` nuevo.
    pub invoker: InvokerConfig,
    /// Opciones del binario demo.
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokerConfig {
    pub default_min_arguments: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoConfig {
    pub verbose: bool,
}

impl AppConfig {
    /// Construye la configuración consultando `lookup` por cada variable.
    /// Permite testear sin tocar el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let default_min_arguments = match lookup(DEFAULT_MIN_ARGUMENTS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| invalid(DEFAULT_MIN_ARGUMENTS_VAR, &raw))?,
            None => 0,
        };
        let verbose = match lookup(DEMO_VERBOSE_VAR) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| invalid(DEMO_VERBOSE_VAR, &raw))?,
            None => false,
        };
        Ok(AppConfig { invoker: InvokerConfig { default_min_arguments },
                       demo: DemoConfig { verbose } })
    }

    /// Lee `.env` (si existe) y luego el entorno del proceso.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::Other(e.to_string()));
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Aplica los defaults configurados a un `Callback` recién creado.
    pub fn prepare<F>(&self, callback: Callback<F>) -> Callback<F> {
        callback.min_arguments(self.invoker.default_min_arguments)
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Si el entorno es inválido se usan los defaults.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
        log::warn!("invalid configuration, using defaults: {e}");
        AppConfig::default()
    })
});

fn invalid(key: &str, raw: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_string(),
                                value: raw.to_string() }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
