// ============================================================================
// CONFIG - Configuración en tiempo de compilación
// ============================================================================
// Valores inyectados por build.rs (.env) o por el entorno al compilar.
// ============================================================================

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub request_timeout_ms: u32,
    pub log_level: LevelFilter,
    pub enable_logging: bool,
    /// Claves con valores no válidos que cayeron al valor por defecto
    pub fallbacks: Vec<&'static str>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            log_level: LevelFilter::Info,
            enable_logging: true,
            fallbacks: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_URL"),
            option_env!("REQUEST_TIMEOUT_MS"),
            option_env!("LOG_LEVEL"),
            option_env!("ENABLE_LOGGING"),
        )
    }

    /// Construye la configuración a partir de valores crudos (None = usar defecto)
    pub fn from_values(
        api_url: Option<&str>,
        request_timeout_ms: Option<&str>,
        log_level: Option<&str>,
        enable_logging: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = request_timeout_ms {
            match raw.trim().parse::<u32>() {
                Ok(ms) if ms > 0 => config.request_timeout_ms = ms,
                _ => config.fallbacks.push("REQUEST_TIMEOUT_MS"),
            }
        }

        if let Some(raw) = log_level {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => config.fallbacks.push("LOG_LEVEL"),
            }
        }

        if let Some(raw) = enable_logging {
            match raw.trim().parse::<bool>() {
                Ok(enabled) => config.enable_logging = enabled,
                Err(_) => config.fallbacks.push("ENABLE_LOGGING"),
            }
        }

        config
    }

    /// Nivel efectivo de logging (Off si está deshabilitado)
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.enable_logging {
            self.log_level
        } else {
            LevelFilter::Off
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
