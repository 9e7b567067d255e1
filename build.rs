use std::env;
use std::fs;
use std::path::Path;

/// Variables que la app lee con `option_env!` (ver src/config.rs)
const KNOWN_KEYS: &[&str] = &["API_URL", "REQUEST_TIMEOUT_MS", "LOG_LEVEL", "ENABLE_LOGGING"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in KNOWN_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=No .env file found. API_URL falls back to http://localhost:3000");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        if !KNOWN_KEYS.contains(&key) {
            println!("cargo:warning=Ignoring unknown .env key: {}", key);
            continue;
        }

        // El entorno del proceso tiene prioridad sobre .env
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
