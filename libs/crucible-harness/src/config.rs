// Sandbox profile management: which language id, version, and file names the
// remote compile-and-run service sees for each sandboxed language.

use anyhow::{bail, Context, Result};
use crucible_common::error::ExecutionError;
use crucible_common::types::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// How one language is presented to the remote sandbox service.
///
/// `solution_file` receives the user's source, `harness_file` the generated
/// entry point. For single-file languages the two names coincide and the
/// generator appends its driver to the user code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub name: String,
    pub version: String,
    pub solution_file: String,
    pub harness_file: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfilesJson {
    languages: Vec<LanguageProfile>,
}

/// Registry of sandbox profiles. JavaScript never appears here: it runs
/// in-process and has no sandbox identity.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<Language, LanguageProfile>,
}

impl ProfileRegistry {
    /// Fixed default versions per language. No version negotiation happens
    /// anywhere; these are what the sandbox service runs.
    pub fn built_in() -> Self {
        let defaults = [
            LanguageProfile {
                name: "python".to_string(),
                version: "3.10.0".to_string(),
                solution_file: "main.py".to_string(),
                harness_file: "main.py".to_string(),
            },
            LanguageProfile {
                name: "java".to_string(),
                version: "15.0.2".to_string(),
                solution_file: "Solution.java".to_string(),
                harness_file: "Main.java".to_string(),
            },
            LanguageProfile {
                name: "cpp".to_string(),
                version: "10.2.0".to_string(),
                solution_file: "solution.hpp".to_string(),
                harness_file: "main.cpp".to_string(),
            },
        ];

        let mut profiles = HashMap::new();
        for profile in defaults {
            // Built-in names are always canonical ids.
            let language = Language::from_alias(&profile.name)
                .expect("built-in profile names are canonical");
            profiles.insert(language, profile);
        }
        ProfileRegistry { profiles }
    }

    /// Load profiles from a languages.json override file.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            bail!("profile config file not found: {}", config_path.display());
        }

        let content =
            fs::read_to_string(config_path).context("Failed to read languages.json")?;
        let parsed: ProfilesJson =
            serde_json::from_str(&content).context("Failed to parse languages.json")?;

        let mut profiles = HashMap::new();
        for profile in parsed.languages {
            let language = Language::from_alias(&profile.name).map_err(|_| {
                anyhow::anyhow!("Unknown language '{}' in languages.json", profile.name)
            })?;
            if language == Language::JavaScript {
                bail!("javascript runs in-process and takes no sandbox profile");
            }
            profiles.insert(language, profile);
        }

        if profiles.is_empty() {
            bail!("No languages configured in languages.json");
        }

        Ok(ProfileRegistry { profiles })
    }

    /// Load `config/languages.json` if present, otherwise the built-ins.
    pub fn load_or_default() -> Self {
        let default_path = Path::new("config/languages.json");
        match Self::load(default_path) {
            Ok(registry) => {
                debug!("Loaded sandbox profiles from {}", default_path.display());
                registry
            }
            Err(e) => {
                debug!("Using built-in sandbox profiles ({})", e);
                Self::built_in()
            }
        }
    }

    /// Get the sandbox profile for a language.
    pub fn get(&self, language: Language) -> Result<&LanguageProfile, ExecutionError> {
        self.profiles.get(&language).ok_or_else(|| {
            ExecutionError::BackendUnavailable(format!(
                "no sandbox profile configured for language: {language}"
            ))
        })
    }

    /// All languages with a sandbox profile.
    pub fn sandboxed_languages(&self) -> Vec<Language> {
        self.profiles.keys().copied().collect()
    }
}
