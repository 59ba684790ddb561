//! Scenario configuration models and loaders for Orbyte.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A complete simulation setup parsed from a scenario manifest.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mode: GravityModeConfig,
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    pub central: CentralBodyConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

/// How root bodies are attracted.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GravityModeConfig {
    /// Every root body orbits the central body only.
    #[default]
    Central,
    /// Root bodies also attract each other.
    Mutual,
}

/// The static attractor at the origin.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CentralBodyConfig {
    pub name: String,
    pub mass_kg: f64,
    pub scale_m: f64,
}

/// An orbiting body. `parent` names another body in the same manifest.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub position_m: [f64; 3],
    #[serde(default)]
    pub velocity_m_s: [f64; 3],
    pub mass_kg: f64,
    pub scale_m: f64,
    #[serde(default)]
    pub parent: Option<String>,
    /// Replace `velocity_m_s` with the legacy circular-orbit projection.
    #[serde(default)]
    pub circularize: bool,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

fn default_time_scale() -> f64 {
    1.0
}

impl ScenarioConfig {
    /// Check structural rules that serde cannot express.
    ///
    /// Parents must be declared before their satellites so the runtime arena can be
    /// built in a single pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.central.name.trim().is_empty() {
            return Err(ConfigError::Invalid("central body name is empty".into()));
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be a non-negative number (got {})",
                self.time_scale
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for body in &self.bodies {
            if body.name.trim().is_empty() {
                return Err(ConfigError::Invalid("body name is empty".into()));
            }
            if let Some(parent) = body.parent.as_deref() {
                if !seen.contains(parent) {
                    return Err(ConfigError::Invalid(format!(
                        "body '{}' references parent '{}' which is not declared before it",
                        body.name, parent
                    )));
                }
            }
            if !seen.insert(body.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate body name '{}'",
                    body.name
                )));
            }
        }
        Ok(())
    }

    /// Find a body by name (case-insensitive).
    pub fn find_body(&self, name: &str) -> Option<&BodyConfig> {
        let upper = name.to_uppercase();
        self.bodies.iter().find(|b| b.name.to_uppercase() == upper)
    }
}

/// Load and validate a single scenario from a YAML or TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let scenario: ScenarioConfig = load_record(path)?;
    scenario.validate()?;
    log::info!(
        "loaded scenario {} ({} bodies) from {}",
        scenario.name.as_deref().unwrap_or("<unnamed>"),
        scenario.bodies.len(),
        path.display()
    );
    Ok(scenario)
}

/// Load every scenario in a directory, sorted by file name.
pub fn load_scenarios<P: AsRef<Path>>(dir: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_scenario_file(path))
        .collect();
    entries.sort();
    entries.iter().map(load_scenario).collect()
}

fn is_scenario_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext, "toml" | "yaml" | "yml"))
        .unwrap_or(false)
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
name: test
central:
  name: Sun
  mass_kg: 1.989e30
  scale_m: 6.96e8
bodies:
  - name: Earth
    position_m: [1.496e11, 0.0, 0.0]
    velocity_m_s: [0.0, 29780.0, 0.0]
    mass_kg: 5.972e24
    scale_m: 6.371e6
  - name: Moon
    parent: Earth
    position_m: [3.844e8, 0.0, 0.0]
    mass_kg: 7.342e22
    scale_m: 1.737e6
    circularize: true
"#;

    #[test]
    fn yaml_defaults_apply() {
        let scenario: ScenarioConfig = serde_yaml::from_str(YAML).unwrap();
        scenario.validate().unwrap();
        assert_eq!(scenario.mode, GravityModeConfig::Central);
        assert_eq!(scenario.time_scale, 1.0);
        let moon = scenario.find_body("moon").unwrap();
        assert_eq!(moon.velocity_m_s, [0.0; 3]);
        assert!(moon.circularize);
        assert_eq!(moon.parent.as_deref(), Some("Earth"));
    }

    #[test]
    fn forward_parent_reference_is_rejected() {
        let mut scenario: ScenarioConfig = serde_yaml::from_str(YAML).unwrap();
        scenario.bodies.reverse();
        let err = scenario.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("Moon")));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut scenario: ScenarioConfig = serde_yaml::from_str(YAML).unwrap();
        let mut copy = scenario.bodies[0].clone();
        copy.parent = None;
        scenario.bodies.push(copy);
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn toml_files_are_detected_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mutual.toml");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            r#"
mode = "mutual"
time_scale = 3600.0

[central]
name = "Star"
mass_kg = 2.0e30
scale_m = 7.0e8

[[bodies]]
name = "A"
position_m = [1.0e11, 0.0, 0.0]
velocity_m_s = [0.0, 30000.0, 0.0]
mass_kg = 6.0e24
scale_m = 6.4e6
"#
        )
        .unwrap();

        let scenario = load_scenario(&path).unwrap();
        assert_eq!(scenario.mode, GravityModeConfig::Mutual);
        assert_eq!(scenario.time_scale, 3600.0);
        assert_eq!(scenario.bodies.len(), 1);

        let all = load_scenarios(dir.path()).unwrap();
        assert_eq!(all.len(), 1);
    }
}
