//! Package manifest and build-time feature flag editing.
//!
//! The manifest is edited as a JSON document (parse, modify, serialize) with
//! key order preserved, so unrelated entries round-trip untouched.

use crate::{WinUtilError, WinUtilResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEPENDENCIES: &str = "dependencies";

/// A package manifest (`{"dependencies": {name: source, ...}, ...}`).
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> WinUtilResult<Self> {
        let path = path.as_ref().to_path_buf();
        let json = fs::read_to_string(&path)?;
        let manifest = Self::parse(&json, path)?;
        debug!(path = ?manifest.path, "Loaded manifest");
        Ok(manifest)
    }

    /// Parse manifest text that will later be saved to `path`.
    pub fn parse(json: &str, path: impl Into<PathBuf>) -> WinUtilResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(document) => Ok(Self {
                path: path.into(),
                document,
            }),
            _ => Err(WinUtilError::Manifest(
                "manifest root must be a JSON object".into(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.document
            .get(DEPENDENCIES)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(name))
    }

    /// Add `name: source` unless `name` is already listed.
    ///
    /// Returns whether the manifest changed.
    pub fn add_dependency(&mut self, name: &str, source: &str) -> WinUtilResult<bool> {
        let deps = self
            .document
            .entry(DEPENDENCIES)
            .or_insert_with(|| Value::Object(Map::new()));

        let Value::Object(deps) = deps else {
            return Err(WinUtilError::Manifest(format!(
                "\"{DEPENDENCIES}\" is not an object"
            )));
        };

        if deps.contains_key(name) {
            return Ok(false);
        }
        deps.insert(name.to_string(), Value::String(source.to_string()));
        Ok(true)
    }

    pub fn to_json(&self) -> WinUtilResult<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Write the manifest back to the file it was loaded from.
    pub fn save(&self) -> WinUtilResult<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        fs::write(&self.path, json)?;
        info!(path = ?self.path, "Saved manifest");
        Ok(())
    }
}

/// `;`-separated list of build-time define symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefineSymbols(Vec<String>);

impl DefineSymbols {
    pub fn parse(symbols: &str) -> Self {
        Self(
            symbols
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.iter().any(|s| s == symbol)
    }

    /// Append `symbol` unless present. Returns whether it was added.
    pub fn add(&mut self, symbol: &str) -> bool {
        if self.contains(symbol) {
            return false;
        }
        self.0.push(symbol.to_string());
        true
    }
}

impl fmt::Display for DefineSymbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(";"))
    }
}

/// What [`install`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Packages added to the manifest.
    pub added_packages: Vec<String>,
    /// Whether the feature flag was newly enabled.
    pub flag_added: bool,
    /// The resulting define-symbol string.
    pub defines: String,
}

/// Add every missing package to the manifest and enable `flag`.
///
/// The manifest file is only rewritten when a package was added.
pub fn install(
    manifest_path: impl AsRef<Path>,
    packages: &BTreeMap<String, String>,
    defines: &str,
    flag: &str,
) -> WinUtilResult<InstallReport> {
    let mut manifest = PackageManifest::load(manifest_path)?;

    let mut added_packages = Vec::new();
    for (name, source) in packages {
        if manifest.add_dependency(name, source)? {
            info!(package = %name, %source, "Added package");
            added_packages.push(name.clone());
        } else {
            debug!(package = %name, "Package already present");
        }
    }
    if !added_packages.is_empty() {
        manifest.save()?;
    }

    let mut symbols = DefineSymbols::parse(defines);
    let flag_added = !flag.is_empty() && symbols.add(flag);
    if flag_added {
        info!(flag, "Enabled define symbol");
    }

    Ok(InstallReport {
        added_packages,
        flag_added,
        defines: symbols.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
  "dependencies": {
    "com.example.zeta": "1.0.0",
    "com.example.alpha": "2.1.0"
  },
  "scopedRegistries": []
}"#;

    #[test]
    fn test_add_dependency_preserves_order() {
        let mut m = PackageManifest::parse(MANIFEST, "manifest.json").unwrap();
        assert!(m.has_dependency("com.example.alpha"));
        assert!(!m.has_dependency("com.example.beta"));

        assert!(m.add_dependency("com.example.beta", "https://example.com/beta.git").unwrap());
        assert!(!m.add_dependency("com.example.beta", "other").unwrap());

        let json = m.to_json().unwrap();
        let zeta = json.find("zeta").unwrap();
        let alpha = json.find("alpha").unwrap();
        let beta = json.find("beta").unwrap();
        let scoped = json.find("scopedRegistries").unwrap();
        assert!(zeta < alpha && alpha < beta && beta < scoped);
        assert!(json.contains("https://example.com/beta.git"));
        assert!(!json.contains("\"other\""));
    }

    #[test]
    fn test_add_dependency_creates_section() {
        let mut m = PackageManifest::parse("{}", "manifest.json").unwrap();
        assert!(m.add_dependency("pkg", "1.0").unwrap());
        assert!(m.has_dependency("pkg"));
    }

    #[test]
    fn test_bad_manifests() {
        assert!(matches!(
            PackageManifest::parse("[1, 2]", "m.json"),
            Err(WinUtilError::Manifest(_))
        ));
        assert!(matches!(
            PackageManifest::parse("{", "m.json"),
            Err(WinUtilError::Json(_))
        ));
        let mut m = PackageManifest::parse(r#"{"dependencies": []}"#, "m.json").unwrap();
        assert!(matches!(
            m.add_dependency("pkg", "1.0"),
            Err(WinUtilError::Manifest(_))
        ));
    }

    #[test]
    fn test_define_symbols() {
        let mut s = DefineSymbols::parse("DEBUG; STEAM ;;");
        assert_eq!(s.to_string(), "DEBUG;STEAM");
        assert!(s.contains("STEAM"));
        assert!(!s.contains("steam"));
        assert!(s.add("UNITASK_SUPPORT"));
        assert!(!s.add("UNITASK_SUPPORT"));
        assert_eq!(s.to_string(), "DEBUG;STEAM;UNITASK_SUPPORT");
        assert_eq!(DefineSymbols::parse("").to_string(), "");
    }

    #[test]
    fn test_install_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, MANIFEST).unwrap();

        let mut packages = BTreeMap::new();
        packages.insert("com.example.alpha".to_string(), "9.9.9".to_string());
        packages.insert("com.example.tasks".to_string(), "https://example.com/t.git".to_string());

        let first = install(&path, &packages, "DEBUG", "TASKS").unwrap();
        assert_eq!(first.added_packages, vec!["com.example.tasks".to_string()]);
        assert!(first.flag_added);
        assert_eq!(first.defines, "DEBUG;TASKS");

        let second = install(&path, &packages, &first.defines, "TASKS").unwrap();
        assert!(second.added_packages.is_empty());
        assert!(!second.flag_added);
        assert_eq!(second.defines, "DEBUG;TASKS");

        let saved = PackageManifest::load(&path).unwrap();
        assert_eq!(saved.path(), path.as_path());
        assert!(saved.has_dependency("com.example.tasks"));
        // existing entry untouched
        assert!(saved.to_json().unwrap().contains("\"2.1.0\""));
    }
}
