//! Fixture-case loading for the integration harness and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    /// Parses without diagnostics.
    Clean,
    /// Expected to surface diagnostics while still returning statements.
    Diagnostics,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedOutcome {
    /// Number of top-level statements the parse must yield.
    pub statements: usize,
    /// Golden s-expression tree, relative to the case directory.
    pub tree_file: Option<String>,
    /// One fragment per expected diagnostic, in emission order.
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub script_path: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    pub fn read_text(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative_path))
            .with_context(|| format!("Reading {} fixture file {}", self.name, relative_path))
    }

    pub fn read_script(&self) -> Result<String> {
        fs::read_to_string(&self.script_path)
            .with_context(|| format!("Reading {}", self.script_path.display()))
    }
}

/// Loads every case directory under `scripts_dir`, sorted by name.
pub fn load_cases(scripts_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(scripts_dir).with_context(|| format!("Reading {}", scripts_dir.display()))?
    {
        let dir = entry?.path();
        if !dir.is_dir() {
            continue;
        }

        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let spec_path = dir.join("case.json");
        let spec_text = fs::read_to_string(&spec_path)
            .with_context(|| format!("Reading {}", spec_path.display()))?;
        let spec: CaseSpec = serde_json::from_str(&spec_text)
            .with_context(|| format!("Parsing {}", spec_path.display()))?;

        let script_path = dir.join("script.scribe");
        ensure!(
            script_path.exists(),
            "Case {} is missing script.scribe",
            name
        );

        cases.push(Case {
            name,
            dir,
            script_path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No fixture cases found in {}",
        scripts_dir.display()
    );
    cases.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(cases)
}
