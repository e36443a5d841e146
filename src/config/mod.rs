mod assessment;

pub use assessment::{AssessmentConfig, ASSESSMENT_FILE};

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Environment variable consulted when no assets path is given on the command line.
pub const ASSETS_ENV: &str = "CLEARSPEAK_ASSETS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub assets_root: PathBuf,
}

impl AppConfig {
    /// Resolves the assets root: explicit override, then `CLEARSPEAK_ASSETS`,
    /// then the nearest `assets/` directory above the running binary.
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        let root = match path.or_else(|| std::env::var_os(ASSETS_ENV).map(PathBuf::from)) {
            Some(custom) => canonicalize_dir(&custom)?,
            None => default_assets_root()?,
        };
        Ok(Self { assets_root: root })
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.assets_root.join("dataset.json")
    }

    pub fn lexicon_path(&self) -> PathBuf {
        self.assets_root.join("phonemes").join("lexicon.txt")
    }

    pub fn assessment(&self) -> Result<AssessmentConfig> {
        Ok(AssessmentConfig::load_from_assets(&self.assets_root)?)
    }
}

fn canonicalize_dir(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve assets directory at {:?}", path))?;
    if canonical.is_dir() {
        Ok(canonical)
    } else {
        Err(anyhow!("assets path {:?} is not a directory", canonical))
    }
}

fn default_assets_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("unable to resolve current executable path")?;
    let assets = exe
        .ancestors()
        .find_map(|dir| {
            let candidate = dir.join("assets");
            candidate.is_dir().then_some(candidate)
        })
        .ok_or_else(|| anyhow!("could not locate default assets directory alongside binary"))?;
    Ok(assets)
}
