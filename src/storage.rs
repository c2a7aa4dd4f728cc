use crate::model::{Plan, PLAN_VERSION};
use anyhow::{bail, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un planning depuis un support.
    fn load(&self) -> anyhow::Result<Plan>;
    /// Sauvegarde de manière atomique.
    fn save(&self, plan: &Plan) -> anyhow::Result<()>;
}

/// Planning stocké dans un fichier JSON unique.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Planning vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Plan> {
        if !self.exists() {
            return Ok(Plan::default());
        }
        self.load()
    }

    /// Dossier du fichier ; le fichier temporaire doit y être créé pour que
    /// le renommage reste atomique.
    fn parent_dir(&self) -> anyhow::Result<&Path> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            bail!("plan directory does not exist: {}", dir.display());
        }
        Ok(dir)
    }
}

fn check_version(plan: &Plan, path: &Path) -> anyhow::Result<()> {
    if plan.version == 0 || plan.version > PLAN_VERSION {
        bail!(
            "unsupported plan version {} in {} (supported: 1..={PLAN_VERSION})",
            plan.version,
            path.display()
        );
    }
    Ok(())
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Plan> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let plan: Plan = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        check_version(&plan, &self.path)?;
        #[cfg(feature = "logging")]
        tracing::debug!(
            version = plan.version,
            departments = plan.departments.len(),
            shifts = plan.shifts.len(),
            "plan loaded"
        );
        Ok(plan)
    }

    fn save(&self, plan: &Plan) -> anyhow::Result<()> {
        check_version(plan, &self.path)?;
        let dir = self.parent_dir()?;
        let json = serde_json::to_vec_pretty(plan)?;
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .with_context(|| format!("atomic rename to {}", self.path.display()))?;
        #[cfg(feature = "logging")]
        tracing::debug!(path = %self.path.display(), "plan saved");
        Ok(())
    }
}
