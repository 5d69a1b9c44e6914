use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use maze_quiz_core::MazeDefinition;

/// Named maze definitions loaded from a JSON catalog.
#[derive(Debug)]
pub(crate) struct MazeCatalog {
    mazes: BTreeMap<String, MazeDefinition>,
}

impl MazeCatalog {
    /// Loads the catalog stored at the provided path.
    pub(crate) fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read maze catalog at {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("invalid maze catalog at {}", path.display()))
    }

    fn from_json(contents: &str) -> Result<Self> {
        let mazes: BTreeMap<String, MazeDefinition> =
            serde_json::from_str(contents).context("failed to parse maze catalog json")?;
        if mazes.is_empty() {
            bail!("maze catalog does not define any mazes");
        }
        Ok(Self { mazes })
    }

    /// Retrieves the definition registered under `name`.
    pub(crate) fn maze(&self, name: &str) -> Result<&MazeDefinition> {
        self.mazes.get(name).with_context(|| {
            let available = self.mazes.keys().cloned().collect::<Vec<_>>().join(", ");
            format!("maze `{name}` not found in catalog; available: {available}")
        })
    }
}
