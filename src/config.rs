use crate::model::{Difficulty, Rules};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) difficulty: Difficulty,
    pub(crate) fps_cap: u32,
    pub(crate) enable_color: bool,
    pub(crate) rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            fps_cap: 20,
            enable_color: true,
            rules: Rules::default(),
        }
    }
}

pub(crate) struct Paths {
    pub(crate) plant_path: PathBuf,
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "plantpal", "PlantPal")
        .context("could not resolve project directories")?;
    Ok(paths_in(proj.data_local_dir().to_path_buf()))
}

/// Paths under `dir`. A directory that cannot be created is not fatal:
/// later writes fail and are swallowed where they happen.
pub(crate) fn paths_in(dir: PathBuf) -> Paths {
    if let Err(e) = fs::create_dir_all(&dir) {
        log::warn!("could not create data directory {}: {e}", dir.display());
    }
    Paths {
        plant_path: dir.join("plant.json"),
        settings_path: dir.join("settings.json"),
        log_path: dir.join("plantpal.log"),
    }
}

pub(crate) fn load_settings(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<Settings>(&s) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("ignoring malformed settings at {}: {e}", path.display());
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)
        .with_context(|| format!("could not replace {}", path.display()))?;
    Ok(())
}

pub(crate) fn atomic_rename(from: &Path, to: &Path) -> io::Result<()> {
    // rename() replaces the target on unix; windows needs it gone first
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)
}
