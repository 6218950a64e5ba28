use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the user configuration file, looked up in the config directory.
pub const INI_FILENAME: &str = "gfx2.ini";
/// Name of the bundled defaults, looked up in the data directory.
pub const INIDEF_FILENAME: &str = "gfx2def.ini";
/// Sub-directory of the data directory holding Lua scripts.
pub const SCRIPTS_SUBDIRECTORY: &str = "scripts";

/// Data shipped next to the sources, used when no installed copy exists.
const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

#[inline(always)]
pub fn append_to_dir(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "GrafX2")
}

/// Per-user configuration directory, or the working directory when the
/// platform has none.
pub fn default_config_dir() -> PathBuf {
    project_dirs().map_or_else(|| PathBuf::from("."), |d| d.config_dir().to_path_buf())
}

/// Directory holding `gfx2def.ini` and the scripts.
///
/// The installed per-user data directory wins when it already holds the
/// defaults; otherwise the copy bundled with the crate is used.
pub fn default_data_dir() -> PathBuf {
    if let Some(dirs) = project_dirs() {
        let installed = dirs.data_dir();
        if append_to_dir(installed, INIDEF_FILENAME).is_file() {
            return installed.to_path_buf();
        }
    }
    PathBuf::from(BUNDLED_DATA_DIR)
}

/// `<data_dir>/scripts`, made absolute when the directory exists.
pub fn default_scripts_dir(data_dir: &Path) -> PathBuf {
    let base = std::fs::canonicalize(data_dir).unwrap_or_else(|_| data_dir.to_path_buf());
    append_to_dir(&base, SCRIPTS_SUBDIRECTORY)
}
