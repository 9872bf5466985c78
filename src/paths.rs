// Filesystem locations.
// Resolves platform directories for the config file and the log file.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "codenest")
}

/// Config directory (~/.config/codenest on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Data directory (~/.local/share/codenest on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("codenest.log"))
}
