//! Environment Detection - OS detection and executable lookup

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsType {
    Windows,
    MacOS,
    Linux,
    Unknown,
}

impl OsType {
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOS
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

/// Whether `name` resolves to an executable on `PATH`
pub fn on_path(name: &str) -> bool {
    which::which(name).is_ok()
}
