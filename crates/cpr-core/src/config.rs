use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// External storage root assumed when neither config nor flags name one.
pub const DEFAULT_EXTERNAL_STORAGE_ROOT: &str = "/storage/emulated/0";

/// Global configuration loaded from `~/.config/cpr/config.toml`.
///
/// Every field is optional; unset fields fall back to built-in defaults at
/// the call site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CprConfig {
    /// Root of the device's shared external storage.
    #[serde(default)]
    pub external_storage_root: Option<PathBuf>,
    /// Directory receiving fallback cache copies.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Fallback copy buffer size in bytes (unset = built-in 64 KiB).
    #[serde(default)]
    pub copy_buffer_bytes: Option<usize>,
}

/// First-run config file contents. All keys commented out so the file
/// documents itself without pinning defaults.
const CONFIG_TEMPLATE: &str = "\
# cpr configuration
#
# external_storage_root = \"/storage/emulated/0\"
# cache_dir = \"/home/you/.cache/cpr\"
# copy_buffer_bytes = 65536
";

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cpr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a commented template if none
/// exists.
pub fn load_or_init() -> Result<CprConfig> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, CONFIG_TEMPLATE)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(CprConfig::default());
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CprConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Default cache directory for fallback copies (`~/.cache/cpr`), created
/// on demand.
pub fn default_cache_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cpr")?;
    let dir = xdg_dirs.get_cache_home();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
