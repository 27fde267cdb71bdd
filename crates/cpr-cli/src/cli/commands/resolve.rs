//! `cpr resolve` – resolve a URI against a provider fixture.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use cpr_core::config::{self, CprConfig, DEFAULT_EXTERNAL_STORAGE_ROOT};
use cpr_core::events::LogWarningSink;
use cpr_core::fixture::FixtureSource;
use cpr_core::provider::StorageEnv;
use cpr_core::resolve::{resolve, Resolution};
use cpr_core::uri::ContentUri;

pub fn run_resolve(
    cfg: &CprConfig,
    raw_uri: &str,
    fixture: Option<&Path>,
    storage_root: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let uri = ContentUri::parse(raw_uri)?;
    let source = match fixture {
        Some(path) => FixtureSource::from_path(path)?,
        None => FixtureSource::new(),
    };
    let env = storage_env(cfg, storage_root, cache_dir)?;

    let resolution = resolve(&source, &env, &LogWarningSink, &uri);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        match &resolution {
            Resolution::Local(path) => println!("local  {}", path.display()),
            Resolution::Remote(address) => println!("remote {}", address),
            Resolution::Unresolved => println!("unresolved"),
        }
    }
    Ok(())
}

/// Flags override config; config overrides built-in defaults. The cache
/// dir is created so the fallback can write into it.
fn storage_env(
    cfg: &CprConfig,
    storage_root: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
) -> Result<StorageEnv> {
    let root = storage_root
        .or_else(|| cfg.external_storage_root.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXTERNAL_STORAGE_ROOT));

    let cache = match cache_dir.or_else(|| cfg.cache_dir.clone()) {
        Some(dir) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("create cache dir: {}", dir.display()))?;
            dir
        }
        None => config::default_cache_dir()?,
    };

    let mut env = StorageEnv::new(root, cache);
    if let Some(bytes) = cfg.copy_buffer_bytes {
        env = env.with_copy_buffer(bytes);
    }
    Ok(env)
}
