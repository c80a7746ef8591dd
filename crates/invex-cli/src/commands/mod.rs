pub mod extract;
pub mod text;
pub mod vendors;

use std::path::Path;

use invex_core::InvexConfig;

/// Load the config file if one was given, otherwise defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvexConfig> {
    match config_path {
        Some(path) => Ok(InvexConfig::from_file(Path::new(path))?),
        None => Ok(InvexConfig::default()),
    }
}
