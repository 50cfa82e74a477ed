//! Configuration system
//!
//! Schemas are declared with `config_struct!` so defaults live next to the
//! field; `utils` handles loading from TOML and global access.

#[macro_use]
mod macros;
mod schemas;
mod utils;

pub use schemas::*;
pub use utils::{
    get_config_clone, read_config_file, set_config,
    to_toml_string, validate_config, with_config, CONFIG, CONFIG_FILE_PATH,
};
