//! Project configuration

mod ggallin_toml;

pub use ggallin_toml::*;
