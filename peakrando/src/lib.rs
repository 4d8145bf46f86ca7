pub mod multiworld;
pub mod randomize;
pub mod regions;
pub mod rules;
pub mod settings;
pub mod spoiler_log;
pub mod traverse;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
