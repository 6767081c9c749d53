pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{CliConfig, ServiceConfig};
pub use crate::core::{catalog::Catalog, registry::CaptureRegistry};
pub use server::{build_router, AppState};
pub use utils::error::{PokedexError, Result};
