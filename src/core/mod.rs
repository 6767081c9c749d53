pub mod catalog;
pub mod query;
pub mod registry;

pub use crate::domain::model::{Confirmation, Creature, CreaturePage, DecoratedCreature};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
