//! World map: territories, regions, ownership and troops

pub mod builder;
pub mod classic;
pub mod definition;
pub mod model;
pub mod region;
pub mod territory;

pub use builder::WorldBuilder;
pub use classic::{classic_definition, classic_world};
pub use definition::{MapDefinition, RegionDefinition};
pub use model::{Advance, AttackOutcome, WorldModel};
pub use region::Region;
pub use territory::Territory;
