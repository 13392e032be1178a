//! Declarative map descriptions loaded from TOML
//!
//! ```toml
//! name = "Islands"
//! links = [["Harbor", "Cliffs"]]
//!
//! [[regions]]
//! name = "North"
//! bonus = 2
//! territories = ["Harbor", "Cliffs"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::world::builder::WorldBuilder;
use crate::world::model::WorldModel;

/// One region and the territories it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub name: String,
    pub bonus: u32,
    pub territories: Vec<String>,
}

/// A whole map: regions with their territories, plus undirected links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub links: Vec<[String; 2]>,
    pub regions: Vec<RegionDefinition>,
}

impl MapDefinition {
    /// Parse a map from TOML text
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a map from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading map definition");
        Self::parse_toml(&content)
    }

    pub fn territory_count(&self) -> usize {
        self.regions.iter().map(|r| r.territories.len()).sum()
    }

    /// Build an unowned world from this definition
    pub fn build(&self) -> Result<WorldModel> {
        let mut builder = WorldBuilder::new();
        for region in &self.regions {
            let id = builder.region(region.name.as_str(), region.bonus);
            for territory in &region.territories {
                builder.territory(territory.as_str(), id)?;
            }
        }
        for [a, b] in &self.links {
            builder.link(a, b)?;
        }
        builder.build()
    }
}
