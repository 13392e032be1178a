//! The classic 42-territory world map

use crate::core::error::Result;
use crate::world::definition::{MapDefinition, RegionDefinition};
use crate::world::model::WorldModel;

const REGIONS: &[(&str, u32, &[&str])] = &[
    (
        "Africa",
        3,
        &["North Africa", "Egypt", "East Africa", "Congo", "South Africa", "Madagascar"],
    ),
    (
        "Asia",
        7,
        &[
            "Ural",
            "Siberia",
            "Yakutsk",
            "Kamchatka",
            "Irkutsk",
            "Mongolia",
            "Japan",
            "Afghanistan",
            "China",
            "Middle East",
            "India",
            "Siam",
        ],
    ),
    (
        "Europe",
        5,
        &[
            "Iceland",
            "Great Britain",
            "Scandinavia",
            "Ukraine",
            "Northern Europe",
            "Western Europe",
            "Southern Europe",
        ],
    ),
    (
        "North America",
        5,
        &[
            "Alaska",
            "Northwest Territory",
            "Greenland",
            "Alberta",
            "Ontario",
            "Quebec",
            "Western United States",
            "Eastern United States",
            "Central America",
        ],
    ),
    (
        "Oceania",
        2,
        &["Indonesia", "New Guinea", "Western Australia", "Eastern Australia"],
    ),
    ("South America", 2, &["Venezuela", "Peru", "Brazil", "Argentina"]),
];

const LINKS: &[(&str, &str)] = &[
    // North America
    ("Alaska", "Northwest Territory"),
    ("Alaska", "Alberta"),
    ("Alaska", "Kamchatka"),
    ("Northwest Territory", "Alberta"),
    ("Northwest Territory", "Ontario"),
    ("Northwest Territory", "Greenland"),
    ("Greenland", "Ontario"),
    ("Greenland", "Quebec"),
    ("Greenland", "Iceland"),
    ("Alberta", "Ontario"),
    ("Alberta", "Western United States"),
    ("Ontario", "Quebec"),
    ("Ontario", "Western United States"),
    ("Ontario", "Eastern United States"),
    ("Quebec", "Eastern United States"),
    ("Western United States", "Eastern United States"),
    ("Western United States", "Central America"),
    ("Eastern United States", "Central America"),
    ("Central America", "Venezuela"),
    // South America
    ("Venezuela", "Peru"),
    ("Venezuela", "Brazil"),
    ("Peru", "Brazil"),
    ("Peru", "Argentina"),
    ("Brazil", "Argentina"),
    ("Brazil", "North Africa"),
    // Europe
    ("Iceland", "Great Britain"),
    ("Iceland", "Scandinavia"),
    ("Great Britain", "Scandinavia"),
    ("Great Britain", "Northern Europe"),
    ("Great Britain", "Western Europe"),
    ("Scandinavia", "Northern Europe"),
    ("Scandinavia", "Ukraine"),
    ("Northern Europe", "Western Europe"),
    ("Northern Europe", "Southern Europe"),
    ("Northern Europe", "Ukraine"),
    ("Western Europe", "Southern Europe"),
    ("Western Europe", "North Africa"),
    ("Southern Europe", "Ukraine"),
    ("Southern Europe", "North Africa"),
    ("Southern Europe", "Egypt"),
    ("Southern Europe", "Middle East"),
    ("Ukraine", "Ural"),
    ("Ukraine", "Afghanistan"),
    ("Ukraine", "Middle East"),
    // Africa
    ("North Africa", "Egypt"),
    ("North Africa", "East Africa"),
    ("North Africa", "Congo"),
    ("Egypt", "East Africa"),
    ("Egypt", "Middle East"),
    ("East Africa", "Congo"),
    ("East Africa", "South Africa"),
    ("East Africa", "Madagascar"),
    ("East Africa", "Middle East"),
    ("Congo", "South Africa"),
    ("South Africa", "Madagascar"),
    // Asia
    ("Ural", "Siberia"),
    ("Ural", "China"),
    ("Ural", "Afghanistan"),
    ("Siberia", "Yakutsk"),
    ("Siberia", "Irkutsk"),
    ("Siberia", "Mongolia"),
    ("Siberia", "China"),
    ("Yakutsk", "Kamchatka"),
    ("Yakutsk", "Irkutsk"),
    ("Kamchatka", "Irkutsk"),
    ("Kamchatka", "Mongolia"),
    ("Kamchatka", "Japan"),
    ("Irkutsk", "Mongolia"),
    ("Mongolia", "China"),
    ("Mongolia", "Japan"),
    ("Afghanistan", "China"),
    ("Afghanistan", "India"),
    ("Afghanistan", "Middle East"),
    ("China", "India"),
    ("China", "Siam"),
    ("Middle East", "India"),
    ("India", "Siam"),
    ("Siam", "Indonesia"),
    // Oceania
    ("Indonesia", "New Guinea"),
    ("Indonesia", "Western Australia"),
    ("New Guinea", "Western Australia"),
    ("New Guinea", "Eastern Australia"),
    ("Western Australia", "Eastern Australia"),
];

/// The classic map as a definition, e.g. to write it out as a TOML template
pub fn classic_definition() -> MapDefinition {
    MapDefinition {
        name: "Classic".to_string(),
        links: LINKS
            .iter()
            .map(|&(a, b)| [a.to_string(), b.to_string()])
            .collect(),
        regions: REGIONS
            .iter()
            .map(|&(name, bonus, territories)| RegionDefinition {
                name: name.to_string(),
                bonus,
                territories: territories.iter().map(|t| t.to_string()).collect(),
            })
            .collect(),
    }
}

/// Build the classic world, unowned
pub fn classic_world() -> Result<WorldModel> {
    classic_definition().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_shape() {
        let world = classic_world().unwrap();
        assert_eq!(world.territories().len(), 42);
        assert_eq!(world.regions().len(), 6);

        let bonuses: Vec<(&str, u32)> = world
            .regions()
            .iter()
            .map(|r| (r.name.as_str(), r.bonus))
            .collect();
        assert_eq!(
            bonuses,
            vec![
                ("Africa", 3),
                ("Asia", 7),
                ("Europe", 5),
                ("North America", 5),
                ("Oceania", 2),
                ("South America", 2),
            ]
        );
    }

    #[test]
    fn test_oceania_single_border() {
        let world = classic_world().unwrap();
        let oceania = world.region_by_name("Oceania").unwrap().id;
        let indonesia = world.territory_by_name("Indonesia").unwrap().id;
        assert_eq!(world.region_borders(oceania), vec![indonesia]);
    }

    #[test]
    fn test_every_territory_connected() {
        let world = classic_world().unwrap();
        assert!(world.territories().iter().all(|t| !t.neighbors.is_empty()));
    }
}
