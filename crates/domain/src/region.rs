//! Destination regions and the state-code lookup table.

use serde::{Deserialize, Serialize};

/// Geographic region used for carrier coverage and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    North,
    Northeast,
    Midwest,
    Southeast,
    South,
}

impl Region {
    /// All regions, in a fixed order.
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::Northeast,
        Region::Midwest,
        Region::Southeast,
        Region::South,
    ];

    /// Returns the region name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "north",
            Region::Northeast => "northeast",
            Region::Midwest => "midwest",
            Region::Southeast => "southeast",
            Region::South => "south",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every federative unit code and the region it belongs to.
pub const STATE_REGIONS: [(&str, Region); 27] = [
    ("RS", Region::South),
    ("SC", Region::South),
    ("PR", Region::South),
    ("SP", Region::Southeast),
    ("RJ", Region::Southeast),
    ("MG", Region::Southeast),
    ("ES", Region::Southeast),
    ("GO", Region::Midwest),
    ("MT", Region::Midwest),
    ("MS", Region::Midwest),
    ("DF", Region::Midwest),
    ("BA", Region::Northeast),
    ("SE", Region::Northeast),
    ("AL", Region::Northeast),
    ("PE", Region::Northeast),
    ("PB", Region::Northeast),
    ("RN", Region::Northeast),
    ("CE", Region::Northeast),
    ("PI", Region::Northeast),
    ("MA", Region::Northeast),
    ("TO", Region::North),
    ("PA", Region::North),
    ("AP", Region::North),
    ("RR", Region::North),
    ("AM", Region::North),
    ("AC", Region::North),
    ("RO", Region::North),
];

/// Resolves a two-letter state code to its region.
///
/// The match is case-sensitive: `"sp"` is not a known code.
pub fn resolve_region(state_code: &str) -> Option<Region> {
    STATE_REGIONS
        .iter()
        .find(|(code, _)| *code == state_code)
        .map(|(_, region)| *region)
}
