use std::collections::BTreeMap;

/// A named station with the grid coordinates declared in the map file.
/// Coordinates take part in duplicate detection at parse time and are
/// carried along as metadata afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Station {
    pub name: String,
    pub x: u32,
    pub y: u32,
}

/// Validated map: the station set and the undirected connections
/// between stations.
///
/// Stations are keyed by name in a `BTreeMap` so that every iteration
/// over them is in ascending name order.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub stations: BTreeMap<String, Station>,
    pub connections: Vec<(String, String)>,
}

impl Network {
    pub fn new() -> Self {
        Network {
            stations: BTreeMap::new(),
            connections: Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stations.contains_key(name)
    }
}

/// Canonical form of an undirected track between two stations, the
/// lexicographically smaller name first. `a-b` and `b-a` map to the
/// same key.
pub fn track_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
