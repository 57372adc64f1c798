use std::collections::HashSet;
use std::fs;
use std::path::Path;

use trajno_common::error::{Error, Result};
use trajno_common::station::{track_key, Network, Station};

pub(crate) const MAX_STATIONS: usize = 10_000;

enum Section {
    None,
    Stations,
    Connections,
}

/// Reads and validates a map file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Network> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

/// Parses map text. Line oriented; `#` starts a comment, blank lines
/// are skipped. A `stations:` section of `name,x,y` lines and a
/// `connections:` section of `a-b` lines are both mandatory, and every
/// content line must fall under one of the two headers.
pub fn parse_str(text: &str) -> Result<Network> {
    let mut network = Network::new();
    let mut section = Section::None;
    let mut seen_stations = false;
    let mut seen_connections = false;
    let mut coords: HashSet<(u32, u32)> = HashSet::new();
    let mut tracks: HashSet<(String, String)> = HashSet::new();

    for raw_line in text.lines() {
        let line = match raw_line.find('#') {
            Some(idx) => &raw_line[..idx],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "stations:" => {
                seen_stations = true;
                section = Section::Stations;
            }
            "connections:" => {
                seen_connections = true;
                section = Section::Connections;
            }
            _ => match section {
                Section::None => return Err(Error::MissingSections),
                Section::Stations => parse_station(line, &mut network, &mut coords)?,
                Section::Connections => parse_connection(line, &mut network, &mut tracks)?,
            },
        }
    }

    if !seen_stations || !seen_connections {
        return Err(Error::MissingSections);
    }
    Ok(network)
}

fn parse_station(
    line: &str,
    network: &mut Network,
    coords: &mut HashSet<(u32, u32)>,
) -> Result<()> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 3 {
        return Err(Error::InvalidStationFormat);
    }

    let name = parts[0].trim();
    if name.is_empty() || name.contains(' ') || name.contains('-') {
        return Err(Error::InvalidStationFormat);
    }

    let x: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidCoords)?;
    let y: u32 = parts[2]
        .trim()
        .parse()
        .map_err(|_| Error::InvalidCoords)?;

    if network.contains(name) {
        return Err(Error::DuplicateStation);
    }
    if !coords.insert((x, y)) {
        return Err(Error::DuplicateCoords);
    }
    if network.stations.len() >= MAX_STATIONS {
        return Err(Error::MapTooLarge);
    }

    network.stations.insert(
        name.to_string(),
        Station {
            name: name.to_string(),
            x,
            y,
        },
    );
    Ok(())
}

fn parse_connection(
    line: &str,
    network: &mut Network,
    tracks: &mut HashSet<(String, String)>,
) -> Result<()> {
    let parts: Vec<&str> = line.split('-').collect();
    if parts.len() != 2 {
        return Err(Error::InvalidConnection);
    }

    let from = parts[0].trim();
    let to = parts[1].trim();
    if from.is_empty() || to.is_empty() || from == to {
        return Err(Error::InvalidConnection);
    }
    if !network.contains(from) || !network.contains(to) {
        return Err(Error::InvalidConnection);
    }

    let (lo, hi) = track_key(from, to);
    if !tracks.insert((lo.to_string(), hi.to_string())) {
        return Err(Error::DuplicateConnection);
    }

    network
        .connections
        .push((from.to_string(), to.to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "\
stations:
a,0,0
b,1,0
c,2,0
d,1,1
e,2,1
connections:
a-b
b-c
a-d
d-e
e-c
";

    #[test]
    fn test_parse_small_map() {
        let network = parse_str(SMALL_MAP).unwrap();
        assert_eq!(network.stations.len(), 5);
        assert_eq!(network.connections.len(), 5);
        assert_eq!(network.stations["d"].x, 1);
        assert_eq!(network.stations["d"].y, 1);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "\
# the whole line is a comment

stations:
a,0,0   # trailing comment
b,1,1
connections:

a-b
";
        let network = parse_str(text).unwrap();
        assert_eq!(network.stations.len(), 2);
        assert_eq!(network.connections, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_sections_in_either_order() {
        // connections may not reference undeclared stations, so the
        // reversed layout only parses when the connections section is
        // empty.
        let text = "connections:\nstations:\na,0,0\nb,1,1\n";
        let network = parse_str(text).unwrap();
        assert_eq!(network.stations.len(), 2);
        assert!(network.connections.is_empty());
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(parse_str(""), Err(Error::MissingSections)));
        assert!(matches!(
            parse_str("stations:\na,0,0\n"),
            Err(Error::MissingSections)
        ));
        assert!(matches!(
            parse_str("connections:\n"),
            Err(Error::MissingSections)
        ));
        // content before any header
        assert!(matches!(
            parse_str("a,0,0\nstations:\nconnections:\n"),
            Err(Error::MissingSections)
        ));
    }

    #[test]
    fn test_malformed_station_lines() {
        for bad in ["a,0", "a,0,0,0", ",0,0", "two words,0,0"] {
            let text = format!("stations:\n{}\nconnections:\n", bad);
            assert!(
                matches!(parse_str(&text), Err(Error::InvalidStationFormat)),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_coordinates() {
        for bad in ["a,-1,0", "a,0,-2", "a,x,0", "a,0,1.5"] {
            let text = format!("stations:\n{}\nconnections:\n", bad);
            assert!(
                matches!(parse_str(&text), Err(Error::InvalidCoords)),
                "accepted {:?}",
                bad
            );
        }
        // zero is a valid coordinate
        assert!(parse_str("stations:\na,0,0\nconnections:\n").is_ok());
    }

    #[test]
    fn test_duplicate_station_and_coordinates() {
        let dup_name = "stations:\na,0,0\na,1,1\nconnections:\n";
        assert!(matches!(parse_str(dup_name), Err(Error::DuplicateStation)));

        let dup_coords = "stations:\na,0,0\nb,0,0\nconnections:\n";
        assert!(matches!(parse_str(dup_coords), Err(Error::DuplicateCoords)));
    }

    #[test]
    fn test_bad_connections() {
        let unknown = "stations:\na,0,0\nb,1,1\nconnections:\na-z\n";
        assert!(matches!(parse_str(unknown), Err(Error::InvalidConnection)));

        let malformed = "stations:\na,0,0\nb,1,1\nconnections:\na-b-a\n";
        assert!(matches!(parse_str(malformed), Err(Error::InvalidConnection)));

        let self_loop = "stations:\na,0,0\nb,1,1\nconnections:\na-a\n";
        assert!(matches!(parse_str(self_loop), Err(Error::InvalidConnection)));
    }

    #[test]
    fn test_duplicate_connection_in_either_orientation() {
        let same = "stations:\na,0,0\nb,1,1\nconnections:\na-b\na-b\n";
        assert!(matches!(parse_str(same), Err(Error::DuplicateConnection)));

        let flipped = "stations:\na,0,0\nb,1,1\nconnections:\na-b\nb-a\n";
        assert!(matches!(parse_str(flipped), Err(Error::DuplicateConnection)));
    }

    #[test]
    fn test_map_too_large() {
        let mut text = String::from("stations:\n");
        for i in 0..=MAX_STATIONS {
            text.push_str(&format!("s{},{},0\n", i, i));
        }
        text.push_str("connections:\n");
        assert!(matches!(parse_str(&text), Err(Error::MapTooLarge)));
    }
}
