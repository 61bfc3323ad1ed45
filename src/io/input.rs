use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader, Read},
};

use crate::{Result, io::options::SolverOptions, place::Place};

/// Read places from the configured CSV source, or stdin when no input
/// path is set.
pub fn read_places(options: &SolverOptions) -> Result<Vec<Place>> {
    match options.input_path() {
        Some(path) => {
            let file = File::open(path)?;
            parse_places(BufReader::new(file))
        }
        None => parse_places(BufReader::new(io::stdin())),
    }
}

/// Parse `name,lat,lon` rows. Header rows and rows that do not parse are
/// skipped; errors from the reader itself still fail the run. Duplicate
/// names are kept as distinct places.
pub fn parse_places<R: Read>(reader: R) -> Result<Vec<Place>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut places = Vec::new();
    let mut seen = HashSet::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < 3 {
            log::debug!("input: row {} skipped, expected name,lat,lon", row + 1);
            continue;
        }
        let name = record[0].to_owned();
        let (Ok(lat), Ok(lon)) = (record[1].parse::<f64>(), record[2].parse::<f64>()) else {
            log::debug!("input: row {} skipped, non-numeric coordinates", row + 1);
            continue;
        };
        if !seen.insert(name.clone()) {
            log::warn!("input: duplicate place name={name}, keeping both");
        }
        places.push(Place::new(name, lat, lon));
    }

    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::parse_places;

    #[test]
    fn parses_rows_and_skips_the_header() {
        let data = b"Name,Lat,Lon\nBerlin,52.52,13.405\nParis,48.8566,2.3522\n";
        let places = parse_places(&data[..]).expect("parse");

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Berlin");
        assert!((places[0].lat - 52.52).abs() < 1e-12);
        assert!((places[1].lon - 2.3522).abs() < 1e-12);
    }

    #[test]
    fn skips_short_and_malformed_rows() {
        let data = b"just-a-name\nBerlin,52.52,13.405\nBroken,abc,def\n";
        let places = parse_places(&data[..]).expect("parse");

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Berlin");
    }

    #[test]
    fn keeps_duplicate_names_as_distinct_places() {
        let data = b"Depot,0.0,0.0\nDepot,1.0,1.0\n";
        let places = parse_places(&data[..]).expect("parse");

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, places[1].name);
        assert!(places[0].lat != places[1].lat);
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let data = b" Berlin , 52.52 , 13.405 \n";
        let places = parse_places(&data[..]).expect("parse");

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Berlin");
    }

    #[test]
    fn empty_input_yields_no_places() {
        let places = parse_places(&b""[..]).expect("parse");
        assert!(places.is_empty());
    }
}
