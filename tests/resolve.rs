use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;
use url::Url;

use zbgis::config::{Config, ReferenceConfig, DEFAULT_BASE_URL};
use zbgis::resolver::UrlBuilder;
use zbgis::reference::{load_coordinates, TableRows};
use zbgis::{Destination, QueryResolver, ReferenceIndex};

const CODES: &str = "KOD_KU,NAZOV_KU\n801011,Nitra\n808130,Zobor\n508594,Banská Bystrica\n";
const COORDINATES: &str = "\u{feff}NAZOV;X;Y\nNitra;18.0845;48.3076\nZobor;18.0958;48.3398\nBanská Bystrica;19.1462;48.7363\nKvetnica;20.2668;49.0283\n";

fn write_tables(dir: &Path, codes: &str, coordinates: &str) -> ReferenceConfig {
    let codes_path = dir.join("codes.csv");
    let coordinates_path = dir.join("coordinates.csv");
    fs::write(&codes_path, codes).unwrap();
    fs::write(&coordinates_path, coordinates).unwrap();

    ReferenceConfig {
        codes: codes_path,
        coordinates: coordinates_path,
        ..ReferenceConfig::default()
    }
}

fn resolver_for(reference: ReferenceConfig) -> QueryResolver {
    let config = Config {
        reference,
        ..Config::default()
    };
    QueryResolver::from_config(&config).unwrap()
}

/// Percent-decode the raw `q` value, without form decoding of `+`.
fn search_query_value(url: &str) -> String {
    let url = Url::parse(url).unwrap();
    let value = url.query().and_then(|q| q.strip_prefix("q=")).unwrap();
    urlencoding::decode(value).unwrap().into_owned()
}

#[test]
fn test_load_joins_tables() {
    let dir = TempDir::new().unwrap();
    let index = ReferenceIndex::load(&write_tables(dir.path(), CODES, COORDINATES));

    assert_eq!(index.len(), 4);
    let nitra = index.find("NITRA").unwrap();
    assert_eq!(nitra.name, "Nitra");
    assert_eq!(nitra.code, "801011");
    assert_eq!(nitra.x, "18.0845");
    assert_eq!(nitra.y, "48.3076");

    // BOM on the first header column does not hide the name column
    assert_eq!(index.find("banská bystrica").unwrap().code, "508594");
    assert_eq!(index.find("kvetnica").unwrap().code, "");
}

#[test]
fn test_load_gzip_tables() {
    let dir = TempDir::new().unwrap();
    let mut reference = write_tables(dir.path(), CODES, COORDINATES);

    let gz_path = dir.path().join("coordinates.csv.gz");
    let file = fs::File::create(&gz_path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(COORDINATES.as_bytes()).unwrap();
    encoder.finish().unwrap();
    reference.coordinates = gz_path;

    let index = ReferenceIndex::load(&reference);
    assert_eq!(index.len(), 4);
    assert_eq!(index.find("zobor").unwrap().code, "808130");
}

#[test]
fn test_missing_code_table_keeps_coordinates() {
    let dir = TempDir::new().unwrap();
    let mut reference = write_tables(dir.path(), CODES, COORDINATES);
    reference.codes = PathBuf::from("/nonexistent/codes.csv");

    let index = ReferenceIndex::load(&reference);
    assert_eq!(index.len(), 4);
    assert_eq!(index.missing_codes().count(), 4);

    // Without codes no direct links can be built
    let items = resolver_for(reference).resolve("nitra 143/12");
    assert_eq!(items.len(), 1);
}

#[test]
fn test_missing_column_degrades() {
    let dir = TempDir::new().unwrap();
    let reference = write_tables(dir.path(), CODES, "\u{feff}NAZOV;LON;LAT\nNitra;18.0845;48.3076\n");

    let index = ReferenceIndex::load(&reference);
    assert!(index.is_empty());
}

#[test]
fn test_bad_record_keeps_earlier_rows() {
    let dir = TempDir::new().unwrap();
    let mut reference = write_tables(dir.path(), CODES, COORDINATES);

    // Latin-1 "č" on the third data row is not valid UTF-8
    let mut coordinates = "\u{feff}NAZOV;X;Y\nNitra;18.0845;48.3076\nZobor;18.0958;48.3398\n"
        .as_bytes()
        .to_vec();
    coordinates.extend_from_slice(b"Ko\xe8ice;21.2581;48.7208\nTrnava;17.5872;48.3774\n");
    let coordinates_path = dir.path().join("latin1.csv");
    fs::write(&coordinates_path, coordinates).unwrap();
    reference.coordinates = coordinates_path;

    let index = ReferenceIndex::load(&reference);
    assert_eq!(index.len(), 2);
    assert_eq!(index.find("nitra").unwrap().code, "801011");
    assert_eq!(index.find("zobor").unwrap().code, "808130");
    assert!(index.find("trnava").is_none());

    let items = resolver_for(reference.clone()).resolve("nitra 143/12");
    assert_eq!(items.len(), 3);

    // The strict view used by the check binary still reports the bad record
    let loaded = load_coordinates(&reference.coordinates, "NAZOV", "X", "Y").unwrap();
    assert_eq!(loaded.rows.len(), 2);
    assert!(loaded.error.is_some());
    assert!(TableRows::into_result(loaded).is_err());
}

#[test]
fn test_degraded_resolver_still_searches() {
    let reference = ReferenceConfig {
        codes: PathBuf::from("/nonexistent/codes.csv"),
        coordinates: PathBuf::from("/nonexistent/coordinates.csv"),
        ..ReferenceConfig::default()
    };
    let resolver = resolver_for(reference);
    assert!(resolver.index().is_empty());

    let items = resolver.resolve("nitra 143/12");
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].destination,
        Destination::Url(format!("{}/search?q=nitra%20143/12", DEFAULT_BASE_URL))
    );
}

#[test]
fn test_located_number_end_to_end() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_for(write_tables(dir.path(), CODES, COORDINATES));

    let items = resolver.resolve("nitra 143/12");
    let urls: Vec<&str> = items.iter().filter_map(|i| i.destination.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://zbgis.skgeodesy.sk/mapka/sk/kataster/detail/kataster/parcela-c/801011/143%2F12?pos=48.3076,18.0845,15",
            "https://zbgis.skgeodesy.sk/mapka/sk/kataster/detail/kataster/budova-sc/801011/143%2F12?pos=48.3076,18.0845,15",
            "https://zbgis.skgeodesy.sk/mapka/sk/kataster/search?q=nitra%20143/12",
        ]
    );
}

#[test]
fn test_last_item_is_general_search() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_for(write_tables(dir.path(), CODES, COORDINATES));

    for query in [
        "nitra 143/12",
        "123",
        "445/2",
        "Banská Bystrica",
        "zobor 7",
        "  odd   spacing  ",
        "a+b & c=d?#",
        "100% / 50",
        "%20 literal",
    ] {
        let items = resolver.resolve(query);
        assert!(!items.is_empty());

        let last = items.last().unwrap();
        let url = last.destination.url().unwrap();
        assert!(url.starts_with(&format!("{}/search?q=", DEFAULT_BASE_URL)));
        assert!(!url.contains('+'));
        assert_eq!(search_query_value(url), query);

        assert!(items[..items.len() - 1]
            .iter()
            .all(|i| !i.destination.url().unwrap_or("").contains("/search?")));
    }
}

#[test]
fn test_bare_number_is_informational() {
    let dir = TempDir::new().unwrap();
    let resolver = resolver_for(write_tables(dir.path(), CODES, COORDINATES));

    let items = resolver.resolve("123");
    let (last, informational) = items.split_last().unwrap();
    assert!((1..=2).contains(&informational.len()));
    assert!(informational.iter().all(|i| i.is_informational()));
    assert!(!last.is_informational());
}

#[test]
fn test_custom_base_url() {
    let index = ReferenceIndex::build(
        vec![("Nitra".to_string(), "801011".to_string())],
        vec![zbgis::models::CoordinateRow {
            name: "Nitra".to_string(),
            x: "18.0845".to_string(),
            y: "48.3076".to_string(),
        }],
    );
    let urls = UrlBuilder::new("https://maps.example.sk/kataster/", 17).unwrap();
    let resolver = QueryResolver::new(index, urls);

    let items = resolver.resolve("nitra 2");
    assert_eq!(
        items[0].destination.url(),
        Some("https://maps.example.sk/kataster/detail/kataster/parcela-c/801011/2?pos=48.3076,18.0845,17")
    );
}

#[test]
fn test_bundled_data() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = Config::load_from_file(root.join("zbgis.toml")).unwrap();
    let reference = ReferenceConfig {
        codes: root.join(&config.reference.codes),
        coordinates: root.join(&config.reference.coordinates),
        ..config.reference
    };

    let index = ReferenceIndex::load(&reference);
    assert!(!index.is_empty());
    assert_eq!(index.find("nitra").unwrap().code, "801011");
    assert_eq!(index.find(" Žilina ").unwrap().code, "842575");
}
