use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::catalog::error::CatalogError;
use crate::catalog::types::{Catalog, CatalogLoad, StarRecord};

const ID_COLUMNS: &[&str] = &["id", "hip", "name"];
const RA_COLUMNS: &[&str] = &["ra", "ra_deg"];
const DEC_COLUMNS: &[&str] = &["dec", "dec_deg"];
const MAG_COLUMNS: &[&str] = &["mag", "magnitude", "vmag"];

/// Field positions resolved once from the header. When several accepted
/// names are present, the first one in the list above wins and the others
/// are ignored like any extra column.
#[derive(Debug, Clone, Copy)]
struct Columns {
    id: Option<usize>,
    ra: usize,
    dec: usize,
    mag: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, CatalogError> {
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        };
        let require = |names: &[&'static str]| {
            find(names).ok_or(CatalogError::MissingColumn(names[0]))
        };
        Ok(Self {
            id: find(ID_COLUMNS),
            ra: require(RA_COLUMNS)?,
            dec: require(DEC_COLUMNS)?,
            mag: require(MAG_COLUMNS)?,
        })
    }
}

/// Load a star catalog from a CSV file on disk.
pub fn load_catalog(path: &Path) -> Result<CatalogLoad, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let load = load_catalog_from_reader(file)?;

    log::info!(
        "Loaded {} stars from {} ({} rows skipped)",
        load.catalog.len(),
        path.display(),
        load.skipped.len()
    );
    if load.catalog.is_empty() {
        log::warn!("Catalog {} contains no usable stars", path.display());
    }

    Ok(load)
}

/// Load a star catalog from any CSV source with a header row.
///
/// `#` lines are allowed before the header only. Malformed rows are logged
/// and skipped; only a broken header or an I/O failure fails the load.
pub fn load_catalog_from_reader<R: Read>(mut reader: R) -> Result<CatalogLoad, CatalogError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let (body, preamble_lines) = skip_leading_comments(&bytes);

    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body);

    let columns = Columns::from_headers(csv_reader.headers()?)?;

    let mut stars = Vec::new();
    let mut skipped = Vec::new();

    for result in csv_reader.records() {
        let parsed = match result {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                parse_record(&record, columns, line + preamble_lines)
            }
            Err(e) => Err(CatalogError::MalformedCatalogEntry {
                line: e.position().map(|p| p.line()).unwrap_or_default() + preamble_lines,
                reason: e.to_string(),
            }),
        };

        match parsed {
            Ok(star) => stars.push(star),
            Err(e) => {
                log::warn!("Skipping catalog row: {}", e);
                skipped.push(e);
            }
        }
    }

    Ok(CatalogLoad {
        catalog: Catalog::new(stars),
        skipped,
    })
}

/// Split off `#` comment lines preceding the header and count them.
fn skip_leading_comments(bytes: &[u8]) -> (&[u8], u64) {
    let mut rest = bytes;
    let mut count = 0;
    loop {
        let end = rest
            .iter()
            .position(|&b| b == b'\n')
            .map_or(rest.len(), |i| i + 1);
        if end == 0 || !rest[..end].trim_ascii_start().starts_with(b"#") {
            return (rest, count);
        }
        rest = &rest[end..];
        count += 1;
    }
}

fn parse_record(record: &StringRecord, columns: Columns, line: u64) -> Result<StarRecord, CatalogError> {
    let malformed = |reason: String| CatalogError::MalformedCatalogEntry { line, reason };

    let ra = parse_field(record.get(columns.ra), "right ascension").map_err(malformed)?;
    let dec = parse_field(record.get(columns.dec), "declination").map_err(malformed)?;
    let mag = parse_field(record.get(columns.mag), "magnitude").map_err(malformed)?;

    if !(0.0..360.0).contains(&ra) {
        return Err(malformed(format!("right ascension {} outside [0, 360)", ra)));
    }
    if !(-90.0..=90.0).contains(&dec) {
        return Err(malformed(format!("declination {} outside [-90, 90]", dec)));
    }

    let id = columns
        .id
        .and_then(|i| record.get(i))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("row-{}", line));

    Ok(StarRecord {
        id,
        right_ascension_deg: ra,
        declination_deg: dec,
        magnitude: mag,
    })
}

fn parse_field(value: Option<&str>, name: &str) -> Result<f64, String> {
    let raw = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(format!("missing {}", name)),
    };
    let parsed: f64 = raw
        .parse()
        .map_err(|_| format!("unparseable {}: {:?}", name, raw))?;
    if !parsed.is_finite() {
        return Err(format!("non-finite {}: {}", name, raw));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> CatalogLoad {
        load_catalog_from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn skips_row_missing_declination_and_keeps_the_rest() {
        let text = "\
id,ra,dec,mag
s1,10.0,10.0,1.0
s2,20.0,20.0,2.0
s3,30.0,-30.0,3.0
s4,40.0,40.0,4.0
s5,50.0,,5.0
s6,60.0,60.0,1.5
s7,70.0,-70.0,2.5
s8,80.0,80.0,3.5
s9,90.0,-10.0,4.5
s10,100.0,5.0,0.5
";
        let load = load(text);
        assert_eq!(load.catalog.len(), 9);
        assert_eq!(load.skipped.len(), 1);
        match &load.skipped[0] {
            CatalogError::MalformedCatalogEntry { line, reason } => {
                assert_eq!(*line, 6);
                assert!(reason.contains("declination"), "{}", reason);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(load.catalog.stars().iter().all(|s| s.id != "s5"));
    }

    #[test]
    fn keeps_duplicate_ids_as_separate_entries() {
        let load = load("id,ra,dec,mag\nvega,279.2,38.8,0.0\nvega,279.2,38.8,0.0\n");
        assert_eq!(load.catalog.len(), 2);
        assert!(load.skipped.is_empty());
    }

    #[test]
    fn accepts_header_aliases_and_extra_columns() {
        let load = load("hip,constellation,ra_deg,dec_deg,vmag\n32349,CMa,101.287,-16.716,-1.46\n");
        let star = &load.catalog.stars()[0];
        assert_eq!(star.id, "32349");
        assert_eq!(star.right_ascension_deg, 101.287);
        assert_eq!(star.declination_deg, -16.716);
        assert_eq!(star.magnitude, -1.46);
    }

    #[test]
    fn rejects_out_of_range_and_unparseable_values() {
        let text = "\
id,ra,dec,mag
a,360.0,0.0,1.0
b,10.0,91.0,1.0
c,ten,0.0,1.0
d,10.0,0.0,
e,10.0,0.0,NaN
f,359.9,-90.0,6.0
";
        let load = load(text);
        assert_eq!(load.catalog.len(), 1);
        assert_eq!(load.catalog.stars()[0].id, "f");
        assert_eq!(load.skipped.len(), 5);
    }

    #[test]
    fn short_rows_are_malformed_not_fatal() {
        let load = load("id,ra,dec,mag\nshort,12.0\nok,12.0,1.0,2.0\n");
        assert_eq!(load.catalog.len(), 1);
        assert_eq!(load.skipped.len(), 1);
    }

    #[test]
    fn missing_id_gets_synthetic_name() {
        let load = load("id,ra,dec,mag\n,12.0,1.0,2.0\n");
        assert_eq!(load.catalog.stars()[0].id, "row-2");
    }

    #[test]
    fn hipparcos_style_header_with_id_and_name() {
        let load = load("hip,name,ra,dec,mag\n32349,Sirius,101.287,-16.716,-1.46\n91262,Vega,279.235,38.784,0.03\n");
        assert!(load.skipped.is_empty(), "{:?}", load.skipped);
        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.catalog.stars()[0].id, "32349");
        assert_eq!(load.catalog.stars()[1].id, "91262");
    }

    #[test]
    fn first_listed_magnitude_column_wins() {
        let load = load("id,ra,dec,vmag,mag\nVega,279.235,38.784,0.03,9.99\n");
        assert!(load.skipped.is_empty());
        assert_eq!(load.catalog.stars()[0].magnitude, 9.99);

        let load = self::load("name,ra_deg,dec_deg,magnitude,vmag\nVega,279.235,38.784,0.03,\n");
        assert_eq!(load.catalog.stars()[0].id, "Vega");
        assert_eq!(load.catalog.stars()[0].magnitude, 0.03);
    }

    #[test]
    fn header_without_coordinates_fails_the_load() {
        let err = load_catalog_from_reader("id,dec,mag\na,1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("ra")));
    }

    #[test]
    fn comment_lines_only_before_header() {
        let load = load("# bright stars\n# J2000\nid,ra,dec,mag\n#42,10,10,1\nok,1,1,1\nbad,1,,1\n");
        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.catalog.stars()[0].id, "#42");
        match &load.skipped[..] {
            [CatalogError::MalformedCatalogEntry { line, .. }] => assert_eq!(*line, 6),
            other => panic!("unexpected skipped rows: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_catalog(Path::new("/nonexistent/stars.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn bundled_catalog_loads_cleanly() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/bright_stars.csv");
        let load = load_catalog(&path).unwrap();
        assert!(load.skipped.is_empty(), "{:?}", load.skipped);
        assert_eq!(load.catalog.len(), 63);
        assert_eq!(load.catalog.brightest(1)[0].id, "Sirius");
        let (lo, hi) = load.catalog.magnitude_range().unwrap();
        assert_eq!(lo, -1.46);
        assert_eq!(hi, 3.99);
    }
}
