use lkod_core::schema::{
    DISTRIBUTION_TYPE, FILE_TYPE_AUTHORITY, FREQUENCY_AUTHORITY, MEDIA_TYPE_TEXT, PORTAL_AUTHOR,
    THEME_AUTHORITY, USAGE_TERMS_TYPE,
};
use lkod_core::{DatasetRecord, map_descriptor};
use serde_json::{Value, json};

fn full_descriptor() -> Value {
    json!({
        "title": "Rozpočet obce",
        "description": "Schválený rozpočet na rok 2021",
        "extras": [
            { "name": "first" },
            { "name": "second" },
            { "opendata": "ANNUAL" }
        ],
        "uid_instance": "1f9c2a0e-rozpocet",
        "tags": ["rozpočet", "finance"],
        "temaKod": "ECON",
        "geoArea": "https://linked.cuzk.cz/resource/ruian/obec/554782",
        "csv": {
            "isValid": true,
            "uid": "1f9c2a0e-rozpocet-csv",
            "datafile": "https://data.example.cz/rozpocet.csv",
            "format": "csv",
            "specification": [
                { "value": "https://creativecommons.org/licenses/by/4.0/" },
                { "value": false },
                { "value": true },
                { "value": "https://data.gov.cz/podmínky-užití/neobsahuje-osobní-údaje/" }
            ],
            "ignored": "not a distribution field"
        },
        "unrelated": 12
    })
}

#[test]
fn maps_every_recognized_field() {
    let record = map_descriptor(&full_descriptor()).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["iri"], "1f9c2a0e-rozpocet");
    assert_eq!(value["typ"], "Datová sada");
    assert_eq!(value["název"], json!({ "cs": "Rozpočet obce" }));
    assert_eq!(value["popis"], json!({ "cs": "Schválený rozpočet na rok 2021" }));
    assert_eq!(value["klíčové_slovo"], json!({ "cs": ["rozpočet", "finance"] }));
    assert_eq!(value["téma"], format!("{THEME_AUTHORITY}ECON"));
    assert_eq!(value["periodicita_aktualizace"], format!("{FREQUENCY_AUTHORITY}ANNUAL"));
    assert_eq!(value["prvek_rúian"], "https://linked.cuzk.cz/resource/ruian/obec/554782");

    let distribution = &value["distribuce"];
    assert_eq!(distribution["typ"], USAGE_TERMS_TYPE);
    assert_eq!(distribution["iri"], "1f9c2a0e-rozpocet-csv");
    assert_eq!(distribution["soubor_ke_stažení"], "https://data.example.cz/rozpocet.csv");
    assert_eq!(distribution["přístupové_url"], "https://data.example.cz/rozpocet.csv");
    assert!(distribution.get("ignored").is_none());

    let terms = &distribution["podmínky_užití"];
    assert_eq!(terms["autorské_dílo"], "https://creativecommons.org/licenses/by/4.0/");
    assert_eq!(terms["databáze_jako_autorské_dílo"], false);
    assert_eq!(terms["databáze_chráněná_zvláštními_právy"], true);
    assert_eq!(
        terms["osobní_údaje"],
        "https://data.gov.cz/podmínky-užití/neobsahuje-osobní-údaje/"
    );
    assert_eq!(terms["autor"], json!({ "cs": PORTAL_AUTHOR }));
    assert_eq!(terms["autor_databáze"], json!({ "cs": PORTAL_AUTHOR }));
}

#[test]
fn mapped_record_round_trips_through_json() {
    let record = map_descriptor(&full_descriptor()).unwrap();
    let text = serde_json::to_string(&record).unwrap();
    let back: DatasetRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
}

#[test]
fn unicode_is_written_verbatim() {
    let record = map_descriptor(&full_descriptor()).unwrap();
    let text = serde_json::to_string(&record).unwrap();
    assert!(text.contains("\"název\":{\"cs\":\"Rozpočet obce\"}"));
    assert!(!text.contains("\\u"));
}

#[test]
fn descriptor_without_known_fields_keeps_defaults() {
    let record = map_descriptor(&json!({ "name": "x", "notes": "y" })).unwrap();
    assert_eq!(record, DatasetRecord::default());
}

#[test]
fn null_csv_leaves_distribution_empty() {
    let record = map_descriptor(&json!({ "uid_instance": "ds-1", "csv": null })).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["distribuce"], json!({}));
}

#[test]
fn invalid_csv_only_sets_type() {
    let record = map_descriptor(&json!({
        "csv": { "isValid": false, "uid": "x", "datafile": "y", "format": "csv" }
    }))
    .unwrap();
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["distribuce"], json!({ "typ": DISTRIBUTION_TYPE }));
}

#[test]
fn invalid_csv_with_specification_still_marks_usage_terms() {
    let record = map_descriptor(&json!({
        "csv": {
            "isValid": false,
            "datafile": "y",
            "specification": [{ "value": 1 }, { "value": 2 }, { "value": 3 }, { "value": 4 }]
        }
    }))
    .unwrap();
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["distribuce"], json!({ "typ": USAGE_TERMS_TYPE }));
}

#[test]
fn csv_without_is_valid_is_treated_as_invalid() {
    let record = map_descriptor(&json!({ "csv": { "format": "csv" } })).unwrap();
    let distribution = record.distribuce.unwrap();
    assert_eq!(distribution.typ, DISTRIBUTION_TYPE);
    assert!(distribution.format.is_none());
}

#[test]
fn format_is_uppercased_only_for_file_type() {
    let record = map_descriptor(&json!({ "csv": { "isValid": true, "format": "csv" } })).unwrap();
    let distribution = record.distribuce.unwrap();
    assert_eq!(distribution.format.unwrap(), format!("{FILE_TYPE_AUTHORITY}CSV"));
    assert_eq!(distribution.typ_media.unwrap(), format!("{MEDIA_TYPE_TEXT}csv"));
    assert_eq!(distribution.typ, DISTRIBUTION_TYPE);
}

#[test]
fn short_extras_is_malformed() {
    let err = map_descriptor(&json!({ "extras": [{ "opendata": "ANNUAL" }] })).unwrap_err();
    assert_eq!(err.field, "extras");
}

#[test]
fn short_specification_is_malformed() {
    let err = map_descriptor(&json!({
        "csv": { "isValid": true, "specification": [{ "value": 1 }, { "value": 2 }] }
    }))
    .unwrap_err();
    assert_eq!(err.field, "csv.specification");
}

#[test]
fn end_to_end_minimal_record() {
    let record = map_descriptor(&json!({ "uid_instance": "ds-1", "title": "Test", "csv": null })).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    let mut expected = serde_json::to_value(DatasetRecord::default()).unwrap();
    expected["iri"] = json!("ds-1");
    expected["název"] = json!({ "cs": "Test" });
    assert_eq!(value, expected);
}

#[test]
fn records_are_independent() {
    let first = map_descriptor(&json!({ "uid_instance": "a", "title": "A", "tags": ["x"] })).unwrap();
    let second = map_descriptor(&json!({ "uid_instance": "b" })).unwrap();
    assert_eq!(first.nazev.get("cs").map(String::as_str), Some("A"));
    assert!(second.nazev.is_empty());
    assert!(second.klicove_slovo.is_empty());
}
