use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, ObjectValidation, Schema, SchemaObject, SubschemaValidation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const CONTEXT: &str = "https://ofn.gov.cz/rozhraní-katalogů-otevřených-dat/2021-01-11/kontexty/rozhraní-katalogů-otevřených-dat.jsonld";
pub const PUBLISHER: &str = "https://rpp-opendata.egon.gov.cz/odrpp/zdroj/orgán-veřejné-moci";

pub const DATASET_TYPE: &str = "Datová sada";
pub const DISTRIBUTION_TYPE: &str = "Distribuce";
pub const USAGE_TERMS_TYPE: &str = "Specifikace podmínek užití";
pub const PORTAL_AUTHOR: &str = "Portál otevřených dat";

pub const FREQUENCY_AUTHORITY: &str = "http://publications.europa.eu/resource/authority/frequency/";
pub const THEME_AUTHORITY: &str = "http://publications.europa.eu/resource/authority/data-theme/";
pub const FILE_TYPE_AUTHORITY: &str = "http://publications.europa.eu/resource/authority/file-type/";
pub const MEDIA_TYPE_TEXT: &str = "http://www.iana.org/assignments/media-types/text/";

/// Language tag every localized value is written under.
pub const LANG_CS: &str = "cs";

/// Localized value keyed by language code.
pub type LangMap<T> = BTreeMap<String, T>;

pub fn cs<T>(value: T) -> LangMap<T> {
    let mut map = LangMap::new();
    map.insert(LANG_CS.to_string(), value);
    map
}

/// One dataset entry of the catalog, shaped after the OFN dataset vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetRecord {
    #[serde(rename = "@context")]
    pub context: String,
    pub iri: String,
    pub typ: String,
    pub poskytovatel: String,
    #[serde(rename = "název")]
    pub nazev: LangMap<String>,
    pub popis: LangMap<String>,
    #[serde(rename = "klíčové_slovo")]
    pub klicove_slovo: LangMap<Vec<String>>,
    #[serde(rename = "téma")]
    pub tema: String,
    pub periodicita_aktualizace: String,
    #[serde(rename = "prvek_rúian")]
    pub prvek_ruian: String,
    /// Written as `{}` while no distribution is known.
    #[serde(with = "empty_object")]
    #[schemars(schema_with = "distribution_or_empty")]
    pub distribuce: Option<DistributionRecord>,
}

impl Default for DatasetRecord {
    fn default() -> Self {
        Self {
            context: CONTEXT.to_string(),
            iri: String::new(),
            typ: DATASET_TYPE.to_string(),
            poskytovatel: PUBLISHER.to_string(),
            nazev: LangMap::new(),
            popis: LangMap::new(),
            klicove_slovo: LangMap::new(),
            tema: String::new(),
            periodicita_aktualizace: String::new(),
            prvek_ruian: String::new(),
            distribuce: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DistributionRecord {
    pub typ: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,
    #[serde(rename = "soubor_ke_stažení", default, skip_serializing_if = "Option::is_none")]
    pub soubor_ke_stazeni: Option<String>,
    #[serde(rename = "přístupové_url", default, skip_serializing_if = "Option::is_none")]
    pub pristupove_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "typ_média", default, skip_serializing_if = "Option::is_none")]
    pub typ_media: Option<String>,
    #[serde(rename = "podmínky_užití", default, skip_serializing_if = "Option::is_none")]
    pub podminky_uziti: Option<UsageTerms>,
}

impl Default for DistributionRecord {
    fn default() -> Self {
        Self {
            typ: DISTRIBUTION_TYPE.to_string(),
            iri: None,
            soubor_ke_stazeni: None,
            pristupove_url: None,
            format: None,
            typ_media: None,
            podminky_uziti: None,
        }
    }
}

/// Licensing terms of a distribution. The four term values are copied from
/// the source untouched, so they stay untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UsageTerms {
    #[serde(rename = "autorské_dílo")]
    pub autorske_dilo: Value,
    pub autor: LangMap<String>,
    #[serde(rename = "databáze_chráněná_zvláštními_právy")]
    pub databaze_chranena_zvlastnimi_pravy: Value,
    #[serde(rename = "databáze_jako_autorské_dílo")]
    pub databaze_jako_autorske_dilo: Value,
    #[serde(rename = "autor_databáze")]
    pub autor_databaze: LangMap<String>,
    #[serde(rename = "osobní_údaje")]
    pub osobni_udaje: Value,
}

impl UsageTerms {
    /// Builds the terms from the positional `specification` values:
    /// authored work, database as work, sui generis database, personal data.
    pub fn from_positional(values: [Value; 4]) -> Self {
        let [authored, database_work, sui_generis, personal] = values;
        Self {
            autorske_dilo: authored,
            autor: cs(PORTAL_AUTHOR.to_string()),
            databaze_chranena_zvlastnimi_pravy: sui_generis,
            databaze_jako_autorske_dilo: database_work,
            autor_databaze: cs(PORTAL_AUTHOR.to_string()),
            osobni_udaje: personal,
        }
    }
}

/// `distribuce` is either a full distribution or the empty object `{}`.
fn distribution_or_empty(generator: &mut SchemaGenerator) -> Schema {
    let empty = SchemaObject {
        instance_type: Some(InstanceType::Object.into()),
        object: Some(Box::new(ObjectValidation {
            max_properties: Some(0),
            ..Default::default()
        })),
        ..Default::default()
    };
    Schema::Object(SchemaObject {
        subschemas: Some(Box::new(SubschemaValidation {
            any_of: Some(vec![
                generator.subschema_for::<DistributionRecord>(),
                Schema::Object(empty),
            ]),
            ..Default::default()
        })),
        ..Default::default()
    })
}

mod empty_object {
    use super::DistributionRecord;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Map, Value};

    pub fn serialize<S>(value: &Option<DistributionRecord>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(record) => record.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DistributionRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        if map.is_empty() {
            return Ok(None);
        }
        serde_json::from_value(Value::Object(map))
            .map(Some)
            .map_err(D::Error::custom)
    }
}
