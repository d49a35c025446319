//! Field rules translating a source descriptor into a [`DatasetRecord`].
//!
//! Each recognized source key owns one rule in [`SOURCE_FIELDS`]; rules run in
//! table order and only for keys the descriptor actually carries. The `csv`
//! rule delegates to [`DISTRIBUTION_FIELDS`] the same way.

use crate::error::MappingError;
use crate::schema::{
    DatasetRecord, DistributionRecord, FILE_TYPE_AUTHORITY, FREQUENCY_AUTHORITY, LANG_CS,
    MEDIA_TYPE_TEXT, THEME_AUTHORITY, USAGE_TERMS_TYPE, UsageTerms,
};
use serde_json::{Map, Value};
use tracing::trace;

type FieldRule = fn(&Value, &mut DatasetRecord) -> Result<(), MappingError>;
type DistributionRule = fn(&Value, &mut DistributionRecord) -> Result<(), MappingError>;

/// Index into `extras` holding the update frequency.
const FREQUENCY_EXTRA: usize = 2;
const SPECIFICATION_LEN: usize = 4;

pub const SOURCE_FIELDS: &[(&str, FieldRule)] = &[
    ("title", map_title),
    ("description", map_description),
    ("extras", map_extras),
    ("uid_instance", map_uid_instance),
    ("tags", map_tags),
    ("temaKod", map_theme),
    ("geoArea", map_geo_area),
    ("csv", map_csv),
];

pub const DISTRIBUTION_FIELDS: &[(&str, DistributionRule)] = &[
    ("uid", map_distribution_uid),
    ("datafile", map_datafile),
    ("format", map_format),
    ("specification", map_specification),
];

/// Maps one descriptor. Keys missing from the descriptor, or holding `null`,
/// leave the record at its defaults.
pub fn map_descriptor(descriptor: &Value) -> Result<DatasetRecord, MappingError> {
    let fields = descriptor.as_object().ok_or_else(|| {
        MappingError::new("descriptor", format!("expected object, found {}", kind(descriptor)))
    })?;

    let mut record = DatasetRecord::default();
    for (name, rule) in SOURCE_FIELDS {
        match fields.get(*name) {
            None | Some(Value::Null) => {}
            Some(value) => {
                trace!(field = *name, "applying field rule");
                rule(value, &mut record)?;
            }
        }
    }
    Ok(record)
}

/// Builds the distribution for a non-null `csv` object.
///
/// `typ` is decided from the presence of `specification` alone; every other
/// field is only filled in when `isValid` is true.
pub fn map_distribution(csv: &Map<String, Value>) -> Result<DistributionRecord, MappingError> {
    let mut distribution = DistributionRecord::default();
    if csv.get("specification").is_some_and(|value| !value.is_null()) {
        distribution.typ = USAGE_TERMS_TYPE.to_string();
    }

    let is_valid = csv.get("isValid").and_then(Value::as_bool).unwrap_or(false);
    if !is_valid {
        return Ok(distribution);
    }

    for (name, rule) in DISTRIBUTION_FIELDS {
        match csv.get(*name) {
            None | Some(Value::Null) => {}
            Some(value) => rule(value, &mut distribution)?,
        }
    }
    Ok(distribution)
}

fn map_title(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    record
        .nazev
        .insert(LANG_CS.to_string(), expect_str("title", value)?.to_string());
    Ok(())
}

fn map_description(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    record
        .popis
        .insert(LANG_CS.to_string(), expect_str("description", value)?.to_string());
    Ok(())
}

fn map_extras(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    let extras = value
        .as_array()
        .ok_or_else(|| MappingError::new("extras", format!("expected array, found {}", kind(value))))?;
    let extra = extras.get(FREQUENCY_EXTRA).ok_or_else(|| {
        MappingError::new(
            "extras",
            format!("expected at least {} entries, found {}", FREQUENCY_EXTRA + 1, extras.len()),
        )
    })?;
    let frequency = extra
        .get("opendata")
        .ok_or_else(|| MappingError::new("extras", "entry 2 has no `opendata` code"))?;
    let frequency = expect_str("extras", frequency)?;
    record.periodicita_aktualizace = format!("{FREQUENCY_AUTHORITY}{frequency}");
    Ok(())
}

fn map_uid_instance(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    record.iri = expect_str("uid_instance", value)?.to_string();
    Ok(())
}

fn map_tags(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    let tags = value
        .as_array()
        .ok_or_else(|| MappingError::new("tags", format!("expected array, found {}", kind(value))))?
        .iter()
        .map(|tag| expect_str("tags", tag).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;
    record.klicove_slovo.insert(LANG_CS.to_string(), tags);
    Ok(())
}

fn map_theme(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    record.tema = format!("{THEME_AUTHORITY}{}", expect_str("temaKod", value)?);
    Ok(())
}

fn map_geo_area(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    record.prvek_ruian = expect_str("geoArea", value)?.to_string();
    Ok(())
}

fn map_csv(value: &Value, record: &mut DatasetRecord) -> Result<(), MappingError> {
    let csv = value
        .as_object()
        .ok_or_else(|| MappingError::new("csv", format!("expected object, found {}", kind(value))))?;
    record.distribuce = Some(map_distribution(csv)?);
    Ok(())
}

fn map_distribution_uid(value: &Value, distribution: &mut DistributionRecord) -> Result<(), MappingError> {
    distribution.iri = Some(expect_str("csv.uid", value)?.to_string());
    Ok(())
}

fn map_datafile(value: &Value, distribution: &mut DistributionRecord) -> Result<(), MappingError> {
    let datafile = expect_str("csv.datafile", value)?;
    distribution.soubor_ke_stazeni = Some(datafile.to_string());
    distribution.pristupove_url = Some(datafile.to_string());
    Ok(())
}

fn map_format(value: &Value, distribution: &mut DistributionRecord) -> Result<(), MappingError> {
    let format = expect_str("csv.format", value)?;
    distribution.format = Some(format!("{FILE_TYPE_AUTHORITY}{}", format.to_uppercase()));
    distribution.typ_media = Some(format!("{MEDIA_TYPE_TEXT}{format}"));
    Ok(())
}

fn map_specification(value: &Value, distribution: &mut DistributionRecord) -> Result<(), MappingError> {
    let entries = value.as_array().ok_or_else(|| {
        MappingError::new("csv.specification", format!("expected array, found {}", kind(value)))
    })?;
    if entries.len() < SPECIFICATION_LEN {
        return Err(MappingError::new(
            "csv.specification",
            format!("expected {SPECIFICATION_LEN} entries, found {}", entries.len()),
        ));
    }

    let mut values: [Value; SPECIFICATION_LEN] = Default::default();
    for (slot, entry) in values.iter_mut().zip(entries) {
        let entry = entry.as_object().ok_or_else(|| {
            MappingError::new("csv.specification", format!("expected object entry, found {}", kind(entry)))
        })?;
        *slot = entry.get("value").cloned().unwrap_or(Value::Null);
    }

    distribution.typ = USAGE_TERMS_TYPE.to_string();
    distribution.podminky_uziti = Some(UsageTerms::from_positional(values));
    Ok(())
}

fn expect_str<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, MappingError> {
    value
        .as_str()
        .ok_or_else(|| MappingError::new(field, format!("expected string, found {}", kind(value))))
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
