use crate::error::{Result, TransformError};
use crate::process::slug::slugify;
use crate::process::utils::rebuild_batch;
use arrow::{datatypes::Schema, record_batch::RecordBatch};
use once_cell::sync::Lazy;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

/// French header (underscores read as spaces) → English label.
///
/// Keys are the exact dataset headers, double spaces included.
pub static COLUMN_MAPPING: &[(&str, &str)] = &[
    ("N°DPE", "DPE Number"),
    ("Date réception DPE", "DPE Reception Date"),
    ("Date établissement DPE", "DPE Issue Date"),
    ("Date visite diagnostiqueur", "Inspector Visit Date"),
    ("Modèle DPE", "DPE Model"),
    ("N° DPE remplacé", "Replaced DPE Number"),
    ("Date fin validité DPE", "DPE Expiry Date"),
    ("Version DPE", "DPE Version"),
    ("N° DPE immeuble associé", "Associated Building DPE Number"),
    ("Méthode du DPE", "DPE Method"),
    ("N° immatriculation copropriété", "Condo Registration Number"),
    ("Invariant fiscal logement", "Housing Tax ID"),
    ("Etiquette DPE", "DPE Label"),
    ("Etiquette GES", "GHG Label"),
    ("Conso kWhep/m²/an", "Energy Use (kWhep/m2/year)"),
    ("Emission GES kgCO2/m²/an", "GHG Emissions (kgCO2/m2/year)"),
    ("Année construction", "Construction Year"),
    ("Catégorie ERP", "ERP Category"),
    ("Période construction", "Construction Period"),
    ("Secteur activité", "Activity Sector"),
    ("Nombre occupant", "Occupant Count"),
    ("Surface (SHON)", "Gross Floor Area"),
    ("Surface utile", "Usable Area"),
    ("Type énergie principale chauffage", "Main Heating Energy Type"),
    ("Adresse brute", "Raw Address"),
    ("Nom  commune (BAN)", "City Name (BAN)"),
    ("Code INSEE (BAN)", "INSEE Code (BAN)"),
    ("N° voie (BAN)", "Street Number (BAN)"),
    ("Identifiant  BAN", "BAN ID"),
    ("Adresse (BAN)", "Address (BAN)"),
    ("Code postal (BAN)", "Postal Code (BAN)"),
    ("Score BAN", "BAN Score"),
    ("Nom  rue (BAN)", "Street Name (BAN)"),
    ("Coordonnée cartographique X (BAN)", "X Coordinate (BAN)"),
    ("Coordonnée cartographique Y (BAN)", "Y Coordinate (BAN)"),
    ("Code postal (brut)", "Postal Code (Raw)"),
    ("N° étage appartement", "Apartment Floor"),
    ("Nom résidence", "Residence Name"),
    ("Complément d'adresse bâtiment", "Building Address Details"),
    ("Cage d'escalier", "Stairwell"),
    ("Complément d'adresse logement", "Housing Address Details"),
    ("Statut géocodage", "Geocoding Status"),
    ("Nom  commune (Brut)", "City Name (Raw)"),
    ("N° département (BAN)", "Department Number (BAN)"),
    ("N° région (BAN)", "Region Number (BAN)"),
    ("Conso é finale énergie n°1", "Final Energy Use 01"),
    ("Conso é primaire énergie n°1", "Primary Energy Use 01"),
    ("Type énergie n°1", "Energy Type 01"),
    ("Type usage énergie n°1", "Energy Usage Type 01"),
    ("Frais annuel énergie n°1", "Annual Energy Cost 01"),
    ("Année relève conso énergie n°1", "Energy Reading Year 01"),
    ("Conso é finale énergie n°2", "Final Energy Use 02"),
    ("Conso é primaire énergie n°2", "Primary Energy Use 02"),
    ("Type énergie n°2", "Energy Type 02"),
    ("Type usage énergie n°2", "Energy Usage Type 02"),
    ("Frais annuel énergie n°2", "Annual Energy Cost 02"),
    ("Année relève conso énergie n°2", "Energy Reading Year 02"),
    ("Conso é finale énergie n°3", "Final Energy Use 03"),
    ("Conso é primaire énergie n°3", "Primary Energy Use 03"),
    ("Type énergie n°3", "Energy Type 03"),
    ("Type usage énergie n°3", "Energy Usage Type 03"),
    ("Frais annuel énergie n°3", "Annual Energy Cost 03"),
    ("Année relève conso énergie n°3", "Energy Reading Year 03"),
];

static MAPPING_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COLUMN_MAPPING.iter().copied().collect());

/// Slugs removed after renaming.
pub const DROP_COLUMNS: &[&str] = &[
    "replaced_dpe_number",
    "associated_building_dpe_number",
    "condo_registration_number",
    "housing_tax_id",
    "stairwell",
    "dpe_model",
    "raw_address",
    "postal_code_raw",
    "city_name_raw",
    "dpe_version",
];

/// Slugs cast to signed integers once nulls are filled.
pub const INT_COLUMNS: &[&str] = &[
    "construction_year",
    "occupant_count",
    "postal_code_ban",
    "apartment_floor",
    "region_number_ban",
];

/// Header as found in the file → mapping key. The export writes some spaces
/// as underscores, and a UTF-8 BOM may precede the first header.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').replace('_', " ")
}

/// Strict lookup: an unknown header is an error, never passed through.
pub fn english_name(header: &str) -> Result<&'static str> {
    MAPPING_INDEX
        .get(normalize_header(header).as_str())
        .copied()
        .ok_or_else(|| TransformError::UnmappedColumn(header.to_string()))
}

/// What renaming would do to one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPlan {
    Mapped {
        source: String,
        english: &'static str,
        slug: String,
    },
    Unmapped {
        source: String,
    },
}

pub fn plan_columns<S: AsRef<str>>(headers: &[S]) -> Vec<ColumnPlan> {
    headers
        .iter()
        .map(|h| {
            let source = h.as_ref().to_string();
            match english_name(&source) {
                Ok(english) => ColumnPlan::Mapped {
                    slug: slugify(english),
                    english,
                    source,
                },
                Err(_) => ColumnPlan::Unmapped { source },
            }
        })
        .collect()
}

/// Replace every column name with the slug of its English label.
/// Column order and data are untouched.
pub fn rename_and_slugify(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let slug = slugify(english_name(field.name())?);
        debug!(from = %field.name(), to = %slug, "renamed column");
        fields.push(field.as_ref().clone().with_name(slug));
    }

    let renamed = rebuild_batch(
        Arc::new(Schema::new(fields)),
        batch.columns().to_vec(),
        batch.num_rows(),
    )?;
    info!(columns = renamed.num_columns(), "renamed");
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::{
        array::{ArrayRef, Int64Array, StringArray},
        datatypes::{DataType, Field},
    };
    use std::collections::HashSet;

    fn all_slugs() -> Vec<String> {
        COLUMN_MAPPING.iter().map(|(_, en)| slugify(en)).collect()
    }

    #[test]
    fn test_mapping_has_unique_keys_and_slugs() {
        assert_eq!(COLUMN_MAPPING.len(), 63);
        assert_eq!(MAPPING_INDEX.len(), COLUMN_MAPPING.len());
        let slugs: HashSet<String> = all_slugs().into_iter().collect();
        assert_eq!(slugs.len(), COLUMN_MAPPING.len());
    }

    #[test]
    fn test_rule_sets_name_real_slugs() {
        let slugs: HashSet<String> = all_slugs().into_iter().collect();
        for name in DROP_COLUMNS.iter().chain(INT_COLUMNS) {
            assert!(slugs.contains(*name), "{name} is not produced by the mapping");
        }
        assert_eq!(DROP_COLUMNS.len(), 10);
        assert_eq!(INT_COLUMNS.len(), 5);
    }

    #[test]
    fn test_underscore_headers_are_normalized() {
        assert_eq!(english_name("Date_réception_DPE").unwrap(), "DPE Reception Date");
        assert_eq!(english_name("Nom__commune_(BAN)").unwrap(), "City Name (BAN)");
        assert_eq!(english_name("\u{feff}N°DPE").unwrap(), "DPE Number");
    }

    #[test]
    fn test_unmapped_header_fails() {
        match english_name("Colonne inconnue") {
            Err(TransformError::UnmappedColumn(name)) => assert_eq!(name, "Colonne inconnue"),
            other => panic!("expected UnmappedColumn, got {other:?}"),
        }
        // single space where the dataset has two
        assert!(english_name("Nom commune (BAN)").is_err());
    }

    #[test]
    fn test_plan_columns() {
        let plans = plan_columns(&["Année_construction", "Bogus"]);
        assert_eq!(
            plans,
            vec![
                ColumnPlan::Mapped {
                    source: "Année_construction".into(),
                    english: "Construction Year",
                    slug: "construction_year".into(),
                },
                ColumnPlan::Unmapped {
                    source: "Bogus".into()
                },
            ]
        );
    }

    #[test]
    fn test_rename_and_slugify_batch() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("N°DPE", DataType::Utf8, true),
            Field::new("Conso_kWhep/m²/an", DataType::Int64, true),
        ]));
        let cols: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["A1", "A2"])) as ArrayRef,
            Arc::new(Int64Array::from(vec![Some(120), None])) as ArrayRef,
        ];
        let batch = RecordBatch::try_new(schema, cols).unwrap();

        let renamed = rename_and_slugify(&batch).unwrap();
        let names: Vec<String> = renamed
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, ["dpe_number", "energy_use_kwhepm2year"]);
        assert_eq!(renamed.num_rows(), 2);
        assert_eq!(renamed.column(1).null_count(), 1);
    }

    #[test]
    fn test_rename_rejects_unknown_column() {
        let schema = Arc::new(Schema::new(vec![Field::new("Extra", DataType::Utf8, true)]));
        let cols: Vec<ArrayRef> = vec![Arc::new(StringArray::from(vec!["x"])) as ArrayRef];
        let batch = RecordBatch::try_new(schema, cols).unwrap();
        assert!(matches!(
            rename_and_slugify(&batch),
            Err(TransformError::UnmappedColumn(_))
        ));
    }
}
