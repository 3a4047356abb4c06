// CSV loaders for the three dashboard datasets

use crate::error::{IngestError, Result};
use crate::records::{DatasetBundle, HappinessRecord, StressLevel, SurveyRecord, WorklifeRecord};
use csv::StringRecord;
use std::path::Path;
use tracing::{debug, warn};

// Expected column headers, resolved by name so column order never matters
pub const COL_COUNTRY: &str = "Country name";
pub const COL_LADDER: &str = "Ladder score";
pub const COL_GDP: &str = "Explained by: Log GDP per capita";
pub const COL_SOCIAL: &str = "Explained by: Social support";
pub const COL_LIFE: &str = "Explained by: Healthy life expectancy";
pub const COL_GENDER: &str = "Gender";
pub const COL_GROWING_STRESS: &str = "Growing_Stress";
pub const COL_WORK_HOURS: &str = "Work_Hours";
pub const COL_STRESS_LEVEL: &str = "Stress_Level";

// Default dataset filenames inside the data directory
pub const HAPPINESS_FILE: &str = "WHR2024.csv";
pub const SURVEY_FILE: &str = "MentalHealthDataset.csv";
pub const WORKLIFE_FILE: &str = "mental_health_datafinaldata.csv";

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| IngestError::MissingColumn {
            column: column.to_string(),
            file: path.display().to_string(),
        })
}

fn field<'a>(row: &'a StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("").trim()
}

/// Parse an optional numeric field. Blank or malformed values become `None`.
fn parse_opt_f64(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Load the national happiness table.
///
/// Rows without a parseable ladder score are skipped with a warning; the
/// factor columns are optional per row.
pub fn load_happiness(path: &Path) -> Result<Vec<HappinessRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let country_idx = column_index(&headers, COL_COUNTRY, path)?;
    let ladder_idx = column_index(&headers, COL_LADDER, path)?;
    let gdp_idx = column_index(&headers, COL_GDP, path)?;
    let social_idx = column_index(&headers, COL_SOCIAL, path)?;
    let life_idx = column_index(&headers, COL_LIFE, path)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        let country = field(&row, country_idx).to_string();
        let Some(ladder_score) = parse_opt_f64(field(&row, ladder_idx)) else {
            skipped += 1;
            warn!(country = %country, "skipping happiness row without a ladder score");
            continue;
        };

        records.push(HappinessRecord {
            country,
            ladder_score,
            gdp_per_capita: parse_opt_f64(field(&row, gdp_idx)),
            social_support: parse_opt_f64(field(&row, social_idx)),
            healthy_life_expectancy: parse_opt_f64(field(&row, life_idx)),
        });
    }

    debug!(
        loaded = records.len(),
        skipped,
        file = %path.display(),
        "happiness dataset loaded"
    );
    Ok(records)
}

/// Load the individual mental-health survey table.
pub fn load_survey(path: &Path) -> Result<Vec<SurveyRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let gender_idx = column_index(&headers, COL_GENDER, path)?;
    let stress_idx = column_index(&headers, COL_GROWING_STRESS, path)?;

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let gender = field(&row, gender_idx);
        if gender.is_empty() {
            continue;
        }
        records.push(SurveyRecord {
            gender: gender.to_string(),
            growing_stress: field(&row, stress_idx).to_string(),
        });
    }

    debug!(loaded = records.len(), file = %path.display(), "survey dataset loaded");
    Ok(records)
}

/// Load the work-hours/stress table.
///
/// Rows with an unparseable hours value or a stress label outside the fixed
/// Low/Medium/High categories are skipped with a warning.
pub fn load_worklife(path: &Path) -> Result<Vec<WorklifeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let hours_idx = column_index(&headers, COL_WORK_HOURS, path)?;
    let stress_idx = column_index(&headers, COL_STRESS_LEVEL, path)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        let hours_raw = field(&row, hours_idx);
        let stress_raw = field(&row, stress_idx);

        let Some(work_hours) = parse_opt_f64(hours_raw) else {
            skipped += 1;
            warn!(value = %hours_raw, "skipping worklife row with unparseable work hours");
            continue;
        };
        let Some(stress_level) = StressLevel::from_str(stress_raw) else {
            skipped += 1;
            warn!(value = %stress_raw, "skipping worklife row with unknown stress level");
            continue;
        };

        records.push(WorklifeRecord {
            work_hours,
            stress_level,
        });
    }

    debug!(
        loaded = records.len(),
        skipped,
        file = %path.display(),
        "worklife dataset loaded"
    );
    Ok(records)
}

impl DatasetBundle {
    /// Load all three datasets from a directory using the default filenames.
    ///
    /// This is the single initialization step for a session: the returned
    /// bundle is immutable and handed to every downstream view.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let bundle = Self {
            happiness: load_happiness(&dir.join(HAPPINESS_FILE))?,
            survey: load_survey(&dir.join(SURVEY_FILE))?,
            worklife: load_worklife(&dir.join(WORKLIFE_FILE))?,
        };

        if bundle.is_empty() {
            return Err(IngestError::Other(format!(
                "no usable rows in any dataset under {}",
                dir.display()
            )));
        }

        Ok(bundle)
    }
}
