// Derived view tables computed from the loaded datasets.
//
// Every function here is a pure transform over the immutable bundle: filter,
// melt, group, or min/max. The flow graph has its own module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wellsight_ingest::records::{HappinessRecord, SurveyRecord};

/// How many countries the treemap keeps, ranked by ladder score.
pub const TREEMAP_TOP_N: usize = 20;

/// How many survey rows the violin view keeps at most.
pub const VIOLIN_SAMPLE_SIZE: usize = 3500;

/// One point of the GDP-vs-happiness bubble chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubblePoint {
    pub country: String,
    pub gdp_per_capita: f64,
    pub ladder_score: f64,
    pub social_support: f64,
}

/// Countries with a GDP figure and a social support figure, one point each.
/// Rows lacking either factor are dropped, matching the source dashboard's
/// dropna before plotting.
pub fn bubble_view(records: &[HappinessRecord]) -> Vec<BubblePoint> {
    records
        .iter()
        .filter_map(|r| {
            Some(BubblePoint {
                country: r.country.clone(),
                gdp_per_capita: r.gdp_per_capita?,
                ladder_score: r.ladder_score,
                social_support: r.social_support?,
            })
        })
        .collect()
}

/// Happiness factor, in the fixed display order used by the treemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Factor {
    GdpPerCapita,
    SocialSupport,
    HealthyLifeExpectancy,
}

impl Factor {
    pub const ALL: [Factor; 3] = [
        Factor::GdpPerCapita,
        Factor::SocialSupport,
        Factor::HealthyLifeExpectancy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::GdpPerCapita => "Log GDP per capita",
            Factor::SocialSupport => "Social support",
            Factor::HealthyLifeExpectancy => "Healthy life expectancy",
        }
    }
}

/// One (factor, country) cell of the treemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreemapCell {
    pub factor: Factor,
    pub country: String,
    pub value: f64,
}

/// Top `top_n` countries by ladder score, melted to long form: one cell per
/// (factor, country) pair with a present value. Cells come out factor-major
/// in the fixed `Factor::ALL` order, countries in rank order within a factor.
pub fn treemap_view(records: &[HappinessRecord], top_n: usize) -> Vec<TreemapCell> {
    let mut ranked: Vec<&HappinessRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        b.ladder_score
            .partial_cmp(&a.ladder_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);

    let mut cells = Vec::new();
    for factor in Factor::ALL {
        for record in &ranked {
            let value = match factor {
                Factor::GdpPerCapita => record.gdp_per_capita,
                Factor::SocialSupport => record.social_support,
                Factor::HealthyLifeExpectancy => record.healthy_life_expectancy,
            };
            if let Some(value) = value {
                cells.push(TreemapCell {
                    factor,
                    country: record.country.clone(),
                    value,
                });
            }
        }
    }
    cells
}

/// One gender's distribution of stress responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolinGroup {
    pub label: String,
    pub values: Vec<f64>,
}

/// Map a survey response onto the ordered numeric scale the violin plots.
/// Categorical answers use No=0, Maybe=1, Yes=2; numeric answers pass
/// through; anything else is dropped.
pub fn response_score(response: &str) -> Option<f64> {
    match response.trim().to_lowercase().as_str() {
        "no" => Some(0.0),
        "maybe" => Some(1.0),
        "yes" => Some(2.0),
        other => other.parse::<f64>().ok(),
    }
}

/// Stress responses grouped by gender (lexicographic group order), over a
/// deterministic sample of at most `sample_size` rows.
///
/// The sample is a fixed stride over the full set rather than a seeded
/// shuffle, so repeated runs see the same rows.
pub fn violin_view(records: &[SurveyRecord], sample_size: usize) -> Vec<ViolinGroup> {
    let sampled = sample_stride(records, sample_size);

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in sampled {
        if let Some(score) = response_score(&record.growing_stress) {
            groups
                .entry(record.gender.clone())
                .or_default()
                .push(score);
        }
    }

    groups
        .into_iter()
        .map(|(label, values)| ViolinGroup { label, values })
        .collect()
}

fn sample_stride(records: &[SurveyRecord], sample_size: usize) -> Vec<&SurveyRecord> {
    if sample_size == 0 || records.is_empty() {
        return Vec::new();
    }
    if records.len() <= sample_size {
        return records.iter().collect();
    }
    let stride = records.len().div_ceil(sample_size);
    records.iter().step_by(stride).collect()
}

/// One country of the globe choropleth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoroplethRow {
    pub country: String,
    pub ladder_score: f64,
}

/// All countries with their ladder scores plus the score range for the
/// color axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoroplethView {
    pub rows: Vec<ChoroplethRow>,
    pub score_min: f64,
    pub score_max: f64,
}

pub fn choropleth_view(records: &[HappinessRecord]) -> ChoroplethView {
    let rows: Vec<ChoroplethRow> = records
        .iter()
        .map(|r| ChoroplethRow {
            country: r.country.clone(),
            ladder_score: r.ladder_score,
        })
        .collect();

    let score_min = rows
        .iter()
        .map(|r| r.ladder_score)
        .fold(f64::INFINITY, f64::min);
    let score_max = rows
        .iter()
        .map(|r| r.ladder_score)
        .fold(f64::NEG_INFINITY, f64::max);

    ChoroplethView {
        rows,
        score_min,
        score_max,
    }
}
