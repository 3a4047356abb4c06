use serde::{Deserialize, Serialize};

/// One row of the national happiness table (WHR2024.csv).
///
/// The three "Explained by" factors may be blank in the source data, so they
/// load as `None` rather than dropping the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HappinessRecord {
    pub country: String,
    pub ladder_score: f64,
    pub gdp_per_capita: Option<f64>,
    pub social_support: Option<f64>,
    pub healthy_life_expectancy: Option<f64>,
}

impl HappinessRecord {
    pub fn new(country: String, ladder_score: f64) -> Self {
        Self {
            country,
            ladder_score,
            gdp_per_capita: None,
            social_support: None,
            healthy_life_expectancy: None,
        }
    }
}

/// One row of the individual mental-health survey (MentalHealthDataset.csv).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub gender: String,
    pub growing_stress: String,
}

/// One row of the work-hours/stress table (mental_health_datafinaldata.csv).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorklifeRecord {
    pub work_hours: f64,
    pub stress_level: StressLevel,
}

/// Self-reported stress category. The order here is the canonical display
/// order everywhere; consumers index into `ALL`, never into grouped data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Medium, StressLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(StressLevel::Low),
            "medium" => Some(StressLevel::Medium),
            "high" => Some(StressLevel::High),
            _ => None,
        }
    }

    /// Position in the canonical order.
    pub fn position(&self) -> usize {
        match self {
            StressLevel::Low => 0,
            StressLevel::Medium => 1,
            StressLevel::High => 2,
        }
    }
}

/// All three datasets, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub happiness: Vec<HappinessRecord>,
    pub survey: Vec<SurveyRecord>,
    pub worklife: Vec<WorklifeRecord>,
}

impl DatasetBundle {
    pub fn is_empty(&self) -> bool {
        self.happiness.is_empty() && self.survey.is_empty() && self.worklife.is_empty()
    }
}
