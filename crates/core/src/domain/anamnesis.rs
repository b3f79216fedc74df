use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    Distance,
    Near,
    Multifocal,
    Occupational,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Digital,
    Sun,
    Active,
}

/// Prescription-strength band: Low (0-2), Medium (2-4), High (4+).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeBand {
    Low,
    Medium,
    High,
}

/// The three-question intake. Any field may be unset while the user is still answering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnamnesisAnswers {
    pub purpose: Option<Purpose>,
    pub lifestyle: Option<Lifestyle>,
    pub degree_band: Option<DegreeBand>,
}

impl AnamnesisAnswers {
    pub fn complete(purpose: Purpose, lifestyle: Lifestyle, degree_band: DegreeBand) -> Self {
        Self { purpose: Some(purpose), lifestyle: Some(lifestyle), degree_band: Some(degree_band) }
    }

    pub fn is_complete(&self) -> bool {
        self.purpose.is_some() && self.lifestyle.is_some() && self.degree_band.is_some()
    }

    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.purpose.is_none() {
            missing.push("purpose".to_owned());
        }
        if self.lifestyle.is_none() {
            missing.push("lifestyle".to_owned());
        }
        if self.degree_band.is_none() {
            missing.push("degree_band".to_owned());
        }
        missing
    }
}

macro_rules! parse_answer {
    ($ty:ty, $label:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    other => Err(format!(concat!("unsupported ", $label, " `{}`"), other)),
                }
            }
        }
    };
}

parse_answer!(Purpose, "purpose", {
    "distance" => Purpose::Distance,
    "near" => Purpose::Near,
    "multifocal" => Purpose::Multifocal,
    "occupational" => Purpose::Occupational,
});

parse_answer!(Lifestyle, "lifestyle", {
    "digital" => Lifestyle::Digital,
    "sun" => Lifestyle::Sun,
    "active" => Lifestyle::Active,
});

parse_answer!(DegreeBand, "degree band", {
    "low" => DegreeBand::Low,
    "medium" => DegreeBand::Medium,
    "high" => DegreeBand::High,
});
