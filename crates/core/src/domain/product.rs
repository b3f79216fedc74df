use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frame,
    Lens,
    Accessory,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Frame, Category::Lens, Category::Accessory];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Lens => "lens",
            Self::Accessory => "accessory",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frame" | "frames" => Ok(Self::Frame),
            "lens" | "lenses" => Ok(Self::Lens),
            "accessory" | "accessories" => Ok(Self::Accessory),
            other => Err(format!("unknown category `{other}` (expected frames|lenses|accessories)")),
        }
    }
}

/// Either a concrete amount or the "quote on request" marker; never absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Price {
    Amount(Decimal),
    OnRequest,
}

impl Price {
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::OnRequest => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Unisex,
    Child,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Unisex => "Unisex",
            Self::Child => "Child",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sph_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyl_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_range: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Product {
    /// A bare product with no optional attributes; fixtures and tests fill in the rest.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        brand: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: ProductId(id.into()),
            name: name.into(),
            category,
            brand: brand.into(),
            price,
            original_price: None,
            tags: Vec::new(),
            material: None,
            frame_color: None,
            gender: None,
            measurements: None,
            sph_range: None,
            cyl_range: None,
            add_range: None,
            likes: 0,
            rating: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_frame_color(mut self, frame_color: impl Into<String>) -> Self {
        self.frame_color = Some(frame_color.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }
}
