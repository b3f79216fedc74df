use serde::{Deserialize, Serialize};

use crate::domain::product::Category;

/// How a facet section decides whether a product satisfies a selected option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// "Male"/"Female" also admit Unisex products; other options compare exactly.
    Gender,
    FrameColor,
    Material,
    /// Case-insensitive substring match against tags or brand.
    Generic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSection {
    pub title: String,
    pub kind: FacetKind,
    pub options: Vec<String>,
}

impl FacetSection {
    pub fn new(title: &str, kind: FacetKind, options: &[&str]) -> Self {
        Self {
            title: title.to_owned(),
            kind,
            options: options.iter().map(|option| (*option).to_owned()).collect(),
        }
    }
}

pub const GENDER_SECTION: &str = "Gender";
pub const FRAME_COLOR_SECTION: &str = "Frame color";
pub const SHAPE_SECTION: &str = "Shape";
pub const MATERIAL_SECTION: &str = "Material";
pub const BRAND_SECTION: &str = "Brand";
pub const TYPE_SECTION: &str = "Type";
pub const TREATMENTS_SECTION: &str = "Treatments";

/// Static category -> sections lookup. The kind of each section is fixed here,
/// once, so filtering never has to interpret a section title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTable {
    frames: Vec<FacetSection>,
    lenses: Vec<FacetSection>,
    accessories: Vec<FacetSection>,
}

impl FacetTable {
    pub fn new(
        frames: Vec<FacetSection>,
        lenses: Vec<FacetSection>,
        accessories: Vec<FacetSection>,
    ) -> Self {
        Self { frames, lenses, accessories }
    }

    pub fn sections_for(&self, category: Category) -> &[FacetSection] {
        match category {
            Category::Frame => &self.frames,
            Category::Lens => &self.lenses,
            Category::Accessory => &self.accessories,
        }
    }

    pub fn section(&self, title: &str) -> Option<&FacetSection> {
        self.frames
            .iter()
            .chain(&self.lenses)
            .chain(&self.accessories)
            .find(|section| section.title == title)
    }

    /// Titles not present in the table fall back to [`FacetKind::Generic`].
    pub fn kind_of(&self, title: &str) -> FacetKind {
        self.section(title).map(|section| section.kind).unwrap_or(FacetKind::Generic)
    }
}

impl Default for FacetTable {
    fn default() -> Self {
        Self::new(
            vec![
                FacetSection::new(
                    GENDER_SECTION,
                    FacetKind::Gender,
                    &["Female", "Male", "Unisex", "Child"],
                ),
                FacetSection::new(
                    FRAME_COLOR_SECTION,
                    FacetKind::FrameColor,
                    &[
                        "Blue",
                        "Gold",
                        "Silver",
                        "Black",
                        "Rose",
                        "Tortoise",
                        "Ivory",
                        "Amber",
                        "Pink",
                        "Brown",
                        "Crystal",
                        "Transparent",
                        "Red",
                        "Glitter",
                        "Lilac",
                        "Nude",
                        "Mixed",
                        "Grey",
                        "White",
                        "Yellow",
                    ],
                ),
                FacetSection::new(
                    SHAPE_SECTION,
                    FacetKind::Generic,
                    &["Square", "Round", "Aviator", "Cat-eye"],
                ),
                FacetSection::new(
                    MATERIAL_SECTION,
                    FacetKind::Material,
                    &["Acetate", "Metal", "Titanium"],
                ),
            ],
            vec![
                FacetSection::new(
                    BRAND_SECTION,
                    FacetKind::Generic,
                    &["Varilux", "Zeiss", "Hoya", "Kodak"],
                ),
                FacetSection::new(
                    TYPE_SECTION,
                    FacetKind::Generic,
                    &["Progressive", "Single vision", "Monofocal"],
                ),
                FacetSection::new(
                    TREATMENTS_SECTION,
                    FacetKind::Generic,
                    &["Blue-light filter", "Anti-reflective", "Photochromic"],
                ),
            ],
            Vec::new(),
        )
    }
}
