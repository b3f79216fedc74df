use serde::{Deserialize, Serialize};

use crate::domain::anamnesis::{AnamnesisAnswers, DegreeBand, Lifestyle, Purpose};
use crate::domain::product::{Category, Product};

pub const SHORTLIST_LIMIT: usize = 3;
pub const DEFAULT_REFRACTIVE_INDEX: f64 = 1.49;

pub const PROGRESSIVE_TAG: &str = "Progressive";
pub const MONOFOCAL_TAG: &str = "Monofocal";
pub const BLUE_LIGHT_TAG: &str = "Blue-light filter";
pub const PREMIUM_DIGITAL_TAG: &str = "Premium digital";
pub const PHOTOCHROMIC_TAG: &str = "Photochromic";
pub const POLYCARBONATE_TAG: &str = "Polycarbonate";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSettings {
    /// Can only narrow the shortlist; anything above [`SHORTLIST_LIMIT`] is capped.
    pub shortlist_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self { shortlist_limit: SHORTLIST_LIMIT }
    }
}

pub trait LensRecommender: Send + Sync {
    fn recommend<'a>(&self, lenses: &'a [Product], answers: &AnamnesisAnswers)
        -> Vec<&'a Product>;
}

#[derive(Clone, Debug, Default)]
pub struct RuleBasedRecommender {
    settings: RecommendationSettings,
}

impl RuleBasedRecommender {
    pub fn new(settings: RecommendationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RecommendationSettings {
        &self.settings
    }
}

impl LensRecommender for RuleBasedRecommender {
    fn recommend<'a>(
        &self,
        lenses: &'a [Product],
        answers: &AnamnesisAnswers,
    ) -> Vec<&'a Product> {
        let (Some(purpose), Some(lifestyle), Some(degree_band)) =
            (answers.purpose, answers.lifestyle, answers.degree_band)
        else {
            return Vec::new();
        };

        let family = lenses.iter().filter(|product| product.category == Category::Lens);

        let mut shortlist: Vec<&Product> = if purpose == Purpose::Multifocal {
            family.filter(|lens| lens.has_tag(PROGRESSIVE_TAG)).collect()
        } else {
            let mut single_vision: Vec<&Product> =
                family.filter(|lens| lens.has_tag(MONOFOCAL_TAG)).collect();
            single_vision.retain(|lens| fits_lifestyle(lens, lifestyle));
            if degree_band == DegreeBand::High {
                rank_by_refractive_index(&mut single_vision);
            }
            single_vision
        };

        shortlist.truncate(self.settings.shortlist_limit.min(SHORTLIST_LIMIT));
        shortlist
    }
}

/// Narrows `lenses` to at most three candidates for the given intake answers.
/// Any unanswered question yields an empty shortlist.
pub fn recommend_lenses<'a>(lenses: &'a [Product], answers: &AnamnesisAnswers) -> Vec<&'a Product> {
    RuleBasedRecommender::default().recommend(lenses, answers)
}

/// Reads the index from labels like "Polycarbonate 1.59" (second whitespace token).
///
/// The whole token must be a finite number: "Resina 1.67asph" has no index and
/// ranks at [`DEFAULT_REFRACTIVE_INDEX`] instead of reading a numeric prefix.
pub fn refractive_index(material: Option<&str>) -> f64 {
    material
        .and_then(|label| label.split_whitespace().nth(1))
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|index| index.is_finite())
        .unwrap_or(DEFAULT_REFRACTIVE_INDEX)
}

fn fits_lifestyle(lens: &Product, lifestyle: Lifestyle) -> bool {
    match lifestyle {
        Lifestyle::Digital => lens.has_tag(BLUE_LIGHT_TAG) || lens.has_tag(PREMIUM_DIGITAL_TAG),
        Lifestyle::Sun => lens.has_tag(PHOTOCHROMIC_TAG),
        Lifestyle::Active => lens.has_tag(POLYCARBONATE_TAG),
    }
}

// `sort_by` is stable, so lenses with equal indices keep catalog order.
fn rank_by_refractive_index(lenses: &mut [&Product]) {
    lenses.sort_by(|left, right| {
        let left = refractive_index(left.material.as_deref());
        let right = refractive_index(right.material.as_deref());
        right.total_cmp(&left)
    });
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{
        recommend_lenses, refractive_index, LensRecommender, RecommendationSettings,
        RuleBasedRecommender, DEFAULT_REFRACTIVE_INDEX,
    };
    use crate::domain::anamnesis::{AnamnesisAnswers, DegreeBand, Lifestyle, Purpose};
    use crate::domain::product::{Category, Price, Product};

    fn lens(id: &str, material: &str, tags: &[&str]) -> Product {
        Product::new(id, format!("Lens {id}"), Category::Lens, "Optica", Price::Amount(Decimal::new(30_000, 2)))
            .with_material(material)
            .with_tags(tags.iter().copied())
    }

    fn lenses() -> Vec<Product> {
        vec![
            lens("l1", "Acetato 1.50", &["Monofocal", "Polycarbonate"]),
            lens("l2", "Policarbonato 1.59", &["Monofocal", "Polycarbonate"]),
            lens("l3", "Resina 1.67", &["Monofocal", "Blue-light filter"]),
            lens("l4", "Resina 1.74", &["Monofocal", "Premium digital"]),
            lens("l5", "Trivex", &["Monofocal", "Blue-light filter"]),
            lens("l6", "Resina 1.60", &["Monofocal", "Photochromic"]),
            lens("l7", "Resina 1.67", &["Monofocal", "Blue-light filter"]),
            lens("p1", "Resina 1.67", &["Progressive"]),
            lens("p2", "Resina 1.74", &["Progressive"]),
            lens("p3", "Resina 1.50", &["Progressive"]),
            lens("p4", "Resina 1.60", &["Progressive"]),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|product| product.id.0.clone()).collect()
    }

    #[test]
    fn multifocal_returns_progressives_only_capped_at_three() {
        let lenses = lenses();
        let answers =
            AnamnesisAnswers::complete(Purpose::Multifocal, Lifestyle::Digital, DegreeBand::High);

        let shortlist = recommend_lenses(&lenses, &answers);

        assert_eq!(ids(&shortlist), vec!["p1", "p2", "p3"], "catalog order, no index ranking");
        assert!(shortlist.iter().all(|lens| lens.has_tag("Progressive")));
    }

    #[test]
    fn active_high_degree_ranks_polycarbonate_by_index() {
        let lenses = lenses();
        let answers =
            AnamnesisAnswers::complete(Purpose::Distance, Lifestyle::Active, DegreeBand::High);

        let shortlist = recommend_lenses(&lenses, &answers);

        assert_eq!(ids(&shortlist), vec!["l2", "l1"]);
    }

    #[test]
    fn digital_lifestyle_accepts_blue_light_or_premium_digital() {
        let lenses = lenses();
        let answers =
            AnamnesisAnswers::complete(Purpose::Near, Lifestyle::Digital, DegreeBand::Low);

        let shortlist = recommend_lenses(&lenses, &answers);

        assert_eq!(ids(&shortlist), vec!["l3", "l4", "l5"]);
    }

    #[test]
    fn high_degree_ranking_defaults_unparsable_index_and_keeps_ties_stable() {
        let lenses = lenses();
        let answers = AnamnesisAnswers::complete(
            Purpose::Occupational,
            Lifestyle::Digital,
            DegreeBand::High,
        );

        let lenses: Vec<Product> =
            lenses.into_iter().filter(|lens| lens.id.as_str() != "l4").collect();

        let shortlist = recommend_lenses(&lenses, &answers);

        // l3 and l7 share 1.67; l5 ("Trivex") falls back to 1.49 and stays included.
        assert_eq!(ids(&shortlist), vec!["l3", "l7", "l5"]);
    }

    #[test]
    fn configured_limit_never_widens_the_shortlist() {
        let lenses = lenses();
        let answers =
            AnamnesisAnswers::complete(Purpose::Multifocal, Lifestyle::Sun, DegreeBand::Low);

        let wide = RuleBasedRecommender::new(RecommendationSettings { shortlist_limit: 6 })
            .recommend(&lenses, &answers);
        let narrow = RuleBasedRecommender::new(RecommendationSettings { shortlist_limit: 1 })
            .recommend(&lenses, &answers);

        assert_eq!(ids(&wide), vec!["p1", "p2", "p3"]);
        assert_eq!(ids(&narrow), vec!["p1"]);
    }

    #[test]
    fn sun_lifestyle_keeps_photochromic_only() {
        let lenses = lenses();
        let answers =
            AnamnesisAnswers::complete(Purpose::Distance, Lifestyle::Sun, DegreeBand::Medium);

        assert_eq!(ids(&recommend_lenses(&lenses, &answers)), vec!["l6"]);
    }

    #[test]
    fn any_unset_answer_yields_an_empty_shortlist() {
        let lenses = lenses();
        let complete =
            AnamnesisAnswers::complete(Purpose::Multifocal, Lifestyle::Sun, DegreeBand::Low);

        for partial in [
            AnamnesisAnswers { purpose: None, ..complete },
            AnamnesisAnswers { lifestyle: None, ..complete },
            AnamnesisAnswers { degree_band: None, ..complete },
            AnamnesisAnswers::default(),
        ] {
            assert!(recommend_lenses(&lenses, &partial).is_empty(), "{partial:?}");
        }
    }

    #[test]
    fn non_lens_products_are_never_recommended() {
        let mut catalog = lenses();
        catalog.insert(
            0,
            Product::new("f1", "Frame", Category::Frame, "Optica", Price::OnRequest)
                .with_tags(["Progressive"]),
        );
        let answers =
            AnamnesisAnswers::complete(Purpose::Multifocal, Lifestyle::Sun, DegreeBand::Low);

        assert_eq!(ids(&recommend_lenses(&catalog, &answers)), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn refractive_index_parses_second_token_or_defaults() {
        assert_eq!(refractive_index(Some("Policarbonato 1.59")), 1.59);
        assert_eq!(refractive_index(Some("Resina  1.74 Premium")), 1.74);
        assert_eq!(refractive_index(Some("Trivex")), DEFAULT_REFRACTIVE_INDEX);
        assert_eq!(refractive_index(Some("Resina alta")), DEFAULT_REFRACTIVE_INDEX);
        assert_eq!(refractive_index(Some("Resina NaN")), DEFAULT_REFRACTIVE_INDEX);
        assert_eq!(refractive_index(None), DEFAULT_REFRACTIVE_INDEX);
    }

    #[test]
    fn index_token_with_a_suffix_is_not_read_as_a_prefix() {
        assert_eq!(refractive_index(Some("Resina 1.67asph")), DEFAULT_REFRACTIVE_INDEX);
        assert_eq!(refractive_index(Some("Resina 1.67 asph")), 1.67);
    }
}
