//! Built-in demo catalog used when no seed file is configured.

use rust_decimal::Decimal;

use crate::catalog::CatalogStore;
use crate::errors::DomainError;
use crate::domain::product::{Category, Gender, Price, Product};

#[derive(Debug, Clone, Copy)]
struct FrameSeed {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    price_cents: i64,
    original_price_cents: Option<i64>,
    gender: Gender,
    frame_color: &'static str,
    material: &'static str,
    measurements: &'static str,
    tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
struct LensSeed {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    /// `None` means quote on request.
    price_cents: Option<i64>,
    material: &'static str,
    sph_range: &'static str,
    cyl_range: &'static str,
    add_range: Option<&'static str>,
    tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
struct AccessorySeed {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    price_cents: i64,
    tags: &'static [&'static str],
}

const FRAME_SEEDS: &[FrameSeed] = &[
    FrameSeed {
        id: "f1",
        name: "Aviator Classic",
        brand: "Ray-Ban",
        price_cents: 89_900,
        original_price_cents: Some(99_900),
        gender: Gender::Male,
        frame_color: "Gold",
        material: "Metal",
        measurements: "58-14-140",
        tags: &["Aviator", "Best seller"],
    },
    FrameSeed {
        id: "f2",
        name: "Bloom Cat Eye",
        brand: "Vogue",
        price_cents: 54_900,
        original_price_cents: None,
        gender: Gender::Female,
        frame_color: "Tortoise",
        material: "Acetate",
        measurements: "52-17-140",
        tags: &["Cat-eye"],
    },
    FrameSeed {
        id: "f3",
        name: "Studio Round",
        brand: "Oakley",
        price_cents: 61_000,
        original_price_cents: None,
        gender: Gender::Unisex,
        frame_color: "Black",
        material: "Acetate",
        measurements: "49-21-145",
        tags: &["Round"],
    },
    FrameSeed {
        id: "f4",
        name: "Titan Square",
        brand: "Silhouette",
        price_cents: 129_000,
        original_price_cents: Some(149_000),
        gender: Gender::Male,
        frame_color: "Silver",
        material: "Titanium",
        measurements: "54-18-145",
        tags: &["Square", "Lightweight"],
    },
    FrameSeed {
        id: "f5",
        name: "Junior Flex",
        brand: "Nano Vista",
        price_cents: 29_900,
        original_price_cents: None,
        gender: Gender::Child,
        frame_color: "Blue",
        material: "Acetate",
        measurements: "44-15-125",
        tags: &["Round", "Flexible"],
    },
    FrameSeed {
        id: "f6",
        name: "Crystal Line",
        brand: "Prada",
        price_cents: 149_900,
        original_price_cents: None,
        gender: Gender::Female,
        frame_color: "Crystal",
        material: "Acetate",
        measurements: "53-18-140",
        tags: &["Square"],
    },
];

const LENS_SEEDS: &[LensSeed] = &[
    LensSeed {
        id: "l1",
        name: "Kodak Blue UV",
        brand: "Kodak",
        price_cents: Some(38_000),
        material: "Resina 1.56",
        sph_range: "-6.00 to +4.00",
        cyl_range: "-2.00",
        add_range: None,
        tags: &["Monofocal", "Blue-light filter", "Anti-reflective"],
    },
    LensSeed {
        id: "l2",
        name: "Hoya Blue Control",
        brand: "Hoya",
        price_cents: Some(52_000),
        material: "Resina 1.60",
        sph_range: "-8.00 to +6.00",
        cyl_range: "-4.00",
        add_range: None,
        tags: &["Monofocal", "Blue-light filter", "Anti-reflective"],
    },
    LensSeed {
        id: "l3",
        name: "Zeiss SmartLife Digital",
        brand: "Zeiss",
        price_cents: Some(89_000),
        material: "Resina 1.67",
        sph_range: "-10.00 to +8.00",
        cyl_range: "-4.00",
        add_range: None,
        tags: &["Monofocal", "Premium digital", "Anti-reflective"],
    },
    LensSeed {
        id: "l4",
        name: "Transitions Gen S",
        brand: "Essilor",
        price_cents: Some(74_000),
        material: "Resina 1.60",
        sph_range: "-8.00 to +6.00",
        cyl_range: "-4.00",
        add_range: None,
        tags: &["Monofocal", "Photochromic"],
    },
    LensSeed {
        id: "l5",
        name: "Hoya Sensity 2",
        brand: "Hoya",
        price_cents: Some(81_000),
        material: "Resina 1.67",
        sph_range: "-10.00 to +6.00",
        cyl_range: "-4.00",
        add_range: None,
        tags: &["Monofocal", "Photochromic", "Anti-reflective"],
    },
    LensSeed {
        id: "l6",
        name: "Kodak Sport Shield",
        brand: "Kodak",
        price_cents: Some(42_000),
        material: "Policarbonato 1.59",
        sph_range: "-6.00 to +4.00",
        cyl_range: "-2.00",
        add_range: None,
        tags: &["Monofocal", "Polycarbonate"],
    },
    LensSeed {
        id: "l7",
        name: "Zeiss Trivex Active",
        brand: "Zeiss",
        price_cents: Some(61_000),
        material: "Trivex",
        sph_range: "-6.00 to +4.00",
        cyl_range: "-2.00",
        add_range: None,
        tags: &["Monofocal", "Polycarbonate", "Anti-reflective"],
    },
    LensSeed {
        id: "l8",
        name: "Hoya Hilux 1.74",
        brand: "Hoya",
        price_cents: None,
        material: "Resina 1.74",
        sph_range: "-14.00 to +10.00",
        cyl_range: "-6.00",
        add_range: None,
        tags: &["Monofocal", "Blue-light filter", "High index"],
    },
    LensSeed {
        id: "l9",
        name: "Varilux Comfort Max",
        brand: "Essilor",
        price_cents: Some(149_000),
        material: "Resina 1.60",
        sph_range: "-8.00 to +6.00",
        cyl_range: "-4.00",
        add_range: Some("+0.75 to +3.50"),
        tags: &["Progressive", "Varilux"],
    },
    LensSeed {
        id: "l10",
        name: "Varilux XR Series",
        brand: "Essilor",
        price_cents: None,
        material: "Resina 1.67",
        sph_range: "-10.00 to +8.00",
        cyl_range: "-4.00",
        add_range: Some("+0.75 to +3.50"),
        tags: &["Progressive", "Varilux", "Premium digital"],
    },
    LensSeed {
        id: "l11",
        name: "Zeiss Progressive SmartLife",
        brand: "Zeiss",
        price_cents: Some(189_000),
        material: "Resina 1.67",
        sph_range: "-10.00 to +8.00",
        cyl_range: "-4.00",
        add_range: Some("+0.75 to +3.00"),
        tags: &["Progressive", "Anti-reflective"],
    },
    LensSeed {
        id: "l12",
        name: "Kodak Unique DRO",
        brand: "Kodak",
        price_cents: Some(98_000),
        material: "Resina 1.56",
        sph_range: "-6.00 to +4.00",
        cyl_range: "-2.00",
        add_range: Some("+1.00 to +3.00"),
        tags: &["Progressive"],
    },
];

const ACCESSORY_SEEDS: &[AccessorySeed] = &[
    AccessorySeed {
        id: "a1",
        name: "Hard Shell Case",
        brand: "Ray-Ban",
        price_cents: 9_900,
        tags: &["Case"],
    },
    AccessorySeed {
        id: "a2",
        name: "Lens Cleaning Kit",
        brand: "Zeiss",
        price_cents: 4_900,
        tags: &["Cleaning"],
    },
    AccessorySeed {
        id: "a3",
        name: "Sport Strap",
        brand: "Oakley",
        price_cents: 7_500,
        tags: &["Strap", "Sport"],
    },
];

/// The full demo catalog: frames, then lenses, then accessories.
pub fn demo_products() -> Vec<Product> {
    let frames = FRAME_SEEDS.iter().map(|seed| {
        let mut product = Product::new(
            seed.id,
            seed.name,
            Category::Frame,
            seed.brand,
            Price::Amount(Decimal::new(seed.price_cents, 2)),
        )
        .with_gender(seed.gender)
        .with_frame_color(seed.frame_color)
        .with_material(seed.material)
        .with_tags(seed.tags.iter().copied());
        product.original_price = seed.original_price_cents.map(|cents| Decimal::new(cents, 2));
        product.measurements = Some(seed.measurements.to_owned());
        product
    });

    let lenses = LENS_SEEDS.iter().map(|seed| {
        let price = seed
            .price_cents
            .map(|cents| Price::Amount(Decimal::new(cents, 2)))
            .unwrap_or(Price::OnRequest);
        let mut product = Product::new(seed.id, seed.name, Category::Lens, seed.brand, price)
            .with_material(seed.material)
            .with_tags(seed.tags.iter().copied());
        product.sph_range = Some(seed.sph_range.to_owned());
        product.cyl_range = Some(seed.cyl_range.to_owned());
        product.add_range = seed.add_range.map(str::to_owned);
        product
    });

    let accessories = ACCESSORY_SEEDS.iter().map(|seed| {
        Product::new(
            seed.id,
            seed.name,
            Category::Accessory,
            seed.brand,
            Price::Amount(Decimal::new(seed.price_cents, 2)),
        )
        .with_tags(seed.tags.iter().copied())
    });

    frames.chain(lenses).chain(accessories).collect()
}

/// Validates the demo products like any seed file. An error here is a bug in
/// the seed tables above.
pub fn demo_catalog() -> Result<CatalogStore, DomainError> {
    CatalogStore::new(demo_products())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{demo_catalog, demo_products};
    use crate::domain::anamnesis::{AnamnesisAnswers, DegreeBand, Lifestyle, Purpose};
    use crate::domain::product::Category;
    use crate::facets::{filter_products, CategoryScope, SelectedFilters};
    use crate::recommendation::recommend_lenses;

    #[test]
    fn demo_ids_are_unique() {
        let products = demo_products();
        let ids: HashSet<_> = products.iter().map(|product| product.id.clone()).collect();
        assert_eq!(ids.len(), products.len());
        assert_eq!(demo_catalog().expect("demo catalog is valid").len(), products.len());
    }

    #[test]
    fn demo_catalog_covers_every_category() {
        let catalog = demo_catalog().expect("demo catalog is valid");
        for category in Category::ALL {
            let found = filter_products(
                catalog.products(),
                CategoryScope::Only(category),
                "",
                &SelectedFilters::new(),
            );
            assert!(!found.is_empty(), "{category:?} should have demo products");
        }
    }

    #[test]
    fn demo_active_high_shortlist_prefers_higher_index() {
        let lenses = demo_catalog().expect("demo catalog is valid").lenses();
        let answers =
            AnamnesisAnswers::complete(Purpose::Distance, Lifestyle::Active, DegreeBand::High);

        let ids: Vec<&str> =
            recommend_lenses(&lenses, &answers).iter().map(|lens| lens.id.as_str()).collect();

        // l6 is "Policarbonato 1.59"; l7 ("Trivex") ranks with the 1.49 default.
        assert_eq!(ids, vec!["l6", "l7"]);
    }
}
