use std::collections::BTreeSet;

use crate::matching::{ListingId, PropertyListing, PropertyType};

const BILLION: u64 = 1_000_000_000;

struct SeedListing {
    id: &'static str,
    title: &'static str,
    location: &'static str,
    price: u64,
    area: f64,
    property_type: PropertyType,
    bedrooms: Option<u8>,
    features: &'static [&'static str],
}

const SEED: &[SeedListing] = &[
    SeedListing {
        id: "vgp-s2-1203",
        title: "Vinhomes Grand Park S2.12 - 2PN",
        location: "Quận 9, TP.HCM",
        price: 2_800_000_000,
        area: 69.0,
        property_type: PropertyType::Apartment,
        bedrooms: Some(2),
        features: &["Công viên 36ha", "Smart home"],
    },
    SeedListing {
        id: "vgp-s5-2108",
        title: "Vinhomes Grand Park S5.21 - 3PN",
        location: "Quận 9, TP.HCM",
        price: 4_600_000_000,
        area: 98.0,
        property_type: PropertyType::Apartment,
        bedrooms: Some(3),
        features: &["Công viên 36ha", "View sông"],
    },
    SeedListing {
        id: "aqua-sh-01",
        title: "Aqua City Shophouse River Park",
        location: "Đồng Nai",
        price: 8_500_000_000,
        area: 120.0,
        property_type: PropertyType::Shophouse,
        bedrooms: None,
        features: &["Mặt tiền kinh doanh", "Vay 0% 24 tháng"],
    },
    SeedListing {
        id: "stellars-bt-07",
        title: "The 9 Stellars Biệt thự 07",
        location: "TP. Thủ Đức",
        price: 18 * BILLION,
        area: 250.0,
        property_type: PropertyType::Villa,
        bedrooms: Some(5),
        features: &["Sân vườn", "Tặng nội thất"],
    },
    SeedListing {
        id: "gsw-a12",
        title: "Gem Sky World lô A12",
        location: "Long Thành, Đồng Nai",
        price: 2_500_000_000,
        area: 100.0,
        property_type: PropertyType::Land,
        bedrooms: None,
        features: &["Sổ đỏ", "Gần sân bay Long Thành"],
    },
    SeedListing {
        id: "mcp-b2101",
        title: "Masteri Centre Point B-2101",
        location: "Quận 9, TP.HCM",
        price: 4 * BILLION,
        area: 80.0,
        property_type: PropertyType::Apartment,
        bedrooms: Some(2),
        features: &["Full nội thất", "Miễn phí quản lý 3 năm"],
    },
    SeedListing {
        id: "mcp-c1805",
        title: "Masteri Centre Point C-1805",
        location: "Quận 9, TP.HCM",
        price: 6_200_000_000,
        area: 120.0,
        property_type: PropertyType::Apartment,
        bedrooms: Some(3),
        features: &["Full nội thất", "Căn góc"],
    },
    SeedListing {
        id: "lakeview-np-12",
        title: "Lakeview City Nhà phố 12",
        location: "TP. Thủ Đức",
        price: 12 * BILLION,
        area: 100.0,
        property_type: PropertyType::House,
        bedrooms: Some(4),
        features: &["Hồ cảnh quan", "Khu compound"],
    },
];

pub(crate) fn seed_listings() -> Vec<PropertyListing> {
    SEED.iter()
        .map(|seed| PropertyListing {
            id: ListingId::from(seed.id),
            title: seed.title.to_string(),
            price: seed.price,
            location: seed.location.to_string(),
            property_type: seed.property_type,
            area: seed.area,
            bedrooms: seed.bedrooms,
            features: seed
                .features
                .iter()
                .map(|feature| feature.to_string())
                .collect::<BTreeSet<_>>(),
        })
        .collect()
}
