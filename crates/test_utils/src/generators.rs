//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating submission requests and
//! review inputs that respect domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{IfrClaimRequest, ReviewDecision};
use domain_plantation::PitRecordRequest;

use crate::fixtures::{DocumentFixtures, VillageFixtures};

/// One of the demo villages
pub fn village_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(VillageFixtures::all().to_vec()).prop_map(str::to_string)
}

/// Farmer ids `farmer-0` .. `farmer-9`
pub fn farmer_id_strategy() -> impl Strategy<Value = String> {
    (0u8..10).prop_map(|n| format!("farmer-{}", n))
}

/// Positive hectares with two decimal places, 0.01 to 50.00
pub fn hectares_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=5000).prop_map(|n| Decimal::new(n, 2))
}

/// Survival percentage in [0, 100] with one decimal place
pub fn survival_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|n| Decimal::new(n, 1))
}

/// Coordinates inside WGS84 ranges
pub fn coordinates_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
}

/// `(pit_count, sapling_count)` with saplings never above pits
pub fn pit_counts_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..500).prop_flat_map(|pits| (Just(pits), 0..=pits))
}

/// Approvals and rejections with non-blank reasons
pub fn review_decision_strategy() -> impl Strategy<Value = ReviewDecision> {
    prop_oneof![
        Just(ReviewDecision::Approve),
        "[A-Za-z][A-Za-z ]{0,40}".prop_map(ReviewDecision::reject),
    ]
}

/// Valid IFR claim requests
pub fn ifr_request_strategy() -> impl Strategy<Value = IfrClaimRequest> {
    (
        farmer_id_strategy(),
        village_strategy(),
        hectares_strategy(),
        coordinates_strategy(),
    )
        .prop_map(|(farmer_id, village, hectares, (latitude, longitude))| IfrClaimRequest {
            farmer_name: format!("Farmer {}", farmer_id),
            farmer_id,
            village,
            hectares,
            latitude,
            longitude,
            documents: DocumentFixtures::land_documents(),
        })
}

/// Valid pit record requests
pub fn pit_request_strategy() -> impl Strategy<Value = PitRecordRequest> {
    (
        farmer_id_strategy(),
        village_strategy(),
        pit_counts_strategy(),
        coordinates_strategy(),
    )
        .prop_map(|(farmer_id, village, (pit_count, sapling_count), (latitude, longitude))| {
            PitRecordRequest {
                farmer_name: format!("Farmer {}", farmer_id),
                farmer_id,
                village,
                latitude,
                longitude,
                pit_count,
                sapling_count,
                photos: DocumentFixtures::pit_photos(),
            }
        })
}
