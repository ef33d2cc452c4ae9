//! Tests for dashboard aggregations

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_claims::{CrClaimRequest, IfrClaim, IfrClaimRequest, ReviewDecision};
use domain_plantation::{PitRecord, PitRecordRequest, SurvivalYear};
use forest_engine::{
    claim_status_counts, farmer_progress, overview_summary, village_summary, ClaimLifecycleEngine,
    PortfolioSnapshot,
};

fn engine() -> ClaimLifecycleEngine {
    ClaimLifecycleEngine::default()
}

fn ifr(farmer: &str, village: &str) -> IfrClaim {
    engine()
        .submit_ifr_claim(IfrClaimRequest {
            farmer_id: farmer.to_string(),
            farmer_name: format!("Farmer {}", farmer),
            village: village.to_string(),
            hectares: dec!(1.5),
            latitude: 17.5,
            longitude: 80.6,
            documents: vec!["land_certificate.pdf".to_string()],
        })
        .unwrap()
}

fn record(farmer: &str, village: &str, pits: u32, saplings: u32) -> PitRecord {
    engine()
        .submit_pit_record(PitRecordRequest {
            farmer_id: farmer.to_string(),
            farmer_name: format!("Farmer {}", farmer),
            village: village.to_string(),
            latitude: 17.5,
            longitude: 80.6,
            pit_count: pits,
            sapling_count: saplings,
            photos: vec!["pits.jpg".to_string()],
        })
        .unwrap()
}

fn checked(record: &PitRecord, year: SurvivalYear, rate: Decimal) -> PitRecord {
    engine()
        .record_survival_check(record, year, rate, vec!["check.jpg".to_string()])
        .unwrap()
}

fn completed(farmer: &str, village: &str, pits: u32, y1: Decimal, y2: Decimal) -> PitRecord {
    let r = record(farmer, village, pits, pits);
    let r = checked(&r, SurvivalYear::First, y1);
    checked(&r, SurvivalYear::Second, y2)
}

mod summaries {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = PortfolioSnapshot::default();
        let overview = overview_summary(&snapshot, Currency::INR);

        assert!(snapshot.is_empty());
        assert!(!PortfolioSnapshot::new(vec![ifr("f1", "Khammam")], vec![], vec![]).is_empty());
        assert!(village_summary(&snapshot).is_empty());
        assert_eq!(overview.villages, 0);
        assert_eq!(overview.farmers, 0);
        assert_eq!(overview.pits, 0);
        assert_eq!(overview.claim_status.total(), 0);
        assert!(overview.survival_rate.is_none());
        assert!(overview.incentives_paid.is_zero());
        assert!(overview.average_incentive_per_farmer.is_none());
    }

    #[test]
    fn test_village_rows() {
        let y1 = record("f1", "Khammam", 25, 23);
        let y1 = checked(&y1, SurvivalYear::First, dec!(92));
        let snapshot = PortfolioSnapshot::new(
            vec![ifr("f1", "Khammam"), ifr("f2", "Khammam"), ifr("f3", "Yellandu")],
            vec![],
            vec![y1, record("f4", "Khammam", 15, 15), record("f3", "Yellandu", 10, 9)],
        );

        let rows = village_summary(&snapshot);
        assert_eq!(rows.len(), 2);

        let khammam = &rows[0];
        assert_eq!(khammam.village, "Khammam");
        assert_eq!(khammam.farmers, 3);
        assert_eq!(khammam.claims, 2);
        assert_eq!(khammam.pits, 40);
        assert_eq!(khammam.saplings, 38);
        assert_eq!(khammam.survival_rate, Some(dec!(92)));

        let yellandu = &rows[1];
        assert_eq!(yellandu.farmers, 1);
        assert_eq!(yellandu.claims, 1);
        assert!(yellandu.survival_rate.is_none());
    }

    #[test]
    fn test_paid_incentives_only_count_completed_records() {
        let done = completed("f1", "Manuguru", 25, dec!(96), dec!(92));
        let active = checked(&record("f2", "Manuguru", 40, 40), SurvivalYear::First, dec!(90));
        let snapshot = PortfolioSnapshot::new(vec![], vec![], vec![done, active]);

        let overview = overview_summary(&snapshot, Currency::INR);
        // 25 × 0.92 × 20
        assert_eq!(overview.incentives_paid, Money::from_units(460, Currency::INR));
        // 460 + 40 × 0.90 × 20
        assert_eq!(overview.incentives_accrued, Money::from_units(1180, Currency::INR));
        assert_eq!(overview.completed_records, 1);
        assert_eq!(overview.survival_rate, Some(dec!(91)));
        assert_eq!(
            overview.average_incentive_per_farmer,
            Some(Money::from_units(230, Currency::INR))
        );
    }

    #[test]
    fn test_claim_counts_span_both_kinds() {
        let e = engine();
        let approved = e
            .review_claim(&ifr("f1", "Khammam"), &ReviewDecision::Approve, "Guard")
            .unwrap();
        let cr = e
            .submit_cr_claim(CrClaimRequest {
                farmer_id: "f2".to_string(),
                farmer_name: "Farmer f2".to_string(),
                village: "Kothagudem".to_string(),
                documents: vec!["resolution.pdf".to_string()],
                shapefile: None,
            })
            .unwrap();
        let rejected = e
            .review_claim(&cr, &ReviewDecision::reject("Boundary unclear"), "Guard")
            .unwrap();

        let snapshot = PortfolioSnapshot::new(vec![approved, ifr("f3", "Khammam")], vec![rejected], vec![]);
        let counts = claim_status_counts(&snapshot);
        assert_eq!((counts.pending, counts.approved, counts.rejected), (1, 1, 1));
        assert_eq!(overview_summary(&snapshot, Currency::INR).claim_status, counts);
    }

    #[test]
    fn test_farmer_progress() {
        let records = vec![
            completed("f1", "Bhadrachalam", 20, dec!(95), dec!(90)),
            record("f1", "Bhadrachalam", 10, 8),
            record("f2", "Bhadrachalam", 50, 50),
        ];
        let progress = farmer_progress(&records, "f1", Currency::INR);

        assert_eq!(progress.records, 2);
        assert_eq!(progress.completed_records, 1);
        assert_eq!(progress.pits, 30);
        assert_eq!(progress.saplings, 28);
        assert_eq!(progress.survival_rate, Some(dec!(90)));
        // 360 + 200
        assert_eq!(progress.incentive.amount(), dec!(560));

        let nobody = farmer_progress(&records, "f9", Currency::INR);
        assert_eq!(nobody.records, 0);
        assert!(nobody.incentive.is_zero());
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    const VILLAGES: [&str; 3] = ["Khammam", "Yellandu", "Manuguru"];

    #[derive(Debug, Clone)]
    struct RecordShape {
        village: usize,
        farmer: u8,
        pits: u32,
        rate: Option<u32>,
    }

    fn record_shape() -> impl Strategy<Value = RecordShape> {
        (0..VILLAGES.len(), 0u8..5, 0u32..60, proptest::option::of(0u32..=100))
            .prop_map(|(village, farmer, pits, rate)| RecordShape { village, farmer, pits, rate })
    }

    fn build(shape: &RecordShape) -> PitRecord {
        let r = record(&format!("f{}", shape.farmer), VILLAGES[shape.village], shape.pits, shape.pits);
        match shape.rate {
            Some(rate) => checked(&r, SurvivalYear::First, Decimal::from(rate)),
            None => r,
        }
    }

    proptest! {
        #[test]
        fn aggregations_ignore_input_order(
            (shapes, order) in prop::collection::vec(record_shape(), 0..12).prop_flat_map(|shapes| {
                let n = shapes.len();
                (Just(shapes), Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
            })
        ) {
            let records: Vec<PitRecord> = shapes.iter().map(build).collect();
            let shuffled: Vec<PitRecord> = order.iter().map(|&i| records[i].clone()).collect();

            let a = PortfolioSnapshot::new(vec![], vec![], records);
            let b = PortfolioSnapshot::new(vec![], vec![], shuffled);

            prop_assert_eq!(village_summary(&a), village_summary(&b));
            prop_assert_eq!(
                overview_summary(&a, Currency::INR),
                overview_summary(&b, Currency::INR)
            );
        }

        #[test]
        fn village_totals_add_up(shapes in prop::collection::vec(record_shape(), 0..12)) {
            let records: Vec<PitRecord> = shapes.iter().map(build).collect();
            let snapshot = PortfolioSnapshot::new(vec![], vec![], records);

            let rows = village_summary(&snapshot);
            let overview = overview_summary(&snapshot, Currency::INR);
            prop_assert_eq!(rows.iter().map(|r| r.pits).sum::<u64>(), overview.pits);
            prop_assert_eq!(rows.len(), overview.villages);
            for row in &rows {
                if let Some(rate) = row.survival_rate {
                    prop_assert!(rate >= Decimal::ZERO && rate <= dec!(100));
                }
            }
        }
    }
}
