//! Tests for the in-memory adapters

use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::{ClaimId, PitRecordId};
use domain_claims::{ClaimRecord, ClaimStatus, IfrClaim, ReviewDecision};
use domain_plantation::{PitRecord, PlantationStatus, SurvivalYear};
use forest_engine::{
    verify_chain, ActivityEvent, ActivityLog, ClaimLifecycleEngine, ClaimQuery, ClaimRepository,
    PitRecordQuery, PlantationRepository, GENESIS_HASH,
};
use infra_memory::table::VersionedTable;
use infra_memory::{InMemoryActivityLog, InMemoryClaimRepository, InMemoryPlantationRepository};
use test_utils::{
    ActorFixtures, CrClaimRequestBuilder, DocumentFixtures, IfrClaimRequestBuilder,
    PitRecordRequestBuilder, VillageFixtures,
};

mod claim_repository {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryClaimRepository::new();
        let claim = ClaimLifecycleEngine::default()
            .submit_ifr_claim(IfrClaimRequestBuilder::new().build())
            .unwrap();

        repo.insert_ifr(claim.clone()).await.unwrap();
        let stored = repo.get_ifr(claim.id()).await.unwrap();
        assert_eq!(stored, claim);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let repo = InMemoryClaimRepository::new();
        let claim = ClaimLifecycleEngine::default()
            .submit_cr_claim(CrClaimRequestBuilder::new().build())
            .unwrap();

        repo.insert_cr(claim.clone()).await.unwrap();
        let err = repo.insert_cr(claim).await.unwrap_err();
        assert!(matches!(err, core_kernel::PortError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_missing_claim_not_found() {
        let repo = InMemoryClaimRepository::new();
        assert!(repo.get_ifr(ClaimId::new_v7()).await.unwrap_err().is_not_found());
        assert!(repo.get_cr(ClaimId::new_v7()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_replace_requires_next_version() {
        let engine = ClaimLifecycleEngine::default();
        let repo = InMemoryClaimRepository::new();
        let claim = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().build()).unwrap();
        repo.insert_ifr(claim.clone()).await.unwrap();

        let approved = engine.review_claim(&claim, &ReviewDecision::Approve, "Guard").unwrap();
        let rejected = engine
            .review_claim(&claim, &ReviewDecision::reject("Incomplete survey"), "Guard")
            .unwrap();

        repo.replace_ifr(approved).await.unwrap();
        let err = repo.replace_ifr(rejected).await.unwrap_err();
        assert!(err.is_conflict());

        let stored = repo.get_ifr(claim.id()).await.unwrap();
        assert_eq!(stored.status(), ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_replace_of_unknown_claim_not_found() {
        let engine = ClaimLifecycleEngine::default();
        let repo = InMemoryClaimRepository::new();
        let claim = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().build()).unwrap();
        let approved = engine.review_claim(&claim, &ReviewDecision::Approve, "Guard").unwrap();

        assert!(repo.replace_ifr(approved).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_hand_edited_rejection_never_reaches_storage() {
        let engine = ClaimLifecycleEngine::default();
        let repo = InMemoryClaimRepository::new();
        let claim = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().build()).unwrap();
        repo.insert_ifr(claim.clone()).await.unwrap();

        let mut json = serde_json::to_value(&claim).unwrap();
        json["state"] = json!({
            "status": "rejected",
            "reviewed_by": "",
            "reviewed_at": chrono::Utc::now(),
            "rejection_reason": ""
        });
        json["version"] = json!(2);
        assert!(serde_json::from_value::<IfrClaim>(json).is_err());

        let stored = repo.get_ifr(claim.id()).await.unwrap();
        assert_eq!(stored.status(), ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_replacement_that_edits_more_than_the_review_refused() {
        let engine = ClaimLifecycleEngine::default();
        let repo = InMemoryClaimRepository::new();
        let claim = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().build()).unwrap();
        repo.insert_ifr(claim.clone()).await.unwrap();

        let approved = engine.review_claim(&claim, &ReviewDecision::Approve, "Guard").unwrap();
        let mut json = serde_json::to_value(&approved).unwrap();
        json["hectares"] = json!("40");
        json["village"] = json!(VillageFixtures::MANUGURU);
        let edited: IfrClaim = serde_json::from_value(json).unwrap();

        let err = repo.replace_ifr(edited).await.unwrap_err();
        assert!(err.is_invalid_replacement());
        assert!(!err.is_conflict());

        let stored = repo.get_ifr(claim.id()).await.unwrap();
        assert_eq!(stored, claim);
        repo.replace_ifr(approved).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_filters_and_orders() {
        let engine = ClaimLifecycleEngine::default();
        let farmer = ActorFixtures::farmer();
        let other = ActorFixtures::other_farmer();

        let first = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().for_farmer(&farmer).build()).unwrap();
        let second = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().for_farmer(&other).build()).unwrap();
        let third = engine.submit_ifr_claim(IfrClaimRequestBuilder::new().for_farmer(&farmer).build()).unwrap();

        let repo = InMemoryClaimRepository::with_claims(
            vec![third.clone(), first.clone(), second.clone()],
            vec![],
        )
        .await
        .unwrap();

        let all = repo.find_ifr(ClaimQuery::default()).await.unwrap();
        let ids: Vec<ClaimId> = all.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![first.id(), second.id(), third.id()]);

        let mine = repo.find_ifr(ClaimQuery::by_farmer(&farmer.id)).await.unwrap();
        assert_eq!(mine.len(), 2);

        let yellandu = repo.find_ifr(ClaimQuery::by_village(VillageFixtures::YELLANDU)).await.unwrap();
        assert_eq!(yellandu.len(), 1);
        assert_eq!(yellandu[0].id(), second.id());

        let approved = repo.find_ifr(ClaimQuery::by_status(ClaimStatus::Approved)).await.unwrap();
        assert!(approved.is_empty());
    }
}

mod plantation_repository {
    use super::*;

    #[tokio::test]
    async fn test_survival_update_round_trip() {
        let engine = ClaimLifecycleEngine::default();
        let repo = InMemoryPlantationRepository::new();
        let record = engine.submit_pit_record(PitRecordRequestBuilder::new().build()).unwrap();
        repo.insert(record.clone()).await.unwrap();

        let checked = engine
            .record_survival_check(&record, SurvivalYear::First, dec!(92), DocumentFixtures::survival_photos())
            .unwrap();
        repo.replace(checked).await.unwrap();

        let stored = repo.get(record.id()).await.unwrap();
        assert_eq!(stored.incentive().amount(), dec!(460));

        // stale write from the original value
        let stale = engine
            .record_survival_check(&record, SurvivalYear::First, dec!(50), DocumentFixtures::survival_photos())
            .unwrap();
        assert!(repo.replace(stale).await.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_replacement_with_edited_pit_count_refused() {
        let engine = ClaimLifecycleEngine::default();
        let repo = InMemoryPlantationRepository::new();
        let record = engine.submit_pit_record(PitRecordRequestBuilder::new().build()).unwrap();
        repo.insert(record.clone()).await.unwrap();

        let checked = engine
            .record_survival_check(&record, SurvivalYear::First, dec!(100), DocumentFixtures::survival_photos())
            .unwrap();
        let pits = checked.pit_count() * 10;
        let mut json = serde_json::to_value(&checked).unwrap();
        json["pit_count"] = json!(pits);
        json["incentive"]["amount"] = json!((checked.incentive().amount() * rust_decimal::Decimal::from(10)).to_string());
        let inflated: PitRecord = serde_json::from_value(json).unwrap();

        assert!(repo.replace(inflated).await.unwrap_err().is_invalid_replacement());
        assert_eq!(repo.get(record.id()).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_find_by_status() {
        let engine = ClaimLifecycleEngine::default();
        let record = engine.submit_pit_record(PitRecordRequestBuilder::new().build()).unwrap();
        let other = engine
            .submit_pit_record(PitRecordRequestBuilder::new().with_village(VillageFixtures::MANUGURU).build())
            .unwrap();
        let repo = InMemoryPlantationRepository::with_records(vec![record, other]).await.unwrap();

        let active = repo
            .find(PitRecordQuery {
                status: Some(PlantationStatus::Active),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 2);

        let manuguru = repo.find(PitRecordQuery::by_village(VillageFixtures::MANUGURU)).await.unwrap();
        assert_eq!(manuguru.len(), 1);
        assert!(repo.get(PitRecordId::new_v7()).await.unwrap_err().is_not_found());
    }
}

mod versioned_table {
    use super::*;

    #[tokio::test]
    async fn test_len_tracks_inserts_not_replacements() {
        let engine = ClaimLifecycleEngine::default();
        let table: VersionedTable<PitRecord> = VersionedTable::default();
        assert!(table.is_empty().await);

        let record = engine.submit_pit_record(PitRecordRequestBuilder::new().build()).unwrap();
        table.insert(record.clone()).await.unwrap();
        let checked = engine
            .record_survival_check(&record, SurvivalYear::First, dec!(80), DocumentFixtures::survival_photos())
            .unwrap();
        table.replace(checked).await.unwrap();

        assert_eq!(table.len().await, 1);
        assert!(!table.is_empty().await);
        assert_eq!(table.get(record.id()).await.unwrap().version(), 2);
    }
}

mod activity_log {
    use super::*;

    fn event(pits: u32) -> ActivityEvent {
        ActivityEvent::PitRecordSubmitted {
            record_id: PitRecordId::new_v7(),
            village: VillageFixtures::KHAMMAM.to_string(),
            pit_count: pits,
            sapling_count: pits,
        }
    }

    #[tokio::test]
    async fn test_entries_chain_from_genesis() {
        let log = InMemoryActivityLog::new();
        let farmer = ActorFixtures::farmer();

        let first = log.append(&farmer, event(10)).await.unwrap();
        let second = log.append(&farmer, event(20)).await.unwrap();

        assert_eq!(first.prev_hash, GENESIS_HASH);
        assert_eq!(second.prev_hash, first.hash);
        assert_eq!(verify_chain(&log.entries().await.unwrap()), Ok(()));
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let log = InMemoryActivityLog::new();
        let farmer = ActorFixtures::farmer();
        for pits in 1..=5 {
            log.append(&farmer, event(pits)).await.unwrap();
        }

        let recent = log.recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].event, log.entries().await.unwrap()[4].event);
        assert!(recent[0].timestamp >= recent[2].timestamp);

        assert_eq!(log.recent(50).await.unwrap().len(), 5);
        assert!(InMemoryActivityLog::new().recent(3).await.unwrap().is_empty());
    }
}
