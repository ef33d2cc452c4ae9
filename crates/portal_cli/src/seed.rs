//! Demo data
//!
//! Three farmers across three villages, a forest guard and the district
//! administrator. Everything is loaded through [`PortalService`] so the
//! activity ledger and role checks see the same traffic a live portal would.

use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::Actor;
use domain_claims::{ClaimRecord, CrClaimRequest, IfrClaimRequest, ReviewDecision};
use domain_plantation::{PitRecordRequest, SurvivalYear};
use forest_engine::{EngineError, PortalService};

/// The demo users
#[derive(Debug, Clone)]
pub struct DemoCast {
    pub ramesh: Actor,
    pub lakshmi: Actor,
    pub govind: Actor,
    pub guard: Actor,
    pub admin: Actor,
}

impl Default for DemoCast {
    fn default() -> Self {
        Self {
            ramesh: Actor::farmer("farmer-1", "Ramesh Kumar", "Khammam"),
            lakshmi: Actor::farmer("farmer-2", "Lakshmi Devi", "Yellandu"),
            govind: Actor::farmer("farmer-3", "Govind Rao", "Manuguru"),
            guard: Actor::guard("guard-1", "Forest Officer Sharma").with_village("Forest Division Office"),
            admin: Actor::admin("admin-1", "District Collector").with_village("Collectorate"),
        }
    }
}

impl DemoCast {
    pub fn farmers(&self) -> [&Actor; 3] {
        [&self.ramesh, &self.lakshmi, &self.govind]
    }
}

fn ifr(farmer: &Actor, hectares: rust_decimal::Decimal, at: (f64, f64), documents: &[&str]) -> IfrClaimRequest {
    IfrClaimRequest {
        farmer_id: farmer.id.clone(),
        farmer_name: farmer.name.clone(),
        village: farmer.village.clone().unwrap_or_default(),
        hectares,
        latitude: at.0,
        longitude: at.1,
        documents: documents.iter().map(|d| d.to_string()).collect(),
    }
}

fn pits(farmer: &Actor, pit_count: u32, sapling_count: u32, at: (f64, f64)) -> PitRecordRequest {
    PitRecordRequest {
        farmer_id: farmer.id.clone(),
        farmer_name: farmer.name.clone(),
        village: farmer.village.clone().unwrap_or_default(),
        latitude: at.0,
        longitude: at.1,
        pit_count,
        sapling_count,
        photos: vec!["pit_photo1.jpg".to_string(), "pit_photo2.jpg".to_string()],
    }
}

/// Loads the demo claims, reviews, pit records and survival checks
pub async fn seed_demo(service: &PortalService, cast: &DemoCast) -> Result<(), EngineError> {
    let DemoCast {
        ramesh,
        lakshmi,
        govind,
        guard,
        ..
    } = cast;

    let approved = service
        .submit_ifr_claim(
            ramesh,
            ifr(ramesh, dec!(2.5), (17.2403, 81.1299), &["patta_doc.pdf", "survey_settlement.pdf"]),
        )
        .await?;
    let overlapping = service
        .submit_ifr_claim(ramesh, ifr(ramesh, dec!(1.8), (17.2423, 81.1319), &["land_record.pdf"]))
        .await?;
    service
        .submit_ifr_claim(
            lakshmi,
            ifr(lakshmi, dec!(3.2), (17.2593, 81.1408), &["land_record.pdf", "survey_doc.pdf"]),
        )
        .await?;
    service
        .submit_ifr_claim(govind, ifr(govind, dec!(2.1), (17.2613, 81.1428), &["patta_copy.pdf"]))
        .await?;
    service
        .submit_cr_claim(
            ramesh,
            CrClaimRequest {
                farmer_id: ramesh.id.clone(),
                farmer_name: ramesh.name.clone(),
                village: "Khammam".to_string(),
                documents: vec!["gram_sabha_resolution.pdf".to_string()],
                shapefile: Some("khammam_community_forest.shp".to_string()),
            },
        )
        .await?;

    service
        .review_ifr_claim(guard, approved.id(), &ReviewDecision::Approve)
        .await?;
    service
        .review_ifr_claim(
            guard,
            overlapping.id(),
            &ReviewDecision::reject("Overlaps an approved claim"),
        )
        .await?;

    let checked = service
        .submit_pit_record(ramesh, pits(ramesh, 25, 23, (17.2493, 81.1308)))
        .await?;
    service
        .submit_pit_record(ramesh, pits(ramesh, 15, 15, (17.2513, 81.1328)))
        .await?;
    service
        .submit_pit_record(govind, pits(govind, 15, 14, (17.2633, 81.1448)))
        .await?;
    service
        .record_survival_check(
            guard,
            checked.id(),
            SurvivalYear::First,
            dec!(92),
            vec!["year1_survival.jpg".to_string()],
        )
        .await?;

    info!(farmers = cast.farmers().len(), "Demo data loaded");
    Ok(())
}
