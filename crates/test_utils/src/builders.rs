//! Test Data Builders
//!
//! Provides builder patterns for submission requests with sensible defaults.
//! Tests set only the fields they care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Actor;
use domain_claims::{CrClaimRequest, IfrClaimRequest};
use domain_plantation::PitRecordRequest;

use crate::fixtures::{ActorFixtures, DocumentFixtures, VillageFixtures};

/// Builder for IFR claim requests
#[derive(Debug, Clone)]
pub struct IfrClaimRequestBuilder {
    request: IfrClaimRequest,
}

impl Default for IfrClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IfrClaimRequestBuilder {
    /// 2.5 hectares near Khammam, filed by the default farmer
    pub fn new() -> Self {
        let (latitude, longitude) = VillageFixtures::khammam_location();
        let farmer = ActorFixtures::farmer();
        Self {
            request: IfrClaimRequest {
                farmer_id: farmer.id,
                farmer_name: farmer.name,
                village: VillageFixtures::KHAMMAM.to_string(),
                hectares: dec!(2.5),
                latitude,
                longitude,
                documents: DocumentFixtures::land_documents(),
            },
        }
    }

    /// Fills farmer id, name and village from an actor
    pub fn for_farmer(mut self, actor: &Actor) -> Self {
        self.request.farmer_id = actor.id.clone();
        self.request.farmer_name = actor.name.clone();
        if let Some(village) = &actor.village {
            self.request.village = village.clone();
        }
        self
    }

    pub fn with_village(mut self, village: impl Into<String>) -> Self {
        self.request.village = village.into();
        self
    }

    pub fn with_hectares(mut self, hectares: Decimal) -> Self {
        self.request.hectares = hectares;
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.request.latitude = latitude;
        self.request.longitude = longitude;
        self
    }

    pub fn with_documents(mut self, documents: Vec<String>) -> Self {
        self.request.documents = documents;
        self
    }

    pub fn build(self) -> IfrClaimRequest {
        self.request
    }
}

/// Builder for CR claim requests
#[derive(Debug, Clone)]
pub struct CrClaimRequestBuilder {
    request: CrClaimRequest,
}

impl Default for CrClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CrClaimRequestBuilder {
    pub fn new() -> Self {
        let farmer = ActorFixtures::farmer();
        Self {
            request: CrClaimRequest {
                farmer_id: farmer.id,
                farmer_name: farmer.name,
                village: VillageFixtures::KHAMMAM.to_string(),
                documents: DocumentFixtures::community_documents(),
                shapefile: None,
            },
        }
    }

    pub fn for_farmer(mut self, actor: &Actor) -> Self {
        self.request.farmer_id = actor.id.clone();
        self.request.farmer_name = actor.name.clone();
        if let Some(village) = &actor.village {
            self.request.village = village.clone();
        }
        self
    }

    pub fn with_shapefile(mut self, shapefile: impl Into<String>) -> Self {
        self.request.shapefile = Some(shapefile.into());
        self
    }

    pub fn with_documents(mut self, documents: Vec<String>) -> Self {
        self.request.documents = documents;
        self
    }

    pub fn build(self) -> CrClaimRequest {
        self.request
    }
}

/// Builder for pit record requests; defaults to 25 pits / 23 saplings
#[derive(Debug, Clone)]
pub struct PitRecordRequestBuilder {
    request: PitRecordRequest,
}

impl Default for PitRecordRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PitRecordRequestBuilder {
    pub fn new() -> Self {
        let farmer = ActorFixtures::farmer();
        Self {
            request: PitRecordRequest {
                farmer_id: farmer.id,
                farmer_name: farmer.name,
                village: VillageFixtures::KHAMMAM.to_string(),
                latitude: 17.2493,
                longitude: 81.1308,
                pit_count: 25,
                sapling_count: 23,
                photos: DocumentFixtures::pit_photos(),
            },
        }
    }

    pub fn for_farmer(mut self, actor: &Actor) -> Self {
        self.request.farmer_id = actor.id.clone();
        self.request.farmer_name = actor.name.clone();
        if let Some(village) = &actor.village {
            self.request.village = village.clone();
        }
        self
    }

    pub fn with_village(mut self, village: impl Into<String>) -> Self {
        self.request.village = village.into();
        self
    }

    pub fn with_counts(mut self, pit_count: u32, sapling_count: u32) -> Self {
        self.request.pit_count = pit_count;
        self.request.sapling_count = sapling_count;
        self
    }

    pub fn with_photos(mut self, photos: Vec<String>) -> Self {
        self.request.photos = photos;
        self
    }

    pub fn build(self) -> PitRecordRequest {
        self.request
    }
}
