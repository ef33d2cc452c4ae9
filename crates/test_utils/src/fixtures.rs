//! Pre-built Test Fixtures
//!
//! Villages, people and file references taken from the portal's demo data,
//! so tests read like the dashboards they exercise.

use core_kernel::{Actor, Currency, Money};

/// Villages of the Bhadradri Kothagudem forest division
pub struct VillageFixtures;

impl VillageFixtures {
    pub const KHAMMAM: &'static str = "Khammam";
    pub const YELLANDU: &'static str = "Yellandu";
    pub const MANUGURU: &'static str = "Manuguru";
    pub const BHADRACHALAM: &'static str = "Bhadrachalam";
    pub const KOTHAGUDEM: &'static str = "Kothagudem";

    pub fn all() -> [&'static str; 5] {
        [
            Self::KHAMMAM,
            Self::YELLANDU,
            Self::MANUGURU,
            Self::BHADRACHALAM,
            Self::KOTHAGUDEM,
        ]
    }

    /// Demo coordinates near Khammam, Telangana
    pub fn khammam_location() -> (f64, f64) {
        (17.2473, 81.1288)
    }
}

/// Logged-in users
pub struct ActorFixtures;

impl ActorFixtures {
    pub fn farmer() -> Actor {
        Actor::farmer("farmer-1", "Ramesh Kumar", VillageFixtures::KHAMMAM)
    }

    pub fn other_farmer() -> Actor {
        Actor::farmer("farmer-2", "Lakshmi Devi", VillageFixtures::YELLANDU)
    }

    pub fn guard() -> Actor {
        Actor::guard("guard-1", "Forest Officer Sharma").with_village("Forest Division Office")
    }

    pub fn admin() -> Actor {
        Actor::admin("admin-1", "District Collector").with_village("Collectorate")
    }
}

/// Opaque document and photo references
pub struct DocumentFixtures;

impl DocumentFixtures {
    pub fn land_documents() -> Vec<String> {
        vec!["patta_doc.pdf".to_string(), "survey_settlement.pdf".to_string()]
    }

    pub fn community_documents() -> Vec<String> {
        vec!["gram_sabha_resolution.pdf".to_string()]
    }

    pub fn pit_photos() -> Vec<String> {
        vec!["pit_photo_1.jpg".to_string(), "pit_photo_2.jpg".to_string()]
    }

    pub fn survival_photos() -> Vec<String> {
        vec!["year1_survival.jpg".to_string()]
    }
}

pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn inr(units: i64) -> Money {
        Money::from_units(units, Currency::INR)
    }
}
