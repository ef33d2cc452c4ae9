//! Comprehensive tests for domain_claims

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use domain_claims::claim::{ClaimKind, ClaimRecord, ClaimState, ClaimStatus, CrClaim, IfrClaim};
use domain_claims::error::ClaimError;
use domain_claims::review::{is_review_of, review_claim, ReviewDecision};
use domain_claims::submission::{submit_cr_claim, submit_ifr_claim, CrClaimRequest, IfrClaimRequest};

fn ifr_request() -> IfrClaimRequest {
    IfrClaimRequest {
        farmer_id: "farmer-1".to_string(),
        farmer_name: "Ramesh Kumar".to_string(),
        village: "Khammam".to_string(),
        hectares: dec!(2.5),
        latitude: 17.2473,
        longitude: 80.1514,
        documents: vec!["land_survey.pdf".to_string(), "identity_proof.pdf".to_string()],
    }
}

fn cr_request() -> CrClaimRequest {
    CrClaimRequest {
        farmer_id: "committee-7".to_string(),
        farmer_name: "Village Committee".to_string(),
        village: "Manuguru".to_string(),
        documents: vec!["gram_sabha_resolution.pdf".to_string()],
        shapefile: Some("manuguru_boundary.shp".to_string()),
    }
}

fn pending_ifr() -> IfrClaim {
    submit_ifr_claim(ifr_request(), Utc::now()).expect("valid request")
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_ifr_submission_is_pending_with_no_review_fields() {
        let at = Utc::now();
        let claim = submit_ifr_claim(ifr_request(), at).unwrap();

        assert_eq!(claim.status(), ClaimStatus::Pending);
        assert_eq!(claim.state(), &ClaimState::Pending);
        assert!(claim.state().reviewed_by().is_none());
        assert!(claim.state().reviewed_at().is_none());
        assert!(claim.state().rejection_reason().is_none());
        assert_eq!(claim.submitted_at(), at);
        assert_eq!(claim.version(), 1);
        assert_eq!(claim.hectares(), dec!(2.5));
        assert_eq!(claim.village(), "Khammam");
        assert_eq!(claim.documents().len(), 2);
        assert!(claim.id().to_string().starts_with("CLM-"));
    }

    #[test]
    fn test_submissions_get_unique_ids() {
        let a = pending_ifr();
        let b = pending_ifr();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_negative_hectares_fails_validation() {
        let request = IfrClaimRequest { hectares: dec!(-1), ..ifr_request() };
        let err = submit_ifr_claim(request, Utc::now()).unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(err, ClaimError::Validation { ref field, .. } if field == "hectares"));
    }

    #[test]
    fn test_latitude_out_of_range_fails_validation() {
        let request = IfrClaimRequest { latitude: 91.0, ..ifr_request() };
        let err = submit_ifr_claim(request, Utc::now()).unwrap_err();
        assert!(matches!(err, ClaimError::Validation { ref field, .. } if field == "latitude"));
    }

    #[test]
    fn test_longitude_out_of_range_fails_validation() {
        let request = IfrClaimRequest { longitude: -180.01, ..ifr_request() };
        let err = submit_ifr_claim(request, Utc::now()).unwrap_err();
        assert!(matches!(err, ClaimError::Validation { ref field, .. } if field == "longitude"));
    }

    #[test]
    fn test_empty_documents_fails_validation() {
        let request = IfrClaimRequest { documents: vec![], ..ifr_request() };
        let err = submit_ifr_claim(request, Utc::now()).unwrap_err();
        assert!(matches!(err, ClaimError::Validation { ref field, .. } if field == "documents"));
    }

    #[test]
    fn test_cr_submission_with_shapefile() {
        let claim = submit_cr_claim(cr_request(), Utc::now()).unwrap();

        assert_eq!(claim.status(), ClaimStatus::Pending);
        assert_eq!(claim.shapefile(), Some("manuguru_boundary.shp"));
        assert_eq!(claim.farmer_name(), "Village Committee");
    }

    #[test]
    fn test_cr_submission_without_shapefile() {
        let request = CrClaimRequest { shapefile: None, ..cr_request() };
        let claim = submit_cr_claim(request, Utc::now()).unwrap();
        assert!(claim.shapefile().is_none());
    }

    #[test]
    fn test_cr_requires_documents() {
        let request = CrClaimRequest { documents: vec![], ..cr_request() };
        assert!(submit_cr_claim(request, Utc::now()).unwrap_err().is_validation());
    }

    #[test]
    fn test_claim_kinds() {
        assert_eq!(IfrClaim::KIND, ClaimKind::Ifr);
        assert_eq!(CrClaim::KIND, ClaimKind::Cr);
        assert_eq!(ClaimKind::Ifr.to_string(), "IFR");
    }
}

// ============================================================================
// Review Tests
// ============================================================================

mod review_tests {
    use super::*;

    #[test]
    fn test_approve_sets_reviewer_and_timestamp() {
        let claim = pending_ifr();
        let at = Utc::now() + Duration::hours(2);

        let approved = review_claim(&claim, &ReviewDecision::Approve, "Forest Guard - Yellandu", at).unwrap();

        assert_eq!(approved.status(), ClaimStatus::Approved);
        assert_eq!(approved.state().reviewed_by(), Some("Forest Guard - Yellandu"));
        assert_eq!(approved.state().reviewed_at(), Some(at));
        assert!(approved.state().rejection_reason().is_none());
        assert_eq!(approved.id(), claim.id());
        assert_eq!(approved.version(), claim.version() + 1);
    }

    #[test]
    fn test_review_does_not_touch_input() {
        let claim = pending_ifr();
        let _ = review_claim(&claim, &ReviewDecision::Approve, "Guard", Utc::now()).unwrap();
        assert_eq!(claim.status(), ClaimStatus::Pending);
    }

    #[test]
    fn test_reject_stores_exact_reason() {
        let claim = pending_ifr();
        let rejected = review_claim(
            &claim,
            &ReviewDecision::reject("Missing survey document"),
            "Forest Guard",
            Utc::now(),
        )
        .unwrap();

        assert_eq!(rejected.status(), ClaimStatus::Rejected);
        assert_eq!(rejected.state().rejection_reason(), Some("Missing survey document"));
        assert!(rejected.state().reviewed_by().is_some());
        assert!(rejected.state().reviewed_at().is_some());
    }

    #[test]
    fn test_reject_with_blank_reason_fails() {
        let claim = pending_ifr();
        let err = review_claim(&claim, &ReviewDecision::reject("   "), "Guard", Utc::now()).unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(err, ClaimError::Validation { ref field, .. } if field == "rejection_reason"));
    }

    #[test]
    fn test_blank_reviewer_fails() {
        let claim = pending_ifr();
        let err = review_claim(&claim, &ReviewDecision::Approve, "", Utc::now()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_second_review_is_invalid_transition() {
        let claim = pending_ifr();
        let approved = review_claim(&claim, &ReviewDecision::Approve, "Guard", Utc::now()).unwrap();

        let err = review_claim(&approved, &ReviewDecision::Approve, "Admin", Utc::now()).unwrap_err();
        assert_eq!(
            err,
            ClaimError::InvalidTransition {
                from: ClaimStatus::Approved,
                to: ClaimStatus::Approved,
            }
        );
    }

    #[test]
    fn test_rejected_claim_cannot_be_approved() {
        let claim = pending_ifr();
        let rejected = review_claim(&claim, &ReviewDecision::reject("Overlap"), "Guard", Utc::now()).unwrap();

        let err = review_claim(&rejected, &ReviewDecision::Approve, "Admin", Utc::now()).unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_terminal_check_precedes_reason_check() {
        let claim = pending_ifr();
        let approved = review_claim(&claim, &ReviewDecision::Approve, "Guard", Utc::now()).unwrap();

        let err = review_claim(&approved, &ReviewDecision::reject(""), "Guard", Utc::now()).unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[test]
    fn test_cr_claim_review() {
        let claim = submit_cr_claim(cr_request(), Utc::now()).unwrap();
        let approved = review_claim(&claim, &ReviewDecision::Approve, "District Admin", Utc::now()).unwrap();

        assert_eq!(approved.status(), ClaimStatus::Approved);
        assert_eq!(approved.shapefile(), claim.shapefile());
    }

    #[test]
    fn test_reviewed_claim_round_trips_through_json() {
        let claim = pending_ifr();
        let rejected = review_claim(&claim, &ReviewDecision::reject("Overlap"), "Guard", Utc::now()).unwrap();

        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["state"]["status"], "rejected");
        assert_eq!(json["state"]["rejection_reason"], "Overlap");
    }
}

// ============================================================================
// Stored Form Tests
// ============================================================================

mod stored_form_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reviewed_claim_deserializes_back() {
        let rejected = review_claim(&pending_ifr(), &ReviewDecision::reject("Overlap"), "Guard", Utc::now()).unwrap();
        let json = serde_json::to_value(&rejected).unwrap();

        let restored: IfrClaim = serde_json::from_value(json).unwrap();
        assert_eq!(restored, rejected);
    }

    #[test]
    fn test_rejection_without_reviewer_or_reason_refused() {
        let mut json = serde_json::to_value(pending_ifr()).unwrap();
        json["state"] = json!({
            "status": "rejected",
            "reviewed_by": "",
            "reviewed_at": Utc::now(),
            "rejection_reason": ""
        });
        json["version"] = json!(2);

        let err = serde_json::from_value::<IfrClaim>(json).unwrap_err();
        assert!(err.to_string().contains("reviewed_by"));
    }

    #[test]
    fn test_pending_claim_must_be_first_version() {
        let mut json = serde_json::to_value(submit_cr_claim(cr_request(), Utc::now()).unwrap()).unwrap();
        json["version"] = json!(5);
        assert!(serde_json::from_value::<CrClaim>(json).is_err());
    }

    #[test]
    fn test_non_positive_hectares_refused() {
        let mut json = serde_json::to_value(pending_ifr()).unwrap();
        json["hectares"] = json!("0");
        assert!(serde_json::from_value::<IfrClaim>(json).is_err());
    }

    #[test]
    fn test_review_output_follows_pending_claim() {
        let claim = pending_ifr();
        let approved = review_claim(&claim, &ReviewDecision::Approve, "Guard", Utc::now()).unwrap();

        assert!(is_review_of(&claim, &approved));
        assert!(!is_review_of(&approved, &approved));
        assert!(!is_review_of(&claim, &claim));
    }

    #[test]
    fn test_review_with_edited_fields_does_not_follow() {
        let claim = pending_ifr();
        let approved = review_claim(&claim, &ReviewDecision::Approve, "Guard", Utc::now()).unwrap();

        let mut json = serde_json::to_value(&approved).unwrap();
        json["hectares"] = json!("9.5");
        let enlarged: IfrClaim = serde_json::from_value(json).unwrap();
        assert!(!is_review_of(&claim, &enlarged));

        let other = review_claim(&pending_ifr(), &ReviewDecision::Approve, "Guard", Utc::now()).unwrap();
        assert!(!is_review_of(&claim, &other));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_reviewed_claim_is_terminal(
            approve in any::<bool>(),
            reason in "[A-Za-z ]{1,40}",
            second_approve in any::<bool>(),
        ) {
            prop_assume!(!reason.trim().is_empty());
            let claim = pending_ifr();
            let decision = ReviewDecision::from_form(approve, Some(reason.clone()));

            let reviewed = review_claim(&claim, &decision, "Guard", Utc::now()).unwrap();
            prop_assert!(reviewed.status().is_terminal());
            prop_assert!(reviewed.state().reviewed_by().is_some());

            let second = ReviewDecision::from_form(second_approve, Some(reason));
            let err = review_claim(&reviewed, &second, "Admin", Utc::now()).unwrap_err();
            prop_assert!(err.is_invalid_transition());
        }

        #[test]
        fn in_range_coordinates_are_accepted(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            hundredths in 1i64..1_000_000,
        ) {
            let request = IfrClaimRequest {
                latitude: lat,
                longitude: lon,
                hectares: rust_decimal::Decimal::new(hundredths, 2),
                ..ifr_request()
            };
            let claim = submit_ifr_claim(request, Utc::now()).unwrap();
            prop_assert_eq!(claim.location().latitude(), lat);
            prop_assert_eq!(claim.status(), ClaimStatus::Pending);
        }
    }
}
