//! Tests for core_kernel error types

use core_kernel::{ClaimId, ClaimStatus, Identity, MoneyError, PolicyKind, ProtocolError, RepairOrderId};

#[test]
fn test_unauthorized_names_the_role() {
    let caller = Identity::new();
    let error = ProtocolError::Unauthorized {
        caller,
        required: "handling_service".to_string(),
    };

    assert!(error.is_unauthorized());
    let display = error.to_string();
    assert!(display.contains("handling_service"));
    assert!(display.contains(&caller.to_string()));
}

#[test]
fn test_not_found_kinds() {
    assert!(ProtocolError::UnknownClaim(ClaimId::FIRST).is_not_found());
    assert!(ProtocolError::UnknownOrder(RepairOrderId::FIRST).is_not_found());
    assert!(ProtocolError::UnknownCustomer(Identity::new()).is_not_found());
    assert!(!ProtocolError::NotConfigured("registry").is_not_found());
}

#[test]
fn test_policy_mismatch_display() {
    let error = ProtocolError::PolicyMismatch {
        registered: PolicyKind::AllRisk,
        submitted: PolicyKind::ThirdParty,
    };

    let display = format!("{}", error);
    assert!(display.contains("all_risk"));
    assert!(display.contains("third_party"));
}

#[test]
fn test_invalid_state_for_payment_display() {
    let error = ProtocolError::InvalidStateForPayment {
        claim_id: ClaimId::new(4).unwrap(),
        status: ClaimStatus::PaidToThirdParty,
    };

    assert_eq!(error.to_string(), "Claim CLM-4 cannot be paid in status PaidToThirdParty");
}

#[test]
fn test_transfer_failure_classification() {
    let error = ProtocolError::TransferFailed {
        claim_id: ClaimId::FIRST,
        reason: "recipient rejected funds".to_string(),
    };

    assert!(error.is_transfer_failure());
    assert!(!ProtocolError::validation("bad").is_transfer_failure());
}

#[test]
fn test_from_money_error() {
    let money_error = MoneyError::CurrencyMismatch("USD".to_string(), "EUR".to_string());
    let error: ProtocolError = money_error.into();

    assert!(matches!(error, ProtocolError::Money(_)));
}
