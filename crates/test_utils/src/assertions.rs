//! Custom Test Assertions
//!
//! Assertion helpers for protocol outcomes that print the full error when
//! they fail.

use core_kernel::{ClaimStatus, Money, ProtocolError};

/// Asserts that a payout was refused because of the claim's state
pub fn assert_invalid_state_for_payment<T: std::fmt::Debug>(result: &Result<T, ProtocolError>) {
    assert!(
        matches!(result, Err(ProtocolError::InvalidStateForPayment { .. })),
        "Expected InvalidStateForPayment, got {:?}",
        result
    );
}

/// Asserts that the caller was refused for lacking a role
pub fn assert_unauthorized<T: std::fmt::Debug>(result: &Result<T, ProtocolError>) {
    assert!(
        matches!(result, Err(ProtocolError::Unauthorized { .. })),
        "Expected Unauthorized, got {:?}",
        result
    );
}

/// Asserts that a claim sits in one of the paid statuses
pub fn assert_paid(status: ClaimStatus) {
    assert!(status.is_paid(), "Expected a paid status, got {}", status);
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, Identity};

    #[test]
    fn test_assertions_accept_matching_errors() {
        let refused: Result<(), ProtocolError> = Err(ProtocolError::InvalidStateForPayment {
            claim_id: ClaimId::FIRST,
            status: ClaimStatus::Rejected,
        });
        assert_invalid_state_for_payment(&refused);

        let denied: Result<(), ProtocolError> = Err(ProtocolError::Unauthorized {
            caller: Identity::new(),
            required: "authority".to_string(),
        });
        assert_unauthorized(&denied);

        assert_paid(ClaimStatus::PaidToGarage);
    }

    #[test]
    #[should_panic(expected = "Expected Unauthorized")]
    fn test_assert_unauthorized_rejects_success() {
        assert_unauthorized(&Ok::<(), ProtocolError>(()));
    }
}
