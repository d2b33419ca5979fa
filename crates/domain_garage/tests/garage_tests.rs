//! Tests for the garage service

use rust_decimal_macros::dec;

use core_kernel::{
    ClaimId, Currency, Identity, Journaled, Money, ProtocolError, RepairOrderId, RepairPort,
};
use domain_garage::{CompletionGuard, GarageEvent, GarageService};

struct Fixture {
    authority: Identity,
    handling: Identity,
    garage: GarageService,
}

async fn fixture(guard: CompletionGuard) -> Fixture {
    let authority = Identity::new();
    let handling = Identity::new();
    let garage = GarageService::new(Identity::new(), authority, guard);
    garage.connect_handling_service(authority, handling).await.unwrap();

    Fixture { authority, handling, garage }
}

fn cost(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

mod intake_tests {
    use super::*;

    #[tokio::test]
    async fn test_orders_are_numbered_from_one() {
        let f = fixture(CompletionGuard::Open).await;

        let first = f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();
        let second = f
            .garage
            .request_repair(f.handling, ClaimId::new(2).unwrap(), cost(dec!(300)))
            .await
            .unwrap();

        assert_eq!(first, RepairOrderId::FIRST);
        assert_eq!(second.get(), 2);

        let order = f.garage.order(first).await.unwrap();
        assert_eq!(order.claim_id, ClaimId::FIRST);
        assert_eq!(order.estimated_cost, cost(dec!(800)));
        assert!(!order.completed);
    }

    #[tokio::test]
    async fn test_only_handling_service_may_request() {
        let f = fixture(CompletionGuard::Open).await;

        for impostor in [f.authority, Identity::new()] {
            let result = f.garage.request_repair(impostor, ClaimId::FIRST, cost(dec!(800))).await;
            assert!(matches!(result, Err(ProtocolError::Unauthorized { .. })));
        }
        assert!(f.garage.events().await.is_empty());
    }

    #[tokio::test]
    async fn test_connect_requires_authority() {
        let f = fixture(CompletionGuard::Open).await;

        let result = f.garage.connect_handling_service(Identity::new(), Identity::new()).await;
        assert!(matches!(result, Err(ProtocolError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_orders_for_claim() {
        let f = fixture(CompletionGuard::Open).await;
        f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();
        f.garage
            .request_repair(f.handling, ClaimId::new(2).unwrap(), cost(dec!(300)))
            .await
            .unwrap();

        let orders = f.garage.orders_for_claim(ClaimId::FIRST).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].estimated_cost, cost(dec!(800)));
    }
}

mod completion_tests {
    use super::*;

    #[tokio::test]
    async fn test_open_guard_records_completing_identity() {
        let f = fixture(CompletionGuard::Open).await;
        let order_id = f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();
        let mechanic = Identity::new();

        f.garage.complete_repair(mechanic, order_id).await.unwrap();

        let order = f.garage.order(order_id).await.unwrap();
        assert!(order.completed);
        assert_eq!(order.completed_by, Some(mechanic));
        assert!(matches!(
            f.garage.events().await.last(),
            Some(GarageEvent::RepairCompleted { completed_by, .. }) if *completed_by == mechanic
        ));
    }

    #[tokio::test]
    async fn test_second_completion_emits_nothing() {
        let f = fixture(CompletionGuard::Open).await;
        let order_id = f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();

        f.garage.complete_repair(Identity::new(), order_id).await.unwrap();
        f.garage.complete_repair(Identity::new(), order_id).await.unwrap();

        let completions = f
            .garage
            .events()
            .await
            .iter()
            .filter(|event| event.event_type() == "RepairCompleted")
            .count();
        assert_eq!(completions, 1);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let f = fixture(CompletionGuard::Open).await;
        let missing = RepairOrderId::new(7).unwrap();

        let result = f.garage.complete_repair(Identity::new(), missing).await;
        assert_eq!(result, Err(ProtocolError::UnknownOrder(missing)));
    }

    #[tokio::test]
    async fn test_authority_guard() {
        let f = fixture(CompletionGuard::Authority).await;
        let order_id = f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();

        let stranger = f.garage.complete_repair(Identity::new(), order_id).await;
        assert!(matches!(stranger, Err(ProtocolError::Unauthorized { .. })));

        f.garage.complete_repair(f.authority, order_id).await.unwrap();
        assert!(f.garage.order(order_id).await.unwrap().completed);
    }

    #[tokio::test]
    async fn test_rollback_restores_counter() {
        let f = fixture(CompletionGuard::Open).await;
        let checkpoint = f.garage.checkpoint().await;

        f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();
        f.garage.rollback(checkpoint).await;

        assert!(f.garage.order(RepairOrderId::FIRST).await.is_none());
        let reissued = f.garage.request_repair(f.handling, ClaimId::FIRST, cost(dec!(800))).await.unwrap();
        assert_eq!(reissued, RepairOrderId::FIRST);
    }
}
