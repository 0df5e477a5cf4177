//! End-to-end scenarios against the async service facade
//!
//! These mirror the acceptance behavior observers depend on: rejected calls
//! leave every counter at rest, successful calls advance exactly the right
//! counters, and the notification stream carries the ordered triple per call.

use calc_core::{CalculatorService, Config, Counters, Error, Notification, Operation};

fn test_config() -> Config {
    Config {
        mailbox_capacity: 16,
        notification_buffer: 256,
        ..Config::default()
    }
}

#[tokio::test]
async fn divide_by_zero_on_fresh_service_changes_nothing() {
    let service = CalculatorService::open(test_config());

    let err = service.divide(5, 0).await.unwrap_err();
    assert!(matches!(err, Error::DivisionByZero));
    assert!(err.to_string().contains("divide by zero"));

    assert_eq!(service.snapshot().await.unwrap(), Counters::new());
    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn negative_subtraction_on_fresh_service_changes_nothing() {
    let service = CalculatorService::open(test_config());

    let err = service.subtract(3, 12).await.unwrap_err();
    assert!(matches!(
        err,
        Error::NegativeResult {
            minuend: 3,
            subtrahend: 12
        }
    ));

    assert_eq!(service.snapshot().await.unwrap(), Counters::new());
    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn addition_then_subtraction_tracks_counters() {
    let service = CalculatorService::open(test_config());

    let calculation = service.add(40, 91).await.unwrap();
    assert_eq!(calculation.result, 131);

    let snapshot = service.snapshot().await.unwrap();
    assert_eq!(snapshot.addition, 1);
    assert_eq!(snapshot.total(), 1);

    let calculation = service.subtract(20156, 621).await.unwrap();
    assert_eq!(calculation.result, 19535);

    let snapshot = service.snapshot().await.unwrap();
    assert_eq!(snapshot.subtraction, 1);
    assert_eq!(snapshot.total(), 2);
    assert!(snapshot.is_conserved());

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn multiplication_division_and_modulo_results() {
    let service = CalculatorService::open(test_config());

    assert_eq!(service.multiply(396, 908).await.unwrap().result, 359568);
    assert_eq!(service.divide(52921, 101).await.unwrap().result, 523);
    assert_eq!(service.modulo(52921, 101).await.unwrap().result, 98);

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn power_is_exponentiation_not_xor() {
    let service = CalculatorService::open(test_config());

    let calculation = service.raise_to_the_power(121, 4).await.unwrap();
    assert_eq!(calculation.result, 214358881);
    assert_ne!(calculation.result, 121 ^ 4);

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn notification_stream_carries_ordered_triples() {
    let service = CalculatorService::open(test_config());
    let mut stream = service.notifications().unwrap();

    // A rejected call first: it must leave no trace in the stream.
    service.divide(5, 0).await.unwrap_err();

    service.add(40, 91).await.unwrap();
    service.raise_to_the_power(2, 5).await.unwrap();

    let expected = [
        Notification::OperationTxnCount {
            operation: Operation::Add,
            count: 1,
        },
        Notification::TotalTxnCount { count: 1 },
        Notification::CalculationResult { value: 131 },
        Notification::OperationTxnCount {
            operation: Operation::Power,
            count: 1,
        },
        Notification::TotalTxnCount { count: 2 },
        Notification::CalculationResult { value: 32 },
    ];

    for want in expected {
        assert_eq!(stream.recv().await.unwrap(), want);
    }

    service.shutdown().await.unwrap();
    assert!(stream.recv().await.is_none());
}

#[tokio::test]
async fn full_session_counter_audit() {
    let service = CalculatorService::open(test_config());

    service.add(1, 2).await.unwrap();
    service.add(10, 20).await.unwrap();
    service.subtract(9, 4).await.unwrap();
    service.multiply(6, 7).await.unwrap();
    service.divide(100, 3).await.unwrap();
    service.modulo(100, 3).await.unwrap();
    service.raise_to_the_power(3, 3).await.unwrap();

    // A few invalid calls interleaved; none may move anything.
    service.divide(1, 0).await.unwrap_err();
    service.modulo(1, 0).await.unwrap_err();
    service.subtract(0, 1).await.unwrap_err();

    let snapshot = service.snapshot().await.unwrap();
    assert_eq!(snapshot.addition, 2);
    assert_eq!(snapshot.subtraction, 1);
    assert_eq!(snapshot.multiplication, 1);
    assert_eq!(snapshot.division, 1);
    assert_eq!(snapshot.modulo, 1);
    assert_eq!(snapshot.power, 1);
    assert_eq!(snapshot.total(), 7);
    assert!(snapshot.is_conserved());

    assert_eq!(service.total_calculation_count().await.unwrap(), 7);

    service.shutdown().await.unwrap();
}
