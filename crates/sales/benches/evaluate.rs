use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use orderdesk_core::{CustomerId, PaymentMethodId, RecordId, ShipMethodId, TermsId, WorkOrderId};
use orderdesk_sales::{
    evaluate, AllocationStatus, EligibilityConfig, InMemorySearchPort, OrderLine, OrderSnapshot,
    OrderStatus, PageMode, ReleaseStatus, SavedSearch, ValidationStatus, WorkOrderSummary,
};

fn order_with_lines(lines: usize) -> OrderSnapshot {
    let mut order = OrderSnapshot::new(RecordId::new(1), "SO-1", CustomerId::new(15));
    order.status = OrderStatus::PendingFulfillment;
    order.validation_status = ValidationStatus::Passed;
    order.allocation_status = AllocationStatus::Full;
    order.release_status = ReleaseStatus::RollbackComplete;
    order.payment_method = Some(PaymentMethodId::new(4));
    order.payment_approved = true;
    order.terms = Some(TermsId::new(30));
    order.ship_method = Some(ShipMethodId::new(999));
    order.lines = (0..lines)
        .map(|i| {
            let mut line = OrderLine::new(2, 3);
            if i % 10 == 0 {
                line.work_order = Some(WorkOrderId::new(i as u64));
            }
            line
        })
        .collect();
    order
}

fn port_for(order: &OrderSnapshot) -> InMemorySearchPort {
    let mut port = InMemorySearchPort::new()
        .with_eligible(SavedSearch::OrdersOkToHold, order.id)
        .with_eligible(SavedSearch::OrdersOkToCancel, order.id)
        .with_card_method(PaymentMethodId::new(4));
    for id in order.lines.iter().filter_map(|l| l.work_order) {
        port = port.with_work_order(
            id,
            WorkOrderSummary {
                transaction_number: format!("WO-{id}"),
                status_code: "A".to_string(),
            },
        );
    }
    port
}

fn bench_evaluate(c: &mut Criterion) {
    let config = EligibilityConfig::default();
    let mut group = c.benchmark_group("evaluate");

    for lines in [1usize, 50, 500] {
        let order = order_with_lines(lines);
        let port = port_for(&order);
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &order, |b, order| {
            b.iter(|| evaluate(&config, &port, black_box(order), PageMode::View))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
