//! Benchmarks for ranking and method selection.

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use estimated_shipping::application::services::{MethodCache, MethodSelector, RankingPolicy};
use estimated_shipping::domain::entities::{CandidateMethod, Cart, LineItem};
use estimated_shipping::domain::services::{NeverFreeShipping, WeightAggregator};
use estimated_shipping::domain::value_objects::{
    CartId, CountryId, ItemId, Price, Quantity, StoreId, Weight,
};
use estimated_shipping::infrastructure::carriers::{
    RecordingMethodManagement, StaticQuoteProvider,
};
use std::hint::black_box;
use std::sync::Arc;

fn rates(count: u32) -> Vec<CandidateMethod> {
    (0..count)
        .map(|i| {
            let cents = 500 + (i * 7919) % 5000;
            CandidateMethod::new(format!("c{}", i % 5), format!("m{i}"), Price::from_cents(cents))
        })
        .collect()
}

fn cart(items: u64) -> Cart {
    let mut cart = Cart::new(Some(CartId::new(1)), StoreId::default());
    for i in 0..items {
        cart.add_item(LineItem::new(
            ItemId::new(i + 1),
            Quantity::from_units(2),
            Weight::from_units(3),
        ));
    }
    cart
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    for count in [2u32, 10, 50] {
        let methods = rates(count);
        for policy in [RankingPolicy::Lowest, RankingPolicy::Highest] {
            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), count),
                &methods,
                |b, methods| b.iter(|| policy.best(black_box(methods), None)),
            );
        }
    }
    group.finish();
}

fn bench_select_and_apply(c: &mut Criterion) {
    let country = CountryId::new("US").unwrap();
    let selector = MethodSelector::new(
        Arc::new(StaticQuoteProvider::new(rates(20))),
        Arc::new(RecordingMethodManagement::new()),
        country,
    );
    let template = cart(10);

    c.bench_function("select_and_apply_20_rates", |b| {
        b.iter(|| {
            let mut cart = template.clone();
            let mut cache = MethodCache::new();
            selector.select_and_apply(black_box(&mut cart), RankingPolicy::Lowest, &mut cache)
        })
    });
}

fn bench_weight_collection(c: &mut Criterion) {
    let aggregator = WeightAggregator::new();
    let template = cart(100);

    c.bench_function("collect_weights_100_items", |b| {
        b.iter(|| {
            let mut cart = template.clone();
            let (address, items) = cart.address_and_items_mut();
            aggregator.collect(address, items, &NeverFreeShipping)
        })
    });
}

criterion_group!(
    benches,
    bench_ranking,
    bench_select_and_apply,
    bench_weight_collection
);
criterion_main!(benches);
