use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ride_rent_seo::query::{legacy_listing_redirect, merge_query_updates, QueryParamBag, QueryValue};

const LISTING_QUERY: &str =
    "category=cars&brand=bmw&brand=audi&sort=price&page=4&with_driver=true&price=100-500&color=black";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_listing_query", |b| {
        b.iter(|| QueryParamBag::parse(black_box(LISTING_QUERY)))
    });
}

fn bench_merge(c: &mut Criterion) {
    c.bench_function("merge_query_updates", |b| {
        b.iter(|| {
            merge_query_updates(
                black_box(LISTING_QUERY),
                [("page", None), ("brand", Some(QueryValue::from("toyota")))],
            )
        })
    });
}

fn bench_legacy_redirect(c: &mut Criterion) {
    c.bench_function("legacy_listing_redirect", |b| {
        b.iter(|| legacy_listing_redirect("ae", black_box("dubai"), black_box("category=cars&brand=bmw&sort=price")))
    });
}

criterion_group!(benches, bench_parse, bench_merge, bench_legacy_redirect);
criterion_main!(benches);
