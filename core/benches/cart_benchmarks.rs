use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use storefront_cart::{Cart, CartStore, CartStoreOptions, MemoryStore, ProductSnapshot};
use tokio::runtime::Runtime;

fn product(id: u64) -> ProductSnapshot {
  ProductSnapshot::new(id, format!("Bench product {}", id), 125_000, "", 100).unwrap()
}

fn filled_cart(line_items: u64) -> Cart {
  let mut cart = Cart::new();
  for id in 0..line_items {
    cart.add(product(id), 2);
  }
  cart
}

fn bench_aggregates(c: &mut Criterion) {
  let mut group = c.benchmark_group("cart_aggregates");
  for size in [10u64, 100, 1_000] {
    let cart = filled_cart(size);
    group.throughput(Throughput::Elements(size));
    group.bench_with_input(BenchmarkId::new("total", size), &cart, |b, cart| {
      b.iter(|| black_box(cart.total()))
    });
    group.bench_with_input(BenchmarkId::new("item_count", size), &cart, |b, cart| {
      b.iter(|| black_box(cart.item_count()))
    });
  }
  group.finish();
}

fn bench_store_mutations(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let store = rt.block_on(CartStore::open(MemoryStore::new(), CartStoreOptions::default()));
  // Enter the runtime so the writer task keeps draining while we mutate.
  let _guard = rt.enter();

  let mut group = c.benchmark_group("cart_store");
  for size in [10u64, 100] {
    group.throughput(Throughput::Elements(size));
    group.bench_with_input(BenchmarkId::new("add_then_clear", size), &size, |b, &size| {
      b.iter(|| {
        for id in 0..size {
          store.add_to_cart(product(id), 1);
        }
        store.clear_cart();
      })
    });
  }
  group.finish();
  rt.block_on(store.flush());
}

criterion_group!(benches, bench_aggregates, bench_store_mutations);
criterion_main!(benches);
