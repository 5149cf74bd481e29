//! Benchmarks for the IoC container

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ioc_container::prelude::*;
use std::hint::black_box;

#[allow(dead_code)]
#[derive(Default)]
struct Settings {
    url: String,
}

impl Lifecycle for Settings {}
impl Managed for Settings {}
impl Component for Settings {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::from_default()]
    }
}

#[allow(dead_code)]
struct Pool {
    settings: Arc<Settings>,
}

impl Lifecycle for Pool {}
impl Managed for Pool {}
impl Component for Pool {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::builder()
            .param::<Settings>("settings")
            .build(|args| Ok(Pool { settings: args.next()? }))]
    }
}

#[allow(dead_code)]
struct Service {
    pool: Arc<Pool>,
    settings: Arc<Settings>,
}

impl Lifecycle for Service {}
impl Managed for Service {}
impl Component for Service {
    fn constructors() -> Vec<Constructor<Self>> {
        vec![Constructor::builder()
            .param::<Pool>("pool")
            .param::<Settings>("settings")
            .build(|args| {
                Ok(Service {
                    pool: args.next()?,
                    settings: args.next()?,
                })
            })]
    }
}

trait Store: Send + Sync {
    fn id(&self) -> usize;
}

struct Shard(usize);

impl Store for Shard {
    fn id(&self) -> usize {
        self.0
    }
}

impl Lifecycle for Shard {}
impl Managed for Shard {
    fn expose(views: &mut Views<Self>) {
        views.expose::<dyn Store>(|shard| shard);
    }
}

/// A container holding `n` shards plus the settings/pool/service chain
fn populated(n: usize) -> Container {
    let mut container = Container::builder().capacity(n + 3).build();
    for i in 0..n {
        container.register_instance(format!("shard{}", i), Shard(i));
    }
    container.register::<Settings>().unwrap();
    container.register::<Pool>().unwrap();
    container.register::<Service>().unwrap();
    container
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    group.bench_function("instance", |b| {
        b.iter(|| {
            let mut container = Container::new();
            container.register_instance("settings", Settings::default());
            black_box(container)
        })
    });

    group.bench_function("component_no_args", |b| {
        b.iter(|| {
            let mut container = Container::new();
            container.register::<Settings>().unwrap();
            black_box(container)
        })
    });

    group.bench_function("component_chain_3", |b| {
        b.iter(|| {
            let mut container = Container::new();
            container.register::<Settings>().unwrap();
            container.register::<Pool>().unwrap();
            container.register::<Service>().unwrap();
            black_box(container)
        })
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(1));

    // The by-type scan is linear in the number of entries
    for size in [0usize, 16, 128] {
        let container = populated(size);

        group.bench_with_input(BenchmarkId::new("by_type", size), &container, |b, c| {
            b.iter(|| black_box(c.lookup::<Service>().unwrap()))
        });

        if size > 1 {
            let last = format!("shard{}", size - 1);
            group.bench_with_input(BenchmarkId::new("by_name_dyn", size), &container, |b, c| {
                b.iter(|| black_box(c.lookup_named::<dyn Store>(&last).unwrap().id()))
            });
        }

        group.bench_with_input(BenchmarkId::new("miss", size), &container, |b, c| {
            b.iter(|| black_box(c.try_lookup::<String>()))
        });
    }

    group.finish();
}

fn bench_stop(c: &mut Criterion) {
    let mut group = c.benchmark_group("stop");

    for size in [16usize, 128] {
        group.throughput(Throughput::Elements(size as u64 + 3));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter_with_setup(
                || populated(size),
                |mut container| {
                    container.stop_to(&mut std::io::sink());
                    black_box(container)
                },
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registration, bench_lookup, bench_stop);
criterion_main!(benches);
