//! Benchmarks for datagram decode and dispatch

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use avosc_runtime::{Dispatcher, ParameterContext};
use avosc_state::ParameterRegistry;
use avosc_wire::{decode, Argument, Message};

fn context() -> Arc<ParameterContext> {
    Arc::new(ParameterContext::new(ParameterRegistry::avatar_defaults(), 0))
}

fn bench_decode(c: &mut Criterion) {
    let bytes = Message::new("/avatar/parameters/VelocityX")
        .with_argument(Argument::Float(1.25))
        .encode()
        .unwrap();

    c.bench_function("decode_message", |b| b.iter(|| decode(black_box(&bytes))));
}

fn bench_dispatch_built_in(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(context());
    let bytes = Message::new("/avatar/parameters/Viseme")
        .with_argument(Argument::Int(7))
        .encode()
        .unwrap();

    c.bench_function("dispatch_built_in", |b| {
        b.iter(|| black_box(dispatcher.handle_datagram(black_box(&bytes))))
    });
}

fn bench_dispatch_dynamic(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(context());
    let bytes = Message::new("/avatar/parameters/EarTwitch")
        .with_argument(Argument::Float(0.5))
        .encode()
        .unwrap();

    c.bench_function("dispatch_dynamic", |b| {
        b.iter(|| black_box(dispatcher.handle_datagram(black_box(&bytes))))
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_dispatch_built_in,
    bench_dispatch_dynamic
);
criterion_main!(benches);
