use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bandviz::dsp::{BandFilter, FrameAggregator, Signal};
use bandviz::timeline::FrameRange;

fn test_signal(seconds: usize) -> Signal {
    let sample_rate = 48_000.0;
    let samples = (0..48_000 * seconds)
        .map(|i| {
            let t = i as f64 / sample_rate;
            ((2.0 * std::f64::consts::PI * 110.0 * t).sin()
                + 0.5 * (2.0 * std::f64::consts::PI * 1_760.0 * t).sin()) as f32
        })
        .collect();
    Signal::new(samples, sample_rate)
}

fn bench_band_filter(c: &mut Criterion) {
    let signal = test_signal(4);
    let filter = BandFilter::Bandpass {
        low_hz: 250.0,
        high_hz: 2_000.0,
    };

    c.bench_function("bandpass_4s_48k", |b| {
        b.iter(|| filter.apply(black_box(&signal), 4).unwrap())
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let signal = test_signal(4);
    let aggregator = FrameAggregator::new(48_000.0 / 30.0).unwrap();
    let range = FrameRange::new(1, 120);

    c.bench_function("aggregate_4s_48k", |b| {
        b.iter(|| {
            aggregator
                .aggregate(black_box(&signal), &range, true)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_band_filter, bench_aggregate);
criterion_main!(benches);
