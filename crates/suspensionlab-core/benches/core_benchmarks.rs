use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use suspensionlab_core::codec;
use suspensionlab_core::schema::{
    BikeConfiguration, CaptureSetup, Config, FrameGeometry, HardwareConfig, PressureUnit,
    SuspensionSetup, TireSetup, WheelsConfig,
};
use suspensionlab_core::validation::Validator;

fn sample_setups() -> Vec<(&'static str, CaptureSetup)> {
    let fork = SuspensionSetup::air("RockShox Zeb", 170, 95)
        .with_sag(28)
        .with_damping(5, 9, 11)
        .with_tokens(3);
    let shock = SuspensionSetup::coil("EXT Storia", 170)
        .with_sag(30)
        .with_damping(6, 8, 10);

    [
        ("rigid", FrameGeometry::rigid()),
        ("hardtail", FrameGeometry::hardtail(fork.clone())),
        ("full_suspension", FrameGeometry::full_suspension(fork, shock)),
    ]
    .into_iter()
    .map(|(label, geometry)| {
        let bike = BikeConfiguration::new(
            geometry,
            WheelsConfig::new("We Are One Union", "carbon"),
            TireSetup::new("Assegai", "tubeless", 1.5, PressureUnit::Bar),
            TireSetup::new("DHR II", "tubeless", 1.7, PressureUnit::Bar),
            HardwareConfig::new(4, 2000),
        );
        (label, CaptureSetup::new(Config::new(4, 2000), bike))
    })
    .collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (label, setup) in sample_setups() {
        let bytes = codec::encode(&setup);
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", label), &setup, |b, s| {
            b.iter(|| codec::encode(black_box(s)));
        });

        group.bench_with_input(BenchmarkId::new("decode", label), &bytes, |b, data| {
            b.iter(|| codec::decode::<CaptureSetup>(black_box(data)).unwrap());
        });
    }

    group.finish();
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let validator = Validator::new();

    for (label, setup) in sample_setups() {
        group.bench_with_input(BenchmarkId::new("validate", label), &setup, |b, s| {
            b.iter(|| validator.validate_setup(black_box(s)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec, bench_validation);
criterion_main!(benches);
