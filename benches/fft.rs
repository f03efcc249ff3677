use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridfft::fft::{self, FftBackendKind, FftOps, PlanEffort};
use gridfft::ops::{self, Centering};
use gridfft::parallel::SerialComm;
use gridfft::{reduce, Complex, ComplexGrid, FftConfig, GridShape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(shape: GridShape) -> ComplexGrid {
    let comm = SerialComm::new();
    let mut rng = StdRng::seed_from_u64(0xF00D);
    let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();
    for z in g.local_mut() {
        *z = Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
    }
    g
}

fn bench_roundtrip(c: &mut Criterion) {
    let comm = SerialComm::new();
    let shape = GridShape::new(64, 64, 1).unwrap();
    let cfg = FftConfig { backend: FftBackendKind::Local, effort: PlanEffort::Patient };
    let mut g = random_grid(shape);
    fft::create_plan(&mut g, &cfg, &comm).unwrap();

    c.bench_function("fft_roundtrip_64x64", |b| {
        b.iter(|| {
            fft::execute(black_box(&mut g), FftOps::FORWARD | FftOps::INVERSE, &comm).unwrap();
        })
    });
    fft::destroy_plan(&mut g, &comm).unwrap();
}

fn bench_gaussian(c: &mut Criterion) {
    let comm = SerialComm::new();
    let shape = GridShape::new(128, 128, 1).unwrap();
    let mut g = ComplexGrid::zeroed(shape, &comm).unwrap();

    c.bench_function("load_gaussian_128x128", |b| {
        b.iter(|| {
            ops::load_gaussian(
                black_box(&mut g),
                12.0,
                12.0,
                0.0,
                false,
                Centering::Fft,
                &comm,
            );
        })
    });
}

fn bench_total_power(c: &mut Criterion) {
    let comm = SerialComm::new();
    let shape = GridShape::new(256, 256, 1).unwrap();
    let g = random_grid(shape);

    c.bench_function("total_power_256x256", |b| {
        b.iter(|| reduce::total_power_complex(black_box(&g), None, false, &comm).unwrap())
    });
}

criterion_group!(benches, bench_roundtrip, bench_gaussian, bench_total_power);
criterion_main!(benches);
