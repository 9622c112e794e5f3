//! Loading and view computation benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use salesview::{DatasetLoader, Pipeline, ReportConfig, ViewKind};

/// Generate a sales listing with realistic repetition.
fn generate_sales_data(rows: usize) -> String {
    let mut data = String::from(
        "Brands,Models,Mobile,Colors,Selling Price,Original Price,Discount,Rating\n",
    );

    let brands = ["Apple", "Samsung", "Xiaomi", "Oppo", "Vivo", "Nokia", "Realme"];
    let colors = ["Black", "Blue", "Gold", "White", "Silver", "Space Grey"];

    for row in 0..rows {
        let brand = brands[row % brands.len()];
        let model = format!("M{}", row % 23);
        let original = 10_000 + (row * 7919) % 90_000;
        let discount = (row * 31) % 5_000;
        data.push_str(&format!(
            "{},{},{} {} ({} GB),{},{},{},{},{:.1}\n",
            brand,
            model,
            brand,
            model,
            64 << (row % 3),
            colors[row % colors.len()],
            original - discount,
            original,
            discount,
            3.0 + (row % 20) as f64 / 10.0,
        ));
    }

    data
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for rows in [1_000, 10_000, 50_000] {
        let data = generate_sales_data(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &data, |b, data| {
            let loader = DatasetLoader::new();
            b.iter(|| loader.load_bytes(black_box(data.as_bytes())).unwrap());
        });
    }

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let data = generate_sales_data(50_000);
    let (table, _) = DatasetLoader::new().load_bytes(data.as_bytes()).unwrap();
    let pipeline = Pipeline::new(table, ReportConfig::default());

    let mut group = c.benchmark_group("views");
    for kind in ViewKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind.slug()), &kind, |b, &kind| {
            b.iter(|| pipeline.build(black_box(kind)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_views);
criterion_main!(benches);
