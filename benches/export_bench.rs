use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roster_core::{ColumnFilter, ColumnSet, Employee, FixedClock, Generator, Sort, ViewQuery};
use roster_sheet::{to_clipboard_text, SpreadsheetExport};

fn clock() -> FixedClock {
    FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

fn snapshot(count: i64) -> Vec<Employee> {
    Generator::seeded(42, clock()).generate(count).unwrap()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for size in [100_i64, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("employees", size), size, |b, &size| {
            b.iter(|| Generator::seeded(42, clock()).generate(black_box(size)))
        });
    }

    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    let rows = snapshot(10_000);
    let columns = ColumnSet::employee_table();

    let query = ViewQuery::new()
        .with_filter(
            "salary",
            ColumnFilter::Range {
                min: Some(50_000),
                max: Some(100_000),
            },
        )
        .with_sort(Sort::descending("startDate"));

    group.bench_function("filter_sort_10000", |b| {
        b.iter(|| query.apply(black_box(&columns), black_box(&rows)))
    });

    group.bench_function("global_filter_10000", |b| {
        let query = ViewQuery::new().with_global_filter("analyst");
        b.iter(|| query.apply(black_box(&columns), black_box(&rows)))
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let rows = snapshot(10_000);
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    for size in [100, 1_000, 10_000].iter() {
        let refs: Vec<&Employee> = rows.iter().take(*size).collect();

        group.bench_with_input(BenchmarkId::new("clipboard", size), size, |b, _| {
            b.iter(|| to_clipboard_text(black_box(&refs)))
        });

        group.bench_with_input(BenchmarkId::new("xlsx", size), size, |b, _| {
            b.iter(|| SpreadsheetExport::build(black_box(&refs), today))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_view, bench_export);
criterion_main!(benches);
