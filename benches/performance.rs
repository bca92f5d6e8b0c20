use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::core::services::{ForecastService, SummaryService};
use expense_core::domain::{Category, ExpenseRecord, PaymentMode};
use expense_core::storage::{load_table_from_path, save_table_to_path, ExpenseTable};
use tempfile::tempdir;

fn build_sample_records(count: usize) -> Vec<ExpenseRecord> {
    let start_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let categories = [
        Category::Food,
        Category::Fun,
        Category::Work,
        Category::Misc,
        Category::Home,
        Category::Other("Travel".into()),
    ];

    (0..count)
        .map(|idx| ExpenseRecord {
            id: idx as u64 + 1,
            date: start_date + Duration::days((idx % 1095) as i64),
            payee: format!("Payee {}", idx % 40),
            description: "Benchmark item".into(),
            amount: 5.0 + (idx % 100) as f64,
            mode_of_payment: PaymentMode::Card,
            category: categories[idx % categories.len()].clone(),
        })
        .collect()
}

fn bench_reports(c: &mut Criterion) {
    let records = build_sample_records(10_000);

    c.bench_function("summarize_10k", |b| {
        b.iter(|| black_box(SummaryService::summarize(black_box(&records))))
    });

    c.bench_function("chart_series_10k", |b| {
        b.iter(|| black_box(SummaryService::chart_series(black_box(&records))))
    });

    c.bench_function("forecast_10k", |b| {
        b.iter(|| black_box(ForecastService::forecast(black_box(&records)).expect("forecast")))
    });
}

fn bench_table_io(c: &mut Criterion) {
    let records = build_sample_records(10_000);
    let table = ExpenseTable {
        next_id: records.len() as u64 + 1,
        expenses: records,
        ..ExpenseTable::default()
    };
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("expenses.json");

    c.bench_function("table_save_10k", |b| {
        b.iter(|| {
            save_table_to_path(&table, &file_path).expect("save table");
        })
    });

    save_table_to_path(&table, &file_path).expect("seed");

    c.bench_function("table_load_10k", |b| {
        b.iter(|| {
            let loaded = load_table_from_path(&file_path).expect("load table");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_reports, bench_table_io);
criterion_main!(benches);
