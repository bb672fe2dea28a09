use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use invoicely_forms::resources::invoice::invoice_schema;
use invoicely_forms::{
    FormContext, FormData, FormValue, format_form_data, prepare_submission, sanitize_form_data,
};

fn invoice_form(lines: usize) -> FormData {
    let items = (0..lines)
        .map(|i| {
            FormValue::Object(
                FormData::new()
                    .with("description", format!("  Line item {i}  "))
                    .with("quantity", "2")
                    .with("unit_price", 1500.0)
                    .with("tax_rate", ""),
            )
        })
        .collect::<Vec<_>>();

    FormData::new()
        .with("client_id", "65f0c1e2a9")
        .with("status", "draft")
        .with("due_date", "2024-07-31")
        .with("notes", "   ")
        .with("items", items)
}

fn bench_pipeline(c: &mut Criterion) {
    let ctx = FormContext::default();
    let schema = invoice_schema();

    let mut group = c.benchmark_group("prepare_submission");
    for lines in [1usize, 10, 100] {
        let data = invoice_form(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &data, |b, data| {
            b.iter(|| prepare_submission(&ctx, &schema, black_box(data)))
        });
    }
    group.finish();

    let data = invoice_form(10);
    c.bench_function("sanitize_then_format", |b| {
        b.iter(|| format_form_data(&sanitize_form_data(black_box(&data))))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
