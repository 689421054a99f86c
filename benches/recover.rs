use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use vision_tags::recovery::parser::recover;
use vision_tags::recovery::{normalize, sanitize, ResultAssembler};

fn sample_payload(objects: usize) -> String {
    let objects: Vec<Value> = (0..objects)
        .map(|i| json!({"name": format!("object-{i}"), "confidence": "medium"}))
        .collect();
    json!({"caption": "Staveniště s jeřábem", "objects": objects}).to_string()
}

fn bench_recovery_ladder(c: &mut Criterion) {
    let direct = sample_payload(20);
    let quoted = serde_json::to_string(&direct).expect("quote payload");
    let escaped = quoted[1..quoted.len() - 1].to_string();
    let prose = format!("Here is the JSON you asked for:\n```json\n{direct}\n```\nThanks!");

    c.bench_function("recover_direct_20", |b| {
        b.iter(|| black_box(recover(black_box(&direct)).expect("direct")));
    });

    c.bench_function("recover_quoted_unwrap_20", |b| {
        b.iter(|| black_box(recover(black_box(&quoted)).expect("quoted")));
    });

    c.bench_function("recover_escape_repair_20", |b| {
        b.iter(|| black_box(recover(black_box(&escaped)).expect("escaped")));
    });

    c.bench_function("recover_brace_extract_20", |b| {
        b.iter(|| black_box(recover(black_box(&prose)).expect("prose")));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let clean = sample_payload(50);
    let escaped = serde_json::to_string(&clean).expect("quote payload");

    c.bench_function("normalize_no_escapes_50", |b| {
        b.iter(|| black_box(normalize(black_box(&clean))));
    });

    c.bench_function("normalize_escaped_50", |b| {
        b.iter(|| black_box(normalize(black_box(&escaped))));
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let mut entries: Vec<Value> = (0..100)
        .map(|i| json!({"name": format!("Object-{}", i % 60), "confidence": "HIGH"}))
        .collect();
    entries.extend([
        json!({"name": "..."}),
        json!({"name": "rodina"}),
        json!({"name": "pozadí"}),
        json!(42),
    ]);

    c.bench_function("sanitize_104_with_duplicates", |b| {
        b.iter(|| black_box(sanitize(black_box(&entries))));
    });
}

fn bench_assemble(c: &mut Criterion) {
    let assembler = ResultAssembler::default();
    let envelope = json!({ "response": sample_payload(20), "done": true });
    let tag_text = (0..40)
        .map(|i| format!("- tag {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let fallback = json!({ "output_text": tag_text });

    c.bench_function("assemble_envelope_direct", |b| {
        b.iter(|| black_box(assembler.assemble(black_box(&envelope))));
    });

    c.bench_function("assemble_envelope_fallback", |b| {
        b.iter(|| black_box(assembler.assemble(black_box(&fallback))));
    });
}

criterion_group!(
    benches,
    bench_recovery_ladder,
    bench_normalize,
    bench_sanitize,
    bench_assemble
);
criterion_main!(benches);
