use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sg_core::config::StoreConfig;
use sg_core::encoding::TextEncoding;

fn bench_encodings(c: &mut Criterion) {
    let text = "{\n\t\"title\": \"title\",\n\t\"main\": \"body content\"\n}".repeat(64);

    for enc in [TextEncoding::Utf8, TextEncoding::Utf16Le, TextEncoding::Latin1] {
        let bytes = enc.encode(&text).unwrap();
        c.bench_function(&format!("encode_{enc}_1000"), |b| {
            b.iter(|| {
                for _ in 0..1000 {
                    black_box(enc.encode(black_box(&text)).unwrap());
                }
            })
        });
        c.bench_function(&format!("decode_{enc}_1000"), |b| {
            b.iter(|| {
                for _ in 0..1000 {
                    black_box(enc.decode(black_box(&bytes)).unwrap());
                }
            })
        });
    }
}

fn bench_config_parse(c: &mut Criterion) {
    let doc = r#"{"root": "/srv/site/data", "encoding": "utf8", "extension": ".json"}"#;
    c.bench_function("config_from_json_10000", |b| {
        b.iter(|| {
            for _ in 0..10000 {
                black_box(StoreConfig::from_json_str(black_box(doc)).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_encodings, bench_config_parse);
criterion_main!(benches);
