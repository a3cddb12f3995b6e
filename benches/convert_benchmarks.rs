//! Benchmarks for body conversion and front matter serialization.
//!
//! Run with: cargo bench --bench convert_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mdexport::domain::{ContentRecord, Taxonomy};
use mdexport::export::HtmlToMarkdownConverter;
use mdexport::infra::FrontMatterSerializer;

// =============================================================================
// Test Data Generation
// =============================================================================

const WORDS: &[&str] = &[
    "export", "markdown", "archive", "record", "taxonomy", "term", "author", "status",
    "front", "matter", "paragraph", "header", "link", "list", "entity", "&amp;",
];

fn sentence(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(seed * 7 + i * 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds an HTML body with `sections` header/paragraph/link/list groups.
fn html_body(sections: usize) -> String {
    let mut html = String::new();
    for i in 0..sections {
        html.push_str(&format!("<h{}>{}</h{}>\n", i % 6 + 1, sentence(i, 4), i % 6 + 1));
        html.push_str(&format!("<p class=\"lead\">{}<br/>{}</p>\n", sentence(i, 20), sentence(i + 1, 12)));
        html.push_str(&format!(
            "<a href=\"https://example.test/posts/{i}?ref=bench&amp;x=1\">{}</a>\n",
            sentence(i, 3)
        ));
        html.push_str("<ul>");
        for j in 0..5 {
            html.push_str(&format!("<li>{}</li>", sentence(i + j, 5)));
        }
        html.push_str("</ul>\n<script>var x = 1;</script>\n");
    }
    html
}

fn record(fields: usize) -> ContentRecord {
    let mut builder = ContentRecord::builder(1, "Benchmark \"Record\"")
        .name("benchmark-record")
        .author("Bench")
        .type_label(Some("Post"))
        .taxonomy(Taxonomy::new("category", ["news", "rust", "tools"]))
        .taxonomy(Taxonomy::new("post_tag", ["a", "b"]));
    for i in 0..fields {
        builder = builder.custom_field(format!("field_{i}"), sentence(i, 6));
        builder = builder.custom_field(format!("_hidden_{i}"), "x");
    }
    builder.build()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_convert(c: &mut Criterion) {
    let converter = HtmlToMarkdownConverter::new();
    let mut group = c.benchmark_group("convert");

    for sections in [1, 10, 100] {
        let html = html_body(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &html, |b, html| {
            b.iter(|| converter.convert(html));
        });
    }

    group.finish();
}

fn bench_front_matter(c: &mut Criterion) {
    let serializer = FrontMatterSerializer::new();
    let mut group = c.benchmark_group("front_matter");

    for fields in [0, 10, 100] {
        let record = record(fields);
        group.bench_with_input(BenchmarkId::from_parameter(fields), &record, |b, record| {
            b.iter(|| serializer.serialize(record));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_front_matter);
criterion_main!(benches);
