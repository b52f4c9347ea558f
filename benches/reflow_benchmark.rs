//! Benchmarks for reflow transfer and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise the transfer and DOCX serialization stages on
//! synthetic source documents, skipping actual PDF I/O.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reflow::{
    reflow, to_docx, Line, Page, ReflowOptions, SourceDocument, Span, SpanStyle, TextBlock,
};

/// Build a synthetic source document with the given number of pages, each
/// carrying several styled spans.
fn create_test_document(page_count: u32) -> SourceDocument {
    let mut doc = SourceDocument::new();

    for n in 1..=page_count {
        let mut page = Page::letter(n);
        let mut block = TextBlock::new();

        block.add_line(Line::from_spans(vec![Span::new(
            format!("Section {}", n),
            SpanStyle::from_font("Helvetica-Bold", 18.0),
        )]));
        for i in 0..20 {
            block.add_line(Line::from_spans(vec![Span::new(
                format!("Paragraph {} of benchmark body text on page {}.", i, n),
                SpanStyle::from_font("Helvetica", 11.0),
            )]));
        }

        page.add_text(block);
        doc.add_page(page);
    }

    doc
}

/// Benchmark the page-to-flow transfer at various document sizes.
fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("reflow");
    let options = ReflowOptions::default();

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| reflow(black_box(&doc), &options));
        });
    }

    group.finish();
}

/// Benchmark DOCX serialization of a transferred document.
fn bench_docx_render(c: &mut Criterion) {
    let doc = create_test_document(10);
    let (flow, _) = reflow(&doc, &ReflowOptions::default());

    c.bench_function("to_docx_10_pages", |b| {
        b.iter(|| to_docx(black_box(&flow)).unwrap());
    });
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_header = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3 rest of document";
    let non_pdf = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| reflow::detect_version_from_bytes(black_box(pdf_header)).unwrap());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| reflow::detect_version_from_bytes(black_box(non_pdf)).is_err());
    });
}

criterion_group!(benches, bench_reflow, bench_docx_render, bench_format_detection);
criterion_main!(benches);
