//! Benchmarks for sheetcodec read and write performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise both pipelines at various row counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

/// Creates a synthetic XLSX package whose sheet references shared strings.
fn create_test_xlsx(row_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
    )
    .unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
    )
    .unwrap();

    let mut sst = String::from(r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    for i in 0..row_count {
        sst.push_str(&format!("<si><t>Name number {}</t></si>", i));
    }
    sst.push_str("</sst>");
    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    zip.write_all(sst.as_bytes()).unwrap();

    let mut sheet = String::from(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for i in 0..row_count {
        let r = i + 1;
        sheet.push_str(&format!(
            r#"<row r="{r}"><c r="A{r}"><v>{i}</v></c><c r="B{r}" t="s"><v>{i}</v></c><c r="D{r}" t="inlineStr"><is><t>2024-01-01T00:00:00Z</t></is></c></row>"#
        ));
    }
    sheet.push_str("</sheetData></worksheet>");
    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(sheet.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

fn export_rows(row_count: usize) -> Vec<sheetcodec::ExportRow> {
    (0..row_count)
        .map(|i| sheetcodec::ExportRow::new(i as i64 + 1, format!("Name {}", i), "2024-01-01T00:00:00Z"))
        .collect()
}

/// Benchmark XLSX decoding at various sizes.
fn bench_xlsx_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("xlsx_decoding");

    for row_count in [10, 100, 1000, 10000].iter() {
        let data = create_test_xlsx(*row_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &data, |b, data| {
            b.iter(|| {
                let _ = sheetcodec::decode_workbook(black_box(data));
            });
        });
    }

    group.finish();
}

/// Benchmark results workbook encoding.
fn bench_results_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("results_encoding");

    for row_count in [0, 100, 1000, 10000].iter() {
        let rows = export_rows(*row_count);

        group.throughput(Throughput::Elements(*row_count as u64));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &rows, |b, rows| {
            b.iter(|| {
                let _ = sheetcodec::encode_results_workbook(black_box(rows));
            });
        });
    }

    group.finish();
}

/// Benchmark worksheet XML generation alone.
fn bench_sheet_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet_serialization");

    for row_count in [100, 1000, 10000].iter() {
        let rows = export_rows(*row_count);

        group.bench_with_input(BenchmarkId::new("rows", row_count), &rows, |b, rows| {
            b.iter(|| {
                let _ = sheetcodec::xlsx::write_results_sheet(black_box(rows));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_xlsx_decoding,
    bench_results_encoding,
    bench_sheet_serialization,
);
criterion_main!(benches);
