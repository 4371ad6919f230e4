use bytecraft::{bytes::SharedBytes, codec::Endian, field::FieldSpec, layout::Layout};
use criterion::{Criterion, criterion_group, criterion_main};

fn pixel_layout() -> Layout {
    Layout::compile(&[
        FieldSpec::uint8("blue"),
        FieldSpec::uint8("green"),
        FieldSpec::uint8("red"),
    ])
    .unwrap()
}

fn gen_pixels(count: usize) -> Vec<u8> {
    // Deterministic but non-trivial pattern
    (0..count * 3).map(|i| (i * 31 % 256) as u8).collect()
}

fn bench_project_array(c: &mut Criterion) {
    let layout = pixel_layout();

    for &count in &[1_000usize, 100_000, 1_000_000] {
        let mut data = gen_pixels(count);
        let bytes = SharedBytes::new(&mut data);

        c.bench_function(&format!("project_{}_pixels", count), |b| {
            b.iter(|| layout.project_array(bytes, 0, count, Endian::Little).len())
        });
    }
}

fn bench_recolor(c: &mut Criterion) {
    let layout = pixel_layout();
    let count = 100_000;
    let mut data = gen_pixels(count);
    let bytes = SharedBytes::new(&mut data);
    let red = layout.field_id("red").unwrap();

    c.bench_function("recolor_by_name", |b| {
        b.iter(|| {
            for px in layout.records(bytes, 0, count, Endian::Little) {
                px.write("red", 255u8).unwrap();
            }
        })
    });

    c.bench_function("recolor_by_id", |b| {
        b.iter(|| {
            for px in layout.records(bytes, 0, count, Endian::Little) {
                px.write(red, 255u8).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_project_array, bench_recolor);
criterion_main!(benches);
