use bytecraft::{
    bytes::SharedBytes,
    codec::Endian,
    field::{FieldKind, FieldSpec},
    layout::Layout,
};
use proptest::prelude::*;

fn field_spec() -> impl Strategy<Value = (FieldKind, usize)> {
    prop_oneof![
        Just((FieldKind::Int8, 1)),
        Just((FieldKind::Uint8, 1)),
        Just((FieldKind::Int16, 2)),
        Just((FieldKind::Uint16, 2)),
        Just((FieldKind::Int32, 4)),
        Just((FieldKind::Uint32, 4)),
        Just((FieldKind::Int64, 8)),
        Just((FieldKind::Uint64, 8)),
        Just((FieldKind::Float32, 4)),
        Just((FieldKind::Float64, 8)),
        (1usize..16).prop_map(|len| (FieldKind::ByteArray, len)),
        (1usize..16).prop_map(|len| (FieldKind::Skip, len)),
    ]
}

fn build_specs(kinds: &[(FieldKind, usize)]) -> Vec<FieldSpec> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, &(kind, width))| {
            let name = format!("f{}", i);
            match kind {
                FieldKind::Int8 => FieldSpec::int8(name),
                FieldKind::Uint8 => FieldSpec::uint8(name),
                FieldKind::Int16 => FieldSpec::int16(name),
                FieldKind::Uint16 => FieldSpec::uint16(name),
                FieldKind::Int32 => FieldSpec::int32(name),
                FieldKind::Uint32 => FieldSpec::uint32(name),
                FieldKind::Int64 => FieldSpec::int64(name),
                FieldKind::Uint64 => FieldSpec::uint64(name),
                FieldKind::Float32 => FieldSpec::float32(name),
                FieldKind::Float64 => FieldSpec::float64(name),
                FieldKind::ByteArray => FieldSpec::byte_array(name, width),
                FieldKind::Skip => FieldSpec::skip(width),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn byte_length_is_sum_of_widths(kinds in prop::collection::vec(field_spec(), 1..24)) {
        let specs = build_specs(&kinds);
        let layout = Layout::compile(&specs).unwrap();
        let total: usize = kinds.iter().map(|&(_, width)| width).sum();
        prop_assert_eq!(layout.byte_length(), total);
    }

    #[test]
    fn offsets_advance_by_width(
        kinds in prop::collection::vec(field_spec(), 1..24),
        start in 0usize..64
    ) {
        let specs = build_specs(&kinds);
        let layout = Layout::compile(&specs).unwrap();
        let mut data = vec![0u8; 0];
        let bytes = SharedBytes::new(&mut data);
        let view = layout.project(bytes, start, Endian::Big);

        let mut expected = start;
        for (i, &(kind, width)) in kinds.iter().enumerate() {
            let name = format!("f{}", i);
            if kind == FieldKind::Skip {
                prop_assert_eq!(view.field_offset(&name), None);
            } else {
                prop_assert_eq!(view.field_offset(&name), Some(expected));
            }
            expected += width;
        }
        prop_assert_eq!(view.next_offset(), Some(expected));
        prop_assert_eq!(view.end_position(), Some(expected - 1));
    }

    #[test]
    fn integers_round_trip(
        a in any::<i8>(),
        b in any::<u16>(),
        c in any::<i32>(),
        d in any::<u64>(),
        e in any::<i64>(),
        little in any::<bool>()
    ) {
        let layout = Layout::compile(&[
            FieldSpec::int8("a"),
            FieldSpec::uint16("b"),
            FieldSpec::int32("c"),
            FieldSpec::uint64("d"),
            FieldSpec::int64("e"),
        ])
        .unwrap();
        let mut data = vec![0u8; layout.byte_length()];
        let bytes = SharedBytes::new(&mut data);
        let view = layout.project(bytes, 0, Endian::from_little(little));

        view.write("a", a).unwrap();
        view.write("b", b).unwrap();
        view.write("c", c).unwrap();
        view.write("d", d).unwrap();
        view.write("e", e).unwrap();

        prop_assert_eq!(view.read::<i8>("a").unwrap(), a);
        prop_assert_eq!(view.read::<u16>("b").unwrap(), b);
        prop_assert_eq!(view.read::<i32>("c").unwrap(), c);
        prop_assert_eq!(view.read::<u64>("d").unwrap(), d);
        prop_assert_eq!(view.read::<i64>("e").unwrap(), e);
    }

    #[test]
    fn floats_round_trip(
        x in any::<f32>().prop_filter("finite", |v| v.is_finite()),
        y in any::<f64>().prop_filter("finite", |v| v.is_finite()),
        little in any::<bool>()
    ) {
        let layout = Layout::compile(&[FieldSpec::float32("x"), FieldSpec::float64("y")]).unwrap();
        let mut data = vec![0u8; 12];
        let bytes = SharedBytes::new(&mut data);
        let view = layout.project(bytes, 0, Endian::from_little(little));

        view.write("x", x).unwrap();
        view.write("y", y).unwrap();
        prop_assert_eq!(view.read::<f32>("x").unwrap(), x);
        prop_assert_eq!(view.read::<f64>("y").unwrap(), y);
    }

    #[test]
    fn endian_changes_decoding_only(raw in any::<[u8; 4]>()) {
        let layout = Layout::compile(&[FieldSpec::uint32("v")]).unwrap();
        let mut data = raw.to_vec();
        let bytes = SharedBytes::new(&mut data);
        let big = layout.project(bytes, 0, Endian::Big);
        let little = layout.project(bytes, 0, Endian::Little);

        prop_assert_eq!(big.field_offset("v"), little.field_offset("v"));
        prop_assert_eq!(big.byte_length(), little.byte_length());

        let from_big = big.read::<u32>("v").unwrap();
        let from_little = little.read::<u32>("v").unwrap();
        prop_assert_eq!(from_big, from_little.swap_bytes());

        let palindrome = raw[0] == raw[3] && raw[1] == raw[2];
        prop_assert_eq!(from_big == from_little, palindrome);
    }

    #[test]
    fn arrays_tile_the_region(
        kinds in prop::collection::vec(field_spec(), 1..8),
        start in 0usize..32,
        count in 0usize..32
    ) {
        let specs = build_specs(&kinds);
        let layout = Layout::compile(&specs).unwrap();
        let stride = layout.byte_length();
        let mut data = vec![0u8; start + stride * count];
        let bytes = SharedBytes::new(&mut data);

        let views = layout.project_array(bytes, start, count, Endian::Little);
        prop_assert_eq!(views.len(), count);

        let mut expected = start;
        for (i, view) in views.iter().enumerate() {
            prop_assert_eq!(view.base_offset(), start + i * stride);
            prop_assert_eq!(view.base_offset(), expected);
            expected = view.next_offset().unwrap();
        }
        prop_assert_eq!(expected, start + stride * count);
    }

    #[test]
    fn writes_are_visible_through_aliases(value in any::<u32>(), little in any::<bool>()) {
        let layout = Layout::compile(&[FieldSpec::skip(2), FieldSpec::uint32("x")]).unwrap();
        let mut data = vec![0u8; 6];
        let bytes = SharedBytes::new(&mut data);
        let endian = Endian::from_little(little);
        let first = layout.project(bytes, 0, endian);
        let second = layout.project(bytes, 0, endian);

        first.write("x", value).unwrap();
        prop_assert_eq!(second.read::<u32>("x").unwrap(), value);
    }

    #[test]
    fn wrong_length_byte_array_leaves_buffer(
        initial in any::<[u8; 6]>(),
        src in prop::collection::vec(any::<u8>(), 0..12)
    ) {
        prop_assume!(src.len() != 6);
        let layout = Layout::compile(&[FieldSpec::byte_array("payload", 6)]).unwrap();
        let mut data = initial.to_vec();
        let bytes = SharedBytes::new(&mut data);
        let view = layout.project(bytes, 0, Endian::Big);

        prop_assert!(view.set_bytes("payload", &src).is_err());
        prop_assert!(view.set("payload", 1u8).is_err());
        prop_assert_eq!(bytes.to_vec(), initial.to_vec());
    }
}
