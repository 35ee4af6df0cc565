use proptest::prelude::*;
use wikimodel::{
    DocumentReference,
    id::{IdComputationError, IdComputer, IdLayout, IdVersion, ObjectId, local_uid},
    object::Document,
};

use crate::helpers::*;

fn es_page() -> DocumentReference {
    DocumentReference::new("xwiki", "space", "page")
}

#[test]
fn test_golden_identifier() {
    let id = IdComputer::default().compute(&es_page(), "es", 0b11, 0x0ed5).unwrap();
    assert_eq!(id, ObjectId::new(0xf0da_7f3f_8545_fb57));
    assert_eq!(id.value() & 0b11, 0b11);
    assert_eq!((id.value() >> 2) & 0xfff, 0x0ed5);
    assert_eq!(id.value() & !0x3fff, 0xf0da_7f3f_8545_ded5 & !0x3fff);
    assert_eq!(id.to_string(), "f0da7f3f8545fb57");
    assert_eq!(id.as_i64(), 0xf0da_7f3f_8545_fb57_u64 as i64);
}

#[test]
fn test_collision_range_boundaries() {
    let computer = IdComputer::default();
    let limit = computer.layout().collision_limit() as i64;

    assert!(computer.compute(&es_page(), "es", limit - 1, 0).is_ok());
    let err = computer.compute(&es_page(), "es", limit, 0).unwrap_err();
    assert_eq!(
        err,
        IdComputationError::OutOfRange {
            kind: "collision count",
            count: limit,
            limit: limit as u64,
        }
    );
    let err = computer.compute(&es_page(), "es", -1, 0).unwrap_err();
    assert!(err.is_count_error());
    assert_eq!(err.to_string(), "Invalid collision count: negative count -1");
}

#[test]
fn test_ordinal_range_boundaries() {
    let computer = IdComputer::default();
    assert!(computer.compute(&es_page(), "es", 0, 4095).is_ok());
    let err: wikimodel::Error = computer.compute(&es_page(), "es", 0, 4096).unwrap_err().into();
    assert!(err.is_id_error());
    assert_eq!(
        err.to_string(),
        "Invalid ordinal count: 4096 is outside of defined range [0, 4096)"
    );
}

#[test]
fn test_next_object_id_skips_used_ordinals() {
    let computer = IdComputer::default();
    let class = menu_class();
    let mut doc = Document::new(page_ref());
    for ordinal in [1, 2] {
        let id = computer.compute(&page_ref(), "", 0, ordinal).unwrap();
        doc.add_object(&class).set_id(id, IdVersion::Packed);
    }
    assert_eq!(
        computer.compute_next_object_id(&doc).unwrap(),
        computer.compute(&page_ref(), "", 0, 3).unwrap()
    );
}

#[test]
fn test_next_object_id_uses_document_language() {
    let computer = IdComputer::default();
    let mut doc = Document::new(page_ref());
    doc.set_language("fr");
    assert_eq!(
        computer.compute_next_object_id(&doc).unwrap(),
        computer.compute(&page_ref(), "fr", 0, 1).unwrap()
    );
}

#[test]
fn test_layout_rejects_full_width() {
    assert!(IdLayout::new(32, 31).is_ok());
    assert!(matches!(
        IdLayout::new(32, 32),
        Err(IdComputationError::InvalidLayout {
            collision_bits: 32,
            ordinal_bits: 32
        })
    ));
}

#[test]
fn test_deserialized_layout_cannot_overflow() {
    assert!(serde_json::from_str::<IdLayout>(r#"{"collision_bits":64,"ordinal_bits":0}"#).is_err());
    assert!(serde_json::from_str::<IdLayout>(r#"{"collision_bits":0,"ordinal_bits":64}"#).is_err());

    let layout: IdLayout =
        serde_json::from_str(r#"{"collision_bits":0,"ordinal_bits":63}"#).unwrap();
    let computer = IdComputer::new(layout);
    let id = computer.compute(&es_page(), "es", 0, (1 << 62) + 3).unwrap();
    assert_eq!(id.value() & ((1 << 63) - 1), (1 << 62) + 3);
    assert!(computer.compute(&es_page(), "es", 1, 0).is_err());
}

proptest! {
    #[test]
    fn prop_compute_is_deterministic(
        space in "[A-Za-z0-9]{1,12}",
        name in "[A-Za-z0-9]{1,12}",
        lang in "[a-z]{0,3}",
        collision in 0i64..4,
        ordinal in 0i64..4096,
    ) {
        let computer = IdComputer::default();
        let doc_ref = DocumentReference::new("xwiki", space, name);
        let first = computer.compute(&doc_ref, &lang, collision, ordinal).unwrap();
        let second = computer.compute(&doc_ref, &lang, collision, ordinal).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.value() & 0b11, collision as u64);
        prop_assert_eq!((first.value() >> 2) & 0xfff, ordinal as u64);
    }

    #[test]
    fn prop_wiki_does_not_change_id(
        wiki in "[a-z]{1,8}",
        space in "[A-Za-z0-9]{1,12}",
        name in "[A-Za-z0-9]{1,12}",
        lang in "[a-z]{0,3}",
    ) {
        let computer = IdComputer::default();
        let base = DocumentReference::new("xwiki", space, name);
        let moved = base.with_wiki(wiki);
        prop_assert_eq!(local_uid(&base, &lang), local_uid(&moved, &lang));
        prop_assert_eq!(
            computer.compute(&base, &lang, 1, 7).unwrap(),
            computer.compute(&moved, &lang, 1, 7).unwrap()
        );
    }

    #[test]
    fn prop_language_changes_uid(
        space in "[A-Za-z0-9]{1,12}",
        name in "[A-Za-z0-9]{1,12}",
        a in "[a-z]{2}",
        b in "[a-z]{2}",
    ) {
        prop_assume!(a != b);
        let doc_ref = DocumentReference::new("xwiki", space, name);
        prop_assert_ne!(local_uid(&doc_ref, &a), local_uid(&doc_ref, &b));
    }

    #[test]
    fn prop_space_and_name_change_id(
        a in ("[A-Za-z0-9]{1,8}", "[A-Za-z0-9]{1,8}"),
        b in ("[A-Za-z0-9]{1,8}", "[A-Za-z0-9]{1,8}"),
        lang in "[a-z]{0,3}",
    ) {
        prop_assume!(a != b);
        let computer = IdComputer::default();
        let first = DocumentReference::new("xwiki", a.0, a.1);
        let second = DocumentReference::new("xwiki", b.0, b.1);
        prop_assert_ne!(local_uid(&first, &lang), local_uid(&second, &lang));
        prop_assert_ne!(
            computer.compute(&first, &lang, 0, 0).unwrap(),
            computer.compute(&second, &lang, 0, 0).unwrap()
        );
    }

    #[test]
    fn prop_out_of_range_counts_fail(collision in 4i64..i64::MAX, ordinal in i64::MIN..0) {
        let computer = IdComputer::default();
        prop_assert!(computer.compute(&es_page(), "es", collision, 0).is_err());
        prop_assert!(computer.compute(&es_page(), "es", 0, ordinal).is_err());
    }
}
