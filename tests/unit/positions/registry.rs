use super::*;

#[test]
fn compiled_tables_validate() {
    validate_tables().unwrap();
}

#[test]
fn every_table_entry_is_normalized() {
    for table in [&PIC_TABLE, &SAF_TABLE] {
        for field in table.fields() {
            let spec = table.lookup(field).unwrap();
            assert!((0.0..=1.0).contains(&spec.x), "{} x", field.name());
            assert!((0.0..=1.0).contains(&spec.y), "{} y", field.name());
        }
    }
}

#[test]
fn missing_field_is_configuration_error() {
    let err = PIC_TABLE.lookup(FieldId::Signature).unwrap_err();
    assert!(matches!(err, FormplateError::Configuration(_)));
    assert!(err.to_string().contains("signature"));
}

#[test]
fn absolute_scales_center_and_area() {
    let canvas = Canvas::new(1000, 500);
    let p = absolute(PositionSpec::point(0.25, 0.5), canvas);
    assert_eq!(p.center, Point::new(250.0, 250.0));
    assert_eq!(p.size, None);

    let sig = absolute(SAF_TABLE.lookup(FieldId::Signature).unwrap(), canvas);
    assert!((sig.center.x - 830.0).abs() < 1e-9);
    assert!((sig.center.y - 405.0).abs() < 1e-9);
    let size = sig.size.unwrap();
    assert!((size.width - 500.0).abs() < 1e-9);
    assert!((size.height - 100.0).abs() < 1e-9);
}

#[test]
fn checkbox_offset_only_for_standard_variant() {
    assert_eq!(SafVariant::Member.checkbox_offset(), Vec2::ZERO);
    assert_ne!(SafVariant::Standard.checkbox_offset(), Vec2::ZERO);

    let px = SafVariant::Standard.checkbox_offset_px(Canvas::new(100, 1000));
    assert_eq!(px, Vec2::new(0.0, -80.0));
}

#[test]
fn member_flag_selects_variant() {
    assert_eq!(SafVariant::from_member_flag(Some(true)), SafVariant::Member);
    assert_eq!(SafVariant::from_member_flag(Some(false)), SafVariant::Standard);
    assert_eq!(SafVariant::from_member_flag(None), SafVariant::Standard);
}

#[test]
fn only_saf_answer_fields_are_checkboxes() {
    for slots in SAF_CHECKBOX_SLOTS {
        assert!(slots.iter().all(|f| f.is_checkbox()));
    }
    assert!(!FieldId::Signature.is_checkbox());
    assert!(!FieldId::PartnerNameUnderSignature.is_checkbox());
    assert!(PIC_FIELDS.iter().all(|f| !f.is_checkbox()));
}
