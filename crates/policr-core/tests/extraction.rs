//! End-to-end extraction tests over OCR-like policy text.

use std::sync::Arc;
use std::thread;

use policr_core::{
    motor_insurance, DocumentText, ExtractionError, FieldDiagnostic, FieldSchema, FieldSpec,
    PolicyExtractor, PolicyParser, ValueShape,
};
use pretty_assertions::assert_eq;

const MOTOR_POLICY: &str = "\
ACME GENERAL INSURANCE COMPANY LIMITED
Motor Insurance Policy Schedule cum Certificate of Insurance

Policy Number: 3001/MTR/123456/00/000
Insurer Name: Acme General Insurance Co. Ltd.
Name of the Insured: Ravi Kumar
Address: 12, MG Road, Pune 411001
Mobile No.: +91 98765 43210
Registration Number: MH 12 AB 1234
Make / Model: MARUTI SWIFT VXI
Engine Number: K12MN1234567
Chassis Number: MA3EWDE1C00123456
Year of Manufacture: 2021
Insured Declared Value (IDV): ₹ 5,25,000
Period of Insurance From 01/04/2024 To 31/03/2025
Policy End Date: 31/03/2025
Date of Issue: 28-Mar-2024
Own Damage Premium: Rs. 8,450.00
Third Party Premium: Rs. 2,094.00
Net Premium: Rs. 10,544.00
GST @18%: Rs. 1,897.92
Total Premium Payable: ₹ 12,441.92
No Claim Bonus: 20%
Nominee Name:
Sunita Kumar
";

fn two_field_schema() -> Arc<FieldSchema> {
    Arc::new(
        FieldSchema::from_specs(vec![
            FieldSpec::new("PolicyNumber", ["Policy Number"]),
            FieldSpec::new("InsuredName", ["Insured Name"]),
        ])
        .unwrap(),
    )
}

#[test]
fn test_full_motor_policy() {
    let result = PolicyExtractor::motor().extract(MOTOR_POLICY).unwrap();

    let expected = [
        ("policy_number", "3001/MTR/123456/00/000"),
        ("insurer_name", "Acme General Insurance Co. Ltd."),
        ("insured_name", "Ravi Kumar"),
        ("insured_address", "12, MG Road, Pune 411001"),
        ("contact_number", "+91 98765 43210"),
        ("vehicle_registration_number", "MH12AB1234"),
        ("make_model", "MARUTI SWIFT VXI"),
        ("engine_number", "K12MN1234567"),
        ("chassis_number", "MA3EWDE1C00123456"),
        ("year_of_manufacture", "2021"),
        ("insured_declared_value", "525000"),
        ("policy_start_date", "01/04/2024"),
        ("policy_end_date", "31/03/2025"),
        ("issue_date", "28/03/2024"),
        ("own_damage_premium", "8450.00"),
        ("third_party_premium", "2094.00"),
        ("net_premium", "10544.00"),
        ("gst", "1897.92"),
        ("total_premium", "12441.92"),
        ("no_claim_bonus", "20%"),
        ("nominee_name", "Sunita Kumar"),
    ];

    let actual: Vec<_> = result.iter().collect();
    assert_eq!(actual, expected);
    assert_eq!(result.completion_rate(), 100.0);
}

#[test]
fn test_totality_for_any_text() {
    let extractor = PolicyExtractor::motor();
    let schema = motor_insurance();
    let names: Vec<_> = schema.names().collect();

    for text in ["x", "random words only", "Policy Number:", "₹₹₹\n\n---\n", MOTOR_POLICY] {
        let result = extractor.extract(text).unwrap();
        let keys: Vec<_> = result.keys().collect();
        assert_eq!(keys, names, "input {text:?}");
    }
}

#[test]
fn test_normalization_is_a_fixed_point() {
    let once = DocumentText::normalize(MOTOR_POLICY);
    let twice = DocumentText::normalize(&once.to_text());
    assert_eq!(once.to_text(), twice.to_text());
}

#[test]
fn test_label_adjacency() {
    let extractor = PolicyExtractor::new(two_field_schema());
    let result = extractor
        .extract("Policy Number: PN12345\nInsured Name\nJohn Doe")
        .unwrap();

    assert_eq!(result.get("PolicyNumber"), Some("PN12345"));
    assert_eq!(result.get("InsuredName"), Some("John Doe"));
    assert_eq!(result.field_count(), 2);
}

#[test]
fn test_absence_does_not_affect_other_fields() {
    let extractor = PolicyExtractor::new(two_field_schema());
    let result = extractor.extract("Insured Name: Jane Roe").unwrap();

    assert_eq!(result.get("PolicyNumber"), Some(""));
    assert_eq!(result.get("InsuredName"), Some("Jane Roe"));
}

#[test]
fn test_date_placeholder_is_rejected() {
    let schema = FieldSchema::from_specs(vec![
        FieldSpec::new("issue_date", ["Issue Date"]).with_shape(ValueShape::Date),
    ])
    .unwrap();
    let extractor = PolicyExtractor::new(Arc::new(schema));

    let report = extractor.extract_with_report("Issue Date: N/A").unwrap();
    assert_eq!(report.result.get("issue_date"), Some(""));
    assert!(matches!(
        &report.diagnostics[0],
        FieldDiagnostic::ShapeMismatch { candidate, .. } if candidate == "N/A"
    ));
}

#[test]
fn test_order_is_stable_across_inputs() {
    let extractor = PolicyExtractor::motor();
    let a = extractor.extract("Nominee: A B").unwrap();
    let b = extractor.extract(MOTOR_POLICY).unwrap();
    assert!(a.keys().eq(b.keys()));
}

#[test]
fn test_synonyms_give_same_value() {
    let schema = FieldSchema::from_specs(vec![
        FieldSpec::new("registration", ["Reg. No.", "Registration Number"])
            .with_shape(ValueShape::AlphanumericCode),
    ])
    .unwrap();
    let extractor = PolicyExtractor::new(Arc::new(schema));

    let short = extractor.extract("Reg. No.: MH12AB1234").unwrap();
    let long = extractor.extract("Registration Number - MH12AB1234").unwrap();
    assert_eq!(short.get("registration"), Some("MH12AB1234"));
    assert_eq!(short, long);
}

#[test]
fn test_currency_normalization() {
    let schema = FieldSchema::from_specs(vec![
        FieldSpec::new("premium", ["Premium"]).with_shape(ValueShape::Currency),
    ])
    .unwrap();
    let extractor = PolicyExtractor::new(Arc::new(schema));

    let result = extractor.extract("Premium: ₹ 12,500.00").unwrap();
    assert_eq!(result.get("premium"), Some("12500.00"));
}

#[test]
fn test_confusables_repaired_only_in_values() {
    let schema = FieldSchema::from_specs(vec![
        FieldSpec::new("premium", ["Premium"]).with_shape(ValueShape::Currency),
        FieldSpec::new("start", ["Start Date"]).with_shape(ValueShape::Date),
    ])
    .unwrap();
    let extractor = PolicyExtractor::new(Arc::new(schema));

    let result = extractor
        .extract("Premium: Rs. 7,O8O\nStart Date: O1/O4/2O24")
        .unwrap();
    assert_eq!(result.get("premium"), Some("7080"));
    assert_eq!(result.get("start"), Some("01/04/2024"));
}

#[test]
fn test_empty_input_is_an_error_with_every_field_empty() {
    let extractor = PolicyExtractor::motor();
    let names: Vec<_> = motor_insurance().names().map(str::to_string).collect();

    for text in ["", "\n \r\n\t"] {
        match extractor.extract(text) {
            Err(ExtractionError::EmptyInput { result }) => {
                let keys: Vec<_> = result.keys().map(str::to_string).collect();
                assert_eq!(keys, names);
                assert_eq!(result.filled_count(), 0);
            }
            other => panic!("expected EmptyInput for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_look_ahead_onto_another_label_does_not_invent_values() {
    let text = "\
Total IDV
Engine No: K12M1234567
Own Damage Premium
Chassis No: MA3EWDE1C00123456
Date of Issue
Nominee Name: Asha Rao
";
    let report = PolicyExtractor::motor().extract_with_report(text).unwrap();
    let result = &report.result;

    assert_eq!(result.get("insured_declared_value"), Some(""));
    assert_eq!(result.get("own_damage_premium"), Some(""));
    assert_eq!(result.get("issue_date"), Some(""));
    assert_eq!(result.get("engine_number"), Some("K12M1234567"));
    assert_eq!(result.get("chassis_number"), Some("MA3EWDE1C00123456"));
    assert_eq!(result.get("nominee_name"), Some("Asha Rao"));

    let idv = &report.diagnostics[motor_position("insured_declared_value")];
    assert!(matches!(
        idv,
        FieldDiagnostic::ShapeMismatch { candidate, .. } if candidate == "Engine No: K12M1234567"
    ));
}

#[test]
fn test_codes_with_confusable_letters_are_kept() {
    let text = "\
Registration Number: KA 05 S 1234
Engine Number: G12B D 45678
Chassis Number: MA3EWB22S00123456
";
    let result = PolicyExtractor::motor().extract(text).unwrap();

    assert_eq!(result.get("vehicle_registration_number"), Some("KA05S1234"));
    assert_eq!(result.get("engine_number"), Some("G12BD45678"));
    assert_eq!(result.get("chassis_number"), Some("MA3EWB22S00123456"));
}

#[test]
fn test_blank_lines_between_label_and_value() {
    let result = PolicyExtractor::motor()
        .extract("Name of the Insured\n\n\nRavi Kumar\n")
        .unwrap();
    assert_eq!(result.get("insured_name"), Some("Ravi Kumar"));
}

fn motor_position(field: &str) -> usize {
    motor_insurance()
        .names()
        .position(|name| name == field)
        .unwrap()
}

#[test]
fn test_serializes_as_ordered_object() {
    let extractor = PolicyExtractor::new(two_field_schema());
    let result = extractor.extract("Insured Name: Jane Roe").unwrap();

    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"PolicyNumber":"","InsuredName":"Jane Roe"}"#
    );
}

#[test]
fn test_parser_trait_object() {
    let parser: Box<dyn PolicyParser> = Box::new(PolicyExtractor::motor());
    let report = parser.parse(MOTOR_POLICY).unwrap();
    assert_eq!(report.summary(), "Found 21 out of 21 fields (100.0%)");
    assert!(report.diagnostics.iter().all(FieldDiagnostic::is_extracted));
}

#[test]
fn test_shared_extractor_across_threads() {
    let extractor = Arc::new(PolicyExtractor::motor());
    let expected = extractor.extract(MOTOR_POLICY).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let extractor = Arc::clone(&extractor);
            thread::spawn(move || {
                if i % 2 == 0 {
                    extractor.extract(MOTOR_POLICY).unwrap()
                } else {
                    extractor.extract("Nominee: Someone").unwrap()
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(result, expected);
        } else {
            assert_eq!(result.get("nominee_name"), Some("Someone"));
            assert_eq!(result.filled_count(), 1);
        }
    }
}
