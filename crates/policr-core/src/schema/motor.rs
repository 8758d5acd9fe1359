//! Built-in schema for motor insurance policy schedules.

use std::sync::Arc;

use lazy_static::lazy_static;

use super::{FieldSchema, FieldSpec, ValueShape};

lazy_static! {
    static ref MOTOR_SCHEMA: Arc<FieldSchema> = Arc::new(
        FieldSchema::from_specs(motor_fields()).expect("built-in motor schema is valid")
    );
}

/// Shared built-in motor insurance schema.
pub fn motor_insurance() -> Arc<FieldSchema> {
    Arc::clone(&MOTOR_SCHEMA)
}

fn motor_fields() -> Vec<FieldSpec> {
    use ValueShape::{AlphanumericCode, Currency, Date, FreeText};

    vec![
        FieldSpec::new(
            "policy_number",
            [
                "Policy Number",
                "Policy No.",
                "Policy No",
                "Policy #",
                "Certificate Number",
                "Certificate No.",
                "Certificate No",
            ],
        )
        .with_shape(AlphanumericCode),
        FieldSpec::new(
            "insurer_name",
            ["Insurer Name", "Name of Insurer", "Insurance Company", "Insurer"],
        )
        .with_shape(FreeText),
        FieldSpec::new(
            "insured_name",
            [
                "Name of the Insured",
                "Name of Insured",
                "Insured Name",
                "Policy Holder Name",
                "Policyholder Name",
                "Proposer Name",
            ],
        )
        .with_shape(FreeText),
        FieldSpec::new(
            "insured_address",
            [
                "Address of the Insured",
                "Insured Address",
                "Communication Address",
                "Address",
            ],
        )
        .with_shape(FreeText),
        FieldSpec::new(
            "contact_number",
            [
                "Mobile Number",
                "Mobile No.",
                "Mobile No",
                "Contact Number",
                "Contact No.",
                "Phone No.",
                "Phone",
            ],
        )
        .with_shape(FreeText),
        FieldSpec::new(
            "vehicle_registration_number",
            [
                "Registration Number",
                "Registration No.",
                "Registration No",
                "Regn. No.",
                "Reg. No.",
                "Vehicle Number",
                "Vehicle No.",
            ],
        )
        .with_shape(AlphanumericCode),
        FieldSpec::new(
            "make_model",
            ["Make / Model", "Make/Model", "Make & Model", "Vehicle Make", "Make"],
        )
        .with_shape(FreeText),
        FieldSpec::new("engine_number", ["Engine Number", "Engine No.", "Engine No"])
            .with_shape(AlphanumericCode),
        FieldSpec::new("chassis_number", ["Chassis Number", "Chassis No.", "Chassis No"])
            .with_shape(AlphanumericCode),
        FieldSpec::new(
            "year_of_manufacture",
            ["Year of Manufacture", "Manufacturing Year", "Mfg. Year", "Mfg Year"],
        )
        .with_shape(AlphanumericCode),
        FieldSpec::new(
            "insured_declared_value",
            ["Insured Declared Value", "Total IDV", "IDV"],
        )
        .with_shape(Currency),
        FieldSpec::new(
            "policy_start_date",
            [
                "Policy Start Date",
                "Period of Insurance From",
                "Risk Start Date",
                "Start Date",
                "Valid From",
            ],
        )
        .with_shape(Date),
        FieldSpec::new(
            "policy_end_date",
            [
                "Policy End Date",
                "Policy Expiry Date",
                "Risk End Date",
                "Expiry Date",
                "End Date",
                "Valid Till",
                "Valid Upto",
            ],
        )
        .with_shape(Date),
        FieldSpec::new(
            "issue_date",
            ["Date of Issue", "Issue Date", "Policy Issued On", "Issued On"],
        )
        .with_shape(Date),
        FieldSpec::new(
            "own_damage_premium",
            ["Own Damage Premium", "Total OD Premium", "OD Premium"],
        )
        .with_shape(Currency),
        FieldSpec::new(
            "third_party_premium",
            [
                "Third Party Premium",
                "Liability Premium",
                "Total TP Premium",
                "TP Premium",
            ],
        )
        .with_shape(Currency),
        FieldSpec::new("net_premium", ["Net Premium"]).with_shape(Currency),
        FieldSpec::new("gst", ["Total GST", "GST Amount", "GST", "IGST", "Service Tax"])
            .with_shape(Currency),
        FieldSpec::new(
            "total_premium",
            [
                "Total Premium Payable",
                "Gross Premium",
                "Final Premium",
                "Total Premium",
                "Premium Amount",
            ],
        )
        .with_shape(Currency),
        FieldSpec::new("no_claim_bonus", ["No Claim Bonus", "NCB"]).with_shape(FreeText),
        FieldSpec::new("nominee_name", ["Name of Nominee", "Nominee Name", "Nominee"])
            .with_shape(FreeText),
    ]
}
