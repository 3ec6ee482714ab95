use chrono::{TimeZone, Utc};
use pa_curves::{CurveLibrary, EfficiencyClass, PoleCount};
use pa_kernel::{
    AuditOutcome, CurrencyCode, FieldReading, KernelConfig, NameplateSpec, TariffContext, run_audit,
};
use pa_record::{
    Assembler, AuditContext, AuditRecord, RecordError, SigningKey, canonical_bytes, digest_hex,
    verify,
};
use proptest::prelude::*;

fn spec() -> NameplateSpec {
    NameplateSpec {
        rated_power_kw: 55.0,
        rated_voltage_v: 400.0,
        rated_current_a: 98.0,
        poles: PoleCount::Two,
        rated_speed_rpm: 2960.0,
        efficiency_class: EfficiencyClass::IE2,
    }
}

fn reading(currents: [f64; 3]) -> FieldReading {
    FieldReading {
        currents_a: currents,
        voltages_v: [398.0, 401.0, 400.0],
        discharge_pressure_bar: 6.1,
        flow_rate_m3_h: 180.0,
        suction_pressure_bar: Some(0.4),
        power_factor: Some(0.88),
        timestamp: Utc.with_ymd_and_hms(2026, 6, 12, 14, 5, 0).unwrap(),
    }
}

fn outcome(r: &FieldReading) -> AuditOutcome {
    let tariff = TariffContext {
        rate_per_kwh: 0.21,
        currency: CurrencyCode::new("EUR").unwrap(),
        operating_hours_per_year: 7200.0,
        co2_kg_per_kwh: 0.35,
    };
    run_audit(&spec(), r, &tariff, &KernelConfig::default(), CurveLibrary::standard()).unwrap()
}

fn key() -> SigningKey {
    SigningKey::from_text("utility-district-7-audit-key").unwrap()
}

fn record(assembler: &Assembler, currents: [f64; 3]) -> AuditRecord {
    let r = reading(currents);
    let out = outcome(&r);
    assembler.assemble_outcome(&spec(), &r, &out).unwrap()
}

/// Re-parse after editing the JSON form, as a hostile consumer would.
fn edited(record: &AuditRecord, edit: impl FnOnce(&mut serde_json::Value)) -> AuditRecord {
    let mut value = serde_json::to_value(record).unwrap();
    edit(&mut value);
    serde_json::from_value(value).unwrap()
}

#[test]
fn identical_inputs_identical_digest() {
    let a = record(&Assembler::new(), [88.0, 89.0, 88.5]);
    let b = record(&Assembler::new(), [88.0, 89.0, 88.5]);
    assert_eq!(a.digest(), b.digest());
    assert_eq!(
        canonical_bytes(a.payload()).unwrap(),
        canonical_bytes(b.payload()).unwrap()
    );
}

#[test]
fn core_assemble_matches_stage_outputs() {
    let r = reading([88.0, 89.0, 88.5]);
    let out = outcome(&r);
    let rec = Assembler::new()
        .assemble(&spec(), &r, &out.diagnosis, &out.efficiency, &out.financial)
        .unwrap();
    assert!(rec.payload().assessment.is_none());
    assert_eq!(rec.payload().efficiency, out.efficiency);
    assert_eq!(rec.digest(), digest_hex(&canonical_bytes(rec.payload()).unwrap()));
    verify(&rec, None).unwrap();
}

#[test]
fn one_hundredth_of_an_amp_changes_the_digest() {
    let a = record(&Assembler::new(), [88.0, 89.0, 88.5]);
    let b = record(&Assembler::new(), [88.01, 89.0, 88.5]);
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn json_round_trip_still_verifies() {
    let rec = record(&Assembler::new().with_key(key()), [88.0, 89.0, 88.5]);
    let text = rec.to_json_pretty().unwrap();
    let back = AuditRecord::from_json(&text).unwrap();
    assert_eq!(back, rec);
    verify(&back, Some(&key())).unwrap();
}

#[test]
fn edited_figure_is_detected() {
    let rec = record(&Assembler::new(), [88.0, 89.0, 88.5]);
    let forged = edited(&rec, |v| {
        v["payload"]["financial"]["wasted_energy_kwh"] = serde_json::json!(0.0);
    });
    assert!(matches!(verify(&forged, None), Err(RecordError::DigestMismatch { .. })));
}

#[test]
fn re_digested_forgery_fails_the_signature() {
    let rec = record(&Assembler::new().with_key(key()), [88.0, 89.0, 88.5]);
    let mut forged = edited(&rec, |v| {
        v["payload"]["reading"]["currents_a"][0] = serde_json::json!(70.0);
    });
    let digest = digest_hex(&canonical_bytes(forged.payload()).unwrap());
    forged = edited(&forged, |v| v["digest"] = serde_json::json!(digest));

    verify(&forged, None).unwrap();
    assert!(matches!(verify(&forged, Some(&key())), Err(RecordError::SignatureMismatch)));
}

#[test]
fn backdated_record_fails_the_signature() {
    let rec = record(&Assembler::new().with_key(key()), [88.0, 89.0, 88.5]);
    let forged = edited(&rec, |v| {
        v["generated_at"] = serde_json::json!("2020-01-01T00:00:00Z");
    });
    verify(&forged, None).unwrap();
    assert!(matches!(verify(&forged, Some(&key())), Err(RecordError::SignatureMismatch)));
}

#[test]
fn unsigned_record_fails_keyed_verification() {
    let rec = record(&Assembler::new(), [88.0, 89.0, 88.5]);
    assert!(!rec.is_signed());
    assert!(matches!(verify(&rec, Some(&key())), Err(RecordError::MissingSignature)));
}

#[test]
fn context_is_covered_by_the_digest() {
    let ctx = |station: &str| AuditContext {
        station_id: station.to_string(),
        auditor: "J. Mwakyusa".to_string(),
    };
    let a = record(&Assembler::new().with_context(ctx("BH-04")), [88.0, 89.0, 88.5]);
    let b = record(&Assembler::new().with_context(ctx("BH-05")), [88.0, 89.0, 88.5]);
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn injected_fields_are_rejected() {
    let rec = record(&Assembler::new().with_key(key()), [88.0, 89.0, 88.5]);

    let mut value = serde_json::to_value(&rec).unwrap();
    value["payload"]["verdict"] = serde_json::json!("PASS - no waste detected");
    let text = serde_json::to_string(&value).unwrap();
    assert!(AuditRecord::from_json(&text).is_err());

    let mut value = serde_json::to_value(&rec).unwrap();
    value["payload"]["financial"]["waste_cost_override"] = serde_json::json!(0.0);
    let text = serde_json::to_string(&value).unwrap();
    assert!(AuditRecord::from_json(&text).is_err());

    let mut value = serde_json::to_value(&rec).unwrap();
    value["approved_by"] = serde_json::json!("regional office");
    let text = serde_json::to_string(&value).unwrap();
    assert!(AuditRecord::from_json(&text).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_current_change_changes_the_digest(phase in 0usize..3, delta in 0.01_f64..2.0) {
        let base = [88.0, 89.0, 88.5];
        let mut moved = base;
        moved[phase] += delta;
        let a = record(&Assembler::new(), base);
        let b = record(&Assembler::new(), moved);
        prop_assert_ne!(a.digest(), b.digest());
    }
}
