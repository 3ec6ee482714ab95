use chrono::{TimeZone, Utc};
use pa_curves::{EfficiencyClass, PoleCount};
use pa_kernel::{CurrencyCode, KernelConfig, NameplateSpec, TariffContext};
use pa_project::*;
use std::collections::BTreeMap;

fn project() -> AuditProject {
    AuditProject {
        version: LATEST_VERSION,
        site: SiteDef {
            station_id: "WTP-2".to_string(),
            auditor: "R. Okello".to_string(),
            location: None,
        },
        nameplate: NameplateSpec {
            rated_power_kw: 75.0,
            rated_voltage_v: 415.0,
            rated_current_a: 128.0,
            poles: PoleCount::Two,
            rated_speed_rpm: 2970.0,
            efficiency_class: EfficiencyClass::IE2,
        },
        tariff: TariffContext {
            rate_per_kwh: 18.4,
            currency: CurrencyCode::new("KES").unwrap(),
            operating_hours_per_year: 8000.0,
            co2_kg_per_kwh: 0.1,
        },
        settings: KernelConfig::default(),
        readings: vec![
            ReadingDef {
                id: "r1".to_string(),
                electrical: ElectricalDef::ThreePhase {
                    currents_a: [110.2, 111.0, 109.7],
                    voltages_v: [414.0, 416.5, 415.2],
                },
                discharge_pressure_bar: 6.4,
                flow_rate_m3_h: 260.0,
                suction_pressure_bar: Some(0.2),
                power_factor: Some(0.89),
                timestamp: Utc.with_ymd_and_hms(2026, 1, 20, 7, 0, 0).unwrap(),
            },
            ReadingDef {
                id: "r2".to_string(),
                electrical: ElectricalDef::SinglePhase {
                    current_a: 101.3,
                    voltage_v: 413.0,
                },
                discharge_pressure_bar: 6.9,
                flow_rate_m3_h: 230.0,
                suction_pressure_bar: None,
                power_factor: None,
                timestamp: Utc.with_ymd_and_hms(2026, 1, 20, 15, 30, 0).unwrap(),
            },
        ],
        exchange_rates: Some(ExchangeRatesDef {
            report_currency: CurrencyCode::new("USD").unwrap(),
            rates: BTreeMap::from([(CurrencyCode::new("KES").unwrap(), 0.0077)]),
        }),
    }
}

#[test]
fn roundtrip_yaml() {
    let project = project();
    let path = std::env::temp_dir().join("pa_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = project();
    let path = std::env::temp_dir().join("pa_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("pa_project_roundtrip.toml");
    assert!(matches!(load(&path), Err(ProjectError::UnsupportedFormat { .. })));
}

#[test]
fn single_phase_reading_fills_every_phase() {
    let project = project();
    let reading = project.reading("r2").unwrap().to_field_reading();
    assert_eq!(reading.currents_a, [101.3; 3]);
    assert_eq!(reading.voltages_v, [413.0; 3]);
    assert_eq!(reading.power_factor, None);
}

#[test]
fn three_phase_reading_keeps_optional_fields() {
    let project = project();
    let reading = project.reading("r1").unwrap().to_field_reading();
    assert_eq!(reading.suction_pressure_bar, Some(0.2));
    assert_eq!(reading.power_factor, Some(0.89));
    assert_eq!(reading.differential_pressure_bar(), 6.4 - 0.2);
}
