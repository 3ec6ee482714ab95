//! Plain-text audit summary.
//!
//! Rendered from the sealed record so the summary shows exactly what the
//! digest covers.

use pa_kernel::Money;
use pa_record::AuditRecord;

use crate::error::AppResult;
use crate::exchange::ExchangeTable;

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

fn money(m: &Money, exchange: Option<&ExchangeTable>) -> AppResult<String> {
    let local = format!("{} {:.0}", m.currency, m.amount);
    match exchange {
        Some(table) if table.report_currency() != &m.currency => {
            let converted = table.convert(m)?;
            Ok(format!("{local} ({} {:.2})", converted.currency, converted.amount))
        }
        _ => Ok(local),
    }
}

/// Summary of one record, optionally restating amounts through `exchange`.
pub fn render_summary(record: &AuditRecord, exchange: Option<&ExchangeTable>) -> AppResult<String> {
    let p = record.payload();
    let d = &p.diagnosis;
    let e = &p.efficiency;
    let f = &p.financial;

    let mut lines = vec![RULE.to_string(), "PUMP ENERGY AUDIT".to_string()];
    if let Some(ctx) = &p.context {
        lines.push(format!("Station: {} | Auditor: {}", ctx.station_id, ctx.auditor));
    }
    lines.push(format!(
        "Reading: {} | Generated: {}",
        p.reading.timestamp.format("%Y-%m-%d %H:%M UTC"),
        record.generated_at().format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(THIN_RULE.to_string());

    if let Some(a) = &p.assessment {
        let severity = a.severity;
        lines.push("1. SUMMARY".to_string());
        lines.push(format!("   Status:       {} [{}]", a.status, severity));
        lines.push(format!("   Reason:       {}", a.reason));
        lines.push(format!("   Action:       {}", a.status.recommended_action()));
        lines.push(format!("   Plan:         {}", severity.action_plan()));
        lines.push(String::new());
    }

    lines.push("2. EFFICIENCY".to_string());
    if let Some(h) = &p.hydraulic {
        lines.push(format!("   Flow rate:    {:.1} m3/h", h.flow_rate_m3_h));
        lines.push(format!("   Head:         {:.1} m", h.head_m));
    }
    lines.push(format!("   Load:         {:.1}%", e.load_fraction * 100.0));
    lines.push(format!("   Motor eff:    {:.1}%", e.motor_efficiency * 100.0));
    lines.push(format!("   Pump eff:     {:.1}%", e.hydraulic_efficiency * 100.0));
    lines.push(format!(
        "   Wire-to-water: {:.1}%  (benchmark {:.1}%)",
        e.combined_efficiency * 100.0,
        e.benchmark_efficiency * 100.0
    ));
    lines.push(String::new());

    lines.push("3. ELECTRICAL".to_string());
    lines.push(format!(
        "   Voltage:      {:.1} V ({:+.1}% of nominal)",
        d.mean_voltage_v, d.voltage_deviation_pct
    ));
    lines.push(format!("   Imbalance:    {:.1}%", d.imbalance_pct));
    if let Some(m) = &p.motor {
        lines.push(format!("   Input power:  {:.1} kW", m.input_power_kw));
    }
    let faults: Vec<&str> = d
        .faults
        .iter()
        .chain(e.flags.iter())
        .map(|k| k.label())
        .collect();
    if !faults.is_empty() {
        lines.push(format!("   Faults:       {}", faults.join(", ")));
    }
    lines.push(String::new());

    lines.push("4. FINANCIAL (per year)".to_string());
    if let Some(c) = &p.operating_cost {
        lines.push(format!("   Energy:       {:.0} kWh", c.energy_kwh));
        lines.push(format!("   OpEx:         {}", money(&c.cost, exchange)?));
        lines.push(format!("   Carbon:       {:.2} t CO2", c.co2_tonnes));
    }
    lines.push(format!("   Wasted:       {:.0} kWh", f.wasted_energy_kwh));
    lines.push(format!("   Waste cost:   {}", money(&f.cost, exchange)?));
    lines.push(THIN_RULE.to_string());

    lines.push(format!("Digest:    {}", record.digest()));
    match record.signature() {
        Some(sig) => lines.push(format!("Signature: {sig}")),
        None => lines.push("Signature: (unsigned)".to_string()),
    }
    lines.push(RULE.to_string());

    Ok(lines.join("\n"))
}
