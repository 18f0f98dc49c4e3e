// UI layer: turns the typed API results into label/value rows and renders
// them as a left-aligned, bordered table on stdout. Also owns the spinner
// shown while a request is in flight.

use crate::api::{CustomerInfo, LoyaltyPointsInfo, RemainingDaysInfo, UsageInfo};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A single table row: display label and already-formatted value.
pub type Row = (String, String);

fn row(label: &str, value: impl ToString) -> Row {
    (label.to_string(), value.to_string())
}

/// Profile info in rows format.
pub fn profile_rows(v: &CustomerInfo) -> Vec<Row> {
    let c = &v.customer;
    vec![
        row("Customer name", &c.customer_name),
        row("Customer number", &c.customer_number),
        row("Email address", &c.email_address),
        row("Mobile number", &c.mobile_number),
        row("ADSL number", c.adsl_number),
        row("ADSL area code", c.adsl_area_code),
        row("ADSL speed", &c.adsl_speed),
        row("City", &c.city),
        row("District", &c.district),
    ]
}

/// Usage info in rows format.
pub fn usage_rows(v: &UsageInfo) -> Vec<Row> {
    let u = &v.adsl_usage;
    vec![
        row("Start date", u.start_date),
        row("Quota", format!("{} GB", u.quota)),
        row("Total Used", format!("{} GB", u.total_used)),
    ]
}

/// Remaining days info in rows format.
pub fn days_rows(v: &RemainingDaysInfo) -> Vec<Row> {
    let d = &v.remaining_days;
    vec![
        row("Expiry date", &d.adsl_expiry_date),
        row("Amount due", d.amount_due),
        row("Package name", &d.package_name),
        row("Remaining day", d.remaining_days),
    ]
}

/// 4U points info in rows format.
pub fn points_rows(v: &LoyaltyPointsInfo) -> Vec<Row> {
    vec![row("4U points", v.loyalty_points)]
}

/// Render rows as a two-column ASCII table:
///
/// ```text
/// +---------------+----------+
/// | Quota         | 140 GB   |
/// | Total Used    | 72.5 GB  |
/// +---------------+----------+
/// ```
pub fn render_table(rows: &[Row]) {
    if rows.is_empty() {
        return;
    }
    let label_w = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let value_w = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    let border = format!(
        "+-{}-+-{}-+",
        "-".repeat(label_w),
        "-".repeat(value_w)
    );

    println!("{}", border);
    for (label, value) in rows {
        println!("| {:<lw$} | {:<vw$} |", label, value, lw = label_w, vw = value_w);
    }
    println!("{}", border);
}

/// Spinner shown while an HTTP round trip is in progress. The caller is
/// responsible for `finish_and_clear()` once the call returns.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_fixture() -> UsageInfo {
        serde_json::from_str(
            r#"{"adslUsage":{"startDate":1514764800,"quata":140.5,"totalUsed":72.25}}"#,
        )
        .unwrap()
    }

    #[test]
    fn usage_rows_carry_gb_suffix() {
        let rows = usage_rows(&usage_fixture());
        assert_eq!(rows[0], ("Start date".to_string(), "1514764800".to_string()));
        assert_eq!(rows[1], ("Quota".to_string(), "140.5 GB".to_string()));
        assert_eq!(rows[2], ("Total Used".to_string(), "72.25 GB".to_string()));
    }

    #[test]
    fn profile_rows_keep_display_order() {
        let info: CustomerInfo = serde_json::from_str(
            r#"{"customerInformationDto":{
                "customerName":"John Doe",
                "customerNumber":"11223344",
                "emailAddress":"john@example.com",
                "mobileNumber1WithPrefix":"01001234567",
                "adslNumber":33445566,
                "adslAreaCode":2,
                "adslSpeed":"Speed_16MB",
                "cityEN":"Cairo",
                "districtEN":"Nasr City"
            }}"#,
        )
        .unwrap();
        let rows = profile_rows(&info);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Customer name",
                "Customer number",
                "Email address",
                "Mobile number",
                "ADSL number",
                "ADSL area code",
                "ADSL speed",
                "City",
                "District",
            ]
        );
        assert_eq!(rows[1].1, "11223344");
    }
}
