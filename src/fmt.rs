/// Minor units (fen) to major units (yuan).
pub fn major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}

/// The amount as iCost expects it in the `金额` column: plain, two decimals.
pub fn csv_amount(val: f64) -> String {
    format!("{val:.2}")
}

/// Summary-table rendering of a yuan total, e.g. `¥3,280.00`.
pub fn money(yuan: f64) -> String {
    let fixed = format!("{:.2}", yuan.abs());
    let (whole, fen) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if yuan < 0.0 { "-" } else { "" };
    format!("{sign}¥{grouped}.{fen}")
}

pub fn format_bytes(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
