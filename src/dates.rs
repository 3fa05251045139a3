use chrono::NaiveDateTime;

pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Renders a stored timestamp the way it is shown to API clients.
pub fn format_date(value: NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_day_first() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap();
        assert_eq!(format_date(value), "07/03/2024 09:05:30");
    }
}
