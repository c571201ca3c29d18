use chrono::NaiveDate;
use srsforge::RawInput;

pub const EXAMPLE_PROJECT: &str = "Smart Attendance Management System";

pub fn example_input() -> RawInput {
    RawInput::new(
        EXAMPLE_PROJECT,
        "A responsive web application to automate college attendance using QR codes and \
         real-time dashboards for faculty and students.",
        vec!["Vraj Adhia".into(), "John Doe".into(), "Jane Smith".into()],
    )
    .expect("three members are within the cap")
}

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}
