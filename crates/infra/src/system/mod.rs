use chrono::{NaiveDate, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The calendar date used to decide which `Reminder`s are due
    fn today(&self) -> NaiveDate;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
