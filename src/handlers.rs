pub mod goals;
pub mod rewards;
pub mod sales;
pub mod uploads;
