pub mod goals;
pub mod period;
pub mod rewards;
pub mod sales;
pub mod unit;
