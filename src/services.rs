pub mod aggregator;
pub mod band_table;
pub mod goal_service;
pub mod ingestion_service;
pub mod reward_engine;
pub mod rewards_service;
pub mod row_normalizer;
pub mod sales_service;
pub mod spreadsheet;
