pub mod get_daily_status;
