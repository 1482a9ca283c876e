pub mod comparator;
pub mod config;
pub mod export;
pub mod http_client;
pub mod nitty_scrape;
pub mod ranker;
pub mod records;
pub mod team;
pub mod team_sheet;
