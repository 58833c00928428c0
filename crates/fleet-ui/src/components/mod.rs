pub mod chart;
pub mod header;
pub mod stat_card;
