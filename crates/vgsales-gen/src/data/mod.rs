pub mod datasets;
pub mod generator;
pub mod months;
pub mod seed_catalog;
