pub mod bias;
pub mod curve;
pub mod pricing;
pub mod regions;
