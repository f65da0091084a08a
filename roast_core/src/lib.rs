pub mod ai;
pub mod analysis;
pub mod birdeye;
pub mod helpers;
