pub mod chart;
pub mod home;
