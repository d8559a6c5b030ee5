pub mod verbose;
pub mod yaml;
