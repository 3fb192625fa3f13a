pub mod cache;
pub mod commands;
pub mod factory;
pub mod finance;
pub mod services;

pub use cache::AccountCache;
pub use finance::Finance;
