pub mod encode;
pub mod fetch;
