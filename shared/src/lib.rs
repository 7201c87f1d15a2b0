pub mod data;
pub mod mappings;
