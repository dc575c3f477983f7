/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the lineage services and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
