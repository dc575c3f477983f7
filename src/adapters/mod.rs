/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// the cluster API client, the manifest directory store, formatters and
/// presenters.
pub mod outbound;
