//! compliance-inspect - inspect compliance-operator results
//!
//! Resolves a `ComplianceCheckResult` back to the `Rule` that produced it by
//! walking the ownership chain the operator leaves behind
//! (result -> scan -> suite -> binding) and then matching the scan against
//! the profiles bound in the `ScanSettingBinding`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`lineage`): unstructured objects, identities and the
//!   resolution services
//! - **Application Layer** (`application`): the view-result use case, DTOs
//!   and read models
//! - **Ports** (`ports`): interfaces for the object store, progress and output
//! - **Adapters** (`adapters`): cluster API client, manifest directory store,
//!   formatters and presenters
//! - **Config** (`config`): kubeconfig loading
//! - **Shared** (`shared`): error types and filesystem checks
//!
//! # Example
//!
//! ```no_run
//! use compliance_inspect::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let store = ManifestObjectStore::load_dir(Path::new("must-gather/compliance"))?;
//! let rule = LineageResolver::new(&store, "openshift-compliance")
//!     .resolve_rule("ocp4-cis-etcd-unique-ca")?;
//! println!("{}", rule.name());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod lineage;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, ManifestObjectStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::adapters::outbound::network::KubeApiObjectStore;
    pub use crate::application::dto::{OutputFormat, ViewResultRequest, ViewResultResponse};
    pub use crate::application::read_models::{ResultView, ResultViewBuilder};
    pub use crate::application::use_cases::ViewResultUseCase;
    pub use crate::lineage::domain::{Resource, ResourceKind, ScanIdentity};
    pub use crate::lineage::services::{Lineage, LineageResolver, MatchPolicy};
    pub use crate::ports::outbound::{
        ObjectStore, OutputPresenter, ProgressReporter, ResultFormatter,
    };
    pub use crate::shared::error::{ExitCode, LineageError};
    pub use crate::shared::Result;
}
