use crate::application::dto::{ViewResultRequest, ViewResultResponse};
use crate::lineage::domain::ResourceKind;
use crate::lineage::services::LineageResolver;
use crate::ports::outbound::{ObjectStore, ProgressReporter};
use crate::shared::Result;

const TOTAL_STEPS: usize = 2;

/// ViewResultUseCase - resolves a check result for display
///
/// Runs the lineage resolution for one ComplianceCheckResult and looks up
/// the ComplianceRemediation the operator generates under the same name.
///
/// # Type Parameters
/// * `S` - ObjectStore implementation
/// * `PR` - ProgressReporter implementation
pub struct ViewResultUseCase<S, PR> {
    store: S,
    progress_reporter: PR,
}

impl<S, PR> ViewResultUseCase<S, PR>
where
    S: ObjectStore,
    PR: ProgressReporter,
{
    pub fn new(store: S, progress_reporter: PR) -> Self {
        Self {
            store,
            progress_reporter,
        }
    }

    pub fn execute(&self, request: ViewResultRequest) -> Result<ViewResultResponse> {
        tracing::debug!(
            result = %request.result_name,
            namespace = %request.namespace,
            policy = ?request.match_policy,
            "viewing result"
        );

        self.progress_reporter.report_progress(
            1,
            TOTAL_STEPS,
            Some("Resolving result -> scan -> suite -> binding -> profile -> rule"),
        );
        let lineage = LineageResolver::new(&self.store, &request.namespace)
            .with_policy(request.match_policy)
            .resolve(&request.result_name)?;

        self.progress_reporter
            .report_progress(2, TOTAL_STEPS, Some("Looking up remediation"));
        let remediation = self.store.try_get(
            &ResourceKind::remediation(),
            &request.namespace,
            lineage.result.name(),
        )?;

        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} to rule {}",
            lineage.result.name(),
            lineage.rule.name()
        ));

        Ok(ViewResultResponse {
            lineage,
            remediation,
        })
    }
}
