use crate::application::dto::{parse_target_frameworks, ChangeLog, ReplayRequest, ReplayResponse};
use crate::ports::inbound::SnapshotReplayPort;
use crate::ports::outbound::{ChangeLogReader, ProgressReporter};
use crate::shared::Result;
use crate::snapshot_engine::domain::{
    DependenciesSnapshot, SnapshotEnvironment, SubtreeProviderRegistry, TargetFramework,
};
use crate::snapshot_engine::filters::FilterPipeline;
use std::sync::Arc;

/// ReplayChangesUseCase - Folds a recorded change log into a dependencies snapshot
///
/// Each batch of the change log goes through `DependenciesSnapshot::from_changes`
/// exactly as an evaluation update would, so the final snapshot is what a
/// consumer subscribed to the project would have seen last.
///
/// # Type Parameters
/// * `R` - ChangeLogReader implementation
/// * `P` - ProgressReporter implementation
pub struct ReplayChangesUseCase<R, P> {
    change_log_reader: R,
    progress_reporter: P,
    subtree_providers: SubtreeProviderRegistry,
}

impl<R, P> ReplayChangesUseCase<R, P>
where
    R: ChangeLogReader,
    P: ProgressReporter,
{
    pub fn new(
        change_log_reader: R,
        progress_reporter: P,
        subtree_providers: SubtreeProviderRegistry,
    ) -> Self {
        Self {
            change_log_reader,
            progress_reporter,
            subtree_providers,
        }
    }

    pub fn subtree_providers(&self) -> &SubtreeProviderRegistry {
        &self.subtree_providers
    }

    fn apply_batches(
        &self,
        change_log: &ChangeLog,
        filters: &FilterPipeline,
    ) -> Result<ReplayResponse> {
        let project_item_specs = change_log.project_item_spec_set();
        let environment = SnapshotEnvironment::new(filters, &self.subtree_providers)
            .with_project_item_specs(project_item_specs.as_ref());

        let log_target_frameworks = change_log
            .target_frameworks
            .as_deref()
            .map(parse_target_frameworks);
        let log_active = change_log
            .active_target_framework
            .as_deref()
            .map(TargetFramework::new);

        let mut snapshot = Arc::new(DependenciesSnapshot::empty(change_log.project_path.as_str()));
        let mut published = 0;

        if change_log.batches.is_empty() {
            if let Some(target_frameworks) = &log_target_frameworks {
                let next = DependenciesSnapshot::set_targets(
                    &snapshot,
                    target_frameworks,
                    log_active.as_ref(),
                )?;
                if !Arc::ptr_eq(&snapshot, &next) {
                    published += 1;
                }
                snapshot = next;
            }
        }

        let total = change_log.batches.len();
        for (index, batch) in change_log.batches.iter().enumerate() {
            let changed_target_framework = batch.target_framework();
            let changes = batch.to_changes()?;
            let catalogs = batch.catalog_snapshot().map(Arc::new);
            let target_frameworks = batch
                .target_frameworks
                .as_deref()
                .map(parse_target_frameworks)
                .or_else(|| log_target_frameworks.clone());
            let active = batch
                .active_target_framework
                .as_deref()
                .map(TargetFramework::new)
                .or_else(|| log_active.clone())
                .or_else(|| {
                    // first target seen becomes active when nothing names one
                    snapshot
                        .active_target_framework()
                        .is_empty()
                        .then(|| changed_target_framework.clone())
                });

            tracing::debug!(
                batch = index + 1,
                target_framework = %changed_target_framework,
                added = changes.as_ref().map_or(0, |c| c.added().len()),
                removed = changes.as_ref().map_or(0, |c| c.removed().len()),
                "Applying change batch"
            );

            let next = DependenciesSnapshot::from_changes(
                &change_log.project_path,
                &snapshot,
                &changed_target_framework,
                changes.as_ref(),
                catalogs,
                target_frameworks.as_deref(),
                active.as_ref(),
                &environment,
            )?;

            if Arc::ptr_eq(&snapshot, &next) {
                tracing::trace!(batch = index + 1, "Batch left the snapshot unchanged");
            } else {
                published += 1;
            }
            snapshot = next;

            self.progress_reporter.report_progress(
                index + 1,
                total,
                Some(&format!("batch for {}", changed_target_framework)),
            );
        }

        Ok(ReplayResponse::new(snapshot, total, published))
    }
}

impl<R, P> SnapshotReplayPort for ReplayChangesUseCase<R, P>
where
    R: ChangeLogReader,
    P: ProgressReporter,
{
    fn replay(&self, request: ReplayRequest) -> Result<ReplayResponse> {
        let filters = FilterPipeline::standard().without(&request.disabled_filters)?;
        if !request.disabled_filters.is_empty() {
            self.progress_reporter.report(&format!(
                "🚫 Disabled filter(s): {}",
                request.disabled_filters.join(", ")
            ));
        }

        self.progress_reporter.report(&format!(
            "📖 Loading change log from: {}",
            request.change_log_path.display()
        ));
        let change_log = self
            .change_log_reader
            .read_change_log(&request.change_log_path)?;
        self.progress_reporter.report(&format!(
            "✅ Loaded {} batch(es) for {}",
            change_log.batches.len(),
            change_log.project_path
        ));

        let response = self.apply_batches(&change_log, &filters)?;

        self.progress_reporter.report_completion(&format!(
            "Replayed {} batch(es), {} snapshot(s) published",
            response.batches_applied, response.snapshots_published
        ));
        Ok(response)
    }
}
