use futures::{StreamExt, stream};

use crate::core::types::{Outcome, UrlRecord};
use crate::reporting::aggregator::Aggregator;
use crate::reporting::logging;
use crate::reporting::report::Report;
use crate::ui::progress::ProgressReporter;
use crate::validation::classifier::{Classification, Classifier};
use crate::validation::context::RunContext;
use crate::validation::prober::Probe;
use crate::validation::rate_limiter::RateLimiter;

/// Drives a verification run: classifies every record, probes the ones
/// that need it through the shared rate limiter, and folds all outcomes
/// into a [`Report`].
///
/// Exempt records never reach the prober. At most `concurrency` probes
/// are in flight at once, and every dispatch goes through the same
/// limiter so the aggregate request rate does not grow with the worker
/// count.
pub struct LinkChecker<P, L> {
    classifier: Classifier,
    prober: P,
    limiter: L,
    concurrency: usize,
}

impl<P: Probe, L: RateLimiter> LinkChecker<P, L> {
    pub fn new(classifier: Classifier, prober: P, limiter: L, concurrency: usize) -> Self {
        Self {
            classifier,
            prober,
            limiter,
            concurrency: concurrency.max(1),
        }
    }

    /// Verify `records` and build the report.
    ///
    /// Records that were never dispatched because the run was cancelled, or
    /// whose probe was cut off by the deadline, are listed as unresolved
    /// and the report is marked partial.
    pub async fn run(
        &self,
        records: Vec<UrlRecord>,
        ctx: &RunContext,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Report {
        let mut aggregator = Aggregator::default();
        let mut probeable = Vec::with_capacity(records.len());

        for record in records {
            match self.classifier.classify(record.url()) {
                Classification::Exempt(reason) => {
                    let outcome = Outcome::Exempt { reason };
                    logging::log_url_outcome(record.url(), &outcome);
                    aggregator.record(record, outcome);
                }
                Classification::Probeable => probeable.push(record),
            }
        }

        let total = probeable.len();
        logging::log_probe_start(total, aggregator.len());

        if let Some(ref mut prog) = progress {
            prog.start_probing(total);
        }
        let progress_ref = progress.as_deref();

        let mut unresolved = Vec::new();
        let mut resolved = 0;

        let mut outcomes = stream::iter(probeable)
            .map(|record| async move {
                let outcome = self.check(&record, ctx, progress_ref).await;
                (record, outcome)
            })
            .buffer_unordered(self.concurrency);

        while let Some((record, outcome)) = outcomes.next().await {
            match outcome {
                Some(outcome) => {
                    logging::log_url_outcome(record.url(), &outcome);
                    if let Some(prog) = progress_ref {
                        prog.on_resolved();
                    }
                    resolved += 1;
                    aggregator.record(record, outcome);
                }
                None => unresolved.push(record),
            }
        }
        drop(outcomes);

        if let Some(prog) = progress_ref {
            prog.finish_probing(resolved, total);
        }

        if !unresolved.is_empty() {
            logging::log_warning(&format!(
                "{} URL(s) left unresolved, the report is partial",
                unresolved.len()
            ));
        }

        aggregator.into_report(unresolved)
    }

    /// Probe a single record, or `None` if the run stopped first.
    async fn check(
        &self,
        record: &UrlRecord,
        ctx: &RunContext,
        progress: Option<&ProgressReporter>,
    ) -> Option<Outcome> {
        if ctx.should_stop() {
            return None;
        }

        tokio::select! {
            biased;
            _ = ctx.stopped() => return None,
            _ = self.limiter.acquire() => {}
        }

        if let Some(prog) = progress {
            prog.on_dispatch(record.url());
        }

        // Cancellation lets an in-flight probe finish, the deadline does not
        tokio::select! {
            biased;
            _ = ctx.deadline_reached() => None,
            outcome = self.prober.probe(record.url()) => Some(outcome),
        }
    }
}
