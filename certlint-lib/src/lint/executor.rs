//! Running a selection of lints against certificates.

use super::base::Lint;
use super::config::RunConfig;
use super::report::Report;
use super::result::{LintResult, CHECK_PANICKED, LINT_PANICKED};
use super::selector::Selection;
use crate::{Certificate, CertlintError};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that stops a run from scheduling further work.
///
/// Clones share the same flag. Lints already executing finish normally;
/// the certificate they belong to is reported as [`CertlintError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Evaluates certificates against a fixed [`Selection`].
///
/// Lints of one certificate run in parallel, as do certificates of a batch.
/// Each worker produces its own verdict and the verdicts are merged into the
/// [`Report`] once every lint has finished, so output never depends on
/// scheduling.
pub struct Executor<'r> {
    lints: Vec<&'r Lint>,
    reference_time: Option<i64>,
    pool: Option<rayon::ThreadPool>,
}

impl<'r> Executor<'r> {
    /// Build an executor. With `workers` set, a dedicated pool of that many
    /// threads is started; otherwise rayon's global pool is used.
    pub fn new(selection: Selection<'r>, config: &RunConfig) -> Result<Self, CertlintError> {
        let pool = match config.workers {
            Some(0) => return Err(CertlintError::InvalidWorkerCount),
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("certlint-worker-{i}"))
                    .build()
                    .map_err(|e| CertlintError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            lints: selection.lints().to_vec(),
            reference_time: config.reference_time.map(|t| t.unix_timestamp()),
            pool,
        })
    }

    /// Number of lints each certificate is checked against.
    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    /// Lint one certificate. The report holds a verdict for every selected lint.
    pub fn lint(&self, cert: &Certificate) -> Report {
        let at = self.window_time(cert);
        let results = self.install(|| {
            self.lints
                .par_iter()
                .map(|lint| (lint.name().to_string(), evaluate(lint, cert, at)))
                .collect::<Vec<_>>()
        });
        Report::from_results(results)
    }

    /// Lint one certificate, stopping early if `cancel` fires.
    ///
    /// A cancelled run never yields a partial report.
    pub fn lint_cancellable(
        &self,
        cert: &Certificate,
        cancel: &CancelToken,
    ) -> Result<Report, CertlintError> {
        if cancel.is_cancelled() {
            return Err(CertlintError::Cancelled);
        }
        let at = self.window_time(cert);
        let results = self.install(|| {
            self.lints
                .par_iter()
                .map(|lint| {
                    if cancel.is_cancelled() {
                        None
                    } else {
                        Some((lint.name().to_string(), evaluate(lint, cert, at)))
                    }
                })
                .collect::<Option<Vec<_>>>()
        });
        match results {
            Some(results) if !cancel.is_cancelled() => Ok(Report::from_results(results)),
            _ => Err(CertlintError::Cancelled),
        }
    }

    /// Lint many certificates. Outcomes are returned in input order; once
    /// `cancel` fires, every certificate not yet finished is `Cancelled`.
    pub fn lint_batch(
        &self,
        certs: &[Certificate],
        cancel: &CancelToken,
    ) -> Vec<Result<Report, CertlintError>> {
        self.install(|| {
            certs
                .par_iter()
                .map(|cert| self.lint_cancellable(cert, cancel))
                .collect()
        })
    }

    fn window_time(&self, cert: &Certificate) -> i64 {
        self.reference_time.unwrap_or(cert.not_before.timestamp)
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl std::fmt::Debug for Executor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("lints", &self.lints.len())
            .field("reference_time", &self.reference_time)
            .field(
                "workers",
                &self.pool.as_ref().map(rayon::ThreadPool::current_num_threads),
            )
            .finish()
    }
}

/// Verdict of one lint for one certificate, with `at` as the window time.
fn evaluate(lint: &Lint, cert: &Certificate, at: i64) -> LintResult {
    if !lint.metadata().is_effective_at(at) {
        return LintResult::not_applicable();
    }
    match guarded(lint.name(), || lint.check_applies(cert)) {
        Ok(true) => {}
        Ok(false) => return LintResult::not_applicable(),
        Err(message) => return LintResult::fatal(format!("{CHECK_PANICKED}{message}")),
    }
    guarded(lint.name(), || lint.execute(cert))
        .unwrap_or_else(|message| LintResult::fatal(format!("{LINT_PANICKED}{message}")))
}

/// Run `f`, turning a panic into its message.
fn guarded<T>(name: &str, f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::warn!(lint = name, panic = %message, "lint panicked");
        message
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn panic_messages_are_extracted() {
        let err = guarded::<()>("e_test", || panic!("static message")).unwrap_err();
        assert_eq!(err, "static message");

        let err = guarded::<()>("e_test", || panic!("formatted {}", 42)).unwrap_err();
        assert_eq!(err, "formatted 42");

        assert_eq!(guarded("e_test", || 7).unwrap(), 7);
    }

    #[test]
    fn cancel_token_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
