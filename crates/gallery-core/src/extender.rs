//! Auto-extender - background page walk that tops up the selection.

use crate::catalog::PageSource;
use crate::fetcher::PageFetcher;
use crate::model::SelectionPhase;
use crate::selection::SharedSelection;

/// Parameters of one extension run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRequest {
    /// Zero-based index of the first page to fetch.
    pub start_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Rows still missing.
    pub remaining: usize,
    /// Generation captured when the run was requested.
    pub generation: u64,
}

/// How an extension run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// The target was reached.
    Satisfied,
    /// The catalog ran out of rows first.
    Exhausted,
    /// A newer fill took over; the last fetched page was discarded.
    Superseded,
}

/// Summary of a finished extension run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionReport {
    /// How the run ended.
    pub outcome: ExtensionOutcome,
    /// Zero-based page indices fetched, in order.
    pub pages_fetched: Vec<usize>,
    /// Rows added to the selection.
    pub added: usize,
}

/// Walks forward from `request.start_page` until the target is met.
///
/// Each page is fetched without holding the store; the harvested ids are
/// merged under the lock only if `request.generation` is still current.
/// The walk also stops once the last page announced by the catalog total
/// has been consumed.
pub async fn extend<S: PageSource>(
    fetcher: &PageFetcher<S>,
    selection: &SharedSelection,
    request: ExtensionRequest,
) -> ExtensionReport {
    let ExtensionRequest {
        start_page,
        page_size,
        mut remaining,
        generation,
    } = request;

    let mut report = ExtensionReport {
        outcome: ExtensionOutcome::Satisfied,
        pages_fetched: Vec::new(),
        added: 0,
    };

    tracing::info!(start_page, remaining, generation, "Extending selection");

    let mut page = start_page;
    while remaining > 0 {
        let fetched = fetcher.fetch(page.saturating_add(1), page_size).await;
        report.pages_fetched.push(page);

        if fetched.page.is_empty() {
            report.outcome = finish(selection, generation, SelectionPhase::Exhausted);
            tracing::info!(
                page,
                added = report.added,
                failed = fetched.is_failure(),
                "Catalog exhausted before target"
            );
            return report;
        }

        let merged = selection.with(|store| {
            store.merge_extension(generation, fetched.page.ids(), remaining)
        });
        let Some(added) = merged else {
            tracing::debug!(page, generation, "Discarding superseded extension page");
            report.outcome = ExtensionOutcome::Superseded;
            return report;
        };

        report.added += added;
        remaining -= added;

        let consumed = page.saturating_add(1).saturating_mul(page_size);
        let last_page = fetched.total_count > 0 && consumed >= fetched.total_count;
        if remaining > 0 && last_page {
            report.outcome = finish(selection, generation, SelectionPhase::Exhausted);
            tracing::info!(page, added = report.added, "Reached last catalog page before target");
            return report;
        }

        page = page.saturating_add(1);
    }

    report.outcome = finish(selection, generation, SelectionPhase::Satisfied);
    tracing::info!(
        pages = report.pages_fetched.len(),
        added = report.added,
        "Selection target reached"
    );
    report
}

fn finish(selection: &SharedSelection, generation: u64, phase: SelectionPhase) -> ExtensionOutcome {
    let current = selection.with(|store| store.finish_extension(generation, phase));
    match (current, phase) {
        (false, _) => ExtensionOutcome::Superseded,
        (true, SelectionPhase::Exhausted) => ExtensionOutcome::Exhausted,
        (true, _) => ExtensionOutcome::Satisfied,
    }
}
