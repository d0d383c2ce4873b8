//! End-to-end selection behavior against an in-memory catalog.

mod common;

use common::{
    MemoryCatalog, controller, ids, malformed_body, network_error, selected, server_error,
    wait_for_request,
};
use gallery_core::{ExtensionOutcome, FillOutcome, SelectionPhase, parse_target};

#[tokio::test]
async fn test_target_fills_across_pages_in_order() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    let outcome = controller.on_target_submitted(23);
    assert_eq!(
        outcome,
        FillOutcome::NeedsExtension {
            generation: 1,
            remaining: 13
        }
    );

    let report = controller.wait_for_extension().await.unwrap();
    assert_eq!(report.outcome, ExtensionOutcome::Satisfied);
    assert_eq!(report.added, 13);

    assert_eq!(selected(&controller), (1..=23).collect::<Vec<_>>());
    assert_eq!(controller.frame().phase, SelectionPhase::Satisfied);
}

#[tokio::test]
async fn test_target_larger_than_catalog_exhausts() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(1000);
    let report = controller.wait_for_extension().await.unwrap();

    assert_eq!(report.outcome, ExtensionOutcome::Exhausted);
    assert_eq!(selected(&controller).len(), 25);

    let frame = controller.frame();
    assert_eq!(frame.phase, SelectionPhase::Exhausted);
    assert_eq!(frame.target_size, 1000);
}

#[tokio::test]
async fn test_extension_pages_increase_by_one() {
    let catalog = MemoryCatalog::new(95);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(80);
    let report = controller.wait_for_extension().await.unwrap();

    assert_eq!(report.pages_fetched, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(catalog.requests(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[tokio::test]
async fn test_repeated_target_is_idempotent() {
    for target in [5, 10, 17, 25] {
        let catalog = MemoryCatalog::new(25);
        let mut controller = controller(&catalog, 10);
        controller.on_page_change(0, 10).await;

        controller.on_target_submitted(target);
        controller.wait_for_extension().await;
        let first = selected(&controller);

        controller.on_target_submitted(target);
        controller.wait_for_extension().await;
        let second = selected(&controller);

        assert_eq!(first, second, "target {target}");
        assert_eq!(first.len(), target);
    }
}

#[tokio::test]
async fn test_shrinking_target_is_deterministic() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    let page = controller.items().to_vec();
    controller.on_selection_toggled(&page);
    assert_eq!(selected(&controller).len(), 10);

    controller.on_target_submitted(3);
    let first = selected(&controller);
    controller.on_target_submitted(3);
    let second = selected(&controller);

    assert_eq!(first, vec![1, 2, 3]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_manual_deselect_is_local_to_page() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);

    controller.on_page_change(0, 10).await;
    let page1 = controller.items()[..5].to_vec();
    controller.on_selection_toggled(&page1);

    controller.on_page_change(1, 10).await;
    let page2 = controller.items()[..3].to_vec();
    controller.on_selection_toggled(&page2);
    assert_eq!(selected(&controller).len(), 8);

    controller.on_selection_toggled(&page2[..2]);
    let after = selected(&controller);
    assert_eq!(after.len(), 7);
    assert!((1..=5).all(|id| after.contains(&id)));
    assert!(!after.contains(&13));
}

#[tokio::test]
async fn test_invalid_targets_change_nothing() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    assert_eq!(controller.on_target_submitted(0), FillOutcome::Rejected);
    for input in ["-4", "abc", "4.5", " "] {
        assert_eq!(parse_target(input), None, "{input:?}");
    }

    let frame = controller.frame();
    assert_eq!(frame.selected_count, 0);
    assert_eq!(frame.target_size, 0);
    assert_eq!(frame.phase, SelectionPhase::Idle);
    assert!(!controller.is_extending());
}

#[tokio::test]
async fn test_navigation_continues_outstanding_target() {
    // Page 3 fails, so the first extension stops short at 20 rows.
    let catalog = MemoryCatalog::failing_on(25, &[3]);
    let mut controller = controller(&catalog, 5);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(22);
    let report = controller.wait_for_extension().await.unwrap();
    assert_eq!(report.outcome, ExtensionOutcome::Exhausted);
    assert_eq!(selected(&controller).len(), 20);

    // Switching to 5 rows per page lands on rows 21-25, which tops up the target.
    controller.on_page_change(4, 5).await;
    assert_eq!(ids(controller.items()), vec![21, 22, 23, 24, 25]);
    assert_eq!(selected(&controller).len(), 22);
    assert!(controller.wait_for_extension().await.is_none());
    assert_eq!(controller.frame().phase, SelectionPhase::Satisfied);
}

#[tokio::test]
async fn test_new_target_cancels_running_extension() {
    let catalog = MemoryCatalog::gated_from(25, 2);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(15);
    wait_for_request(&catalog, 2).await;

    // Shrinking supersedes the run blocked on page 2.
    assert_eq!(controller.on_target_submitted(3), FillOutcome::Satisfied);
    catalog.release(10);

    let report = controller.wait_for_extension().await.unwrap();
    assert_eq!(report.outcome, ExtensionOutcome::Superseded);
    assert_eq!(report.added, 0);
    assert_eq!(selected(&controller), vec![1, 2, 3]);
    assert_eq!(controller.frame().phase, SelectionPhase::Satisfied);
}

#[tokio::test]
async fn test_navigation_supersedes_older_extension() {
    let catalog = MemoryCatalog::gated_from(25, 3);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(25);
    wait_for_request(&catalog, 3).await;
    assert_eq!(selected(&controller).len(), 20);

    // Page 2 is already selected; the refill restarts the walk at page 3.
    controller.on_page_change(1, 10).await;
    assert_eq!(controller.selection().with(|s| s.generation()), 2);

    catalog.release(10);
    let report = controller.wait_for_extension().await.unwrap();

    assert_eq!(report.outcome, ExtensionOutcome::Satisfied);
    assert_eq!(report.pages_fetched, vec![2]);
    assert_eq!(selected(&controller), (1..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_frame_projects_visible_selection() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;
    controller.on_target_submitted(12);
    controller.wait_for_extension().await;

    controller.on_page_change(1, 10).await;
    let frame = controller.frame();

    assert_eq!(frame.cursor.first, 10);
    assert_eq!(frame.total_count, 25);
    assert!(!frame.loading);
    assert_eq!(frame.notice, None);
    assert_eq!(ids(&frame.selected_on_page), vec![11, 12]);
    assert_eq!(frame.selected_count, 12);
}

#[tokio::test]
async fn test_frame_reports_loading_while_page_is_in_flight() {
    let catalog = MemoryCatalog::gated_from(25, 2);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;
    assert!(!controller.frame().loading);

    let load = controller.begin_page_change(1, 10).unwrap();
    assert_eq!(load.cursor().first, 10);
    let task = tokio::spawn(load.run());
    wait_for_request(&catalog, 2).await;

    let frame = controller.frame();
    assert!(frame.loading);
    assert!(frame.items.is_empty());
    assert_eq!(frame.cursor.page, 1);

    catalog.release(1);
    let fetched = task.await.unwrap();
    assert!(controller.finish_page_change(fetched));

    let frame = controller.frame();
    assert!(!frame.loading);
    assert_eq!(ids(&frame.items), (11..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_page_load_for_earlier_position_is_dropped() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);

    let first = controller.begin_page_change(0, 10).unwrap();
    let second = controller.begin_page_change(2, 10).unwrap();

    assert!(!controller.finish_page_change(first.run().await));
    assert!(controller.is_loading());
    assert!(controller.items().is_empty());

    assert!(controller.finish_page_change(second.run().await));
    assert!(!controller.is_loading());
    assert_eq!(ids(controller.items()), vec![21, 22, 23, 24, 25]);
}

#[tokio::test]
async fn test_zero_rows_page_change_is_ignored() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(1, 10).await;

    assert!(controller.begin_page_change(0, 0).is_none());
    controller.on_page_change(0, 0).await;

    assert_eq!(controller.cursor().page, 1);
    assert_eq!(catalog.requests(), vec![2]);
}

#[tokio::test]
async fn test_navigation_far_past_the_end_is_recovered() {
    let catalog = MemoryCatalog::new(25);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;
    controller.on_target_submitted(1000);
    controller.wait_for_extension().await;
    let requested = catalog.requests();

    for page in [usize::MAX / 2, usize::MAX] {
        controller.on_page_change(page, 10).await;
        controller.wait_for_extension().await;

        let frame = controller.frame();
        assert_eq!(frame.cursor.first, usize::MAX);
        assert!(frame.items.is_empty());
        assert!(!frame.loading);
        assert_eq!(frame.total_count, 0);
        assert!(frame.notice.is_some());
        assert_eq!(frame.phase, SelectionPhase::Exhausted);
    }

    // Offsets that cannot be represented never reach the catalog.
    assert_eq!(catalog.requests(), requested);
    assert_eq!(selected(&controller).len(), 25);
}

#[tokio::test]
async fn test_failed_page_load_carries_notice() {
    let catalog = MemoryCatalog::failing_on(25, &[2]);
    let mut controller = controller(&catalog, 10);

    controller.on_page_change(1, 10).await;
    let frame = controller.frame();
    assert!(frame.items.is_empty());
    assert_eq!(frame.total_count, 0);
    assert_eq!(frame.notice, Some(network_error().user_message()));

    controller.on_page_change(0, 10).await;
    assert_eq!(controller.frame().notice, None);
}

#[tokio::test]
async fn test_malformed_page_ends_extension_as_exhausted() {
    let catalog = MemoryCatalog::failing_with(25, &[2], malformed_body);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(15);
    let report = controller.wait_for_extension().await.unwrap();

    assert_eq!(report.outcome, ExtensionOutcome::Exhausted);
    assert_eq!(report.pages_fetched, vec![1]);
    assert_eq!(selected(&controller), (1..=10).collect::<Vec<_>>());
    assert_eq!(controller.frame().phase, SelectionPhase::Exhausted);
}

#[tokio::test]
async fn test_server_error_keeps_partial_selection() {
    let catalog = MemoryCatalog::failing_with(35, &[3], server_error);
    let mut controller = controller(&catalog, 10);
    controller.on_page_change(0, 10).await;

    controller.on_target_submitted(25);
    let report = controller.wait_for_extension().await.unwrap();

    assert_eq!(report.outcome, ExtensionOutcome::Exhausted);
    assert_eq!(report.pages_fetched, vec![1, 2]);
    assert_eq!(report.added, 10);
    assert_eq!(selected(&controller), (1..=20).collect::<Vec<_>>());

    let frame = controller.frame();
    assert_eq!(frame.phase, SelectionPhase::Exhausted);
    assert_eq!(frame.target_size, 25);
}
