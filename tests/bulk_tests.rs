//! Tests for one-shot bulk assignment over explicit selections.
//!
//! Verifies that:
//! - The selection interleaves deterministically with a single shared counter
//! - An empty selection is a no-op and does not fire the reload callback
//! - Partial failures leave earlier and later assignments in place
//! - The reload callback runs exactly once, after all writes were attempted


use std::sync::atomic::{AtomicUsize, Ordering};

use lead_router::assignment::bulk::assign_bulk;
use lead_router::model::{EmployeeId, Lead};
use lead_router::store::{LeadStore, MemoryLeadStore};
use lead_router::RouterError;
use test_harness::{seed_lead, FlakyLeadStore};

/// Five leads over [E1, E2] interleave as E1, E2, E1, E2, E1.
#[tokio::test]
async fn bulk_distribution_is_deterministic() {
    let store = MemoryLeadStore::new();
    let mut lead_ids = Vec::new();
    for _ in 0..5 {
        lead_ids.push(seed_lead(&store, "SEO").await);
    }
    let e1 = EmployeeId::new();
    let e2 = EmployeeId::new();

    let report = assign_bulk(&store, &lead_ids, &[e1, e2], || {}).await;
    assert_eq!(report.assigned_count(), 5);

    let expected = [e1, e2, e1, e2, e1];
    for (i, lead_id) in lead_ids.iter().enumerate() {
        assert_eq!(
            store.get(*lead_id).await.unwrap().assigned_to,
            Some(expected[i])
        );
    }
}

#[tokio::test]
async fn empty_selection_is_a_no_op() {
    let store = MemoryLeadStore::new();
    let lead = seed_lead(&store, "SEO").await;
    let reloads = AtomicUsize::new(0);

    let report = assign_bulk(&store, &[], &[EmployeeId::new()], || {
        reloads.fetch_add(1, Ordering::SeqCst);
    })
    .await;
    assert!(report.outcomes.is_empty());

    let report = assign_bulk(&store, &[lead], &[], || {
        reloads.fetch_add(1, Ordering::SeqCst);
    })
    .await;
    assert!(report.outcomes.is_empty());

    assert_eq!(reloads.load(Ordering::SeqCst), 0);
    assert!(store.get(lead).await.unwrap().is_unassigned());
}

#[tokio::test]
async fn reload_callback_fires_once_after_all_writes() {
    let store = FlakyLeadStore::new();
    let first = Lead::new("SEO");
    let second = Lead::new("SEO");
    let (id1, id2) = (first.id, second.id);
    store.insert(first).await;
    store.insert(second).await;
    store.fail_on(id1);

    let reloads = AtomicUsize::new(0);
    let report = assign_bulk(&store, &[id1, id2], &[EmployeeId::new()], || {
        reloads.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    // Fires once even when some writes failed.
    assert_eq!(reloads.load(Ordering::SeqCst), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.assigned_count(), 1);
}

#[tokio::test]
async fn partial_failure_leaves_other_assignments_in_place() {
    let store = FlakyLeadStore::new();
    let mut ids = Vec::new();
    for _ in 0..3 {
        let lead = Lead::new("Web Design");
        ids.push(lead.id);
        store.insert(lead).await;
    }
    store.fail_on(ids[1]);
    let e1 = EmployeeId::new();
    let e2 = EmployeeId::new();

    let report = assign_bulk(&store, &ids, &[e1, e2], || {}).await;

    assert_eq!(report.failed_leads(), vec![ids[1]]);
    assert_eq!(store.get(ids[0]).await.unwrap().assigned_to, Some(e1));
    assert!(store.get(ids[1]).await.unwrap().is_unassigned());
    // The shared counter still advanced past the failed slot.
    assert_eq!(store.get(ids[2]).await.unwrap().assigned_to, Some(e1));
}

/// A lead claimed by a concurrent workflow between selection and write is
/// reported as failed, and the existing assignment is preserved.
#[tokio::test]
async fn lost_race_surfaces_as_a_failed_outcome() {
    let store = MemoryLeadStore::new();
    let contested = seed_lead(&store, "SEO").await;
    let free = seed_lead(&store, "SEO").await;

    let winner = EmployeeId::new();
    store.assign(contested, winner).await.unwrap();

    let e = EmployeeId::new();
    let report = assign_bulk(&store, &[contested, free], &[e], || {}).await;

    assert_eq!(report.failed_leads(), vec![contested]);
    let reason = report.outcomes.iter().find_map(|o| match o {
        lead_router::assignment::LeadOutcome::Failed { reason, .. } => Some(reason.clone()),
        _ => None,
    });
    assert_eq!(
        reason.unwrap(),
        RouterError::LeadAlreadyAssigned(contested).to_string()
    );
    assert_eq!(store.get(contested).await.unwrap().assigned_to, Some(winner));
    assert_eq!(store.get(free).await.unwrap().assigned_to, Some(e));
}
