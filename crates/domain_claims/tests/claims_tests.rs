//! Integration tests for domain_claims

use std::collections::BTreeSet;
use std::sync::Barrier;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, DocumentId};

use domain_claims::status::{self, DEFAULT_BADGE_CLASS, DEFAULT_ICON};
use domain_claims::{ClaimAction, ClaimError, ClaimLineInput, ClaimStatus, ClaimsStore, SubmissionMode};

use test_utils::{
    assert_all_in_status, assert_newest_first, assert_step, assert_validation_fields,
    hours_strategy, status_strategy, valid_submission_strategy, ClaimBuilder, DocumentFixtures,
    LecturerFixtures, LineFixtures, SubmissionBuilder,
};

fn store_with(statuses: &[ClaimStatus]) -> ClaimsStore {
    let store = ClaimsStore::new();
    for &status in statuses {
        store.add_claim(ClaimBuilder::new().with_status(status).build());
    }
    store
}

// ============================================================================
// Store Tests
// ============================================================================

mod store_tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let store = ClaimsStore::new();

        let ids: Vec<ClaimId> = (0..5)
            .map(|_| store.add_claim(ClaimBuilder::new().build()).id)
            .collect();

        assert_eq!(ids[0], ClaimId::new(1));
        assert!(ids.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn test_lookup_returns_stored_fields() {
        let store = ClaimsStore::new();
        let added = store.add_claim(
            ClaimBuilder::new()
                .with_lecturer(LecturerFixtures::other_lecturer())
                .build(),
        );

        let found = store.get_claim_by_id(added.id).unwrap();
        assert_eq!(found.lecturer_id, LecturerFixtures::other_lecturer());
        assert_eq!(found.total_hours, dec!(12));
        assert_eq!(found.amount.amount(), dec!(6000));
        assert_eq!(found.lines.len(), 3);
    }

    #[test]
    fn test_lookup_of_unassigned_id_is_not_found() {
        let store = store_with(&[ClaimStatus::Submitted]);

        assert!(matches!(
            store.get_claim_by_id(ClaimId::new(99)),
            Err(ClaimError::ClaimNotFound(id)) if id == ClaimId::new(99)
        ));
    }

    #[test]
    fn test_inboxes_partition_by_status() {
        let store = store_with(&[
            ClaimStatus::Draft,
            ClaimStatus::Submitted,
            ClaimStatus::Verified,
            ClaimStatus::Submitted,
            ClaimStatus::Approved,
            ClaimStatus::Verified,
            ClaimStatus::Rejected,
        ]);

        let coordinator = store.get_pending_for_coordinator();
        assert_eq!(coordinator.len(), 2);
        assert_all_in_status(&coordinator, ClaimStatus::Submitted);
        assert_newest_first(&coordinator);

        let manager = store.get_pending_for_manager();
        assert_eq!(manager.len(), 2);
        assert_all_in_status(&manager, ClaimStatus::Verified);
        assert_newest_first(&manager);

        let all = store.get_all_claims();
        assert_eq!(all.len(), 7);
        assert_newest_first(&all);
    }

    #[test]
    fn test_status_change_moves_claim_between_inboxes() {
        let store = store_with(&[ClaimStatus::Submitted]);
        let id = ClaimId::new(1);

        store.verify_claim(id, "Hours match timetable").unwrap();

        assert!(store.get_pending_for_coordinator().is_empty());
        assert_eq!(store.get_pending_for_manager()[0].id, id);
    }

    #[test]
    fn test_claims_for_lecturer() {
        let store = ClaimsStore::new();
        store.add_claim(ClaimBuilder::new().build());
        store.add_claim(
            ClaimBuilder::new()
                .with_lecturer(LecturerFixtures::other_lecturer())
                .build(),
        );
        store.add_claim(ClaimBuilder::new().build());

        let mine = store.claims_for_lecturer(LecturerFixtures::lecturer());
        let ids: Vec<u64> = mine.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}

// ============================================================================
// Transition Tests
// ============================================================================

mod transition_tests {
    use super::*;

    #[test]
    fn test_verify_submitted_claim() {
        let store = store_with(&[ClaimStatus::Submitted]);

        let claim = store.verify_claim(ClaimId::new(1), "Checked").unwrap();

        assert_eq!(claim.status, ClaimStatus::Verified);
        assert_eq!(claim.review_comment.as_deref(), Some("Checked"));
        assert_eq!(
            store.get_claim_by_id(ClaimId::new(1)).unwrap().status,
            ClaimStatus::Verified
        );
    }

    #[test]
    fn test_approve_verified_claim() {
        let store = store_with(&[ClaimStatus::Verified]);

        let claim = store.approve_claim(ClaimId::new(1), "").unwrap();

        assert_eq!(claim.status, ClaimStatus::Approved);
        assert!(claim.review_comment.is_none());
    }

    #[test]
    fn test_reject_submitted_claim() {
        let store = store_with(&[ClaimStatus::Submitted]);

        let claim = store
            .reject_claim(ClaimId::new(1), "Hours exceed timetable")
            .unwrap();

        assert_eq!(claim.status, ClaimStatus::Rejected);
        assert_eq!(claim.history.len(), 1);
        assert_eq!(claim.history[0].from, ClaimStatus::Submitted);
    }

    #[test]
    fn test_reject_requires_comment() {
        let store = store_with(&[ClaimStatus::Submitted]);

        let err = store.reject_claim(ClaimId::new(1), "   ").unwrap_err();

        assert_validation_fields(&err, &["comment"]);
        assert_eq!(
            store.get_claim_by_id(ClaimId::new(1)).unwrap().status,
            ClaimStatus::Submitted
        );
    }

    #[test]
    fn test_approving_draft_is_rejected() {
        let store = store_with(&[ClaimStatus::Draft]);

        let err = store.approve_claim(ClaimId::new(1), "").unwrap_err();

        assert!(matches!(
            err,
            ClaimError::InvalidTransition {
                from: ClaimStatus::Draft,
                action: ClaimAction::Approve
            }
        ));
        assert_eq!(err.to_string(), "Cannot approve a claim that is Draft");
    }

    #[test]
    fn test_transition_on_unknown_claim() {
        let store = ClaimsStore::new();

        assert!(matches!(
            store.verify_claim(ClaimId::new(7), ""),
            Err(ClaimError::ClaimNotFound(_))
        ));
    }

    #[test]
    fn test_full_lifecycle_records_history() {
        let store = ClaimsStore::new();
        let claim = store
            .submit(SubmissionBuilder::new().build(), SubmissionMode::SaveDraft)
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Draft);

        store.submit_claim(claim.id).unwrap();
        store.verify_claim(claim.id, "ok").unwrap();
        store.approve_claim(claim.id, "ok").unwrap();
        let settled = store.settle_claim(claim.id, Some("EFT-2025-03")).unwrap();

        assert_eq!(settled.status, ClaimStatus::Settled);
        let path: Vec<ClaimStatus> = settled.history.iter().map(|change| change.to).collect();
        assert_eq!(
            path,
            vec![
                ClaimStatus::Submitted,
                ClaimStatus::Verified,
                ClaimStatus::Approved,
                ClaimStatus::Settled,
            ]
        );
    }

    #[test]
    fn test_terminal_claims_accept_no_action() {
        let store = store_with(&[ClaimStatus::Rejected, ClaimStatus::Settled]);

        for id in [ClaimId::new(1), ClaimId::new(2)] {
            assert!(store.submit_claim(id).is_err());
            assert!(store.verify_claim(id, "").is_err());
            assert!(store.approve_claim(id, "").is_err());
            assert!(store.reject_claim(id, "late").is_err());
            assert!(store.settle_claim(id, None).is_err());
        }
    }
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_submission_drops_blank_rows() {
        let store = ClaimsStore::new();
        let submission = SubmissionBuilder::new()
            .add_line(LineFixtures::blank_row())
            .with_notes("Week 4")
            .build();

        let claim = store.submit(submission, SubmissionMode::Submit).unwrap();

        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert_eq!(claim.lines.len(), 3);
        assert_eq!(claim.amount.amount(), dec!(6000));
        assert_eq!(claim.additional_notes.as_deref(), Some("Week 4"));
    }

    #[test]
    fn test_invalid_submission_reports_every_field() {
        let store = ClaimsStore::new();
        let submission = SubmissionBuilder::new()
            .with_month(13)
            .with_year(2019)
            .with_hourly_rate(dec!(0))
            .build();

        let err = store.submit(submission, SubmissionMode::Submit).unwrap_err();

        assert_validation_fields(&err, &["month", "year", "hourly_rate"]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_submission_keeps_sub_cent_precision() {
        let store = ClaimsStore::new();
        let fractional = SubmissionBuilder::new()
            .with_hourly_rate(dec!(0.333))
            .with_lines(vec![ClaimLineInput::new("Marking", dec!(0.333))])
            .build();
        let long_rate = SubmissionBuilder::new()
            .with_hourly_rate(dec!(100.00005))
            .with_lines(vec![ClaimLineInput::new("Lecture", dec!(10))])
            .build();

        let fractional = store.submit(fractional, SubmissionMode::Submit).unwrap();
        let long_rate = store.submit(long_rate, SubmissionMode::Submit).unwrap();

        assert_eq!(fractional.amount.amount(), dec!(0.110889));
        assert_eq!(long_rate.hourly_rate.amount(), dec!(100.00005));
        assert_eq!(long_rate.amount.amount(), dec!(1000.0005));
        assert_eq!(long_rate.amount.to_string(), "R 1000.00");
    }

    #[test]
    fn test_submission_with_only_blank_rows() {
        let submission = SubmissionBuilder::new()
            .with_lines(vec![LineFixtures::blank_row()])
            .build();

        let err = submission.into_claim(SubmissionMode::Submit).unwrap_err();

        assert_validation_fields(&err, &["lines"]);
    }
}

// ============================================================================
// Status Projection Tests
// ============================================================================

mod projection_tests {
    use super::*;

    #[test]
    fn test_submitted_projection() {
        let view = status::project(&ClaimBuilder::new().build());

        assert_eq!(view.progress_percentage, 25);
        assert_eq!(view.status_text, "Pending Verification");
        assert_eq!(view.status_color, "primary");
        assert_eq!(view.steps.len(), 4);
        assert_step(&view, "Submitted", true, true);
        assert_step(&view, "Verified", false, false);
    }

    #[test]
    fn test_approved_projection() {
        let view = status::project(
            &ClaimBuilder::new()
                .with_status(ClaimStatus::Approved)
                .build(),
        );

        assert_eq!(view.progress_percentage, 75);
        let completed: Vec<&str> = view.completed_steps().map(|step| step.name).collect();
        assert_eq!(completed, vec!["Submitted", "Verified", "Approved"]);
        assert_step(&view, "Approved", true, true);
        assert_step(&view, "Settled", false, false);
    }

    #[test]
    fn test_rejected_projection() {
        let view = status::project(
            &ClaimBuilder::new()
                .with_status(ClaimStatus::Rejected)
                .build(),
        );

        assert_eq!(view.steps.len(), 5);
        let last = view.steps.last().unwrap();
        assert_eq!(last.name, "Rejected");
        assert!(last.is_completed && last.is_current);

        assert_step(&view, "Submitted", true, false);
        assert_step(&view, "Verified", false, false);
        assert_step(&view, "Approved", false, false);
        assert_step(&view, "Settled", false, false);
    }

    #[test]
    fn test_draft_projection_has_nothing_completed() {
        let view = status::project_status(ClaimId::new(1), ClaimStatus::Draft);

        assert_eq!(view.progress_percentage, 0);
        assert_eq!(view.completed_steps().count(), 0);
        assert!(view.current_step().is_none());
    }

    #[test]
    fn test_lookups_are_total() {
        for status in ClaimStatus::ALL {
            assert!(status.badge_class().starts_with("bg-"));
            assert!(!status.icon().is_empty());
            assert_eq!(status::badge_class_for(status.name()), status.badge_class());
            assert_eq!(status::icon_for(status.name()), status.icon());
        }

        assert_eq!(status::badge_class_for("Archived"), DEFAULT_BADGE_CLASS);
        assert_eq!(status::icon_for("Archived"), DEFAULT_ICON);
    }
}

// ============================================================================
// Document Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_add_document_to_known_claim() {
        let store = store_with(&[ClaimStatus::Submitted]);
        let id = ClaimId::new(1);

        let document = store.add_document(id, DocumentFixtures::timesheet()).unwrap();

        let claim = store.get_claim_by_id(id).unwrap();
        assert_eq!(claim.documents.len(), 1);
        assert_eq!(claim.document_named("timesheet.pdf").unwrap().id, document.id);
    }

    #[test]
    fn test_add_document_to_unknown_claim_has_no_effect() {
        let store = store_with(&[ClaimStatus::Submitted]);

        let result = store.add_document(ClaimId::new(2), DocumentFixtures::timesheet());

        assert!(matches!(result, Err(ClaimError::ClaimNotFound(_))));
        assert!(store.get_claim_by_id(ClaimId::new(1)).unwrap().documents.is_empty());
    }

    #[test]
    fn test_remove_after_add_leaves_no_documents() {
        let store = store_with(&[ClaimStatus::Submitted]);
        let id = ClaimId::new(1);
        let document = store.add_document(id, DocumentFixtures::timesheet()).unwrap();

        store.remove_document(id, document.id).unwrap();

        assert!(store.get_claim_by_id(id).unwrap().documents.is_empty());
    }

    #[test]
    fn test_document_ids_are_not_reused() {
        let store = store_with(&[ClaimStatus::Submitted]);
        let id = ClaimId::new(1);

        let first = store.add_document(id, DocumentFixtures::timesheet()).unwrap();
        store.remove_document(id, first.id).unwrap();
        let second = store.add_document(id, DocumentFixtures::register()).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_remove_unknown_document() {
        let store = store_with(&[ClaimStatus::Submitted]);

        let err = store
            .remove_document(ClaimId::new(1), DocumentId::new(5))
            .unwrap_err();

        assert!(matches!(err, ClaimError::DocumentNotFound { .. }));
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

mod concurrency_tests {
    use super::*;

    #[test]
    fn test_concurrent_adds_get_contiguous_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let store = ClaimsStore::new();

        let ids: BTreeSet<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        (0..PER_THREAD)
                            .map(|_| store.add_claim(ClaimBuilder::new().build()).id.value())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });

        let total = (THREADS * PER_THREAD) as u64;
        assert_eq!(ids.len() as u64, total);
        assert_eq!(ids.iter().copied().collect::<Vec<_>>(), (1..=total).collect::<Vec<_>>());
    }

    #[test]
    fn test_racing_reviewers_have_one_winner() {
        const REVIEWERS: usize = 4;

        let store = store_with(&[ClaimStatus::Submitted]);
        let id = ClaimId::new(1);
        let barrier = Barrier::new(REVIEWERS);

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..REVIEWERS)
                .map(|n| {
                    let store = &store;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        store.verify_claim(id, &format!("Reviewer {n}"))
                    })
                })
                .collect();

            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        for err in results.iter().filter_map(|result| result.as_ref().err()) {
            assert!(matches!(
                err,
                ClaimError::InvalidTransition {
                    from: ClaimStatus::Verified,
                    action: ClaimAction::Verify
                }
            ));
        }

        let claim = store.get_claim_by_id(id).unwrap();
        assert_eq!(claim.status, ClaimStatus::Verified);
        assert_eq!(claim.history.len(), 1);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_valid_submissions_are_stored_with_next_id(
            submissions in prop::collection::vec(valid_submission_strategy(), 1..10)
        ) {
            let store = ClaimsStore::new();
            let mut last = 0u64;

            for submission in submissions {
                let rate = submission.hourly_rate;
                let expected_amount = submission.total_amount();
                let claim = store.submit(submission, SubmissionMode::Submit).unwrap();

                prop_assert!(claim.id.value() > last);
                prop_assert_eq!(claim.hourly_rate.amount(), rate);
                prop_assert_eq!(claim.amount.amount(), expected_amount);
                prop_assert_eq!(
                    claim.amount.amount(),
                    claim.total_hours * claim.hourly_rate.amount()
                );
                last = claim.id.value();
            }
        }

        #[test]
        fn prop_projection_is_consistent(status in status_strategy()) {
            let view = status::project_status(ClaimId::new(1), status);

            let expected_len = if status == ClaimStatus::Rejected { 5 } else { 4 };
            prop_assert_eq!(view.steps.len(), expected_len);
            prop_assert!(view.steps.iter().filter(|step| step.is_current).count() <= 1);
            prop_assert_eq!(view.progress_percentage, status.progress_percentage());
            for step in &view.steps {
                prop_assert!(!step.is_current || step.is_completed);
            }
        }

        #[test]
        fn prop_line_hours_sum_to_total(hours in prop::collection::vec(hours_strategy(), 1..6)) {
            let lines = hours
                .iter()
                .map(|h| ClaimLineInput::new("Lecture", *h))
                .collect();
            let submission = SubmissionBuilder::new().with_lines(lines).build();

            let claim = submission.into_claim(SubmissionMode::Submit).unwrap();

            prop_assert_eq!(claim.total_hours, hours.iter().copied().sum::<Decimal>());
        }
    }
}
