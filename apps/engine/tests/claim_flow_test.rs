mod common;

use bingo_engine::domain::month_floor;
use bingo_engine::repos::claims;
use bingo_engine::{ClaimOutcome, ClaimService, DomainError, NotFoundKind, ValidationKind};
use time::Duration;

#[tokio::test]
async fn claim_happy_path_then_duplicate() {
    let db = common::test_db().await;
    let config = common::test_config();
    let service = ClaimService::new();
    let today = config.today();
    let user_id = 1;

    common::seed_card(&db, user_id, month_floor(today), common::row_major_cells()).await;
    common::seed_daily_number(&db, today, 13).await;

    let outcome = service
        .claim_daily_number(&db, &config, user_id, None)
        .await
        .unwrap();
    let result = match outcome {
        ClaimOutcome::Claimed(r) => r,
        other => panic!("expected Claimed, got {other:?}"),
    };
    assert_eq!(result.number, 13);
    assert!(result.is_on_card);
    assert_eq!(result.line_count, 0);
    assert!(result.line_types.is_empty());
    assert!(!result.has_reward);
    assert!(result.reward.is_none());

    // Retry: the constraint, not a prior read, reports the duplicate.
    let retry = service
        .claim_daily_number(&db, &config, user_id, None)
        .await
        .unwrap();
    assert_eq!(retry, ClaimOutcome::AlreadyClaimed);

    // The claim row count for (user, day) never exceeds 1.
    let count = claims::count_for_user_and_date(&db, user_id, today)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn claim_fails_without_daily_number() {
    let db = common::test_db().await;
    let config = common::test_config();
    let today = config.today();

    common::seed_card(&db, 1, month_floor(today), common::row_major_cells()).await;

    let err = ClaimService::new()
        .claim_daily_number(&db, &config, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::DailyNumber, _)
    ));
}

#[tokio::test]
async fn claim_fails_without_card() {
    let db = common::test_db().await;
    let config = common::test_config();
    let today = config.today();

    common::seed_daily_number(&db, today, 7).await;

    let err = ClaimService::new()
        .claim_daily_number(&db, &config, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Card, _)));
}

#[tokio::test]
async fn claim_rejects_backdating_and_preclaiming() {
    let db = common::test_db().await;
    let config = common::test_config();
    let today = config.today();
    let service = ClaimService::new();

    common::seed_card(&db, 1, month_floor(today), common::row_major_cells()).await;
    common::seed_daily_number(&db, today, 7).await;

    for date in [today - Duration::days(1), today + Duration::days(1)] {
        let err = service
            .claim_daily_number(&db, &config, 1, Some(date))
            .await
            .unwrap_err();
        assert!(
            matches!(
                err,
                DomainError::Validation(ValidationKind::ClaimWindow, _)
            ),
            "date {date}: got {err:?}"
        );
    }
}

#[tokio::test]
async fn claim_records_number_not_on_card() {
    let db = common::test_db().await;
    let config = common::test_config();
    let today = config.today();

    common::seed_card(&db, 1, month_floor(today), common::row_major_cells()).await;
    common::seed_daily_number(&db, today, 99).await;

    let outcome = ClaimService::new()
        .claim_daily_number(&db, &config, 1, None)
        .await
        .unwrap();
    let result = match outcome {
        ClaimOutcome::Claimed(r) => r,
        other => panic!("expected Claimed, got {other:?}"),
    };
    assert_eq!(result.number, 99);
    assert!(!result.is_on_card);
    assert_eq!(result.line_count, 0);

    // The day still counts as claimed.
    let count = claims::count_for_user_and_date(&db, 1, today).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn completing_main_diagonal_reports_one_line_no_reward() {
    let db = common::test_db().await;
    let config = common::test_config();
    let today = config.today();
    let user_id = 5;

    let card = common::seed_card(&db, user_id, month_floor(today), common::row_major_cells()).await;
    // Accumulated on previous days: all of the main diagonal except 25.
    for (i, n) in [1, 7, 13, 19].iter().enumerate() {
        common::seed_claim(&db, user_id, card.id, today - Duration::days(i as i64 + 1), *n).await;
    }
    common::seed_daily_number(&db, today, 25).await;

    let outcome = ClaimService::new()
        .claim_daily_number(&db, &config, user_id, None)
        .await
        .unwrap();
    let result = match outcome {
        ClaimOutcome::Claimed(r) => r,
        other => panic!("expected Claimed, got {other:?}"),
    };
    assert_eq!(result.line_count, 1);
    assert_eq!(result.line_types, vec!["diagonal-main".to_string()]);
    assert!(!result.has_reward);
}

#[tokio::test]
async fn third_line_issues_reward_and_further_claim_is_duplicate() {
    let db = common::test_db().await;
    let config = common::test_config();
    let service = ClaimService::new();
    let today = config.today();
    let user_id = 9;

    let card = common::seed_card(&db, user_id, month_floor(today), common::row_major_cells()).await;
    // Row 0, column 0, and the main diagonal are 13 distinct numbers; seed
    // all but 25 across previous days.
    let accumulated = [1, 2, 3, 4, 5, 6, 11, 16, 21, 7, 13, 19];
    for (i, n) in accumulated.iter().enumerate() {
        common::seed_claim(&db, user_id, card.id, today - Duration::days(i as i64 + 1), *n).await;
    }
    common::seed_daily_number(&db, today, 25).await;

    let outcome = service
        .claim_daily_number(&db, &config, user_id, None)
        .await
        .unwrap();
    let result = match outcome {
        ClaimOutcome::Claimed(r) => r,
        other => panic!("expected Claimed, got {other:?}"),
    };
    assert_eq!(result.line_count, 3);
    assert!(result.has_reward);
    let reward = result.reward.expect("reward issued at threshold");
    assert_eq!(reward.user_id, user_id);
    let mut names = result.line_types.clone();
    names.sort();
    assert_eq!(names, vec!["col-0", "diagonal-main", "row-0"]);
    assert_eq!(reward.line_types, result.line_types);

    // A further same-day claim is a duplicate, and no second reward exists.
    let retry = service
        .claim_daily_number(&db, &config, user_id, None)
        .await
        .unwrap();
    assert_eq!(retry, ClaimOutcome::AlreadyClaimed);
}
