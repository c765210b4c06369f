mod common;

use bingo_engine::domain::month_floor;
use bingo_engine::{ClaimOutcome, ClaimService};
use time::Duration;

#[tokio::test]
async fn status_without_card_is_empty() {
    let db = common::test_db().await;
    let config = common::test_config();
    let today = config.today();

    common::seed_daily_number(&db, today, 42).await;

    let status = ClaimService::new()
        .get_user_status(&db, &config, 1, None)
        .await
        .unwrap();
    assert!(!status.has_card);
    assert!(status.claimed_numbers.is_empty());
    assert_eq!(status.line_count, 0);
    assert!(!status.has_reward);
    assert!(!status.today_claimed);
    assert_eq!(status.today_number, Some(42));
}

#[tokio::test]
async fn status_reflects_durable_claims() {
    let db = common::test_db().await;
    let config = common::test_config();
    let service = ClaimService::new();
    let today = config.today();
    let user_id = 7;

    let card = common::seed_card(&db, user_id, month_floor(today), common::row_major_cells()).await;
    for (i, n) in [2, 3, 4, 5].iter().enumerate() {
        common::seed_claim(&db, user_id, card.id, today - Duration::days(i as i64 + 1), *n).await;
    }
    common::seed_daily_number(&db, today, 1).await;

    let before = service
        .get_user_status(&db, &config, user_id, None)
        .await
        .unwrap();
    assert!(before.has_card);
    assert_eq!(before.claimed_numbers, vec![2, 3, 4, 5]);
    assert_eq!(before.line_count, 0);
    assert!(!before.today_claimed);

    let outcome = service
        .claim_daily_number(&db, &config, user_id, None)
        .await
        .unwrap();
    assert!(matches!(outcome, ClaimOutcome::Claimed(_)));

    // Line counts are monotonically non-decreasing for sequential claims
    // because status always reads the latest durable state.
    let after = service
        .get_user_status(&db, &config, user_id, None)
        .await
        .unwrap();
    assert_eq!(after.claimed_numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(after.line_count, 1);
    assert!(after.line_count >= before.line_count);
    assert!(after.today_claimed);
    assert_eq!(after.today_number, Some(1));
}
