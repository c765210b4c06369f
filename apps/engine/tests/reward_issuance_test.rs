mod common;

use bingo_engine::db::with_txn;
use bingo_engine::domain::month_floor;
use bingo_engine::repos::rewards;
use bingo_engine::RewardService;

#[tokio::test]
async fn issue_is_idempotent_per_user_month() {
    let db = common::test_db().await;
    let config = common::test_config();
    let month = month_floor(config.today());
    let user_id = 3;

    let card = common::seed_card(&db, user_id, month, common::row_major_cells()).await;
    let line_types = vec![
        "row-0".to_string(),
        "col-0".to_string(),
        "diagonal-main".to_string(),
    ];

    let service = RewardService::new();
    let first = service
        .issue(&db, user_id, card.id, month, &line_types, common::now())
        .await
        .unwrap();

    // Every repeated threshold-crossing detection returns the same row.
    for _ in 0..5 {
        let again = service
            .issue(&db, user_id, card.id, month, &line_types, common::now())
            .await
            .unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.line_types, first.line_types);
        assert_eq!(again.issued_at, first.issued_at);
    }

    let stored = rewards::find_by_user_and_month(&db, user_id, month)
        .await
        .unwrap()
        .expect("reward row exists");
    assert_eq!(stored.id, first.id);
}

#[tokio::test]
async fn rewards_are_independent_per_user() {
    let db = common::test_db().await;
    let config = common::test_config();
    let month = month_floor(config.today());
    let line_types = vec!["row-1".to_string()];

    let service = RewardService::new();
    let card_a = common::seed_card(&db, 1, month, common::row_major_cells()).await;
    let card_b = common::seed_card(&db, 2, month, common::row_major_cells()).await;

    let a = service
        .issue(&db, 1, card_a.id, month, &line_types, common::now())
        .await
        .unwrap();
    let b = service
        .issue(&db, 2, card_b.id, month, &line_types, common::now())
        .await
        .unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn losing_insert_race_returns_existing_row() {
    let db = common::test_db().await;
    let config = common::test_config();
    let month = month_floor(config.today());
    let user_id = 4;
    let card = common::seed_card(&db, user_id, month, common::row_major_cells()).await;

    // Simulate the race loser: the row already exists when insert runs.
    let winner = match rewards::insert_reward(
        &db,
        user_id,
        card.id,
        month,
        &["row-2".to_string()],
        common::now(),
    )
    .await
    .unwrap()
    {
        rewards::RewardInsert::Inserted(reward) => reward,
        other => panic!("expected fresh insert, got {other:?}"),
    };

    // The losing insert is a no-op, not an error.
    let loser_insert = rewards::insert_reward(
        &db,
        user_id,
        card.id,
        month,
        &["row-2".to_string()],
        common::now(),
    )
    .await
    .unwrap();
    assert_eq!(loser_insert, rewards::RewardInsert::AlreadyIssued);

    // The service path falls back to the winner's row.
    let issued = RewardService::new()
        .issue(
            &db,
            user_id,
            card.id,
            month,
            &["row-2".to_string()],
            common::now(),
        )
        .await
        .unwrap();
    assert_eq!(issued.id, winner.id);
}

#[tokio::test]
async fn losing_race_inside_a_transaction_keeps_it_usable() {
    let db = common::test_db().await;
    let config = common::test_config();
    let month = month_floor(config.today());
    let user_id = 6;
    let card = common::seed_card(&db, user_id, month, common::row_major_cells()).await;
    let card_id = card.id;

    let winner = match rewards::insert_reward(
        &db,
        user_id,
        card_id,
        month,
        &["row-3".to_string()],
        common::now(),
    )
    .await
    .unwrap()
    {
        rewards::RewardInsert::Inserted(reward) => reward,
        other => panic!("expected fresh insert, got {other:?}"),
    };

    // Issue inside a transaction, as the claim flow does. The (user_id,
    // month) conflict must not abort it: later statements on the same
    // transaction still have to succeed, and the issue call must hand back
    // the winner's row rather than an error.
    let issued = with_txn(&db, |txn| {
        Box::pin(async move {
            let issued = RewardService::new()
                .issue(txn, user_id, card_id, month, &["row-3".to_string()], common::now())
                .await?;
            let reread = rewards::find_by_user_and_month(txn, user_id, month).await?;
            assert_eq!(reread.map(|r| r.id), Some(issued.id));
            Ok(issued)
        })
    })
    .await
    .unwrap();
    assert_eq!(issued.id, winner.id);
}
