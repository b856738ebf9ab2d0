//! Account creation, lookup and deletion against a migrated database.

mod common;

use common::{TestHarness, TEST_COST};
use docadmin::db::entities::User;
use docadmin::db::user_repo::{self, UserCreateRequest};
use docadmin::lifecycle::Permission;
use docadmin::password::verify_password;

const TEST_ACCOUNT: &str = "test_account";
const TEST_NAME: &str = "test_user";
const TEST_PASSWORD: &str = "1234";

#[tokio::test]
async fn test_create_read_delete_user() {
    let harness = TestHarness::new().await;
    let db = &harness.db;

    // No such account before the test.
    assert!(user_repo::find_by_account(db, TEST_ACCOUNT)
        .await
        .unwrap()
        .is_none());

    let mut request = UserCreateRequest::new(TEST_ACCOUNT, TEST_PASSWORD, TEST_NAME);
    request.admin_permission = Permission::Admin;
    request.ip_list = vec!["127.0.0.1".to_string()];
    let created = user_repo::create(db, &request, TEST_COST).await.unwrap();

    let found = user_repo::find_by_account(db, TEST_ACCOUNT)
        .await
        .unwrap()
        .expect("account should exist after create");
    assert_eq!(found.user_id, created.user_id);
    assert_eq!(found.user_name.as_deref(), Some(TEST_NAME));
    assert_eq!(found.permission().unwrap(), Permission::Admin);
    assert!(found.is_admin());
    assert_eq!(found.allowed_ips(), vec!["127.0.0.1"]);
    assert_eq!(found.ip_list, r#"["127.0.0.1"]"#);
    assert_eq!(harness.count(User).await, 1);

    let stored = found.password.as_deref().unwrap();
    assert_ne!(stored, TEST_PASSWORD);
    assert!(verify_password(TEST_PASSWORD, stored).unwrap());

    let deleted = user_repo::delete_by_id(db, found.user_id).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(user_repo::find_by_account(db, TEST_ACCOUNT)
        .await
        .unwrap()
        .is_none());
    assert!(user_repo::find_by_id(db, found.user_id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(harness.count(User).await, 0);

    harness.close().await;
}

#[tokio::test]
async fn test_delete_removes_only_target_row() {
    let harness = TestHarness::new().await;
    let first = harness.create_user("first", "First").await;
    let second = harness.create_user("second", "Second").await;

    assert_eq!(
        user_repo::delete_by_id(&harness.db, first.user_id)
            .await
            .unwrap(),
        1
    );

    assert!(user_repo::find_by_id(&harness.db, second.user_id)
        .await
        .unwrap()
        .is_some());
    assert_eq!(harness.count(User).await, 1);
}

#[tokio::test]
async fn test_account_unique_even_without_precheck() {
    use docadmin::db::entities::user;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};

    let harness = TestHarness::new().await;
    harness.create_user(TEST_ACCOUNT, TEST_NAME).await;

    // Bypass the repository so only the unique index can catch it.
    let raw = user::ActiveModel {
        user_account: Set(Some(TEST_ACCOUNT.to_string())),
        user_name: Set(Some("racer".to_string())),
        ..Default::default()
    };
    assert!(raw.insert(&harness.db).await.is_err());
    assert_eq!(harness.count(User).await, 1);
}

#[tokio::test]
async fn test_legacy_double_encoded_ip_list() {
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, IntoActiveModel};

    let harness = TestHarness::new().await;
    let created = harness.create_user(TEST_ACCOUNT, TEST_NAME).await;

    let mut active = created.into_active_model();
    active.ip_list = Set(r#""[\"10.0.0.7\"]""#.to_string());
    let updated = active.update(&harness.db).await.unwrap();

    assert_eq!(updated.allowed_ips(), vec!["10.0.0.7"]);
}
