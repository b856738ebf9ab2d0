//! Test harness for isolated database tests.
//!
//! Each `TestHarness` owns its own in-memory SQLite database with every
//! migration applied, so tests never see each other's rows.

#![allow(dead_code)]

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait,
};

use docadmin::db::entities::user;
use docadmin::db::user_repo::{self, UserCreateRequest};
use docadmin::open_in_memory;

/// Minimum bcrypt cost keeps the tests fast.
pub const TEST_COST: u32 = 4;

pub struct TestHarness {
    pub db: DatabaseConnection,
}

impl TestHarness {
    pub async fn new() -> Self {
        let db = open_in_memory()
            .await
            .expect("Failed to open in-memory database");
        Self { db }
    }

    /// Creates an account with a throwaway password.
    pub async fn create_user(&self, account: &str, name: &str) -> user::Model {
        user_repo::create(
            &self.db,
            &UserCreateRequest::new(account, "1234", name),
            TEST_COST,
        )
        .await
        .expect("Failed to create user")
    }

    /// Inserts any active model and returns the stored row.
    pub async fn insert<A>(&self, model: A) -> <A::Entity as EntityTrait>::Model
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await.expect("Failed to insert row")
    }

    pub async fn count<E>(&self, _entity: E) -> u64
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        E::find().count(&self.db).await.expect("Failed to count rows")
    }

    /// Releases the pool.
    pub async fn close(self) {
        self.db.close().await.expect("Failed to close database");
    }
}
