//! Integration tests for the User repository using in-memory SurrealDB.

use canvass_core::models::user::{CreateUser, Role};
use canvass_core::repository::{RegisterOutcome, UserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    canvass_db::run_migrations(&db).await.unwrap();
    db
}

fn alice() -> CreateUser {
    CreateUser {
        email: "alice@example.com".into(),
        name: "Alice".into(),
        role: None,
    }
}

#[tokio::test]
async fn register_and_find_by_email() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealUserRepository::new(db);

    let outcome = repo.register(alice()).await.unwrap();
    let RegisterOutcome::Created(insert) = outcome else {
        panic!("expected a fresh insert");
    };
    assert!(!insert.inserted_id.is_empty());

    let user = repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .expect("registered user should be found");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name, "Alice");
    // Role defaults to plain user when the client sends none.
    assert_eq!(user.role, Role::User);
}

#[tokio::test]
async fn missing_user_is_none_not_an_error() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealUserRepository::new(db);

    let found = repo.find_by_email("ghost@example.com").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn re_registration_is_an_idempotent_no_op() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealUserRepository::new(db);

    repo.register(alice()).await.unwrap();

    // Promote, then register the same email again with a different name.
    repo.set_role_by_email("alice@example.com", Role::Surveyor)
        .await
        .unwrap();

    let second = repo
        .register(CreateUser {
            email: "alice@example.com".into(),
            name: "Impostor".into(),
            role: Some(Role::Admin),
        })
        .await
        .unwrap();
    assert!(matches!(second, RegisterOutcome::AlreadyExists));

    // Exactly one record, and the first record's fields are untouched.
    let users = repo.list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Alice");
    assert_eq!(users[0].role, Role::Surveyor);
}

#[tokio::test]
async fn set_role_by_id_is_unconditional() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealUserRepository::new(db);

    repo.register(CreateUser {
        email: "root@example.com".into(),
        name: "Root".into(),
        role: Some(Role::Admin),
    })
    .await
    .unwrap();

    let admin = repo
        .find_by_email("root@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    // The operator-override path can demote even an admin.
    let outcome = repo.set_role_by_id(admin.id, Role::User).await.unwrap();
    assert_eq!(outcome.matched_count, 1);
    assert_eq!(outcome.modified_count, 1);

    let demoted = repo
        .find_by_email("root@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(demoted.role, Role::User);
}

#[tokio::test]
async fn role_update_on_missing_target_matches_nothing() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealUserRepository::new(db);

    let by_email = repo
        .set_role_by_email("ghost@example.com", Role::ProUser)
        .await
        .unwrap();
    assert_eq!(by_email.matched_count, 0);
    assert_eq!(by_email.modified_count, 0);

    let by_id = repo
        .set_role_by_id(uuid::Uuid::new_v4(), Role::ProUser)
        .await
        .unwrap();
    assert_eq!(by_id.matched_count, 0);
}
