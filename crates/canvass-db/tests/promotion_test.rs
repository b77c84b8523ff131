//! Integration tests for applied role promotions against in-memory
//! SurrealDB.

use canvass_core::models::user::{CreateUser, Role};
use canvass_core::promotion::{PromotionEvent, apply_promotion};
use canvass_core::repository::UserRepository;
use canvass_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> SurrealUserRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    canvass_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

async fn register(repo: &SurrealUserRepository<surrealdb::engine::local::Db>, role: Role) {
    repo.register(CreateUser {
        email: "carol@example.com".into(),
        name: "Carol".into(),
        role: Some(role),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn survey_submission_promotes_user_to_surveyor() {
    let repo = setup().await;
    register(&repo, Role::User).await;

    let outcome = apply_promotion(&repo, "carol@example.com", PromotionEvent::SurveySubmitted)
        .await
        .unwrap()
        .expect("promotion should apply");
    assert_eq!(outcome.matched_count, 1);

    let user = repo
        .find_by_email("carol@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::Surveyor);
}

#[tokio::test]
async fn payment_promotes_surveyor_to_pro_user() {
    let repo = setup().await;
    register(&repo, Role::Surveyor).await;

    apply_promotion(&repo, "carol@example.com", PromotionEvent::PaymentCompleted)
        .await
        .unwrap()
        .expect("promotion should apply");

    let user = repo
        .find_by_email("carol@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::ProUser);
}

#[tokio::test]
async fn admin_role_is_sticky_under_automatic_events() {
    let repo = setup().await;
    register(&repo, Role::Admin).await;

    for event in [
        PromotionEvent::SurveySubmitted,
        PromotionEvent::PaymentCompleted,
    ] {
        let outcome = apply_promotion(&repo, "carol@example.com", event)
            .await
            .unwrap();
        assert!(outcome.is_none(), "admin must never transition");
    }

    let user = repo
        .find_by_email("carol@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn promotion_for_unknown_email_is_a_quiet_no_op() {
    let repo = setup().await;

    // No user document exists for this email; the triggering write must
    // not be aborted, so this resolves Ok(None) rather than erroring.
    let outcome = apply_promotion(&repo, "ghost@example.com", PromotionEvent::SurveySubmitted)
        .await
        .unwrap();
    assert!(outcome.is_none());
}
