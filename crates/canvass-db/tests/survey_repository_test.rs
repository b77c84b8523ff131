//! Integration tests for the Survey repository using in-memory
//! SurrealDB.

use canvass_core::models::survey::{CreateSurvey, SurveyStatus, UpdateSurvey};
use canvass_core::repository::SurveyRepository;
use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    canvass_db::run_migrations(&db).await.unwrap();
    db
}

fn sample_survey() -> CreateSurvey {
    CreateSurvey {
        title: "Coffee habits".into(),
        description: "How do you take your coffee?".into(),
        category: "food".into(),
        image: "https://example.com/coffee.png".into(),
        deadline: Utc::now() + Duration::days(30),
        surveyor_email: "bob@example.com".into(),
    }
}

#[tokio::test]
async fn insert_starts_as_draft_with_zero_votes() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealSurveyRepository::new(db);

    let insert = repo.insert(sample_survey()).await.unwrap();
    let id = Uuid::parse_str(&insert.inserted_id).unwrap();

    let survey = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(survey.status, SurveyStatus::Draft);
    assert_eq!(survey.vote_count, 0);
    assert_eq!(survey.surveyor_email, "bob@example.com");
}

#[tokio::test]
async fn update_details_leaves_unset_fields_alone() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealSurveyRepository::new(db);

    let insert = repo.insert(sample_survey()).await.unwrap();
    let id = Uuid::parse_str(&insert.inserted_id).unwrap();

    let outcome = repo
        .update_details(
            id,
            UpdateSurvey {
                title: Some("Tea habits".into()),
                category: Some("drinks".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.matched_count, 1);

    let survey = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(survey.title, "Tea habits");
    assert_eq!(survey.category, "drinks");
    assert_eq!(survey.description, "How do you take your coffee?");
}

#[tokio::test]
async fn status_toggles_between_publish_and_unpublish() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealSurveyRepository::new(db);

    let insert = repo.insert(sample_survey()).await.unwrap();
    let id = Uuid::parse_str(&insert.inserted_id).unwrap();

    repo.set_status(id, SurveyStatus::Publish).await.unwrap();
    let survey = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(survey.status, SurveyStatus::Publish);

    repo.set_status(id, SurveyStatus::Unpublish).await.unwrap();
    let survey = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(survey.status, SurveyStatus::Unpublish);
}

#[tokio::test]
async fn vote_count_is_overwritten_not_incremented() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealSurveyRepository::new(db);

    let insert = repo.insert(sample_survey()).await.unwrap();
    let id = Uuid::parse_str(&insert.inserted_id).unwrap();

    repo.set_vote_count(id, 42).await.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().vote_count, 42);

    // A lower caller-supplied tally replaces the stored one wholesale.
    repo.set_vote_count(id, 7).await.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().vote_count, 7);
}

#[tokio::test]
async fn targeted_updates_on_missing_survey_match_nothing() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealSurveyRepository::new(db);

    let ghost = Uuid::new_v4();

    let status = repo.set_status(ghost, SurveyStatus::Publish).await.unwrap();
    assert_eq!(status.matched_count, 0);

    let votes = repo.set_vote_count(ghost, 5).await.unwrap();
    assert_eq!(votes.matched_count, 0);

    let details = repo
        .update_details(
            ghost,
            UpdateSurvey {
                title: Some("nope".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(details.matched_count, 0);

    assert!(repo.find_by_id(ghost).await.unwrap().is_none());
}
