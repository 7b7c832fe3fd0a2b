//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::errors::{AccountError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn sample_user(email: &str) -> User {
    User::new(
        email.to_string(),
        "bcrypt_hash".to_string(),
        "Sam".to_string(),
    )
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let user = sample_user("sam@example.com");

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = repo.find_by_id(user.id).await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, user.id);
}

#[tokio::test]
async fn test_mock_repository_find_by_email() {
    let repo = MockUserRepository::new();
    let user = sample_user("finder@example.com");
    repo.create(user.clone()).await.unwrap();

    let found = repo.find_by_email("finder@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let missing = repo.find_by_email("other@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_mock_repository_rejects_duplicate_email() {
    let repo = MockUserRepository::new();
    repo.create(sample_user("dup@example.com")).await.unwrap();

    let result = repo.create(sample_user("dup@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::EmailAlreadyRegistered))
    ));
}

#[tokio::test]
async fn test_mock_repository_update_persists_changes() {
    let repo = MockUserRepository::new();
    let mut user = sample_user("upd@example.com");
    repo.create(user.clone()).await.unwrap();

    user.verify_email();
    repo.update(user.clone()).await.unwrap();

    let found = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(found.is_email_verified());
}

#[tokio::test]
async fn test_mock_repository_update_missing_user_fails() {
    let repo = MockUserRepository::new();

    let result = repo.update(sample_user("ghost@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_exists_by_email() {
    let repo = MockUserRepository::new();
    repo.create(sample_user("exists@example.com")).await.unwrap();

    assert!(repo.exists_by_email("exists@example.com").await.unwrap());
    assert!(!repo.exists_by_email("nobody@example.com").await.unwrap());
}
