//! Tests for SqliteProjectRepository.

use crate::db::{
    DEFAULT_IMAGE, Database, DbError, NewProject, ProjectPatch, ProjectRepository, SqliteDatabase,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn sample() -> NewProject {
    NewProject {
        name: "X".to_string(),
        description: "d".to_string(),
        category: "web".to_string(),
        state: "active".to_string(),
        year: 2024,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_project() {
    let db = setup_db().await;
    let repo = db.projects();

    let created = repo.create(&sample()).await.expect("Create should succeed");
    assert!(!created.id.is_empty());
    assert!(!created.created_at.is_empty());
    assert_eq!(created.image, DEFAULT_IMAGE);

    let retrieved = repo.get(&created.id).await.expect("Get should succeed");
    assert_eq!(retrieved, created);
    assert_eq!(retrieved.name, "X");
    assert_eq!(retrieved.description, "d");
    assert_eq!(retrieved.category, "web");
    assert_eq!(retrieved.state, "active");
    assert_eq!(retrieved.year, 2024);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_trims_description() {
    let db = setup_db().await;
    let repo = db.projects();

    let created = repo
        .create(&NewProject {
            description: "\t padded description  \n".to_string(),
            ..sample()
        })
        .await
        .unwrap();

    assert_eq!(created.description, "padded description");
    let stored = repo.get(&created.id).await.unwrap();
    assert_eq!(stored.description, "padded description");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_missing_field_stores_nothing() {
    let db = setup_db().await;
    let repo = db.projects();
    repo.create(&sample()).await.unwrap();

    let blanks = [
        NewProject {
            name: String::new(),
            ..sample()
        },
        NewProject {
            description: "   ".to_string(),
            ..sample()
        },
        NewProject {
            category: String::new(),
            ..sample()
        },
        NewProject {
            state: String::new(),
            ..sample()
        },
    ];

    for input in &blanks {
        let result = repo.create(input).await;
        assert!(
            matches!(result, Err(DbError::Validation { .. })),
            "Expected validation error for {:?}",
            input
        );
    }

    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_project_returns_not_found() {
    let db = setup_db().await;
    let repo = db.projects();

    let result = repo.get("nonexist").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_empty_then_in_insertion_order() {
    let db = setup_db().await;
    let repo = db.projects();

    assert!(repo.list().await.expect("List should succeed").is_empty());

    let first = repo.create(&sample()).await.unwrap();
    let second = repo
        .create(&NewProject {
            name: "Y".to_string(),
            ..sample()
        })
        .await
        .unwrap();

    let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_supplied_fields() {
    let db = setup_db().await;
    let repo = db.projects();
    let created = repo.create(&sample()).await.unwrap();

    let updated = repo
        .update(
            &created.id,
            &ProjectPatch {
                state: Some("archived".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(updated.state, "archived");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.category, created.category);
    assert_eq!(updated.year, created.year);
    assert_eq!(updated.image, created.image);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.id, created.id);

    let stored = repo.get(&created.id).await.unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_current_values_is_a_no_op() {
    let db = setup_db().await;
    let repo = db.projects();
    let created = repo.create(&sample()).await.unwrap();

    let same = ProjectPatch {
        name: Some(created.name.clone()),
        description: Some(created.description.clone()),
        category: Some(created.category.clone()),
        state: Some(created.state.clone()),
        year: Some(created.year),
        image: Some(created.image.clone()),
    };

    let updated = repo.update(&created.id, &same).await.unwrap();
    assert_eq!(updated, created);

    let untouched = repo
        .update(&created.id, &ProjectPatch::default())
        .await
        .unwrap();
    assert_eq!(untouched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_sets_image_without_checking_assets() {
    let db = setup_db().await;
    let repo = db.projects();
    let created = repo.create(&sample()).await.unwrap();

    let updated = repo
        .update(
            &created.id,
            &ProjectPatch {
                image: Some("project-0-0-missing.png".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.image, "project-0-0-missing.png");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_or_blank_id() {
    let db = setup_db().await;
    let repo = db.projects();
    let patch = ProjectPatch {
        name: Some("Z".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        repo.update("nonexist", &patch).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        repo.update("  ", &patch).await,
        Err(DbError::Validation { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_blank_field_without_writing() {
    let db = setup_db().await;
    let repo = db.projects();
    let created = repo.create(&sample()).await.unwrap();

    let result = repo
        .update(
            &created.id,
            &ProjectPatch {
                name: Some(String::new()),
                state: Some("archived".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::Validation { .. })));

    let stored = repo.get(&created.id).await.unwrap();
    assert_eq!(stored.state, "active");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_record_then_not_found() {
    let db = setup_db().await;
    let repo = db.projects();
    let created = repo.create(&sample()).await.unwrap();

    let deleted = repo.delete(&created.id).await.expect("Delete should succeed");
    assert_eq!(deleted, created);

    assert!(matches!(
        repo.get(&created.id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        repo.delete(&created.id).await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn concrete_lifecycle_scenario() {
    let db = setup_db().await;
    let repo = db.projects();

    let p1 = repo.create(&sample()).await.unwrap();

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, p1.id);

    let archived = repo
        .update(
            &p1.id,
            &ProjectPatch {
                state: Some("archived".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(archived.state, "archived");
    assert_eq!(archived.name, "X");

    repo.delete(&p1.id).await.unwrap();
    assert!(matches!(
        repo.get(&p1.id).await,
        Err(DbError::NotFound { .. })
    ));
}
