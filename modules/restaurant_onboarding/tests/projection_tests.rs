//! Admin list/detail projection tests

mod common;

use chrono::Utc;
use common::*;
use restaurant_onboarding::contract::*;
use restaurant_onboarding::domain::draft::DishDraft;
use restaurant_onboarding::domain::projection::{SubmissionDetailView, SubmissionList};
use restaurant_onboarding::domain::submission::SubmissionPipeline;
use restaurant_onboarding::domain::NoOpNotifier;
use std::sync::Arc;
use uuid::Uuid;

fn seeded() -> (MockSubmissionRepo, Submission, Submission, Submission) {
    let repo = MockSubmissionRepo::new();
    let oldest = repo.seed("Harbor Grill", "hello@harbor.test", SubmissionStatus::Live, 300);
    let middle = repo.seed(
        "Tony's Trattoria",
        "tony@trattoria.test",
        SubmissionStatus::InReview,
        200,
    );
    let newest = repo.seed("Noodle Bar", "info@noodles.test", SubmissionStatus::Submitted, 100);
    (repo, oldest, middle, newest)
}

#[tokio::test]
async fn test_list_is_newest_first_with_counts() {
    print_test_header(
        "test_list_is_newest_first_with_counts",
        &["The list sorts by creation time descending and counts every status"],
    );
    let (repo, oldest, middle, newest) = seeded();
    let list = SubmissionList::load(Arc::new(repo)).await.unwrap();

    let ids: Vec<Uuid> = list.submissions().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);

    let counts = list.status_counts();
    assert_eq!(counts[&SubmissionStatus::Submitted], 1);
    assert_eq!(counts[&SubmissionStatus::InReview], 1);
    assert_eq!(counts[&SubmissionStatus::Generated], 0);
    assert_eq!(counts[&SubmissionStatus::Live], 1);
}

#[tokio::test]
async fn test_filters_by_search_and_status() {
    let (repo, _, middle, newest) = seeded();
    let list = SubmissionList::load(Arc::new(repo)).await.unwrap();

    let by_name = SubmissionFilter {
        search: Some("TONY".to_string()),
        status: None,
    };
    let found: Vec<Uuid> = list.filtered(&by_name).map(|s| s.id).collect();
    assert_eq!(found, vec![middle.id]);

    let by_email = SubmissionFilter {
        search: Some("noodles.test".to_string()),
        status: Some(SubmissionStatus::Submitted),
    };
    let found: Vec<Uuid> = list.filtered(&by_email).map(|s| s.id).collect();
    assert_eq!(found, vec![newest.id]);

    let mismatch = SubmissionFilter {
        search: Some("noodle".to_string()),
        status: Some(SubmissionStatus::Live),
    };
    assert_eq!(list.filtered(&mismatch).count(), 0);
}

#[tokio::test]
async fn test_status_update_reflected_locally_and_on_refetch() {
    print_test_header(
        "test_status_update_reflected_locally_and_on_refetch",
        &["A status write patches the in-memory list and survives a fresh fetch"],
    );
    let (repo, _, _, newest) = seeded();
    let repo = Arc::new(repo);
    let mut list = SubmissionList::load(repo.clone()).await.unwrap();

    list.update_status(newest.id, SubmissionStatus::Generated)
        .await
        .unwrap();
    let local = list.submissions().iter().find(|s| s.id == newest.id).unwrap();
    assert_eq!(local.status, SubmissionStatus::Generated);
    // One fetch for the load, then only the write
    assert_eq!(repo.calls(), vec!["list_submissions", "update_status"]);

    let fresh = SubmissionList::load(repo).await.unwrap();
    let stored = fresh.submissions().iter().find(|s| s.id == newest.id).unwrap();
    assert_eq!(stored.status, SubmissionStatus::Generated);
}

#[tokio::test]
async fn test_failed_status_write_leaves_list_untouched() {
    let repo = MockSubmissionRepo::failing_on("update_status");
    let target = repo.seed("Noodle Bar", "info@noodles.test", SubmissionStatus::Submitted, 5);
    let mut list = SubmissionList::load(Arc::new(repo)).await.unwrap();

    let err = list
        .update_status(target.id, SubmissionStatus::Live)
        .await
        .unwrap_err();
    assert_eq!(err, OnboardingError::Internal);
    assert_eq!(list.submissions()[0].status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn test_review_action_walks_the_workflow() {
    let repo = MockSubmissionRepo::new();
    let target = repo.seed("Noodle Bar", "info@noodles.test", SubmissionStatus::Submitted, 5);
    let mut list = SubmissionList::load(Arc::new(repo)).await.unwrap();

    assert_eq!(list.advance(target.id).await.unwrap(), Some(SubmissionStatus::InReview));
    assert_eq!(list.advance(target.id).await.unwrap(), Some(SubmissionStatus::Generated));
    assert_eq!(list.advance(target.id).await.unwrap(), None);
    assert!(matches!(
        list.advance(Uuid::new_v4()).await,
        Err(OnboardingError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_detail_orders_children() {
    print_test_header(
        "test_detail_orders_children",
        &["Children come back sorted by display_order whatever the storage order"],
    );
    let repo = MockSubmissionRepo::new();
    let parent = repo.seed("Harbor Grill", "hello@harbor.test", SubmissionStatus::Submitted, 1);
    let now = Utc::now();
    let dishes = [2, 0, 1]
        .into_iter()
        .map(|order| Dish {
            id: Uuid::new_v4(),
            restaurant_submission_id: parent.id,
            name: format!("Dish {order}"),
            description: String::new(),
            image_url: None,
            display_order: order,
            created_at: now,
        })
        .collect();
    let photos = [1, 2, 0]
        .into_iter()
        .map(|order| Photo {
            id: Uuid::new_v4(),
            restaurant_submission_id: parent.id,
            image_url: format!("https://cdn.test/{order}.jpg"),
            display_order: order,
            created_at: now,
        })
        .collect();
    repo.seed_children(dishes, photos);

    let view = SubmissionDetailView::load(&repo, parent.id).await.unwrap();
    let detail = view.detail();
    let names: Vec<&str> = detail.dishes.iter().map(|d| d.name.as_str()).collect();
    let orders: Vec<i32> = detail.photos.iter().map(|p| p.display_order).collect();
    assert_eq!(names, vec!["Dish 0", "Dish 1", "Dish 2"]);
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_missing_submission_is_not_found() {
    let repo = MockSubmissionRepo::new();
    let result = SubmissionDetailView::load(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(OnboardingError::NotFound { .. })));
}

#[tokio::test]
async fn test_photo_order_round_trips() {
    print_test_header(
        "test_photo_order_round_trips",
        &["Photos A, B, C submitted in that order read back as A, B, C"],
    );
    let repo = MockSubmissionRepo::new();
    let store = Arc::new(MockBlobStore::new());
    let uploader = uploader(store.clone());
    let mut draft = complete_draft();
    draft.photos = photos(&["A.jpg", "B.jpg", "C.jpg"]);

    let receipt = SubmissionPipeline::new(&repo, &uploader).run(&draft).await.unwrap();
    let detail = SubmissionDetailView::load(&repo, receipt.submission.id)
        .await
        .unwrap()
        .into_detail();

    // Resolve each stored address back to the uploaded content
    let objects = store.objects();
    let contents: Vec<&[u8]> = detail
        .photos
        .iter()
        .map(|p| {
            let object = objects
                .iter()
                .find(|o| p.image_url.ends_with(&o.key))
                .unwrap();
            object.bytes.as_ref()
        })
        .collect();
    assert_eq!(contents, vec![&b"A.jpg"[..], &b"B.jpg"[..], &b"C.jpg"[..]]);
}

#[tokio::test]
async fn test_dish_order_round_trips() {
    print_test_header(
        "test_dish_order_round_trips",
        &["Dishes A, B, C submitted in that order read back as A, B, C with their images"],
    );
    let repo = MockSubmissionRepo::new();
    let store = Arc::new(MockBlobStore::new());
    let uploader = uploader(store.clone());
    let mut draft = complete_draft();
    draft.popular_dishes = ["A", "B", "C"]
        .iter()
        .map(|name| DishDraft {
            name: name.to_string(),
            description: format!("{name} plate"),
            image: (*name != "B").then(|| image(&format!("{name}.jpg"))),
        })
        .collect();

    let receipt = SubmissionPipeline::new(&repo, &uploader).run(&draft).await.unwrap();
    let detail = SubmissionDetailView::load(&repo, receipt.submission.id)
        .await
        .unwrap()
        .into_detail();

    let names: Vec<&str> = detail.dishes.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    let orders: Vec<i32> = detail.dishes.iter().map(|d| d.display_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let objects = store.objects();
    let images: Vec<Option<&[u8]>> = detail
        .dishes
        .iter()
        .map(|d| {
            d.image_url.as_ref().map(|url| {
                let object = objects.iter().find(|o| url.ends_with(&o.key)).unwrap();
                object.bytes.as_ref()
            })
        })
        .collect();
    assert_eq!(images, vec![Some(&b"A.jpg"[..]), None, Some(&b"C.jpg"[..])]);
}

#[tokio::test]
async fn test_site_generation_changes_nothing() {
    let repo = MockSubmissionRepo::new();
    let target = repo.seed("Harbor Grill", "hello@harbor.test", SubmissionStatus::InReview, 1);
    let service = restaurant_onboarding::domain::Service::new(
        Arc::new(repo.clone()),
        Arc::new(uploader(Arc::new(MockBlobStore::new()))),
        Arc::new(NoOpNotifier),
    );

    service.request_site_generation(target.id).await.unwrap();
    assert_eq!(repo.submissions()[0], target);
    assert!(repo.write_calls().is_empty());
}
