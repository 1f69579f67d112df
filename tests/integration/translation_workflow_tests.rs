/*!
 * End-to-end translation workflow tests.
 *
 * Walks the documented scenario: a primary English item with Armenian,
 * Dutch and Russian translations, checked through the repository, the
 * admin rendering and the URL helpers together.
 */

use lingua_link::admin::available_translations_admin;
use lingua_link::template_tags::{RenderContext, RequestInfo, translated_object_for};
use lingua_link::urls::localized_url;
use lingua_link::{NewRecord, ValidationError};

use crate::common::{init_test_logging, seed_foo_items, test_repository};

/// The full documented scenario in one pass
#[tokio::test]
async fn test_workflow_primaryWithThreeTranslations() {
    init_test_logging();
    let repo = test_repository();
    let (en, hy, nl, ru) = seed_foo_items(&repo).await;

    // Per-language lookup from the original
    let found = repo.translation_for(&en, "hy").await.unwrap().unwrap();
    assert_eq!(found.id, hy.id);

    // The sibling set of the original is exactly the three translations
    let mut sibling_ids: Vec<i64> = repo
        .available_translations(&en)
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    sibling_ids.sort();
    let mut expected = vec![hy.id, nl.id, ru.id];
    expected.sort();
    assert_eq!(sibling_ids, expected);

    // Every child resolves back to the original
    let original = repo.original_translation(&hy).await.unwrap().unwrap();
    assert_eq!(original.id, en.id);

    // Language-prefixed detail URLs
    for record in [&hy, &nl, &ru] {
        let path = format!("/foo/{}/", record.slug);
        let url = localized_url(repo.registry(), true, &record.language, &path);
        assert_eq!(url, format!("/{}/foo/{}/", record.language, record.slug));
    }
}

/// A rendering pass over the same data: request language drives the
/// translated-object binding
#[tokio::test]
async fn test_workflow_renderForRequestLanguage() {
    init_test_logging();
    let repo = test_repository();
    let (_en, _hy, nl, _ru) = seed_foo_items(&repo).await;

    // The Dutch visitor lands on the Russian item; rendering binds the
    // Dutch sibling
    let ru_record = repo.get_by_slug("foo", "foo-title-ru").await.unwrap().unwrap();
    let ctx = RenderContext::with_request(RequestInfo::with_language("nl"));

    let bound = translated_object_for(&repo, &ctx, &ru_record, None)
        .await
        .unwrap()
        .expect("Expected the Dutch sibling");
    assert_eq!(bound.id, nl.id);
    assert_eq!(bound.slug, "foo-title-nl");
}

/// Admin rendering over a partially translated tree, then completing it
#[test]
fn test_workflow_adminLinksTrackCoverage() {
    init_test_logging();
    let repo = test_repository();

    let en = tokio_test::block_on(repo.insert_record(
        NewRecord::new("foo", "Foo title EN", "foo-title-en", "en").with_body("Foo body EN"),
    ))
    .unwrap();

    // Nothing translated yet: three add links
    let html = tokio_test::block_on(available_translations_admin(&repo, &en, true)).unwrap();
    assert_eq!(html.matches("color:#baa").count(), 3);

    tokio_test::block_on(repo.insert_record(
        NewRecord::new("foo", "Foo title HY", "foo-title-hy", "hy").with_translation_of(en.id),
    ))
    .unwrap();

    // One translation: two add links remain
    let html = tokio_test::block_on(available_translations_admin(&repo, &en, true)).unwrap();
    assert_eq!(html.matches("color:#baa").count(), 2);

    // The occupied slot stays closed
    let err = tokio_test::block_on(repo.insert_record(
        NewRecord::new("foo", "Foo title HY 2", "foo-title-hy-2", "hy").with_translation_of(en.id),
    ))
    .expect_err("Occupied slot must reject a second translation");
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::DuplicateTranslation { .. })
    ));
}
