/*!
 * Tests for record storage, translation traversal and write validation
 */

use lingua_link::{NewRecord, Translatable, ValidationError};

use crate::common::{seed_foo_items, test_repository};

/// Original/translation closure: every child resolves back to the
/// primary record, and the primary record lists every child
#[tokio::test]
async fn test_traversal_closure_betweenOriginalAndTranslations() {
    let repo = test_repository();
    let (en, hy, nl, ru) = seed_foo_items(&repo).await;

    for child in [&hy, &nl, &ru] {
        let original = repo
            .original_translation(child)
            .await
            .unwrap()
            .expect("Child must resolve to an original");
        assert_eq!(original.id, en.id);
    }

    let children = repo.available_translations(&en).await.unwrap();
    let mut child_ids: Vec<i64> = children.iter().map(|r| r.id).collect();
    child_ids.sort();
    let mut expected = vec![hy.id, nl.id, ru.id];
    expected.sort();
    assert_eq!(child_ids, expected);
}

/// A translation's sibling set is its original plus the original's other
/// translations, excluding itself
#[tokio::test]
async fn test_availableTranslations_forChild_shouldListOriginalFirst() {
    let repo = test_repository();
    let (en, hy, nl, ru) = seed_foo_items(&repo).await;

    let siblings = repo.available_translations(&hy).await.unwrap();
    let ids: Vec<i64> = siblings.iter().map(|r| r.id).collect();

    assert_eq!(ids[0], en.id);
    assert!(ids.contains(&nl.id));
    assert!(ids.contains(&ru.id));
    assert!(!ids.contains(&hy.id));
    assert_eq!(ids.len(), 3);
}

/// Per-language lookup from the primary record
#[tokio::test]
async fn test_translationFor_fromPrimary_shouldResolveEveryLanguage() {
    let repo = test_repository();
    let (en, hy, nl, ru) = seed_foo_items(&repo).await;

    assert_eq!(repo.translation_for(&en, "en").await.unwrap().unwrap().id, en.id);
    assert_eq!(repo.translation_for(&en, "hy").await.unwrap().unwrap().id, hy.id);
    assert_eq!(repo.translation_for(&en, "nl").await.unwrap().unwrap().id, nl.id);
    assert_eq!(repo.translation_for(&en, "ru").await.unwrap().unwrap().id, ru.id);

    assert!(repo.translation_for(&en, "nonexistent-code").await.unwrap().is_none());
}

/// Per-language lookup from a translation goes through the original
#[tokio::test]
async fn test_translationFor_fromChild_shouldResolveSiblings() {
    let repo = test_repository();
    let (en, hy, nl, _ru) = seed_foo_items(&repo).await;

    assert_eq!(repo.translation_for(&hy, "en").await.unwrap().unwrap().id, en.id);
    assert_eq!(repo.translation_for(&hy, "nl").await.unwrap().unwrap().id, nl.id);
    assert_eq!(repo.translation_for(&hy, "hy").await.unwrap().unwrap().id, hy.id);
}

/// A configured language with no persisted sibling resolves to None
#[tokio::test]
async fn test_translationFor_missingSibling_shouldReturnNone() {
    let repo = test_repository();

    let en = repo
        .insert_record(NewRecord::new("foo", "Lonely EN", "lonely-en", "en"))
        .await
        .unwrap();

    assert!(repo.translation_for(&en, "ru").await.unwrap().is_none());
}

/// Creating a second record in an occupied language slot fails, while a
/// free language succeeds
#[tokio::test]
async fn test_uniqueness_secondRecordInSameSlot_shouldFail() {
    let repo = test_repository();
    let (en, _hy, _nl, _ru) = seed_foo_items(&repo).await;

    let duplicate = repo
        .insert_record(
            NewRecord::new("foo", "Foo title HY 2", "foo-title-hy-2", "hy")
                .with_translation_of(en.id),
        )
        .await;
    let err = duplicate.expect_err("Second HY translation must fail validation");
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::DuplicateTranslation { language }) if language == "hy"
    ));

    // A second original in the primary language is a different object tree
    repo.insert_record(NewRecord::new("foo", "Bar title EN", "bar-title-en", "en"))
        .await
        .expect("Unrelated primary record must be allowed");
}

/// An unsaved record has no translations regardless of other state
#[tokio::test]
async fn test_availableTranslations_forUnsavedRecord_shouldBeEmpty() {
    let repo = test_repository();
    let (en, _hy, _nl, _ru) = seed_foo_items(&repo).await;

    let mut unsaved = NewRecord::new("foo", "Draft", "draft", "hy")
        .with_translation_of(en.id)
        .into_record();
    unsaved.id = 0;

    assert!(repo.available_translations(&unsaved).await.unwrap().is_empty());
    assert_eq!(unsaved.primary_key(), None);
}

/// The capability marker is true for every record
#[tokio::test]
async fn test_isMultilingual_shouldBeTrueForRecords() {
    let repo = test_repository();
    let (en, hy, _nl, _ru) = seed_foo_items(&repo).await;

    assert!(en.is_multilingual());
    assert!(hy.is_multilingual());
}

/// Records can be fetched back by collection and slug
#[tokio::test]
async fn test_getBySlug_shouldResolveWithinCollection() {
    let repo = test_repository();
    let (_en, hy, _nl, _ru) = seed_foo_items(&repo).await;

    let fetched = repo
        .get_by_slug("foo", "foo-title-hy")
        .await
        .unwrap()
        .expect("Slug lookup failed");
    assert_eq!(fetched.id, hy.id);

    assert!(repo.get_by_slug("bar", "foo-title-hy").await.unwrap().is_none());
}

/// Language-filtered listing only returns records in that language
#[tokio::test]
async fn test_listRecords_withLanguageFilter() {
    let repo = test_repository();
    let (en, _hy, _nl, _ru) = seed_foo_items(&repo).await;

    let all = repo.list_records("foo", None).await.unwrap();
    assert_eq!(all.len(), 4);

    let primary_only = repo.list_records("foo", Some("en")).await.unwrap();
    assert_eq!(primary_only.len(), 1);
    assert_eq!(primary_only[0].id, en.id);
}

/// Deleting an original clears the children's links via the foreign key
#[tokio::test]
async fn test_deleteOriginal_shouldDetachTranslations() {
    let repo = test_repository();
    let (en, hy, _nl, _ru) = seed_foo_items(&repo).await;

    assert!(repo.delete_record(en.id).await.unwrap());

    let detached = repo.get_record(hy.id).await.unwrap().unwrap();
    assert_eq!(detached.translation_of, None);
    assert!(repo.available_translations(&detached).await.unwrap().is_empty());
}
