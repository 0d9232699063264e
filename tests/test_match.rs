mod common;

use common::*;
use faceid::domain::error::DomainError;
use faceid::domain::values::match_policy::MatchPolicy;
use faceid::FaceId;
use std::sync::Arc;

#[tokio::test]
async fn test_enroll_then_match_same_photo() {
    let (engine, _dir) = setup(Arc::new(staff_detector()));
    engine.enroll("Alice", "E001", &png(ALICE.0, ALICE.1)).await.unwrap();
    engine.enroll("Bob", "E002", &png(BOB.0, BOB.1)).await.unwrap();

    let found = engine.match_face(&png(ALICE.0, ALICE.1)).await.unwrap();
    assert_eq!(found.employee_id, "E001");
    assert_eq!(found.name, "Alice");
    assert!(found.similarity >= 0.99);
    assert_eq!(found.bbox, [40, 40, 160, 160]);

    let found = engine.match_face(&png(BOB.0, BOB.1)).await.unwrap();
    assert_eq!(found.employee_id, "E002");
}

#[tokio::test]
async fn test_empty_store_rejects_before_decoding() {
    let (engine, _dir) = setup(Arc::new(staff_detector()));

    let result = engine.match_face(&png(ALICE.0, ALICE.1)).await;
    assert!(matches!(result, Err(DomainError::StoreNotInitialized)));
    let result = engine.match_face(b"garbage").await;
    assert!(matches!(result, Err(DomainError::StoreNotInitialized)));
}

#[tokio::test]
async fn test_rejection_kinds_are_distinct() {
    let detector = staff_detector()
        .with(400, 400, vec![face(0.0, 0.0, 300.0, 300.0, basis(9))]);
    let (engine, _dir) = setup(Arc::new(detector));
    engine.enroll("Alice", "E001", &png(ALICE.0, ALICE.1)).await.unwrap();

    assert!(matches!(engine.match_face(b"garbage").await, Err(DomainError::ImageDecode(_))));
    assert!(matches!(engine.match_face(&png(50, 50)).await, Err(DomainError::NoFaceDetected)));
    assert!(matches!(
        engine.match_face(&png(400, 400)).await,
        Err(DomainError::NoConfidentMatch { .. })
    ));
}

#[tokio::test]
async fn test_small_face_is_rejected_even_when_identical() {
    // 10x30 face in a 100x100 image covers 3% of it
    let detector = staff_detector().with(100, 100, vec![face(0.0, 0.0, 10.0, 30.0, basis(0))]);
    let (engine, _dir) = setup(Arc::new(detector));
    engine.enroll("Alice", "E001", &png(ALICE.0, ALICE.1)).await.unwrap();

    match engine.match_face(&png(100, 100)).await {
        Err(DomainError::FaceTooSmall { ratio, min }) => {
            assert!((ratio - 0.03).abs() < 1e-9);
            assert_eq!(min, 0.05);
        }
        other => panic!("expected FaceTooSmall, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ratio_uses_the_largest_face() {
    let detector = staff_detector().with(100, 100, vec![
        face(0.0, 0.0, 5.0, 5.0, basis(1)),
        face(10.0, 10.0, 90.0, 90.0, basis(0)),
    ]);
    let (engine, _dir) = setup(Arc::new(detector));
    engine.enroll("Alice", "E001", &png(ALICE.0, ALICE.1)).await.unwrap();
    engine.enroll("Bob", "E002", &png(BOB.0, BOB.1)).await.unwrap();

    let found = engine.match_face(&png(100, 100)).await.unwrap();
    assert_eq!(found.employee_id, "E001");
    assert_eq!(found.bbox, [10, 10, 90, 90]);
}

async fn engine_with_threshold(threshold: f32) -> (FaceId, tempfile::TempDir) {
    let detector = staff_detector()
        .with(300, 300, vec![face(0.0, 0.0, 200.0, 200.0, toward(0, 3, 0.45))]);
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(&dir);
    cfg.policy = MatchPolicy::new(threshold, 0.05).unwrap();
    let engine = FaceId::with_detector(cfg, Arc::new(detector)).unwrap();
    engine.enroll("Alice", "E001", &png(ALICE.0, ALICE.1)).await.unwrap();
    (engine, dir)
}

#[tokio::test]
async fn test_similarity_equal_to_threshold_is_accepted() {
    let similarity = basis(0).cosine_similarity(&toward(0, 3, 0.45));
    assert!((similarity - 0.45).abs() < 1e-4);

    let (engine, _dir) = engine_with_threshold(similarity).await;
    let found = engine.match_face(&png(300, 300)).await.unwrap();
    assert_eq!(found.employee_id, "E001");
    assert_eq!(found.similarity, similarity);
}

#[tokio::test]
async fn test_similarity_just_below_threshold_is_rejected() {
    let similarity = basis(0).cosine_similarity(&toward(0, 3, 0.45));
    let threshold = f32::from_bits(similarity.to_bits() + 1);

    let (engine, _dir) = engine_with_threshold(threshold).await;
    match engine.match_face(&png(300, 300)).await {
        Err(DomainError::NoConfidentMatch { best, threshold: t }) => {
            assert_eq!(best, similarity);
            assert_eq!(t, threshold);
        }
        other => panic!("expected NoConfidentMatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_identical_embeddings_match_first_enrolled_position() {
    let detector = ScriptedDetector::new()
        .with(120, 120, vec![face(0.0, 0.0, 100.0, 100.0, basis(2))])
        .with(130, 120, vec![face(0.0, 0.0, 100.0, 100.0, basis(2))]);
    let (engine, _dir) = setup(Arc::new(detector));
    engine.enroll("Twin B", "T2", &png(130, 120)).await.unwrap();
    engine.enroll("Twin A", "T1", &png(120, 120)).await.unwrap();

    // Rebuild orders the table by photo file name
    assert_eq!(engine.find_by_id("T1").await.unwrap(), Some(0));
    let found = engine.match_face(&png(120, 120)).await.unwrap();
    assert_eq!(found.employee_id, "T1");
}
