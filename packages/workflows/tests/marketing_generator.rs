// ABOUTME: Agent Multiplier behavior against a mocked model gateway
// ABOUTME: Covers copy generation, clipboard output, and the image analysis race

use bionic_ai::{AIServiceError, MockModelGateway};
use bionic_core::{MarketingContent, RoomAnalysis};
use bionic_workflows::{
    CopyTarget, ImageSelection, MarketingGenerator, MemoryClipboard, WorkflowStatus,
};
use pretty_assertions::assert_eq;

fn suite(listing: &str) -> MarketingContent {
    MarketingContent {
        professional_listing: listing.to_string(),
        instagram_caption: "Sunset views from every room. #BelAir".to_string(),
        flyer_points: [
            "Infinity-edge pool".to_string(),
            "Climate-controlled wine cellar".to_string(),
            "Private canyon trail".to_string(),
        ],
    }
}

fn analysis(style: &str) -> RoomAnalysis {
    RoomAnalysis {
        architectural_style: style.to_string(),
        top_selling_features: [
            "Floor-to-ceiling glass".to_string(),
            "Wide-plank oak".to_string(),
            "Double-height ceiling".to_string(),
        ],
    }
}

fn photo(name: &str) -> ImageSelection {
    ImageSelection::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

#[tokio::test]
async fn test_blank_notes_are_a_no_op() {
    let mut gateway = MockModelGateway::new();
    gateway.expect_generate_marketing_copy().times(0);

    let mut generator = MarketingGenerator::new();
    generator.set_notes("   ");
    assert!(!generator.generate_copy(&gateway).await);

    assert!(generator.content().is_none());
    assert_eq!(generator.copy_status(), &WorkflowStatus::Idle);
}

#[tokio::test]
async fn test_generated_copy_is_stored_and_copyable() {
    let mut gateway = MockModelGateway::new();
    gateway
        .expect_generate_marketing_copy()
        .withf(|notes| notes == "5 bed, infinity pool, wine cellar")
        .times(1)
        .returning(|_| Ok(suite("A modern masterpiece.")));

    let mut generator = MarketingGenerator::new();
    generator.set_notes("5 bed, infinity pool, wine cellar");
    assert!(generator.generate_copy(&gateway).await);

    let content = generator.content().unwrap();
    assert_eq!(content.flyer_points.len(), 3);
    assert_eq!(generator.copy_status(), &WorkflowStatus::Idle);

    let mut clipboard = MemoryClipboard::new();
    generator
        .copy_to(CopyTarget::Flyer, &mut clipboard)
        .unwrap();
    assert_eq!(
        clipboard.contents(),
        Some("• Infinity-edge pool\n• Climate-controlled wine cellar\n• Private canyon trail")
    );

    generator
        .copy_to(CopyTarget::FlyerPoint(2), &mut clipboard)
        .unwrap();
    assert_eq!(clipboard.contents(), Some("Private canyon trail"));

    generator
        .copy_to(CopyTarget::Listing, &mut clipboard)
        .unwrap();
    assert_eq!(clipboard.contents(), Some("A modern masterpiece."));
}

#[tokio::test]
async fn test_failed_generation_keeps_prior_copy() {
    let mut gateway = MockModelGateway::new();
    let mut seq = mockall::Sequence::new();
    gateway
        .expect_generate_marketing_copy()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(suite("First draft.")));
    gateway
        .expect_generate_marketing_copy()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(AIServiceError::ParseError("expected 3 flyer points".to_string())));

    let mut generator = MarketingGenerator::new();
    generator.set_notes("3 bed craftsman");
    generator.generate_copy(&gateway).await;
    generator.set_notes("3 bed craftsman, new roof");
    generator.generate_copy(&gateway).await;

    assert_eq!(
        generator.content().unwrap().professional_listing,
        "First draft."
    );
    assert!(generator
        .copy_status()
        .failure()
        .unwrap()
        .contains("expected 3 flyer points"));
    assert!(generator.can_generate());
}

#[tokio::test]
async fn test_late_analysis_for_replaced_image_is_never_visible() {
    let mut gateway = MockModelGateway::new();
    gateway
        .expect_analyze_image()
        .times(2)
        .returning(|_, _| Ok(analysis("Mid-Century Modern")));

    let mut generator = MarketingGenerator::new();
    generator.select_image(photo("kitchen.jpg"));
    let stale = generator.begin_analysis().unwrap();

    // User picks another photo while the first analysis is still out
    let current = generator.select_image(photo("den.jpg"));
    assert!(generator.visible_analysis().is_none());
    assert!(generator.begin_analysis().is_none());

    let (stale_id, result) = stale.run(&gateway).await;
    let follow_up = generator.complete_analysis(stale_id, result).unwrap();
    assert_eq!(follow_up.image_id(), current);
    assert!(generator.visible_analysis().is_none());
    assert!(generator.analysis_status().is_busy());

    let (image_id, result) = follow_up.run(&gateway).await;
    assert!(generator.complete_analysis(image_id, result).is_none());
    assert_eq!(
        generator.visible_analysis().unwrap().architectural_style,
        "Mid-Century Modern"
    );
    assert_eq!(generator.analysis_status(), &WorkflowStatus::Idle);
}

#[tokio::test]
async fn test_late_analysis_after_image_removed_starts_nothing() {
    let mut gateway = MockModelGateway::new();
    gateway
        .expect_analyze_image()
        .times(1)
        .returning(|_, _| Ok(analysis("Tudor")));

    let mut generator = MarketingGenerator::new();
    generator.select_image(photo("library.jpg"));
    let stale = generator.begin_analysis().unwrap();
    generator.clear_image();
    assert!(generator.selected_image().is_none());

    let (stale_id, result) = stale.run(&gateway).await;
    assert!(generator.complete_analysis(stale_id, result).is_none());
    assert_eq!(generator.analysis_status(), &WorkflowStatus::Idle);
    assert!(!generator.can_analyze());
}

#[tokio::test]
async fn test_selecting_image_clears_analysis_immediately() {
    let mut gateway = MockModelGateway::new();
    gateway
        .expect_analyze_image()
        .withf(|bytes, mime| bytes.len() == 4 && mime == "image/jpeg")
        .times(1)
        .returning(|_, _| Ok(analysis("Spanish Colonial")));

    let mut generator = MarketingGenerator::new();
    generator.select_image(photo("foyer.jpg"));
    generator.analyze_image(&gateway).await;
    assert!(generator.visible_analysis().is_some());

    generator.select_image(photo("patio.jpg"));
    assert!(generator.visible_analysis().is_none());
}

#[tokio::test]
async fn test_failed_analysis_keeps_prior_result() {
    let mut gateway = MockModelGateway::new();
    let mut seq = mockall::Sequence::new();
    gateway
        .expect_analyze_image()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(analysis("Craftsman")));
    gateway
        .expect_analyze_image()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(AIServiceError::ApiError("HTTP 503: overloaded".to_string())));

    let mut generator = MarketingGenerator::new();
    generator.select_image(photo("library.jpg"));
    generator.analyze_image(&gateway).await;
    generator.analyze_image(&gateway).await;

    assert_eq!(
        generator.visible_analysis().unwrap().architectural_style,
        "Craftsman"
    );
    assert!(generator.analysis_status().failure().is_some());
}

#[tokio::test]
async fn test_analysis_without_image_is_a_no_op() {
    let mut gateway = MockModelGateway::new();
    gateway.expect_analyze_image().times(0);

    let mut generator = MarketingGenerator::new();
    assert!(!generator.analyze_image(&gateway).await);
    assert_eq!(generator.analysis_status(), &WorkflowStatus::Idle);
}
