use content_studio::{
    content::{ImageSlot, SeoStage, Status, VideoStatus},
    input::{AllianceAdInput, SeoBlogInput},
    ContentType, GeneratedContent, GenerationInput, GenerationSession, HistoryStore,
    MemoryHistoryStore, StudioConfig, StudioError,
};
use futures::StreamExt;
use genai_sdk::{
    genai_sdk_test::{MockGenerativeModel, MockResult},
    AspectRatio, ContentResponse, ErrorKind, GenAiClient, GeneratedImage, GenerativeModelError,
    RetryPolicy, Source, VideoOperation,
};
use std::{sync::Arc, time::Duration};

const TEXT_POST: &str = r##"{"caption":"The future is bright","hashtags":["#AI"],"safetyAnalysis":{"isSafe":true,"reasoning":"ok"}}"##;

struct Harness {
    model: Arc<MockGenerativeModel>,
    history: Arc<MemoryHistoryStore>,
    session: GenerationSession,
}

fn harness(config: StudioConfig) -> Harness {
    let model = Arc::new(MockGenerativeModel::new());
    let client = GenAiClient::new(model.clone())
        .with_retry_policy(RetryPolicy::default().base_delay(Duration::from_millis(1)));
    let history = Arc::new(MemoryHistoryStore::new(config.history_limit));
    let session = GenerationSession::new(client, Arc::new(config), history.clone());
    Harness {
        model,
        history,
        session,
    }
}

fn fast_config() -> StudioConfig {
    StudioConfig::builder()
        .video_poll_interval(Duration::ZERO)
        .build()
}

fn blocked() -> MockResult<ContentResponse> {
    MockResult::error(GenerativeModelError::SafetyBlocked("SAFETY".to_string()))
}

#[tokio::test]
async fn generates_variations_in_issue_order_and_records_history() {
    let h = harness(fast_config());
    for caption in ["one", "two", "three"] {
        h.model.enqueue_content(caption_json(caption).as_str());
    }

    let input = GenerationInput::new(ContentType::Text)
        .topic("AI ethics")
        .variations(3);
    let variations = h.session.generate(input).await.unwrap();

    let captions: Vec<_> = variations.iter().map(caption_of).collect();
    assert_eq!(captions, vec!["one", "two", "three"]);
    assert_eq!(h.model.tracked_content_requests().len(), 3);

    let state = h.session.snapshot().await;
    assert_eq!(state.status, Status::Success);
    assert_eq!(state.variations.len(), 3);

    let history = h.history.list().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].prompt, "AI ethics");
    assert_eq!(history[0].content_type, ContentType::Text);
    assert_eq!(history[0].preview, "one");
}

#[tokio::test]
async fn one_failed_variation_fails_the_request() {
    let h = harness(fast_config());
    h.model
        .enqueue_content(TEXT_POST)
        .enqueue_content(blocked())
        .enqueue_content(TEXT_POST);

    let input = GenerationInput::new(ContentType::Text)
        .topic("AI ethics")
        .variations(3);
    let error = h.session.generate(input).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Safety);
    let state = h.session.snapshot().await;
    assert_eq!(state.status, Status::Error);
    assert!(state.variations.is_empty());
    assert!(h.history.list().unwrap().is_empty());
}

#[tokio::test]
async fn disabled_variations_issue_a_single_call() {
    let h = harness(fast_config());
    h.model.enqueue_content(
        r#"{"overall_sentiment":"Positive","sentiment_score":0.8,"key_themes":["price"],"frequent_questions":[],"actionable_insights":[]}"#,
    );

    let input = GenerationInput::new(ContentType::CommentAnalysis)
        .comments("Love it!\nToo pricey.")
        .variations(4);
    let variations = h.session.generate(input).await.unwrap();

    assert_eq!(variations.len(), 1);
    assert_eq!(h.model.tracked_content_requests().len(), 1);
}

#[tokio::test]
async fn validation_fails_before_any_call() {
    let h = harness(fast_config());
    let input = GenerationInput::new(ContentType::AllianceAd).alliance_ad(AllianceAdInput {
        keystone: "fbadcode-short".to_string(),
        core_message: "Autumn sale".to_string(),
        ..AllianceAdInput::default()
    });

    let error = h.session.generate(input).await.unwrap_err();
    assert!(matches!(error, StudioError::Validation(_)));
    assert_eq!(error.kind(), ErrorKind::RequestShape);
    assert!(h.model.tracked_content_requests().is_empty());
    assert_eq!(h.session.snapshot().await.status, Status::Error);
}

#[tokio::test]
async fn alliance_ad_attaches_the_ally() {
    let h = harness(fast_config());
    h.model
        .enqueue_content("Trail Ready###PRIMARYTEXT###Gear up.###IMAGEPROMPT###a ridge at dawn###HASHTAGS####outdoors");

    let keystone = format!("fbadcode-{}-{}-{}", "PUB123456789", "3fRLIQdX5vyXG6Bti4c", "covenant");
    let input = GenerationInput::new(ContentType::AllianceAd).alliance_ad(AllianceAdInput {
        keystone,
        core_message: "Autumn sale".to_string(),
        ..AllianceAdInput::default()
    });
    let variations = h.session.generate(input).await.unwrap();

    let GeneratedContent::AllianceAd(ad) = &variations[0] else {
        panic!("expected an alliance ad");
    };
    assert_eq!(ad.headline, "Trail Ready");
    assert_eq!(ad.ally.as_ref().map(|ally| ally.name.as_str()), Some("Aurora Outfitters"));
}

#[tokio::test]
async fn history_keeps_the_fifty_most_recent() {
    let h = harness(fast_config());
    for index in 0..51 {
        h.model.enqueue_content(TEXT_POST);
        let input = GenerationInput::new(ContentType::Text).topic(format!("topic {index}"));
        h.session.generate(input).await.unwrap();
    }

    let history = h.session.history().unwrap();
    assert_eq!(history.len(), 50);
    assert_eq!(history[0].prompt, "topic 50");
    assert_eq!(history[49].prompt, "topic 1");

    h.session.clear_history().unwrap();
    assert!(h.session.history().unwrap().is_empty());
}

#[tokio::test]
async fn seo_post_advances_from_titles_to_article() {
    let h = harness(fast_config());
    let source = Source {
        uri: "https://example.com/seo".to_string(),
        title: "SEO guide".to_string(),
    };
    h.model.enqueue_content(
        ContentResponse::from_text("Title A###TITLE###Title B###TITLE###Title C")
            .with_sources(vec![source.clone()]),
    );
    h.model
        .enqueue_content("A short meta.###TAGS###seo, writing###BODY##### Intro\nBody text.");

    let input = GenerationInput::new(ContentType::SeoBlogPost).seo_blog(SeoBlogInput {
        topic: "Writing for search".to_string(),
        keyword: "seo writing".to_string(),
        ..SeoBlogInput::default()
    });
    let variations = h.session.generate(input).await.unwrap();
    let GeneratedContent::SeoBlogPost(titles) = &variations[0] else {
        panic!("expected an SEO post");
    };
    assert_eq!(titles.stage, SeoStage::Titles);
    assert_eq!(titles.titles, vec!["Title A", "Title B", "Title C"]);
    assert!(variations[0].review_text().is_empty());

    let advanced = h.session.select_seo_title("Title B").await.unwrap();
    let GeneratedContent::SeoBlogPost(article) = &advanced else {
        panic!("expected an SEO post");
    };
    assert_eq!(article.stage, SeoStage::Article);
    assert_eq!(article.selected_title.as_deref(), Some("Title B"));
    assert_eq!(article.titles, vec!["Title A", "Title B", "Title C"]);
    assert_eq!(article.sources, vec![source]);
    assert_eq!(article.meta_description, "A short meta.");
    assert_eq!(article.tags, vec!["seo", "writing"]);

    let second = &h.model.tracked_content_requests()[1];
    assert!(second.contents[0].text().contains("Chosen Title: \"Title B\""));

    let state = h.session.snapshot().await;
    assert_eq!(state.current(), Some(&advanced));
    assert_eq!(h.history.list().unwrap().len(), 2);
}

#[tokio::test]
async fn review_attaches_verdict_to_the_variation() {
    let h = harness(fast_config());
    h.model
        .enqueue_content("Headline Text###PRIMARYTEXT###Body text###IMAGEPROMPT###A city###HASHTAGS####AI")
        .enqueue_content(r#"{"score":82,"rationale":"On voice","suggestions":["Fewer hashtags"]}"#);

    let input = GenerationInput::new(ContentType::Ad).ad(content_studio::input::AdCreativeInput {
        product_or_service: "Smart lamp".to_string(),
        ..Default::default()
    });
    h.session.generate(input).await.unwrap();
    let review = h.session.review(0).await.unwrap();

    assert_eq!(review.status, Status::Success);
    let alignment = review.alignment.unwrap();
    assert!((alignment.score - 82.0).abs() < f64::EPSILON);

    let review_request = &h.model.tracked_content_requests()[1];
    assert_eq!(
        review_request.contents[0].text(),
        "Headline: Headline Text\n\nBody text"
    );
    let state = h.session.snapshot().await;
    assert_eq!(
        state.variations[0].review().map(|review| review.status),
        Some(Status::Success)
    );
}

#[tokio::test]
async fn review_failure_is_recorded_on_the_variation() {
    let h = harness(fast_config());
    h.model.enqueue_content(TEXT_POST).enqueue_content("no json here");

    h.session
        .generate(GenerationInput::new(ContentType::Text).topic("AI"))
        .await
        .unwrap();
    let error = h.session.review(0).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);

    let state = h.session.snapshot().await;
    let review = state.variations[0].review().unwrap();
    assert_eq!(review.status, Status::Error);
    assert!(review.error.is_some());
}

#[tokio::test]
async fn image_sub_flow_fills_the_slot() {
    let h = harness(fast_config());
    h.model
        .enqueue_content("Morning brew###IMAGEPROMPT###steaming cup###HASHTAGS####coffee")
        .enqueue_image(GeneratedImage {
            image_bytes: "QUJD".to_string(),
            mime_type: "image/jpeg".to_string(),
        });

    h.session
        .generate(GenerationInput::new(ContentType::Image).topic("coffee"))
        .await
        .unwrap();
    h.session
        .set_image_prompt(0, "steaming cup, top-down")
        .await
        .unwrap();
    let data_url = h.session.generate_image(0, AspectRatio::Portrait).await.unwrap();

    assert_eq!(data_url, "data:image/jpeg;base64,QUJD");
    let request = &h.model.tracked_image_requests()[0];
    assert_eq!(request.prompt, "steaming cup, top-down");
    assert_eq!(request.aspect_ratio, AspectRatio::Portrait);

    let state = h.session.snapshot().await;
    assert_eq!(state.image_status, Status::Success);
    assert_eq!(
        state.variations[0].image(),
        Some(&ImageSlot::Ready(data_url))
    );
}

#[tokio::test]
async fn video_job_reports_progress_until_ready() {
    let h = harness(fast_config());
    h.model
        .enqueue_video(VideoOperation::pending("operations/1"))
        .enqueue_poll(VideoOperation {
            progress_percentage: Some(40.0),
            ..VideoOperation::pending("operations/1")
        })
        .enqueue_poll(VideoOperation {
            done: true,
            video_uri: Some("https://videos.example.com/v.mp4".to_string()),
            ..VideoOperation::pending("operations/1")
        });

    let stream = h.session.generate_video("a paper boat at sea", None).unwrap();
    let snapshots: Vec<_> = stream.collect().await;
    let snapshots: Vec<_> = snapshots.into_iter().map(Result::unwrap).collect();

    let messages: Vec<_> = snapshots.iter().map(|s| s.status_message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Initiating video generation...",
            "Video request received. Waiting for processing to start...",
            "Processing video: 40% complete.",
            "Video ready!",
        ]
    );
    let last = snapshots.last().unwrap();
    assert_eq!(last.status, VideoStatus::Success);
    assert_eq!(
        last.video_url.as_deref(),
        Some("https://videos.example.com/v.mp4?key=mock-key")
    );
    assert_eq!(h.model.tracked_polls().len(), 2);
    assert_eq!(h.history.list().unwrap()[0].content_type, ContentType::VideoGeneration);
}

#[tokio::test]
async fn failed_video_operation_ends_the_stream() {
    let h = harness(fast_config());
    h.model
        .enqueue_video(VideoOperation::pending("operations/2"))
        .enqueue_poll(VideoOperation {
            done: true,
            error: Some("quota".to_string()),
            ..VideoOperation::pending("operations/2")
        });

    let mut stream = h.session.generate_video("storm clouds", None).unwrap();
    let mut last = None;
    while let Some(item) = stream.next().await {
        last = Some(item);
    }
    assert!(last.unwrap().is_err());

    let state = h.session.snapshot().await;
    assert_eq!(state.video.map(|video| video.status), Some(VideoStatus::Error));
    assert!(h.history.list().unwrap().is_empty());
}

fn caption_of(content: &GeneratedContent) -> &str {
    match content {
        GeneratedContent::Text(post) => &post.caption,
        other => panic!("unexpected {other:?}"),
    }
}

fn caption_json(caption: &str) -> String {
    format!(r#"{{"caption":"{caption}","hashtags":[],"safetyAnalysis":{{"isSafe":true,"reasoning":""}}}}"#)
}

#[tokio::test]
async fn in_memory_session_honours_configured_history_limit() {
    let model = Arc::new(MockGenerativeModel::new());
    let config = StudioConfig::builder().history_limit(3).build();
    let session = GenerationSession::in_memory(GenAiClient::new(model.clone()), Arc::new(config));

    for index in 0..4 {
        model.enqueue_content(caption_json(&format!("post {index}")).as_str());
        session
            .generate(GenerationInput::new(ContentType::Text).topic(format!("topic {index}")))
            .await
            .unwrap();
    }

    let history = session.history().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].prompt, "topic 3");
    assert_eq!(history[2].prompt, "topic 1");
}

#[tokio::test]
async fn newer_request_supersedes_older_state() {
    let h = harness(fast_config());
    // The first request hits a transient error and backs off, letting the
    // second request finish first.
    h.model
        .enqueue_content(MockResult::error(GenerativeModelError::OperationFailed(
            "The model is overloaded (UNAVAILABLE)".to_string(),
        )))
        .enqueue_content(caption_json("second").as_str())
        .enqueue_content(caption_json("first").as_str());

    let (first, second) = futures::join!(
        h.session.generate(GenerationInput::new(ContentType::Text).topic("first")),
        h.session.generate(GenerationInput::new(ContentType::Text).topic("second")),
    );

    assert_eq!(caption_of(&first.unwrap()[0]), "first");
    assert_eq!(caption_of(&second.unwrap()[0]), "second");

    let state = h.session.snapshot().await;
    assert_eq!(state.status, Status::Success);
    assert_eq!(caption_of(&state.variations[0]), "second");
    assert_eq!(
        state.last_input.map(|input| input.topic),
        Some("second".to_string())
    );
    assert_eq!(h.history.list().unwrap().len(), 2);
}
