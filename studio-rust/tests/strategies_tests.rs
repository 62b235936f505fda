use content_studio::{
    content::ImageSlot,
    input::{
        AdCreativeInput, AllianceAdInput, ArticleInput, AutomatedResponderInput, BrandVoiceInput,
        EmailBodyInput, EmailSubjectInput, EngagementBoosterInput, GoogleBusinessPostInput,
        GuidedPostInput, SeoBlogInput, VoiceDialogInput, WhatsAppResponderInput,
    },
    strategy_for, ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioError,
};
use genai_sdk::{ContentResponse, ErrorKind};

fn run(input: &GenerationInput, text: &str) -> Result<GeneratedContent, StudioError> {
    let config = StudioConfig::default();
    let strategy = strategy_for(input.content_type)?;
    (strategy.build_params)(input, &config)?;
    (strategy.parse_response)(&ContentResponse::from_text(text), input, &config)
}

#[test]
fn text_post_from_json_response() {
    let input = GenerationInput::new(ContentType::Text).topic("future of AI");
    let content = run(
        &input,
        r##"{"caption":"The future is bright","hashtags":["#AI","#Future"],"safetyAnalysis":{"isSafe":true,"reasoning":"ok"}}"##,
    )
    .unwrap();

    let GeneratedContent::Text(post) = content else {
        panic!("expected a text post");
    };
    assert_eq!(post.caption, "The future is bright");
    assert_eq!(post.hashtags, vec!["#AI", "#Future"]);
    assert!(post.safety_analysis.is_safe);
    assert!(post.image.is_none());
}

#[test]
fn ad_from_delimited_response() {
    let input = GenerationInput::new(ContentType::Ad).ad(AdCreativeInput {
        product_or_service: "Smart lamp".to_string(),
        call_to_action: "Shop Now".to_string(),
        ..AdCreativeInput::default()
    });
    let content = run(
        &input,
        "Headline Text###PRIMARYTEXT###Body text###IMAGEPROMPT###A futuristic city###HASHTAGS###  #Ethical #AI",
    )
    .unwrap();

    let GeneratedContent::Ad(ad) = content else {
        panic!("expected an ad");
    };
    assert_eq!(ad.headline, "Headline Text");
    assert_eq!(ad.primary_text, "Body text");
    assert_eq!(ad.image_prompt, "A futuristic city");
    assert_eq!(ad.hashtags, vec!["#Ethical", "#AI"]);
    assert_eq!(ad.call_to_action, "Shop Now");
    assert_eq!(ad.image, ImageSlot::PromptReady);
}

#[test]
fn invalid_json_names_the_context() {
    let input = GenerationInput::new(ContentType::Text).topic("AI ethics");
    let error = run(&input, "not json at all").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(
        error.to_string(),
        "The AI returned an invalid format for the text post. Please try again."
    );
}

#[test]
fn parsed_content_tag_matches_strategy() {
    let cases: [(GenerationInput, &str); 4] = [
        (
            GenerationInput::new(ContentType::Video).topic("launch"),
            "Big Launch###MESSAGE###Watch this###HASHTAGS####launch",
        ),
        (
            GenerationInput::new(ContentType::Blog).topic("gardening"),
            "Grow More###BODY###Soil first.###IMAGEPROMPT###a garden###HASHTAGS####garden",
        ),
        (
            GenerationInput::new(ContentType::Strategy).topic("bakery"),
            r#"{"goal":"grow"}"#,
        ),
        (
            GenerationInput::new(ContentType::Image).topic("coffee"),
            "Morning brew###IMAGEPROMPT###steaming cup###HASHTAGS####coffee",
        ),
    ];

    for (input, text) in cases {
        let content = run(&input, text).unwrap();
        assert_eq!(content.content_type(), input.content_type);

        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["type"], input.content_type.as_str());
        let back: GeneratedContent = serde_json::from_value(value).unwrap();
        assert_eq!(back, content);
    }
}

#[test]
fn non_strategy_flows_are_unsupported() {
    for content_type in [ContentType::VideoGeneration, ContentType::BrandChat] {
        let error = strategy_for(content_type).unwrap_err();
        assert!(matches!(error, StudioError::Unsupported(found) if found == content_type));
    }
}

/// An input that passes validation for every strategy.
fn filled_input(content_type: ContentType) -> GenerationInput {
    let text = || "coffee".to_string();
    GenerationInput::new(content_type)
        .topic("coffee")
        .url("https://example.com/post")
        .comments("Great beans!")
        .guided(GuidedPostInput {
            monetization_feature: text(),
            ..GuidedPostInput::default()
        })
        .ad(AdCreativeInput {
            product_or_service: text(),
            ..AdCreativeInput::default()
        })
        .alliance_ad(AllianceAdInput {
            keystone: format!("fbadcode-{}X{}Xcovenant", "A".repeat(12), "3fRLIQdX5vyXG6Bti4c"),
            core_message: text(),
            ..AllianceAdInput::default()
        })
        .voice_dialog(VoiceDialogInput {
            dialog_type: text(),
            scenario: text(),
        })
        .google_business_post(GoogleBusinessPostInput {
            business_name: text(),
            ..GoogleBusinessPostInput::default()
        })
        .article(ArticleInput {
            product_or_service: text(),
            ..ArticleInput::default()
        })
        .seo_blog(SeoBlogInput {
            topic: text(),
            ..SeoBlogInput::default()
        })
        .brand_voice(BrandVoiceInput {
            mission_statement: text(),
            ..BrandVoiceInput::default()
        })
        .engagement_booster(EngagementBoosterInput {
            topic: text(),
            ..EngagementBoosterInput::default()
        })
        .automated_responder(AutomatedResponderInput {
            goal: text(),
            ..AutomatedResponderInput::default()
        })
        .whatsapp_responder(WhatsAppResponderInput {
            goal: text(),
            ..WhatsAppResponderInput::default()
        })
        .email_subject(EmailSubjectInput {
            campaign_type: text(),
            ..EmailSubjectInput::default()
        })
        .email_body(EmailBodyInput {
            campaign_type: text(),
            ..EmailBodyInput::default()
        })
}

#[test]
fn every_strategy_yields_its_own_type() {
    for content_type in ContentType::ALL.into_iter().filter(|t| t.has_strategy()) {
        // Every JSON payload defaults missing fields and every delimited
        // parser accepts arbitrary text.
        let content = run(&filled_input(content_type), "{}")
            .unwrap_or_else(|error| panic!("{content_type}: {error}"));
        assert_eq!(content.content_type(), content_type);
    }
}
