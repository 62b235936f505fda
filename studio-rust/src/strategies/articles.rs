use super::{prompts, require, sections, text_request, with_auto_link, GenerationStrategy};
use crate::{
    content::{
        AmpArticle, AmpPrototype, BlogPost, CampaignPost, EmailBody, EmailSubject, ImageSlot,
        MonetizedCampaign, SeoBlogPost, SeoStage,
    },
    parse::{
        self, ARTICLE_BODY, ARTICLE_CTA, ARTICLE_TITLE, BODY, CTA, FB_HASHTAGS, FB_IMAGE_PROMPT,
        HASHTAGS, IMAGE_PROMPT, TAGS,
    },
    ContentType, GeneratedContent, GenerationInput, StudioConfig, StudioResult,
};
use genai_sdk::{ContentRequest, ContentResponse, ToolOption};

pub static BLOG: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Blog,
    build_params: build_blog,
    parse_response: parse_blog,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static PROTOTYPE: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::Prototype,
    build_params: build_prototype,
    parse_response: parse_prototype,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static MONETIZED_ARTICLE_CAMPAIGN: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::MonetizedArticleCampaign,
    build_params: build_monetized_campaign,
    parse_response: parse_monetized_campaign,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

/// Two-stage: titles first, then the article for the selected title.
pub static SEO_BLOG_POST: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::SeoBlogPost,
    build_params: build_seo_blog_post,
    parse_response: parse_seo_blog_post,
    disable_variations: true,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static EMAIL_SUBJECT: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::EmailSubject,
    build_params: build_email_subject,
    parse_response: parse_email_subject,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

pub static EMAIL_BODY: GenerationStrategy = GenerationStrategy {
    content_type: ContentType::EmailBody,
    build_params: build_email_body,
    parse_response: parse_email_body,
    disable_variations: false,
    extract_text_for_review: Some(GeneratedContent::review_text),
};

const CAMPAIGN_SENTINELS: [&str; 5] = [
    FB_IMAGE_PROMPT,
    FB_HASHTAGS,
    ARTICLE_TITLE,
    ARTICLE_BODY,
    ARTICLE_CTA,
];

fn build_blog(input: &GenerationInput, config: &StudioConfig) -> StudioResult<ContentRequest> {
    require(&input.topic, "Please enter a topic.")?;
    let prompt = with_auto_link(format!("Generate a blog post about: {}", input.topic), input);
    Ok(text_request(input, config, prompts::blog(), prompt))
}

fn parse_blog(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [title, body, image_prompt, hashtags] =
        sections::<4>(&response.text, &[BODY, IMAGE_PROMPT, HASHTAGS]);
    let image = match &input.input_image {
        Some(image) => ImageSlot::Ready(image.to_data_url()),
        None => ImageSlot::PromptReady,
    };
    Ok(GeneratedContent::Blog(BlogPost {
        title,
        body,
        hashtags: parse::hashtags(&hashtags),
        image_prompt,
        image,
        ..BlogPost::default()
    }))
}

fn article_prompt(input: &GenerationInput) -> StudioResult<String> {
    let article = &input.article;
    require(&article.product_or_service, "Please describe the product or service.")?;
    Ok(format!(
        "Product/Service: \"{}\"\nArticle Goal: \"{}\"\nTarget Audience: \"{}\"\nKey Points: \"{}\"",
        article.product_or_service, article.article_goal, article.target_audience, article.key_points
    ))
}

fn build_prototype(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    Ok(text_request(input, config, prompts::prototype(), article_prompt(input)?))
}

fn parse_prototype(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let [title, amp_body, cta_text] = sections::<3>(&response.text, &[BODY, CTA]);
    Ok(GeneratedContent::Prototype(AmpPrototype {
        article: AmpArticle {
            title,
            amp_body,
            cta_text,
        },
        ..AmpPrototype::default()
    }))
}

fn build_monetized_campaign(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    Ok(text_request(
        input,
        config,
        prompts::monetized_campaign(),
        article_prompt(input)?,
    ))
}

fn parse_monetized_campaign(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let mut parts = parse::split_on_any(&response.text, &CAMPAIGN_SENTINELS, 6).into_iter();
    let mut next = || parts.next().unwrap_or_default();
    let (caption, image_prompt, hashtags) = (next(), next(), next());
    let (title, amp_body, cta_text) = (next(), next(), next());
    Ok(GeneratedContent::MonetizedArticleCampaign(MonetizedCampaign {
        fb_post: CampaignPost {
            caption,
            hashtags: parse::hashtags(&hashtags),
            image_prompt,
            image: ImageSlot::PromptReady,
        },
        amp_article: AmpArticle {
            title,
            amp_body,
            cta_text,
        },
        ..MonetizedCampaign::default()
    }))
}

fn build_seo_blog_post(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let seo = &input.seo_blog;
    require(&seo.topic, "Please enter a topic or idea.")?;

    if let Some(title) = &input.selected_title {
        let prompt = with_auto_link(
            format!(
                "Chosen Title: \"{title}\"\nOriginal Topic/Idea: \"{}\"\nPrimary Keyword: \"{}\"\n\
                 Target Audience: \"{}\"\nTone: \"{}\"",
                seo.topic, seo.keyword, seo.audience, seo.tone
            ),
            input,
        );
        return Ok(text_request(input, config, prompts::seo_article(), prompt));
    }

    let prompt = format!(
        "Topic/Idea: \"{}\"\nPrimary Keyword: \"{}\"\nTarget Audience: \"{}\"\nTone: \"{}\"",
        seo.topic, seo.keyword, seo.audience, seo.tone
    );
    Ok(text_request(input, config, prompts::seo_titles(), prompt).tool(ToolOption::GoogleSearch))
}

fn parse_seo_blog_post(
    response: &ContentResponse,
    input: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let post = match &input.selected_title {
        Some(title) => {
            let [meta_description, tags, body] = sections::<3>(&response.text, &[TAGS, BODY]);
            SeoBlogPost {
                stage: SeoStage::Article,
                user_input: input.seo_blog.clone(),
                titles: vec![title.clone()],
                selected_title: Some(title.clone()),
                meta_description,
                tags: parse::split_tags(&tags),
                body,
                ..SeoBlogPost::default()
            }
        }
        None => SeoBlogPost {
            stage: SeoStage::Titles,
            user_input: input.seo_blog.clone(),
            titles: parse::split_titles(&response.text),
            sources: response.sources.clone(),
            ..SeoBlogPost::default()
        },
    };
    Ok(GeneratedContent::SeoBlogPost(post))
}

fn build_email_subject(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let email = &input.email_subject;
    require(&email.campaign_type, "Please enter the campaign type.")?;
    let prompt = format!(
        "Campaign Type: \"{}\"\nKey Information: \"{}\"",
        email.campaign_type, email.key_info
    );
    Ok(text_request(input, config, prompts::email_subject(), prompt))
}

fn parse_email_subject(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    let subject = response
        .text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches('"')
        .to_string();
    Ok(GeneratedContent::EmailSubject(EmailSubject {
        subject,
        ..EmailSubject::default()
    }))
}

fn build_email_body(
    input: &GenerationInput,
    config: &StudioConfig,
) -> StudioResult<ContentRequest> {
    let email = &input.email_body;
    require(&email.campaign_type, "Please enter the campaign type.")?;
    let prompt = format!(
        "Campaign Type: \"{}\"\nTarget Audience: \"{}\"\nKey Points: \"{}\"\nTone: \"{}\"",
        email.campaign_type, email.target_audience, email.key_points, email.tone
    );
    Ok(text_request(input, config, prompts::email_body(), prompt))
}

fn parse_email_body(
    response: &ContentResponse,
    _: &GenerationInput,
    _: &StudioConfig,
) -> StudioResult<GeneratedContent> {
    // Models often wrap HTML in a ```html fence.
    let html_body = parse::strip_code_fence(&response.text).to_string();
    Ok(GeneratedContent::EmailBody(EmailBody {
        html_body,
        ..EmailBody::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SeoBlogInput;

    fn seo_input() -> GenerationInput {
        GenerationInput::new(ContentType::SeoBlogPost).seo_blog(SeoBlogInput {
            topic: "Edge AI".to_string(),
            keyword: "edge inference".to_string(),
            audience: "CTOs".to_string(),
            tone: "Authoritative".to_string(),
        })
    }

    #[test]
    fn seo_title_stage_uses_search() {
        let request = build_seo_blog_post(&seo_input(), &StudioConfig::default()).unwrap();
        assert_eq!(request.config.tools, vec![ToolOption::GoogleSearch]);
        assert!(request.contents[0].text().starts_with("Topic/Idea: \"Edge AI\""));

        let response = ContentResponse::from_text("Title A###TITLE###Title B###TITLE###");
        let GeneratedContent::SeoBlogPost(post) =
            parse_seo_blog_post(&response, &seo_input(), &StudioConfig::default()).unwrap()
        else {
            panic!("expected an SEO post");
        };
        assert_eq!(post.stage, SeoStage::Titles);
        assert_eq!(post.titles, vec!["Title A", "Title B"]);
    }

    #[test]
    fn seo_article_stage() {
        let input = seo_input().selected_title("Title B").auto_link_keywords(true);
        let request = build_seo_blog_post(&input, &StudioConfig::default()).unwrap();
        assert!(request.config.tools.is_empty());
        let prompt = request.contents[0].text();
        assert!(prompt.starts_with("Chosen Title: \"Title B\""));
        assert!(prompt.contains("[[machine learning]]"));

        let response =
            ContentResponse::from_text("A meta.###TAGS###ai, edge ,###BODY##### Heading\nText");
        let GeneratedContent::SeoBlogPost(post) =
            parse_seo_blog_post(&response, &input, &StudioConfig::default()).unwrap()
        else {
            panic!("expected an SEO post");
        };
        assert_eq!(post.stage, SeoStage::Article);
        assert_eq!(post.selected_title.as_deref(), Some("Title B"));
        assert_eq!(post.meta_description, "A meta.");
        assert_eq!(post.tags, vec!["ai", "edge"]);
        assert_eq!(post.body, "## Heading\nText");
    }

    #[test]
    fn campaign_tolerates_missing_parts() {
        let response = ContentResponse::from_text(
            "Read this!###FB_IMAGE_PROMPT###A lamp###FB_HASHTAGS####light #home###ARTICLE_TITLE###Lamps",
        );
        let GeneratedContent::MonetizedArticleCampaign(campaign) = parse_monetized_campaign(
            &response,
            &GenerationInput::default(),
            &StudioConfig::default(),
        )
        .unwrap() else {
            panic!("expected a campaign");
        };
        assert_eq!(campaign.fb_post.caption, "Read this!");
        assert_eq!(campaign.fb_post.hashtags, vec!["#light", "#home"]);
        assert_eq!(campaign.amp_article.title, "Lamps");
        assert_eq!(campaign.amp_article.amp_body, "");
        assert_eq!(campaign.amp_article.cta_text, "");
    }

    #[test]
    fn blog_uses_attached_image() {
        let image = genai_sdk::InlineData::from_bytes("image/png", b"png");
        let input = GenerationInput::new(ContentType::Blog).topic("Kites").image(image);
        let response = ContentResponse::from_text("Kites###BODY###Fly");
        let GeneratedContent::Blog(post) =
            parse_blog(&response, &input, &StudioConfig::default()).unwrap()
        else {
            panic!("expected a blog post");
        };
        assert_eq!(post.image, ImageSlot::Ready("data:image/png;base64,cG5n".to_string()));
        assert_eq!(post.body, "Fly");
    }

    #[test]
    fn email_subject_takes_first_line() {
        let response = ContentResponse::from_text("\n\"Your spring sale starts now\"\nextra");
        let content = parse_email_subject(
            &response,
            &GenerationInput::new(ContentType::EmailSubject),
            &StudioConfig::default(),
        )
        .unwrap();
        assert_eq!(content.review_text(), "Your spring sale starts now");
    }
}
