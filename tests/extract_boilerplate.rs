// tests/extract_boilerplate.rs
// Content extraction against realistic page templates: navigation, asides,
// footers and comment threads around one article.

use article_insight::extract::{extract, Extractor, ExtractorConfig};
use article_insight::ExtractionError;

const NAV_WORDS: [&str; 20] = [
    "Homepage", "Worldwide", "Businesses", "Technologies", "Sciences", "Healthcare", "Sporting",
    "Entertainment", "Lifestyle", "Travelogue", "Opinionated", "Podcasts", "Newsletters",
    "Subscriptions", "Careers", "Advertising", "Contacts", "Archives", "Weathercast", "Obituaries",
];

// ~500 words of prose in 20 paragraphs; vocabulary disjoint from NAV_WORDS
fn article_paragraphs() -> Vec<String> {
    let base = [
        "The river valley has been farmed for centuries, and the families who live there still remember the great flood of their grandparents' era.",
        "This spring, engineers finished a levee that promises to protect the lowest fields, although some residents question whether it is tall enough.",
        "Local officials argue the project, funded by regional grants, will pay for itself within a decade through avoided damage and higher yields.",
        "Farmers interviewed along the eastern bank described planting earlier than usual, encouraged by the new barrier and a mild, dry forecast.",
        "Hydrologists caution that climate patterns are shifting, so historic records may understate how much water the valley could see in future storms.",
    ];
    (0..20).map(|i| base[i % base.len()].to_string()).collect()
}

fn page() -> String {
    let nav: String = NAV_WORDS
        .iter()
        .map(|w| format!(r#"<li><a href="/{}">{w}</a></li>"#, w.to_lowercase()))
        .collect();
    let paras: String = article_paragraphs()
        .iter()
        .map(|p| format!("<p>{p}</p>"))
        .collect();
    format!(
        r#"<!doctype html><html><head><title>Valley Levee Completed - The Daily Ledger</title>
        <script>window.dataLayer = [];</script><style>.x {{ color: red }}</style></head>
        <body><nav><ul>{nav}</ul></nav>
        <main><article><h1>Valley Levee Completed</h1>{paras}</article></main>
        <aside class="related"><p>Read next: a much longer story about something else entirely, with commas, many commas, and more.</p></aside>
        <footer><p>Copyright notice and legal disclaimers for the publisher.</p></footer>
        </body></html>"#
    )
}

#[test]
fn nav_words_never_reach_the_body() {
    let article = extract(&page()).expect("article extracted");
    for w in NAV_WORDS {
        assert!(!article.body_text.contains(w), "nav word leaked: {w}");
    }
    assert!(article.body_text.contains("river valley"));
    assert!(article.body_text.contains("Hydrologists caution"));
    assert!(!article.body_text.contains("Read next"));
    assert!(!article.body_text.contains("Copyright"));
    assert!(!article.body_text.contains("dataLayer"));
    assert_eq!(article.title, "Valley Levee Completed");
}

#[test]
fn body_is_plain_text_one_paragraph_per_block() {
    let article = extract(&page()).expect("article extracted");
    assert!(!article.body_text.contains('<'));
    assert_eq!(article.body_text, article.body_text.trim());

    let blocks: Vec<&str> = article.body_text.split("\n\n").collect();
    assert_eq!(blocks.len(), article_paragraphs().len());
    for (block, expected) in blocks.iter().zip(article_paragraphs()) {
        assert_eq!(*block, expected);
        assert!(!block.contains('\n') && !block.contains("  "));
    }
}

#[test]
fn entities_and_curly_quotes_are_normalized() {
    let html = format!(
        "<html><body><article><p>&ldquo;It&rsquo;s finished,&rdquo; the engineer said &amp; smiled.</p>{}</article></body></html>",
        article_paragraphs()
            .iter()
            .map(|p| format!("<p>{p}</p>"))
            .collect::<String>()
    );
    let article = extract(&html).expect("article extracted");
    assert!(article.body_text.starts_with("\"It's finished,\" the engineer said & smiled."));
}

#[test]
fn comment_threads_lose_to_the_story() {
    let comments: String = (0..6)
        .map(|i| format!("<p>Comment {i}: I totally agree, great reporting, thanks, keep it up, well done.</p>"))
        .collect();
    let html = format!(
        r#"<html><body><div id="story">{}</div><div id="comments">{comments}</div></body></html>"#,
        article_paragraphs()
            .iter()
            .take(4)
            .map(|p| format!("<p>{p}</p>"))
            .collect::<String>()
    );
    let article = extract(&html).expect("article extracted");
    assert!(!article.body_text.contains("great reporting"));
    assert!(article.body_text.contains("levee"));
}

#[test]
fn min_body_threshold_is_configurable() {
    let html = "<html><body><article><p>A short but complete paragraph about the levee project.</p></article></body></html>";
    assert!(matches!(
        extract(html),
        Err(ExtractionError::BodyTooShort { min: 200, .. })
    ));

    let lenient = Extractor::new(ExtractorConfig {
        min_body_chars: 20,
        ..ExtractorConfig::default()
    });
    let article = lenient.extract(html).expect("lenient extraction");
    assert_eq!(
        article.body_text,
        "A short but complete paragraph about the levee project."
    );
}

#[test]
fn extraction_is_deterministic() {
    let p = page();
    assert_eq!(extract(&p), extract(&p));
}

fn wrapped(open: &str, close: &str) -> String {
    let paras: String = article_paragraphs()
        .iter()
        .take(8)
        .map(|p| format!("<p>{p}</p>"))
        .collect();
    format!(
        "<html><head><title>Valley Levee Finally Completed - The Daily Ledger</title></head>\
         <body>{open}<nav><a href=\"/\">Homepage</a></nav>{paras}{close}</body></html>"
    )
}

#[test]
fn aspnet_form_wrapper_keeps_the_article() {
    let html = wrapped(
        r#"<form method="post" action="./story.aspx" id="aspnetForm"><input type="hidden" name="__VIEWSTATE" value="x">"#,
        "</form>",
    );
    let article = extract(&html).expect("article inside a page-level form");
    assert!(article.body_text.starts_with("The river valley"));
    assert!(article.body_text.contains("Hydrologists caution"));
    assert!(!article.body_text.contains("Homepage"));
    assert!(!article.body_text.contains("VIEWSTATE"));
}

#[test]
fn unlikely_class_on_page_wrapper_falls_back_to_lenient_pass() {
    let html = wrapped(r#"<div id="page" class="layout with-sidebar">"#, "</div>");
    let article = extract(&html).expect("article inside a with-sidebar layout");
    assert!(article.body_text.starts_with("The river valley"));
    assert_eq!(article.body_text.split("\n\n").count(), 8);
    assert!(!article.body_text.contains("Homepage"));
    assert_eq!(article.title, "Valley Levee Finally Completed");
}
