mod common;

use common::{API_KEY_ENV, gemini_reply};
use draftsmith::domain::GenerationMode;
use draftsmith::ports::ExportFormat;
use draftsmith::{
    AppConfig, AppError, DocumentRequest, DocumentType, RefinementRequest, Session, ToneType,
};
use serial_test::serial;
use url::Url;

const PATH: &str = "/models/gemini-test:generateContent";

fn config_for(server: &mockito::Server) -> AppConfig {
    let mut config = AppConfig::default();
    config.generation.api_base = Url::parse(&server.url()).unwrap();
    config.generation.model = "gemini-test".to_string();
    config.generation.max_retries = 0;
    config
}

fn with_api_key<T>(f: impl FnOnce() -> T) -> T {
    let saved = std::env::var_os(API_KEY_ENV);
    unsafe {
        std::env::set_var(API_KEY_ENV, "library-test-key");
    }
    let result = f();
    unsafe {
        match saved {
            Some(value) => std::env::set_var(API_KEY_ENV, value),
            None => std::env::remove_var(API_KEY_ENV),
        }
    }
    result
}

fn request() -> DocumentRequest {
    DocumentRequest::new(
        "Inform students that the library closes at 14:00 on Friday",
        DocumentType::Announcement,
        ToneType::Friendly,
    )
    .with_sender("Anna Schmidt", "Head of Library Services")
}

#[test]
fn preview_prompt_binds_every_type_and_tone() {
    for doc_type in DocumentType::ALL {
        for tone in ToneType::ALL {
            let request = DocumentRequest::new("Announce the new printer", doc_type, tone)
                .with_sender("Anna Schmidt", "IT Services");
            let prompt = draftsmith::preview_prompt(AppConfig::default(), &request).unwrap();
            assert!(prompt.text.contains("Announce the new printer"));
            assert!(!prompt.text.contains("{{"));
            assert_eq!(prompt.doc_type, doc_type);
        }
    }
}

#[test]
#[serial]
fn generate_then_refine_through_the_service() {
    let mut server = mockito::Server::new();
    let first = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "library-test-key")
        .match_body(mockito::Matcher::Regex("Request parameters".to_string()))
        .with_status(200)
        .with_body(gemini_reply(
            "Subject: Library closes early\n\nDear students,\n\nThe library closes at 14:00 on Friday.\n\nBest wishes,\nAnna Schmidt",
        ))
        .expect(1)
        .create();
    let second = server
        .mock("POST", PATH)
        .match_body(mockito::Matcher::Regex("Refinement Instructions".to_string()))
        .with_status(200)
        .with_body(gemini_reply(
            "Subject: Library closes early\n\nDear students,\n\nThe library closes at 14:00 on Thursday.\n\nBest wishes,\nAnna Schmidt",
        ))
        .expect(1)
        .create();

    let ctx = with_api_key(|| draftsmith::connect(config_for(&server))).unwrap();
    let mut session = Session::new();

    let generated = draftsmith::generate(&ctx, &mut session, &request()).unwrap();
    let refined = draftsmith::refine(
        &ctx,
        &mut session,
        &RefinementRequest::new("change the day to Thursday"),
    )
    .unwrap();

    first.assert();
    second.assert();
    assert_eq!(session.ledger().len(), 2);
    assert_eq!(generated.metadata.mode, GenerationMode::Generated);
    assert_eq!(refined.metadata.mode, GenerationMode::Refined);
    assert!(refined.body.contains("Thursday"));
    assert_eq!(session.ledger().all()[0].body, generated.body);

    let file = draftsmith::export_entry(&ctx, &session, 1, ExportFormat::Txt).unwrap();
    assert!(String::from_utf8(file.bytes).unwrap().contains("on Thursday"));
}

#[test]
#[serial]
fn empty_service_reply_is_not_committed() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .expect(1)
        .create();

    let ctx = with_api_key(|| draftsmith::connect(config_for(&server))).unwrap();
    let mut session = Session::new();

    let err = draftsmith::generate(&ctx, &mut session, &request()).unwrap_err();
    assert!(matches!(err, AppError::EmptyGenerationResult));
    assert!(err.is_retryable());
    assert!(session.ledger().is_empty());
    mock.assert();
}

#[test]
#[serial]
fn transient_failure_is_retried_once() {
    let mut server = mockito::Server::new();
    let failing = server.mock("POST", PATH).with_status(503).expect(2).create();

    let mut config = config_for(&server);
    config.generation.max_retries = 1;
    config.generation.retry_delay_ms = 1;

    let ctx = with_api_key(|| draftsmith::connect(config)).unwrap();
    let err = draftsmith::generate_document(&ctx, &request()).unwrap_err();

    assert!(matches!(err, AppError::GenerationService { status: Some(503), .. }));
    failing.assert();
}
