use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::binder::Renderer;
use crate::controls::ControlKind;
use crate::images::{AcceptAll, ImageRotator, OverrideTable, DEFAULT_IMAGE};
use crate::output::PageView;
use crate::paginator::{EmptyListPolicy, NavAction, PAGE_SIZE};
use crate::repository::{CharacterRepository, FetchError};
use crate::session::Session;

struct Stub {
    url: String,
    hits: Arc<AtomicUsize>,
}

/// Answers every connection with the same canned HTTP response.
async fn serve(status: &'static str, body: String) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    Stub {
        url: format!("http://{addr}/characters"),
        hits,
    }
}

fn repository(url: &str) -> CharacterRepository {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    CharacterRepository::new(client, url)
}

fn session(characters: Vec<crate::repository::Character>) -> Session {
    let rotator = ImageRotator::new(OverrideTable::builtin(), DEFAULT_IMAGE, Box::new(AcceptAll));
    Session::new(characters, PAGE_SIZE, EmptyListPolicy::FloorToOne, rotator)
}

fn roster_body(n: usize) -> String {
    let characters: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            json!({
                "name": format!("Ninja {i}"),
                "personal": { "affiliation": ["Konohagakure"], "clan": "Sarutobi" },
                "natureType": ["Fire Release"],
                "images": [format!("https://img.example/{i}.png")]
            })
        })
        .collect();
    json!({ "characters": characters, "total": n }).to_string()
}

#[tokio::test]
async fn nine_characters_make_three_pages() {
    let stub = serve("200 OK", roster_body(9)).await;
    let characters = repository(&stub.url).load().await.unwrap();
    let mut s = session(characters);
    let mut view = PageView::standard(PAGE_SIZE);

    s.render(&mut view);
    assert_eq!(s.state().total_pages, 3);
    let names: Vec<String> = view.cards().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Ninja 0", "Ninja 1", "Ninja 2", "Ninja 3"]);

    s.navigate(NavAction::Goto(3), &mut view);
    let cards = view.cards();
    assert_eq!(cards[0].name, "Ninja 8");
    assert!(cards[1..].iter().all(|c| c.is_blank()));
    assert_eq!(s.visible().len(), 1);
    assert_eq!(view.controls().active_page(), Some(3));
}

#[tokio::test]
async fn character_without_images_keeps_placeholder() {
    let body = json!({ "characters": [{ "name": "Might Guy", "images": [] }] }).to_string();
    let stub = serve("200 OK", body).await;
    let mut s = session(repository(&stub.url).load().await.unwrap());
    let mut view = PageView::standard(PAGE_SIZE);
    s.render(&mut view);

    let slot = s.slot(1).unwrap();
    assert_eq!(view.image("card-image-1").unwrap().url, DEFAULT_IMAGE);
    s.activate_image(slot, &mut view);
    assert_eq!(view.image("card-image-1").unwrap().url, DEFAULT_IMAGE);
    assert_eq!(s.cycle(slot).unwrap().cursor(), 0);
}

#[tokio::test]
async fn override_entry_rotates_after_api_image() {
    let body = json!({
        "characters": [{ "name": "Jiraiya", "images": ["https://img.example/jiraiya.png"] }]
    })
    .to_string();
    let stub = serve("200 OK", body).await;
    let mut s = session(repository(&stub.url).load().await.unwrap());
    let mut view = PageView::standard(PAGE_SIZE);
    s.render(&mut view);

    let slot = s.slot(1).unwrap();
    let overrides = OverrideTable::builtin();
    let extra = overrides.get("Jiraiya").unwrap();
    assert_eq!(s.cycle(slot).unwrap().images().len(), 1 + extra.len());
    assert_eq!(
        view.image("card-image-1").unwrap().url,
        "https://img.example/jiraiya.png"
    );

    s.activate_image(slot, &mut view);
    assert_eq!(view.image("card-image-1").unwrap().url, extra[0]);
}

#[tokio::test]
async fn failed_fetch_renders_empty_single_page() {
    let stub = serve("500 Internal Server Error", String::new()).await;
    let repo = repository(&stub.url);

    let err = repo.load().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }));

    let mut s = session(repo.load_or_empty().await);
    let mut view = PageView::standard(PAGE_SIZE);
    s.render(&mut view);

    assert!(view.cards().iter().all(|c| c.is_blank()));
    assert_eq!(view.controls().pages().count(), 1);
    assert!(!view.controls().find(ControlKind::Previous).unwrap().enabled);
    assert!(!view.controls().find(ControlKind::Next).unwrap().enabled);
}

#[tokio::test]
async fn body_without_list_degrades_to_empty() {
    let stub = serve("200 OK", json!({ "error": "maintenance" }).to_string()).await;
    let repo = repository(&stub.url);
    assert!(matches!(
        repo.load().await,
        Err(FetchError::MissingCharacters { .. })
    ));
    assert!(repo.load_or_empty().await.is_empty());
}

#[tokio::test]
async fn each_load_is_a_separate_request() {
    let stub = serve("200 OK", roster_body(2)).await;
    let repo = repository(&stub.url);
    assert_eq!(repo.load().await.unwrap().len(), 2);
    assert_eq!(repo.load().await.unwrap().len(), 2);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let repo = repository(&format!("http://{addr}/characters"));
    assert!(matches!(
        repo.load().await,
        Err(FetchError::Request { .. })
    ));
}

#[tokio::test]
async fn odd_records_still_render() {
    let body = json!({
        "characters": [
            { "name": 7, "personal": { "clan": ["Hyuga", "Otsutsuki"] } },
            null,
            { "name": "Shino Aburame", "natureType": "Earth Release" }
        ]
    })
    .to_string();
    let stub = serve("200 OK", body).await;
    let mut s = session(repository(&stub.url).load().await.unwrap());
    let mut view = PageView::standard(PAGE_SIZE);
    s.render(&mut view);

    assert_eq!(view.text("personaje-1"), Some("Nombre no disponible"));
    assert_eq!(view.text("clan-personaje1"), Some("Clan: Hyuga,Otsutsuki"));
    assert_eq!(
        view.text("aldea-personaje2"),
        Some("Aldeas donde estuvo: Desconocida")
    );
    assert_eq!(
        view.text("habilidades-personaje3"),
        Some("Habilidades: Earth Release")
    );
    assert!(view.text("personaje-4").unwrap().is_empty());
}

#[test]
fn missing_regions_do_not_stop_the_render() {
    let characters = (0..4)
        .map(|i| crate::repository::Character::named(&format!("Genin {i}")))
        .collect();
    let mut s = session(characters);
    let mut view = PageView::standard(PAGE_SIZE);
    view.remove_region("personaje-2");
    view.remove_region("card-image-3");
    s.render(&mut view);

    assert_eq!(view.text("personaje-1"), Some("Genin 0"));
    assert_eq!(view.text("personaje-2"), None);
    assert_eq!(view.text("personaje-3"), Some("Genin 2"));
    assert!(view.image("card-image-3").is_none());
    assert!(!view.set_image("card-image-3", "x", "y"));
    assert_eq!(view.redraws(), 1);
}

#[test]
fn zero_page_policy_renders_no_page_buttons() {
    let rotator = ImageRotator::new(OverrideTable::empty(), DEFAULT_IMAGE, Box::new(AcceptAll));
    let mut s = Session::new(Vec::new(), PAGE_SIZE, EmptyListPolicy::Zero, rotator);
    let mut view = PageView::standard(PAGE_SIZE);
    s.render(&mut view);
    assert_eq!(s.state().total_pages, 0);
    assert_eq!(view.controls().pages().count(), 0);
    assert!(!s.navigate(NavAction::Next, &mut view));
}
