mod common;

use axum::http::StatusCode;
use axum_test::{
    multipart::{MultipartForm, Part},
    TestServer,
};
use common::{TestImageStore, REJECTED_BYTES};
use serde_json::Value;
use std::sync::Arc;
use tractor_catalog::{
    adapters::inbound::http::router::create_router,
    app::{AppBuilder, AppServices, AuthBackend},
    domain::models::Credentials,
    ports::storage::ImageStore,
};

const ADMIN_EMAIL: &str = "admin@jrtratores.com.br";
const ADMIN_PASSWORD: &str = "trator123";

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn build_services(store: Option<Arc<dyn ImageStore>>) -> AppServices {
    let mut builder = AppBuilder::new().with_auth_backend(AuthBackend::InMemory {
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
    });
    if let Some(store) = store {
        builder = builder.with_image_store(store);
    }
    builder.build().await.unwrap()
}

/// Server plus a live admin token
async fn setup_with_store(store: Option<Arc<dyn ImageStore>>) -> (TestServer, String) {
    let services = build_services(store).await;

    let session = services
        .auth_gateway
        .sign_in(&Credentials {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        })
        .await
        .unwrap();

    let server = TestServer::new(create_router(services.into_state())).unwrap();
    (server, session.access_token)
}

async fn setup() -> (TestServer, String) {
    setup_with_store(None).await
}

fn tractor_form(name: &str, price: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name)
        .add_text("price", price)
        .add_text("description", "Revisado, pneus novos")
        .add_text("engine", "Perkins 4.236")
        .add_text("drivetrain", "4x4")
        .add_text("condition", "Usado")
        .add_text("year", "2014")
        .add_text("is_available", "true")
}

fn image_part(file_name: &str, data: &[u8]) -> Part {
    Part::bytes(data.to_vec())
        .file_name(file_name)
        .mime_type("image/png")
}

async fn admin_listings(server: &TestServer, token: &str) -> Vec<Value> {
    let response = server
        .get("/api/admin/tractors")
        .add_header("Authorization", bearer(token))
        .await;
    response.assert_status_ok();
    response.json::<Vec<Value>>()
}

async fn create_listing(server: &TestServer, token: &str, name: &str) -> Value {
    let response = server
        .post("/admin/tractors")
        .add_header("Authorization", bearer(token))
        .multipart(
            tractor_form(name, "150000")
                .add_part("main_image", image_part("frente.png", b"main"))
                .add_part("gallery_images", image_part("lado.png", b"side"))
                .add_part("gallery_images", image_part("traseira.png", b"back")),
        )
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin");

    admin_listings(server, token)
        .await
        .into_iter()
        .find(|t| t["name"] == name)
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (server, _) = setup().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_empty_catalog_page() {
    let (server, _) = setup().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Nenhum trator disponível no momento."));
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let (server, _) = setup().await;

    server
        .get("/api/admin/tractors")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/admin/tractors")
        .add_header("Authorization", bearer("not-a-token"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/admin/tractors")
        .multipart(tractor_form("Sem sessão", "1000"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let page = server.get("/admin").await;
    page.assert_status_ok();
    assert!(page.text().contains("action=\"/admin/login\""));
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let (server, _) = setup().await;

    let response = server
        .post("/admin/login")
        .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin");

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("catalog_session="));
    assert!(cookie.contains("HttpOnly"));

    let session_pair = cookie.split(';').next().unwrap().to_string();
    let dashboard = server.get("/admin").add_header("Cookie", session_pair).await;
    dashboard.assert_status_ok();
    assert!(dashboard.text().contains(ADMIN_EMAIL));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let (server, _) = setup().await;

    let response = server
        .post("/admin/login")
        .form(&[("email", ADMIN_EMAIL), ("password", "errada")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.text().contains("Email ou senha incorretos."));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (server, token) = setup().await;

    let response = server
        .post("/admin/logout")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
    assert!(response
        .header("set-cookie")
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    server
        .get("/api/admin/tractors")
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_then_browse() {
    let (server, token) = setup().await;

    let tractor = create_listing(&server, &token, "Massey Ferguson 275").await;
    let id = tractor["id"].as_str().unwrap().to_string();
    let image_url = tractor["image_url"].as_str().unwrap();
    assert!(!image_url.contains('/'));
    assert!(image_url.ends_with(".png"));
    assert_eq!(tractor["whatsapp_number"], "553597400527");
    assert_eq!(tractor["formatted_price"], "R$ 150.000,00");

    let catalog = server.get("/api/tractors").await.json::<Vec<Value>>();
    assert_eq!(catalog.len(), 1);
    assert_eq!(
        catalog[0]["image_public_url"],
        format!("/images/{}", image_url)
    );
    assert!(catalog[0]["contact_link"]
        .as_str()
        .unwrap()
        .starts_with("https://api.whatsapp.com/send?phone=553597400527&text="));

    let detail = server.get(&format!("/api/tractors/{}", id)).await;
    detail.assert_status_ok();
    let detail = detail.json::<Value>();
    assert_eq!(detail["images"].as_array().unwrap().len(), 3);
    assert_eq!(detail["gallery"][0]["sort_order"], 0);
    assert_eq!(detail["gallery"][1]["sort_order"], 1);

    let page = server.get("/").await;
    page.assert_status_ok();
    assert!(page.text().contains("Massey Ferguson 275"));
    assert!(page.text().contains("R$ 150.000,00"));

    let image = server.get(&format!("/images/{}", image_url)).await;
    image.assert_status_ok();
    assert_eq!(image.as_bytes().as_ref(), b"main");
}

#[tokio::test]
async fn test_detail_page_carousel_and_lightbox() {
    let (server, token) = setup().await;
    let tractor = create_listing(&server, &token, "Valtra BH180").await;
    let id = tractor["id"].as_str().unwrap();

    let page = server.get(&format!("/trator/{}", id)).await;
    page.assert_status_ok();
    let html = page.text();
    assert!(html.contains("<title>Valtra BH180 | JR Tratores</title>"));
    assert!(html.contains(&format!("/trator/{}?image=2", id)));
    assert!(html.contains(&format!("/trator/{}?image=1", id)));
    assert!(html.contains("Perkins 4.236"));

    let lightbox = server
        .get(&format!("/trator/{}?image=2&lightbox=true", id))
        .await;
    lightbox.assert_status_ok();
    let html = lightbox.text();
    assert!(html.contains("class=\"lightbox\""));
    // Next from the last image wraps to the first
    assert!(html.contains(&format!("/trator/{}?image=0&amp;lightbox=true", id)));
}

#[tokio::test]
async fn test_unknown_tractor_page() {
    let (server, _) = setup().await;

    let response = server
        .get("/trator/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Trator não encontrado"));

    server
        .get("/trator/nao-existe")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_without_main_image() {
    let (server, token) = setup().await;

    let response = server
        .post("/admin/tractors")
        .add_header("Authorization", bearer(&token))
        .multipart(tractor_form("Sem foto", "1000"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("Erro ao salvar"));
    assert!(html.contains("Por favor, selecione uma imagem."));
    // Form values are kept
    assert!(html.contains("value=\"Sem foto\""));

    assert!(admin_listings(&server, &token).await.is_empty());
}

#[tokio::test]
async fn test_update_keeps_image_and_unchecks_availability() {
    let (server, token) = setup().await;
    let tractor = create_listing(&server, &token, "Ford 4630").await;
    let id = tractor["id"].as_str().unwrap();

    let response = server
        .post(&format!("/admin/tractors/{}", id))
        .add_header("Authorization", bearer(&token))
        .multipart(
            MultipartForm::new()
                .add_text("name", "Ford 4630 Turbo")
                .add_text("price", "99000.5"),
        )
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let listings = admin_listings(&server, &token).await;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["name"], "Ford 4630 Turbo");
    assert_eq!(listings[0]["image_url"], tractor["image_url"]);
    assert_eq!(listings[0]["is_available"], false);

    // No longer public
    let catalog = server.get("/api/tractors").await.json::<Vec<Value>>();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_update_unknown_tractor() {
    let (server, token) = setup().await;

    let response = server
        .post("/admin/tractors/00000000-0000-0000-0000-000000000000")
        .add_header("Authorization", bearer(&token))
        .multipart(tractor_form("Fantasma", "1"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (server, token) = setup().await;
    let tractor = create_listing(&server, &token, "CBT 8060").await;
    let id = tractor["id"].as_str().unwrap();

    let unconfirmed = server
        .post(&format!("/admin/tractors/{}/delete", id))
        .add_header("Authorization", bearer(&token))
        .form(&[("confirm", "false")])
        .await;
    unconfirmed.assert_status(StatusCode::BAD_REQUEST);
    assert!(unconfirmed.text().contains("Erro ao remover"));
    assert_eq!(admin_listings(&server, &token).await.len(), 1);

    let confirmed = server
        .post(&format!("/admin/tractors/{}/delete", id))
        .add_header("Authorization", bearer(&token))
        .form(&[("confirm", "true")])
        .await;
    confirmed.assert_status(StatusCode::SEE_OTHER);
    assert!(admin_listings(&server, &token).await.is_empty());

    server
        .get(&format!("/api/tractors/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_gallery_image_redirects_to_edit() {
    let (server, token) = setup().await;
    let tractor = create_listing(&server, &token, "Massey Ferguson 265").await;
    let id = tractor["id"].as_str().unwrap();

    let detail = server
        .get(&format!("/api/tractors/{}", id))
        .await
        .json::<Value>();
    let image_id = detail["gallery"][0]["id"].as_str().unwrap();

    let response = server
        .post(&format!("/admin/gallery/{}/delete", image_id))
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), format!("/admin?edit={}", id));

    let detail = server
        .get(&format!("/api/tractors/{}", id))
        .await
        .json::<Value>();
    assert_eq!(detail["gallery"].as_array().unwrap().len(), 1);

    let edit_page = server
        .get(&format!("/admin?edit={}", id))
        .add_header("Authorization", bearer(&token))
        .await;
    edit_page.assert_status_ok();
    assert!(edit_page.text().contains("Editar trator"));
}

#[tokio::test]
async fn test_gallery_failure_keeps_tractor() {
    let store: Arc<dyn ImageStore> = Arc::new(TestImageStore::rejecting_marked_uploads());
    let (server, token) = setup_with_store(Some(store)).await;

    let response = server
        .post("/admin/tractors")
        .add_header("Authorization", bearer(&token))
        .multipart(
            tractor_form("Agrale 5075", "88000")
                .add_part("main_image", image_part("agrale.png", b"main"))
                .add_part("gallery_images", image_part("ok.png", b"fine"))
                .add_part("gallery_images", image_part("bad.png", REJECTED_BYTES)),
        )
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("Erro ao salvar"));

    let listings = admin_listings(&server, &token).await;
    assert_eq!(listings.len(), 1);

    let id = listings[0]["id"].as_str().unwrap();
    let detail = server
        .get(&format!("/api/tractors/{}", id))
        .await
        .json::<Value>();
    assert!(detail["gallery"].as_array().unwrap().is_empty());
}
