use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;

use safawala_crm::auth::{SESSION_COOKIE, issue_session_token};
use safawala_crm::domain::franchise::NewFranchise;
use safawala_crm::domain::user::{NewUser, Role, User};
use safawala_crm::models::config::ServerConfig;
use safawala_crm::repository::{DieselRepository, FranchiseWriter, UserWriter};
use safawala_crm::routes;

mod common;

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        secret: "test-secret".into(),
        allowed_origins: String::new(),
    }
}

fn seed_admin(repo: &DieselRepository) -> User {
    let franchise = repo
        .create_franchise(&NewFranchise::new(
            "Safawala Rajkot".into(),
            "RJ".into(),
            None,
            None,
            None,
            None,
        ))
        .unwrap();
    let new_user = NewUser::new(
        Some(franchise.id),
        "Asha".into(),
        "asha@safawala.test".into(),
        "not-a-real-hash".into(),
        Role::FranchiseAdmin,
        None,
    )
    .unwrap();
    repo.create_user(&new_user).unwrap()
}

#[actix_web::test]
async fn test_api_requires_a_session_cookie() {
    let test_db = common::TestDb::new("test_routes_unauthenticated.db");
    let repo = DieselRepository::new(test_db.pool());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(server_config()))
            .service(web::scope("/api").configure(routes::configure)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/customers").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_customer_lifecycle_over_http() {
    let test_db = common::TestDb::new("test_routes_customers.db");
    let repo = DieselRepository::new(test_db.pool());
    let config = server_config();

    let user = seed_admin(&repo);
    let token = issue_session_token(&user, &config.secret).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(config))
            .service(web::scope("/api").configure(routes::configure)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/customers")
            .cookie(Cookie::new(SESSION_COOKIE, token.clone()))
            .set_json(json!({ "name": "Bina Shah", "phone": "9898012345" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["customer_code"], "CUST-00001");
    assert_eq!(created["status"], "active");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/customers")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["name"], "Bina Shah");
}
