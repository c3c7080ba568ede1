use chipreg_api::Config;
use chipreg_api::config::StoreBackend;
use chipreg_auth::HashingParams;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    async fn spawn_with(config: Config) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = chipreg_api::app::build_app(&config)
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn test_config() -> Config {
    Config {
        jwt_secret: JWT_SECRET.to_string(),
        store_backend: StoreBackend::Memory,
        hashing: HashingParams {
            memory_kib: 256,
            iterations: 1,
            lanes: 1,
        },
        ..Config::default()
    }
}

async fn register(client: &reqwest::Client, srv: &TestServer, phone: &str, password: &str) -> (String, Value) {
    let res = client
        .post(srv.url("/register"))
        .json(&json!({ "fullName": "A B", "phone": phone, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    (body["token"].as_str().unwrap().to_string(), body["user"].clone())
}

async fn add_animal(client: &reqwest::Client, srv: &TestServer, token: &str, body: Value) -> reqwest::Response {
    client
        .post(srv.url("/animals"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn created_animal(client: &reqwest::Client, srv: &TestServer, token: &str, chip: &str, name: &str) -> Value {
    let res = add_animal(
        client,
        srv,
        token,
        json!({ "chipNumber": chip, "petName": name, "species": "Dog" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["animal"].clone()
}

async fn error_message(res: reqwest::Response) -> String {
    let body: Value = res.json().await.unwrap();
    body["error"].as_str().expect("error body").to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/me", "/animals", "/activities"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(error_message(res).await, "authentication required");
    }

    let res = client
        .get(srv.url("/animals"))
        .header("Authorization", "Token abc")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_tokens_are_forbidden() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, user) = register(&client, &srv, "+1000", "secret1").await;

    let foreign = chipreg_auth::Hs256Jwt::new(b"other-secret", ChronoDuration::days(30))
        .issue(user["id"].as_str().unwrap().parse().unwrap(), "+1000", Utc::now())
        .unwrap();
    let expired = chipreg_auth::Hs256Jwt::new(JWT_SECRET.as_bytes(), ChronoDuration::days(30))
        .issue(
            user["id"].as_str().unwrap().parse().unwrap(),
            "+1000",
            Utc::now() - ChronoDuration::days(31),
        )
        .unwrap();
    let mut tampered = token.clone();
    tampered.push('x');

    for bad in [foreign, expired, tampered, "garbage".to_string()] {
        let res = client.get(srv.url("/me")).bearer_auth(&bad).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_message(res).await, "invalid or expired token");
    }
}

#[tokio::test]
async fn register_then_me_hides_password_hash() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, user) = register(&client, &srv, "+1000", "secret1").await;

    assert_eq!(user["fullName"], "A B");
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password").is_none());

    let res = client.get(srv.url("/me")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["user"]["id"], user["id"]);
    assert_eq!(body["user"]["phone"], "+1000");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn registration_lists_every_violated_rule() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/register"))
        .json(&json!({ "phone": "", "password": "123" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let msg = error_message(res).await;
    assert!(msg.contains("fullName is required"), "{msg}");
    assert!(msg.contains("phone is required"), "{msg}");
    assert!(msg.contains("password must be at least 6 characters"), "{msg}");
}

#[tokio::test]
async fn duplicate_phone_conflicts_without_creating_user() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "+1000", "secret1").await;

    let res = client
        .post(srv.url("/register"))
        .json(&json!({ "fullName": "C D", "phone": "+1000", "password": "another1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(error_message(res).await, "a user with this phone is already registered");

    // The second password never became valid.
    let res = client
        .post(srv.url("/login"))
        .json(&json!({ "phone": "+1000", "password": "another1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv, "+1000", "secret1").await;

    let wrong_password = client
        .post(srv.url("/login"))
        .json(&json!({ "phone": "+1000", "password": "wrong-pass" }))
        .send()
        .await
        .unwrap();
    let unknown_phone = client
        .post(srv.url("/login"))
        .json(&json!({ "phone": "+9999", "password": "secret1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_phone.status(), StatusCode::UNAUTHORIZED);
    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_phone.json().await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a, json!({ "error": "invalid phone or password" }));
}

#[tokio::test]
async fn login_issues_working_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (_, user) = register(&client, &srv, "+1000", "secret1").await;

    let res = client
        .post(srv.url("/login"))
        .json(&json!({ "phone": "+1000", "password": "secret1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], user["id"]);

    let token = body["token"].as_str().unwrap();
    let res = client.get(srv.url("/me")).bearer_auth(token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn lost_pet_scenario() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;

    let res = add_animal(
        &client,
        &srv,
        &token,
        json!({
            "chipNumber": "CH1",
            "petName": "Rex",
            "species": "Dog",
            "vaccinations": "rabies 2025",
            "diseases": "none",
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Anonymous lookup exposes contact details, not medical ones.
    let res = reqwest::get(srv.url("/search/CH1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let animal = &body["animal"];
    assert_eq!(animal["ownerPhone"], "+1000");
    assert_eq!(animal["ownerName"], "A B");
    assert_eq!(animal["petName"], "Rex");
    for hidden in ["vaccinations", "diseases", "vetInfo", "ownerId", "id"] {
        assert!(animal.get(hidden).is_none(), "{hidden} leaked");
    }

    let res = add_animal(
        &client,
        &srv,
        &token,
        json!({ "chipNumber": "CH1", "petName": "Tom", "species": "Cat" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(error_message(res).await, "an animal with this chip number is already registered");

    let res = client.get(srv.url("/animals")).bearer_auth(&token).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["animals"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_misses_are_not_found() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/search/NOPE")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(res).await, "animal not found");

    let res = reqwest::get(srv.url("/search/%20")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_animal_requires_core_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;

    let res = add_animal(&client, &srv, &token, json!({ "breed": "Lab" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let msg = error_message(res).await;
    assert!(msg.contains("chipNumber is required"), "{msg}");
    assert!(msg.contains("petName is required"), "{msg}");
    assert!(msg.contains("species is required"), "{msg}");
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, user) = register(&client, &srv, "+1000", "secret1").await;

    let res = add_animal(
        &client,
        &srv,
        &token,
        json!({
            "chipNumber": "CH1",
            "petName": "Rex",
            "species": "Dog",
            "breed": "Labrador",
            "birthDate": "2020-05-01",
            "color": "black",
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    let created = created["animal"].clone();
    assert_eq!(created["ownerId"], user["id"]);
    assert_eq!(created["ownerPhone"], "+1000");
    assert!(created["registrationDate"].is_string());

    let id = created["id"].as_str().unwrap();
    let res = client
        .get(srv.url(&format!("/animals/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["animal"], created);
}

#[tokio::test]
async fn update_never_touches_protected_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    let before = created_animal(&client, &srv, &token, "CH1", "Rex").await;
    let id = before["id"].as_str().unwrap();

    let res = client
        .put(srv.url(&format!("/animals/{id}")))
        .bearer_auth(&token)
        .json(&json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "chipNumber": "HIJACK",
            "ownerId": "00000000-0000-0000-0000-000000000000",
            "ownerName": "Mallory",
            "ownerPhone": "+6666",
            "registrationDate": "2000-01-01T00:00:00Z",
            "petName": "Max",
            "color": "brown",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let after = &body["animal"];

    for field in ["id", "chipNumber", "ownerId", "ownerName", "ownerPhone", "registrationDate"] {
        assert_eq!(after[field], before[field], "{field} changed");
    }
    assert_eq!(after["petName"], "Max");
    assert_eq!(after["color"], "brown");
    assert_eq!(after["species"], "Dog");
    assert!(after["lastUpdated"].is_string());

    // Stored copy matches the response.
    let res = client
        .get(srv.url(&format!("/animals/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let stored: Value = res.json().await.unwrap();
    assert_eq!(&stored["animal"], after);

    let res = reqwest::get(srv.url("/search/HIJACK")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_optional_fields_from_forms_are_accepted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;

    let res = add_animal(
        &client,
        &srv,
        &token,
        json!({
            "chipNumber": "CH1",
            "petName": "Rex",
            "species": "Dog",
            "breed": "",
            "birthDate": "",
            "color": "",
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "pet added");
    assert_eq!(body["animal"]["birthDate"], Value::Null);
    assert_eq!(body["animal"]["breed"], Value::Null);
}

#[tokio::test]
async fn update_sets_and_clears_birth_date() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    let animal = created_animal(&client, &srv, &token, "CH1", "Rex").await;
    let path = format!("/animals/{}", animal["id"].as_str().unwrap());

    let res = client
        .put(srv.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "birthDate": "2020-05-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["animal"]["birthDate"], "2020-05-01");

    let res = client
        .put(srv.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "petName": "Tom", "birthDate": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "pet updated");
    assert_eq!(body["animal"]["petName"], "Tom");
    assert_eq!(body["animal"]["birthDate"], Value::Null);

    let res = client
        .put(srv.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "birthDate": "May 1st" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(res).await, "birthDate must be a date (YYYY-MM-DD)");
}

#[tokio::test]
async fn update_cannot_blank_required_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    let animal = created_animal(&client, &srv, &token, "CH1", "Rex").await;
    let id = animal["id"].as_str().unwrap();

    let res = client
        .put(srv.url(&format!("/animals/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "petName": "  ", "species": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let msg = error_message(res).await;
    assert!(msg.contains("petName is required"), "{msg}");
    assert!(msg.contains("species is required"), "{msg}");
}

#[tokio::test]
async fn other_owners_animals_are_invisible() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (owner, _) = register(&client, &srv, "+1000", "secret1").await;
    let (stranger, _) = register(&client, &srv, "+2000", "secret2").await;
    let animal = created_animal(&client, &srv, &owner, "CH1", "Rex").await;
    let path = format!("/animals/{}", animal["id"].as_str().unwrap());

    let res = client.get(srv.url(&path)).bearer_auth(&stranger).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(res).await, "animal not found");

    let res = client
        .put(srv.url(&path))
        .bearer_auth(&stranger)
        .json(&json!({ "petName": "Stolen" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(srv.url(&path)).bearer_auth(&stranger).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(srv.url("/animals")).bearer_auth(&stranger).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["animals"].as_array().unwrap().is_empty());

    // Owner still sees it untouched.
    let res = client.get(srv.url(&path)).bearer_auth(&owner).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["animal"]["petName"], "Rex");
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;

    for id in ["not-a-uuid", "0190a7e4-0000-7000-8000-000000000000"] {
        let res = client
            .get(srv.url(&format!("/animals/{id}")))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{id}");
    }
}

#[tokio::test]
async fn repeated_delete_stays_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    let animal = created_animal(&client, &srv, &token, "CH1", "Rex").await;
    let path = format!("/animals/{}", animal["id"].as_str().unwrap());

    let res = client.delete(srv.url(&path)).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "message": "pet deleted" }));

    for _ in 0..2 {
        let res = client.delete(srv.url(&path)).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    // The chip number is free again.
    let res = reqwest::get(srv.url("/search/CH1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    created_animal(&client, &srv, &token, "CH1", "Rex II").await;
}

#[tokio::test]
async fn animals_are_listed_newest_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    created_animal(&client, &srv, &token, "CH1", "Rex").await;
    created_animal(&client, &srv, &token, "CH2", "Tom").await;

    let res = client.get(srv.url("/animals")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let names: Vec<&str> = body["animals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["petName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tom", "Rex"]);
}

#[tokio::test]
async fn activities_are_scoped_and_newest_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    let (other, _) = register(&client, &srv, "+2000", "secret2").await;

    let rex = created_animal(&client, &srv, &token, "CH1", "Rex").await;
    created_animal(&client, &srv, &other, "CH2", "Tom").await;
    let path = format!("/animals/{}", rex["id"].as_str().unwrap());
    client
        .put(srv.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "petName": "Max" }))
        .send()
        .await
        .unwrap();
    client.delete(srv.url(&path)).bearer_auth(&token).send().await.unwrap();

    let res = client.get(srv.url("/activities")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let messages: Vec<&str> = body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["Deleted pet: Max", "Updated pet: Max", "Added pet: Rex"]);
}

#[tokio::test]
async fn activities_are_capped_per_page() {
    let srv = TestServer::spawn_with(Config {
        activity_page_size: 3,
        ..test_config()
    })
    .await;
    let client = reqwest::Client::new();
    let (token, _) = register(&client, &srv, "+1000", "secret1").await;
    for i in 0..5 {
        created_animal(&client, &srv, &token, &format!("CH{i}"), &format!("Pet{i}")).await;
    }

    let res = client.get(srv.url("/activities")).bearer_auth(&token).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    let activities = body["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 3);
    assert_eq!(activities[0]["message"], "Added pet: Pet4");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/register"))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());

    let res = client
        .post(srv.url("/login"))
        .body(r#"{"phone":"+1000","password":"secret1"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_answer_in_error_shape() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(res).await, "route not found");
}

#[tokio::test]
async fn file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        store_backend: StoreBackend::File,
        data_dir: dir.path().to_path_buf(),
        ..test_config()
    };
    let client = reqwest::Client::new();

    {
        let srv = TestServer::spawn_with(config.clone()).await;
        let (token, _) = register(&client, &srv, "+1000", "secret1").await;
        created_animal(&client, &srv, &token, "CH1", "Rex").await;
    }

    assert!(dir.path().join("users.json").exists());
    assert!(dir.path().join("animals.json").exists());

    let srv = TestServer::spawn_with(config).await;
    let res = reqwest::get(srv.url("/search/CH1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(srv.url("/login"))
        .json(&json!({ "phone": "+1000", "password": "secret1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
