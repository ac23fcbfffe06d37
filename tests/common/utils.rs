use once_cell::sync::Lazy;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;

use cocoach_backend::config::settings::{get_config, get_session_settings, DatabaseSettings};
use cocoach_backend::run;
use cocoach_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    let connection_pool = configure_db(&configuration.database).await;
    let session_settings = get_session_settings(&configuration);

    let server = run(
        listener,
        connection_pool.clone(),
        session_settings,
        configuration.application.static_dir,
    )
    .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Sessions live in a cookie, so every simulated client needs its own jar.
pub fn api_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build reqwest client")
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
}

/// Sign up a fresh user through the API. Signup auto-logs-in, so the
/// client's cookie jar holds a valid session afterwards.
pub async fn create_test_user(client: &Client, app_address: &str) -> TestUser {
    let email = format!("user{}@example.com", Uuid::new_v4());
    let password = "password123";

    let signup_request = json!({
        "email": email,
        "password": password,
        "full_name": "Test User"
    });

    let response = client
        .post(format!("{}/api/signup", app_address))
        .json(&signup_request)
        .send()
        .await
        .expect("Failed to execute signup request.");

    assert_eq!(201, response.status().as_u16(), "Signup should succeed");

    let body: serde_json::Value = response.json().await.expect("Failed to parse signup response");
    let id = body["user"]["id"].as_i64().expect("No user id in response");

    TestUser {
        id,
        email,
        password: password.to_string(),
    }
}
