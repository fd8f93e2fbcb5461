//! Plumbing for end-to-end API tests.
//!
//! [`TestServer`] boots the real application against the Postgres and Redis
//! instances named by `DATABASE_URL` / `REDIS_URL`, on an OS-assigned port,
//! and hands out a preconfigured HTTP client plus a raw database handle for
//! seeding.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tipjar_api::extractors::VISITOR_COOKIE;
use tipjar_api::{create_app, create_app_state};
use tipjar_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, IdConfig, RateLimitConfig,
    RedisConfig, ServerConfig,
};

/// A running application instance plus the client pointed at it.
pub struct TestServer {
    base: String,
    client: Client,
    /// Direct database handle for seeding rows and inspecting state.
    pub pool: PgPool,
    _server: JoinHandle<()>,
}

impl TestServer {
    /// Boots the app and waits until its health endpoint answers.
    pub async fn start() -> Result<Self> {
        let state = create_app_state(test_config()?).await?;
        let pool = state.service_context().pool().clone();
        run_migrations(&pool).await?;

        // An OS-assigned port keeps parallel test binaries from colliding.
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let base = format!("http://{}", listener.local_addr()?);
        let app = create_app(state);

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server exited: {e}");
            }
        });

        // Redirects stay unfollowed so tests observe the 303 from tip
        // submission instead of the page it points at.
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        wait_until_healthy(&client, &base).await?;

        Ok(Self {
            base,
            client,
            pool,
            _server: server,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{path}", self.base))
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path).send().await?)
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Result<Response> {
        Ok(self
            .request(Method::GET, path)
            .header(header::COOKIE, cookie)
            .send()
            .await?)
    }

    pub async fn post(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::POST, path).send().await?)
    }

    pub async fn post_with_cookie(&self, path: &str, cookie: &str) -> Result<Response> {
        Ok(self
            .request(Method::POST, path)
            .header(header::COOKIE, cookie)
            .send()
            .await?)
    }

    pub async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path).form(form).send().await?)
    }
}

/// Configuration pointing at the stores from the environment.
///
/// The rate limit ceiling is high enough that the shared limiter never
/// throttles test traffic.
fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    Ok(AppConfig {
        app: AppSettings {
            name: "tipjar-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: env_var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
        },
        redis: RedisConfig {
            url: env_var("REDIS_URL")?,
            max_connections: 4,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
        id_gen: IdConfig { worker_id: 0 },
    })
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set for integration tests"))
}

async fn run_migrations(pool: &PgPool) -> Result<()> {
    let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations"));
    sqlx::migrate::Migrator::new(dir).await?.run(pool).await?;
    Ok(())
}

async fn wait_until_healthy(client: &Client, base: &str) -> Result<()> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let url = format!("{base}/health");
    loop {
        if let Ok(response) = client.get(&url).send().await {
            if response.status() == StatusCode::OK {
                return Ok(());
            }
        }
        if Instant::now() > deadline {
            anyhow::bail!("server did not answer {url} within 5s");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Whether the backing stores are configured; tests bail out quietly when
/// they are not.
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    for name in ["DATABASE_URL", "REDIS_URL"] {
        if std::env::var(name).is_err() {
            eprintln!("Skipping test: {name} not set");
            return false;
        }
    }
    true
}

/// Pulls the visitor cookie's `name=value` pair out of a response, ready to
/// send back in a `Cookie` header.
pub fn extract_visitor_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|raw| raw.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?;
            pair.strip_prefix(VISITOR_COOKIE)?
                .strip_prefix('=')
                .map(|_| pair.to_string())
        })
}

async fn expect_status(response: Response, expected: StatusCode) -> Result<Response> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("expected {expected}, got {status}; body: {body}");
    }
    Ok(response)
}

/// Asserts on the status code and discards the body.
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    expect_status(response, expected).await.map(drop)
}

/// Asserts on the status code and decodes the JSON body.
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    Ok(expect_status(response, expected).await?.json().await?)
}
