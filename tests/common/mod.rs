use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        let mut cmd = Command::new("target/debug/contacts-api");
        cmd.env("CONTACTS_API_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // The server is up even when the database is not; both count as ready
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Whether the spawned server has a working database behind it. Flows that
/// need storage skip themselves when this is false (e.g. CI without Postgres).
#[allow(dead_code)]
pub async fn database_ready(server: &TestServer) -> bool {
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
    {
        Ok(resp) => resp.status() == StatusCode::OK,
        Err(_) => false,
    }
}

/// Generate a username that cannot collide across test runs
#[allow(dead_code)]
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

/// Register a fresh user and log in, returning (username, token)
#[allow(dead_code)]
pub async fn register_and_login(
    client: &reqwest::Client,
    server: &TestServer,
    prefix: &str,
) -> Result<(String, String)> {
    let username = unique_username(prefix);

    let res = client
        .post(format!("{}/api/users", server.base_url))
        .json(&json!({
            "username": username,
            "password": "password",
            "name": "Test User"
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "registration failed: {}",
        res.status()
    );

    let res = client
        .post(format!("{}/api/users/login", server.base_url))
        .json(&json!({ "username": username, "password": "password" }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "login failed: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();

    Ok((username, token))
}

/// Create a contact owned by the given token's user, returning its id
#[allow(dead_code)]
pub async fn create_contact(
    client: &reqwest::Client,
    server: &TestServer,
    token: &str,
    payload: Value,
) -> Result<i64> {
    let res = client
        .post(format!("{}/api/contacts", server.base_url))
        .header("Authorization", token)
        .json(&payload)
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "contact creation failed: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    body["data"]["id"]
        .as_i64()
        .context("created contact missing id")
}
