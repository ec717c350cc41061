//! Shared utilities for integration testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use schema_provisioner::db::{ExecutorError, SchemaExecutor};
use schema_provisioner::{HttpServer, ServiceConfig, Shutdown};

/// Scripted executor standing in for remote Postgres targets.
#[derive(Default)]
pub struct MockExecutor {
    /// When set, ping fails with this driver message.
    pub ping_error: Option<String>,
    /// When set, batch execution fails with this driver message.
    pub execute_error: Option<String>,
    /// Every (connection string, sql) batch that reached the executor.
    pub executed: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_ping(message: &str) -> Self {
        Self {
            ping_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_execute(message: &str) -> Self {
        Self {
            execute_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn executed_batches(&self) -> Vec<(String, String)> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchemaExecutor for MockExecutor {
    async fn ping(&self, _connection_string: &str) -> Result<(), ExecutorError> {
        match &self.ping_error {
            Some(message) => Err(ExecutorError::Connect(message.clone())),
            None => Ok(()),
        }
    }

    async fn execute_batch(
        &self,
        connection_string: &str,
        sql: &str,
    ) -> Result<(), ExecutorError> {
        self.executed
            .lock()
            .unwrap()
            .push((connection_string.to_string(), sql.to_string()));
        match &self.execute_error {
            Some(message) => Err(ExecutorError::Execute(message.clone())),
            None => Ok(()),
        }
    }
}

/// A running service instance bound to an ephemeral local port.
pub struct TestService {
    pub base_url: String,
    pub shutdown: Shutdown,
    pub executor: Arc<MockExecutor>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Spawn the service with a scripted executor.
pub async fn spawn_service(config: ServiceConfig, executor: MockExecutor) -> TestService {
    let executor = Arc::new(executor);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_executor(config, executor.clone());
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestService {
        base_url: format!("http://{}", addr),
        shutdown,
        executor,
    }
}

/// A reqwest client that ignores any proxy environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build test client")
}
