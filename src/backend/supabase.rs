//! The HTTP client for a hosted Supabase project.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    auth::{AuthUser, Credentials, Session, SignUp},
    backend::{Backend, BackendError},
    config::BackendConfig,
    transaction::{NewTransaction, SyncState, Transaction, TransactionId},
};

const TRANSACTIONS_TABLE: &str = "transactions";

time::serde::format_description!(row_date, Date, "[year]-[month]-[day]");

/// Talks to the auth and REST APIs of a Supabase project.
///
/// Every request carries the public API key. Requests made on behalf of a
/// signed-in user carry the user's access token as the bearer token,
/// otherwise the public key is used.
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseBackend {
    /// Create a client for the project described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [BackendError::Unreachable] if the HTTP client could not be
    /// created.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| BackendError::Unreachable(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_owned(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TRANSACTIONS_TABLE}", self.base_url)
    }

    fn request(&self, method: Method, url: &str, access_token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.anon_key))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
    let response = request.send().await.map_err(|error| {
        tracing::error!("Backend request failed: {error}");
        BackendError::Unreachable(error.to_string())
    })?;

    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(status, &body);
    tracing::warn!("Backend rejected request with status {status}: {message}");

    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, BackendError> {
    let body = response
        .text()
        .await
        .map_err(|error| BackendError::Unreachable(error.to_string()))?;

    serde_json::from_str(&body).map_err(|error| {
        tracing::error!("Could not parse backend response {body:?}: {error}");
        BackendError::InvalidResponse(error.to_string())
    })
}

/// Find the human readable explanation in an error body.
///
/// The auth and REST APIs do not agree on the field name, so the first of
/// `msg`, `error_description`, `message` and `error` that holds text is used.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        for key in ["msg", "error_description", "message", "error"] {
            if let Some(serde_json::Value::String(message)) = fields.get(key)
                && !message.is_empty()
            {
                return message.clone();
            }
        }
    }

    if !body.trim().is_empty() {
        return body.trim().to_owned();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_owned()
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
}

impl From<UserResponse> for AuthUser {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: UserResponse,
}

impl From<SessionResponse> for Session {
    fn from(session: SessionResponse) -> Self {
        Self {
            user: session.user.into(),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: session
                .expires_in
                .map(|seconds| OffsetDateTime::now_utc() + Duration::seconds(seconds)),
        }
    }
}

/// Sign up answers with a session when email confirmation is disabled and
/// with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    WithSession(SessionResponse),
    UserOnly(UserResponse),
}

/// A row of the transactions table as stored by the backend.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    id: TransactionId,
    nome_pessoa: String,
    #[serde(with = "row_date")]
    data_transacao: Date,
    valor: Decimal,
    #[serde(default)]
    anotacoes: Option<String>,
    assinatura_digital: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            person_name: row.nome_pessoa,
            date: row.data_transacao,
            amount: row.valor,
            notes: row.anotacoes.filter(|notes| !notes.is_empty()),
            signature: row.assinatura_digital,
            created_at: row.created_at,
            sync: SyncState::Synced,
        }
    }
}

#[derive(Debug, Serialize)]
struct TransactionPayload<'a> {
    nome_pessoa: &'a str,
    #[serde(with = "row_date")]
    data_transacao: Date,
    valor: Decimal,
    anotacoes: &'a str,
    assinatura_digital: &'a str,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    created_at: Option<OffsetDateTime>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    updated_at: Option<OffsetDateTime>,
}

impl<'a> TransactionPayload<'a> {
    fn for_insert(transaction: &'a NewTransaction) -> Self {
        Self {
            created_at: Some(OffsetDateTime::now_utc()),
            ..Self::fields(transaction)
        }
    }

    fn for_update(transaction: &'a NewTransaction) -> Self {
        Self {
            updated_at: Some(OffsetDateTime::now_utc()),
            ..Self::fields(transaction)
        }
    }

    fn fields(transaction: &'a NewTransaction) -> Self {
        Self {
            nome_pessoa: &transaction.person_name,
            data_transacao: transaction.date,
            valor: transaction.amount,
            anotacoes: transaction.notes.as_deref().unwrap_or_default(),
            assinatura_digital: &transaction.signature,
            created_at: None,
            updated_at: None,
        }
    }
}

/// The first row of a `return=representation` response.
fn first_row(rows: Vec<TransactionRow>) -> Result<Transaction, BackendError> {
    rows.into_iter()
        .next()
        .map(Transaction::from)
        .ok_or(BackendError::EmptyResponse)
}

#[async_trait]
impl Backend for SupabaseBackend {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let request = self
            .request(Method::POST, &self.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }));

        let session: SessionResponse = read_json(send(request).await?).await?;

        Ok(session.into())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let request = self
            .request(Method::POST, &self.auth_url("token"), None)
            .query(&[("grant_type", "refresh_token")])
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        let session: SessionResponse = read_json(send(request).await?).await?;

        Ok(session.into())
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, BackendError> {
        let request = self
            .request(Method::POST, &self.auth_url("signup"), None)
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }));

        let response: SignUpResponse = read_json(send(request).await?).await?;

        Ok(match response {
            SignUpResponse::WithSession(session) => {
                let session = Session::from(session);
                SignUp {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpResponse::UserOnly(user) => SignUp {
                user: user.into(),
                session: None,
            },
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let request = self.request(Method::POST, &self.auth_url("logout"), Some(access_token));

        send(request).await?;

        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let request = self.request(Method::GET, &self.auth_url("user"), Some(access_token));

        let user: UserResponse = read_json(send(request).await?).await?;

        Ok(user.into())
    }

    async fn select_transactions(
        &self,
        access_token: Option<&str>,
    ) -> Result<Vec<Transaction>, BackendError> {
        let request = self
            .request(Method::GET, &self.table_url(), access_token)
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let rows: Vec<TransactionRow> = read_json(send(request).await?).await?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn insert_transaction(
        &self,
        access_token: Option<&str>,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        let request = self
            .request(Method::POST, &self.table_url(), access_token)
            .header("Prefer", "return=representation")
            .json(&[TransactionPayload::for_insert(transaction)]);

        let rows: Vec<TransactionRow> = read_json(send(request).await?).await?;

        first_row(rows)
    }

    async fn update_transaction(
        &self,
        access_token: Option<&str>,
        id: &TransactionId,
        transaction: &NewTransaction,
    ) -> Result<Transaction, BackendError> {
        let request = self
            .request(Method::PATCH, &self.table_url(), access_token)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&TransactionPayload::for_update(transaction));

        let rows: Vec<TransactionRow> = read_json(send(request).await?).await?;

        first_row(rows)
    }

    async fn delete_transaction(
        &self,
        access_token: Option<&str>,
        id: &TransactionId,
    ) -> Result<(), BackendError> {
        let request = self
            .request(Method::DELETE, &self.table_url(), access_token)
            .query(&[("id", format!("eq.{id}"))]);

        send(request).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Json, Router,
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
    };
    use reqwest::StatusCode as ReqwestStatus;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        auth::Credentials,
        backend::{Backend, BackendError},
        config::BackendConfig,
        transaction::{NewTransaction, SyncState, TransactionId},
    };

    use super::{SupabaseBackend, extract_error_message};

    const ANON_KEY: &str = "test-anon-key";

    /// What the stub server saw in the last request.
    #[derive(Debug, Default, Clone)]
    struct Seen {
        headers: HashMap<String, String>,
        query: HashMap<String, String>,
        body: Option<Value>,
    }

    type Recorder = Arc<Mutex<Seen>>;

    fn record(recorder: &Recorder, headers: &HeaderMap, query: HashMap<String, String>) {
        let mut seen = recorder.lock().unwrap();
        seen.headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    value.to_str().unwrap_or_default().to_owned(),
                )
            })
            .collect();
        seen.query = query;
    }

    async fn spawn_stub(router: Router) -> BackendConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        BackendConfig {
            url: format!("http://{address}/"),
            anon_key: ANON_KEY.to_owned(),
            timeout: Duration::from_secs(5),
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "demo@exemplo.com".to_owned(),
            password: "123456".to_owned(),
        }
    }

    fn new_transaction() -> NewTransaction {
        NewTransaction {
            person_name: "João Silva".to_owned(),
            date: date!(2024 - 06 - 19),
            amount: Decimal::new(15000, 2),
            notes: None,
            signature: "data:image/png;base64,AAAA".to_owned(),
        }
    }

    fn stored_row() -> Value {
        json!({
            "id": 7,
            "nome_pessoa": "João Silva",
            "data_transacao": "2024-06-19",
            "valor": 150.0,
            "anotacoes": "",
            "assinatura_digital": "data:image/png;base64,AAAA",
            "created_at": "2024-06-19T12:30:00.123456+00:00",
            "updated_at": "2024-06-19T12:30:00.123456+00:00"
        })
    }

    #[tokio::test]
    async fn sign_in_returns_session() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/auth/v1/token",
                post(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>,
                     Json(body): Json<Value>| async move {
                        record(&recorder, &headers, query);
                        recorder.lock().unwrap().body = Some(body);

                        Json(json!({
                            "access_token": "user-token",
                            "refresh_token": "refresh",
                            "expires_in": 3600,
                            "user": {"id": "user-1", "email": "demo@exemplo.com"}
                        }))
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let session = backend.sign_in(&credentials()).await.unwrap();

        assert_eq!(session.access_token, "user-token");
        assert_eq!(session.user.id, "user-1");
        assert_eq!(session.user.email.as_deref(), Some("demo@exemplo.com"));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
        assert!(session.expires_at.is_some());

        let seen = recorder.lock().unwrap().clone();
        assert_eq!(seen.query.get("grant_type").map(String::as_str), Some("password"));
        assert_eq!(seen.headers.get("apikey").map(String::as_str), Some(ANON_KEY));
        assert_eq!(
            seen.body,
            Some(json!({"email": "demo@exemplo.com", "password": "123456"}))
        );
    }

    #[tokio::test]
    async fn refresh_session_exchanges_refresh_token() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/auth/v1/token",
                post(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>,
                     Json(body): Json<Value>| async move {
                        record(&recorder, &headers, query);
                        recorder.lock().unwrap().body = Some(body);

                        Json(json!({
                            "access_token": "new-token",
                            "refresh_token": "new-refresh",
                            "expires_in": 3600,
                            "user": {"id": "user-1", "email": "demo@exemplo.com"}
                        }))
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let session = backend.refresh_session("old-refresh").await.unwrap();

        assert_eq!(session.access_token, "new-token");
        assert_eq!(session.refresh_token.as_deref(), Some("new-refresh"));

        let seen = recorder.lock().unwrap().clone();
        assert_eq!(
            seen.query.get("grant_type").map(String::as_str),
            Some("refresh_token")
        );
        assert_eq!(seen.body, Some(json!({"refresh_token": "old-refresh"})));
    }

    #[tokio::test]
    async fn sign_in_surfaces_backend_message() {
        let router = Router::new().route(
            "/auth/v1/token",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_grant",
                        "error_description": "Invalid login credentials"
                    })),
                )
            }),
        );
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let result = backend.sign_in(&credentials()).await;

        assert_eq!(
            result,
            Err(BackendError::Rejected {
                status: 400,
                message: "Invalid login credentials".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn sign_up_without_confirmation_has_no_session() {
        let router = Router::new().route(
            "/auth/v1/signup",
            post(|| async { Json(json!({"id": "user-2", "email": "novo@exemplo.com"})) }),
        );
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let sign_up = backend.sign_up(&credentials()).await.unwrap();

        assert_eq!(sign_up.user.id, "user-2");
        assert_eq!(sign_up.session, None);
    }

    #[tokio::test]
    async fn select_orders_newest_first_and_sends_token() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/rest/v1/transactions",
                get(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>| async move {
                        record(&recorder, &headers, query);
                        Json(json!([stored_row()]))
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let transactions = backend
            .select_transactions(Some("user-token"))
            .await
            .unwrap();

        assert_eq!(transactions.len(), 1);
        let transaction = &transactions[0];
        assert_eq!(transaction.id, TransactionId::new("7"));
        assert_eq!(transaction.person_name, "João Silva");
        assert_eq!(transaction.date, date!(2024 - 06 - 19));
        assert_eq!(transaction.amount, Decimal::from(150));
        assert_eq!(transaction.notes, None, "empty notes should read as none");
        assert_eq!(transaction.sync, SyncState::Synced);
        assert!(transaction.created_at.is_some());

        let seen = recorder.lock().unwrap().clone();
        assert_eq!(seen.query.get("select").map(String::as_str), Some("*"));
        assert_eq!(
            seen.query.get("order").map(String::as_str),
            Some("created_at.desc")
        );
        assert_eq!(
            seen.headers.get("authorization").map(String::as_str),
            Some("Bearer user-token")
        );
    }

    #[tokio::test]
    async fn anonymous_requests_use_public_key_as_bearer() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/rest/v1/transactions",
                get(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>| async move {
                        record(&recorder, &headers, query);
                        Json(json!([]))
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let transactions = backend.select_transactions(None).await.unwrap();

        assert!(transactions.is_empty());
        let seen = recorder.lock().unwrap().clone();
        assert_eq!(
            seen.headers.get("authorization").map(String::as_str),
            Some(format!("Bearer {ANON_KEY}").as_str())
        );
    }

    #[tokio::test]
    async fn insert_asks_for_stored_row() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/rest/v1/transactions",
                post(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>,
                     Json(body): Json<Value>| async move {
                        record(&recorder, &headers, query);
                        recorder.lock().unwrap().body = Some(body);
                        (StatusCode::CREATED, Json(json!([stored_row()])))
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let transaction = backend
            .insert_transaction(Some("user-token"), &new_transaction())
            .await
            .unwrap();

        assert_eq!(transaction.id, TransactionId::new("7"));
        assert_eq!(transaction.sync, SyncState::Synced);

        let seen = recorder.lock().unwrap().clone();
        assert_eq!(
            seen.headers.get("prefer").map(String::as_str),
            Some("return=representation")
        );
        let body = seen.body.unwrap();
        let row = &body[0];
        assert_eq!(row["nome_pessoa"], "João Silva");
        assert_eq!(row["data_transacao"], "2024-06-19");
        assert_eq!(row["valor"], "150.00");
        assert_eq!(row["anotacoes"], "");
        assert_eq!(row["assinatura_digital"], "data:image/png;base64,AAAA");
        assert!(row["created_at"].is_string());
    }

    #[tokio::test]
    async fn insert_without_returned_row_is_an_error() {
        let router = Router::new().route(
            "/rest/v1/transactions",
            post(|| async { (StatusCode::CREATED, Json(json!([]))) }),
        );
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let result = backend.insert_transaction(None, &new_transaction()).await;

        assert_eq!(result, Err(BackendError::EmptyResponse));
    }

    #[tokio::test]
    async fn update_patches_row_by_id() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/rest/v1/transactions",
                axum::routing::patch(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>,
                     Json(body): Json<Value>| async move {
                        record(&recorder, &headers, query);
                        recorder.lock().unwrap().body = Some(body);
                        Json(json!([stored_row()]))
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        let transaction = backend
            .update_transaction(
                Some("user-token"),
                &TransactionId::new("7"),
                &new_transaction(),
            )
            .await
            .unwrap();

        assert_eq!(transaction.id, TransactionId::new("7"));

        let seen = recorder.lock().unwrap().clone();
        assert_eq!(seen.query.get("id").map(String::as_str), Some("eq.7"));
        let body = seen.body.unwrap();
        assert_eq!(body["nome_pessoa"], "João Silva");
        assert!(body["updated_at"].is_string());
        assert!(body.get("created_at").is_none(), "got {body}");
    }

    #[tokio::test]
    async fn delete_filters_by_id() {
        let recorder = Recorder::default();
        let router = Router::new()
            .route(
                "/rest/v1/transactions",
                axum::routing::delete(
                    |State(recorder): State<Recorder>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>| async move {
                        record(&recorder, &headers, query);
                        StatusCode::NO_CONTENT.into_response()
                    },
                ),
            )
            .with_state(recorder.clone());
        let backend = SupabaseBackend::new(&spawn_stub(router).await).unwrap();

        backend
            .delete_transaction(Some("user-token"), &TransactionId::new("7"))
            .await
            .unwrap();

        let seen = recorder.lock().unwrap().clone();
        assert_eq!(seen.query.get("id").map(String::as_str), Some("eq.7"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let backend = SupabaseBackend::new(&BackendConfig {
            url: format!("http://{address}"),
            anon_key: ANON_KEY.to_owned(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result = backend.select_transactions(None).await;

        assert!(
            matches!(result, Err(BackendError::Unreachable(_))),
            "got {result:?}, want unreachable error"
        );
    }

    #[test]
    fn error_message_prefers_known_fields() {
        let cases = [
            (r#"{"msg":"User already registered"}"#, "User already registered"),
            (
                r#"{"code":"42501","message":"permission denied"}"#,
                "permission denied",
            ),
            (r#"{"error":"invalid_grant"}"#, "invalid_grant"),
            ("plain text failure", "plain text failure"),
            ("", "Bad Request"),
        ];

        for (body, want) in cases {
            assert_eq!(
                extract_error_message(ReqwestStatus::BAD_REQUEST, body),
                want,
                "body {body:?}"
            );
        }
    }
}
