use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::Json;
use crate::db::{is_unique_violation, Db};
use crate::entities::usuario;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;
use tower_cookies::{Cookie, Cookies};
use tracing::{field::display, Span};

pub const SESSION_COOKIE: &str = "adopet_usuario";
const INVALID_CREDENTIALS: &str = "Email ou senha inválidos.";

#[derive(serde::Deserialize)]
pub struct SignUpRequest {
    nome: String,
    email: String,
    senha: String,
}

pub async fn signup(
    Extension(db): Extension<Db>,
    Json(payload): Json<SignUpRequest>,
) -> ApiResult<impl IntoResponse> {
    Span::current()
        .record("table", "usuarios")
        .record("action", "signup");

    if payload.nome.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.senha.is_empty()
    {
        return Err(ApiError::BadRequest(
            "Nome, email e senha são obrigatórios.".into(),
        ));
    }

    // Hash password
    let salt = SaltString::generate(&mut OsRng);
    let senha_hash = Argon2::default()
        .hash_password(payload.senha.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            ApiError::Internal("Erro ao cadastrar o usuário.")
        })?
        .to_string();

    let novo = usuario::ActiveModel {
        nome: Set(payload.nome),
        email: Set(payload.email.trim().to_lowercase()),
        senha_hash: Set(senha_hash),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    match novo.insert(db.as_ref()).await {
        Ok(usuario) => {
            Span::current()
                .record("business_event", "User signed up")
                .record("error", tracing::field::Empty);

            Ok((
                StatusCode::CREATED,
                Json(json!({"id": usuario.id, "nome": usuario.nome, "email": usuario.email})),
            ))
        }
        Err(e) if is_unique_violation(&e) => {
            Span::current().record("error", "duplicate_email");
            Err(ApiError::Duplicate("Email já cadastrado.".into()))
        }
        Err(e) => Err(ApiError::internal("Erro ao cadastrar o usuário.")(e)),
    }
}

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    email: String,
    senha: String,
}

pub async fn login(
    Extension(db): Extension<Db>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    Span::current()
        .record("table", "usuarios")
        .record("action", "login");

    let usuario = usuario::Entity::find()
        .filter(usuario::Column::Email.eq(payload.email.trim().to_lowercase()))
        .one(db.as_ref())
        .await
        .map_err(ApiError::internal("Erro ao realizar login."))?
        .ok_or_else(|| {
            Span::current().record("error", "invalid_credentials");
            ApiError::Unauthorized(INVALID_CREDENTIALS.into())
        })?;

    let parsed_hash = PasswordHash::new(&usuario.senha_hash).map_err(|e| {
        Span::current().record("error", display(&e));
        tracing::error!(usuario_id = usuario.id, "stored password hash is malformed");
        ApiError::Internal("Erro ao realizar login.")
    })?;

    if Argon2::default()
        .verify_password(payload.senha.as_bytes(), &parsed_hash)
        .is_err()
    {
        Span::current().record("error", "invalid_credentials");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, usuario.id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);

    Span::current().record("business_event", "User logged in");

    Ok((
        StatusCode::OK,
        Json(json!({"message": "Login realizado com sucesso."})),
    ))
}
