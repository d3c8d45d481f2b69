//! `campo login`: exchanges credentials for a token and keeps it in the
//! config file. The token itself is never printed.

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::LoginArgs;
use crate::error::ApiResult;
use crate::output::Render;
use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
pub struct LoginReport {
    pub username: String,
    pub config_path: PathBuf,
}

pub async fn login(config: &mut ConfigState, args: LoginArgs) -> ApiResult<LoginReport> {
    let client = config.backend()?;
    let session = client.login(&args.username, &args.password).await?;
    let config_path = config.save_token(session.access_token)?;

    Ok(LoginReport {
        username: args.username.trim().to_string(),
        config_path,
    })
}

impl Render for LoginReport {
    fn render(&self, _config: &ConfigState) -> String {
        format!(
            "Logged in as {}. Token saved to {}",
            self.username,
            self.config_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::spawn_backend;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use campo_client::CampoConfig;
    use serde_json::{json, Value};

    async fn config_for(tag: &str) -> (ConfigState, PathBuf) {
        let router = Router::new().route(
            "/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "campo2024" {
                    (StatusCode::OK, Json(json!({ "access_token": "jwt-xyz" })))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Credenciales inválidas" })))
                }
            }),
        );
        let base = spawn_backend(router).await;

        let dir = std::env::temp_dir().join(format!("campo-login-{}-{}", tag, std::process::id()));
        let path = dir.join("campo.toml");
        let mut config = CampoConfig::default();
        config.backend.base_url = base;
        (ConfigState::new(config, Some(path.clone())), dir)
    }

    #[tokio::test]
    async fn test_login_saves_token() {
        let (mut config, dir) = config_for("ok").await;
        let report = login(
            &mut config,
            LoginArgs {
                username: "tatiana".into(),
                password: "campo2024".into(),
            },
        )
        .await
        .unwrap();

        let saved = std::fs::read_to_string(&report.config_path).unwrap();
        assert!(saved.contains("jwt-xyz"));
        assert!(!report.render(&config).contains("jwt-xyz"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_rejected_login_writes_nothing() {
        let (mut config, dir) = config_for("rejected").await;
        let err = login(
            &mut config,
            LoginArgs {
                username: "tatiana".into(),
                password: "nope".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Credenciales inválidas");
        assert!(!dir.join("campo.toml").exists());
    }
}
