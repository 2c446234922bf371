//! Sign-in route handlers.
//!
//! There are no stored accounts or passwords: signing in records the
//! customer's email in the session, which is all the checkout guard needs.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bookstore_core::Email;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::layout::{Layout, LayoutContext};
use super::local_redirect;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::{CurrentCustomer, Notice};
use crate::services::push_notice;

/// Longest display name accepted at registration.
const MAX_NAME_LENGTH: usize = 80;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub next: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub name: Option<String>,
    pub next: Option<String>,
}

/// Query parameters carrying the page to return to after signing in.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub next: String,
    pub email: String,
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub next: String,
    pub email: String,
    pub name: String,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
#[instrument(skip(page))]
pub async fn login_page(page: LayoutContext, Query(query): Query<NextQuery>) -> LoginTemplate {
    LoginTemplate {
        layout: page.render().await,
        next: local_redirect(query.next.as_deref(), "/"),
        email: String::new(),
        error: None,
    }
}

/// Handle login form submission.
#[instrument(skip(session, page, form))]
pub async fn login(
    session: Session,
    page: LayoutContext,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next = local_redirect(form.next.as_deref(), "/");

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            let template = LoginTemplate {
                layout: page.render().await,
                next,
                email: form.email,
                error: Some(e.to_string()),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let customer = CurrentCustomer {
        email,
        display_name: None,
    };
    sign_in(&session, &customer).await?;

    Ok(Redirect::to(&next).into_response())
}

/// Display the register page.
#[instrument(skip(page))]
pub async fn register_page(page: LayoutContext, Query(query): Query<NextQuery>) -> RegisterTemplate {
    RegisterTemplate {
        layout: page.render().await,
        next: local_redirect(query.next.as_deref(), "/"),
        email: String::new(),
        name: String::new(),
        error: None,
    }
}

/// Handle registration form submission.
#[instrument(skip(session, page, form))]
pub async fn register(
    session: Session,
    page: LayoutContext,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let next = local_redirect(form.next.as_deref(), "/");
    let name = form.name.unwrap_or_default().trim().to_string();

    let validated = Email::parse(&form.email)
        .map_err(|e| e.to_string())
        .and_then(|email| {
            if name.chars().count() > MAX_NAME_LENGTH {
                Err(format!("Name must be at most {MAX_NAME_LENGTH} characters"))
            } else {
                Ok(email)
            }
        });

    let email = match validated {
        Ok(email) => email,
        Err(error) => {
            let template = RegisterTemplate {
                layout: page.render().await,
                next,
                email: form.email,
                name,
                error: Some(error),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let customer = CurrentCustomer {
        email,
        display_name: (!name.is_empty()).then_some(name),
    };
    sign_in(&session, &customer).await?;
    push_notice(
        &session,
        Notice::success(format!("Welcome, {}!", customer.greeting_name())),
    )
    .await;

    Ok(Redirect::to(&next).into_response())
}

/// Handle logout. The cart stays in the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_customer(&session).await?;
    clear_sentry_user();
    push_notice(&session, Notice::info("You have been signed out.")).await;
    tracing::info!("Customer signed out");

    Ok(Redirect::to("/"))
}

async fn sign_in(session: &Session, customer: &CurrentCustomer) -> Result<()> {
    set_current_customer(session, customer).await?;
    set_sentry_user(customer.email.as_str());
    tracing::info!(email = %customer.email, "Customer signed in");
    Ok(())
}
