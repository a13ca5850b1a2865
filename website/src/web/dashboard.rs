use askama::Template;
use axum::{
    Extension,
    body::Body,
    extract::State,
    http::StatusCode,
    response::Response,
};
use snafu::ResultExt;

use crate::{
    Error, Result,
    ctx::Ctx,
    error::TemplateSnafu,
    models::{DashboardView, TemplateData},
    run::AppState,
    services::{
        dashboard::load_dashboard,
        token::{LOGOUT_CSRF_SUBJECT, create_csrf_token_svc},
    },
};

use super::html_response;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
struct DashboardTemplate {
    t: TemplateData,
    view: DashboardView,
    logout_token: String,
}

pub async fn dashboard_handler(
    Extension(ctx): Extension<Ctx>,
    State(state): State<AppState>,
) -> Result<Response<Body>> {
    let Some(actor) = ctx.actor() else {
        return Err(Error::LoginRequired);
    };

    let view = load_dashboard(&state, actor).await?;
    let logout_token = create_csrf_token_svc(LOGOUT_CSRF_SUBJECT, &state.config.jwt_secret)?;

    let mut t = TemplateData::new(ctx.actor.clone());
    t.title = String::from("Dashboard");

    let tpl = DashboardTemplate {
        t,
        view,
        logout_token,
    };
    html_response(StatusCode::OK, tpl.render().context(TemplateSnafu)?)
}
