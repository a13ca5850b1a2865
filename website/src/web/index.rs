use askama::Template;
use axum::{Extension, body::Body, http::StatusCode, response::Response};
use snafu::ResultExt;

use crate::{Result, ctx::Ctx, error::TemplateSnafu, models::TemplateData};

use super::{found, html_response};

#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomeTemplate {
    t: TemplateData,
}

pub async fn index_handler(Extension(ctx): Extension<Ctx>) -> Result<Response<Body>> {
    if ctx.actor.is_authenticated() {
        return Ok(found("/dashboard"));
    }

    let mut t = TemplateData::new(ctx.actor);
    t.title = String::from("Home");

    let tpl = HomeTemplate { t };
    html_response(StatusCode::OK, tpl.render().context(TemplateSnafu)?)
}
