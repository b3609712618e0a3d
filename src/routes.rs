use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, info};

use crate::{
    AppState, csrf,
    error::AppResult,
    forms::{self, FieldErrors},
    models::{AddRequest, EditRequest, IdQuery},
    ranking, templates,
};

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let mut movies = state.store.list().await?;
    ranking::assign(&mut movies);
    state.store.persist_rankings(&movies).await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Html<String>) {
    let (jar, token) = csrf::ensure_token(jar, state.config.csrf_ttl_secs);
    (jar, Html(templates::add_page("", &token, &FieldErrors::default())))
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(req): Form<AddRequest>,
) -> AppResult<Response> {
    let checked = forms::validate_add(&req);
    let mut errors = checked.as_ref().err().cloned().unwrap_or_default();
    csrf::check(&jar, &req.csrf_token, &mut errors);

    match checked {
        Ok(title) if errors.is_empty() => {
            let candidates = state.tmdb.search(&title).await?;
            let body =
                templates::select_page(&title, &candidates, &state.config.tmdb_image_base_url);
            Ok(Html(body).into_response())
        },
        _ => {
            let (jar, token) = csrf::ensure_token(jar, state.config.csrf_ttl_secs);
            let body = templates::add_page(&req.title, &token, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response())
        },
    }
}

pub async fn find(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    let details = state.tmdb.fetch_details(q.id).await?;
    debug!(tmdb_id = details.id, title = %details.title, "fetched details");
    let new = details.into_new_movie(&state.config.tmdb_image_base_url)?;
    let movie = state.store.create(new).await?;

    info!(id = movie.id, title = %movie.title, "added movie");
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = state.store.read(q.id).await?;
    let (jar, token) = csrf::ensure_token(jar, state.config.csrf_ttl_secs);

    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
    let review = movie.review.clone().unwrap_or_default();
    let body = templates::edit_page(&movie, &rating, &review, &token, &FieldErrors::default());
    Ok((jar, Html(body)))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
    jar: SignedCookieJar,
    Form(req): Form<EditRequest>,
) -> AppResult<Response> {
    let movie = state.store.read(q.id).await?;

    let checked = forms::validate_edit(&req);
    let mut errors = checked.as_ref().err().cloned().unwrap_or_default();
    csrf::check(&jar, &req.csrf_token, &mut errors);

    match checked {
        Ok(patch) if errors.is_empty() => {
            let updated = state.store.update(movie.id, patch).await?;
            info!(id = updated.id, rating = ?updated.rating, "rated movie");
            Ok(Redirect::to("/").into_response())
        },
        _ => {
            let (jar, token) = csrf::ensure_token(jar, state.config.csrf_ttl_secs);
            let body = templates::edit_page(&movie, &req.rating, &req.review, &token, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response())
        },
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    info!(id = q.id, "deleted movie");
    Ok(Redirect::to("/"))
}
