//! Public read endpoints consumed by the server-rendered site.
//!
//! Responses carry resolved media URLs instead of object keys and are
//! cached per content tag until the next admin mutation of that kind.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use vitrine_core::content::{ContentKind, TAG_AUTHORS, TAG_POSTS};
use vitrine_core::media::MediaKind;
use vitrine_core::types::{DbId, Timestamp};
use vitrine_db::models::author::Author;
use vitrine_db::models::post::Post;
use vitrine_db::repositories::{
    AuthorRepo, GalleryItemRepo, PostRepo, TeamMemberRepo, TestimonialRepo,
};

use crate::error::{AppError, AppResult};
use crate::media::public_url;
use crate::ordering::list_ordered;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SiteAuthor {
    pub id: DbId,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SitePostSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_url: Option<String>,
    pub published_at: Option<Timestamp>,
    pub author: Option<SiteAuthor>,
}

#[derive(Debug, Serialize)]
pub struct SitePost {
    #[serde(flatten)]
    pub summary: SitePostSummary,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct SiteTeamMember {
    pub id: DbId,
    pub name: String,
    pub role_title: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SiteTestimonial {
    pub id: DbId,
    pub quote: String,
    pub author_name: String,
    pub author_title: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SiteGalleryItem {
    pub id: DbId,
    pub title: Option<String>,
    pub alt_text: Option<String>,
    pub url: String,
    pub content_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

fn to_value<T: Serialize>(view: T) -> AppResult<Value> {
    serde_json::to_value(view)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize response: {e}")))
}

fn author_view(state: &AppState, author: Author) -> SiteAuthor {
    SiteAuthor {
        avatar_url: public_url(state, author.avatar_key.as_deref()),
        id: author.id,
        name: author.name,
        bio: author.bio,
    }
}

fn post_summary(state: &AppState, post: &Post, author: Option<SiteAuthor>) -> SitePostSummary {
    SitePostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
        cover_url: public_url(state, post.cover_key.as_deref()),
        published_at: post.published_at,
        author,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/site/authors
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<DataResponse<Value>>> {
    let data = state
        .cache
        .get_or_try_insert(TAG_AUTHORS, "all", || async {
            let authors = AuthorRepo::list(&state.pool).await?;
            let views: Vec<SiteAuthor> = authors
                .into_iter()
                .map(|a| author_view(&state, a))
                .collect();
            to_value(views)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// Pages starting at or beyond this offset are read straight from the
/// database.
pub const MAX_CACHED_POST_OFFSET: i64 = 1_000;

/// GET /api/v1/site/posts
///
/// Published posts, newest first. Supports `?limit=&offset=`.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let (limit, offset) = params.resolve();
    let load = || load_post_page(&state, limit, offset);

    let data = if offset < MAX_CACHED_POST_OFFSET {
        let key = format!("page:{limit}:{offset}");
        state.cache.get_or_try_insert(TAG_POSTS, &key, load).await?
    } else {
        load().await?
    };
    Ok(Json(DataResponse { data }))
}

async fn load_post_page(state: &AppState, limit: i64, offset: i64) -> AppResult<Value> {
    let posts = PostRepo::list_published(&state.pool, limit, offset).await?;
    let authors: HashMap<DbId, Author> = AuthorRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let views: Vec<SitePostSummary> = posts
        .iter()
        .map(|post| {
            let author = authors
                .get(&post.author_id)
                .cloned()
                .map(|a| author_view(state, a));
            post_summary(state, post, author)
        })
        .collect();
    to_value(views)
}

/// GET /api/v1/site/posts/{slug}
///
/// Drafts are reported as 404.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let key = format!("slug:{slug}");

    let data = state
        .cache
        .get_or_try_insert(TAG_POSTS, &key, || async {
            let post = PostRepo::find_published_by_slug(&state.pool, &slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Post '{slug}' not found")))?;
            let author = AuthorRepo::find_by_id(&state.pool, post.author_id)
                .await?
                .map(|a| author_view(&state, a));

            to_value(SitePost {
                summary: post_summary(&state, &post, author),
                body: post.body,
            })
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/site/team
pub async fn list_team(State(state): State<AppState>) -> AppResult<Json<DataResponse<Value>>> {
    let kind = ContentKind::TeamMember;
    let data = state
        .cache
        .get_or_try_insert(kind.cache_tag(), "all", || async {
            let canonical = TeamMemberRepo::list(&state.pool).await?;
            let members = list_ordered(&state, kind, canonical).await;
            let views: Vec<SiteTeamMember> = members
                .into_iter()
                .map(|m| SiteTeamMember {
                    avatar_url: public_url(&state, m.avatar_key.as_deref()),
                    id: m.id,
                    name: m.name,
                    role_title: m.role_title,
                    bio: m.bio,
                    profile_url: m.profile_url,
                })
                .collect();
            to_value(views)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/site/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Value>>> {
    let kind = ContentKind::Testimonial;
    let data = state
        .cache
        .get_or_try_insert(kind.cache_tag(), "all", || async {
            let canonical = TestimonialRepo::list(&state.pool).await?;
            let testimonials = list_ordered(&state, kind, canonical).await;
            let views: Vec<SiteTestimonial> = testimonials
                .into_iter()
                .map(|t| SiteTestimonial {
                    id: t.id,
                    quote: t.quote,
                    author_name: t.author_name,
                    author_title: t.author_title,
                    company: t.company,
                })
                .collect();
            to_value(views)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/site/gallery/{kind}
pub async fn list_gallery(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let media_kind = MediaKind::from_name(&kind)?;
    let kind = media_kind.content_kind();

    let data = state
        .cache
        .get_or_try_insert(kind.cache_tag(), "all", || async {
            let canonical = GalleryItemRepo::list_by_kind(&state.pool, media_kind).await?;
            let items = list_ordered(&state, kind, canonical).await;
            let views: Vec<SiteGalleryItem> = items
                .into_iter()
                .map(|item| SiteGalleryItem {
                    url: state.media_store.public_url(&item.media_key),
                    id: item.id,
                    title: item.title,
                    alt_text: item.alt_text,
                    content_type: item.content_type,
                    width: item.width,
                    height: item.height,
                })
                .collect();
            to_value(views)
        })
        .await?;
    Ok(Json(DataResponse { data }))
}
