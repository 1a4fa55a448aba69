//! Web server rendering the portfolio and blog pages

use anyhow::Result;
use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use chrono::{Datelike, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::blog::{load_categories, load_page, load_post_by_handle, FilterState};
use crate::cms::CmsClient;
use crate::config::SiteConfig;
use crate::content::{BlogPost, HtmlRenderer};
use crate::helpers::html_escape;
use crate::templates::{
    ContactFormData, FilterCategoryData, FilterData, FilterYearData, PaginationData, PostCardData,
    PostData, SiteData, SocialLinkData, TemplateRenderer,
};
use crate::Folio;

mod contact;

pub use contact::ContactForm;

/// Posts shown in the home page strip
const LATEST_POSTS_ON_HOME: usize = 3;

/// Shared state for all handlers
pub struct AppState {
    config: SiteConfig,
    cms_url: String,
    client: CmsClient,
    templates: TemplateRenderer,
    renderer: HtmlRenderer,
    contact_endpoint: Option<String>,
    http: reqwest::Client,
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let cms_url = folio.env.require_cms_url()?.to_string();
    let token = folio.env.require_cms_token()?;
    let client = CmsClient::new(&cms_url, token)?;

    if folio.env.contact_endpoint.is_none() {
        warn!("no contact endpoint configured; the contact form is disabled");
    }

    let state = Arc::new(AppState {
        config: folio.config.clone(),
        renderer: HtmlRenderer::with_media_base(&cms_url),
        cms_url,
        client,
        templates: TemplateRenderer::new()?,
        contact_endpoint: folio.env.contact_endpoint.clone(),
        http: reqwest::Client::new(),
    });

    let app = router(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server listening at http://{}:{}", ip, port);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/blog", get(blog_index))
        .route("/blog/:handle", get(blog_post))
        .route("/contact", get(contact_page).post(contact_submit))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    let filter = FilterState::new();
    let mut context = base_context(&state);

    match load_page(&state.client, &filter, LATEST_POSTS_ON_HOME).await {
        Ok(page) => {
            let cards: Vec<PostCardData> =
                page.posts.iter().map(|p| post_card(&state, p)).collect();
            context.insert("posts", &cards);
            context.insert("posts_error", &false);
        }
        Err(e) => {
            warn!("home post strip failed: {}", e);
            context.insert("posts", &Vec::<PostCardData>::new());
            context.insert("posts_error", &true);
        }
    }

    render(&state, "home.html", &context, StatusCode::OK)
}

async fn blog_index(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let params = parse_blog_params(query.as_deref().unwrap_or(""));

    let mut filter = FilterState::new();
    filter.set_categories(params.categories.clone());
    filter.set_years(params.years.clone());
    filter.set_search(params.search.clone());
    if let Some(page) = params.page {
        filter.set_page(page);
    }

    let page_size = state.config.posts_per_page.max(1);
    let (page_result, categories_result) = tokio::join!(
        load_page(&state.client, &filter, page_size),
        load_categories(&state.client)
    );

    // A missing sidebar is not worth failing the page over.
    let categories = match categories_result {
        Ok(categories) => categories,
        Err(e) => {
            warn!("category fetch failed: {}", e);
            Vec::new()
        }
    };

    let mut context = base_context(&state);

    let filters = FilterData {
        categories: categories
            .iter()
            .map(|c| FilterCategoryData {
                document_id: c.document_id.clone(),
                name: c.name.clone(),
                selected: filter.category_ids().contains(&c.document_id),
            })
            .collect(),
        years: state
            .config
            .filter_years(Utc::now().year())
            .into_iter()
            .map(|year| FilterYearData {
                year,
                selected: filter.years().contains(&year),
            })
            .collect(),
        // Autoescaping is off; anything echoed back must be escaped here.
        search: html_escape(filter.search()),
        has_active_filters: filter.is_active(),
    };
    context.insert("filters", &filters);

    match page_result {
        Ok(page) => {
            let cards: Vec<PostCardData> =
                page.posts.iter().map(|p| post_card(&state, p)).collect();
            context.insert("posts", &cards);
            context.insert("total", &page.total);
            context.insert("overall_total", &page.overall_total);
            context.insert("error", &false);
            context.insert(
                "pagination",
                &pagination(&filter, page.page, page.total_pages),
            );
        }
        Err(e) => {
            warn!("blog listing fetch failed: {}", e);
            context.insert("posts", &Vec::<PostCardData>::new());
            context.insert("total", &0usize);
            context.insert("overall_total", &0usize);
            context.insert("error", &true);
            context.insert("pagination", &pagination(&filter, 1, 0));
        }
    }

    render(&state, "blog.html", &context, StatusCode::OK)
}

async fn blog_post(State(state): State<Arc<AppState>>, Path(handle): Path<String>) -> Response {
    match load_post_by_handle(&state.client, &handle).await {
        Ok(Some(post)) => {
            let mut context = base_context(&state);
            context.insert("post", &post_page(&state, &post));
            render(&state, "post.html", &context, StatusCode::OK)
        }
        Ok(None) => {
            let mut context = base_context(&state);
            context.insert(
                "message",
                &format!("No post named \"{}\".", html_escape(&handle)),
            );
            render(&state, "not_found.html", &context, StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("post fetch failed: {}", e);
            let context = base_context(&state);
            render(&state, "error.html", &context, StatusCode::BAD_GATEWAY)
        }
    }
}

async fn contact_page(State(state): State<Arc<AppState>>) -> Response {
    let mut context = base_context(&state);
    context.insert("form", &ContactFormData::default());
    render(&state, "contact.html", &context, StatusCode::OK)
}

async fn contact_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Response {
    let mut context = base_context(&state);

    let Some(endpoint) = state.contact_endpoint.as_deref() else {
        context.insert("form", &ContactFormData::default());
        return render(&state, "contact.html", &context, StatusCode::OK);
    };

    let errors = form.validate();
    if !errors.is_empty() {
        context.insert(
            "form",
            &ContactFormData {
                values: escaped_values(&form),
                errors,
                ..Default::default()
            },
        );
        return render(
            &state,
            "contact.html",
            &context,
            StatusCode::UNPROCESSABLE_ENTITY,
        );
    }

    let delivered = match state.http.post(endpoint).json(&form).send().await {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            warn!("contact endpoint returned {}", response.status());
            false
        }
        Err(e) => {
            warn!("contact submission failed: {}", e);
            false
        }
    };

    if delivered {
        context.insert(
            "form",
            &ContactFormData {
                submitted: true,
                ..Default::default()
            },
        );
        render(&state, "contact.html", &context, StatusCode::OK)
    } else {
        // Keep the values so the visitor can simply resubmit.
        context.insert(
            "form",
            &ContactFormData {
                values: escaped_values(&form),
                submit_error: Some(
                    "Your message could not be sent. Please try again.".to_string(),
                ),
                ..Default::default()
            },
        );
        render(&state, "contact.html", &context, StatusCode::BAD_GATEWAY)
    }
}

async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    let context = base_context(&state);
    render(&state, "not_found.html", &context, StatusCode::NOT_FOUND)
}

/// Form values escaped for re-rendering into attribute values
fn escaped_values(form: &ContactForm) -> std::collections::HashMap<String, String> {
    form.values()
        .into_iter()
        .map(|(field, value)| (field, html_escape(&value)))
        .collect()
}

/// Filter selections parsed from the listing query string
#[derive(Debug, Clone, Default, PartialEq)]
struct BlogParams {
    categories: Vec<String>,
    years: Vec<i32>,
    search: String,
    page: Option<usize>,
}

/// Parse listing parameters, accepting both repeated keys (checkbox
/// forms) and comma-separated values (hand-written URLs)
fn parse_blog_params(query: &str) -> BlogParams {
    let mut params = BlogParams::default();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "categories" => params.categories.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
            ),
            "years" => params.years.extend(
                value
                    .split(',')
                    .filter_map(|v| v.trim().parse::<i32>().ok()),
            ),
            "q" => params.search = value.to_string(),
            "page" => params.page = value.trim().parse().ok(),
            _ => {}
        }
    }

    params
}

/// Build a listing URL preserving the given filter state
fn listing_url(filter: &FilterState, page: usize) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());

    if !filter.category_ids().is_empty() {
        serializer.append_pair("categories", &filter.category_ids().join(","));
    }
    if !filter.years().is_empty() {
        let years: Vec<String> = filter.years().iter().map(|y| y.to_string()).collect();
        serializer.append_pair("years", &years.join(","));
    }
    if !filter.search().trim().is_empty() {
        serializer.append_pair("q", filter.search());
    }
    if page > 1 {
        serializer.append_pair("page", &page.to_string());
    }

    let query = serializer.finish();
    if query.is_empty() {
        "/blog".to_string()
    } else {
        format!("/blog?{}", query)
    }
}

fn pagination(filter: &FilterState, current: usize, total_pages: usize) -> PaginationData {
    PaginationData {
        current,
        total_pages,
        has_prev: current > 1,
        has_next: current < total_pages,
        prev_link: listing_url(filter, current.saturating_sub(1).max(1)),
        next_link: listing_url(filter, current + 1),
    }
}

fn base_context(state: &AppState) -> Context {
    let config = &state.config;
    let site = SiteData {
        title: config.title.clone(),
        subtitle: config.subtitle.clone(),
        description: config.description.clone(),
        author: config.author.clone(),
        tagline: config.tagline.clone(),
        language: config.language.clone(),
        about: config.about.clone(),
        available: config.availability.available,
        availability_note: config.availability.note.clone(),
        social_links: config
            .social_links
            .iter()
            .map(|link| SocialLinkData {
                label: link.label.clone(),
                url: link.url.clone(),
            })
            .collect(),
        contact_email: config.contact_email.clone(),
        contact_enabled: state.contact_endpoint.is_some(),
    };

    let mut context = Context::new();
    context.insert("site", &site);
    context
}

fn post_card(state: &AppState, post: &BlogPost) -> PostCardData {
    let image = post.featured_image_landscape.as_ref();
    PostCardData {
        handle: post.handle.clone(),
        title: post.title.clone(),
        subtitle: post.subtitle.clone(),
        published_at: post.published_at.map(|d| d.to_rfc3339()),
        summary: post.summary(
            state.config.summary_max_units,
            state.config.summary_unit_width,
        ),
        image_url: image.map(|m| crate::helpers::resolve_media_url(&state.cms_url, &m.url)),
        image_alt: image.map(|m| m.alt().to_string()).unwrap_or_default(),
        categories: post.categories.iter().map(|c| c.name.clone()).collect(),
    }
}

fn post_page(state: &AppState, post: &BlogPost) -> PostData {
    let image = post.featured_image_landscape.as_ref();
    PostData {
        handle: post.handle.clone(),
        title: post.title.clone(),
        subtitle: post.subtitle.clone(),
        published_at: post.published_at.map(|d| d.to_rfc3339()),
        updated_at: post.updated_at.map(|d| d.to_rfc3339()),
        content_html: state.renderer.render(&post.content),
        image_url: image.map(|m| crate::helpers::resolve_media_url(&state.cms_url, &m.url)),
        image_alt: image.map(|m| m.alt().to_string()).unwrap_or_default(),
        categories: post.categories.iter().map(|c| c.name.clone()).collect(),
    }
}

fn render(state: &AppState, template: &str, context: &Context, status: StatusCode) -> Response {
    match state.templates.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("template {} failed to render: {:?}", template, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}
