//! Build-time sitemap and robots generation
//!
//! Queries the content API for every post's handle and update date,
//! then writes `sitemap.xml` (home, blog index, one entry per post)
//! and `robots.txt` into the output directory. All three environment
//! values are required; a missing one aborts with a diagnostic.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::blog::ContentApi;
use crate::cms::{CmsClient, CmsError, Query};
use crate::config::Env;
use crate::content::BlogPost;
use crate::helpers::{absolute_url, date_xml, xml_escape};

/// Page size for walking the posts collection
const WALK_PAGE_SIZE: usize = 100;

/// Generate sitemap.xml and robots.txt into `out_dir`
pub async fn run(env: &Env, out_dir: &Path) -> Result<()> {
    let cms_url = env.require_cms_url()?;
    let token = env.require_cms_token()?;
    let base_url = env.require_base_url()?;

    let client = CmsClient::new(cms_url, token)?;
    let posts = fetch_all_posts(&client)
        .await
        .context("could not list posts for the sitemap")?;

    info!("building sitemap for {} posts", posts.len());

    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;

    let sitemap = render_sitemap(base_url, &posts)?;
    fs::write(out_dir.join("sitemap.xml"), sitemap).context("could not write sitemap.xml")?;

    let robots = render_robots(base_url)?;
    fs::write(out_dir.join("robots.txt"), robots).context("could not write robots.txt")?;

    println!("Sitemap generated successfully!");
    Ok(())
}

/// Walk every page of the posts collection, fetching only the fields
/// the sitemap needs
pub async fn fetch_all_posts<A: ContentApi>(api: &A) -> Result<Vec<BlogPost>, CmsError> {
    let mut posts = Vec::new();
    let mut page = 1;

    loop {
        let query = Query::new()
            .field("handle")
            .field("updatedAt")
            .sort("publishedAt:desc")
            .paginate(page, WALK_PAGE_SIZE);

        let mut response = api.find_posts(&query).await?;
        posts.append(&mut response.data);

        if page >= response.meta.pagination.page_count.max(1) {
            break;
        }
        page += 1;
    }

    Ok(posts)
}

/// Render the sitemap XML
pub fn render_sitemap(base_url: &str, posts: &[BlogPost]) -> Result<String> {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    push_entry(&mut xml, &absolute_url(base_url, "")?, None, "weekly", "1.0");
    push_entry(
        &mut xml,
        &absolute_url(base_url, "blog")?,
        None,
        "daily",
        "0.9",
    );

    for post in posts {
        let loc = absolute_url(base_url, &format!("blog/{}", post.handle))?;
        let lastmod = post.updated_at.map(|d| date_xml(&d));
        push_entry(&mut xml, &loc, lastmod.as_deref(), "monthly", "0.8");
    }

    xml.push_str("</urlset>\n");
    Ok(xml)
}

fn push_entry(
    xml: &mut String,
    loc: &str,
    lastmod: Option<&str>,
    changefreq: &str,
    priority: &str,
) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    if let Some(lastmod) = lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    xml.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    xml.push_str(&format!("    <priority>{}</priority>\n", priority));
    xml.push_str("  </url>\n");
}

/// Render robots.txt, referencing the sitemap
pub fn render_robots(base_url: &str) -> Result<String> {
    Ok(format!(
        "User-agent: *\nAllow: /\nSitemap: {}\n",
        absolute_url(base_url, "sitemap.xml")?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::test_api::{page_of, FakeApi};
    use chrono::{TimeZone, Utc};

    fn post_with_date(handle: &str) -> BlogPost {
        BlogPost {
            handle: handle.to_string(),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_env_aborts() {
        let env = Env::default();
        let out = tempfile::tempdir().unwrap();
        let err = run(&env, out.path()).await.unwrap_err();
        assert!(err.to_string().contains("FOLIO_CMS_URL"));
    }

    #[test]
    fn test_render_sitemap_entries() {
        let posts = vec![post_with_date("hello-world"), post_with_date("second")];
        let xml = render_sitemap("https://example.com", &posts).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/hello-world</loc>"));
        assert!(xml.contains("<lastmod>2024-03-02T10:00:00"));
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn test_render_sitemap_without_update_date() {
        let posts = vec![BlogPost {
            handle: "undated".to_string(),
            ..Default::default()
        }];
        let xml = render_sitemap("https://example.com", &posts).unwrap();
        assert!(xml.contains("blog/undated"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_render_robots() {
        let robots = render_robots("https://example.com").unwrap();
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
        assert!(robots.contains("User-agent: *"));
    }

    #[tokio::test]
    async fn test_fetch_all_posts_walks_every_page() {
        let api = FakeApi::new();
        api.queue_posts(Ok(page_of(
            vec![post_with_date("one"), post_with_date("two")],
            1,
            2,
            3,
        )));
        api.queue_posts(Ok(page_of(vec![post_with_date("three")], 2, 2, 3)));

        let posts = fetch_all_posts(&api).await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(api.call_count(), 2);

        let calls = api.calls.lock().unwrap();
        assert!(calls[0].contains("fields[0]=handle"));
        assert!(calls[0].contains("fields[1]=updatedAt"));
        assert!(calls[1].contains("pagination[page]=2"));
    }

    #[tokio::test]
    async fn test_fetch_all_posts_empty_collection() {
        let api = FakeApi::new();
        api.queue_posts(Ok(page_of(vec![], 1, WALK_PAGE_SIZE, 0)));
        let posts = fetch_all_posts(&api).await.unwrap();
        assert!(posts.is_empty());
        assert_eq!(api.call_count(), 1);
    }
}
