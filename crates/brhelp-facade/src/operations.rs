//! The five operations the facade exposes to external transports.

use std::fs;

use tracing::warn;

use crate::context::AppContext;
use crate::error::FacadeError;
use crate::response::{BrowseResponse, Category, CategoriesResponse, PageContent, SearchResponse, SearchResultDto};
use crate::url::online_help_url;

/// Runs a full-text query, optionally constrained to a category.
///
/// `limit` falls back to [`AppContext::search_limit_default`] when `None`.
/// Empty query, all-too-short tokens, or an unknown category all yield an
/// empty (not an error) response, per the search engine's own policy.
pub fn search_help(ctx: &AppContext, query: &str, category: Option<&str>, limit: Option<usize>) -> Result<SearchResponse, FacadeError> {
    let limit = limit.unwrap_or(ctx.search_limit_default);
    let results = ctx.search.search(query, category, limit).map_err(FacadeError::Search)?;

    let results: Vec<SearchResultDto> = results
        .into_iter()
        .map(|r| SearchResultDto {
            page_id: r.page_id,
            title: r.title,
            file_path: r.file_path,
            help_id: r.help_id,
            breadcrumb_path: r.breadcrumb_path,
            category: r.category,
            snippet: r.snippet,
            score: r.score,
        })
        .collect();

    Ok(SearchResponse { total: results.len(), results })
}

/// Lists root-level pages, in document order.
pub fn get_categories(ctx: &AppContext) -> CategoriesResponse {
    let categories: Vec<Category> = ctx
        .indexer
        .get_categories()
        .into_iter()
        .map(|page| to_category(ctx, &page))
        .collect();

    CategoriesResponse { total: categories.len(), categories }
}

/// Lists the direct children of a section, in document order.
///
/// `None` if `section_id` is unknown or names a non-section page.
pub fn browse_section(ctx: &AppContext, section_id: &str) -> Option<BrowseResponse> {
    let children: Vec<Category> = ctx
        .indexer
        .browse(section_id)?
        .into_iter()
        .map(|page| to_category(ctx, &page))
        .collect();

    Some(BrowseResponse { total: children.len(), children })
}

/// Fetches a page's full content by id, extracting `plain_text` fresh from
/// its backing HTML file.
///
/// `None` if `page_id` is unknown.
pub fn get_page_by_id(ctx: &AppContext, page_id: &str, include_breadcrumb: bool) -> Option<PageContent> {
    let page = ctx.indexer.get_page_by_id(page_id)?;
    Some(to_page_content(ctx, page, include_breadcrumb))
}

/// Fetches a page's full content by HelpID.
///
/// `None` if `help_id` is unknown.
pub fn get_page_by_help_id(ctx: &AppContext, help_id: &str) -> Option<PageContent> {
    let page = ctx.indexer.get_page_by_help_id(help_id)?;
    Some(to_page_content(ctx, page, true))
}

fn to_category(ctx: &AppContext, page: &brhelp_toc::Page) -> Category {
    Category {
        id: page.id.clone(),
        title: page.text.clone(),
        is_section: page.is_section,
        online_help_url: online_help_url(&ctx.online_help_base_url, page.file_path.as_deref().unwrap_or("")),
    }
}

fn to_page_content(ctx: &AppContext, page: brhelp_toc::Page, include_breadcrumb: bool) -> PageContent {
    let plain_text = match &page.file_path {
        Some(file_path) => read_plain_text(ctx, &page.id, file_path),
        None => String::new(),
    };

    let breadcrumb = if include_breadcrumb {
        ctx.indexer
            .get_breadcrumb(&page.id)
            .map(|pages| pages.into_iter().map(|p| p.text).collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let file_path = page.file_path.unwrap_or_default();
    PageContent {
        page_id: page.id,
        title: page.text,
        plain_text,
        breadcrumb,
        online_help_url: online_help_url(&ctx.online_help_base_url, &file_path),
        help_id: page.help_id,
        file_path,
    }
}

fn read_plain_text(ctx: &AppContext, page_id: &str, file_path: &str) -> String {
    let full_path = ctx.help_root.join(file_path);
    match fs::read(&full_path) {
        Ok(bytes) => brhelp_html::extract(&bytes).plain_text,
        Err(error) => {
            warn!(page_id, path = %full_path.display(), %error, "page file unreadable at request time");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use brhelp_index::{ContentIndexer, IndexError, SearchEngine, SearchResult};
    use tempfile::TempDir;

    use super::*;
    use crate::traits::{Breadcrumbs, PageLookup, SearchIndex};

    const TOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<BrHelpContent>
    <Section Id="hardware_section" Text="Hardware" File="index.html">
        <Page Id="x20di9371_page" Text="X20DI9371" File="hardware/x20di9371.html">
            <Identifiers><HelpID Value="12345"/></Identifiers>
        </Page>
    </Section>
    <Section Id="motion_section" Text="Motion" File="motion/overview.html">
        <Section Id="mapp_motion_section" Text="mapp Motion" File="motion/overview.html">
            <Page Id="mc_moveabs_page" Text="MC_BR_MoveAbsolute" File="motion/mapp_motion/mc_br_moveabsolute.html">
                <Identifiers><HelpID Value="20100"/></Identifiers>
            </Page>
        </Section>
    </Section>
</BrHelpContent>
"#;

    fn sample_help_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("hardware")).unwrap();
        fs::create_dir_all(temp.path().join("motion/mapp_motion")).unwrap();
        fs::write(
            temp.path().join("hardware/x20di9371.html"),
            "<html><head><title>X20DI9371</title></head><body><p>Digital input module.</p></body></html>",
        )
        .unwrap();
        fs::write(
            temp.path().join("motion/overview.html"),
            "<html><head><title>Motion Overview</title></head><body><p>Motion control.</p></body></html>",
        )
        .unwrap();
        fs::write(
            temp.path().join("motion/mapp_motion/mc_br_moveabsolute.html"),
            "<html><head><title>MC_BR_MoveAbsolute</title></head><body><p>Moves axis to absolute position.</p></body></html>",
        )
        .unwrap();
        fs::write(temp.path().join("brhelpcontent.xml"), TOC).unwrap();
        temp
    }

    fn context(help_dir: &TempDir, db_dir: &TempDir) -> AppContext {
        let indexer = Arc::new(ContentIndexer::new(help_dir.path()));
        indexer.parse_xml_structure().unwrap();
        let engine = Arc::new(SearchEngine::open(db_dir.path(), &indexer, true).unwrap());

        AppContext {
            indexer,
            search: engine,
            help_root: help_dir.path().to_path_buf(),
            as_version: "4".to_string(),
            online_help_base_url: "https://help.br-automation.com/#/en/4/".to_string(),
            search_limit_default: 20,
        }
    }

    #[test]
    fn get_page_by_help_id_returns_matching_page() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let page = get_page_by_help_id(&ctx, "12345").unwrap();
        assert_eq!(page.title, "X20DI9371");
        assert_eq!(page.help_id.as_deref(), Some("12345"));
        assert!(page.plain_text.contains("Digital input module"));
        assert!(page.online_help_url.ends_with("hardware/x20di9371.html"));
    }

    #[test]
    fn get_page_by_id_includes_breadcrumb() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let page = get_page_by_id(&ctx, "mc_moveabs_page", true).unwrap();
        assert_eq!(page.breadcrumb, vec!["Motion", "mapp Motion", "MC_BR_MoveAbsolute"]);
    }

    #[test]
    fn get_page_by_id_without_breadcrumb_is_empty() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let page = get_page_by_id(&ctx, "mc_moveabs_page", false).unwrap();
        assert!(page.breadcrumb.is_empty());
    }

    #[test]
    fn unknown_page_id_is_not_found() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        assert!(get_page_by_id(&ctx, "nonexistent", true).is_none());
    }

    #[test]
    fn unknown_help_id_is_not_found() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        assert!(get_page_by_help_id(&ctx, "99999").is_none());
    }

    #[test]
    fn browse_unknown_section_is_not_found() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        assert!(browse_section(&ctx, "nonexistent").is_none());
    }

    #[test]
    fn browse_non_section_page_is_not_found() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        assert!(browse_section(&ctx, "x20di9371_page").is_none());
    }

    #[test]
    fn get_categories_lists_roots_with_urls() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let response = get_categories(&ctx);
        assert_eq!(response.total, 2);
        assert!(response.categories.iter().any(|c| c.title == "Hardware" && c.is_section));
    }

    #[test]
    fn search_help_returns_ranked_results() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let response = search_help(&ctx, "X20DI9371", None, None).unwrap();
        assert_eq!(response.total, response.results.len());
        assert!(!response.results.is_empty());
        assert_eq!(response.results[0].title, "X20DI9371");
    }

    #[test]
    fn search_help_with_category_filters_results() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let response = search_help(&ctx, "move absolute", Some("Motion"), None).unwrap();
        assert!(response.results.iter().all(|r| r.category == "Motion"));
    }

    #[test]
    fn search_help_empty_query_is_empty_not_error() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let ctx = context(&help_dir, &db_dir);

        let response = search_help(&ctx, "", None, None).unwrap();
        assert_eq!(response.total, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn search_limit_default_is_honored_when_limit_omitted() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let mut ctx = context(&help_dir, &db_dir);
        ctx.search_limit_default = 1;

        let response = search_help(&ctx, "motion", None, None).unwrap();
        assert!(response.total <= 1);
    }

    struct FailingSearch;

    impl SearchIndex for FailingSearch {
        fn search(&self, _query: &str, _category: Option<&str>, _limit: usize) -> Result<Vec<SearchResult>, IndexError> {
            Err(IndexError::NotReady("closed"))
        }
    }

    #[test]
    fn search_help_propagates_storage_failure() {
        let help_dir = sample_help_dir();
        let db_dir = TempDir::new().unwrap();
        let mut ctx = context(&help_dir, &db_dir);
        ctx.search = Arc::new(FailingSearch);

        assert!(matches!(search_help(&ctx, "motion", None, None), Err(FacadeError::Search(_))));
    }

    struct FakeLookup;

    impl Breadcrumbs for FakeLookup {
        fn get_breadcrumb(&self, _id: &str) -> Option<Vec<brhelp_toc::Page>> {
            None
        }

        fn get_breadcrumb_string(&self, _id: &str) -> Option<String> {
            None
        }
    }

    impl PageLookup for FakeLookup {
        fn get_page_by_id(&self, id: &str) -> Option<brhelp_toc::Page> {
            (id == "fake").then(|| brhelp_toc::Page {
                id: "fake".to_string(),
                text: "Fake Page".to_string(),
                file_path: None,
                is_section: false,
                help_id: None,
                parent_id: None,
                child_ids: Vec::new(),
            })
        }

        fn get_page_by_help_id(&self, _help_id: &str) -> Option<brhelp_toc::Page> {
            None
        }

        fn get_categories(&self) -> Vec<brhelp_toc::Page> {
            Vec::new()
        }

        fn browse(&self, _section_id: &str) -> Option<Vec<brhelp_toc::Page>> {
            None
        }
    }

    #[test]
    fn substitutable_fake_lookup_drives_page_content() {
        let ctx = AppContext {
            indexer: Arc::new(FakeLookup),
            search: Arc::new(FailingSearch),
            help_root: PathBuf::new(),
            as_version: "4".to_string(),
            online_help_base_url: "https://example.com/".to_string(),
            search_limit_default: 20,
        };

        let page = get_page_by_id(&ctx, "fake", true).unwrap();
        assert_eq!(page.title, "Fake Page");
        assert_eq!(page.plain_text, "");
    }
}
