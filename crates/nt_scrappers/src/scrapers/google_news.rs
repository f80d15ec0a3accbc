use async_trait::async_trait;
use lazy_static::lazy_static;
use nt_core::{Error, RawArticle, Result, SearchHandle, SearchProvider, SearchRequest};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

use super::utils;
use crate::logging::Logger;

const SEARCH_URL: &str = "https://www.google.com/search";
const GOOGLE_ORIGIN: &str = "https://www.google.com";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const RESULTS_PER_PAGE: u32 = 10;

lazy_static! {
    // Full JS layout first, then the basic HTML layout served to plain clients.
    static ref RESULT: Selector = Selector::parse("div.SoaBEf, div.Gx5Zad").unwrap();
    static ref TITLE: Selector = Selector::parse("div[role='heading'], h3, div.vvjwJb").unwrap();
    static ref MEDIA: Selector = Selector::parse("div.MgUUmf, div.CEMjEf, div.UPmit").unwrap();
    static ref DATE: Selector = Selector::parse("div.OSrXXb span, span.WG9SHc span, span.r0bn4c").unwrap();
    static ref DESC: Selector = Selector::parse("div.GI74Re, div.Y3v8qd, div.s3v9rd").unwrap();
    static ref LINK: Selector = Selector::parse("a[href]").unwrap();
}

/// Scrapes the news tab of Google search, ten results per page.
#[derive(Debug, Clone)]
pub struct GoogleNewsProvider {
    client: Client,
    base_url: String,
    logger: Logger,
}

impl GoogleNewsProvider {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(client, SEARCH_URL))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            logger: Logger::new().with_prefix("[google-news]".to_string()),
        }
    }

    /// Builds the result-page URL for a 1-based page.
    pub fn page_url(&self, request: &SearchRequest, page: u32) -> Result<Url> {
        let date_format = "%m/%d/%Y";
        let tbs = format!(
            "lr:lang_1{},cdr:1,cd_min:{},cd_max:{}",
            request.lang,
            request.range.start.format(date_format),
            request.range.end.format(date_format),
        );
        let lr = format!("lang_{}", request.lang);
        let start = ((page.max(1) - 1) * RESULTS_PER_PAGE).to_string();

        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", request.query.as_str()),
                ("hl", request.lang.as_str()),
                ("gl", request.region.as_str()),
                ("lr", lr.as_str()),
                ("tbm", "nws"),
                ("tbs", tbs.as_str()),
                ("start", start.as_str()),
            ],
        )
        .map_err(|e| Error::Scraping(format!("Failed to build search URL: {}", e)))
    }
}

#[async_trait]
impl SearchProvider for GoogleNewsProvider {
    fn name(&self) -> &str {
        "Google News"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchHandle> {
        request.validate()?;
        // fail early on a request that cannot be turned into a URL
        self.page_url(request, 1)?;
        self.logger.info(&format!(
            "Opened search {:?} ({}-{}, {} to {})",
            request.query, request.lang, request.region, request.range.start, request.range.end
        ));
        Ok(SearchHandle { request: request.clone() })
    }

    async fn fetch_page(&self, handle: &SearchHandle, page: u32) -> Result<Vec<RawArticle>> {
        let logger = self.logger.clone().with_prefix(format!("[page {}]", page));
        let url = self.page_url(&handle.request, page)?;
        logger.debug(&format!("GET {}", url));

        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        let results = parse_results(&html);

        logger.info(&format!("Fetched {} results", results.len()));
        Ok(results)
    }
}

/// Extracts result cards from a news-tab result page.
pub fn parse_results(html: &str) -> Vec<RawArticle> {
    let document = Html::parse_document(html);
    document.select(&RESULT).map(parse_card).collect()
}

fn parse_card(card: ElementRef<'_>) -> RawArticle {
    RawArticle {
        title: utils::first_text(card, &TITLE),
        media: utils::first_text(card, &MEDIA),
        date: utils::first_text(card, &DATE),
        desc: utils::first_text(card, &DESC),
        link: card
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(resolve_link),
    }
}

/// Makes relative result links absolute and unwraps `/url?q=` redirects.
fn resolve_link(href: &str) -> String {
    let href = href.trim();
    if !href.starts_with('/') {
        return href.to_string();
    }

    let absolute = format!("{}{}", GOOGLE_ORIGIN, href);
    if href.starts_with("/url?") {
        if let Ok(parsed) = Url::parse(&absolute) {
            let target = parsed
                .query_pairs()
                .find(|(k, v)| k == "q" && (v.starts_with("http://") || v.starts_with("https://")))
                .map(|(_, v)| v.into_owned());
            if let Some(target) = target {
                return target;
            }
        }
    }
    absolute
}
