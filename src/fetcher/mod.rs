use std::time::Duration;

use scraper::{Html, Selector};
use url::Url;

use crate::config::AppConfig;
use crate::listing::{extract_id, ListingRecord};

/// A search result row before its own page has been fetched
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub link: String,
    pub title: String,
}

pub struct PostFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl PostFetcher {
    /// Create a new fetcher scoped to one regional site. The client carries
    /// an explicit request timeout so a stalled fetch fails the run instead
    /// of hanging it.
    pub fn new(config: &AppConfig, location: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.get_timeout_secs()))
            .build()?;
        Ok(Self {
            client,
            base_url: format!("http://{location}.craigslist.org"),
        })
    }

    #[allow(dead_code)]
    fn with_base_url(&mut self, base_url: String) -> &mut Self {
        self.base_url = base_url;
        self
    }

    /// Build the search URL. Terms are percent-encoded individually and
    /// joined with a literal `+`, so `["lego", "10225"]` becomes
    /// `.../search/taa?query=lego+10225`.
    pub fn form_query(&self, terms: &[String], category: &str) -> String {
        let query = terms
            .iter()
            .map(|term| url::form_urlencoded::byte_serialize(term.as_bytes()).collect::<String>())
            .collect::<Vec<String>>()
            .join("+");
        format!("{base}/search/{category}?query={query}", base = self.base_url)
    }

    /// Run the search and pull each hit's own page into a ListingRecord:
    /// 1. Fetch the search result page for the query
    /// 2. Parse it into local search hits
    /// 3. Fetch and parse each hit's post page for title and description
    /// A post whose link yields no parseable id is skipped with a warning;
    /// a failed fetch aborts the whole run.
    pub async fn search(
        &self,
        terms: &[String],
        category: &str,
    ) -> Result<Vec<ListingRecord>, Box<dyn std::error::Error>> {
        let query_url = self.form_query(terms, category);
        let document = self.fetch_page(&query_url).await?;
        let hits = self.parse_search_results(&document);

        let mut posts = Vec::new();
        for hit in hits {
            let page = self.fetch_page(&hit.link).await?;
            match parse_post(&page, &hit.link) {
                Ok(mut post) => {
                    if post.title.is_empty() {
                        // some post pages have no <title>; the search row has one
                        post.title = hit.title.clone();
                    }
                    posts.push(post);
                }
                Err(e) => eprintln!("Skipping post {link}: {e}", link = hit.link),
            }
        }
        Ok(posts)
    }

    /// Parse a search result page. Post links are the `<a>` elements without
    /// a class attribute inside `<p class="row">` rows. Local posts carry a
    /// relative href like `/tag/4460564352.html`; an absolute href points at
    /// a nearby region's site and is excluded.
    pub fn parse_search_results(&self, document: &str) -> Vec<SearchHit> {
        let html = Html::parse_document(document);
        let row_links = Selector::parse("p.row a").unwrap();

        let mut hits = Vec::new();
        for link in html.select(&row_links) {
            if link.value().attr("class").is_some() {
                continue;
            }
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if Url::parse(href).is_ok() {
                // absolute URL: a cross-region "nearby" result
                continue;
            }
            let title = link.text().collect::<String>().trim().to_string();
            hits.push(SearchHit {
                link: format!("{base}{href}", base = self.base_url),
                title,
            });
        }
        hits
    }

    async fn fetch_page(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// Parse an individual post page into a ListingRecord. The id comes from the
/// post URL, the title from the page `<title>`, the description from the
/// description meta tag (empty when the page has none).
pub fn parse_post(document: &str, url: &str) -> Result<ListingRecord, std::io::Error> {
    let id = extract_id(url)?;
    let html = Html::parse_document(document);
    let title_selector = Selector::parse("title").unwrap();
    let description_selector = Selector::parse("meta[name=\"description\"]").unwrap();

    let title = html
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let description = html
        .select(&description_selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    Ok(ListingRecord {
        id,
        title,
        description,
        link: url.to_string(),
    })
}
