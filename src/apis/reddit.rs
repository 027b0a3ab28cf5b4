use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{PostSource, RatingsPost};
use crate::config::SecretConfig;
use crate::error::Result;

/// User agent format recommended by the reddit API docs:
/// `<platform>:<app ID>:<version string> (by /u/<reddit username>)`
const REDDIT_USER_AGENT: &str = "lambda:toonamiratings:v1.0 (by /u/toonamiratings)";

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const SEARCH_URL: &str = "https://oauth.reddit.com/r/toonami/search.json";

#[derive(Debug, Deserialize)]
struct OauthToken {
    access_token: String,
}

// Just the slice of the search listing payload the pipeline reads.
#[derive(Debug, Deserialize)]
struct SearchListing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    dist: u32,
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: String,
    /// The post's fullname, reddit's unique id used as a paging cursor.
    name: String,
    #[serde(default)]
    selftext_html: Option<String>,
}

/// Post source backed by the reddit search API, restricted to news-flair
/// posts on r/toonami, newest first.
pub struct RedditPostSource {
    http: Client,
    access_token: String,
}

impl RedditPostSource {
    /// Exchanges the client credentials for an application-only OAuth
    /// token. grant_type=client_credentials means no user sign-in.
    pub async fn connect(secrets: &SecretConfig) -> Result<Self> {
        let http = Client::new();

        let token: OauthToken = http
            .post(TOKEN_URL)
            .basic_auth(
                &secrets.reddit_client_id,
                Some(&secrets.reddit_client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .header("user-agent", REDDIT_USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info!("RedditPostSource: acquired oauth token");
        Ok(Self {
            http,
            access_token: token.access_token,
        })
    }
}

#[async_trait]
impl PostSource for RedditPostSource {
    async fn fetch_posts(&self, limit: u32, after: Option<&str>) -> Result<Vec<RatingsPost>> {
        // raw_json=1 keeps &lt; &gt; &amp; unescaped in selftext_html
        let mut query: Vec<(&str, String)> = vec![
            ("raw_json", "1".to_string()),
            ("q", "flair:news".to_string()),
            ("limit", limit.to_string()),
            ("sort", "new".to_string()),
            ("restrict_sr", "on".to_string()),
            ("t", "all".to_string()),
        ];
        if let Some(fullname) = after {
            query.push(("after", fullname.to_string()));
        }

        let listing: SearchListing = self
            .http
            .get(SEARCH_URL)
            .query(&query)
            .header("user-agent", REDDIT_USER_AGENT)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("RedditPostSource: fetched {} posts", listing.data.dist);

        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| RatingsPost {
                title: child.data.title,
                body_html: child.data.selftext_html.unwrap_or_default(),
                fullname: child.data.name,
            })
            .collect();
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_payload_deserializes() {
        let payload = serde_json::json!({
            "data": {
                "dist": 1,
                "children": [{
                    "data": {
                        "title": "Toonami Ratings for November 2nd, 2019",
                        "name": "t3_abc123",
                        "selftext_html": "<table></table>"
                    }
                }]
            }
        });

        let listing: SearchListing = serde_json::from_value(payload).unwrap();
        assert_eq!(listing.data.dist, 1);
        assert_eq!(listing.data.children[0].data.name, "t3_abc123");
    }

    #[test]
    fn missing_body_html_defaults_to_empty() {
        let payload = serde_json::json!({
            "data": {
                "dist": 1,
                "children": [{
                    "data": { "title": "a link post", "name": "t3_def456" }
                }]
            }
        });

        let listing: SearchListing = serde_json::from_value(payload).unwrap();
        assert!(listing.data.children[0].data.selftext_html.is_none());
    }
}
