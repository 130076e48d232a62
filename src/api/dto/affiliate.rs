//! DTOs for affiliate link endpoints.

use serde::Deserialize;

use crate::domain::entities::{CreateAffiliateLink, LinkFilter};

/// Request body for `POST /api/affiliates`.
///
/// Every field is optional; missing values are forwarded to the store as null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAffiliateLinkRequest {
    pub affiliate_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl From<CreateAffiliateLinkRequest> for CreateAffiliateLink {
    fn from(request: CreateAffiliateLinkRequest) -> Self {
        Self {
            affiliate_url: request.affiliate_url,
            tags: request.tags,
            comment: request.comment,
        }
    }
}

/// Reads the tag filter from a raw query string.
///
/// Accepts every common array encoding: `tags=a&tags=b`, `tags[]=a` and
/// `tags[0]=a`. Other keys and empty values are ignored, so `?tags=` lists
/// every link.
pub fn parse_tag_filter(query: Option<&str>) -> LinkFilter {
    let Some(query) = query else {
        return LinkFilter::default();
    };

    let tags = url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, value)| is_tags_key(key) && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .collect();

    LinkFilter::by_tags(tags)
}

fn is_tags_key(key: &str) -> bool {
    let Some(rest) = key.strip_prefix("tags") else {
        return false;
    };

    if rest.is_empty() || rest == "[]" {
        return true;
    }

    rest.strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}
