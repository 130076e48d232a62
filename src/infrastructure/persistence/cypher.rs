//! Cypher templates for [`Statement`]s.
//!
//! Every statement is rendered to a query text plus named parameters; request
//! input only ever travels through parameters.

use neo4rs::{BoltNull, BoltType, Query};

use crate::domain::entities::LinkFilter;
use crate::domain::repositories::Statement;

/// Columns every reading statement returns for one `AffiliateLink` node `a`.
///
/// `createdAt` is rendered as an ISO-8601 string so rows decode without
/// depending on the driver's temporal types.
const LINK_PROJECTION: &str = "RETURN a.affiliateUrl AS affiliateUrl, \
a.sharedUrl AS sharedUrl, \
a.merchant AS merchant, \
a.tags AS tags, \
a.comment AS comment, \
toString(a.createdAt) AS createdAt";

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Text(String),
    List(Vec<String>),
}

impl From<Option<String>> for Param {
    fn from(value: Option<String>) -> Self {
        value.map_or(Param::Null, Param::Text)
    }
}

impl From<Option<Vec<String>>> for Param {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map_or(Param::Null, Param::List)
    }
}

impl From<Param> for BoltType {
    fn from(param: Param) -> Self {
        match param {
            Param::Null => BoltType::Null(BoltNull),
            Param::Text(text) => text.into(),
            Param::List(items) => items.into(),
        }
    }
}

/// Query text with its parameters, before handing it to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    pub text: String,
    pub params: Vec<(&'static str, Param)>,
}

impl CypherQuery {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    fn param(mut self, name: &'static str, value: impl Into<Param>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Returns true if this statement produces link rows.
    pub fn returns_links(&self) -> bool {
        self.text.contains(LINK_PROJECTION)
    }
}

impl From<CypherQuery> for Query {
    fn from(cypher: CypherQuery) -> Self {
        cypher
            .params
            .into_iter()
            .fold(neo4rs::query(&cypher.text), |query, (name, value)| {
                query.param(name, BoltType::from(value))
            })
    }
}

/// Renders a statement to Cypher.
pub fn render(statement: Statement) -> CypherQuery {
    match statement {
        Statement::FindConflicting {
            affiliate_url,
            tags,
        } => CypherQuery::new(format!(
            "MATCH (a:AffiliateLink) \
             WHERE a.affiliateUrl = $affiliateUrl OR all(tag IN $tags WHERE tag IN a.tags) \
             {LINK_PROJECTION}"
        ))
        .param("affiliateUrl", affiliate_url)
        .param("tags", tags),

        Statement::Create(new_link) => CypherQuery::new(format!(
            "CREATE (a:AffiliateLink {{ \
             sharedUrl: $sharedUrl, \
             affiliateUrl: $affiliateUrl, \
             merchant: $merchant, \
             tags: $tags, \
             comment: $comment, \
             createdAt: datetime() \
             }}) \
             {LINK_PROJECTION}"
        ))
        .param("sharedUrl", new_link.shared_url)
        .param("affiliateUrl", new_link.affiliate_url)
        .param("merchant", Param::Text(new_link.merchant))
        .param("tags", new_link.tags)
        .param("comment", new_link.comment),

        Statement::List(filter) => render_list(filter),

        Statement::ListByMerchant { merchant } => CypherQuery::new(format!(
            "MATCH (a:AffiliateLink) WHERE a.merchant = $merchant {LINK_PROJECTION}"
        ))
        .param("merchant", Param::Text(merchant)),

        Statement::DeleteByAffiliateUrl { affiliate_url } => {
            CypherQuery::new("MATCH (a:AffiliateLink {affiliateUrl: $affiliateUrl}) DELETE a")
                .param("affiliateUrl", Param::Text(affiliate_url))
        }
    }
}

fn render_list(filter: LinkFilter) -> CypherQuery {
    let mut text = String::from("MATCH (a:AffiliateLink)");
    let tags = (!filter.is_empty()).then_some(filter.tags);

    if tags.is_some() {
        text.push_str(" WHERE any(tag IN a.tags WHERE tag IN $tags)");
    }

    text.push(' ');
    text.push_str(LINK_PROJECTION);
    text.push_str(" ORDER BY a.createdAt DESC");

    match tags {
        Some(tags) => CypherQuery::new(text).param("tags", Param::List(tags)),
        None => CypherQuery::new(text),
    }
}
