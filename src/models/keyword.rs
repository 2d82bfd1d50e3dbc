//! Diesel models for keywords.

use diesel::prelude::*;

use crate::domain::keyword::{Keyword as DomainKeyword, NewKeyword as DomainNewKeyword};
use crate::domain::types::TypeConstraintError;
use crate::models::ad_group::AdGroup;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(AdGroup, foreign_key = ad_group_id))]
#[diesel(table_name = crate::schema::keywords)]
/// Diesel model for [`crate::domain::keyword::Keyword`].
pub struct Keyword {
    pub id: i32,
    pub ad_group_id: i32,
    pub remote_id: i64,
    pub text: String,
    pub match_type: String,
    pub status: String,
    pub bid_micros: i64,
    pub quality_score: Option<i32>,
    pub search_impression_share: Option<f64>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::keywords)]
/// Insertable form of [`Keyword`].
pub struct NewKeyword<'a> {
    pub ad_group_id: i32,
    pub remote_id: i64,
    pub text: &'a str,
    pub match_type: &'a str,
    pub status: &'a str,
    pub bid_micros: i64,
    pub quality_score: Option<i32>,
    pub search_impression_share: Option<f64>,
}

impl<'a> NewKeyword<'a> {
    /// Binds a domain payload to its parent ad group row.
    pub fn from_domain(ad_group_id: i32, keyword: &'a DomainNewKeyword) -> Self {
        Self {
            ad_group_id,
            remote_id: keyword.remote_id,
            text: &keyword.text,
            match_type: keyword.match_type.as_str(),
            status: keyword.status.as_str(),
            bid_micros: keyword.bid_micros,
            quality_score: keyword.quality_score,
            search_impression_share: keyword.search_impression_share,
        }
    }
}

impl TryFrom<Keyword> for DomainKeyword {
    type Error = TypeConstraintError;

    fn try_from(keyword: Keyword) -> Result<Self, Self::Error> {
        Ok(Self {
            id: keyword.id,
            ad_group_id: keyword.ad_group_id,
            remote_id: keyword.remote_id,
            text: keyword.text,
            match_type: keyword.match_type.parse()?,
            status: keyword.status.parse()?,
            bid_micros: keyword.bid_micros,
            quality_score: keyword.quality_score,
            search_impression_share: keyword.search_impression_share,
        })
    }
}
