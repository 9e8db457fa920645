//! Driving port for warranty reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

use super::WarrantyPayload;

/// Request to fetch one warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWarrantyRequest {
    pub warranty_id: Uuid,
}

/// Response carrying one warranty snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWarrantyResponse {
    pub warranty: WarrantyPayload,
}

/// Request to list warranties, optionally filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWarrantiesRequest {
    pub customer_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

/// Response carrying matching warranties, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWarrantiesResponse {
    pub warranties: Vec<WarrantyPayload>,
}

/// Driving port for warranty read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarrantyQuery: Send + Sync {
    /// Fetch one warranty by id.
    async fn get_warranty(&self, request: GetWarrantyRequest) -> Result<GetWarrantyResponse, Error>;

    /// List warranties matching the filter, newest first.
    async fn list_warranties(
        &self,
        request: ListWarrantiesRequest,
    ) -> Result<ListWarrantiesResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWarrantyQuery;

#[async_trait]
impl WarrantyQuery for FixtureWarrantyQuery {
    async fn get_warranty(
        &self,
        request: GetWarrantyRequest,
    ) -> Result<GetWarrantyResponse, Error> {
        Err(Error::not_found(format!(
            "warranty {} not found",
            request.warranty_id
        )))
    }

    async fn list_warranties(
        &self,
        _request: ListWarrantiesRequest,
    ) -> Result<ListWarrantiesResponse, Error> {
        Ok(ListWarrantiesResponse {
            warranties: Vec::new(),
        })
    }
}
