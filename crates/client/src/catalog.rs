//! Product catalog endpoints beyond plain CRUD.

use backoffice_core::models::product::{
    AvailableStoresResponse, CreatePromoterAssignmentRequest, Price, ProductStoresWithPromotersResponse,
    PromoterAssignment, StorePromotersResponse, UpdatePromoterAssignmentRequest,
};
use backoffice_core::models::Products;
use backoffice_core::resource::Resource;
use backoffice_core::types::DbId;
use reqwest::header::ACCEPT;
use reqwest::Method;
use validator::Validate;

use crate::error::ClientError;
use crate::resource_client::ResourceClient;
use crate::transport::Unauthorized;

const PROMOTER_ASSIGNMENTS: &str = "product-management/promoter-assignments";

impl ResourceClient<Products> {
    pub async fn promoter_assignments(
        &self,
        product_id: &str,
    ) -> Result<Vec<PromoterAssignment>, ClientError> {
        let url = self.product_url(product_id, "promoter-assignments");
        self.transport()
            .send_json(self.transport().read(url), "fetch promoter assignments")
            .await
    }

    pub async fn create_promoter_assignment(
        &self,
        product_id: &str,
        data: &CreatePromoterAssignmentRequest,
    ) -> Result<PromoterAssignment, ClientError> {
        data.validate()?;
        let url = self.product_url(product_id, "promoter-assignments");
        let builder = self.transport().request(Method::POST, url).json(data);
        self.transport()
            .send_json(builder, "create promoter assignment")
            .await
    }

    pub async fn update_promoter_assignment(
        &self,
        assignment_id: DbId,
        data: &UpdatePromoterAssignmentRequest,
    ) -> Result<PromoterAssignment, ClientError> {
        data.validate()?;
        let url = self
            .transport()
            .item_url(PROMOTER_ASSIGNMENTS, &assignment_id.to_string());
        let builder = self.transport().request(Method::PUT, url).json(data);
        self.transport()
            .send_json(builder, "update promoter assignment")
            .await
    }

    pub async fn delete_promoter_assignment(&self, assignment_id: DbId) -> Result<(), ClientError> {
        let url = self
            .transport()
            .item_url(PROMOTER_ASSIGNMENTS, &assignment_id.to_string());
        let builder = self
            .transport()
            .request(Method::DELETE, url)
            .header(ACCEPT, "*/*");
        self.transport()
            .send(builder, "delete promoter assignment", Unauthorized::ExpireSession)
            .await?;
        Ok(())
    }

    /// Prices for one product across all price lists.
    pub async fn product_prices(&self, product_id: &str) -> Result<Vec<Price>, ClientError> {
        let url = self.product_url(product_id, "prices");
        self.transport()
            .send_json(self.transport().read(url), "fetch product prices")
            .await
    }

    pub async fn stores_with_promoters(
        &self,
        product_id: &str,
    ) -> Result<ProductStoresWithPromotersResponse, ClientError> {
        let url = self.product_url(product_id, "stores-with-promoters");
        self.transport()
            .send_json(self.transport().read(url), "fetch product stores")
            .await
    }

    pub async fn store_promoters(&self, store_id: DbId) -> Result<StorePromotersResponse, ClientError> {
        let url = self
            .transport()
            .url(&format!("product-management/stores/{store_id}/promoters"));
        self.transport()
            .send_json(self.transport().read(url), "fetch store promoters")
            .await
    }

    pub async fn available_stores(&self) -> Result<AvailableStoresResponse, ClientError> {
        let url = self.transport().url("products/stores");
        self.transport()
            .send_json(self.transport().read(url), "fetch stores")
            .await
    }

    fn product_url(&self, product_id: &str, tail: &str) -> reqwest::Url {
        let mut url = self.transport().item_url(Products::PATH, product_id);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(tail);
        }
        url
    }
}
