//! List Repository
//!
//! Item CRUD and list-title endpoints. Every call carries the session's
//! bearer token; a 401 from any of them is reported as
//! [`RepoError::Unauthorized`].

use crate::error::{RepoError, RepoResult};
use crate::models::{Item, ItemId, ListTitleBody, NewItem, Profile};
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Debug, Clone)]
pub struct ListRepository<T> {
    transport: T,
}

impl<T: Transport> ListRepository<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// All items, in server order
    pub async fn fetch_items(&self, token: &str) -> RepoResult<Vec<Item>> {
        let response = self.call(ApiRequest::get("/api/items").bearer(token)).await?;
        Ok(response.json()?)
    }

    /// Created record with its server-assigned id
    pub async fn create_item(&self, token: &str, item: &NewItem) -> RepoResult<Item> {
        let request = ApiRequest::post("/api/items").bearer(token).json(item)?;
        let response = self.call(request).await?;
        Ok(response.json()?)
    }

    /// Full-record replace. Fields changed concurrently elsewhere are
    /// overwritten by whatever `item` carries.
    pub async fn update_item(&self, token: &str, item: &Item) -> RepoResult<()> {
        let request = ApiRequest::put(format!("/api/items/{}", item.id))
            .bearer(token)
            .json(item)?;
        self.call(request).await?;
        Ok(())
    }

    pub async fn delete_item(&self, token: &str, id: ItemId) -> RepoResult<()> {
        let request = ApiRequest::delete(format!("/api/items/{}", id)).bearer(token);
        self.call(request).await?;
        Ok(())
    }

    pub async fn fetch_profile(&self, token: &str) -> RepoResult<Profile> {
        let response = self.call(ApiRequest::get("/api/user/profile").bearer(token)).await?;
        Ok(response.json()?)
    }

    pub async fn rename_list(&self, token: &str, title: &str) -> RepoResult<()> {
        let request = ApiRequest::put("/api/user/list-title")
            .bearer(token)
            .json(&ListTitleBody { list_title: title })?;
        self.call(request).await?;
        Ok(())
    }

    async fn call(&self, request: ApiRequest) -> RepoResult<ApiResponse> {
        let response = self.transport.send(request).await?;
        check_status(response)
    }
}

fn check_status(response: ApiResponse) -> RepoResult<ApiResponse> {
    match response.status {
        401 => Err(RepoError::Unauthorized),
        _ if response.is_success() => Ok(response),
        _ => Err(RepoError::Api(response.into_status_error())),
    }
}
