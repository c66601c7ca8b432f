//! Service listing API client

use platform_api::models::ServiceListEntry;

use crate::errors::ToolkitError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Fetch one page of services filtered by name
    pub async fn list_services_page(
        &self,
        name: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ServiceListEntry>, ToolkitError> {
        let mut query = vec![("name", name.to_string()), ("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        self.get("/services", &query).await
    }
}
