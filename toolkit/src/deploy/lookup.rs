//! Remote service lookup

use platform_api::models::Service;
use tracing::debug;

use crate::deploy::platform::ServicePlatform;
use crate::errors::ToolkitError;

/// Services requested per listing page
pub const PAGE_SIZE: usize = 20;

/// Walk the paginated service listing until a service named exactly `name` shows up
pub async fn find_service<P>(platform: &P, name: &str) -> Result<Option<Service>, ToolkitError>
where
    P: ServicePlatform + ?Sized,
{
    let mut cursor: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        page_number += 1;
        let page = platform
            .list_services(name, cursor.as_deref(), PAGE_SIZE)
            .await?;
        debug!("Service listing page {} has {} entries", page_number, page.len());

        let next_cursor = page.last().map(|entry| entry.cursor.clone());
        let page_len = page.len();

        if let Some(entry) = page.into_iter().find(|entry| entry.service.name == name) {
            return Ok(Some(entry.service));
        }

        match next_cursor {
            Some(next) if page_len >= PAGE_SIZE && cursor.as_deref() != Some(next.as_str()) => {
                cursor = Some(next);
            }
            _ => return Ok(None),
        }
    }
}
