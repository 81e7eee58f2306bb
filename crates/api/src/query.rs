//! Query parameter types shared across handler modules.

use fwip_core::fwip::{ContentFilter, FwipFilter};
use fwip_core::types::DbId;
use serde::Deserialize;

/// `?service=` filter on title listings.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceParams {
    pub service: Option<DbId>,
}

/// `?service=&content=` on the FWIP pick endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FwipParams {
    pub service: Option<DbId>,
    #[serde(default)]
    pub content: ContentFilter,
}

/// `?user=` on the FWIP card buttons.
#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub user: DbId,
}

impl From<FwipParams> for FwipFilter {
    fn from(params: FwipParams) -> Self {
        FwipFilter {
            service_id: params.service,
            content: params.content,
        }
    }
}
