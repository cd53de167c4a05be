//
//  atlassian-cloud
//  api/confluence/spaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use super::{ConfluenceApi, RESULTS};
use crate::api::client::Call;
use crate::api::common::{CursorPagination, Paginator, Params};
use crate::api::transport::Transport;

impl<T: Transport> ConfluenceApi<T> {
    /// Lists spaces, optionally restricted to the given keys.
    pub fn spaces(&self, keys: &[&str], limit: Option<u64>) -> Paginator<'_, T, CursorPagination> {
        let mut params = Params::new().with("limit", limit);
        if !keys.is_empty() {
            params.set("keys", keys.to_vec());
        }
        self.connector.paginate_cursor(Call::get("spaces").params(params), RESULTS)
    }
}
