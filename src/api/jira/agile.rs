//
//  atlassian-cloud
//  api/jira/agile.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira Software boards and sprints (`rest/agile/1.0/`).

use super::{JiraApi, VALUES};
use crate::api::client::Call;
use crate::api::common::{OffsetPagination, Paginator, Params};
use crate::api::transport::Transport;

const AGILE: &str = "agile";

impl<T: Transport> JiraApi<T> {
    /// Lists boards, optionally filtered by name.
    pub fn boards(
        &self,
        name: Option<&str>,
        start_at: Option<u64>,
        max_results: Option<u64>,
    ) -> Paginator<'_, T, OffsetPagination> {
        let call = Call::get("board")
            .version(AGILE)
            .params(
                Params::new()
                    .with("name", name)
                    .with("startAt", start_at)
                    .with("maxResults", max_results),
            );
        self.connector.paginate_offset(call, VALUES)
    }

    /// Lists the sprints of a board.
    ///
    /// # Parameters
    ///
    /// * `board_id` - Numeric id of the board
    /// * `state` - Comma-separated list of `future`, `active` and `closed`
    /// * `start_at` - Offset of the first sprint
    /// * `max_results` - Page size, also the cap on the number of sprints
    ///
    /// # Returns
    ///
    /// A [`Paginator`] over the `values` array of each page.
    pub fn board_sprints(
        &self,
        board_id: &str,
        state: Option<&str>,
        start_at: Option<u64>,
        max_results: Option<u64>,
    ) -> Paginator<'_, T, OffsetPagination> {
        let call = Call::get(format!("board/{}/sprint", board_id))
            .version(AGILE)
            .params(
                Params::new()
                    .with("state", state)
                    .with("startAt", start_at)
                    .with("maxResults", max_results),
            );
        self.connector.paginate_offset(call, VALUES)
    }
}
