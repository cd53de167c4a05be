//
//  atlassian-cloud
//  cli/jira.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{as_items, found, GlobalOptions};
use crate::api::jira::{DashboardSearch, FilterSearch, GroupRef};
use crate::output::Column;

const USER_COLUMNS: &[Column] = &[
    Column::new("Account ID", "/accountId"),
    Column::new("Name", "/displayName"),
    Column::new("E-mail", "/emailAddress"),
    Column::new("Active", "/active"),
];

const FILTER_COLUMNS: &[Column] = &[
    Column::new("ID", "/id"),
    Column::new("Name", "/name"),
    Column::new("Owner", "/owner/displayName"),
    Column::new("JQL", "/jql"),
];

const DASHBOARD_COLUMNS: &[Column] = &[
    Column::new("ID", "/id"),
    Column::new("Name", "/name"),
    Column::new("Owner", "/owner/displayName"),
    Column::new("Favourite", "/isFavourite"),
];

const BOARD_COLUMNS: &[Column] = &[
    Column::new("ID", "/id"),
    Column::new("Name", "/name"),
    Column::new("Type", "/type"),
    Column::new("Project", "/location/projectKey"),
];

const SPRINT_COLUMNS: &[Column] = &[
    Column::new("ID", "/id"),
    Column::new("Name", "/name"),
    Column::new("State", "/state"),
    Column::new("Start", "/startDate"),
    Column::new("End", "/endDate"),
];

/// Work with Jira
#[derive(Args, Debug)]
pub struct JiraCommand {
    #[command(subcommand)]
    pub command: JiraSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum JiraSubcommand {
    /// Show a user
    User(UserArgs),

    /// List or search filters
    Filters(FiltersArgs),

    /// List or search dashboards
    Dashboards(DashboardsArgs),

    /// List the members of a group
    #[command(name = "group-members")]
    GroupMembers(GroupMembersArgs),

    /// List boards
    Boards(BoardsArgs),

    /// List the sprints of a board
    Sprints(SprintsArgs),
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// Account ID
    pub account_id: String,

    /// Comma-separated list of groups, applicationRoles
    #[arg(long)]
    pub expand: Option<String>,
}

#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Only filters owned by you
    #[arg(long, conflicts_with_all = ["name", "owner"])]
    pub mine: bool,

    /// Filter name contains
    #[arg(long)]
    pub name: Option<String>,

    /// Owner account ID
    #[arg(long)]
    pub owner: Option<String>,

    /// Maximum number of filters
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct DashboardsArgs {
    /// Only "my" or "favourite" dashboards
    #[arg(long, value_parser = ["my", "favourite"], conflicts_with = "name")]
    pub filter: Option<String>,

    /// Dashboard name contains
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum number of dashboards
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct GroupMembersArgs {
    /// Group name (or ID with --id)
    pub group: String,

    /// Treat GROUP as a group ID
    #[arg(long)]
    pub id: bool,

    /// Include inactive users
    #[arg(long)]
    pub include_inactive: bool,

    /// Maximum number of members
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct BoardsArgs {
    /// Board name contains
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum number of boards
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SprintsArgs {
    /// Board ID
    pub board_id: String,

    /// Comma-separated list of future, active, closed
    #[arg(long)]
    pub state: Option<String>,

    /// Maximum number of sprints
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

impl JiraCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = global.session()?;
        let jira = session.jira()?;
        let output = global.output();

        match &self.command {
            JiraSubcommand::User(args) => {
                let user = jira.user(&args.account_id, args.expand.as_deref()).await?;
                output.write_payload(&found(user, format_args!("User {}", args.account_id))?)
            }
            JiraSubcommand::Filters(args) => {
                let filters = if args.mine {
                    as_items(found(jira.my_filters(None, false).await?, "Your filters")?)
                } else {
                    let search = FilterSearch {
                        filter_name: args.name.clone(),
                        account_id: args.owner.clone(),
                        expand: Some("owner,jql".to_string()),
                        max_results: args.limit,
                        ..Default::default()
                    };
                    jira.search_filters(&search)?.collect_all().await?
                };
                output.write_items(&filters, FILTER_COLUMNS)
            }
            JiraSubcommand::Dashboards(args) => {
                let dashboards = match &args.name {
                    Some(name) => {
                        let search = DashboardSearch {
                            dashboard_name: Some(name.clone()),
                            expand: Some("owner,isFavourite".to_string()),
                            max_results: args.limit,
                            ..Default::default()
                        };
                        jira.search_dashboards(&search)?.collect_all().await?
                    }
                    None => {
                        jira.dashboards(args.filter.as_deref(), None, args.limit)
                            .collect_all()
                            .await?
                    }
                };
                output.write_items(&dashboards, DASHBOARD_COLUMNS)
            }
            JiraSubcommand::GroupMembers(args) => {
                let group = if args.id {
                    GroupRef::id(&args.group)
                } else {
                    GroupRef::name(&args.group)
                };
                let members = jira
                    .group_members(&group, args.include_inactive, None, args.limit)?
                    .collect_all()
                    .await?;
                output.write_items(&members, USER_COLUMNS)
            }
            JiraSubcommand::Boards(args) => {
                let boards = jira
                    .boards(args.name.as_deref(), None, args.limit)
                    .collect_all()
                    .await?;
                output.write_items(&boards, BOARD_COLUMNS)
            }
            JiraSubcommand::Sprints(args) => {
                let sprints = jira
                    .board_sprints(&args.board_id, args.state.as_deref(), None, args.limit)
                    .collect_all()
                    .await?;
                output.write_items(&sprints, SPRINT_COLUMNS)
            }
        }
    }
}
