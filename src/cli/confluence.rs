//
//  atlassian-cloud
//  cli/confluence.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Confluence commands

use std::fs;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde_json::json;

use super::{found, CliError, GlobalOptions};
use crate::api::confluence::{
    BodyFormat, ConfluenceApi, LabelRef, NewPage, PageBody, PageFetch, PageMove, PageQuery, PageUpdate,
    PageVersion, SortOrder,
};
use crate::api::Payload;
use crate::output::{Column, OutputFormat};

const PAGE_COLUMNS: &[Column] = &[
    Column::new("ID", "/id"),
    Column::new("Title", "/title"),
    Column::new("Status", "/status"),
    Column::new("Version", "/version/number"),
    Column::new("Parent", "/parentId"),
];

const SPACE_COLUMNS: &[Column] = &[
    Column::new("ID", "/id"),
    Column::new("Key", "/key"),
    Column::new("Name", "/name"),
    Column::new("Type", "/type"),
    Column::new("Status", "/status"),
];

const MOVE_COLUMNS: &[Column] = &[
    Column::new("Page", "/pageTitle"),
    Column::new("Position", "/position"),
    Column::new("Target", "/targetTitle"),
    Column::new("Moved", "/moved"),
];

const DESCENDANT_COLUMNS: &[Column] = &[
    Column::new("Type", "/type"),
    Column::new("ID", "/id"),
    Column::new("Title", "/title"),
];

/// Body representation on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    #[default]
    Storage,
    Adf,
}

impl From<FormatArg> for BodyFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Storage => BodyFormat::Storage,
            FormatArg::Adf => BodyFormat::AtlasDocFormat,
        }
    }
}

/// Work with Confluence
#[derive(Args, Debug)]
pub struct ConfluenceCommand {
    #[command(subcommand)]
    pub command: ConfluenceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfluenceSubcommand {
    /// List pages, optionally by title, status or label
    Pages(PagesArgs),

    /// List the direct children of a page
    Children(ChildrenArgs),

    /// Show a page
    Page(PageArgs),

    /// Create a page
    Create(CreateArgs),

    /// Update a page's title or body
    Update(UpdateArgs),

    /// Sort the children of a page by title
    Sort(SortArgs),

    /// List the descendants of a page
    Descendants(DescendantsArgs),

    /// Show a label and the content carrying it
    Label(LabelArgs),

    /// List spaces
    Spaces(SpacesArgs),
}

#[derive(Args, Debug)]
pub struct PagesArgs {
    /// Exact page title
    #[arg(long)]
    pub title: Option<String>,

    /// current, archived, deleted or trashed
    #[arg(long)]
    pub status: Option<String>,

    /// Only pages carrying this label
    #[arg(long, conflicts_with_all = ["title", "status"])]
    pub label: Option<String>,

    /// Treat --label as a label ID
    #[arg(long, requires = "label")]
    pub label_id: bool,

    /// id, title, created-date or modified-date, prefix with - to reverse
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of pages
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ChildrenArgs {
    /// Parent page ID
    pub id: String,

    /// Sort field, e.g. title or -modified-date
    #[arg(long)]
    pub sort: Option<String>,

    /// Maximum number of children
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page ID
    pub id: String,

    /// Body representation
    #[arg(long, value_enum, default_value = "storage")]
    pub format: FormatArg,

    /// Historical version number
    #[arg(long = "page-version", id = "page_version")]
    pub version: Option<u64>,

    /// Print only the page body
    #[arg(long)]
    pub body: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Space ID
    #[arg(long)]
    pub space_id: String,

    /// Page title
    #[arg(long)]
    pub title: String,

    /// Parent page ID
    #[arg(long)]
    pub parent: Option<String>,

    /// File with the body in storage format
    #[arg(long)]
    pub body_file: Option<String>,

    /// Keep the page as a draft
    #[arg(long)]
    pub draft: bool,

    /// Visible only to you
    #[arg(long)]
    pub private: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Page ID
    pub id: String,

    /// New title (default: keep the current one)
    #[arg(long)]
    pub title: Option<String>,

    /// File with the new body in storage format
    #[arg(long)]
    pub body_file: Option<String>,

    /// Version message
    #[arg(long, short = 'm')]
    pub message: Option<String>,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Parent page ID
    pub id: String,

    /// Reverse alphabetical order
    #[arg(long)]
    pub desc: bool,

    /// Sort every level below the parent too
    #[arg(long, short = 'r')]
    pub recursive: bool,
}

#[derive(Args, Debug)]
pub struct DescendantsArgs {
    /// Page ID
    pub id: String,

    /// Groups to include: page, comment, attachment
    #[arg(long, value_delimiter = ',', default_value = "page")]
    pub expand: Vec<String>,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Label name
    pub name: String,

    /// page, blogpost, attachment or page_template
    #[arg(long = "type")]
    pub content_type: Option<String>,

    /// Maximum number of content items
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SpacesArgs {
    /// Space key (repeatable)
    #[arg(long = "key", short = 'k', action = clap::ArgAction::Append)]
    pub keys: Vec<String>,

    /// Maximum number of spaces
    #[arg(long, short = 'L')]
    pub limit: Option<u64>,
}

impl ConfluenceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = global.session()?;
        let confluence = session.confluence()?;
        let output = global.output();

        match &self.command {
            ConfluenceSubcommand::Pages(args) => {
                let pages = list_pages(&confluence, args).await?;
                output.write_items(&pages, PAGE_COLUMNS)
            }
            ConfluenceSubcommand::Children(args) => {
                let children = confluence
                    .page_children(&args.id, args.sort.as_deref(), args.limit, false)
                    .collect_all()
                    .await?;
                output.write_items(&children, PAGE_COLUMNS)
            }
            ConfluenceSubcommand::Page(args) => {
                let fetch = PageFetch {
                    version: args.version,
                    body_format: args.format.into(),
                    ..Default::default()
                };
                let page = found(
                    confluence.page(&args.id, &fetch).await?,
                    format_args!("Page {}", args.id),
                )?;
                if args.body {
                    println!("{}", body_text(&page, fetch.body_format));
                    Ok(())
                } else {
                    output.write_payload(&page)
                }
            }
            ConfluenceSubcommand::Create(args) => {
                let page = NewPage {
                    title: Some(args.title.clone()),
                    parent_id: args.parent.clone(),
                    body: read_body(args.body_file.as_deref())?,
                    status: if args.draft { "draft" } else { "current" }.to_string(),
                    private: args.private,
                    ..NewPage::in_space(&args.space_id)
                };
                let created = found(confluence.create_page(&page).await?, "Created page")?;
                output.write_payload(&created)
            }
            ConfluenceSubcommand::Update(args) => {
                let title = match &args.title {
                    Some(title) => title.clone(),
                    None => {
                        let current = found(
                            confluence.page(&args.id, &PageFetch::default()).await?,
                            format_args!("Page {}", args.id),
                        )?;
                        current.str_field("title").unwrap_or_default().to_string()
                    }
                };
                let update = PageUpdate {
                    title,
                    body: read_body(args.body_file.as_deref())?,
                    version: None,
                    ..Default::default()
                };
                let update = match &args.message {
                    Some(message) => with_message(&confluence, &args.id, update, message).await?,
                    None => update,
                };
                let updated = found(
                    confluence.update_page(&args.id, &update).await?,
                    format_args!("Page {}", args.id),
                )?;
                output.write_payload(&updated)
            }
            ConfluenceSubcommand::Sort(args) => {
                let order = if args.desc { SortOrder::Desc } else { SortOrder::Asc };
                let moves = confluence.sort_pages(&args.id, &order, args.recursive).await?;
                let rows: Vec<Payload> = moves.iter().map(move_row).collect();
                output.write_items(&rows, MOVE_COLUMNS)
            }
            ConfluenceSubcommand::Descendants(args) => {
                let expand: Vec<&str> = args.expand.iter().map(String::as_str).collect();
                let descendants = found(
                    confluence.content_descendants(&args.id, &expand).await?,
                    format_args!("Descendants of {}", args.id),
                )?;
                match output.format() {
                    OutputFormat::Json => output.write_payload(&descendants),
                    OutputFormat::Table => output.write_items(&flatten_descendants(&descendants), DESCENDANT_COLUMNS),
                }
            }
            ConfluenceSubcommand::Label(args) => {
                let label = confluence
                    .label_information(&args.name, args.content_type.as_deref(), None, args.limit)
                    .await?;
                output.write_payload(&found(label, format_args!("Label {}", args.name))?)
            }
            ConfluenceSubcommand::Spaces(args) => {
                let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
                let spaces = confluence.spaces(&keys, args.limit).collect_all().await?;
                output.write_items(&spaces, SPACE_COLUMNS)
            }
        }
    }
}

async fn list_pages(confluence: &ConfluenceApi, args: &PagesArgs) -> Result<Vec<Payload>> {
    if let Some(label) = &args.label {
        let label_ref = if args.label_id {
            LabelRef::Id(label.clone())
        } else {
            LabelRef::Name(label.clone())
        };
        let pages = confluence
            .label_pages(&label_ref, BodyFormat::Storage, args.limit, args.sort.as_deref(), false)
            .await?
            .ok_or_else(|| CliError::NotFound(format!("Label {} not found", label)))?;
        return Ok(pages.collect_all().await?);
    }

    let query = PageQuery {
        title: args.title.clone(),
        status: args.status.clone(),
        limit: args.limit,
        sort: args.sort.clone(),
        ..Default::default()
    };
    Ok(confluence.pages(&query)?.collect_all().await?)
}

/// Sends an explicit version so the message is kept.
async fn with_message(
    confluence: &ConfluenceApi,
    id: &str,
    update: PageUpdate,
    message: &str,
) -> Result<PageUpdate> {
    let current = found(
        confluence.page(id, &PageFetch::default()).await?,
        format_args!("Page {}", id),
    )?;
    let number = current
        .u64_at("/version/number")
        .with_context(|| format!("Page {} has no version number", id))?;
    Ok(PageUpdate {
        version: Some(PageVersion {
            number: number + 1,
            message: message.to_string(),
            minor_edit: false,
        }),
        ..update
    })
}

fn read_body(path: Option<&str>) -> Result<Option<PageBody>> {
    path.map(|path| {
        fs::read_to_string(path)
            .map(PageBody::Storage)
            .with_context(|| format!("Failed to read {}", path))
    })
    .transpose()
}

fn body_text(page: &Payload, format: BodyFormat) -> String {
    page.str_at(&format!("/body/{}/value", format.as_str()))
        .unwrap_or_default()
        .to_string()
}

fn move_row(step: &PageMove) -> Payload {
    Payload::new(json!({
        "pageId": step.page_id,
        "pageTitle": step.page_title,
        "position": step.position,
        "targetId": step.target_id,
        "targetTitle": step.target_title,
        "moved": step.result.is_some(),
    }))
}

/// One row per descendant, tagged with its group (`page`, `comment`, ...).
fn flatten_descendants(descendants: &Payload) -> Vec<Payload> {
    let Some(groups) = descendants.as_value().as_object() else {
        return Vec::new();
    };
    groups
        .iter()
        .filter_map(|(group, listing)| Some((group, listing.get("results")?.as_array()?)))
        .flat_map(|(group, results)| {
            results.iter().map(move |item| {
                Payload::new(json!({
                    "type": group,
                    "id": item.get("id"),
                    "title": item.get("title"),
                }))
            })
        })
        .collect()
}
