//
//  atlassian-cloud
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one request through the same connector the other commands use, so
//! endpoint prefixes, authentication, null stripping and pagination all
//! apply. Useful for endpoints no other command covers.
//!
//! ## Examples
//!
//! ```bash
//! # Jira, default version (rest/api/3/)
//! atl api myself
//!
//! # Jira Software boards, every page
//! atl api board --api-version agile --paginate offset
//!
//! # Confluence v1 content move
//! atl api --api confluence --api-version 1 -X PUT content/123/move/after/456
//!
//! # Create a Jira group
//! atl api -X POST group -F name=reviewers --expect 201
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use reqwest::Method;
use serde_json::{Map, Value};

use super::GlobalOptions;
use crate::api::common::{OffsetPagination, Params};
use crate::api::{Call, Connector, Outcome};
use crate::output::{write_json, OutputWriter};

/// Which product API the path belongs to
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTarget {
    Jira,
    Confluence,
}

impl ApiTarget {
    fn results_key(&self) -> &'static str {
        match self {
            Self::Jira => "values",
            Self::Confluence => "results",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// startAt / maxResults / total (Jira)
    Offset,
    /// cursor links in _links.next (Confluence v2)
    Cursor,
}

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Path below the endpoint prefix (e.g. filter/search)
    pub path: String,

    /// Product API
    #[arg(long, value_enum, default_value = "jira")]
    pub api: ApiTarget,

    /// Endpoint version (3, 2 and agile for Jira; 2 and 1 for Confluence)
    #[arg(long)]
    pub api_version: Option<String>,

    /// HTTP method (GET, POST, PUT, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Query parameter (key=value, repeatable)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Body field (key=value, nested with dots, repeatable)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Read the JSON body from a file (- for stdin)
    #[arg(long, short = 'f', conflicts_with = "field")]
    pub input: Option<String>,

    /// Expected status code
    #[arg(long, default_value_t = 200)]
    pub expect: u16,

    /// Do not decode the response body
    #[arg(long)]
    pub no_body: bool,

    /// Retry while the site reports itself temporarily unavailable
    #[arg(long)]
    pub retry: bool,

    /// Follow pagination and print every item
    #[arg(long, value_enum)]
    pub paginate: Option<PaginationStyle>,

    /// Array holding the items (default: values for Jira, results for Confluence)
    #[arg(long)]
    pub results_key: Option<String>,

    /// Object holding the listing, for offset pagination
    #[arg(long, requires = "paginate")]
    pub subobject: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let session = global.session()?;
        let call = self.build_call()?;
        let output = global.output();

        match self.api {
            ApiTarget::Jira => self.send(session.jira()?.connector(), call, &output).await,
            ApiTarget::Confluence => {
                self.send(session.confluence()?.connector(), call, &output).await
            }
        }
    }

    fn build_call(&self) -> Result<Call> {
        let mut params = Params::new();
        for pair in &self.query {
            let (key, value) = parse_field(pair)?;
            let mut values = match params.remove(&key) {
                Some(Value::Array(existing)) => existing,
                Some(existing) => vec![existing],
                None => Vec::new(),
            };
            values.push(value);
            let value = if values.len() == 1 { values.remove(0) } else { Value::Array(values) };
            params.set(&key, value);
        }

        let mut call = Call::new(parse_method(&self.method)?, self.path.trim_start_matches('/'))
            .params(params)
            .expect(self.expect);
        if let Some(version) = &self.api_version {
            call = call.version(version.as_str());
        }
        if let Some(body) = self.build_body()? {
            call = call.json(body);
        }
        if self.no_body {
            call = call.no_body();
        }
        if self.retry {
            call = call.retrying();
        }
        Ok(call)
    }

    fn build_body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
            };
            let value = serde_json::from_str(&content).context("Request body is not valid JSON")?;
            return Ok(Some(value));
        }

        if self.field.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();
        for field in &self.field {
            let (key, value) = parse_field(field)?;
            set_nested_value(&mut body, &key, value);
        }
        Ok(Some(Value::Object(body)))
    }

    async fn send<T: crate::api::Transport>(
        &self,
        connector: &Connector<T>,
        call: Call,
        output: &OutputWriter,
    ) -> Result<()> {
        let results_key = self.results_key.as_deref().unwrap_or(self.api.results_key());

        match self.paginate {
            Some(PaginationStyle::Offset) => {
                let mut strategy = OffsetPagination::new(results_key);
                if let Some(subobject) = &self.subobject {
                    strategy = strategy.nested(subobject.as_str());
                }
                let items = connector.paginate(call, strategy).collect_all().await?;
                write_json(&items)
            }
            Some(PaginationStyle::Cursor) => {
                let items = connector.paginate_cursor(call, results_key).collect_all().await?;
                write_json(&items)
            }
            None => match connector.execute(&call).await? {
                Outcome::Decoded(payload) => write_json(&payload),
                Outcome::Accepted => {
                    output.write_success(&format!("{} {}", call.method, call.path));
                    Ok(())
                }
                Outcome::Raw(response) => {
                    println!("{}", response.text());
                    Ok(())
                }
                Outcome::Absent(failure) => bail!("{}", failure.message()),
            },
        }
    }
}

fn parse_method(method: &str) -> Result<Method> {
    match method.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        _ => bail!("Unsupported HTTP method: {}", method),
    }
}

/// Splits `key=value`, reading the value as JSON when it parses as a
/// literal, number, array or object.
fn parse_field(field: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = field.split_once('=') else {
        bail!("Invalid field format: {}. Expected key=value", field);
    };
    if key.is_empty() {
        bail!("Invalid field format: {}. Key is empty", field);
    }

    let value = match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ if raw.parse::<i64>().is_ok() || raw.starts_with('[') || raw.starts_with('{') => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        _ => Value::String(raw.to_string()),
    };
    Ok((key.to_string(), value))
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
