//! Request definitions
//!
//! Represents named requests from a dispatch layer.

use std::path::PathBuf;

use crate::error::{MonoError, Result};

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Health check
    Ping,

    /// Store a record built from one or more sub-key/value pairs
    AddFields {
        path: PathBuf,
        identifier: String,
        pairs: Vec<(String, String)>,
    },

    /// Overwrite one existing sub-key
    SetValue {
        path: PathBuf,
        identifier: String,
        sub_key: String,
        value: String,
    },

    /// List all identifiers
    ListKeys { path: PathBuf },

    /// List the values of one record
    ListValues {
        path: PathBuf,
        identifier: String,
        with_keys: bool,
        raw: bool,
    },

    /// Delete one record
    DeleteKey { path: PathBuf, identifier: String },

    /// Empty the whole store
    DeleteAll { path: PathBuf },
}

impl Request {
    /// Wire name of the request
    pub fn name(&self) -> &'static str {
        match self {
            Request::Ping => "ping",
            Request::AddFields { .. } => "add_fields",
            Request::SetValue { .. } => "set_value",
            Request::ListKeys { .. } => "list_keys",
            Request::ListValues { .. } => "list_values",
            Request::DeleteKey { .. } => "delete_key",
            Request::DeleteAll { .. } => "delete_all",
        }
    }

    /// Parse a named request with positional string arguments
    pub fn parse(name: &str, args: &[String]) -> Result<Request> {
        match name {
            "ping" => {
                expect_len(name, args, 0)?;
                Ok(Request::Ping)
            }
            "add_fields" => parse_add_fields(args),
            "set_value" => {
                expect_len(name, args, 4)?;
                Ok(Request::SetValue {
                    path: PathBuf::from(&args[0]),
                    identifier: args[1].clone(),
                    sub_key: args[2].clone(),
                    value: args[3].clone(),
                })
            }
            "list_keys" => {
                expect_len(name, args, 1)?;
                Ok(Request::ListKeys {
                    path: PathBuf::from(&args[0]),
                })
            }
            "list_values" => {
                if !(2..=4).contains(&args.len()) {
                    return Err(MonoError::Protocol(format!(
                        "list_values: expected 2 to 4 arguments, got {}",
                        args.len()
                    )));
                }
                let with_keys = args.get(2).map(|a| parse_flag(a)).transpose()?.unwrap_or(true);
                let raw = args.get(3).map(|a| parse_flag(a)).transpose()?.unwrap_or(false);
                Ok(Request::ListValues {
                    path: PathBuf::from(&args[0]),
                    identifier: args[1].clone(),
                    with_keys,
                    raw,
                })
            }
            "delete_key" => {
                expect_len(name, args, 2)?;
                Ok(Request::DeleteKey {
                    path: PathBuf::from(&args[0]),
                    identifier: args[1].clone(),
                })
            }
            "delete_all" => {
                expect_len(name, args, 1)?;
                Ok(Request::DeleteAll {
                    path: PathBuf::from(&args[0]),
                })
            }
            _ => Err(MonoError::Protocol(format!("Unknown request: {}", name))),
        }
    }
}

/// Parse `path identifier (sub-key value)+`
fn parse_add_fields(args: &[String]) -> Result<Request> {
    if args.len() < 4 {
        return Err(MonoError::Protocol(format!(
            "add_fields: expected at least 4 arguments, got {}",
            args.len()
        )));
    }

    let rest = &args[2..];
    if rest.len() % 2 != 0 {
        return Err(MonoError::Protocol(format!(
            "add_fields: sub-key '{}' has no value",
            rest[rest.len() - 1]
        )));
    }

    let pairs = rest
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();

    Ok(Request::AddFields {
        path: PathBuf::from(&args[0]),
        identifier: args[1].clone(),
        pairs,
    })
}

fn expect_len(name: &str, args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(MonoError::Protocol(format!(
            "{}: expected {} arguments, got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn parse_flag(arg: &str) -> Result<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(MonoError::Protocol(format!(
            "expected a boolean flag, got '{}'",
            other
        ))),
    }
}
