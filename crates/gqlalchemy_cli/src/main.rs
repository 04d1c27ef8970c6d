//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gqlalchemy_core` linkage and environment configuration.
//! - Print a rendered sample query without contacting a database.

use gqlalchemy_core::query::entry;
use gqlalchemy_core::{
    default_log_level, init_logging, ConnectionConfig, EdgePattern, LogTarget, NodePattern,
    QueryBuilder, ScriptedConnection,
};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_logging(default_log_level(), LogTarget::Stderr) {
        eprintln!("logging disabled: {err}");
    }

    let config = match ConnectionConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("invalid connection settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("gqlalchemy_core version={}", gqlalchemy_core::core_version());
    println!("target={}", config.bolt_uri());

    match sample_query() {
        Ok(query) => {
            let dry_run = ScriptedConnection::new();
            if let Err(err) = query.execute(&dry_run) {
                eprintln!("dry run failed: {err}");
                return ExitCode::FAILURE;
            }
            for executed in dry_run.executed() {
                println!("query={}", executed.trim());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to build sample query: {err}");
            ExitCode::FAILURE
        }
    }
}

fn sample_query() -> Result<QueryBuilder, gqlalchemy_core::BuildError> {
    Ok(entry::match_()
        .node(NodePattern::new().variable("a").label("Person"))?
        .to(EdgePattern::new().variable("r").edge_type("KNOWS"))?
        .node(NodePattern::new().variable("b").label("Person"))?
        .where_("a.name", "=", "Ada")?
        .return_([("b.name", "friend")])
        .limit("10"))
}
