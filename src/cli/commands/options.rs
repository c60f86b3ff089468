//! Options command: the distinct values the UI filters offer

use anyhow::Result;
use serde::Serialize;

use super::print_response;
use crate::resolver::{ApiResponse, Resolver};
use crate::store::{ReferenceStore, SqliteStore};

#[derive(Serialize)]
struct OptionsData {
    admission_categories: Vec<String>,
    school_names: Vec<String>,
}

pub async fn handle_options_command(resolver: &Resolver<SqliteStore>) -> Result<()> {
    let store = resolver.store();
    let (admission_categories, school_names) =
        tokio::try_join!(store.distinct_categories(), store.distinct_schools())?;

    let data = OptionsData {
        admission_categories,
        school_names,
    };
    print_response(&ApiResponse::ok(&data));
    Ok(())
}
