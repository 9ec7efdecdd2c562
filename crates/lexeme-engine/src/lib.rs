// Engine module - Core query logic (aggregation, search, export)
// This layer sits between the ingested model (types) and CLI presentation

pub mod aggregate;
pub mod context;
pub mod error;
pub mod export;
pub mod search;

pub use aggregate::{aggregate, lexical_order, summary_order};
pub use context::SessionContext;
pub use error::{Error, Result};
pub use export::{
    SummaryRow, parse_summary, render, render_category_entries, render_summary,
    render_summary_json,
};
pub use search::{
    CategoryHit, CategorySearch, PoemGroup, PoemHit, find_entry_categories,
    find_poems_by_category, find_poems_containing_word, find_poems_in_category,
};
