pub mod commands;
pub mod sources;

use camino::Utf8PathBuf;
use clap::Args;

/// Where the form's data comes from and which edits to apply before
/// validating.
#[derive(Args, Clone, Debug, Default)]
pub struct FormArgs {
    /// Project the action set belongs to.
    #[arg(long, default_value = "default", env = "ACTIONSET_PROJECT")]
    pub project: String,
    /// JSON listing of the project's action sets.
    #[arg(long)]
    pub siblings: Option<Utf8PathBuf>,
    /// JSON file holding the action set to edit.
    #[arg(long, conflicts_with = "edit")]
    pub record: Option<Utf8PathBuf>,
    /// Edit the action set with this id from the sibling listing.
    #[arg(long, requires = "siblings")]
    pub edit: Option<i64>,
    /// Number synthetic row keys 1, 2, … instead of random UUIDs.
    #[arg(long)]
    pub stable_ids: bool,

    #[command(flatten)]
    pub edits: FieldEdits,
}

#[derive(Args, Clone, Debug, Default)]
pub struct FieldEdits {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub enabled: Option<bool>,
    #[arg(long)]
    pub source_id: Option<i64>,
    #[arg(long)]
    pub actor_id: Option<i64>,
    /// Replaces the filter list; repeat for several `parameter=value` pairs.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
    #[arg(long, conflicts_with = "filters")]
    pub clear_filters: bool,
    /// Replaces the action list; sort order follows argument order.
    #[arg(long = "action")]
    pub actions: Vec<String>,
    #[arg(long, conflicts_with = "actions")]
    pub clear_actions: bool,
}

pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected parameter=value, got '{raw}'")),
    }
}
