use clap::Parser;
use std::path::PathBuf;

/// Server configuration parsed from command line arguments and
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "beacon")]
#[command(
    author,
    version,
    about = "Marketing and content site for an advocacy organization"
)]
#[command(after_help = "Examples:
  beacon --bind 0.0.0.0:8080
  WORDPRESS_GRAPHQL_URL=https://cms.example.org/graphql beacon")]
pub struct Config {
    /// Content API endpoint URL. When unset, content pages render their
    /// empty states instead of failing.
    #[arg(long, env = "WORDPRESS_GRAPHQL_URL")]
    pub content_api_url: Option<String>,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Directory of static assets (fallback images and friends)
    #[arg(long, env = "ASSETS_DIR", default_value = "public")]
    pub assets_dir: PathBuf,
}
