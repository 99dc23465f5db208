//! CLI command definitions

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "meta-reports")]
#[command(about = "Publish monthly news digests as wiki report pages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Only report posts from this month (YYYYMM, e.g., 202401)
    #[arg(value_name = "DATE_PREFIX")]
    pub date_prefix: Option<String>,
}
