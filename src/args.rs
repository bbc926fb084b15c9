use clap::{Parser, Subcommand};

/// Cost model of One Nation One Election (simultaneous national and state polls in India).
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, global = true, takes_value = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Projects the standard and ONOE costs of every state and writes them as CSV.
    Generate(GenerateArgs),
    /// Renders the national cost dashboard as an HTML page, with its CSV export.
    Dashboard(DashboardArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// (file path, default onoe_complete_india_data.csv) Where to write the projection.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A JSON file overriding the unit costs, the sizing assumptions
    /// or the state table. See the manual of the onoe_costs crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) A reference CSV file. If provided, the generated table must
    /// match it exactly and the differences are printed otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DashboardArgs {
    /// (file path, default onoe_dashboard.html) Where to write the dashboard page.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, default onoe_data.csv) Where to write the downloadable CSV table.
    #[clap(long, value_parser)]
    pub csv_out: Option<String>,

    /// (file path, optional) An alternate line-item table. The built-in national table
    /// is used when not provided.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the only worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,
}
