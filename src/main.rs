use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crop_advisor::agronomy::soil::inspect_crop;
use crop_advisor::agronomy::CustomCropInput;
use crop_advisor::config::{Config, ConfigOverrides};
use crop_advisor::funding::category::suggest_for_category;
use crop_advisor::funding::profile::{recommend_for_profile, FarmerProfile};
use crop_advisor::funding::{FundingCatalog, FundingMatch};
use crop_advisor::output::csv::{funding_to_csv, merge_funding, report_to_csv};
use crop_advisor::output::render_json;
use crop_advisor::output::table::{
    render_crop_card, render_crop_list, render_funding_table, render_report,
};
use crop_advisor::pipeline::runner::evaluate;
use crop_advisor::pipeline::validate::{validate_profile, validate_request};
use crop_advisor::pipeline::{CropSelection, EvaluationRequest, FarmParameters};
use crop_advisor::reference::{CropCategory, ReferenceData, SoilTier, WaterNeed};
use crop_advisor::server::run_server;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "crop-advisor",
    about = "Crop viability, profitability and funding-line advisor"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long = "crops-csv")]
    crops_csv: Option<String>,
    #[arg(long = "prices-csv")]
    reference_prices_csv: Option<String>,
    #[arg(long = "funding-catalog")]
    funding_catalog: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct FarmArgs {
    #[arg(long)]
    area: f64,
    #[arg(long = "cost-per-ha")]
    cost_per_ha: Option<f64>,
    #[arg(long = "estimated-yield")]
    estimated_yield: Option<f64>,
}

impl From<FarmArgs> for FarmParameters {
    fn from(value: FarmArgs) -> Self {
        Self {
            area_ha: value.area,
            cost_per_ha: value.cost_per_ha,
            estimated_yield: value.estimated_yield,
        }
    }
}

#[derive(Debug, clap::Args, Clone, Default)]
struct ProfileArgs {
    #[arg(long)]
    age: Option<u32>,
    #[arg(long = "new-farm")]
    starting_new_farm: bool,
    #[arg(long)]
    modernizing: bool,
    #[arg(long)]
    transforming: bool,
    #[arg(long = "collective-irrigation")]
    collective_irrigation: bool,
    #[arg(long = "needs-access")]
    needs_access: bool,
    #[arg(long = "calamity")]
    calamity_affected: bool,
    #[arg(long = "non-productive")]
    non_productive_investment: bool,
    #[arg(long = "insurance")]
    has_insurance: bool,
}

impl ProfileArgs {
    fn into_profile(self) -> Option<FarmerProfile> {
        let age = self.age?;
        Some(FarmerProfile {
            age,
            starting_new_farm: self.starting_new_farm,
            modernizing: self.modernizing,
            transforming: self.transforming,
            collective_irrigation: self.collective_irrigation,
            needs_access: self.needs_access,
            calamity_affected: self.calamity_affected,
            non_productive_investment: self.non_productive_investment,
            has_insurance: self.has_insurance,
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WaterArg {
    Low,
    Medium,
    High,
}

impl From<WaterArg> for WaterNeed {
    fn from(value: WaterArg) -> Self {
        match value {
            WaterArg::Low => WaterNeed::Low,
            WaterArg::Medium => WaterNeed::Medium,
            WaterArg::High => WaterNeed::High,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SoilArg {
    #[value(name = "1")]
    Tier1,
    #[value(name = "2")]
    Tier2,
    #[value(name = "3")]
    Tier3,
}

impl From<SoilArg> for SoilTier {
    fn from(value: SoilArg) -> Self {
        match value {
            SoilArg::Tier1 => SoilTier::Tier1,
            SoilArg::Tier2 => SoilTier::Tier2,
            SoilArg::Tier3 => SoilTier::Tier3,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a crop from the reference dataset
    Evaluate {
        crop: String,
        #[command(flatten)]
        farm: FarmArgs,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Evaluate a crop described by its growing conditions
    Custom {
        name: String,
        #[arg(long = "ph-min")]
        ph_min: f64,
        #[arg(long = "ph-max")]
        ph_max: f64,
        #[arg(long = "sunlight", default_value_t = 0.0)]
        min_sunlight: f64,
        #[arg(long)]
        category: CropCategory,
        #[arg(long, value_enum)]
        water: Option<WaterArg>,
        #[arg(long, value_enum)]
        soil: Option<SoilArg>,
        #[command(flatten)]
        farm: FarmArgs,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Match funding lines to a farmer profile
    Funding {
        #[arg(long)]
        category: Option<CropCategory>,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// List crops in the reference dataset
    Crops,
    /// Show the profile card of one crop
    Inspect { crop: String },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        crops_csv: cli.crops_csv.clone(),
        reference_prices_csv: cli.reference_prices_csv.clone(),
        funding_catalog: cli.funding_catalog.clone(),
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Serve { host, port } = &cli.command {
        let host = host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }

    let catalog = config.load_funding_catalog()?;
    if let Commands::Funding { category, profile } = &cli.command {
        let profile = profile
            .clone()
            .into_profile()
            .ok_or_else(|| anyhow!("--age is required for funding"))?;
        validate_profile(&profile)?;
        let by_category = suggest_for_category(&catalog, *category);
        let by_profile = recommend_for_profile(&catalog, &profile);
        return print_funding(&by_category, &by_profile, cli.output);
    }

    let reference = config.load_reference_data()?;
    match &cli.command {
        Commands::Evaluate {
            crop,
            farm,
            profile,
        } => {
            let request = EvaluationRequest {
                crop: CropSelection::Existing { name: crop.clone() },
                farm: farm.clone().into(),
                farmer: profile.clone().into_profile(),
            };
            if !reference.contains_crop(crop) {
                warn!("{crop} is not in the reference dataset");
            }
            run_evaluation(&request, &reference, &catalog, &config, cli.output)?;
        }
        Commands::Custom {
            name,
            ph_min,
            ph_max,
            min_sunlight,
            category,
            water,
            soil,
            farm,
            profile,
        } => {
            let request = EvaluationRequest {
                crop: CropSelection::Custom(CustomCropInput {
                    name: name.clone(),
                    ph_min: *ph_min,
                    ph_max: *ph_max,
                    min_sunlight: *min_sunlight,
                    category: *category,
                    water_need: water.map(WaterNeed::from).unwrap_or_default(),
                    soil_tier: soil.map(SoilTier::from).unwrap_or_default(),
                }),
                farm: farm.clone().into(),
                farmer: profile.clone().into_profile(),
            };
            run_evaluation(&request, &reference, &catalog, &config, cli.output)?;
        }
        Commands::Crops => {
            let names = reference.crop_names();
            match cli.output {
                OutputFormat::Table => println!("{}", render_crop_list(&names)),
                OutputFormat::Json => println!("{}", render_json(&names)?),
                OutputFormat::Csv => {
                    println!("crop");
                    for name in &names {
                        println!("{name}");
                    }
                }
            }
        }
        Commands::Inspect { crop } => {
            let card = inspect_crop(&reference, &config.region, crop)
                .ok_or_else(|| anyhow!("unknown crop: {crop}"))?;
            match cli.output {
                OutputFormat::Table => println!("{}", render_crop_card(&card)),
                OutputFormat::Json => println!("{}", render_json(&card)?),
                OutputFormat::Csv => {
                    warn!("CSV output for inspect not implemented, using JSON");
                    println!("{}", render_json(&card)?);
                }
            }
        }
        Commands::Funding { .. } => unreachable!("funding command handled before dispatch"),
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn run_evaluation(
    request: &EvaluationRequest,
    reference: &ReferenceData,
    catalog: &FundingCatalog,
    config: &Config,
    output: OutputFormat,
) -> Result<()> {
    validate_request(request)?;
    let report = evaluate(reference, catalog, &config.region, request)?;
    match output {
        OutputFormat::Table => println!("{}", render_report(&report, &config.region)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
        OutputFormat::Csv => print!("{}", report_to_csv(&report)?),
    }
    Ok(())
}

fn print_funding(
    by_category: &[FundingMatch],
    by_profile: &[FundingMatch],
    output: OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Table => {
            if !by_category.is_empty() {
                println!("Suggested funding lines for this crop category");
                println!("{}", render_funding_table(by_category));
            }
            println!("Funding lines matching the farmer profile");
            println!("{}", render_funding_table(by_profile));
        }
        OutputFormat::Json => println!(
            "{}",
            render_json(&serde_json::json!({
                "category_funding": by_category,
                "profile_funding": by_profile,
            }))?
        ),
        OutputFormat::Csv => {
            print!("{}", funding_to_csv(&merge_funding(by_category, by_profile))?);
        }
    }
    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}
