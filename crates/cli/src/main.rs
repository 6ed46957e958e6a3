use agroprecios_core::catalog::{Catalog, CatalogQuery, Category, PriceSort};
use agroprecios_core::config::{DataMode, Settings};
use agroprecios_core::dashboard::{self, Dashboard, RecommendationView};
use agroprecios_core::repository::PriceRepository;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "agroprecios")]
struct Args {
    /// Serve the bundled dataset instead of calling the price API.
    #[arg(long, conflicts_with = "remote")]
    mock: bool,

    /// Call the price API, falling back to the bundled dataset on failure.
    #[arg(long)]
    remote: bool,

    /// Overrides PRICE_API_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price summary for one product and city, plus current recommendations.
    Dashboard {
        #[arg(long)]
        product: Option<i64>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Product catalog with search, category filter and price sort.
    Products {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Purchase recommendations.
    Recommendations,
    /// Detailed analysis for one product.
    Detail {
        product_id: i64,
        #[arg(long)]
        city: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    PriceAsc,
    PriceDesc,
}

impl From<SortArg> for PriceSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PriceAsc => PriceSort::PriceAsc,
            SortArg::PriceDesc => PriceSort::PriceDesc,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Some(base_url) = args.base_url.clone() {
        settings.price_api_base_url = Some(base_url);
    }
    if args.mock {
        settings.data_mode = DataMode::Mock;
    } else if args.remote {
        settings.data_mode = DataMode::Remote;
    }

    if let Err(err) = run(args.command, &settings).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "command failed");
        return Err(err);
    }
    Ok(())
}

async fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    let repo = PriceRepository::from_settings(settings)?;
    tracing::info!(mode = ?repo.mode(), base_url = settings.base_url(), "price repository ready");

    match command {
        Command::Dashboard { product, city } => {
            let mut dash = Dashboard::new(repo);
            dash.load_initial().await;

            let current = dash.selection().map(|s| s.product.id);
            let selected = match product.or(current) {
                Some(id) => dash.select(id, city.as_deref()).await,
                None => false,
            };
            anyhow::ensure!(
                selected,
                "no product selected (unknown product id or empty product list)"
            );

            let summary = dash.summary().context("price series not loaded")?;
            print_json(&summary)
        }
        Command::Products {
            search,
            category,
            sort,
        } => {
            let category = category
                .as_deref()
                .filter(|c| *c != "all")
                .map(str::parse::<Category>)
                .transpose()?;
            let query = CatalogQuery {
                search,
                category,
                sort: sort.map(PriceSort::from).unwrap_or_default(),
            };
            let products = repo.products().await;
            let entries = Catalog::bundled().query(&products, &query);
            tracing::info!(found = entries.len(), "catalog query");
            print_json(&entries)
        }
        Command::Recommendations => {
            let views: Vec<RecommendationView> = repo
                .recommendations()
                .await
                .into_iter()
                .map(RecommendationView::from)
                .collect();
            print_json(&views)
        }
        Command::Detail { product_id, city } => {
            let insight =
                dashboard::product_insight(&repo, &Catalog::bundled(), product_id, city.as_deref())
                    .await
                    .with_context(|| format!("product {product_id} not found"))?;
            print_json(&insight)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
