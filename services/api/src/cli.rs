use crate::server;
use clap::{Args, Parser, Subcommand};
use hr_saas::error::AppError;
use hr_saas::schema::{export, SchemaRegistry};

#[derive(Parser, Debug)]
#[command(
    name = "HR SaaS API",
    about = "Serve the HR backend or inspect the schemas it exposes to the database viewer",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the exported schema catalog as JSON
    Schema(SchemaArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SchemaArgs {
    /// Only print the document for this collection (e.g. `payroll`)
    #[arg(long)]
    pub(crate) collection: Option<String>,
    /// Emit single-line JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Schema(args) => {
            let rendered = render_schema(&SchemaRegistry::standard(), &args)?;
            println!("{rendered}");
            Ok(())
        }
    }
}

pub(crate) fn render_schema(
    registry: &SchemaRegistry,
    args: &SchemaArgs,
) -> Result<String, AppError> {
    let catalog = export(registry)?;

    let value = match &args.collection {
        Some(collection) => {
            let key = collection.to_lowercase();
            let document = catalog
                .document(&key)
                .ok_or_else(|| AppError::UnknownCollection(collection.clone()))?;
            serde_json::to_value(document)?
        }
        None => serde_json::to_value(&catalog)?,
    };

    let rendered = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn renders_single_collection_case_insensitively() {
        let args = SchemaArgs {
            collection: Some("LeaveRequest".to_string()),
            compact: true,
        };

        let rendered = render_schema(&SchemaRegistry::standard(), &args).expect("renders");
        assert!(!rendered.contains('\n'));

        let document: Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(document["title"], "LeaveRequest");
        assert_eq!(document["properties"]["status"]["default"], "pending");
    }

    #[test]
    fn rejects_unknown_collection() {
        let args = SchemaArgs {
            collection: Some("users".to_string()),
            compact: false,
        };

        let result = render_schema(&SchemaRegistry::standard(), &args);
        assert!(matches!(result, Err(AppError::UnknownCollection(name)) if name == "users"));
    }

    #[test]
    fn full_catalog_is_wrapped_under_schemas() {
        let rendered =
            render_schema(&SchemaRegistry::standard(), &SchemaArgs::default()).expect("renders");
        let catalog: Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(catalog["schemas"].as_object().map(|m| m.len()), Some(8));
    }

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["hr-saas-api"]).expect("parses");
        assert!(cli.command.is_none());

        let cli =
            Cli::try_parse_from(["hr-saas-api", "schema", "--collection", "job", "--compact"])
                .expect("parses");
        match cli.command {
            Some(Command::Schema(args)) => {
                assert_eq!(args.collection.as_deref(), Some("job"));
                assert!(args.compact);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
