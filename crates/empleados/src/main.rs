use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use empleados::cli::{Cli, Commands, OutputFormat};
use empleados::output::{
    format_batch_delete, format_empleado, format_empleados, format_logs, format_output,
};
use empleados::storage::DynamoDbRepository;
use empleados_core::empleado::Empleado;
use empleados_core::storage::{EmpleadoRepository, LogRepository};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = cli.config();

    tracing::debug!(target_env = %config.target_display(), "Connecting to DynamoDB");
    let repo = DynamoDbRepository::from_config(&config).await;

    run(&repo, cli).await
}

/// Initialize the tracing subscriber.
///
/// `LOG_FORMAT=json` switches to JSON lines; filtering follows `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "empleados=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run<R>(repo: &R, cli: Cli) -> Result<()>
where
    R: EmpleadoRepository + LogRepository,
{
    match cli.command {
        Commands::List => {
            let empleados = repo.find_all().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&empleados, cli.format)),
                OutputFormat::Pretty => println!("{}", format_empleados(&empleados)),
            }
        }
        Commands::Get { codigo } => match repo.find_by_id(codigo).await? {
            Some(empleado) => match cli.format {
                OutputFormat::Json => println!("{}", format_output(&empleado, cli.format)),
                OutputFormat::Pretty => println!("{}", format_empleado(&empleado)),
            },
            None => anyhow::bail!("Empleado {} not found", codigo),
        },
        Commands::Cedula { cedula } => {
            let empleados = repo.find_by_cedula(&cedula).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&empleados, cli.format)),
                OutputFormat::Pretty => println!("{}", format_empleados(&empleados)),
            }
        }
        Commands::Search { query } => {
            let empleados = repo.search(&query).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&empleados, cli.format)),
                OutputFormat::Pretty => println!("{}", format_empleados(&empleados)),
            }
        }
        Commands::Save {
            codigo,
            cedula,
            nombres,
            apellidos,
            cargo,
            correo,
        } => {
            let mut empleado = Empleado::new(cedula, nombres, apellidos);
            if let Some(codigo) = codigo {
                empleado = empleado.with_id(codigo);
            }
            if let Some(cargo) = cargo {
                empleado = empleado.with_cargo(cargo);
            }
            if let Some(correo) = correo {
                empleado = empleado.with_correo(correo);
            }

            let empleado = repo.save(empleado).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&empleado, cli.format)),
                OutputFormat::Pretty if !cli.quiet => {
                    println!("Saved:\n{}", format_empleado(&empleado))
                }
                OutputFormat::Pretty => {}
            }
        }
        Commands::Delete { codigo } => {
            repo.delete_by_id(codigo).await?;
            if !cli.quiet {
                println!("Deleted empleado {}", codigo);
            }
        }
        Commands::Logs { codigo } => {
            let logs = repo.find_logs_by_codigo(codigo).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&logs, cli.format)),
                OutputFormat::Pretty => println!("{}", format_logs(&logs)),
            }
        }
        Commands::PurgeLogs { codigo } => {
            let logs = repo.find_logs_by_codigo(codigo).await?;
            let outcome = repo.delete_all_logs(&logs).await?;
            if !cli.quiet || !outcome.is_complete() {
                println!("{}", format_batch_delete(&outcome));
            }
            if !outcome.is_complete() {
                anyhow::bail!(
                    "{} log(s) of {} were not deleted",
                    outcome.unprocessed.len(),
                    codigo
                );
            }
        }
    }

    Ok(())
}
