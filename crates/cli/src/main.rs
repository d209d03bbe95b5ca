use api_shared::{CreatePatientReq, Patient, UpdatePatientReq};
use clap::{Parser, Subcommand};
use patient_core::{
    patient_data_file_from_env_value, CoreConfig, PatientService, SortField, SortOrder,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patient")]
#[command(about = "Patient records CLI")]
struct Cli {
    /// Patient data file (defaults to $PATIENT_DATA_FILE, then patients.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient
    Show {
        /// Patient ID (case-insensitive)
        id: String,
    },
    /// Create a patient
    Create {
        id: String,
        name: String,
        city: String,
        age: i64,
        /// male, female or other
        gender: String,
        /// Height in meters
        height: f64,
        /// Weight in kilograms
        weight: f64,
    },
    /// Update selected fields of a patient
    Update {
        /// Patient ID (case-insensitive)
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Delete a patient
    Delete {
        /// Patient ID (case-insensitive)
        id: String,
    },
    /// List patients sorted by bmi, height or weight
    Sort {
        field: String,
        /// asc or desc
        #[arg(long)]
        order: Option<String>,
    },
}

fn print_patient(patient: &Patient) {
    println!(
        "ID: {}, Name: {}, City: {}, Age: {}, Gender: {}, Height: {} m, Weight: {} kg, BMI: {} ({})",
        patient.id,
        patient.name,
        patient.city,
        patient.age,
        patient.gender,
        patient.height,
        patient.weight,
        patient.bmi,
        patient.verdict
    );
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse())
}

/// Runs one command against the data file.
///
/// Failures of the command itself are printed and reported through the exit code; only
/// set-up failures (bad data file, unreadable store) are returned as errors.
fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        println!("Use 'patient --help' for commands");
        return Ok(ExitCode::SUCCESS);
    };

    let patient_data_file = match cli.file {
        Some(path) => path,
        None => patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok()),
    };
    let cfg = CoreConfig::new(patient_data_file)?;
    let service = PatientService::open(&cfg)?;

    match command {
        Commands::List => match service.list_all() {
            Ok(patients) if patients.is_empty() => println!("No patients found."),
            Ok(patients) => {
                for patient in patients.values() {
                    print_patient(patient);
                }
            }
            Err(e) => {
                eprintln!("Error listing patients: {}", e);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Show { id } => match service.get(&id) {
            Ok(patient) => println!("{}", serde_json::to_string_pretty(&patient)?),
            Err(e) => {
                eprintln!("Error reading patient {}: {}", id, e);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Create {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } => {
            let req = CreatePatientReq {
                id: Some(id),
                name: Some(name),
                city: Some(city),
                age: Some(age),
                gender: Some(gender),
                height: Some(height),
                weight: Some(weight),
            };
            match service.create(req) {
                Ok(patient) => {
                    println!("Created patient:");
                    print_patient(&patient);
                }
                Err(e) => {
                    eprintln!("Error creating patient: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Update {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        } => {
            let update = UpdatePatientReq {
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            match service.update(&id, update) {
                Ok(patient) => {
                    println!("Updated patient:");
                    print_patient(&patient);
                }
                Err(e) => {
                    eprintln!("Error updating patient {}: {}", id, e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Delete { id } => match service.delete(&id) {
            Ok(removed) => println!("Deleted patient {}", removed),
            Err(e) => {
                eprintln!("Error deleting patient {}: {}", id, e);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Sort { field, order } => {
            let field: SortField = field.parse()?;
            let order = SortOrder::parse_or_default(order.as_deref())?;
            for patient in service.sort(field, order)? {
                print_patient(&patient);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("patient").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_run_reports_failed_commands_in_exit_code() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("patients.json");
        let file = file.to_str().expect("temp path should be UTF-8");

        let created = run(cli(&[
            "--file", file, "create", "P001", "Ann Lee", "Leeds", "40", "female", "1.7", "65",
        ]))
        .expect("create should run");
        assert_eq!(created, ExitCode::SUCCESS);

        let duplicate = run(cli(&[
            "--file", file, "create", "p001", "Ann Lee", "Leeds", "40", "female", "1.7", "65",
        ]))
        .expect("create should run");
        assert_eq!(duplicate, ExitCode::FAILURE);

        let missing = run(cli(&["--file", file, "show", "P999"])).expect("show should run");
        assert_eq!(missing, ExitCode::FAILURE);

        let deleted = run(cli(&["--file", file, "delete", "p001"])).expect("delete should run");
        assert_eq!(deleted, ExitCode::SUCCESS);
    }
}
