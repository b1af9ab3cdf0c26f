use clap::Parser;
use std::path::Path;
use student_roster::core::ConfigProvider;
use student_roster::utils::error::ErrorSeverity;
use student_roster::utils::{logger, validation::Validate};
use student_roster::{
    generate_student_id, CliConfig, Command, LocalStorage, Result, RosterConfig, RosterError,
    RosterManager, SearchAlgorithm, SortAlgorithm, SortKey, SortOrder, Student, StudentData,
    StudentPatch,
};

fn main() {
    let cli = CliConfig::parse();

    // 載入配置（沒有指定時使用預設值）
    let config = match &cli.config {
        Some(path) => match RosterConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => RosterConfig::default(),
    };

    let verbose = cli.verbose || config.verbose_logging();
    if cli.json_logs || config.json_logging() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig, config: &RosterConfig) -> Result<()> {
    let mut settings = config.manager_settings();
    if let Some(policy) = &cli.update_policy {
        settings.update_policy = policy.parse()?;
    }

    let snapshot = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_path().to_string());
    let storage = LocalStorage::new(".");

    let mut manager = RosterManager::with_settings(settings);
    if Path::new(&snapshot).exists() {
        manager.load_from_storage(&storage, &snapshot)?;
    } else {
        tracing::info!("📄 Snapshot {} not found, starting with an empty roster", snapshot);
    }

    match &cli.command {
        Command::List => print_students(&manager.students()),
        Command::Add {
            id,
            name,
            code,
            category,
            score,
        } => {
            let student = manager.add_student(StudentData {
                id: id.clone().unwrap_or_else(generate_student_id),
                name: name.clone(),
                code: code.clone(),
                category: category.clone(),
                score: *score,
            })?;
            manager.save_to_storage(&storage, &snapshot)?;
            println!("✅ Added {}", student);
        }
        Command::Update {
            id,
            name,
            code,
            category,
            score,
        } => {
            let patch = StudentPatch {
                name: name.clone(),
                code: code.clone(),
                category: category.clone(),
                score: *score,
            };
            let student = manager.update_student(id, patch)?;
            manager.save_to_storage(&storage, &snapshot)?;
            println!("✅ Updated {}", student);
        }
        Command::Delete { id } => {
            let removed = manager.delete_student(id);
            manager.save_to_storage(&storage, &snapshot)?;
            println!("🗑️  Removed {} record(s)", removed);
        }
        Command::Sort {
            algorithm,
            key,
            order,
        } => {
            let algorithm = parse_or(algorithm, manager.settings().sort_algorithm)?;
            let key = parse_or::<SortKey>(key, manager.settings().sort_key)?;
            let order = parse_or::<SortOrder>(order, manager.settings().sort_order)?;

            let outcome = manager.reorder_by(algorithm, key, order);
            manager.save_to_storage(&storage, &snapshot)?;
            print_students(&outcome.records);
            println!(
                "⏱️  {} sort by {} {}: {:.3} ms, {}",
                outcome.algorithm,
                outcome.key,
                outcome.order,
                outcome.elapsed_ms(),
                outcome.complexity()
            );
        }
        Command::Search { query, algorithm } => {
            let algorithm = parse_or(algorithm, manager.settings().search_algorithm)?;
            let outcome = manager.search(query, algorithm);
            print_students(&outcome.records);
            println!(
                "⏱️  {} search: {} match(es) in {:.3} ms, {}",
                outcome.algorithm,
                outcome.records.len(),
                outcome.elapsed_ms(),
                outcome.complexity()
            );
        }
        Command::ExportCsv { output } => {
            let csv = manager.export_csv()?;
            match output {
                Some(path) => {
                    std::fs::write(path, csv)?;
                    println!("📁 CSV saved to: {}", path);
                }
                None => print!("{}", csv),
            }
        }
        Command::Algorithms => {
            for algorithm in SortAlgorithm::ALL {
                println!(
                    "sort   {:<10} {:<12} stable: {}",
                    algorithm.name(),
                    algorithm.complexity(),
                    algorithm.is_stable()
                );
            }
            for algorithm in SearchAlgorithm::ALL {
                println!("search {:<10} {}", algorithm.name(), algorithm.complexity());
            }
        }
    }

    Ok(())
}

fn parse_or<T>(value: &Option<String>, fallback: T) -> Result<T>
where
    T: std::str::FromStr<Err = RosterError>,
{
    match value {
        Some(raw) => raw.parse(),
        None => Ok(fallback),
    }
}

fn print_students(students: &[Student]) {
    if students.is_empty() {
        println!("(no students)");
        return;
    }
    println!(
        "{:<16} {:<24} {:<12} {:<16} {:>5}",
        "ID", "NAME", "CODE", "CATEGORY", "SCORE"
    );
    for s in students {
        println!(
            "{:<16} {:<24} {:<12} {:<16} {:>5.2}",
            s.id(),
            s.name(),
            s.code(),
            s.category(),
            s.score()
        );
    }
}
