use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use scam_radar::classifier::{ClassificationOutput, ScamClassifier, SAMPLE_MESSAGES};
use scam_radar::config::yaml_config::{load_config, load_config_or_default, write_default_config};
use scam_radar::config::Config;
use std::io::{self, BufRead};
use std::process;

fn main() {
    let matches = Command::new("scam-radar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Classifies SMS/chat messages as likely scam, suspicious or benign")
        .long_about(
            "scam-radar combines a statistical scam probability with heuristic checks:\n\
             • brand impersonation (brand name linking to a foreign domain)\n\
             • authority impersonation (official wording plus a link or phone number)\n\
             • trusted promotions and official announcements\n\
             • URL shorteners hiding the destination",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (YAML); built-in tables are used when omitted"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Model artifact (JSON), overrides model_path from the configuration"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and model artifact, then exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full analysis as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Classify the built-in sample messages")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-message scoring details")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Message to classify; reads one message per line from stdin when omitted")
                .num_args(1..),
        )
        .get_matches();

    // Initialize logger based on verbose flag
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = match matches.get_one::<String>("config") {
        Some(path) if matches.get_flag("test-config") => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {e:#}");
                process::exit(1);
            }
        },
        Some(path) => load_config_or_default(path),
        None => Config::default(),
    };

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match write_default_config(generate_path) {
            Ok(()) => println!("Default configuration written to: {generate_path}"),
            Err(e) => {
                eprintln!("Error generating configuration: {e:#}");
                process::exit(1);
            }
        }
        return;
    }

    let model_override = matches.get_one::<String>("model").map(String::as_str);
    let classifier = ScamClassifier::from_config(&config, model_override);

    if matches.get_flag("test-config") {
        test_config(&config, &classifier);
        return;
    }

    let json = matches.get_flag("json");

    if matches.get_flag("demo") {
        for message in SAMPLE_MESSAGES {
            println!("📩 {message}");
            print_result(&classifier, message, json);
        }
        return;
    }

    if let Some(words) = matches.get_many::<String>("message") {
        let message = words.map(String::as_str).collect::<Vec<_>>().join(" ");
        print_result(&classifier, &message, json);
        return;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(message) => {
                if message.trim().is_empty() {
                    continue;
                }
                print_result(&classifier, &message, json);
            }
            Err(e) => {
                log::error!("Failed to read from stdin: {e}");
                process::exit(1);
            }
        }
    }
}

fn test_config(config: &Config, classifier: &ScamClassifier) {
    println!("🔍 Testing configuration...");
    println!();
    println!("Trusted entities: {}", config.tables.trusted_entities.len());
    println!("Authority keywords: {}", config.tables.authority_keywords.len());
    println!("Shortener domains: {}", config.tables.shortener_domains.len());

    match classifier.model_name() {
        Some(name) => {
            println!("Model: {name}");
            println!("✅ Configuration validated");
        }
        None => {
            println!("❌ Model artifact could not be loaded");
            process::exit(1);
        }
    }
}

fn print_result(classifier: &ScamClassifier, message: &str, json: bool) {
    if json {
        let rendered = match classifier.analyze(message) {
            Ok(Some(analysis)) => serde_json::to_string_pretty(&analysis),
            Ok(None) => return,
            Err(e) => {
                log::warn!("Analysis unavailable: {e}");
                serde_json::to_string_pretty(&ClassificationOutput::from_error(&e))
            }
        };
        match rendered {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => log::error!("Failed to render result: {e}"),
        }
        return;
    }

    let output = classifier.classify(message);
    println!("{}", output.label);
    println!("{}", output.probability);
    println!("{}", output.explanation);
    println!();
}
